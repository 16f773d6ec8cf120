use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceKind;

/// Access conditions at a pickup or dropoff location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopAccess {
    /// Floor number; anything below 1 is treated as the ground floor.
    pub floor: i64,
    pub has_elevator: bool,
}

impl Default for StopAccess {
    fn default() -> Self {
        Self { floor: 1, has_elevator: false }
    }
}

/// One estimate request, built fresh from form input per calculation.
/// Plain data; all clamping happens inside the fee calculators so a
/// request never needs to be validated before pricing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub service: ServiceKind,
    /// Vehicle count; priced clamped to 1..=2.
    pub vans: i64,
    pub distance_km: Decimal,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub pickup: StopAccess,
    pub dropoff: StopAccess,
    pub workers: i64,
    pub worker_hours: Decimal,
    pub note: Option<String>,
    pub scheduled_at: Option<String>,
}

impl QuoteRequest {
    /// A minimal request for `service`: one van, zero distance, ground-floor
    /// stops, no extra labor.
    pub fn new(service: ServiceKind) -> Self {
        Self {
            service,
            vans: 1,
            distance_km: Decimal::ZERO,
            origin: None,
            destination: None,
            pickup: StopAccess::default(),
            dropoff: StopAccess::default(),
            workers: 0,
            worker_hours: Decimal::ZERO,
            note: None,
            scheduled_at: None,
        }
    }
}
