//! Fee calculators and quote assembly.
//!
//! Everything here is pure arithmetic over the injected [`PriceTable`]:
//! no I/O, no clock access, no failure modes. Out-of-range input is
//! clamped rather than rejected so a partially filled form still prices.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::PriceTable;
use crate::domain::request::QuoteRequest;
use crate::domain::service::ServiceKind;
use crate::reservation::ReservationId;
use crate::summary::format_yen;

/// Distance surcharge plus the human-readable note describing how the
/// step count was reached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelFee {
    pub fee: Decimal,
    pub note: String,
}

/// One row of the presentation breakdown, in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub label: String,
    pub value: String,
}

/// A priced estimate. Derived from exactly one [`QuoteRequest`] and the
/// price table; immutable once built. Carries every input echo the
/// summary text needs so rendering never reaches back to the request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub reservation_id: ReservationId,
    pub service: ServiceKind,
    pub vans: i64,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub distance_km: Decimal,
    pub travel_fee: TravelFee,
    pub base_fee: Decimal,
    pub drive_part: Decimal,
    pub stairs_fee: Decimal,
    pub workers: i64,
    pub worker_hours: Decimal,
    pub extra_labor_per_hour: Decimal,
    pub labor_fee: Decimal,
    pub total: Decimal,
    pub scheduled_at: Option<String>,
    pub note: Option<String>,
    pub breakdown: Vec<BreakdownRow>,
}

/// Distance surcharge: the first `travel_free_km` are free (boundary
/// inclusive), then one step fee per started `travel_step_km` band.
pub fn calc_travel_fee(table: &PriceTable, distance_km: Decimal) -> TravelFee {
    let km = distance_km.max(Decimal::ZERO);
    if km <= table.travel_free_km {
        return TravelFee {
            fee: Decimal::ZERO,
            note: format!("{}km圏内：無料", table.travel_free_km),
        };
    }

    let over = km - table.travel_free_km;
    let steps = (over / table.travel_step_km).ceil().normalize();
    let fee = (steps * table.travel_step_yen).normalize();
    TravelFee {
        fee,
        note: format!("超過 {:.1}km → {}段（{}kmごと）", over, steps, table.travel_step_km),
    }
}

/// Stairs surcharge for one location. The ground floor is always free and
/// an elevator waives the fee entirely.
pub fn calc_stairs_fee(table: &PriceTable, floor: i64, has_elevator: bool) -> Decimal {
    let floor = floor.max(1);
    if has_elevator {
        return Decimal::ZERO;
    }
    Decimal::from(floor - 1) * table.stairs_per_floor
}

/// Clamps to zero and rounds to the nearest half hour, ties away from
/// zero (2.25 rounds up to 2.5). Normalized so 2.5 displays as "2.5",
/// not the scale-2 "2.50" the division would otherwise carry.
pub fn round_to_half_hour(hours: Decimal) -> Decimal {
    let clamped = hours.max(Decimal::ZERO);
    ((clamped * Decimal::TWO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        / Decimal::TWO)
        .normalize()
}

/// Prices a request against the table. The reservation id is supplied by
/// the caller so the result, and the summary text built from it, are
/// deterministic for a given input.
pub fn compute_quote(
    request: &QuoteRequest,
    table: &PriceTable,
    reservation_id: ReservationId,
) -> QuoteResult {
    let base_fee = request.service.base_fee(table).normalize();
    // Input scale must not leak into display: "35.0" prices like "35km".
    let distance_km = request.distance_km.max(Decimal::ZERO).normalize();
    let travel_fee = calc_travel_fee(table, distance_km);
    let vans = request.vans.clamp(1, 2);
    let drive_part = ((base_fee + travel_fee.fee) * Decimal::from(vans)).normalize();

    let stairs_fee = match request.service {
        ServiceKind::Haul => {
            (calc_stairs_fee(table, request.pickup.floor, request.pickup.has_elevator)
                + calc_stairs_fee(table, request.dropoff.floor, request.dropoff.has_elevator))
            .normalize()
        }
        ServiceKind::Shopping | ServiceKind::CarSupport => Decimal::ZERO,
    };

    let workers = request.workers.max(0);
    let worker_hours = round_to_half_hour(request.worker_hours);
    // normalize: 2 x 2.5h x 2200 would otherwise carry scale-1 "11000.0".
    let labor_fee =
        (Decimal::from(workers) * worker_hours * table.extra_labor_per_hour).normalize();

    let total = (drive_part + stairs_fee + labor_fee).normalize();

    let mut breakdown = vec![
        row("サービス", request.service.label().to_string()),
        row("車両台数", format!("{vans}台（走行分×{vans}）")),
        row("距離", format!("{distance_km}km")),
        row(
            "走行分（基本＋出張）×台数",
            format!(
                "{}（基本{} + 出張{}）×{}",
                format_yen(drive_part),
                format_yen(base_fee),
                format_yen(travel_fee.fee),
                vans
            ),
        ),
    ];
    if request.service == ServiceKind::Haul {
        let value = if stairs_fee > Decimal::ZERO {
            format_yen(stairs_fee)
        } else {
            "なし（エレベーター/1階）".to_string()
        };
        breakdown.push(row("階段付帯", value));
    }
    let labor_value = if labor_fee > Decimal::ZERO {
        format!(
            "{}（{}人×{}h×{}）",
            format_yen(labor_fee),
            workers,
            worker_hours,
            format_yen(table.extra_labor_per_hour)
        )
    } else {
        "なし".to_string()
    };
    breakdown.push(row("追加人件費（ドライバー以外）", labor_value));
    breakdown.push(row("合計", format_yen(total)));

    QuoteResult {
        reservation_id,
        service: request.service,
        vans,
        origin: request.origin.clone(),
        destination: request.destination.clone(),
        distance_km,
        travel_fee,
        base_fee,
        drive_part,
        stairs_fee,
        workers,
        worker_hours,
        extra_labor_per_hour: table.extra_labor_per_hour,
        labor_fee,
        total,
        scheduled_at: request.scheduled_at.clone(),
        note: request.note.clone(),
        breakdown,
    }
}

fn row(label: &str, value: String) -> BreakdownRow {
    BreakdownRow { label: label.to_string(), value }
}
