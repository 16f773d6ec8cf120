use std::path::PathBuf;

use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

use takefare_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use takefare_core::domain::request::{QuoteRequest, StopAccess};
use takefare_core::domain::service::ServiceKind;
use takefare_core::normalize::{parse_integer, parse_number};
use takefare_core::pricing::{compute_quote, QuoteResult};
use takefare_core::reservation::ReservationId;
use takefare_core::summary::build_summary_text;

use super::CommandResult;

/// Numeric flags are taken as free text and folded through the same
/// normalizer the booking form uses, so full-width input works here too.
#[derive(Args, Clone, Debug)]
pub struct QuoteArgs {
    #[arg(long, help = "Service key: haul | shopping | car-support")]
    pub service: String,
    #[arg(long, default_value = "0", help = "Distance in km")]
    pub km: String,
    #[arg(long, default_value = "1", help = "Vehicle count (priced 1..=2)")]
    pub vans: String,
    #[arg(long, help = "Pickup address")]
    pub origin: Option<String>,
    #[arg(long, help = "Dropoff address")]
    pub destination: Option<String>,
    #[arg(long, default_value = "1")]
    pub pickup_floor: String,
    #[arg(long, help = "Pickup location has an elevator")]
    pub pickup_elevator: bool,
    #[arg(long, default_value = "1")]
    pub dropoff_floor: String,
    #[arg(long, help = "Dropoff location has an elevator")]
    pub dropoff_elevator: bool,
    #[arg(long, default_value = "0", help = "Extra workers beyond the driver")]
    pub workers: String,
    #[arg(long, default_value = "0", help = "Worker hours (rounded to half hours)")]
    pub hours: String,
    #[arg(long, help = "Free-text note for the summary")]
    pub note: Option<String>,
    #[arg(long = "when", help = "Requested date and time")]
    pub scheduled_at: Option<String>,
    #[arg(long, help = "Emit machine-readable JSON output")]
    pub json: bool,
    #[arg(long, help = "Path to a takefare.toml tariff file")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct QuotePayload<'a> {
    command: &'a str,
    status: &'a str,
    result: &'a QuoteResult,
    summary: &'a str,
}

pub fn run(args: &QuoteArgs) -> CommandResult {
    // The engine itself never rejects a service key; the CLI does.
    let Some(service) = ServiceKind::parse_key(&args.service) else {
        return CommandResult::failure(
            "quote",
            "unknown_service",
            format!("unknown service `{}` (expected haul|shopping|car-support)", args.service),
            1,
        );
    };

    let config = match AppConfig::load(LoadOptions {
        config_path: args.config.clone(),
        require_file: args.config.is_some(),
        overrides: ConfigOverrides::default(),
    }) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("quote", "config_validation", error.to_string(), 2)
        }
    };

    let request = QuoteRequest {
        service,
        vans: parse_integer(&args.vans, 1),
        distance_km: parse_number(&args.km, Decimal::ZERO),
        origin: args.origin.clone(),
        destination: args.destination.clone(),
        pickup: StopAccess {
            floor: parse_integer(&args.pickup_floor, 1),
            has_elevator: args.pickup_elevator,
        },
        dropoff: StopAccess {
            floor: parse_integer(&args.dropoff_floor, 1),
            has_elevator: args.dropoff_elevator,
        },
        workers: parse_integer(&args.workers, 0),
        worker_hours: parse_number(&args.hours, Decimal::ZERO),
        note: args.note.clone(),
        scheduled_at: args.scheduled_at.clone(),
    };

    let result = compute_quote(&request, &config.pricing, ReservationId::new_now("drive"));
    let summary = build_summary_text(&result);

    tracing::debug!(
        reservation_id = %result.reservation_id,
        service = service.key(),
        total = %result.total,
        "estimate priced"
    );

    if args.json {
        let payload =
            QuotePayload { command: "quote", status: "ok", result: &result, summary: &summary };
        return CommandResult::success(super::serialize_payload(&payload));
    }

    let mut lines: Vec<String> =
        result.breakdown.iter().map(|row| format!("{}：{}", row.label, row.value)).collect();
    lines.push(String::new());
    lines.push("--- コピー用 ---".to_string());
    lines.push(summary);
    CommandResult::success(lines.join("\n"))
}
