use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use takefare_core::config::{AppConfig, ConfigOverrides, LoadOptions, PriceTable};
use takefare_core::summary::format_yen;

use super::CommandResult;

#[derive(Args, Clone, Debug)]
pub struct PriceTableArgs {
    #[arg(long, help = "Path to a takefare.toml tariff file")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Emit machine-readable JSON output")]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct PriceTablePayload<'a> {
    command: &'a str,
    status: &'a str,
    pricing: &'a PriceTable,
}

pub fn run(args: &PriceTableArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions {
        config_path: args.config.clone(),
        require_file: args.config.is_some(),
        overrides: ConfigOverrides::default(),
    }) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("price-table", "config_validation", error.to_string(), 2)
        }
    };

    tracing::debug!(config = ?args.config, "rendering effective tariff");

    if args.json {
        let payload = PriceTablePayload {
            command: "price-table",
            status: "ok",
            pricing: &config.pricing,
        };
        return CommandResult::success(super::serialize_payload(&payload));
    }

    let pricing = &config.pricing;
    let lines = vec![
        "effective tariff (source precedence: file > default):".to_string(),
        format!("  travel_free_km        {}km", pricing.travel_free_km),
        format!("  travel_step_km        {}km", pricing.travel_step_km),
        format!("  travel_step_yen       {}", format_yen(pricing.travel_step_yen)),
        format!("  haul_base_fee         {}", format_yen(pricing.haul_base_fee)),
        format!("  shopping_base_fee     {}", format_yen(pricing.shopping_base_fee)),
        format!("  car_support_base_fee  {}", format_yen(pricing.car_support_base_fee)),
        format!("  stairs_per_floor      {}", format_yen(pricing.stairs_per_floor)),
        format!("  extra_labor_per_hour  {}", format_yen(pricing.extra_labor_per_hour)),
    ];
    CommandResult::success(lines.join("\n"))
}
