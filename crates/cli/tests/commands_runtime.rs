use std::io::Write;

use clap::Parser;
use serde_json::Value;
use takefare_cli::commands::price_table::{self, PriceTableArgs};
use takefare_cli::commands::quote::{self, QuoteArgs};
use takefare_cli::Cli;

fn quote_args(service: &str) -> QuoteArgs {
    QuoteArgs {
        service: service.to_string(),
        km: "0".to_string(),
        vans: "1".to_string(),
        origin: None,
        destination: None,
        pickup_floor: "1".to_string(),
        pickup_elevator: false,
        dropoff_floor: "1".to_string(),
        dropoff_elevator: false,
        workers: "0".to_string(),
        hours: "0".to_string(),
        note: None,
        scheduled_at: None,
        json: true,
        config: None,
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

#[test]
fn quote_json_payload_carries_fee_parts_and_total() {
    let args = QuoteArgs {
        km: "35".to_string(),
        pickup_floor: "3".to_string(),
        workers: "2".to_string(),
        hours: "2.3".to_string(),
        ..quote_args("haul")
    };

    let result = quote::run(&args);
    assert_eq!(result.exit_code, 0, "expected successful quote run");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "quote");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["result"]["drive_part"], "4950");
    assert_eq!(payload["result"]["stairs_fee"], "2200");
    assert_eq!(payload["result"]["worker_hours"], "2.5");
    assert_eq!(payload["result"]["labor_fee"], "11000");
    assert_eq!(payload["result"]["total"], "18150");
    assert!(
        payload["summary"].as_str().expect("summary string").contains("合計：18,150円"),
        "summary should carry the formatted total"
    );
}

#[test]
fn full_width_flags_price_like_ascii_flags() {
    let ascii = quote::run(&QuoteArgs { km: "20.5".to_string(), ..quote_args("haul") });
    let full_width = quote::run(&QuoteArgs { km: "２０．５".to_string(), ..quote_args("haul") });

    let ascii_total = parse_payload(&ascii.output)["result"]["total"].clone();
    let full_width_total = parse_payload(&full_width.output)["result"]["total"].clone();
    assert_eq!(ascii_total, full_width_total);
}

#[test]
fn unknown_service_is_rejected_at_the_cli_boundary() {
    let result = quote::run(&quote_args("furniture"));
    assert_eq!(result.exit_code, 1, "expected bad invocation exit code");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "quote");
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "unknown_service");
}

#[test]
fn quote_honors_a_tariff_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp config file");
    writeln!(file, "[pricing]\nhaul_base_fee = 5000\n").expect("write config");

    let args = QuoteArgs { config: Some(file.path().to_path_buf()), ..quote_args("haul") };
    let result = quote::run(&args);
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["result"]["base_fee"], "5000");
    assert_eq!(payload["result"]["total"], "5000");
}

#[test]
fn missing_tariff_file_fails_with_config_error() {
    let args = QuoteArgs { config: Some("no-such-tariff.toml".into()), ..quote_args("haul") };
    let result = quote::run(&args);
    assert_eq!(result.exit_code, 2, "expected config failure exit code");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "config_validation");
}

#[test]
fn quote_text_output_ends_with_the_copy_block() {
    let args = QuoteArgs { json: false, km: "35".to_string(), ..quote_args("haul") };
    let result = quote::run(&args);
    assert_eq!(result.exit_code, 0);

    assert!(result.output.contains("サービス：運搬（距離＆階段）"));
    assert!(result.output.contains("--- コピー用 ---"));
    assert!(result.output.contains("【見積｜運ぶ・移動｜軽貨物TAKE】"));
    assert!(result.output.contains("予約ID：TK-"));
}

#[test]
fn price_table_renders_default_tariff() {
    let result = price_table::run(&PriceTableArgs { config: None, json: false });
    assert_eq!(result.exit_code, 0);
    // Only the config file layers over defaults; env vars never touch pricing.
    assert!(result.output.starts_with("effective tariff (source precedence: file > default):"));
    assert!(result.output.contains("travel_free_km        20km"));
    assert!(result.output.contains("haul_base_fee         3,300円"));
}

#[test]
fn price_table_json_payload_exposes_the_tariff() {
    let result = price_table::run(&PriceTableArgs { config: None, json: true });
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "price-table");
    assert_eq!(payload["pricing"]["travel_step_yen"], "550");
}

#[test]
fn cli_parses_a_quote_invocation() {
    let parsed = Cli::try_parse_from([
        "takefare",
        "quote",
        "--service",
        "haul",
        "--km",
        "35",
        "--pickup-floor",
        "3",
        "--json",
    ]);
    assert!(parsed.is_ok(), "quote invocation should parse: {parsed:?}");

    let parsed = Cli::try_parse_from(["takefare", "price-table", "--json"]);
    assert!(parsed.is_ok(), "price-table invocation should parse: {parsed:?}");
}
