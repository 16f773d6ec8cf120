pub mod config;
pub mod domain;
pub mod normalize;
pub mod pricing;
pub mod reservation;
pub mod summary;

pub use config::{
    AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat, LoggingConfig, PriceTable,
};
pub use domain::request::{QuoteRequest, StopAccess};
pub use domain::service::ServiceKind;
pub use normalize::{parse_integer, parse_number, to_half_width};
pub use pricing::{
    calc_stairs_fee, calc_travel_fee, compute_quote, round_to_half_hour, BreakdownRow,
    QuoteResult, TravelFee,
};
pub use reservation::ReservationId;
pub use summary::{build_summary_text, format_yen};
