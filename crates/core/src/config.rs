use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The tariff every quote is priced against. Loaded once at startup and
/// passed explicitly into each calculation; nothing mutates it afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    /// Distance included free of charge, in km.
    pub travel_free_km: Decimal,
    /// Distance band beyond the free allowance that triggers one fee step.
    pub travel_step_km: Decimal,
    /// Yen charged per step.
    pub travel_step_yen: Decimal,
    pub haul_base_fee: Decimal,
    pub shopping_base_fee: Decimal,
    pub car_support_base_fee: Decimal,
    /// Yen per floor above the first when no elevator is available.
    pub stairs_per_floor: Decimal,
    /// Yen per worker-hour of additional labor.
    pub extra_labor_per_hour: Decimal,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            travel_free_km: Decimal::from(20),
            travel_step_km: Decimal::from(5),
            travel_step_yen: Decimal::from(550),
            haul_base_fee: Decimal::from(3300),
            shopping_base_fee: Decimal::from(2200),
            car_support_base_fee: Decimal::from(3300),
            stairs_per_floor: Decimal::from(1100),
            extra_labor_per_hour: Decimal::from(2200),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub pricing: PriceTable,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    pricing: Option<PricingPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct PricingPatch {
    travel_free_km: Option<Decimal>,
    travel_step_km: Option<Decimal>,
    travel_step_yen: Option<Decimal>,
    haul_base_fee: Option<Decimal>,
    shopping_base_fee: Option<Decimal>,
    car_support_base_fee: Option<Decimal>,
    stairs_per_floor: Option<Decimal>,
    extra_labor_per_hour: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Compact }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { pricing: PriceTable::default(), logging: LoggingConfig::default() }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("takefare.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(pricing) = patch.pricing {
            if let Some(travel_free_km) = pricing.travel_free_km {
                self.pricing.travel_free_km = travel_free_km;
            }
            if let Some(travel_step_km) = pricing.travel_step_km {
                self.pricing.travel_step_km = travel_step_km;
            }
            if let Some(travel_step_yen) = pricing.travel_step_yen {
                self.pricing.travel_step_yen = travel_step_yen;
            }
            if let Some(haul_base_fee) = pricing.haul_base_fee {
                self.pricing.haul_base_fee = haul_base_fee;
            }
            if let Some(shopping_base_fee) = pricing.shopping_base_fee {
                self.pricing.shopping_base_fee = shopping_base_fee;
            }
            if let Some(car_support_base_fee) = pricing.car_support_base_fee {
                self.pricing.car_support_base_fee = car_support_base_fee;
            }
            if let Some(stairs_per_floor) = pricing.stairs_per_floor {
                self.pricing.stairs_per_floor = stairs_per_floor;
            }
            if let Some(extra_labor_per_hour) = pricing.extra_labor_per_hour {
                self.pricing.extra_labor_per_hour = extra_labor_per_hour;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let log_level =
            read_env("TAKEFARE_LOGGING_LEVEL").or_else(|| read_env("TAKEFARE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("TAKEFARE_LOGGING_FORMAT").or_else(|| read_env("TAKEFARE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pricing(&self.pricing)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("takefare.toml"), PathBuf::from("config/takefare.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    toml::from_str::<ConfigPatch>(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn validate_pricing(pricing: &PriceTable) -> Result<(), ConfigError> {
    if pricing.travel_step_km <= Decimal::ZERO {
        return Err(ConfigError::Validation(
            "pricing.travel_step_km must be greater than zero".to_string(),
        ));
    }

    let non_negative = [
        ("pricing.travel_free_km", pricing.travel_free_km),
        ("pricing.travel_step_yen", pricing.travel_step_yen),
        ("pricing.haul_base_fee", pricing.haul_base_fee),
        ("pricing.shopping_base_fee", pricing.shopping_base_fee),
        ("pricing.car_support_base_fee", pricing.car_support_base_fee),
        ("pricing.stairs_per_floor", pricing.stairs_per_floor),
        ("pricing.extra_labor_per_hour", pricing.extra_labor_per_hour),
    ];
    for (key, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(ConfigError::Validation(format!("{key} must not be negative")));
        }
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    let known = ["trace", "debug", "info", "warn", "error"];
    if !known.contains(&level.as_str()) {
        return Err(ConfigError::Validation(format!(
            "logging.level must be one of trace|debug|info|warn|error, got `{}`",
            logging.level
        )));
    }

    Ok(())
}
