use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PriceTable;

/// The closed set of bookable services. The original estimate form keyed
/// these as free strings; keeping them as an enum makes a misspelled key a
/// compile error instead of a silent fallthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceKind {
    Haul,
    Shopping,
    CarSupport,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] =
        [ServiceKind::Haul, ServiceKind::Shopping, ServiceKind::CarSupport];

    /// Wire key as used by the booking form payload.
    pub fn key(self) -> &'static str {
        match self {
            Self::Haul => "haul",
            Self::Shopping => "shopping",
            Self::CarSupport => "carSupport",
        }
    }

    /// Customer-facing Japanese label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Haul => "運搬（距離＆階段）",
            Self::Shopping => "買い物代行（2,200円〜）",
            Self::CarSupport => "車検・整備（代行／搬入）",
        }
    }

    pub fn base_fee(self, table: &PriceTable) -> Decimal {
        match self {
            Self::Haul => table.haul_base_fee,
            Self::Shopping => table.shopping_base_fee,
            Self::CarSupport => table.car_support_base_fee,
        }
    }

    pub fn parse_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "haul" => Some(Self::Haul),
            "shopping" => Some(Self::Shopping),
            "carsupport" | "car-support" | "car_support" => Some(Self::CarSupport),
            _ => None,
        }
    }

    /// Fail-soft lookup: unknown keys price as `Haul`, the same default the
    /// estimate form has always used. Callers that can reject bad input
    /// should prefer [`ServiceKind::parse_key`].
    pub fn from_key_or_default(key: &str) -> Self {
        Self::parse_key(key).unwrap_or(Self::Haul)
    }
}
