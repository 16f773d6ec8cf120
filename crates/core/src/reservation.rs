use std::fmt;

use chrono::{DateTime, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};

const TAG: &str = "TK";
const SUFFIX_LEN: usize = 4;
const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Display-only reference token for a quote, shaped
/// `TK-YYYYMMDD-HHMM-{prefix}-{XXXX}`. Shared over LINE/mail so a customer
/// and the dispatcher can talk about the same estimate; never persisted
/// and not collision-proof.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(pub String);

impl ReservationId {
    /// Builds a token from an injected clock and RNG so callers and tests
    /// control the timestamp and the 4-character base-36 suffix.
    pub fn generate<R: Rng + ?Sized>(prefix: &str, now: DateTime<Local>, rng: &mut R) -> Self {
        let stamp = now.format("%Y%m%d-%H%M");
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("{TAG}-{stamp}-{prefix}-{suffix}"))
    }

    /// Convenience for the interactive path: wall clock plus thread RNG.
    pub fn new_now(prefix: &str) -> Self {
        Self::generate(prefix, Local::now(), &mut rand::thread_rng())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::ReservationId;

    #[test]
    fn token_shape_is_tag_stamp_prefix_suffix() {
        let now = Local.with_ymd_and_hms(2025, 8, 29, 14, 30, 0).single().expect("fixed time");
        let mut rng = StdRng::seed_from_u64(7);

        let id = ReservationId::generate("drive", now, &mut rng);
        let token = id.as_str();

        assert!(token.starts_with("TK-20250829-1430-drive-"), "got {token}");
        let suffix = token.rsplit('-').next().expect("suffix segment");
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|ch| ch.is_ascii_digit() || ch.is_ascii_uppercase()));
    }

    #[test]
    fn same_seed_reproduces_the_same_token() {
        let now = Local.with_ymd_and_hms(2025, 8, 29, 9, 5, 0).single().expect("fixed time");
        let first = ReservationId::generate("drive", now, &mut StdRng::seed_from_u64(42));
        let second = ReservationId::generate("drive", now, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn minutes_are_zero_padded() {
        let now = Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 0).single().expect("fixed time");
        let id = ReservationId::generate("drive", now, &mut StdRng::seed_from_u64(0));
        assert!(id.as_str().starts_with("TK-20250102-0304-"), "got {id}");
    }
}
