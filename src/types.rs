//! Shared constants and time helpers.

use std::time::{SystemTime, UNIX_EPOCH};

// ================================================================================================
// PROTOCOL CONSTANTS
// ================================================================================================

/// Collection host.
pub const DEFAULT_HOST: &str = "https://www.google-analytics.com";

/// Production collect path.
pub const COLLECT_ENDPOINT: &str = "/collect";

/// Validation (debug) collect path.
pub const DEBUG_ENDPOINT: &str = "/debug/collect";

/// Measurement Protocol version sent as `v`.
pub const PROTOCOL_VERSION: &str = "1";

/// Hit type used when the caller supplies none.
pub const DEFAULT_HIT_TYPE: &str = "pageview";

/// Form body content type.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// ================================================================================================
// CLIENT ID COOKIE
// ================================================================================================

/// Name of the persisted client id entry.
pub const CID_COOKIE_NAME: &str = "SimplePhpGa-cid";

/// Two years.
pub const CID_COOKIE_MAX_AGE_SECS: u64 = 63_072_000;

/// Cookie path scope.
pub const CID_COOKIE_PATH: &str = "/";

/// Current Unix time in seconds.
#[inline]
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_secs_is_after_2020() {
        assert!(now_secs() > 1_577_836_800);
    }

    #[test]
    fn test_cookie_lifetime_is_two_years() {
        assert_eq!(CID_COOKIE_MAX_AGE_SECS, 2 * 365 * 24 * 60 * 60);
    }
}
