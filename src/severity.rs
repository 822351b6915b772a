//! Log severity ladder and the status-code classification policy.
//!
//! The policy is a fixed table, not a set of ranges. Only the listed codes
//! are promoted above `DEBUG`:
//!
//! | Status | Severity |
//! |---|---|
//! | 200, 201, 202, 302 | `INFO` |
//! | 400, 404, 406, 409, 502 | `WARNING` |
//! | 500 | `ERROR` |
//! | anything else | `DEBUG` |
//!
//! So `203`, `301` and `503` land on `DEBUG`, next to codes that are not even
//! valid HTTP (`-1`, `0`, `999`). `classify` accepts every `i32`.
//!
//! ```rust
//! use statuslog::{Severity, classify};
//!
//! assert_eq!(classify(404), Severity::Warning);
//! assert_eq!(classify(503), Severity::Debug);
//! ```

use std::fmt;
use std::str::FromStr;

use http::StatusCode;

use crate::error::Error;

/// Ordered log severity, least to most severe.
///
/// Mirrors the eight levels of RFC 5424 as most PHP/Java loggers name them.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Severity {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Severity {
    /// Every level, in ascending order.
    pub const ALL: [Severity; 8] = [
        Self::Debug,
        Self::Info,
        Self::Notice,
        Self::Warning,
        Self::Error,
        Self::Critical,
        Self::Alert,
        Self::Emergency,
    ];

    /// Uppercase name (e.g. `"WARNING"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug     => "DEBUG",
            Self::Info      => "INFO",
            Self::Notice    => "NOTICE",
            Self::Warning   => "WARNING",
            Self::Error     => "ERROR",
            Self::Critical  => "CRITICAL",
            Self::Alert     => "ALERT",
            Self::Emergency => "EMERGENCY",
        }
    }

    /// Numeric level as used by Monolog-compatible backends.
    pub fn code(self) -> u16 {
        match self {
            Self::Debug     => 100,
            Self::Info      => 200,
            Self::Notice    => 250,
            Self::Warning   => 300,
            Self::Error     => 400,
            Self::Critical  => 500,
            Self::Alert     => 550,
            Self::Emergency => 600,
        }
    }

    /// Severity for a typed status code. Same table as [`classify`].
    pub fn for_status(status: StatusCode) -> Self {
        classify(i32::from(status.as_u16()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive. `WARN` is accepted as an alias of `WARNING`.
impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG"            => Ok(Self::Debug),
            "INFO"             => Ok(Self::Info),
            "NOTICE"           => Ok(Self::Notice),
            "WARN" | "WARNING" => Ok(Self::Warning),
            "ERROR"            => Ok(Self::Error),
            "CRITICAL"         => Ok(Self::Critical),
            "ALERT"            => Ok(Self::Alert),
            "EMERGENCY"        => Ok(Self::Emergency),
            _                  => Err(Error::UnknownSeverity(s.to_owned())),
        }
    }
}

// ── Classification policy ─────────────────────────────────────────────────────

/// Status codes that log above `DEBUG`. Membership is exact.
const POLICY: [(i32, Severity); 10] = [
    (200, Severity::Info),    // OK
    (201, Severity::Info),    // Created
    (202, Severity::Info),    // Accepted
    (302, Severity::Info),    // Found
    (400, Severity::Warning), // Bad Request
    (404, Severity::Warning), // Not Found
    (406, Severity::Warning), // Not Acceptable
    (409, Severity::Warning), // Conflict
    (502, Severity::Warning), // Bad Gateway
    (500, Severity::Error),   // Internal Server Error
];

/// Severity used for every code the table does not list.
pub const DEFAULT_SEVERITY: Severity = Severity::Debug;

/// Maps an HTTP status code to a log severity.
///
/// Pure and total: every integer, including negative and out-of-range
/// values, yields a severity.
pub fn classify(code: i32) -> Severity {
    POLICY
        .iter()
        .find(|(listed, _)| *listed == code)
        .map_or(DEFAULT_SEVERITY, |&(_, severity)| severity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_success_codes_are_info() {
        for code in [200, 201, 202, 302] {
            assert_eq!(classify(code), Severity::Info, "status {code}");
        }
    }

    #[test]
    fn listed_client_and_gateway_codes_are_warning() {
        for code in [400, 404, 406, 409, 502] {
            assert_eq!(classify(code), Severity::Warning, "status {code}");
        }
    }

    #[test]
    fn internal_server_error_is_error() {
        assert_eq!(classify(500), Severity::Error);
    }

    #[test]
    fn neighbours_of_listed_codes_fall_to_debug() {
        for code in [203, 204, 301, 304, 401, 403, 405, 422, 429, 501, 503, 504] {
            assert_eq!(classify(code), Severity::Debug, "status {code}");
        }
    }

    #[test]
    fn out_of_range_codes_fall_to_debug() {
        for code in [i32::MIN, -1, 0, 99, 600, 999, i32::MAX] {
            assert_eq!(classify(code), Severity::Debug, "status {code}");
        }
    }

    #[test]
    fn for_status_agrees_with_classify() {
        assert_eq!(Severity::for_status(StatusCode::NOT_FOUND), Severity::Warning);
        assert_eq!(Severity::for_status(StatusCode::SERVICE_UNAVAILABLE), Severity::Debug);
        assert_eq!(Severity::for_status(StatusCode::FOUND), Severity::Info);
    }

    #[test]
    fn ladder_is_ordered() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::ALL.windows(2).all(|w| w[0] < w[1]));
        assert!(Severity::ALL.windows(2).all(|w| w[0].code() < w[1].code()));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("Emergency".parse::<Severity>().unwrap(), Severity::Emergency);
        assert!(matches!("loud".parse::<Severity>(), Err(Error::UnknownSeverity(_))));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for level in Severity::ALL {
            assert_eq!(level.to_string().parse::<Severity>().unwrap(), level);
        }
    }
}
