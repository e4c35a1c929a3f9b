//! Execution limits.

use std::env;

use tracing::warn;

/// Default instruction budget for one run.
pub const DEFAULT_STEP_LIMIT: u64 = 1_000_000;

/// Environment variable overriding the step limit. `0` or `none` disables it.
pub const STEP_LIMIT_ENV: &str = "REGVM_STEP_LIMIT";

/// Engine configuration for one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum instructions executed before aborting, HALT included.
    /// `None` runs until HALT or a fault, however long that takes.
    pub step_limit: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_limit: Some(DEFAULT_STEP_LIMIT),
        }
    }
}

impl Config {
    /// No instruction budget.
    pub fn unbounded() -> Self {
        Self { step_limit: None }
    }

    /// Budget of exactly `limit` instructions.
    pub fn with_step_limit(limit: u64) -> Self {
        Self {
            step_limit: Some(limit),
        }
    }

    /// Default config with `REGVM_STEP_LIMIT` applied when it parses.
    /// An unparsable value is logged and ignored.
    pub fn from_env() -> Self {
        match env::var(STEP_LIMIT_ENV) {
            Ok(raw) => Self::from_setting(&raw),
            Err(_) => Self::default(),
        }
    }

    /// Config for a raw step limit setting, falling back to the default.
    pub fn from_setting(raw: &str) -> Self {
        match parse_step_limit(raw) {
            Some(step_limit) => Self { step_limit },
            None => {
                warn!(
                    value = raw,
                    var = STEP_LIMIT_ENV,
                    "invalid step limit, using default {DEFAULT_STEP_LIMIT}"
                );
                Self::default()
            }
        }
    }
}

/// Parse a step limit setting. `0` and `none` mean unbounded.
pub fn parse_step_limit(raw: &str) -> Option<Option<u64>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") {
        return Some(None);
    }
    match raw.parse::<u64>().ok()? {
        0 => Some(None),
        n => Some(Some(n)),
    }
}
