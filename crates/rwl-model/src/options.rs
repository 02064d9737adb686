//! Options controlling how a decadal file is read.

use serde::{Deserialize, Serialize};

/// Flag name for [`ReadOptions::round`].
pub const FLAG_ROUND: &str = "round";

/// Flag name for [`ReadOptions::zero_as_missing`].
pub const FLAG_ZERO_AS_MISSING: &str = "zero-as-missing";

/// Options for reading a decadal file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Round output values to the nearest integer.
    pub round: bool,
    /// Treat zero as missing. When unset only negative values are missing.
    pub zero_as_missing: bool,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_round(mut self, enable: bool) -> Self {
        self.round = enable;
        self
    }

    #[must_use]
    pub fn with_zero_as_missing(mut self, enable: bool) -> Self {
        self.zero_as_missing = enable;
        self
    }

    /// Build options from flag names (`round`, `zero-as-missing`).
    ///
    /// Flags are matched case-insensitively; unknown flags are ignored.
    pub fn from_flags<'a>(flags: impl IntoIterator<Item = &'a str>) -> Self {
        let mut options = Self::default();
        for flag in flags {
            let flag = flag.trim();
            if flag.eq_ignore_ascii_case(FLAG_ROUND) {
                options.round = true;
            } else if flag.eq_ignore_ascii_case(FLAG_ZERO_AS_MISSING) {
                options.zero_as_missing = true;
            } else {
                tracing::warn!(flag, "ignoring unknown read option");
            }
        }
        options
    }

    /// Whether a value counts as missing under this missing-value policy.
    pub fn is_missing_value(&self, value: f64) -> bool {
        value.is_nan() || value < 0.0 || (self.zero_as_missing && value == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_options() {
        let options = ReadOptions::from_flags(["round", "Zero-As-Missing", "bogus"]);
        assert!(options.round);
        assert!(options.zero_as_missing);
        assert_eq!(ReadOptions::from_flags([]), ReadOptions::default());
    }

    #[test]
    fn zero_policy() {
        let plain = ReadOptions::default();
        assert!(!plain.is_missing_value(0.0));
        assert!(plain.is_missing_value(-1.0));
        let strict = plain.with_zero_as_missing(true);
        assert!(strict.is_missing_value(0.0));
        assert!(!strict.is_missing_value(0.5));
    }
}
