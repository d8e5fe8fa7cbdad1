//! Engine configuration
//!
//! A plain value threaded into the signature parser. Defaults follow JVMS
//! §4.7.9.1 strictly; `from_env` lets the CLI and tests relax them.

use crate::consts::{DEFAULT_MAX_ARRAY_DIMENSIONS, DEFAULT_MAX_NESTING_DEPTH, ENV_DEBUG, ENV_LENIENT};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Reject a class type signature that is not terminated by `;`.
    /// When false the terminator is consumed if present and otherwise ignored.
    pub strict_class_terminator: bool,
    /// Upper bound on the dimensions of a single array type signature.
    pub max_array_dimensions: usize,
    /// Upper bound on how deeply type argument lists may nest.
    pub max_nesting_depth: usize,
    /// Raise the CLI log level so parser traces are shown.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_class_terminator: true,
            max_array_dimensions: DEFAULT_MAX_ARRAY_DIMENSIONS,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            debug: false,
        }
    }
}

impl Config {
    /// A configuration that accepts class type signatures missing their `;`
    pub fn lenient() -> Self {
        Self { strict_class_terminator: false, ..Self::default() }
    }

    pub fn with_max_array_dimensions(mut self, max: usize) -> Self {
        self.max_array_dimensions = max;
        self
    }

    pub fn with_max_nesting_depth(mut self, max: usize) -> Self {
        self.max_nesting_depth = max;
        self
    }

    /// Build a configuration from `JCLASS_*` environment variables.
    ///
    /// `JCLASS_LENIENT` and `JCLASS_DEBUG` accept `1`/`true`/`yes` and
    /// `0`/`false`/`no`; anything else is a configuration error.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(lenient) = read_flag(ENV_LENIENT)? {
            config.strict_class_terminator = !lenient;
        }
        if let Some(debug) = read_flag(ENV_DEBUG)? {
            config.debug = debug;
        }
        Ok(config)
    }
}

fn read_flag(name: &str) -> Result<Option<bool>> {
    match std::env::var(name) {
        Ok(value) => parse_flag(&value)
            .map(Some)
            .ok_or_else(|| Error::config_error(format!("{} must be a boolean, got '{}'", name, value))),
        Err(_) => Ok(None),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        let config = Config::default();
        assert!(config.strict_class_terminator);
        assert_eq!(config.max_array_dimensions, 255);
        assert_eq!(config.max_nesting_depth, 64);
        assert!(!config.debug);
    }

    #[test]
    fn test_lenient() {
        assert!(!Config::lenient().strict_class_terminator);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
