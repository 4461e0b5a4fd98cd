//! Container options.

use std::env;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Tunables applied to a container when it is built.
///
/// # Examples
///
/// ```rust
/// use nexus_di::ContainerOptions;
///
/// let options = ContainerOptions::default();
/// assert_eq!(options.max_depth, 512);
/// assert!(options.detect_cycles);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerOptions {
    /// Longest chain of nested bean creations on one request.
    pub max_depth: usize,
    /// Fail when a bean re-enters its own creation before it is exposed.
    pub detect_cycles: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            max_depth: 512,
            detect_cycles: true,
        }
    }
}

impl ContainerOptions {
    /// Defaults overridden by `<PREFIX>_MAX_DEPTH` and `<PREFIX>_DETECT_CYCLES`.
    ///
    /// Unset or unparsable variables keep the default.
    pub fn from_env(prefix: &str) -> Self {
        let prefix = prefix.to_uppercase();
        let mut options = Self::default();
        if let Some(depth) = read_var(&prefix, "MAX_DEPTH").and_then(|v| v.parse().ok()) {
            options.max_depth = depth;
        }
        if let Some(detect) = read_var(&prefix, "DETECT_CYCLES").and_then(|v| parse_bool(&v)) {
            options.detect_cycles = detect;
        }
        options
    }

    /// Reads options from JSON; missing fields keep their defaults.
    ///
    /// ```rust
    /// use nexus_di::ContainerOptions;
    ///
    /// let options = ContainerOptions::from_json(r#"{ "max_depth": 64 }"#).unwrap();
    /// assert_eq!(options.max_depth, 64);
    /// assert!(options.detect_cycles);
    /// ```
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn read_var(prefix: &str, key: &str) -> Option<String> {
    env::var(format!("{}_{}", prefix, key)).ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides() {
        env::set_var("NEXUS_OPTS_TEST_MAX_DEPTH", "16");
        env::set_var("NEXUS_OPTS_TEST_DETECT_CYCLES", "off");

        let options = ContainerOptions::from_env("nexus_opts_test");
        assert_eq!(options.max_depth, 16);
        assert!(!options.detect_cycles);

        env::remove_var("NEXUS_OPTS_TEST_MAX_DEPTH");
        env::remove_var("NEXUS_OPTS_TEST_DETECT_CYCLES");
    }

    #[test]
    fn unparsable_env_keeps_default() {
        env::set_var("NEXUS_BAD_TEST_MAX_DEPTH", "deep");
        assert_eq!(ContainerOptions::from_env("NEXUS_BAD_TEST").max_depth, 512);
        env::remove_var("NEXUS_BAD_TEST_MAX_DEPTH");
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_round_trip_keeps_fields() {
        let json = serde_json::to_string(&ContainerOptions { max_depth: 8, detect_cycles: false }).unwrap();
        let parsed = ContainerOptions::from_json(&json).unwrap();
        assert_eq!(parsed.max_depth, 8);
        assert!(!parsed.detect_cycles);
    }
}
