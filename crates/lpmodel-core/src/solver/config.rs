//! Backend-neutral solve options.
//!
//! Each knob is an `Option`: `None` leaves the backend's own default alone,
//! so an empty config and no config behave the same.

use serde::{Deserialize, Serialize};

/// Options forwarded to a solver backend on the next solve.
///
/// Deserializes from a JSON object whose keys are the field names; unknown
/// keys are rejected so a typo does not silently fall back to a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Wall-clock budget in seconds.
    pub time_limit: Option<f64>,
    /// Relative gap at which branch and bound stops.
    pub mip_gap: Option<f64>,
    /// `0` is silent.
    pub verbosity: Option<u32>,
    pub presolve: Option<bool>,
    pub threads: Option<u32>,
    /// Primal and dual feasibility tolerance.
    pub tolerance: Option<f64>,
    /// Echo backend log lines to stdout.
    pub log_to_console: Option<bool>,
}

macro_rules! with_setters {
    ($($(#[$doc:meta])* $method:ident => $field:ident: $ty:ty;)*) => {
        impl SolverConfig {
            $(
                $(#[$doc])*
                pub fn $method(mut self, value: $ty) -> Self {
                    self.$field = Some(value);
                    self
                }
            )*
        }
    };
}

with_setters! {
    with_time_limit => time_limit: f64;
    with_mip_gap => mip_gap: f64;
    with_verbosity => verbosity: u32;
    with_presolve => presolve: bool;
    with_threads => threads: u32;
    /// Applies to both primal and dual feasibility.
    with_tolerance => tolerance: f64;
    with_log_to_console => log_to_console: bool;
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{"time_limit": 30.0, ...}`; absent keys stay `None`.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// True when no knob is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::SolverConfig;

    #[test]
    fn default_config_sets_nothing() {
        assert!(SolverConfig::new().is_empty());
        assert!(!SolverConfig::new().with_presolve(false).is_empty());
    }

    #[test]
    fn setters_chain() {
        let config = SolverConfig::new()
            .with_time_limit(60.0)
            .with_mip_gap(0.01)
            .with_threads(4)
            .with_log_to_console(false);

        assert_eq!(config.time_limit, Some(60.0));
        assert_eq!(config.mip_gap, Some(0.01));
        assert_eq!(config.threads, Some(4));
        assert_eq!(config.log_to_console, Some(false));
        assert_eq!(config.tolerance, None);
    }

    #[test]
    fn json_fills_only_given_keys() {
        let config =
            SolverConfig::from_json_str(r#"{"time_limit": 30.0, "presolve": false}"#).unwrap();
        assert_eq!(
            config,
            SolverConfig::new().with_time_limit(30.0).with_presolve(false)
        );
        assert!(SolverConfig::from_json_str("{}").unwrap().is_empty());
    }

    #[test]
    fn json_rejects_misspelled_keys() {
        let err = SolverConfig::from_json_str(r#"{"timelimit": 1.0}"#).unwrap_err();
        assert!(err.to_string().contains("timelimit"));
    }

    #[test]
    fn json_output_reads_back() {
        let config = SolverConfig::new().with_threads(8).with_verbosity(2);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SolverConfig::from_json_str(&json).unwrap(), config);
    }
}
