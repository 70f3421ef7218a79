//! Host configuration parsed from environment variables.
//!
//! Every setting can be supplied through an environment variable prefixed
//! with `STEPGEN_` and overridden on the command line.

use std::env;
use std::fmt;
use std::str::FromStr;

use stepgen::SelectionHeuristic;

use crate::error::CliError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "STEPGEN_LOG_LEVEL";
/// Environment variable holding the selection heuristic.
pub const HEURISTIC_VAR: &str = "STEPGEN_HEURISTIC";
/// Environment variable holding the output format.
pub const FORMAT_VAR: &str = "STEPGEN_FORMAT";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so that plans on stdout are not drowned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes all trace spans.
    Trace,
    /// Debug-level information, including translation and collection counts.
    Debug,
    /// Standard informational messages.
    Info,
    /// Warnings such as unknown languages.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Rendering used for plans written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per planned unit.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown output format '{s}', expected one of: text, json"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

/// Configuration for the command-line host.
///
/// # Environment Variables
///
/// - `STEPGEN_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `STEPGEN_HEURISTIC`: selection heuristic (text, structure)
/// - `STEPGEN_FORMAT`: output format (text, json)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level written to stderr.
    pub log_level: LogLevel,
    /// How scenario selections are told apart from step selections.
    pub heuristic: SelectionHeuristic,
    /// Rendering of the plan.
    pub format: OutputFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Falls back to defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a looked-up value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };

        let heuristic = match lookup(HEURISTIC_VAR) {
            Some(val) => val
                .parse()
                .map_err(|e: stepgen::SelectionHeuristicParseError| {
                    CliError::InvalidConfig(e.to_string())
                })?,
            None => SelectionHeuristic::default(),
        };

        let format = match lookup(FORMAT_VAR) {
            Some(val) => val.parse()?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            log_level,
            heuristic,
            format,
        })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// Command-line flags take precedence over environment-based values.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        heuristic: Option<SelectionHeuristic>,
        format: Option<OutputFormat>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(heuristic) = heuristic {
            self.heuristic = heuristic;
        }

        if let Some(format) = format {
            self.format = format;
        }

        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("Debug", LogLevel::Debug)]
    #[case("INFO", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_valid_values(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let result = "loud".parse::<LogLevel>();
        assert!(result.unwrap_err().to_string().contains("unknown log level"));
    }

    #[rstest]
    #[case("text", OutputFormat::Text)]
    #[case("JSON", OutputFormat::Json)]
    fn output_format_parses_valid_values(#[case] input: &str, #[case] expected: OutputFormat) {
        assert_eq!(input.parse::<OutputFormat>().ok(), Some(expected));
    }

    #[test]
    fn output_format_rejects_invalid_values() {
        let result = "yaml".parse::<OutputFormat>();
        assert!(result.unwrap_err().to_string().contains("unknown output format"));
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let config = CliConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.heuristic, SelectionHeuristic::Text);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn variables_are_read_by_name() {
        let config = CliConfig::from_lookup(lookup_from(&[
            (LOG_LEVEL_VAR, "debug"),
            (HEURISTIC_VAR, "structure"),
            (FORMAT_VAR, "json"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.heuristic, SelectionHeuristic::Structure);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[rstest]
    #[case(LOG_LEVEL_VAR, "loud")]
    #[case(HEURISTIC_VAR, "guess")]
    #[case(FORMAT_VAR, "yaml")]
    fn invalid_variables_are_config_errors(#[case] name: &str, #[case] value: &str) {
        let result = CliConfig::from_lookup(lookup_from(&[(name, value)]));
        assert!(matches!(result, Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn apply_overrides_updates_selected_fields() {
        let config = CliConfig::default().apply_overrides(
            Some(LogLevel::Error),
            Some(SelectionHeuristic::Structure),
            None,
        );
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.heuristic, SelectionHeuristic::Structure);
        assert_eq!(config.format, OutputFormat::Text);

        let config = CliConfig::default().apply_overrides(None, None, None);
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn with_log_level_builder() {
        let config = CliConfig::default().with_log_level(LogLevel::Debug);
        assert_eq!(config.log_level, LogLevel::Debug);
    }
}
