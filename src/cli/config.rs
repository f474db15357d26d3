//! Run configuration
//!
//! Loaded from an optional JSON file. Every field has a default, so `{}`
//! is a valid config. Command-line flags are applied on top.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::args::RunArgs;
use super::errors::{CliError, CliResult};
use crate::observability::Severity;
use crate::protocol::SessionOptions;

/// Output path meaning "write to stdout"
pub const STDOUT_PATH: &str = "-";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where results are written (optional, default "output_file.txt")
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Minimum log severity (optional, default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Abort on unparseable lines (optional, default false)
    #[serde(default)]
    pub strict_parsing: bool,

    /// Verify registry consistency after every command (optional, default false)
    #[serde(default)]
    pub verify_invariants: bool,

    /// Report counters when the run ends (optional, default false)
    #[serde(default)]
    pub report_metrics: bool,
}

fn default_output_path() -> String {
    "output_file.txt".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            log_level: default_log_level(),
            strict_parsing: false,
            verify_invariants: false,
            report_metrics: false,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Build the effective config for a run: file (if any), then flags
    pub fn for_run(args: &RunArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(output) = &args.output {
            config.output_path = output.clone();
        }
        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }
        config.strict_parsing |= args.strict;
        config.verify_invariants |= args.verify;
        config.report_metrics |= args.metrics;

        config.validate()?;
        Ok(config)
    }

    /// Validate field values
    fn validate(&self) -> CliResult<()> {
        if self.output_path.trim().is_empty() {
            return Err(CliError::config_error("output_path must not be empty"));
        }
        self.severity()?;
        Ok(())
    }

    /// Parsed log level
    pub fn severity(&self) -> CliResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error, fatal.",
                self.log_level
            ))
        })
    }

    /// Session options derived from this config
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            strict_parsing: self.strict_parsing,
            verify_invariants: self.verify_invariants,
        }
    }

    /// Returns true if results go to stdout
    pub fn writes_stdout(&self) -> bool {
        self.output_path == STDOUT_PATH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, value: serde_json::Value) -> PathBuf {
        let path = dir.path().join("ridex.json");
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    #[test]
    fn test_config_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, json!({}));

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output_path, "output_file.txt");
        assert_eq!(config.severity().unwrap(), Severity::Warn);
    }

    #[test]
    fn test_config_rejects_bad_level() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, json!({ "log_level": "chatty" }));

        let err = Config::load(&path).unwrap_err();
        assert!(err.message().contains("chatty"));
    }

    #[test]
    fn test_config_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            json!({ "output_path": "from_file.txt", "log_level": "error", "report_metrics": true }),
        );

        let args = RunArgs {
            input: PathBuf::from("input.txt"),
            config: Some(path),
            output: Some("-".into()),
            strict: true,
            ..RunArgs::default()
        };

        let config = Config::for_run(&args).unwrap();
        assert!(config.writes_stdout());
        assert_eq!(config.log_level, "error");
        assert!(config.strict_parsing);
        assert!(config.report_metrics);
        assert!(!config.verify_invariants);
        assert_eq!(
            config.session_options(),
            SessionOptions {
                strict_parsing: true,
                verify_invariants: false
            }
        );
    }
}
