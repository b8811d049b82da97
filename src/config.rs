//! config.rs
//!
//! Generation options, read once and threaded through the pipeline.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::{GenError, Result};
use crate::format::OutputFormat;

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Fractional coverage threshold the downstream tool judges against.
    #[serde(default = "default_coverage_target")]
    pub coverage_target: f64,

    /// Upper bound on emitted test cases per suite.
    #[serde(default = "default_max_test_cases")]
    pub max_test_cases: usize,

    #[serde(default = "default_true")]
    pub include_boundary_tests: bool,

    #[serde(default = "default_true")]
    pub include_error_tests: bool,

    #[serde(default = "default_true")]
    pub generate_stubs: bool,

    /// `tessy` | `json` | `xml`
    #[serde(default = "default_output_format")]
    pub output_format: String,

    #[serde(default = "default_naming_convention")]
    pub naming_convention: String,

    /// Seed for boundary/error literal selection. Fixed seed keeps
    /// repeated runs byte-identical.
    #[serde(default)]
    pub value_seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            coverage_target: default_coverage_target(),
            max_test_cases: default_max_test_cases(),
            include_boundary_tests: true,
            include_error_tests: true,
            generate_stubs: true,
            output_format: default_output_format(),
            naming_convention: default_naming_convention(),
            value_seed: 0,
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file. A missing file falls back to defaults;
    /// a present-but-invalid file is a hard error.
    pub fn load(path: Option<&Path>) -> Result<GeneratorConfig> {
        let config = match path {
            None => GeneratorConfig::default(),
            Some(p) => match fs::read_to_string(p) {
                Err(_) => {
                    warn!(path = %p.display(), "config file not found, using defaults");
                    GeneratorConfig::default()
                }
                Ok(raw) => {
                    serde_json::from_str(&raw).map_err(|e| GenError::InvalidConfig {
                        reason: format!("{}: {e}", p.display()),
                    })?
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.coverage_target) {
            return Err(GenError::InvalidConfig {
                reason: format!(
                    "coverage_target must be within [0, 1], got {}",
                    self.coverage_target
                ),
            });
        }

        if self.max_test_cases == 0 {
            return Err(GenError::InvalidConfig {
                reason: "max_test_cases must be greater than 0".into(),
            });
        }

        // Resolves eagerly so an unknown format fails before any parsing work.
        self.format()?;
        Ok(())
    }

    pub fn format(&self) -> Result<OutputFormat> {
        OutputFormat::parse(&self.output_format)
    }
}

fn default_coverage_target() -> f64 {
    0.85
}

fn default_max_test_cases() -> usize {
    50
}

fn default_true() -> bool {
    true
}

fn default_output_format() -> String {
    "tessy".into()
}

fn default_naming_convention() -> String {
    "descriptive".into()
}
