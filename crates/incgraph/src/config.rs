//! Analysis configuration.
//!
//! Loaded from a YAML file with kebab-case keys; every field has a default,
//! so an empty file (or no file) is a valid configuration:
//!
//! ```yaml
//! top-k: 10
//! label-top-k: 10
//! default-color: "#000000"
//! palette:            # replaces the built-in palette when present
//!   base: "#20B2AA"
//!   net: "#7B68EE"
//! cycles:
//!   max-cycles: 10000000      # null disables the limit
//!   time-budget-secs: 300     # null disables the limit
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::cycles::{CycleLimits, DEFAULT_MAX_CYCLES, DEFAULT_TIME_BUDGET};
use crate::classify::{DEFAULT_COLOR, DEFAULT_LABEL_TOP_K, Palette};
use crate::error::{Error, Result};

/// Default length of the rankings in the statistics report.
pub const DEFAULT_TOP_K: usize = 10;

/// Settings for the analyses and the labeling pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Length of the degree and centrality rankings.
    pub top_k: usize,
    /// Number of most-included nodes that get a label.
    pub label_top_k: usize,
    /// Color for components without a palette entry.
    pub default_color: String,
    /// Component colors; `None` selects the built-in palette.
    pub palette: Option<BTreeMap<String, String>>,
    /// Cycle enumeration guard.
    pub cycles: CycleConfig,
}

/// The `cycles` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CycleConfig {
    /// Stop counting after this many cycles.
    pub max_cycles: Option<u64>,
    /// Stop counting after this many seconds.
    pub time_budget_secs: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            label_top_k: DEFAULT_LABEL_TOP_K,
            default_color: DEFAULT_COLOR.to_string(),
            palette: None,
            cycles: CycleConfig::default(),
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            max_cycles: Some(DEFAULT_MAX_CYCLES),
            time_budget_secs: Some(DEFAULT_TIME_BUDGET.as_secs()),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming `path` if the file cannot be read, is
    /// not valid YAML or holds invalid values.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: cannot read: {e}", path.display())))?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            Error::Config(message) => Error::Config(format!("{}: {message}", path.display())),
            other => other,
        })
    }

    /// Parse and validate a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed YAML, unknown keys or invalid
    /// colors.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document; treat it as "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !is_hex_color(&self.default_color) {
            return Err(Error::Config(format!(
                "default-color '{}' is not a #RRGGBB color",
                self.default_color
            )));
        }
        if let Some(palette) = &self.palette {
            if let Some((component, color)) = palette.iter().find(|(_, c)| !is_hex_color(c)) {
                return Err(Error::Config(format!(
                    "palette color '{color}' for '{component}' is not a #RRGGBB color"
                )));
            }
        }
        Ok(())
    }

    /// The palette for the classifier.
    #[must_use]
    pub fn palette(&self) -> Palette {
        match &self.palette {
            Some(colors) => Palette::new(colors.clone(), self.default_color.clone()),
            None => Palette::chromium().with_default_color(self.default_color.clone()),
        }
    }

    /// The cycle enumeration guard.
    #[must_use]
    pub fn cycle_limits(&self) -> CycleLimits {
        CycleLimits {
            max_cycles: self.cycles.max_cycles,
            time_budget: self.cycles.time_budget_secs.map(Duration::from_secs),
        }
    }
}

/// Returns `true` for `#RRGGBB` strings.
fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
