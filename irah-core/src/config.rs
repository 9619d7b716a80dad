//! Configuration file support
//!
//! Loads unit-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.irahrc.json` in the working directory
//! 3. `irah.config.json` in the working directory
//!
//! All fields are optional; defaults are the published IRAH-Premier weight
//! table and band thresholds. CLI flags never override scoring constants,
//! only the config file does.

use crate::risk::{BandThresholds, ScoreWeights};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAMES: &[&str] = &[".irahrc.json", "irah.config.json"];

/// Raw configuration as parsed from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IrahConfig {
    /// Custom sub-scale weights; the full table must still sum to 1.0
    #[serde(default)]
    pub weights: Option<WeightConfig>,

    /// Custom risk band thresholds
    #[serde(default)]
    pub thresholds: Option<ThresholdConfig>,
}

/// Custom sub-scale weights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightConfig {
    /// Weight for the Charlson contribution (default: 0.20)
    pub charlson: Option<f64>,
    /// Weight for the Fugulin contribution (default: 0.20)
    pub fugulin: Option<f64>,
    /// Weight for the MRC contribution (default: 0.15)
    pub mrc: Option<f64>,
    /// Weight for the ASG contribution (default: 0.15)
    pub asg: Option<f64>,
    /// Weight for the FOIS contribution (default: 0.15)
    pub fois: Option<f64>,
    /// Weight for the polypharmacy contribution (default: 0.15)
    pub polypharmacy: Option<f64>,
}

/// Custom risk band thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Score threshold for the moderate band (default: 34.0)
    pub moderate: Option<f64>,
    /// Score threshold for the high band (default: 67.0)
    pub high: Option<f64>,
}

/// Resolved configuration ready for scoring
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub weights: ScoreWeights,
    pub thresholds: BandThresholds,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl IrahConfig {
    fn effective_weights(&self) -> ScoreWeights {
        let defaults = ScoreWeights::default();
        match &self.weights {
            Some(weights) => ScoreWeights {
                charlson: weights.charlson.unwrap_or(defaults.charlson),
                fugulin: weights.fugulin.unwrap_or(defaults.fugulin),
                mrc: weights.mrc.unwrap_or(defaults.mrc),
                asg: weights.asg.unwrap_or(defaults.asg),
                fois: weights.fois.unwrap_or(defaults.fois),
                polypharmacy: weights.polypharmacy.unwrap_or(defaults.polypharmacy),
            },
            None => defaults,
        }
    }

    fn effective_thresholds(&self) -> BandThresholds {
        let defaults = BandThresholds::default();
        match &self.thresholds {
            Some(thresholds) => BandThresholds {
                moderate: thresholds.moderate.unwrap_or(defaults.moderate),
                high: thresholds.high.unwrap_or(defaults.high),
            },
            None => defaults,
        }
    }

    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        let weights = self.effective_weights();
        for (name, value) in [
            ("charlson", weights.charlson),
            ("fugulin", weights.fugulin),
            ("mrc", weights.mrc),
            ("asg", weights.asg),
            ("fois", weights.fois),
            ("polypharmacy", weights.polypharmacy),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("weights.{} must be between 0.0 and 1.0 (got {})", name, value);
            }
        }
        let sum = weights.sum();
        if (sum - 1.0).abs() > 1e-6 {
            anyhow::bail!("weights must sum to 1.0 (got {})", sum);
        }

        let thresholds = self.effective_thresholds();
        if thresholds.moderate <= 0.0 {
            anyhow::bail!(
                "thresholds.moderate must be positive (got {})",
                thresholds.moderate
            );
        }
        if thresholds.moderate >= thresholds.high {
            anyhow::bail!(
                "thresholds.moderate ({}) must be less than thresholds.high ({})",
                thresholds.moderate,
                thresholds.high
            );
        }
        if thresholds.high > 100.0 {
            anyhow::bail!("thresholds.high must be at most 100.0 (got {})", thresholds.high);
        }

        Ok(())
    }

    /// Resolve into concrete weights and thresholds
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;
        Ok(ResolvedConfig {
            weights: self.effective_weights(),
            thresholds: self.effective_thresholds(),
            config_path: None,
        })
    }
}

fn load_config_file(path: &Path) -> Result<IrahConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config file: {}", path.display()))
}

fn discover_config(root: &Path) -> Result<Option<(IrahConfig, PathBuf)>> {
    for name in CONFIG_FILE_NAMES {
        let candidate = root.join(name);
        if candidate.is_file() {
            let config = load_config_file(&candidate)?;
            return Ok(Some((config, candidate)));
        }
    }
    Ok(None)
}

/// Load configuration (explicit path or discovery) and resolve it
pub fn load_and_resolve(root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(root)? {
            Some((config, path)) => (config, Some(path)),
            None => (IrahConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
