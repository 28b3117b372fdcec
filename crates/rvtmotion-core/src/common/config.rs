//! JSON scenario description for a source-theory RVT motion.

use super::constants::{
    DEFAULT_DAMPING, DEFAULT_FREQUENCY_COUNT, DEFAULT_FREQUENCY_MAX, DEFAULT_FREQUENCY_MIN,
    DEFAULT_PERIOD_COUNT, DEFAULT_PERIOD_MAX, DEFAULT_PERIOD_MIN,
};
use crate::domain::{MotionError, SourceField};
use crate::modules::crustal::{CrustalAmpModel, CrustalLayer};
use crate::modules::dimension::{Dimension, DimensionError, Spacing};
use crate::modules::rvt::{OscillatorCorrection, PeakFactorMethod};
use crate::modules::source_theory::{GeometricSpreading, SourceModel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MOTION_NAME: &str = "Source Theory";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MotionConfig {
    pub name: String,
    pub description: String,
    pub source_model: SourceModel,
    /// Parameter values applied on top of the source model preset.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<SourceField, f64>,
    /// Geometric spreading shape; only honoured for the `Custom` source model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spreading: Option<GeometricSpreading>,
    pub frequency: DimensionConfig,
    pub period: DimensionConfig,
    pub damping: f64,
    pub crustal_amplification: CrustalAmplificationConfig,
    pub peak_factor: PeakFactorMethod,
    pub oscillator_correction: OscillatorCorrection,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MOTION_NAME.to_string(),
            description: String::new(),
            source_model: SourceModel::default(),
            parameters: BTreeMap::new(),
            spreading: None,
            frequency: DimensionConfig::log(
                DEFAULT_FREQUENCY_MIN,
                DEFAULT_FREQUENCY_MAX,
                DEFAULT_FREQUENCY_COUNT,
            ),
            period: DimensionConfig::log(DEFAULT_PERIOD_MIN, DEFAULT_PERIOD_MAX, DEFAULT_PERIOD_COUNT),
            damping: DEFAULT_DAMPING,
            crustal_amplification: CrustalAmplificationConfig::default(),
            peak_factor: PeakFactorMethod::default(),
            oscillator_correction: OscillatorCorrection::default(),
        }
    }
}

impl MotionConfig {
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(source).map_err(|source| ConfigError::Parse {
            origin: "<inline>".to_string(),
            source,
        })
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|source| ConfigError::Serialize { source })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionConfig {
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default)]
    pub size: usize,
    #[serde(default)]
    pub spacing: Spacing,
    /// Only read for `Custom` spacing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f64>,
}

impl DimensionConfig {
    pub fn log(min: f64, max: f64, size: usize) -> Self {
        Self {
            min,
            max,
            size,
            spacing: Spacing::Log,
            values: Vec::new(),
        }
    }

    pub fn to_dimension(&self) -> Result<Dimension, DimensionError> {
        match self.spacing {
            Spacing::Custom => Dimension::from_values(self.values.clone()),
            spacing => Dimension::new(self.min, self.max, self.size, spacing),
        }
    }
}

impl From<&Dimension> for DimensionConfig {
    fn from(dimension: &Dimension) -> Self {
        let values = match dimension.spacing() {
            Spacing::Custom => dimension.values().to_vec(),
            _ => Vec::new(),
        };
        Self {
            min: dimension.min(),
            max: dimension.max(),
            size: dimension.size(),
            spacing: dimension.spacing(),
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrustalAmplificationConfig {
    /// `None` keeps the model implied by the source model preset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<CrustalAmpModel>,
    /// Custom `(frequency, amplification)` table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<AmplificationTable>,
    /// Crustal profile for the calculated model, surface first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<CrustalLayer>>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct AmplificationTable {
    pub freq: Vec<f64>,
    pub amp: Vec<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read motion config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse motion config '{origin}': {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },
    #[error("failed to serialize motion config: {source}")]
    Serialize { source: serde_json::Error },
}

impl From<ConfigError> for MotionError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::Read { .. } => MotionError::io_system("IO.CONFIG_READ", error.to_string()),
            ConfigError::Parse { .. } => {
                MotionError::input_validation("INPUT.CONFIG_PARSE", error.to_string())
            }
            ConfigError::Serialize { .. } => {
                MotionError::internal("INTERNAL.CONFIG_SERIALIZE", error.to_string())
            }
        }
    }
}

pub fn load_motion_config(path: impl AsRef<Path>) -> Result<MotionConfig, ConfigError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| ConfigError::Parse {
        origin: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DimensionConfig, MotionConfig, load_motion_config};
    use crate::domain::{MotionErrorCategory, SourceField};
    use crate::modules::dimension::Spacing;
    use crate::modules::rvt::PeakFactorMethod;
    use crate::modules::source_theory::{RegionModel, SourceModel};
    use tempfile::TempDir;

    #[test]
    fn missing_fields_take_defaults() {
        let config = MotionConfig::from_json_str("{}").expect("empty config should parse");
        assert_eq!(config, MotionConfig::default());
        assert_eq!(config.frequency.size, 1024);
        assert_eq!(config.period.size, 91);
        assert_eq!(config.damping, 0.05);
    }

    #[test]
    fn parses_region_overrides_and_methods() {
        let config = MotionConfig::from_json_str(
            r#"{
                "name": "Scenario A",
                "sourceModel": "ceus",
                "parameters": { "momentMag": 7.0, "distance": 50.0 },
                "peakFactor": "Vanmarcke",
                "period": { "spacing": "Custom", "values": [0.1, 0.2, 1.0] }
            }"#,
        )
        .expect("config should parse");

        assert_eq!(config.name, "Scenario A");
        assert_eq!(config.source_model, SourceModel::Preset(RegionModel::Ceus));
        assert_eq!(config.parameters.get(&SourceField::MomentMag), Some(&7.0));
        assert_eq!(config.peak_factor, PeakFactorMethod::Vanmarcke);

        let period = config.period.to_dimension().expect("custom period axis");
        assert_eq!(period.spacing(), Spacing::Custom);
        assert_eq!(period.values(), &[0.1, 0.2, 1.0]);
    }

    #[test]
    fn unknown_source_model_is_a_parse_error() {
        let error = MotionConfig::from_json_str(r#"{ "sourceModel": "Mars" }"#)
            .expect_err("unknown region should fail");
        assert!(matches!(error, ConfigError::Parse { .. }));
        let error = crate::domain::MotionError::from(error);
        assert_eq!(error.category(), MotionErrorCategory::InputValidationError);
        assert_eq!(error.placeholder(), "INPUT.CONFIG_PARSE");
    }

    #[test]
    fn dimension_config_roundtrips_through_generated_axes() {
        let config = DimensionConfig::log(0.1, 10.0, 5);
        let dimension = config.to_dimension().expect("dimension");
        assert_eq!(DimensionConfig::from(&dimension), config);
    }

    #[test]
    fn load_reports_missing_files_as_io_errors() {
        let temp = TempDir::new().expect("tempdir should be created");
        let missing = temp.path().join("missing.json");
        let error = load_motion_config(&missing).expect_err("missing file should fail");
        assert!(matches!(error, ConfigError::Read { .. }));
        assert_eq!(crate::domain::MotionError::from(error).exit_code(), 3);

        let path = temp.path().join("scenario.json");
        let config = MotionConfig {
            description: "written by test".to_string(),
            ..MotionConfig::default()
        };
        std::fs::write(&path, config.to_json_string().expect("serialize")).expect("write");
        assert_eq!(load_motion_config(&path).expect("reload"), config);
    }
}
