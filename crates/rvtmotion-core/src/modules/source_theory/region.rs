use crate::common::constants::MIN_HYPOCENTRAL_DISTANCE;
use crate::domain::SourceField;
use crate::modules::crustal::CrustalAmpModel;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Piecewise geometric spreading: `1/R` inside the near-field limit, constant
/// up to the plateau limit, then `R^-n` with `n` the geometric attenuation
/// coefficient. Distances in km.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometricSpreading {
    pub near_field_limit: f64,
    pub plateau_limit: f64,
}

impl GeometricSpreading {
    /// Limits are normalized so that `MIN_HYPOCENTRAL_DISTANCE <= near <= plateau`.
    pub fn new(near_field_limit: f64, plateau_limit: f64) -> Self {
        let near_field_limit = if near_field_limit.is_finite() {
            near_field_limit.max(MIN_HYPOCENTRAL_DISTANCE)
        } else {
            MIN_HYPOCENTRAL_DISTANCE
        };
        let plateau_limit = if plateau_limit.is_finite() {
            plateau_limit.max(near_field_limit)
        } else {
            near_field_limit
        };

        Self {
            near_field_limit,
            plateau_limit,
        }
    }

    pub fn attenuation(&self, hypo_distance: f64, far_field_exponent: f64) -> f64 {
        let distance = hypo_distance.max(MIN_HYPOCENTRAL_DISTANCE);
        if distance <= self.near_field_limit {
            1.0 / distance
        } else if distance <= self.plateau_limit {
            1.0 / self.near_field_limit
        } else {
            (self.plateau_limit / distance).powf(far_field_exponent) / self.near_field_limit
        }
    }
}

/// Canonical parameter bundle for a seismic region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionPreset {
    pub stress_drop: f64,
    pub geo_atten: f64,
    pub path_dur_coeff: f64,
    pub path_atten_coeff: f64,
    pub path_atten_power: f64,
    pub shear_velocity: f64,
    pub density: f64,
    pub site_atten: f64,
    pub spreading: GeometricSpreading,
    pub crustal_amp: CrustalAmpModel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionModel {
    /// Western United States, generic rock.
    Wus,
    /// Central and eastern United States, hard rock (Campbell 2003).
    Ceus,
}

impl RegionModel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wus => "WUS",
            Self::Ceus => "CEUS",
        }
    }

    pub const fn preset(self) -> RegionPreset {
        match self {
            Self::Wus => RegionPreset {
                stress_drop: 100.0,
                geo_atten: 0.5,
                path_dur_coeff: 0.05,
                path_atten_coeff: 180.0,
                path_atten_power: 0.45,
                shear_velocity: 3.5,
                density: 2.8,
                site_atten: 0.04,
                spreading: GeometricSpreading {
                    near_field_limit: 40.0,
                    plateau_limit: 40.0,
                },
                crustal_amp: CrustalAmpModel::Wus,
            },
            Self::Ceus => RegionPreset {
                stress_drop: 150.0,
                geo_atten: 0.5,
                path_dur_coeff: 0.05,
                path_atten_coeff: 680.0,
                path_atten_power: 0.36,
                shear_velocity: 3.6,
                density: 2.8,
                site_atten: 0.006,
                spreading: GeometricSpreading {
                    near_field_limit: 70.0,
                    plateau_limit: 130.0,
                },
                crustal_amp: CrustalAmpModel::Ceus,
            },
        }
    }
}

/// Either a named region preset or free editing of every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceModel {
    Custom,
    Preset(RegionModel),
}

impl Default for SourceModel {
    fn default() -> Self {
        Self::Preset(RegionModel::Wus)
    }
}

impl SourceModel {
    /// Selection order; `Custom` is always last.
    pub const ALL: [SourceModel; 3] = [
        Self::Preset(RegionModel::Wus),
        Self::Preset(RegionModel::Ceus),
        Self::Custom,
    ];

    pub fn source_list() -> Vec<&'static str> {
        Self::ALL.iter().map(|model| model.as_str()).collect()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|model| *model == self)
            .unwrap_or(Self::ALL.len() - 1)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Custom => "Custom",
            Self::Preset(region) => region.as_str(),
        }
    }

    pub const fn is_customizable(self) -> bool {
        matches!(self, Self::Custom)
    }

    pub const fn is_editable(self, field: SourceField) -> bool {
        field.is_scenario_field() || self.is_customizable()
    }

    pub const fn preset(self) -> Option<RegionPreset> {
        match self {
            Self::Custom => None,
            Self::Preset(region) => Some(region.preset()),
        }
    }
}

impl Display for SourceModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceModel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|model| model.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| {
                format!(
                    "unknown source model '{}', expected one of {}",
                    normalized,
                    Self::source_list().join(", ")
                )
            })
    }
}

impl TryFrom<String> for SourceModel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SourceModel> for String {
    fn from(model: SourceModel) -> Self {
        model.as_str().to_string()
    }
}
