use super::model::CrustalModel;
use crate::domain::MotionError;
use crate::numerics::{interpolate_log_log, is_strictly_increasing, log_grid};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Boore & Joyner (1997) generic-rock amplification for western North America.
const WUS_FREQ: [f64; 12] = [
    0.01, 0.09, 0.16, 0.51, 0.84, 1.25, 2.26, 3.17, 6.05, 16.6, 61.2, 100.0,
];
const WUS_AMP: [f64; 12] = [
    1.00, 1.10, 1.18, 1.42, 1.58, 1.74, 2.06, 2.25, 2.58, 3.13, 4.00, 4.40,
];

/// Hard-rock amplification for central and eastern North America.
const CEUS_FREQ: [f64; 14] = [
    0.01, 0.10, 0.20, 0.30, 0.50, 0.90, 1.25, 1.80, 3.00, 5.30, 8.00, 14.0, 30.0, 100.0,
];
const CEUS_AMP: [f64; 14] = [
    1.00, 1.02, 1.03, 1.05, 1.07, 1.09, 1.11, 1.12, 1.13, 1.14, 1.15, 1.15, 1.15, 1.15,
];

/// Axis used when a computed curve has no previous axis to reuse.
const CALCULATED_FREQ_RANGE: (f64, f64, usize) = (0.01, 100.0, 30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CrustalAmpModel {
    /// Caller-edited table.
    Custom,
    #[default]
    #[serde(rename = "WUS")]
    Wus,
    #[serde(rename = "CEUS")]
    Ceus,
    /// Quarter-wavelength curve from the crustal model.
    Calculated,
}

impl CrustalAmpModel {
    pub const ALL: [CrustalAmpModel; 4] = [Self::Custom, Self::Wus, Self::Ceus, Self::Calculated];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Custom => "Custom",
            Self::Wus => "WUS",
            Self::Ceus => "CEUS",
            Self::Calculated => "Calculated",
        }
    }

    pub fn source_list() -> Vec<&'static str> {
        Self::ALL.iter().map(|model| model.as_str()).collect()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CrustalAmplificationError {
    #[error("amplification table is only editable in Custom mode, current mode is {0}")]
    ReadOnly(&'static str),
    #[error("amplification table length mismatch: freq={freq}, amp={amp}")]
    LengthMismatch { freq: usize, amp: usize },
    #[error("amplification frequencies must be positive and strictly increasing")]
    NonMonotonicFrequency,
    #[error("amplification values must be finite and > 0, index {index} got {value}")]
    NonPositiveAmplification { index: usize, value: f64 },
}

impl From<CrustalAmplificationError> for MotionError {
    fn from(error: CrustalAmplificationError) -> Self {
        MotionError::input_validation("INPUT.CRUSTAL_AMPLIFICATION", error.to_string())
    }
}

/// Frequency-dependent crustal amplification curve.
///
/// Every mutation bumps `revision()`; dependents compare revisions to decide
/// whether their cached output is stale.
#[derive(Debug, Clone, PartialEq)]
pub struct CrustalAmplification {
    model: CrustalAmpModel,
    freq: Vec<f64>,
    amp: Vec<f64>,
    crustal_model: CrustalModel,
    stale: bool,
    revision: u64,
}

impl Default for CrustalAmplification {
    fn default() -> Self {
        Self::new(CrustalAmpModel::default())
    }
}

impl CrustalAmplification {
    pub fn new(model: CrustalAmpModel) -> Self {
        let mut amplification = Self {
            model: CrustalAmpModel::Custom,
            freq: Vec::new(),
            amp: Vec::new(),
            crustal_model: CrustalModel::generic_rock(),
            stale: false,
            revision: 0,
        };
        amplification.set_model(model);
        amplification.revision = 0;
        amplification
    }

    pub fn model(&self) -> CrustalAmpModel {
        self.model
    }

    pub fn freq(&self) -> &[f64] {
        &self.freq
    }

    pub fn amp(&self) -> &[f64] {
        &self.amp
    }

    pub fn crustal_model(&self) -> &CrustalModel {
        &self.crustal_model
    }

    pub fn read_only(&self) -> bool {
        self.model != CrustalAmpModel::Custom
    }

    pub fn needs_crustal_model(&self) -> bool {
        self.model == CrustalAmpModel::Calculated
    }

    /// True when the curve is a unity fallback for a missing crustal model.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_model(&mut self, model: CrustalAmpModel) {
        self.model = model;
        match model {
            CrustalAmpModel::Custom => self.stale = false,
            CrustalAmpModel::Wus => self.load_table(&WUS_FREQ, &WUS_AMP),
            CrustalAmpModel::Ceus => self.load_table(&CEUS_FREQ, &CEUS_AMP),
            CrustalAmpModel::Calculated => self.recompute_from_crustal_model(),
        }
        self.revision += 1;
    }

    /// Replaces the curve; only allowed in `Custom` mode.
    pub fn set_table(
        &mut self,
        freq: Vec<f64>,
        amp: Vec<f64>,
    ) -> Result<(), CrustalAmplificationError> {
        if self.read_only() {
            return Err(CrustalAmplificationError::ReadOnly(self.model.as_str()));
        }
        validate_table(&freq, &amp)?;

        self.freq = freq;
        self.amp = amp;
        self.revision += 1;
        Ok(())
    }

    /// Replaces the crustal profile, recomputing the curve in `Calculated` mode.
    pub fn set_crustal_model(&mut self, crustal_model: CrustalModel) {
        self.crustal_model = crustal_model;
        if self.needs_crustal_model() {
            self.recompute_from_crustal_model();
        }
        self.revision += 1;
    }

    /// Amplification at `freq`, log-log interpolated with boundary hold.
    pub fn interpolate(&self, freq: f64) -> f64 {
        interpolate_log_log(freq, &self.freq, &self.amp).unwrap_or(1.0)
    }

    /// Evaluates the curve on an axis. In `Calculated` mode the profile is
    /// evaluated directly at each frequency.
    pub fn evaluate(&self, freqs: &[f64]) -> Vec<f64> {
        if self.needs_crustal_model() && !self.crustal_model.is_empty() {
            return freqs
                .iter()
                .map(|&freq| self.crustal_model.quarter_wavelength_amp(freq).unwrap_or(1.0))
                .collect();
        }

        freqs.iter().map(|&freq| self.interpolate(freq)).collect()
    }

    fn load_table(&mut self, freq: &[f64], amp: &[f64]) {
        self.freq = freq.to_vec();
        self.amp = amp.to_vec();
        self.stale = false;
    }

    fn recompute_from_crustal_model(&mut self) {
        let freq = if is_strictly_increasing(&self.freq) && self.freq.len() >= 2 {
            self.freq.clone()
        } else {
            let (min, max, count) = CALCULATED_FREQ_RANGE;
            log_grid(min, max, count).unwrap_or_default()
        };

        if self.crustal_model.is_empty() {
            warn!("crustal model is empty; using unity crustal amplification");
            self.amp = vec![1.0; freq.len()];
            self.freq = freq;
            self.stale = true;
            return;
        }

        self.amp = freq
            .iter()
            .map(|&value| self.crustal_model.quarter_wavelength_amp(value).unwrap_or(1.0))
            .collect();
        self.freq = freq;
        self.stale = false;
    }
}

fn validate_table(freq: &[f64], amp: &[f64]) -> Result<(), CrustalAmplificationError> {
    if freq.len() != amp.len() {
        return Err(CrustalAmplificationError::LengthMismatch {
            freq: freq.len(),
            amp: amp.len(),
        });
    }
    if freq.iter().any(|value| !(value.is_finite() && *value > 0.0)) || !is_strictly_increasing(freq)
    {
        return Err(CrustalAmplificationError::NonMonotonicFrequency);
    }
    if let Some((index, value)) = amp
        .iter()
        .copied()
        .enumerate()
        .find(|(_, value)| !(value.is_finite() && *value > 0.0))
    {
        return Err(CrustalAmplificationError::NonPositiveAmplification { index, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CrustalAmpModel, CrustalAmplification, CrustalAmplificationError};
    use crate::modules::crustal::{CrustalLayer, CrustalModel};

    #[test]
    fn tabulated_models_are_read_only_and_interpolate_log_log() {
        let amplification = CrustalAmplification::new(CrustalAmpModel::Wus);
        assert!(amplification.read_only());
        assert!(!amplification.needs_crustal_model());
        assert_eq!(amplification.interpolate(0.001), 1.0);
        assert_eq!(amplification.interpolate(1000.0), 4.4);

        let between = amplification.interpolate(1.0);
        assert!(between > 1.58 && between < 1.74);
    }

    #[test]
    fn custom_table_edits_are_validated() {
        let mut amplification = CrustalAmplification::new(CrustalAmpModel::Ceus);
        assert_eq!(
            amplification.set_table(vec![1.0], vec![1.0]),
            Err(CrustalAmplificationError::ReadOnly("CEUS"))
        );

        amplification.set_model(CrustalAmpModel::Custom);
        assert_eq!(amplification.freq().len(), 14);
        assert_eq!(
            amplification.set_table(vec![2.0, 1.0], vec![1.0, 1.0]),
            Err(CrustalAmplificationError::NonMonotonicFrequency)
        );
        assert_eq!(
            amplification.set_table(vec![1.0, 2.0], vec![1.0, -1.0]),
            Err(CrustalAmplificationError::NonPositiveAmplification {
                index: 1,
                value: -1.0
            })
        );
        amplification
            .set_table(vec![1.0, 10.0], vec![1.0, 2.0])
            .expect("valid table");
        assert!((amplification.interpolate(10f64.sqrt()) - 2f64.sqrt()).abs() < 1.0e-12);
    }

    #[test]
    fn calculated_mode_reuses_current_axis() {
        let mut amplification = CrustalAmplification::new(CrustalAmpModel::Wus);
        amplification.set_model(CrustalAmpModel::Calculated);
        assert!(amplification.needs_crustal_model());
        assert_eq!(amplification.freq().len(), 12);
        assert_eq!(amplification.freq()[0], 0.01);
        assert!(!amplification.is_stale());
    }

    #[test]
    fn half_space_profile_yields_unit_amplification() {
        let mut amplification = CrustalAmplification::new(CrustalAmpModel::Calculated);
        amplification.set_crustal_model(
            CrustalModel::new(vec![CrustalLayer::new(0.0, 3.5, 2.8)]).expect("model"),
        );

        for amp in amplification.amp() {
            assert!((amp - 1.0).abs() < 1.0e-12);
        }
        for amp in amplification.evaluate(&[0.1, 1.0, 10.0]) {
            assert!((amp - 1.0).abs() < 1.0e-12);
        }
    }

    #[test]
    fn empty_crustal_model_falls_back_to_unity_and_flags_staleness() {
        let mut amplification = CrustalAmplification::new(CrustalAmpModel::Calculated);
        amplification.set_crustal_model(CrustalModel::default());
        assert!(amplification.is_stale());
        assert!(amplification.amp().iter().all(|amp| *amp == 1.0));
        assert_eq!(amplification.evaluate(&[1.0, 5.0]), vec![1.0, 1.0]);

        amplification.set_crustal_model(CrustalModel::generic_rock());
        assert!(!amplification.is_stale());
    }

    #[test]
    fn every_mutation_bumps_revision() {
        let mut amplification = CrustalAmplification::default();
        assert_eq!(amplification.revision(), 0);

        amplification.set_model(CrustalAmpModel::Custom);
        amplification
            .set_table(vec![1.0, 2.0], vec![1.0, 1.5])
            .expect("table");
        amplification.set_crustal_model(CrustalModel::generic_rock());
        assert_eq!(amplification.revision(), 3);
    }

    #[test]
    fn source_list_is_indexable() {
        assert_eq!(
            CrustalAmpModel::source_list(),
            vec!["Custom", "WUS", "CEUS", "Calculated"]
        );
        assert_eq!(CrustalAmpModel::from_index(3), Some(CrustalAmpModel::Calculated));
        assert_eq!(CrustalAmpModel::from_index(4), None);
    }
}
