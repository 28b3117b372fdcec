//! Stateful source-theory motion: parameters and axes in, FAS, duration and
//! response spectrum out.
//!
//! Every mutation marks the cached output stale. `calculate()` rebuilds the
//! FAS, the duration and then the response spectrum, in that order. The
//! `&mut self` readers recompute on demand; `calculated()` exposes whatever
//! was last computed.

use super::traits::{LazyMotion, MotionCalculator};
use crate::common::config::{
    AmplificationTable, CrustalAmplificationConfig, DimensionConfig, MotionConfig,
    DEFAULT_MOTION_NAME,
};
use crate::common::constants::{
    DEFAULT_DAMPING, DEFAULT_FREQUENCY_COUNT, DEFAULT_FREQUENCY_MAX, DEFAULT_FREQUENCY_MIN,
    DEFAULT_PERIOD_COUNT, DEFAULT_PERIOD_MAX, DEFAULT_PERIOD_MIN, FREQUENCY_LIMITS,
};
use crate::domain::{MotionError, MotionResult, SourceField};
use crate::modules::crustal::{CrustalAmpModel, CrustalAmplification, CrustalModel};
use crate::modules::dimension::{Dimension, Spacing};
use crate::modules::rvt::{OscillatorCorrection, PeakFactorMethod, RvtEngine};
use crate::modules::source_theory::{
    GeometricSpreading, PointSourceModel, RegionModel, SourceModel, SourceParameters,
};
use crate::modules::spectra::{FourierSpectrum, ResponseSpectrum};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Everything produced by one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionOutput {
    /// Parameters actually used, after clamping.
    pub parameters: SourceParameters,
    pub clamped_fields: Vec<SourceField>,
    pub seismic_moment: f64,
    pub corner_frequency: f64,
    pub hypocentral_distance: f64,
    pub duration: f64,
    pub fourier: FourierSpectrum,
    pub response: ResponseSpectrum,
    pub pga: f64,
    pub pgv: f64,
}

#[derive(Debug, Clone)]
pub struct SourceTheoryRvtMotion {
    name: String,
    description: String,
    source_model: SourceModel,
    params: SourceParameters,
    spreading: GeometricSpreading,
    crustal_amp: CrustalAmplification,
    freq: Dimension,
    period: Dimension,
    damping: f64,
    engine: RvtEngine,
    output: Option<MotionOutput>,
    dirty: bool,
    calculated_amp_revision: u64,
}

impl Default for SourceTheoryRvtMotion {
    fn default() -> Self {
        Self::new(SourceModel::default())
    }
}

impl SourceTheoryRvtMotion {
    pub fn new(source_model: SourceModel) -> Self {
        let mut motion = Self {
            name: DEFAULT_MOTION_NAME.to_string(),
            description: String::new(),
            source_model: SourceModel::Custom,
            params: SourceParameters::default(),
            spreading: RegionModel::Wus.preset().spreading,
            crustal_amp: CrustalAmplification::default(),
            freq: Dimension::log_or_empty(
                DEFAULT_FREQUENCY_MIN,
                DEFAULT_FREQUENCY_MAX,
                DEFAULT_FREQUENCY_COUNT,
            ),
            period: Dimension::log_or_empty(
                DEFAULT_PERIOD_MIN,
                DEFAULT_PERIOD_MAX,
                DEFAULT_PERIOD_COUNT,
            ),
            damping: DEFAULT_DAMPING,
            engine: RvtEngine::default(),
            output: None,
            dirty: true,
            calculated_amp_revision: 0,
        };
        motion.set_source_model(source_model);
        motion
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn source_model(&self) -> SourceModel {
        self.source_model
    }

    /// Selecting a preset overwrites every non-scenario field, the spreading
    /// shape and the crustal amplification model. `Custom` keeps the
    /// current values and unlocks them.
    pub fn set_source_model(&mut self, source_model: SourceModel) {
        self.source_model = source_model;
        if let Some(preset) = source_model.preset() {
            self.params.apply_preset(&preset);
            self.spreading = preset.spreading;
            if self.crustal_amp.model() != preset.crustal_amp {
                self.crustal_amp.set_model(preset.crustal_amp);
            }
        }
        self.dirty = true;
        debug!(source_model = %source_model, "source model selected");
    }

    /// Position in `SourceModel::source_list()`. Returns `false` when out of range.
    pub fn set_source_model_index(&mut self, index: usize) -> bool {
        match SourceModel::from_index(index) {
            Some(source_model) => {
                self.set_source_model(source_model);
                true
            }
            None => {
                warn!(index, "source model index out of range");
                false
            }
        }
    }

    pub fn is_customizable(&self) -> bool {
        self.source_model.is_customizable()
    }

    pub fn is_editable(&self, field: SourceField) -> bool {
        self.source_model.is_editable(field)
    }

    pub fn params(&self) -> &SourceParameters {
        &self.params
    }

    pub fn parameter(&self, field: SourceField) -> f64 {
        self.params.get(field)
    }

    /// Stores a parameter value. Out-of-range values are kept and clamped at
    /// calculation time; non-finite values and writes to fields locked by
    /// the current preset are refused.
    pub fn set_parameter(&mut self, field: SourceField, value: f64) -> bool {
        if !value.is_finite() {
            warn!(field = %field, value, "refusing non-finite parameter value");
            return false;
        }
        if !self.is_editable(field) {
            warn!(
                field = %field,
                source_model = %self.source_model,
                "parameter is locked by the source model preset"
            );
            return false;
        }
        if self.params.get(field) != value {
            self.params.set(field, value);
            self.dirty = true;
        }
        true
    }

    pub fn set_moment_mag(&mut self, value: f64) -> bool {
        self.set_parameter(SourceField::MomentMag, value)
    }

    pub fn set_distance(&mut self, value: f64) -> bool {
        self.set_parameter(SourceField::Distance, value)
    }

    pub fn set_depth(&mut self, value: f64) -> bool {
        self.set_parameter(SourceField::Depth, value)
    }

    pub fn set_stress_drop(&mut self, value: f64) -> bool {
        self.set_parameter(SourceField::StressDrop, value)
    }

    pub fn spreading(&self) -> GeometricSpreading {
        self.spreading
    }

    pub fn set_spreading(&mut self, spreading: GeometricSpreading) -> bool {
        if !self.is_customizable() {
            warn!(source_model = %self.source_model, "geometric spreading is locked by the preset");
            return false;
        }
        self.spreading =
            GeometricSpreading::new(spreading.near_field_limit, spreading.plateau_limit);
        self.dirty = true;
        true
    }

    pub fn crustal_amplification(&self) -> &CrustalAmplification {
        &self.crustal_amp
    }

    pub fn set_crustal_amp_model(&mut self, model: CrustalAmpModel) -> bool {
        if !self.is_customizable() {
            warn!(
                model = model.as_str(),
                source_model = %self.source_model,
                "crustal amplification model is locked by the preset"
            );
            return false;
        }
        self.crustal_amp.set_model(model);
        true
    }

    pub fn set_crustal_amp_table(&mut self, freq: Vec<f64>, amp: Vec<f64>) -> MotionResult<()> {
        self.crustal_amp.set_table(freq, amp)?;
        Ok(())
    }

    pub fn set_crustal_model(&mut self, crustal_model: CrustalModel) {
        self.crustal_amp.set_crustal_model(crustal_model);
    }

    pub fn frequency(&self) -> &Dimension {
        &self.freq
    }

    /// Replaces the frequency axis, clamping it into `FREQUENCY_LIMITS`.
    pub fn set_frequency(&mut self, freq: Dimension) -> MotionResult<()> {
        let (lower, upper) = FREQUENCY_LIMITS;
        let clamped = match freq.spacing() {
            Spacing::Custom => {
                let values: Vec<f64> = freq
                    .values()
                    .iter()
                    .copied()
                    .filter(|value| (lower..=upper).contains(value))
                    .collect();
                if values.len() != freq.values().len() {
                    warn!(
                        dropped = freq.values().len() - values.len(),
                        "frequencies outside [{lower}, {upper}] Hz dropped"
                    );
                }
                Dimension::from_values(values)?
            }
            spacing => {
                let min = freq.min().clamp(lower, upper);
                let max = freq.max().clamp(lower, upper);
                if min != freq.min() || max != freq.max() {
                    warn!(min = freq.min(), max = freq.max(), "frequency bounds clamped");
                }
                Dimension::new(min, max, freq.size(), spacing)?
            }
        };

        self.freq = clamped;
        self.dirty = true;
        Ok(())
    }

    pub fn period(&self) -> &Dimension {
        &self.period
    }

    pub fn set_period(&mut self, period: Dimension) {
        self.period = period;
        self.dirty = true;
    }

    /// Fraction of critical.
    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn set_damping(&mut self, damping: f64) -> bool {
        if !(damping.is_finite() && damping > 0.0) {
            warn!(damping, "refusing non-positive damping");
            return false;
        }
        if self.damping != damping {
            self.damping = damping;
            self.dirty = true;
        }
        true
    }

    pub fn peak_factor_method(&self) -> PeakFactorMethod {
        self.engine.method
    }

    pub fn set_peak_factor_method(&mut self, method: PeakFactorMethod) {
        if self.engine.method != method {
            self.engine.method = method;
            self.dirty = true;
        }
    }

    pub fn oscillator_correction(&self) -> OscillatorCorrection {
        self.engine.correction
    }

    pub fn set_oscillator_correction(&mut self, correction: OscillatorCorrection) {
        if self.engine.correction != correction {
            self.engine.correction = correction;
            self.dirty = true;
        }
    }

    pub fn is_stale(&self) -> bool {
        self.dirty
            || self.output.is_none()
            || self.crustal_amp.revision() != self.calculated_amp_revision
    }

    /// Rebuilds the FAS, the duration and the response spectrum.
    pub fn calculate(&mut self) -> MotionResult<()> {
        if self.freq.values().len() < 2 {
            return Err(MotionError::input_validation(
                "INPUT.FREQUENCY_AXIS",
                format!(
                    "frequency axis requires at least 2 points, got {}",
                    self.freq.values().len()
                ),
            ));
        }
        if self.period.values().is_empty() {
            return Err(MotionError::input_validation(
                "INPUT.PERIOD_AXIS",
                "period axis requires at least 1 point",
            ));
        }

        let (parameters, clamped_fields) = self.params.clamped();
        for field in &clamped_fields {
            let (min, max) = field.bounds();
            warn!(
                field = %field,
                value = self.params.get(*field),
                min,
                max,
                "parameter clamped into range"
            );
        }

        let point_source = PointSourceModel::new(parameters, self.spreading);
        let freqs = self.freq.values();
        let amplification = self.crustal_amp.evaluate(freqs);
        let fourier = point_source.fourier_spectrum(freqs, &amplification);
        let duration = point_source.duration();

        let response =
            self.engine
                .response_spectrum(&fourier, duration, self.period.values(), self.damping)?;
        let pga = self.engine.peak_ground_acceleration(&fourier, duration)?;
        let pgv = self.engine.peak_ground_velocity(&fourier, duration)?;

        debug!(
            name = %self.name,
            corner_frequency = point_source.corner_frequency(),
            duration,
            pga,
            pgv,
            frequencies = freqs.len(),
            periods = response.len(),
            "motion calculated"
        );

        self.output = Some(MotionOutput {
            parameters,
            clamped_fields,
            seismic_moment: point_source.seismic_moment(),
            corner_frequency: point_source.corner_frequency(),
            hypocentral_distance: point_source.hypocentral_distance(),
            duration,
            fourier,
            response,
            pga,
            pgv,
        });
        self.dirty = false;
        self.calculated_amp_revision = self.crustal_amp.revision();
        Ok(())
    }

    pub fn recompute_all(&mut self) -> MotionResult<()> {
        self.calculate()
    }

    /// Last calculated output, possibly stale.
    pub fn calculated(&self) -> Option<&MotionOutput> {
        self.output.as_ref()
    }

    pub fn output(&mut self) -> MotionResult<&MotionOutput> {
        self.ensure_calculated()?;
        self.output.as_ref().ok_or_else(|| {
            MotionError::internal("INTERNAL.MOTION_OUTPUT", "calculation produced no output")
        })
    }

    pub fn fourier_spectrum(&mut self) -> MotionResult<&FourierSpectrum> {
        Ok(&self.output()?.fourier)
    }

    pub fn response_spectrum(&mut self) -> MotionResult<&ResponseSpectrum> {
        Ok(&self.output()?.response)
    }

    /// Ground-motion duration [s].
    pub fn duration(&mut self) -> MotionResult<f64> {
        Ok(self.output()?.duration)
    }

    /// Spectral acceleration [g] of an arbitrary oscillator on the current
    /// motion; a non-positive period gives PGA.
    pub fn compute_sa(&mut self, period: f64, damping: f64) -> MotionResult<f64> {
        let engine = self.engine;
        let output = self.output()?;
        engine.spectral_acceleration(&output.fourier, output.duration, period, damping)
    }

    pub fn from_config(config: &MotionConfig) -> MotionResult<Self> {
        let mut motion = Self::new(config.source_model);
        motion.set_name(config.name.clone());
        motion.set_description(config.description.clone());

        for (&field, &value) in &config.parameters {
            if !motion.set_parameter(field, value) {
                warn!(field = %field, "parameter override ignored");
            }
        }

        if let Some(spreading) = config.spreading {
            if !motion.set_spreading(spreading) {
                warn!("geometric spreading override ignored");
            }
        }

        motion.set_frequency(config.frequency.to_dimension()?)?;
        motion.set_period(config.period.to_dimension()?);
        if !motion.set_damping(config.damping) {
            return Err(MotionError::input_validation(
                "INPUT.DAMPING",
                format!("damping must be finite and > 0, got {}", config.damping),
            ));
        }
        motion.set_peak_factor_method(config.peak_factor);
        motion.set_oscillator_correction(config.oscillator_correction);
        motion.apply_crustal_config(&config.crustal_amplification)?;

        Ok(motion)
    }

    fn apply_crustal_config(&mut self, config: &CrustalAmplificationConfig) -> MotionResult<()> {
        if let Some(layers) = &config.layers {
            self.set_crustal_model(CrustalModel::new(layers.clone())?);
        }
        if let Some(model) = config.model {
            if model != self.crustal_amp.model() && !self.set_crustal_amp_model(model) {
                warn!(model = model.as_str(), "crustal amplification model override ignored");
            }
        }
        if let Some(table) = &config.table {
            self.set_crustal_amp_table(table.freq.clone(), table.amp.clone())?;
        }
        Ok(())
    }

    pub fn to_config(&self) -> MotionConfig {
        let parameters: BTreeMap<SourceField, f64> = SourceField::ALL
            .into_iter()
            .filter(|field| field.is_scenario_field() || self.is_customizable())
            .map(|field| (field, self.params.get(field)))
            .collect();

        let crustal_amp = &self.crustal_amp;
        let crustal_amplification = CrustalAmplificationConfig {
            model: Some(crustal_amp.model()),
            table: (crustal_amp.model() == CrustalAmpModel::Custom).then(|| AmplificationTable {
                freq: crustal_amp.freq().to_vec(),
                amp: crustal_amp.amp().to_vec(),
            }),
            layers: crustal_amp
                .needs_crustal_model()
                .then(|| crustal_amp.crustal_model().layers().to_vec()),
        };

        MotionConfig {
            name: self.name.clone(),
            description: self.description.clone(),
            source_model: self.source_model,
            parameters,
            spreading: self.is_customizable().then_some(self.spreading),
            frequency: DimensionConfig::from(&self.freq),
            period: DimensionConfig::from(&self.period),
            damping: self.damping,
            crustal_amplification,
            peak_factor: self.engine.method,
            oscillator_correction: self.engine.correction,
        }
    }
}

impl MotionCalculator for SourceTheoryRvtMotion {
    fn calculate(&mut self) -> MotionResult<()> {
        SourceTheoryRvtMotion::calculate(self)
    }

    fn is_stale(&self) -> bool {
        SourceTheoryRvtMotion::is_stale(self)
    }
}
