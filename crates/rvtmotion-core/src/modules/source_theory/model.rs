use super::params::SourceParameters;
use super::region::GeometricSpreading;
use crate::common::constants::{
    BRUNE_UNIT_SCALE, CORNER_FREQUENCY_COEFF, FREE_SURFACE_FACTOR, GRAVITY_CM_PER_S2,
    HORIZONTAL_PARTITION, MIN_DURATION, MIN_HYPOCENTRAL_DISTANCE, MOMENT_MAG_INTERCEPT,
    MOMENT_MAG_SLOPE, RADIATION_PATTERN,
};
use crate::modules::spectra::FourierSpectrum;
use std::f64::consts::PI;

/// Brune single-corner point source with Campbell (2003) style path and site
/// terms. Parameters are expected to be in range already.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSourceModel {
    params: SourceParameters,
    spreading: GeometricSpreading,
    seismic_moment: f64,
    corner_freq: f64,
    hypo_distance: f64,
}

impl PointSourceModel {
    pub fn new(params: SourceParameters, spreading: GeometricSpreading) -> Self {
        let seismic_moment =
            10f64.powf(MOMENT_MAG_SLOPE * params.moment_mag + MOMENT_MAG_INTERCEPT);
        let corner_freq = CORNER_FREQUENCY_COEFF
            * params.shear_velocity
            * (params.stress_drop / seismic_moment).cbrt();
        let hypo_distance = params
            .hypocentral_distance()
            .max(MIN_HYPOCENTRAL_DISTANCE);

        Self {
            params,
            spreading,
            seismic_moment,
            corner_freq,
            hypo_distance,
        }
    }

    pub fn params(&self) -> &SourceParameters {
        &self.params
    }

    /// Seismic moment [dyne-cm].
    pub fn seismic_moment(&self) -> f64 {
        self.seismic_moment
    }

    /// Corner frequency [Hz].
    pub fn corner_frequency(&self) -> f64 {
        self.corner_freq
    }

    /// Hypocentral distance [km], floored near the source.
    pub fn hypocentral_distance(&self) -> f64 {
        self.hypo_distance
    }

    /// Ground-motion duration: source duration plus path duration [s].
    pub fn duration(&self) -> f64 {
        let source = if self.corner_freq > 0.0 {
            1.0 / self.corner_freq
        } else {
            0.0
        };
        (source + self.params.path_dur_coeff * self.hypo_distance).max(MIN_DURATION)
    }

    /// Displacement source spectrum at 1 km [cm-s].
    pub fn source_spectrum(&self, freq: f64) -> f64 {
        let constant = RADIATION_PATTERN * FREE_SURFACE_FACTOR * HORIZONTAL_PARTITION
            / (4.0 * PI * self.params.density * self.params.shear_velocity.powi(3))
            * BRUNE_UNIT_SCALE;
        constant * self.seismic_moment / (1.0 + (freq / self.corner_freq).powi(2))
    }

    pub fn geometric_attenuation(&self) -> f64 {
        self.spreading
            .attenuation(self.hypo_distance, self.params.geo_atten)
    }

    /// `exp(-π f R / (Q(f) β))` with `Q(f) = a f^b`, written as
    /// `f^(1-b)` so that `f = 0` stays finite.
    pub fn path_attenuation(&self, freq: f64) -> f64 {
        let exponent = PI * freq.powf(1.0 - self.params.path_atten_power) * self.hypo_distance
            / (self.params.path_atten_coeff * self.params.shear_velocity);
        (-exponent).exp()
    }

    pub fn site_attenuation(&self, freq: f64) -> f64 {
        (-PI * self.params.site_atten * freq).exp()
    }

    /// Acceleration FAS [g-s] at one frequency with a crustal amplification.
    pub fn fourier_acceleration(&self, freq: f64, crustal_amp: f64) -> f64 {
        if !(freq > 0.0) {
            return 0.0;
        }

        let displacement = self.source_spectrum(freq)
            * self.geometric_attenuation()
            * self.path_attenuation(freq)
            * self.site_attenuation(freq)
            * crustal_amp;
        (2.0 * PI * freq).powi(2) * displacement / GRAVITY_CM_PER_S2
    }

    /// FAS over an axis; `crustal_amp` is evaluated on the same axis.
    pub fn fourier_spectrum(&self, freqs: &[f64], crustal_amp: &[f64]) -> FourierSpectrum {
        let amplitude = freqs
            .iter()
            .zip(crustal_amp)
            .map(|(&freq, &amp)| self.fourier_acceleration(freq, amp))
            .collect();
        FourierSpectrum::new(freqs.to_vec(), amplitude)
    }
}

#[cfg(test)]
mod tests {
    use super::PointSourceModel;
    use crate::modules::source_theory::{RegionModel, SourceParameters};

    fn wus_model(params: SourceParameters) -> PointSourceModel {
        PointSourceModel::new(params, RegionModel::Wus.preset().spreading)
    }

    #[test]
    fn corner_frequency_and_moment_follow_brune_relations() {
        let model = wus_model(SourceParameters::default());
        assert!((model.seismic_moment().log10() - 25.8).abs() < 1.0e-12);
        assert!((model.corner_frequency() - 0.2002).abs() < 1.0e-3);
    }

    #[test]
    fn duration_adds_source_and_path_terms() {
        let model = wus_model(SourceParameters::default());
        let hypo = 20.0f64.hypot(8.0);
        let expected = 1.0 / model.corner_frequency() + 0.05 * hypo;
        assert!((model.duration() - expected).abs() < 1.0e-12);
    }

    #[test]
    fn zero_frequency_and_zero_distance_stay_finite() {
        let mut params = SourceParameters::default();
        params.distance = 0.0;
        params.depth = 0.0;
        params.path_atten_power = 1.0;
        let model = wus_model(params);

        assert_eq!(model.hypocentral_distance(), 1.0);
        assert_eq!(model.fourier_acceleration(0.0, 1.0), 0.0);
        assert!(model.path_attenuation(0.0).is_finite());
        assert!(model.fourier_acceleration(10.0, 1.0).is_finite());
    }

    #[test]
    fn site_attenuation_decays_exponentially() {
        let model = wus_model(SourceParameters::default());
        let ratio = model.site_attenuation(20.0) / model.site_attenuation(10.0);
        assert!((ratio - (-std::f64::consts::PI * 0.04 * 10.0).exp()).abs() < 1.0e-12);
    }

    #[test]
    fn acceleration_spectrum_is_flat_between_corner_and_kappa() {
        let mut params = SourceParameters::default();
        params.site_atten = 0.001;
        params.path_atten_coeff = 10000.0;
        let model = wus_model(params);

        let mid = model.fourier_acceleration(2.0, 1.0);
        let high = model.fourier_acceleration(4.0, 1.0);
        assert!((high / mid - 1.0).abs() < 0.05);
    }
}
