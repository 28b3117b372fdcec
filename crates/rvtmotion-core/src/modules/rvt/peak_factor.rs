use crate::numerics::{IntegrationError, integrate_simpson, integrate_trapezoid};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2};

const EULER_GAMMA: f64 = 0.5772;
const PEAK_INTEGRAL_INTERVALS: usize = 2000;
/// Integrands are negligible beyond this many standard deviations past the mode.
const PEAK_INTEGRAL_TAIL: f64 = 8.0;

/// Spectral moments `m_k = 2 ∫ (2πf)^k |Y(f)|² df`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralMoments {
    pub m0: f64,
    pub m1: f64,
    pub m2: f64,
    pub m4: f64,
}

impl SpectralMoments {
    /// `squared_amplitude` holds `|Y(f)|²` on the non-uniform `freq` axis.
    pub fn compute(freq: &[f64], squared_amplitude: &[f64]) -> Result<Self, IntegrationError> {
        let moment = |power: i32| -> Result<f64, IntegrationError> {
            let weighted: Vec<f64> = freq
                .iter()
                .zip(squared_amplitude)
                .map(|(&f, &value)| (2.0 * PI * f).powi(power) * value)
                .collect();
            Ok(2.0 * integrate_trapezoid(freq, &weighted)?)
        };

        Ok(Self {
            m0: moment(0)?,
            m1: moment(1)?,
            m2: moment(2)?,
            m4: moment(4)?,
        })
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.m0.is_finite() && self.m0 > 0.0)
    }

    /// Expected number of zero crossings within `duration`, at least one.
    pub fn zero_crossings(&self, duration: f64) -> f64 {
        if self.is_degenerate() || !(self.m2 > 0.0) {
            return 1.0;
        }
        (duration * (self.m2 / self.m0).sqrt() / PI).max(1.0)
    }

    /// Expected number of extrema within `duration`, never below the zero crossings.
    pub fn extrema(&self, duration: f64) -> f64 {
        let crossings = self.zero_crossings(duration);
        if !(self.m2 > 0.0 && self.m4 > 0.0) {
            return crossings;
        }
        (duration * (self.m4 / self.m2).sqrt() / PI).max(crossings)
    }

    /// Vanmarcke spectral bandwidth `δ = sqrt(1 - m1² / (m0 m2))`.
    pub fn bandwidth(&self) -> f64 {
        if self.is_degenerate() || !(self.m2 > 0.0) {
            return 0.0;
        }
        (1.0 - self.m1 * self.m1 / (self.m0 * self.m2)).max(0.0).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PeakFactorMethod {
    /// Cartwright & Longuet-Higgins (1956) extreme-value integral.
    #[default]
    CartwrightLonguetHiggins,
    /// Vanmarcke (1975) first-passage approximation with bandwidth correction.
    Vanmarcke,
    /// Davenport (1964) asymptotic expression.
    Davenport,
}

pub trait PeakCalculator {
    /// Ratio of the expected peak to the rms response. Always at least 1.
    fn peak_factor(&self, moments: &SpectralMoments, duration: f64) -> Result<f64, IntegrationError>;
}

impl PeakCalculator for PeakFactorMethod {
    fn peak_factor(&self, moments: &SpectralMoments, duration: f64) -> Result<f64, IntegrationError> {
        let factor = match self {
            Self::CartwrightLonguetHiggins => cartwright_longuet_higgins(moments, duration)?,
            Self::Vanmarcke => vanmarcke(moments, duration)?,
            Self::Davenport => davenport(moments, duration),
        };

        // The expected peak never falls below the rms level.
        Ok(if factor.is_finite() { factor.max(1.0) } else { 1.0 })
    }
}

fn cartwright_longuet_higgins(
    moments: &SpectralMoments,
    duration: f64,
) -> Result<f64, IntegrationError> {
    let crossings = moments.zero_crossings(duration);
    let extrema = moments.extrema(duration);
    let regularity = crossings / extrema;

    let integrand = |z: f64| {
        let exceedance = regularity * (-z * z).exp();
        1.0 - (extrema * (-exceedance).ln_1p()).exp()
    };
    let upper = PEAK_INTEGRAL_TAIL + extrema.ln().sqrt();

    Ok(SQRT_2 * integrate_simpson(integrand, 0.0, upper, PEAK_INTEGRAL_INTERVALS)?)
}

fn vanmarcke(moments: &SpectralMoments, duration: f64) -> Result<f64, IntegrationError> {
    let crossings = moments.zero_crossings(duration);
    let effective_bandwidth = moments.bandwidth().powf(1.2);
    let clumping = (PI / 2.0).sqrt() * effective_bandwidth;

    let integrand = |r: f64| {
        if r <= 0.0 {
            return 1.0;
        }
        let half_square = -0.5 * r * r;
        let below = -half_square.exp_m1();
        let exponent =
            -crossings * half_square.exp() * -(-clumping * r).exp_m1() / below;
        1.0 - below * exponent.exp()
    };
    let upper = PEAK_INTEGRAL_TAIL + (2.0 * crossings.ln()).sqrt();

    integrate_simpson(integrand, 0.0, upper, PEAK_INTEGRAL_INTERVALS)
}

fn davenport(moments: &SpectralMoments, duration: f64) -> f64 {
    let crossings = moments.zero_crossings(duration);
    if crossings <= std::f64::consts::E {
        return 1.0;
    }
    let root = (2.0 * crossings.ln()).sqrt();
    root + EULER_GAMMA / root
}

#[cfg(test)]
mod tests {
    use super::{PeakCalculator, PeakFactorMethod, SpectralMoments};
    use crate::numerics::log_grid;

    fn narrow_band(m0: f64, omega: f64) -> SpectralMoments {
        SpectralMoments {
            m0,
            m1: m0 * omega,
            m2: m0 * omega * omega,
            m4: m0 * omega.powi(4),
        }
    }

    #[test]
    fn moments_of_band_limited_white_noise_match_closed_form() {
        let freq = log_grid(1.0, 10.0, 4001).expect("grid");
        let squared = vec![1.0; freq.len()];
        let moments = SpectralMoments::compute(&freq, &squared).expect("moments");

        assert!((moments.m0 - 18.0).abs() / 18.0 < 1.0e-5);
        let two_pi = 2.0 * std::f64::consts::PI;
        let m2 = 2.0 * two_pi.powi(2) * (1000.0 - 1.0) / 3.0;
        assert!((moments.m2 - m2).abs() / m2 < 1.0e-5);
    }

    #[test]
    fn narrow_band_process_has_unit_regularity() {
        let moments = narrow_band(2.0, 10.0);
        assert!(moments.bandwidth() < 1.0e-6);
        let crossings = moments.zero_crossings(30.0);
        assert!((crossings - 30.0 * 10.0 / std::f64::consts::PI).abs() < 1.0e-9);
        assert!((moments.extrema(30.0) - crossings).abs() < 1.0e-9);
    }

    #[test]
    fn peak_factors_are_at_least_one_and_grow_with_duration() {
        let omega = 2.0 * std::f64::consts::PI * 5.0;
        let moments = SpectralMoments {
            m0: 1.0,
            m1: 0.9 * omega,
            m2: omega * omega,
            m4: 1.2 * omega.powi(4),
        };
        for method in [
            PeakFactorMethod::CartwrightLonguetHiggins,
            PeakFactorMethod::Vanmarcke,
            PeakFactorMethod::Davenport,
        ] {
            let short = method.peak_factor(&moments, 0.2).expect("short");
            let long = method.peak_factor(&moments, 20.0).expect("long");
            assert!(short >= 1.0, "{method:?} short={short}");
            assert!(long > short, "{method:?} long={long} short={short}");
            assert!(long < 5.0, "{method:?} long={long}");
        }
    }

    #[test]
    fn single_cycle_narrow_band_peak_matches_rayleigh_mean() {
        // One extremum of a narrow-band process: E[peak] = sqrt(π/2).
        let moments = narrow_band(1.0, std::f64::consts::PI);
        let factor = PeakFactorMethod::CartwrightLonguetHiggins
            .peak_factor(&moments, 1.0)
            .expect("factor");
        assert!((factor - (std::f64::consts::PI / 2.0).sqrt()).abs() < 1.0e-6);
    }

    #[test]
    fn methods_agree_for_many_cycles() {
        let moments = narrow_band(1.0, 2.0 * std::f64::consts::PI * 10.0);
        let clh = PeakFactorMethod::CartwrightLonguetHiggins
            .peak_factor(&moments, 30.0)
            .expect("clh");
        let davenport = PeakFactorMethod::Davenport
            .peak_factor(&moments, 30.0)
            .expect("davenport");
        assert!((clh - davenport).abs() / clh < 0.05, "clh={clh} davenport={davenport}");
    }

    #[test]
    fn degenerate_moments_fall_back_to_unit_factor() {
        let moments = SpectralMoments {
            m0: 0.0,
            m1: 0.0,
            m2: 0.0,
            m4: 0.0,
        };
        assert!(moments.is_degenerate());
        let factor = PeakFactorMethod::Davenport
            .peak_factor(&moments, 10.0)
            .expect("factor");
        assert_eq!(factor, 1.0);
    }
}
