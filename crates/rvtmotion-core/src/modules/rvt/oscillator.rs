use num_complex::Complex64;
use std::f64::consts::PI;

/// Single-degree-of-freedom oscillator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SdofOscillator {
    period: f64,
    damping: f64,
}

impl SdofOscillator {
    /// `period` [s] must be positive; `damping` is a fraction of critical.
    pub fn new(period: f64, damping: f64) -> Option<Self> {
        if !(period.is_finite() && period > 0.0) || !(damping.is_finite() && damping > 0.0) {
            return None;
        }
        Some(Self { period, damping })
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn natural_freq(&self) -> f64 {
        1.0 / self.period
    }

    /// Pseudo-acceleration transfer function from ground acceleration.
    pub fn transfer(&self, freq: f64) -> Complex64 {
        let fn_ = self.natural_freq();
        let denominator = Complex64::new(freq * freq - fn_ * fn_, -2.0 * self.damping * fn_ * freq);
        Complex64::new(-fn_ * fn_, 0.0) / denominator
    }

    pub fn squared_modulus(&self, freq: f64) -> f64 {
        self.transfer(freq).norm_sqr()
    }

    /// Boore & Joyner (1984) rms duration for oscillator response.
    pub fn rms_duration(&self, gm_duration: f64) -> f64 {
        let gamma = gm_duration / self.period;
        let oscillator_duration = self.period / (2.0 * PI * self.damping);
        let gamma_cubed = gamma.powi(3);
        gm_duration + oscillator_duration * (gamma_cubed / (gamma_cubed + 1.0 / 3.0))
    }
}
