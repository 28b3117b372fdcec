//! Random-vibration-theory peak response of a Fourier amplitude spectrum.
//!
//! The response power spectrum `|H(f)|² |FAS(f)|²` is integrated into
//! spectral moments on the FAS axis itself, the rms level follows from the
//! zeroth moment and an rms duration, and a peak factor scales rms to peak.

mod oscillator;
mod peak_factor;

pub use oscillator::SdofOscillator;
pub use peak_factor::{PeakCalculator, PeakFactorMethod, SpectralMoments};

use crate::common::constants::{GRAVITY_CM_PER_S2, MIN_DURATION};
use crate::domain::{MotionError, MotionResult};
use crate::modules::spectra::{FourierSpectrum, ResponseSpectrum};
use crate::numerics::IntegrationError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OscillatorCorrection {
    None,
    /// Boore & Joyner (1984) rms duration.
    #[default]
    BooreJoyner1984,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RvtEngine {
    pub method: PeakFactorMethod,
    pub correction: OscillatorCorrection,
}

impl RvtEngine {
    pub fn new(method: PeakFactorMethod, correction: OscillatorCorrection) -> Self {
        Self { method, correction }
    }

    /// Expected peak of the oscillator response, or of the motion itself
    /// when `oscillator` is `None`. Units follow the FAS.
    pub fn peak_response(
        &self,
        freq: &[f64],
        amplitude: &[f64],
        duration: f64,
        oscillator: Option<&SdofOscillator>,
    ) -> Result<f64, IntegrationError> {
        let duration = if duration.is_finite() {
            duration.max(MIN_DURATION)
        } else {
            MIN_DURATION
        };

        let squared: Vec<f64> = freq
            .iter()
            .zip(amplitude)
            .map(|(&f, &a)| {
                let transfer = oscillator.map_or(1.0, |osc| osc.squared_modulus(f));
                transfer * a * a
            })
            .collect();
        let moments = SpectralMoments::compute(freq, &squared)?;
        if moments.is_degenerate() {
            return Ok(0.0);
        }

        let rms_duration = match (self.correction, oscillator) {
            (OscillatorCorrection::BooreJoyner1984, Some(osc)) => osc.rms_duration(duration),
            _ => duration,
        };
        let peak_factor = self.method.peak_factor(&moments, duration)?;

        Ok(peak_factor * (moments.m0 / rms_duration).sqrt())
    }

    /// Spectral acceleration [g] for one period; non-positive periods give PGA.
    pub fn spectral_acceleration(
        &self,
        fas: &FourierSpectrum,
        duration: f64,
        period: f64,
        damping: f64,
    ) -> MotionResult<f64> {
        if !(damping.is_finite() && damping > 0.0) {
            return Err(MotionError::input_validation(
                "INPUT.DAMPING",
                format!("damping must be positive and finite, got {damping}"),
            ));
        }
        if !period.is_finite() {
            return Err(MotionError::input_validation(
                "INPUT.PERIOD",
                format!("oscillator period must be finite, got {period}"),
            ));
        }

        let oscillator = SdofOscillator::new(period, damping);
        Ok(self.peak_response(fas.freq(), fas.amplitude(), duration, oscillator.as_ref())?)
    }

    pub fn response_spectrum(
        &self,
        fas: &FourierSpectrum,
        duration: f64,
        periods: &[f64],
        damping: f64,
    ) -> MotionResult<ResponseSpectrum> {
        let sa = periods
            .iter()
            .map(|&period| self.spectral_acceleration(fas, duration, period, damping))
            .collect::<MotionResult<Vec<_>>>()?;
        Ok(ResponseSpectrum::new(damping, periods.to_vec(), sa))
    }

    /// Peak ground acceleration [g].
    pub fn peak_ground_acceleration(
        &self,
        fas: &FourierSpectrum,
        duration: f64,
    ) -> Result<f64, IntegrationError> {
        self.peak_response(fas.freq(), fas.amplitude(), duration, None)
    }

    /// Peak ground velocity [cm/s].
    pub fn peak_ground_velocity(
        &self,
        fas: &FourierSpectrum,
        duration: f64,
    ) -> Result<f64, IntegrationError> {
        let velocity: Vec<f64> = fas
            .rows()
            .map(|(freq, amp)| {
                if freq > 0.0 {
                    amp * GRAVITY_CM_PER_S2 / (2.0 * PI * freq)
                } else {
                    0.0
                }
            })
            .collect();
        self.peak_response(fas.freq(), &velocity, duration, None)
    }
}
