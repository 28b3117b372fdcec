use serde::{Deserialize, Serialize};

/// Fourier amplitude spectrum of ground acceleration [g-s].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FourierSpectrum {
    freq: Vec<f64>,
    amplitude: Vec<f64>,
}

impl FourierSpectrum {
    pub fn new(freq: Vec<f64>, amplitude: Vec<f64>) -> Self {
        debug_assert_eq!(freq.len(), amplitude.len());
        Self { freq, amplitude }
    }

    pub fn freq(&self) -> &[f64] {
        &self.freq
    }

    pub fn amplitude(&self) -> &[f64] {
        &self.amplitude
    }

    pub fn len(&self) -> usize {
        self.freq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freq.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.freq.iter().copied().zip(self.amplitude.iter().copied())
    }
}

/// Pseudo-spectral acceleration [g] at a fixed damping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseSpectrum {
    damping: f64,
    period: Vec<f64>,
    sa: Vec<f64>,
}

impl ResponseSpectrum {
    pub(crate) fn new(damping: f64, period: Vec<f64>, sa: Vec<f64>) -> Self {
        debug_assert_eq!(period.len(), sa.len());
        Self {
            damping,
            period,
            sa,
        }
    }

    /// Damping as a fraction of critical.
    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn period(&self) -> &[f64] {
        &self.period
    }

    pub fn sa(&self) -> &[f64] {
        &self.sa
    }

    pub fn len(&self) -> usize {
        self.period.len()
    }

    pub fn is_empty(&self) -> bool {
        self.period.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.period.iter().copied().zip(self.sa.iter().copied())
    }

    /// `(period, sa)` of the largest ordinate.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.rows().max_by(|lhs, rhs| lhs.1.total_cmp(&rhs.1))
    }
}
