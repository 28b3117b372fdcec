use crate::domain::MotionError;
use crate::numerics::{is_strictly_increasing, linear_grid, log_grid};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Spacing {
    Linear,
    #[default]
    Log,
    /// Values supplied directly by the caller.
    Custom,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DimensionError {
    #[error("dimension requires at least 2 points, got {size}")]
    TooFewPoints { size: usize },
    #[error("dimension bounds must be finite with min < max, got [{min}, {max}]")]
    InvalidBounds { min: f64, max: f64 },
    #[error("log-spaced dimension requires positive bounds, got min={min}")]
    NonPositiveLogBound { min: f64 },
    #[error("dimension values must be finite and strictly increasing")]
    NonMonotonicValues,
    #[error("custom spacing requires explicit values")]
    MissingCustomValues,
}

impl From<DimensionError> for MotionError {
    fn from(error: DimensionError) -> Self {
        MotionError::input_validation("INPUT.DIMENSION", error.to_string())
    }
}

/// Monotonic sample axis (frequency or period).
///
/// Generated axes are rebuilt whenever a bound, the size or the spacing
/// changes. A custom axis holds caller values and ignores generator edits
/// until its spacing is switched back.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    min: f64,
    max: f64,
    size: usize,
    spacing: Spacing,
    values: Vec<f64>,
}

impl Dimension {
    pub fn new(min: f64, max: f64, size: usize, spacing: Spacing) -> Result<Self, DimensionError> {
        let values = generate(min, max, size, spacing)?;
        Ok(Self {
            min,
            max,
            size,
            spacing,
            values,
        })
    }

    pub fn log(min: f64, max: f64, size: usize) -> Result<Self, DimensionError> {
        Self::new(min, max, size, Spacing::Log)
    }

    /// Log axis for bounds known to be valid; falls back to an empty axis.
    pub(crate) fn log_or_empty(min: f64, max: f64, size: usize) -> Self {
        Self::log(min, max, size).unwrap_or(Self {
            min,
            max,
            size: 0,
            spacing: Spacing::Log,
            values: Vec::new(),
        })
    }

    /// User-defined axis. An empty axis is accepted here and rejected by the
    /// calculation that consumes it.
    pub fn from_values(values: Vec<f64>) -> Result<Self, DimensionError> {
        if values.iter().any(|value| !value.is_finite()) || !is_strictly_increasing(&values) {
            return Err(DimensionError::NonMonotonicValues);
        }

        Ok(Self {
            min: values.first().copied().unwrap_or(0.0),
            max: values.last().copied().unwrap_or(0.0),
            size: values.len(),
            spacing: Spacing::Custom,
            values,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn set_min(&mut self, min: f64) -> Result<(), DimensionError> {
        self.rebuild(min, self.max, self.size, self.spacing)
    }

    pub fn set_max(&mut self, max: f64) -> Result<(), DimensionError> {
        self.rebuild(self.min, max, self.size, self.spacing)
    }

    pub fn set_size(&mut self, size: usize) -> Result<(), DimensionError> {
        self.rebuild(self.min, self.max, size, self.spacing)
    }

    pub fn set_spacing(&mut self, spacing: Spacing) -> Result<(), DimensionError> {
        self.rebuild(self.min, self.max, self.size, spacing)
    }

    fn rebuild(
        &mut self,
        min: f64,
        max: f64,
        size: usize,
        spacing: Spacing,
    ) -> Result<(), DimensionError> {
        if spacing == Spacing::Custom {
            if self.spacing != Spacing::Custom {
                return Err(DimensionError::MissingCustomValues);
            }
            return Ok(());
        }

        *self = Self::new(min, max, size, spacing)?;
        Ok(())
    }
}

fn generate(min: f64, max: f64, size: usize, spacing: Spacing) -> Result<Vec<f64>, DimensionError> {
    if size < 2 {
        return Err(DimensionError::TooFewPoints { size });
    }
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(DimensionError::InvalidBounds { min, max });
    }

    let values = match spacing {
        Spacing::Linear => linear_grid(min, max, size),
        Spacing::Log => {
            if min <= 0.0 {
                return Err(DimensionError::NonPositiveLogBound { min });
            }
            log_grid(min, max, size)
        }
        Spacing::Custom => return Err(DimensionError::MissingCustomValues),
    };

    values.ok_or(DimensionError::TooFewPoints { size })
}
