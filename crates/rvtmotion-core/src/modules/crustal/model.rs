use crate::domain::MotionError;
use serde::{Deserialize, Serialize};

/// One layer of a crustal velocity profile.
///
/// Units: thickness [km], shear velocity [km/s], density [g/cc].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrustalLayer {
    pub thickness: f64,
    pub shear_velocity: f64,
    pub density: f64,
}

impl CrustalLayer {
    pub const fn new(thickness: f64, shear_velocity: f64, density: f64) -> Self {
        Self {
            thickness,
            shear_velocity,
            density,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CrustalModelError {
    #[error("layer {index} thickness must be finite and > 0, got {value}")]
    NonPositiveThickness { index: usize, value: f64 },
    #[error("layer {index} shear velocity must be finite and > 0, got {value}")]
    NonPositiveVelocity { index: usize, value: f64 },
    #[error("layer {index} density must be finite and > 0, got {value}")]
    NonPositiveDensity { index: usize, value: f64 },
    #[error("layer depths must be strictly increasing from 0, row {index} starts at {depth}")]
    InvalidDepth { index: usize, depth: f64 },
}

impl From<CrustalModelError> for MotionError {
    fn from(error: CrustalModelError) -> Self {
        MotionError::input_validation("INPUT.CRUSTAL_MODEL", error.to_string())
    }
}

/// Travel-time average over the top of a profile at one frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarterWavelength {
    pub depth: f64,
    pub velocity: f64,
    pub density: f64,
}

/// Layered profile, surface first. The last layer is the half-space; its
/// thickness is ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrustalModel {
    layers: Vec<CrustalLayer>,
}

/// Generic-rock profile used when no crustal model is supplied.
const GENERIC_ROCK_LAYERS: [CrustalLayer; 7] = [
    CrustalLayer::new(0.02, 1.0, 2.2),
    CrustalLayer::new(0.05, 1.5, 2.3),
    CrustalLayer::new(0.2, 2.0, 2.4),
    CrustalLayer::new(0.5, 2.5, 2.5),
    CrustalLayer::new(2.0, 3.0, 2.6),
    CrustalLayer::new(5.0, 3.3, 2.7),
    CrustalLayer::new(0.0, 3.5, 2.8),
];

impl CrustalModel {
    pub fn new(layers: Vec<CrustalLayer>) -> Result<Self, CrustalModelError> {
        let last = layers.len().saturating_sub(1);
        for (index, layer) in layers.iter().enumerate() {
            if index != last && !(layer.thickness.is_finite() && layer.thickness > 0.0) {
                return Err(CrustalModelError::NonPositiveThickness {
                    index,
                    value: layer.thickness,
                });
            }
            if !(layer.shear_velocity.is_finite() && layer.shear_velocity > 0.0) {
                return Err(CrustalModelError::NonPositiveVelocity {
                    index,
                    value: layer.shear_velocity,
                });
            }
            if !(layer.density.is_finite() && layer.density > 0.0) {
                return Err(CrustalModelError::NonPositiveDensity {
                    index,
                    value: layer.density,
                });
            }
        }

        Ok(Self { layers })
    }

    /// Builds a profile from `(depth to top, velocity, density)` rows; the
    /// first row must start at the surface.
    pub fn from_depth_rows(rows: &[(f64, f64, f64)]) -> Result<Self, CrustalModelError> {
        let mut layers = Vec::with_capacity(rows.len());
        for (index, &(depth, velocity, density)) in rows.iter().enumerate() {
            let valid_top = if index == 0 {
                depth == 0.0
            } else {
                depth.is_finite() && depth > rows[index - 1].0
            };
            if !valid_top {
                return Err(CrustalModelError::InvalidDepth { index, depth });
            }

            let thickness = rows
                .get(index + 1)
                .map(|next| next.0 - depth)
                .unwrap_or(0.0);
            layers.push(CrustalLayer::new(thickness, velocity, density));
        }

        Self::new(layers)
    }

    pub fn generic_rock() -> Self {
        Self {
            layers: GENERIC_ROCK_LAYERS.to_vec(),
        }
    }

    pub fn layers(&self) -> &[CrustalLayer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn half_space(&self) -> Option<&CrustalLayer> {
        self.layers.last()
    }

    /// Depth to the top of each layer; the half-space entry is its top.
    pub fn depth_to_top(&self) -> Vec<f64> {
        let mut depth = 0.0;
        self.layers
            .iter()
            .map(|layer| {
                let top = depth;
                depth += layer.thickness;
                top
            })
            .collect()
    }

    /// Depth at which the vertical S-wave travel time equals a quarter
    /// period, with the slowness and density averaged over that depth.
    pub fn quarter_wavelength(&self, frequency: f64) -> Option<QuarterWavelength> {
        let half_space = self.half_space()?;
        if !(frequency.is_finite() && frequency > 0.0) {
            return Some(QuarterWavelength {
                depth: f64::INFINITY,
                velocity: half_space.shear_velocity,
                density: half_space.density,
            });
        }

        let target_time = 1.0 / (4.0 * frequency);
        let last = self.layers.len() - 1;
        let mut time = 0.0;
        let mut depth = 0.0;
        let mut mass = 0.0;

        for (index, layer) in self.layers.iter().enumerate() {
            let layer_time = layer.thickness / layer.shear_velocity;
            if index == last || time + layer_time >= target_time {
                let partial = (target_time - time) * layer.shear_velocity;
                depth += partial;
                mass += partial * layer.density;
                break;
            }

            time += layer_time;
            depth += layer.thickness;
            mass += layer.thickness * layer.density;
        }

        Some(QuarterWavelength {
            depth,
            velocity: depth / target_time,
            density: mass / depth,
        })
    }

    /// Quarter-wavelength amplification relative to the half-space impedance.
    pub fn quarter_wavelength_amp(&self, frequency: f64) -> Option<f64> {
        let half_space = self.half_space()?;
        let average = self.quarter_wavelength(frequency)?;
        let ratio = (half_space.shear_velocity * half_space.density)
            / (average.velocity * average.density);
        Some(ratio.sqrt())
    }
}
