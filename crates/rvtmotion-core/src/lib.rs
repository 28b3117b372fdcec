pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;

pub use common::config::{MotionConfig, load_motion_config};
pub use domain::{MotionError, MotionErrorCategory, MotionResult, SourceField};
pub use modules::crustal::{CrustalAmpModel, CrustalAmplification, CrustalLayer, CrustalModel};
pub use modules::dimension::{Dimension, Spacing};
pub use modules::rvt::{OscillatorCorrection, PeakFactorMethod, RvtEngine};
pub use modules::source_theory::{RegionModel, SourceModel, SourceParameters};
pub use modules::spectra::{FourierSpectrum, ResponseSpectrum};
pub use modules::{MotionCalculator, MotionOutput, SourceTheoryRvtMotion};
