pub mod crustal;
pub mod dimension;
pub mod motion;
pub mod rvt;
pub mod serialization;
pub mod source_theory;
pub mod spectra;

mod traits;

pub use motion::{MotionOutput, SourceTheoryRvtMotion};
pub use traits::{LazyMotion, MotionCalculator};
