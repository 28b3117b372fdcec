mod amplification;
mod model;

pub use amplification::{CrustalAmpModel, CrustalAmplification, CrustalAmplificationError};
pub use model::{CrustalLayer, CrustalModel, CrustalModelError, QuarterWavelength};
