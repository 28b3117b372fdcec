mod model;
mod params;
mod region;

pub use model::PointSourceModel;
pub use params::SourceParameters;
pub use region::{GeometricSpreading, RegionModel, RegionPreset, SourceModel};
