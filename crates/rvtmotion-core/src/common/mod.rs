pub mod config;
pub mod constants;

pub use config::{
    AmplificationTable, ConfigError, CrustalAmplificationConfig, DimensionConfig, MotionConfig,
    load_motion_config,
};
