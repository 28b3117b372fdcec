use super::CliError;
use anyhow::Context;
use rvtmotion_core::common::config::{MotionConfig, load_motion_config};
use rvtmotion_core::domain::MotionError;
use rvtmotion_core::modules::serialization::write_text_artifact;
use rvtmotion_core::SourceModel;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub(super) fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A second initialization in the same process keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub(super) fn parse_source_model(value: &str) -> Result<SourceModel, String> {
    value.parse()
}

pub(super) fn load_scenario(path: Option<&Path>) -> Result<MotionConfig, CliError> {
    match path {
        Some(path) => load_motion_config(path)
            .map_err(MotionError::from)
            .map_err(CliError::from),
        None => Ok(MotionConfig::default()),
    }
}

pub(super) fn emit_output(path: Option<&Path>, content: &str) -> Result<(), CliError> {
    let Some(path) = path else {
        print!("{content}");
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    write_text_artifact(path, content)
        .with_context(|| format!("failed to write output '{}'", path.display()))?;
    Ok(())
}
