use super::CliError;
use super::helpers::{emit_output, load_scenario, parse_source_model};
use rvtmotion_core::domain::{MotionError, SourceField};
use rvtmotion_core::modules::serialization::{MotionReport, format_fixed_f64};
use rvtmotion_core::{SourceModel, SourceTheoryRvtMotion};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(super) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(clap::Args)]
pub(super) struct CalculateArgs {
    /// JSON scenario file
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Source model preset (WUS, CEUS or Custom)
    #[arg(long, value_parser = parse_source_model)]
    region: Option<SourceModel>,

    /// Moment magnitude
    #[arg(long)]
    magnitude: Option<f64>,

    /// Epicentral distance [km]
    #[arg(long)]
    distance: Option<f64>,

    /// Hypocentral depth [km]
    #[arg(long)]
    depth: Option<f64>,

    /// Stress drop [bars]; only editable for the Custom source model
    #[arg(long)]
    stress_drop: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(super) fn run_calculate_command(args: CalculateArgs) -> Result<i32, CliError> {
    let mut config = load_scenario(args.scenario.as_deref())?;
    if let Some(region) = args.region {
        config.source_model = region;
    }

    let mut motion = SourceTheoryRvtMotion::from_config(&config)?;
    let overrides = [
        (SourceField::MomentMag, args.magnitude),
        (SourceField::Distance, args.distance),
        (SourceField::Depth, args.depth),
        (SourceField::StressDrop, args.stress_drop),
    ];
    for (field, value) in overrides {
        let Some(value) = value else {
            continue;
        };
        if !motion.set_parameter(field, value) {
            return Err(MotionError::input_validation(
                "INPUT.CLI_PARAMETER",
                format!(
                    "cannot set {} = {} with source model {}",
                    field,
                    value,
                    motion.source_model()
                ),
            )
            .into());
        }
    }

    motion.calculate()?;
    let report = MotionReport::from_motion(&motion).ok_or_else(|| {
        MotionError::internal("INTERNAL.CLI_REPORT", "motion has no calculated output")
    })?;
    let content = match args.format {
        OutputFormat::Table => report.to_text(),
        OutputFormat::Json => report.to_json().map_err(|error| {
            MotionError::internal("INTERNAL.CLI_JSON", format!("failed to encode report: {error}"))
        })?,
    };

    debug!(name = motion.name(), format = ?args.format, "writing motion report");
    emit_output(args.output.as_deref(), &content)?;
    Ok(0)
}

pub(super) fn run_regions_command() -> Result<i32, CliError> {
    let mut out = String::new();
    for (index, model) in SourceModel::ALL.iter().enumerate() {
        out.push_str(&format!("{index}: {model}\n"));
        let Some(preset) = model.preset() else {
            out.push_str("    all parameters editable\n");
            continue;
        };

        let rows = [
            ("stressDrop", preset.stress_drop, 1),
            ("geoAtten", preset.geo_atten, 2),
            ("pathDurCoeff", preset.path_dur_coeff, 3),
            ("pathAttenCoeff", preset.path_atten_coeff, 1),
            ("pathAttenPower", preset.path_atten_power, 2),
            ("shearVelocity", preset.shear_velocity, 2),
            ("density", preset.density, 2),
            ("siteAtten", preset.site_atten, 3),
            ("nearFieldLimit", preset.spreading.near_field_limit, 1),
            ("plateauLimit", preset.spreading.plateau_limit, 1),
        ];
        for (label, value, precision) in rows {
            out.push_str(&format!(
                "    {label:<16}{}\n",
                format_fixed_f64(value, 10, precision)
            ));
        }
        out.push_str(&format!("    {:<16}{:>10}\n", "crustalAmp", preset.crustal_amp.as_str()));
    }

    print!("{out}");
    Ok(0)
}
