mod commands;
mod helpers;

use clap::Parser;
use rvtmotion_core::domain::MotionError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let motion_error = error.as_motion_error();
            eprintln!("{}", motion_error.diagnostic_line());
            eprintln!("{}", motion_error.fatal_exit_line());
            motion_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("rvtmotion".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_tracing(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "rvtmotion",
    version,
    about = "Point-source stochastic ground motions with random vibration theory"
)]
struct Cli {
    /// Log calculation details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Calculate the Fourier amplitude and response spectra of a scenario
    Calculate(commands::CalculateArgs),
    /// List the source model presets
    Regions,
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Calculate(args) => commands::run_calculate_command(args),
        CliCommand::Regions => commands::run_regions_command(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(MotionError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<MotionError> for CliError {
    fn from(error: MotionError) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_motion_error(&self) -> MotionError {
        match self {
            Self::Usage(message) => {
                MotionError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => MotionError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, run};

    #[test]
    fn unknown_subcommand_is_a_usage_error() {
        let error = run(["simulate"]).expect_err("unknown command should fail");
        assert!(matches!(error, CliError::Usage(_)));
        assert_eq!(error.as_motion_error().exit_code(), 2);
        assert_eq!(error.as_motion_error().placeholder(), "INPUT.CLI_USAGE");
    }

    #[test]
    fn help_exits_successfully() {
        assert_eq!(run(["--help"]).expect("help should succeed"), 0);
    }

    #[test]
    fn internal_errors_map_to_io_exit_code() {
        let error = CliError::from(anyhow::anyhow!("disk full"));
        let motion_error = error.as_motion_error();
        assert_eq!(motion_error.exit_code(), 3);
        assert!(motion_error.message().contains("disk full"));
    }
}
