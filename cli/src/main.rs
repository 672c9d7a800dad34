//! Tetra mesh converter command line.
//!
//! One binary replaces the HTTP front ends with a fixed command table. Every
//! command prints a JSON document on stdout; logs go to stderr.
//!
//! # Commands
//!
//! - `tetra convert` - Generate a mesh and export it as OBJ, STL, PLY or all three
//! - `tetra locate <FILE>` - Resolve a download name to a stored artifact
//! - `tetra status` - Describe the service
//! - `tetra health` - Liveness check with a timestamp
//!
//! # Exit Codes
//!
//! `0` on success, `2` for invalid requests (bad budget, unsupported
//! format, malformed name), `3` when an artifact is not found, `4` for mesh
//! invariant failures, `5` for file system errors.

mod convert;
mod logging;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mesh_convert::{ConvertConfig, Converter, DEFAULT_OUTPUT_DIR, HealthReport};

/// Tetra mesh converter
///
/// Generates budgeted triangle meshes and exports them to OBJ, STL and PLY.
#[derive(Parser, Debug)]
#[command(name = "tetra")]
#[command(about = "Generate and export 3D meshes", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (otherwise `RUST_LOG`, default `warn`)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a mesh and export it
    Convert(convert::ConvertArgs),

    /// Resolve a download name (`<modelId>.<ext>`) to its artifact
    Locate {
        /// The artifact file name
        #[arg(name = "FILE")]
        file_name: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Describe the service and its supported formats
    Status {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Report liveness with a timestamp
    Health,
}

/// Where artifacts live.
#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Artifact root directory
    #[arg(
        long = "out",
        short = 'o',
        env = "TETRA_OUTPUT_DIR",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    output_dir: PathBuf,
}

impl OutputArgs {
    fn config(&self) -> ConvertConfig {
        ConvertConfig::new(&self.output_dir)
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Convert(args) => convert::run(&args),
        Commands::Locate { file_name, output } => {
            let converter = Converter::new(output.config());
            output::print_json(&converter.locate(&file_name)?)
        }
        Commands::Status { output } => {
            output::print_json(&Converter::new(output.config()).status())
        }
        Commands::Health => output::print_json(&HealthReport::now()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => output::report_error(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_table_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_status_with_output_dir() {
        let cli = Cli::try_parse_from(["tetra", "status", "--out", "/srv/tetra"]).unwrap();
        match cli.command {
            Commands::Status { output } => {
                assert_eq!(output.output_dir, PathBuf::from("/srv/tetra"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["tetra", "health", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Health));
    }

    #[test]
    fn locate_requires_name() {
        assert!(Cli::try_parse_from(["tetra", "locate"]).is_err());
    }
}
