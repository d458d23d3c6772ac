use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ipasc_data::data::SampleShape;

mod check;
mod config;
mod demo;
mod inspect;
mod migrate;
mod validate;

pub use config::Config;

/// ipasc - IPASC photoacoustic data files
#[derive(Parser)]
#[command(name = "ipasc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Dimensions of the synthetic recording written by `demo`
#[derive(Args)]
struct DemoShape {
    /// Number of illumination elements
    #[arg(long, default_value_t = 2)]
    illuminators: usize,

    /// Number of detection elements
    #[arg(long, default_value_t = 4)]
    detectors: usize,

    /// Time samples per detector
    #[arg(long, default_value_t = 2048)]
    samples: usize,

    /// Distinct excitation wavelengths
    #[arg(long, default_value_t = 2)]
    wavelengths: usize,

    /// Measurements per wavelength
    #[arg(long, default_value_t = 3)]
    measurements: usize,
}

impl From<DemoShape> for SampleShape {
    fn from(arg: DemoShape) -> Self {
        SampleShape {
            illuminators: arg.illuminators,
            detectors: arg.detectors,
            samples: arg.samples,
            wavelengths: arg.wavelengths,
            measurements: arg.measurements,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print metadata and tensor layout as JSON
    Inspect {
        /// Input IPASC file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Validate IPASC file integrity and compliance
    Validate {
        /// Input IPASC file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Run the metadata completeness and consistency checks
    Check {
        /// Input IPASC file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only print the verdict
        #[arg(short, long)]
        quiet: bool,
    },

    /// Rewrite a file in the current tensor layout
    Migrate {
        /// Input IPASC file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output IPASC file path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Generate a synthetic recording for testing
    Demo {
        /// Output IPASC file path
        #[arg(value_name = "OUTPUT", default_value = "demo.ipasc")]
        output: PathBuf,

        #[command(flatten)]
        shape: DemoShape,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Inspect { file } => inspect::run(file),
        Commands::Validate { file } => validate::run(file),
        Commands::Check { file, quiet } => check::run(file, config.quality_control, quiet),
        Commands::Migrate { input, output } => {
            migrate::run(input, output, config.writer_config()?)
        }
        Commands::Demo { output, shape } => {
            demo::run(output, shape.into(), config.writer_config()?)
        }
    }
}
