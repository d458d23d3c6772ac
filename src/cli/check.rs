use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use ipasc_data::io::load_data;
use ipasc_data::quality::{quality_check_pa_data, CheckerConfig};

/// Run the completeness and consistency checks on a file
pub fn run(file: PathBuf, mut config: CheckerConfig, quiet: bool) -> Result<()> {
    let pa_data = load_data(&file).with_context(|| format!("Failed to read {}", file.display()))?;

    if !quiet {
        config.verbose = true;
    }
    let passed = quality_check_pa_data(&pa_data, &config).context("Quality check failed to run")?;

    if passed {
        info!("{} passed all quality checks", file.display());
        println!("PASSED: {}", file.display());
        Ok(())
    } else {
        println!("FAILED: {}", file.display());
        std::process::exit(1);
    }
}
