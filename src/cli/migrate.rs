use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use ipasc_data::io::{load_data_raw, migrate, write_data, Migration, WriterConfig};

/// Rewrite a file in the current tensor layout
pub fn run(input: PathBuf, output: PathBuf, config: WriterConfig) -> Result<()> {
    let mut pa_data = load_data_raw(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    match migrate(&mut pa_data).context("Migration failed")? {
        Migration::Current => info!("{} is already current", input.display()),
        Migration::Retagged => info!("Retagged {}", input.display()),
        Migration::Reshaped { from, to } => info!("Reshaped tensor {from:?} -> {to:?}"),
        Migration::Skipped(reason) => warn!("Left unchanged: {reason}"),
    }

    write_data(&output, &pa_data, &config)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {}", output.display());
    Ok(())
}
