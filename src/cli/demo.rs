use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use ipasc_data::data::{sample_pa_data, SampleShape};
use ipasc_data::io::{write_data, WriterConfig};

/// Write a synthetic recording
pub fn run(output: PathBuf, shape: SampleShape, config: WriterConfig) -> Result<()> {
    info!(
        "Generating {} illuminators, {} detectors, {} samples, {} wavelengths x {} measurements",
        shape.illuminators, shape.detectors, shape.samples, shape.wavelengths, shape.measurements
    );
    let pa_data = sample_pa_data(shape);

    write_data(&output, &pa_data, &config)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let file_size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
    info!(
        "Wrote {} ({} bytes, {:.2} MB)",
        output.display(),
        file_size,
        file_size as f64 / 1024.0 / 1024.0
    );
    println!("{}", output.display());
    Ok(())
}
