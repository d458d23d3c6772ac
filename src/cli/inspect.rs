use anyhow::{Context, Result};
use serde_json::json;
use std::path::PathBuf;

use ipasc_data::io::load_data_raw;
use ipasc_data::value::Value;

/// Print the metadata and tensor layout of a file as JSON
pub fn run(file: PathBuf) -> Result<()> {
    let pa_data = load_data_raw(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let tensor = pa_data
        .binary_time_series_data
        .as_ref()
        .map(|array| json!({ "dtype": array.dtype().name(), "shape": array.shape() }));

    let summary = json!({
        "file": file.display().to_string(),
        "binary_time_series_data": tensor,
        "meta_data": Value::Map(pa_data.meta_data_acquisition.clone()).to_json(),
        "meta_data_device": Value::Map(pa_data.meta_data_device.clone()).to_json(),
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("Failed to render JSON")?
    );
    Ok(())
}
