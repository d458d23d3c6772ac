//! TOML configuration file support.
//!
//! Settings that would otherwise need several flags can live in a config file:
//!
//! ```toml
//! # ipasc.toml
//! [writer]
//! compression = "deflate"
//! compression_level = 9
//! manifest = true
//!
//! [quality_control]
//! verbose = true
//! log_file = "qc.md"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use ipasc_data::io::{CompressionType, WriterConfig};
use ipasc_data::quality::CheckerConfig;

/// Root configuration structure for ipasc.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Settings for commands that write files.
    #[serde(default)]
    pub writer: WriterSection,

    /// Reporting settings for the quality checkers.
    #[serde(default)]
    pub quality_control: CheckerConfig,
}

/// The `[writer]` table.
#[derive(Debug, Default, Deserialize)]
pub struct WriterSection {
    /// `"deflate"` or `"none"`.
    pub compression: Option<String>,

    /// Deflate level (0-9).
    pub compression_level: Option<i64>,

    /// Embed `manifest.json`.
    pub manifest: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load `path` if given, the defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Writer settings with the `[writer]` overrides applied.
    pub fn writer_config(&self) -> Result<WriterConfig> {
        let mut config = WriterConfig::default();
        let level = self.writer.compression_level;
        config.compression = match self.writer.compression.as_deref() {
            None | Some("deflate") => match level {
                Some(level) => CompressionType::Deflate(level),
                None => CompressionType::balanced(),
            },
            Some("none") => CompressionType::Uncompressed,
            Some(other) => bail!("Unknown compression \"{other}\", expected \"deflate\" or \"none\""),
        };
        if let Some(manifest) = self.writer.manifest {
            config.manifest = manifest;
        }
        Ok(config)
    }
}
