//! Manifest entry of the IPASC container.
//!
//! `manifest.json` declares the container layout revision and the metadata
//! revision of the stored record, so readers can decide how to interpret the
//! tree before decoding any dataset.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Revision of the ZIP layout and dataset record codec
pub const FORMAT_VERSION: &str = "1.0";

/// Manifest stored as `manifest.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Container layout revision (e.g. "1.0")
    pub format_version: String,
    /// Metadata revision of the stored record (e.g. "V2"), if it declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    /// RFC 3339 timestamp of when the file was written
    pub created: String,
    /// Name and version of the writing library
    pub writer: String,
    /// `uuid` of the stored record, if it carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_uuid: Option<String>,
}

impl Manifest {
    /// Manifest for a record of metadata revision `data_version`, stamped now
    pub fn new(data_version: Option<String>, data_uuid: Option<String>) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            data_version,
            created: Utc::now().to_rfc3339(),
            writer: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            data_uuid,
        }
    }

    /// Parsed creation time, `None` if the stamp is not RFC 3339
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created).ok()
    }
}
