use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Result;
use zip::{CompressionMethod, ZipArchive};

use crate::data::PaData;
use crate::io::{read_pa_data, BINARY_TIME_SERIES_DATA, META_DATA, META_DATA_DEVICE};
use crate::storage::{self, Manifest, FORMAT_VERSION, IPASC_MIMETYPE, MANIFEST_ENTRY, MIMETYPE_ENTRY};

use super::{ValidationCheck, ValidationReport};

/// Step 1: Structure validation.
///
/// Returns the decoded record, or `None` once a check failed that makes
/// the remaining steps meaningless.
pub(crate) fn check_structure(path: &Path, report: &mut ValidationReport) -> Result<Option<PaData>> {
    if !path.is_file() {
        report.add_check(ValidationCheck::failed(
            "File exists",
            format!("Not a file: {}", path.display()),
        ));
        return Ok(None);
    }
    report.add_check(ValidationCheck::ok("File exists"));

    let mut archive = match ZipArchive::new(BufReader::new(File::open(path)?)) {
        Ok(archive) => archive,
        Err(e) => {
            report.add_check(ValidationCheck::failed(
                "Format: ZIP container",
                format!("Not a ZIP archive: {e}"),
            ));
            return Ok(None);
        }
    };
    report.add_check(ValidationCheck::ok("Format: ZIP container"));

    if archive.len() == 0 {
        report.add_check(ValidationCheck::failed("ZIP structure", "Empty ZIP archive"));
        return Ok(None);
    }

    check_mimetype(&mut archive, report)?;
    check_manifest(&mut archive, report)?;
    drop(archive);

    let decoded = match storage::read_archive(BufReader::new(File::open(path)?)) {
        Ok(decoded) => decoded,
        Err(e) => {
            report.add_check(ValidationCheck::failed("Dataset records decode", e.to_string()));
            return Ok(None);
        }
    };
    report.add_check(ValidationCheck::ok(format!(
        "Dataset records decode ({} datasets)",
        decoded.container.root().dataset_count()
    )));

    let root = decoded.container.root();
    let mut complete = true;
    for (name, is_group) in [
        (BINARY_TIME_SERIES_DATA, false),
        (META_DATA, true),
        (META_DATA_DEVICE, true),
    ] {
        let (present, expected) = if is_group {
            (root.group(name).is_some(), "group")
        } else {
            (root.dataset(name).is_some(), "dataset")
        };
        complete &= present;
        report.add_check(ValidationCheck::require(
            format!("{name} exists"),
            present,
            format!("Missing required {expected} \"{name}\""),
        ));
    }
    if !complete {
        return Ok(None);
    }

    match read_pa_data(&decoded.container) {
        Ok(pa_data) => {
            report.add_check(ValidationCheck::ok("Record reads back"));
            Ok(Some(pa_data))
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed("Record reads back", e.to_string()));
            Ok(None)
        }
    }
}

fn check_mimetype<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    report: &mut ValidationReport,
) -> Result<()> {
    {
        let first_entry = archive.by_index(0)?;
        report.add_check(ValidationCheck::require(
            "mimetype is first entry",
            first_entry.name() == MIMETYPE_ENTRY,
            format!("First entry must be '{MIMETYPE_ENTRY}', found: {}", first_entry.name()),
        ));
        report.add_check(ValidationCheck::require(
            "mimetype is uncompressed",
            first_entry.compression() == CompressionMethod::Stored,
            "mimetype entry must be uncompressed (Stored)",
        ));
    }

    match archive.by_name(MIMETYPE_ENTRY) {
        Ok(mut entry) => {
            let mut content = String::new();
            entry.read_to_string(&mut content)?;
            report.add_check(ValidationCheck::require(
                format!("mimetype = {IPASC_MIMETYPE}"),
                content == IPASC_MIMETYPE,
                format!("Expected '{IPASC_MIMETYPE}', found: '{content}'"),
            ));
        }
        Err(_) => report.add_check(ValidationCheck::failed(
            "mimetype entry exists",
            "Missing mimetype entry",
        )),
    }
    Ok(())
}

fn check_manifest<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    report: &mut ValidationReport,
) -> Result<()> {
    let content = match archive.by_name(MANIFEST_ENTRY) {
        Ok(mut entry) => {
            let mut content = Vec::new();
            entry.read_to_end(&mut content)?;
            content
        }
        Err(_) => {
            report.add_check(ValidationCheck::warning(
                "manifest.json exists",
                "No manifest.json in container",
            ));
            return Ok(());
        }
    };

    let manifest: Manifest = match serde_json::from_slice(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            report.add_check(ValidationCheck::failed(
                "manifest.json valid JSON",
                format!("Failed to parse manifest.json: {e}"),
            ));
            return Ok(());
        }
    };
    report.add_check(ValidationCheck::ok("manifest.json valid JSON"));

    if manifest.format_version == FORMAT_VERSION {
        report.add_check(ValidationCheck::ok(format!(
            "Format version matches ({FORMAT_VERSION})"
        )));
    } else {
        report.add_check(ValidationCheck::warning(
            "Format version",
            format!("Expected {FORMAT_VERSION}, found {}", manifest.format_version),
        ));
    }

    if manifest.created_at().is_none() {
        report.add_check(ValidationCheck::warning(
            "Creation time",
            format!("\"{}\" is not an RFC 3339 timestamp", manifest.created),
        ));
    }
    Ok(())
}
