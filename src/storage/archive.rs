use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use log::{debug, info, warn};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::codec::Dataset;
use super::error::StorageError;
use super::manifest::Manifest;
use super::tree::{Container, Node};
use super::{IPASC_MIMETYPE, MANIFEST_ENTRY, MIMETYPE_ENTRY};

/// How a container is laid out in the archive
#[derive(Debug, Clone, Default)]
pub struct ArchiveOptions {
    /// Deflate level for array datasets; `None` stores them uncompressed
    pub deflate_level: Option<i64>,
    /// Manifest to embed as `manifest.json`
    pub manifest: Option<Manifest>,
}

/// A container read back from an archive
#[derive(Debug, Clone)]
pub struct Archive {
    pub container: Container,
    pub manifest: Option<Manifest>,
}

fn stored() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .unix_permissions(0o644)
}

/// Serialize `container` as a ZIP archive into `writer`.
///
/// The mimetype is the first entry and is never compressed.
pub fn write_archive<W: Write + Seek>(
    container: &Container,
    writer: W,
    options: &ArchiveOptions,
) -> Result<W, StorageError> {
    let mut zip_writer = ZipWriter::new(writer);

    zip_writer.start_file(MIMETYPE_ENTRY, stored())?;
    zip_writer.write_all(IPASC_MIMETYPE.as_bytes())?;

    if let Some(manifest) = &options.manifest {
        let json = serde_json::to_string_pretty(manifest)?;
        let deflated = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);
        zip_writer.start_file(MANIFEST_ENTRY, deflated)?;
        zip_writer.write_all(json.as_bytes())?;
    }

    for (path, node) in container.entries() {
        match node {
            Node::Group(_) => {
                zip_writer.add_directory(path.as_str(), stored().unix_permissions(0o755))?;
            }
            Node::Dataset(dataset) => {
                let bytes = dataset.encode()?;
                let entry_options = match options.deflate_level {
                    Some(level) if dataset.is_array() => SimpleFileOptions::default()
                        .compression_method(CompressionMethod::Deflated)
                        .compression_level(Some(level))
                        .unix_permissions(0o644),
                    _ => stored(),
                }
                .large_file(bytes.len() as u64 >= u64::from(u32::MAX));
                debug!("Writing {} ({} bytes)", path, bytes.len());
                zip_writer.start_file(path.as_str(), entry_options)?;
                zip_writer.write_all(&bytes)?;
            }
        }
    }

    Ok(zip_writer.finish()?)
}

/// Parse a ZIP archive into a container.
///
/// Any entry that is not the mimetype, the manifest, a directory, or a
/// decodable dataset record makes the archive invalid.
pub fn read_archive<R: Read + Seek>(reader: R) -> Result<Archive, StorageError> {
    let mut zip = ZipArchive::new(reader)?;
    let mut container = Container::new();
    let mut manifest = None;
    let mut mimetype_seen = false;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let name = entry.name().to_string();

        if name == MIMETYPE_ENTRY {
            let mut content = String::new();
            entry.read_to_string(&mut content).map_err(|_| {
                StorageError::InvalidFormat("mimetype entry is not valid UTF-8".to_string())
            })?;
            if content.trim() != IPASC_MIMETYPE {
                return Err(StorageError::InvalidFormat(format!(
                    "unexpected mimetype \"{}\"",
                    content.trim()
                )));
            }
            if index != 0 {
                warn!("mimetype is entry {index}, expected it first");
            }
            mimetype_seen = true;
            continue;
        }

        if name == MANIFEST_ENTRY {
            let mut content = Vec::new();
            entry.read_to_end(&mut content)?;
            manifest = Some(serde_json::from_slice::<Manifest>(&content)?);
            continue;
        }

        if entry.is_dir() {
            container.require_group(&name)?;
            continue;
        }

        let mut bytes = Vec::with_capacity(entry.size().min(1 << 20) as usize);
        entry.read_to_end(&mut bytes)?;
        let dataset = Dataset::decode(&bytes).map_err(|source| StorageError::Dataset {
            path: name.clone(),
            source,
        })?;
        debug!("Read {} as {}", name, dataset.describe());
        container.insert_dataset(&name, dataset)?;
    }

    if !mimetype_seen {
        return Err(StorageError::InvalidFormat(
            "archive has no mimetype entry".to_string(),
        ));
    }

    Ok(Archive { container, manifest })
}

/// Write `container` to `path` atomically.
///
/// The archive is staged in a temporary file next to `path` and renamed into
/// place once complete, replacing any previous file.
pub fn save<P: AsRef<Path>>(
    container: &Container,
    path: P,
    options: &ArchiveOptions,
) -> Result<(), StorageError> {
    let path = path.as_ref();
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp_file = NamedTempFile::new_in(directory)?;
    let buf_writer = BufWriter::new(temp_file);
    let mut buf_writer = write_archive(container, buf_writer, options)?;
    buf_writer.flush()?;
    let temp_file = buf_writer.into_inner().map_err(|e| e.into_error())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    info!(
        "Wrote {} ({} datasets)",
        path.display(),
        container.root().dataset_count()
    );
    Ok(())
}

/// Read the archive at `path`
pub fn load<P: AsRef<Path>>(path: P) -> Result<Archive, StorageError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let archive = read_archive(BufReader::new(file))?;
    info!(
        "Read {} ({} datasets)",
        path.display(),
        archive.container.root().dataset_count()
    );
    Ok(archive)
}
