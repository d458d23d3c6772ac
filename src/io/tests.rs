use std::fs::File;
use std::io::Read;

use tempfile::tempdir;
use zip::{CompressionMethod, ZipArchive};

use super::*;
use crate::data::{sample_pa_data, SampleShape, DETECTORS};
use crate::metadata::{acquisition_tags, device_tags, CURRENT_VERSION};
use crate::storage::{StorageError, MANIFEST_ENTRY};
use crate::value::{MetadataMap, NumericArray};

fn sample() -> PaData {
    sample_pa_data(SampleShape {
        samples: 16,
        ..SampleShape::default()
    })
}

fn nested_list() -> Value {
    let mut roi = MetadataMap::new();
    roi.insert("name".into(), Value::from("vessel"));
    roi.insert("mask".into(), Value::Array(NumericArray::from_elem(&[4, 4], 1u8)));
    Value::List(vec![
        Value::Int(1),
        Value::Null,
        Value::List(vec![Value::from("a"), Value::Float(2.5), Value::List(vec![])]),
        Value::Map(roi),
        Value::Bool(false),
    ])
}

#[test]
fn test_roundtrip_full_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("record.ipasc");

    let mut pa_data = sample();
    pa_data
        .meta_data_acquisition
        .insert(acquisition_tags::PULSE_ENERGY.tag().to_string(), Value::Null);
    pa_data.add_custom_meta_datum("annotations", nested_list()).unwrap();
    pa_data.add_custom_meta_datum("operator_notes", Value::Bytes(vec![0, 159, 146, 150])).unwrap();

    write_data(&path, &pa_data, &WriterConfig::default()).unwrap();
    let loaded = load_data(&path).unwrap();

    assert_eq!(loaded, pa_data);
    // null stays an explicit entry
    assert_eq!(loaded.get_pulse_energy(), Some(&Value::Null));
    assert_eq!(loaded.get_custom_meta_datum("annotations"), Some(&nested_list()));
}

#[test]
fn test_roundtrip_long_list_keeps_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("long.ipasc");

    let mut pa_data = sample();
    let items: Vec<Value> = (0..1500).map(Value::from).collect();
    pa_data.add_custom_meta_datum("frame_ids", Value::List(items.clone())).unwrap();
    write_data(&path, &pa_data, &WriterConfig::fast_write()).unwrap();

    let archive = crate::storage::load(&path).unwrap();
    assert!(archive.container.get("meta_data/frame_ids/list/0000").is_some());
    assert!(archive.container.get("meta_data/frame_ids/list/1499").is_some());

    let loaded = load_data(&path).unwrap();
    assert_eq!(loaded.get_custom_meta_datum("frame_ids"), Some(&Value::List(items)));
}

#[test]
fn test_idempotent_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("twice.ipasc");

    let mut pa_data = sample();
    pa_data.add_custom_meta_datum("stale", Value::Int(1)).unwrap();
    write_data(&path, &pa_data, &WriterConfig::default()).unwrap();

    pa_data.meta_data_acquisition.shift_remove("stale");
    write_data(&path, &pa_data, &WriterConfig::default()).unwrap();
    let first = crate::storage::load(&path).unwrap();
    write_data(&path, &pa_data, &WriterConfig::default()).unwrap();
    let second = crate::storage::load(&path).unwrap();

    assert_eq!(first.container, second.container);
    assert!(second.container.get("meta_data/stale").is_none());
    assert_eq!(load_data(&path).unwrap(), pa_data);
}

#[test]
fn test_compression_settings() {
    let dir = tempdir().unwrap();
    let pa_data = sample();

    for (name, config, expected) in [
        ("deflate.ipasc", WriterConfig::max_compression(), CompressionMethod::Deflated),
        ("stored.ipasc", WriterConfig::uncompressed(), CompressionMethod::Stored),
    ] {
        let path = dir.path().join(name);
        write_data(&path, &pa_data, &config).unwrap();

        let mut zip = ZipArchive::new(File::open(&path).unwrap()).unwrap();
        assert_eq!(
            zip.by_name(BINARY_TIME_SERIES_DATA).unwrap().compression(),
            expected
        );
        // scalars are never compressed
        assert_eq!(
            zip.by_name("meta_data/overall_gain").unwrap().compression(),
            CompressionMethod::Stored
        );
        assert_eq!(load_data(&path).unwrap(), pa_data);
    }
}

#[test]
fn test_manifest() {
    let dir = tempdir().unwrap();
    let pa_data = sample();

    let path = dir.path().join("with_manifest.ipasc");
    write_data(&path, &pa_data, &WriterConfig::default()).unwrap();
    let manifest = crate::storage::load(&path).unwrap().manifest.unwrap();
    assert_eq!(manifest.data_version.as_deref(), Some(CURRENT_VERSION));
    assert_eq!(
        manifest.data_uuid.as_deref(),
        pa_data.get_data_uuid().and_then(Value::as_str)
    );

    let path = dir.path().join("without_manifest.ipasc");
    let config = WriterConfig {
        manifest: false,
        ..Default::default()
    };
    write_data(&path, &pa_data, &config).unwrap();
    let mut zip = ZipArchive::new(File::open(&path).unwrap()).unwrap();
    assert!(zip.by_name(MANIFEST_ENTRY).is_err());
    let mut mimetype = String::new();
    zip.by_index(0).unwrap().read_to_string(&mut mimetype).unwrap();
    assert_eq!(mimetype, crate::storage::IPASC_MIMETYPE);
}

#[test]
fn test_device_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("device.ipasc");
    write_data(&path, &sample(), &WriterConfig::default()).unwrap();

    let archive = crate::storage::load(&path).unwrap();
    let detectors = archive.container.group("meta_data_device/detectors").unwrap();
    assert_eq!(detectors.len(), 4);
    assert!(archive
        .container
        .dataset(&format!(
            "meta_data_device/{DETECTORS}/detector_2/{}",
            device_tags::DETECTOR_POSITION.tag()
        ))
        .is_some());
}

#[test]
fn test_write_errors() {
    let dir = tempdir().unwrap();

    assert!(matches!(
        write_data("", &sample(), &WriterConfig::default()),
        Err(WriteError::EmptyPath)
    ));

    let path = dir.path().join("reserved.ipasc");
    let mut pa_data = sample();
    pa_data.add_custom_meta_datum("list", Value::Int(3)).unwrap();
    assert!(matches!(
        write_data(&path, &pa_data, &WriterConfig::default()),
        Err(WriteError::Serialization { .. })
    ));
    // a failed write leaves nothing behind
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_read_errors() {
    let dir = tempdir().unwrap();

    let missing = dir.path().join("missing.ipasc");
    assert!(matches!(
        load_data(&missing),
        Err(ReadError::Storage(StorageError::IoError(_)))
    ));

    let garbage = dir.path().join("garbage.ipasc");
    std::fs::write(&garbage, b"definitely not a zip archive").unwrap();
    assert!(matches!(
        load_data(&garbage),
        Err(ReadError::Storage(StorageError::ZipError(_)))
    ));
}

#[test]
fn test_legacy_file_is_migrated_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.ipasc");

    let data: Vec<f32> = (0..2 * 8 * 2 * 3).map(|i| i as f32).collect();
    let mut pa_data = PaData::new();
    pa_data.set_binary_time_series_data(NumericArray::from_shape_vec(&[2, 8, 2, 3], data).unwrap());
    pa_data.set_acquisition_meta_datum(
        &acquisition_tags::ACQUISITION_WAVELENGTHS,
        NumericArray::from_vec(vec![750.0f64, 850.0]),
    );
    write_data(&path, &pa_data, &WriterConfig::default()).unwrap();

    let raw = load_data_raw(&path).unwrap();
    assert_eq!(raw.binary_time_series_data.as_ref().unwrap().shape(), &[2, 8, 2, 3]);
    assert_eq!(raw.version(), None);

    let loaded = load_data(&path).unwrap();
    assert_eq!(loaded.binary_time_series_data.as_ref().unwrap().shape(), &[2, 8, 6]);
    assert_eq!(loaded.version(), Some(CURRENT_VERSION));
    assert_eq!(
        loaded
            .get_acquisition_wavelengths()
            .and_then(Value::as_array)
            .map(NumericArray::len),
        Some(6)
    );
}
