//! Upgrade of records written before the combined wavelength axis.
//!
//! Legacy (`V1` or unversioned) files store the tensor as
//! `[detector, sample, wavelength, measurement]`. The current layout merges
//! the last two axes into one axis of length `wavelengths * measurements`,
//! measurement-major: combined index `k = m * wavelengths + w`. The
//! acquisition wavelengths are tiled once per measurement so that entry `k`
//! still names the wavelength of slice `k`.

use log::{info, warn};

use crate::data::PaData;
use crate::metadata::{acquisition_tags, CURRENT_VERSION, LEGACY_VERSION};
use crate::value::{NumericArray, Value};

use super::error::ReadError;

/// What [`migrate`] did to a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Migration {
    /// Already in the current layout
    Current,
    /// Only the version tag was set
    Retagged,
    /// The tensor was reshaped from `from` to `to`
    Reshaped { from: Vec<usize>, to: Vec<usize> },
    /// The record carries a version or layout this build does not know
    Skipped(String),
}

impl Migration {
    /// True if the record was modified
    pub fn changed(&self) -> bool {
        matches!(self, Migration::Retagged | Migration::Reshaped { .. })
    }
}

fn set_version(pa_data: &mut PaData) {
    pa_data.set_acquisition_meta_datum(&acquisition_tags::VERSION, CURRENT_VERSION);
}

fn sizes_of(array: &NumericArray) -> Value {
    let sizes: Vec<i64> = array
        .shape()
        .iter()
        .map(|&len| i64::try_from(len).unwrap_or(i64::MAX))
        .collect();
    Value::Array(NumericArray::from_vec(sizes))
}

/// Bring a record to the current layout in place.
///
/// Values are only rearranged, never changed.
pub fn migrate(pa_data: &mut PaData) -> Result<Migration, ReadError> {
    match pa_data.get_acquisition_meta_datum(&acquisition_tags::VERSION) {
        None => {}
        Some(Value::Str(version)) if version == LEGACY_VERSION => {}
        Some(Value::Str(version)) if version == CURRENT_VERSION => return Ok(Migration::Current),
        Some(other) => {
            let reason = format!("unknown data version {other:?}");
            warn!("Not migrating record: {reason}");
            return Ok(Migration::Skipped(reason));
        }
    }

    let Some(tensor) = pa_data.binary_time_series_data.take() else {
        set_version(pa_data);
        return Ok(Migration::Retagged);
    };

    match tensor.ndim() {
        3 => {
            pa_data.binary_time_series_data = Some(tensor);
            set_version(pa_data);
            info!("Tagged three-axis record as {CURRENT_VERSION}");
            Ok(Migration::Retagged)
        }
        4 => {
            let from = tensor.shape().to_vec();
            let (wavelengths, measurements) = (from[2], from[3]);
            let to = vec![from[0], from[1], wavelengths * measurements];

            let reshaped = tensor
                .permuted_axes(&[0, 1, 3, 2])
                .into_shape(&to)
                .map_err(|e| ReadError::StorageFormat(format!("cannot merge tensor axes: {e}")))?;
            warn!(
                "Migrating tensor {from:?} -> {to:?}, assuming the same wavelengths repeat in every measurement"
            );

            tile_wavelengths(pa_data, wavelengths, measurements);
            if pa_data
                .meta_data_acquisition
                .contains_key(acquisition_tags::SIZES.tag())
            {
                pa_data.set_acquisition_meta_datum(&acquisition_tags::SIZES, sizes_of(&reshaped));
            }
            pa_data.binary_time_series_data = Some(reshaped);
            set_version(pa_data);
            Ok(Migration::Reshaped { from, to })
        }
        rank => {
            pa_data.binary_time_series_data = Some(tensor);
            let reason = format!("cannot migrate a rank-{rank} tensor");
            warn!("Not migrating record: {reason}");
            Ok(Migration::Skipped(reason))
        }
    }
}

fn tile_wavelengths(pa_data: &mut PaData, wavelengths: usize, measurements: usize) {
    let tag = acquisition_tags::ACQUISITION_WAVELENGTHS.tag();
    let Some(value) = pa_data.meta_data_acquisition.get_mut(tag) else {
        return;
    };
    let tiled = match value {
        Value::Array(array) if array.len() == wavelengths => array.tile(measurements),
        Value::Array(array) => {
            warn!(
                "{tag} holds {} entries but the tensor has {wavelengths} wavelengths, leaving it unchanged",
                array.len()
            );
            return;
        }
        other => {
            warn!("{tag} is {}, leaving it unchanged", other.kind_name());
            return;
        }
    };
    *value = Value::Array(tiled);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy(shape: &[usize]) -> PaData {
        let count: usize = shape.iter().product();
        let data: Vec<f64> = (0..count).map(|i| i as f64).collect();
        let mut pa_data = PaData::new();
        pa_data.set_binary_time_series_data(NumericArray::from_shape_vec(shape, data).unwrap());
        pa_data.set_acquisition_meta_datum(
            &acquisition_tags::ACQUISITION_WAVELENGTHS,
            NumericArray::from_vec(vec![700.0f64, 800.0]),
        );
        pa_data
    }

    #[test]
    fn test_combined_index_is_measurement_major() {
        let mut pa_data = legacy(&[1, 1, 2, 3]);
        let migration = migrate(&mut pa_data).unwrap();
        assert_eq!(
            migration,
            Migration::Reshaped {
                from: vec![1, 1, 2, 3],
                to: vec![1, 1, 6]
            }
        );

        // legacy element [0, 0, w, m] sits at flat index w * 3 + m
        let values: Vec<f64> = pa_data.binary_time_series_data.as_ref().unwrap().iter_f64().collect();
        assert_eq!(values, vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);

        let wavelengths: Vec<f64> = pa_data
            .get_acquisition_wavelengths()
            .and_then(Value::as_array)
            .unwrap()
            .iter_f64()
            .collect();
        assert_eq!(wavelengths, vec![700.0, 800.0, 700.0, 800.0, 700.0, 800.0]);
        assert_eq!(pa_data.version(), Some(CURRENT_VERSION));

        let sizes: Vec<f64> = pa_data.get_sizes().and_then(Value::as_array).unwrap().iter_f64().collect();
        assert_eq!(sizes, vec![1.0, 1.0, 6.0]);
    }

    #[test]
    fn test_legacy_tag_is_migrated() {
        let mut pa_data = legacy(&[2, 4, 2, 2]);
        pa_data.set_acquisition_meta_datum(&acquisition_tags::VERSION, LEGACY_VERSION);
        assert!(migrate(&mut pa_data).unwrap().changed());
        assert_eq!(pa_data.binary_time_series_data.unwrap().shape(), &[2, 4, 4]);
    }

    #[test]
    fn test_current_version_is_untouched() {
        let mut pa_data = legacy(&[2, 4, 2, 2]);
        pa_data.set_acquisition_meta_datum(&acquisition_tags::VERSION, CURRENT_VERSION);
        let before = pa_data.clone();
        assert_eq!(migrate(&mut pa_data).unwrap(), Migration::Current);
        assert_eq!(pa_data, before);
    }

    #[test]
    fn test_three_axis_record_is_retagged() {
        let mut pa_data = legacy(&[2, 4, 2]);
        let before = pa_data.binary_time_series_data.clone();
        assert_eq!(migrate(&mut pa_data).unwrap(), Migration::Retagged);
        assert_eq!(pa_data.binary_time_series_data, before);
        assert_eq!(pa_data.version(), Some(CURRENT_VERSION));
    }

    #[test]
    fn test_mismatched_wavelengths_are_kept() {
        let mut pa_data = legacy(&[1, 2, 3, 2]);
        assert!(migrate(&mut pa_data).unwrap().changed());
        let wavelengths = pa_data.get_acquisition_wavelengths().and_then(Value::as_array).unwrap();
        assert_eq!(wavelengths.len(), 2);
    }

    #[test]
    fn test_unknown_version_is_skipped() {
        let mut pa_data = legacy(&[1, 2, 2, 2]);
        pa_data.set_acquisition_meta_datum(&acquisition_tags::VERSION, "V9");
        assert!(matches!(migrate(&mut pa_data).unwrap(), Migration::Skipped(_)));
        assert_eq!(pa_data.binary_time_series_data.unwrap().ndim(), 4);
    }
}
