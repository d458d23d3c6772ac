//! Interface implemented by vendor-format converters.

use log::{debug, info};

use crate::metadata::{acquisition_tags, MetaDatum};
use crate::value::{MetadataMap, NumericArray, Value};

use super::PaData;

/// Errors raised while converting vendor data
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Custom metadata key is empty
    #[error("A meta datum key must not be empty")]
    EmptyKey,

    /// Custom metadata value is null
    #[error("The value given for '{0}' must not be null")]
    NullValue(String),

    /// I/O error reading the vendor file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The vendor data could not be interpreted
    #[error("Invalid source data: {0}")]
    InvalidSource(String),
}

/// Converts one vendor recording into [`PaData`].
///
/// Implementors provide the tensor, the device map, and one value per
/// acquisition tag; the provided methods assemble the record.
pub trait Adapter {
    /// Produce the time series tensor `[detector, sample, wavelength * measurement]`
    fn generate_binary_data(&mut self) -> Result<NumericArray, AdapterError>;

    /// Produce the device map, usually via
    /// [`DeviceMetaDataCreator`](super::DeviceMetaDataCreator)
    fn generate_device_meta_data(&mut self) -> Result<MetadataMap, AdapterError>;

    /// Value for one acquisition tag, `None` if the source does not record it
    fn acquisition_value(&mut self, datum: &MetaDatum) -> Option<Value>;

    /// Additional fields outside the acquisition registry
    fn custom_meta_data(&mut self) -> Vec<(String, Value)> {
        Vec::new()
    }

    /// Query every acquisition tag and keep the non-null answers
    fn generate_acquisition_meta_data(&mut self) -> MetadataMap {
        let mut meta_data = MetadataMap::new();
        for datum in acquisition_tags::all() {
            match self.acquisition_value(datum) {
                Some(value) if !value.is_null() => {
                    meta_data.insert(datum.tag().to_string(), value);
                }
                _ => debug!("Adapter provides no value for {}", datum.tag()),
            }
        }
        meta_data
    }

    /// Assemble the complete record
    fn generate_pa_data(&mut self) -> Result<PaData, AdapterError> {
        let binary = self.generate_binary_data()?;
        let acquisition = self.generate_acquisition_meta_data();
        let device = self.generate_device_meta_data()?;

        let mut pa_data = PaData::from_parts(binary, acquisition, device);
        for (key, value) in self.custom_meta_data() {
            pa_data.add_custom_meta_datum(&key, value)?;
        }
        info!(
            "Adapter produced {} acquisition fields and {} device groups",
            pa_data.meta_data_acquisition.len(),
            pa_data.meta_data_device.len()
        );
        Ok(pa_data)
    }
}
