#![no_main]

use libfuzzer_sys::fuzz_target;
use ipasc_data::storage::Dataset;

fuzz_target!(|data: &[u8]| {
    // Decoding never panics, and the re-encoded form decodes to itself
    if let Ok(dataset) = Dataset::decode(data) {
        let encoded = dataset.encode().expect("encoding into memory");
        let again = Dataset::decode(&encoded).expect("re-encoded record decodes");
        assert_eq!(again.encode().expect("encoding into memory"), encoded);
    }
});
