#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

// Arbitrary bytes must be rejected with an error, never a panic.
fuzz_target!(|data: &[u8]| {
    let Ok(archive) = ipasc_data::storage::read_archive(Cursor::new(data)) else {
        return;
    };
    if let Ok(mut pa_data) = ipasc_data::io::read_pa_data(&archive.container) {
        let _ = ipasc_data::io::migrate(&mut pa_data);
        let _ = ipasc_data::io::write_pa_data(&pa_data);
    }
});
