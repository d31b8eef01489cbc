#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use xcms_experiment::table::{LinksTable, RowTableCodec};

fuzz_target!(|data: &[u8]| {
    // Parsing may fail but must never panic
    for preamble in [0, 1] {
        let codec = RowTableCodec::new(preamble);
        if let Ok(table) = codec.read(Cursor::new(data)) {
            let mut written = Vec::new();
            let _ = codec.write(&table, &mut written);
            let _ = table.header_only();
        }
    }

    let _ = LinksTable::read(Cursor::new(data));
});
