#![no_main]

use baclist_core::encoding::{reader::Reader, writer::Writer};
use baclist_core::registry::StandardRegistry;
use baclist_core::services::ListElementRequest;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let registry = StandardRegistry::new();
    let mut r = Reader::new(data);
    if let Ok(request) = ListElementRequest::decode(&mut r, &registry) {
        // Anything that decodes must encode again.
        let mut buf = vec![0u8; data.len() + 64];
        let mut w = Writer::new(&mut buf);
        request.encode(&mut w).expect("decoded request must re-encode");
    }
});
