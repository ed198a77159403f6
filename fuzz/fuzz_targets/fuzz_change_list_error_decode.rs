#![no_main]

use baclist_core::encoding::reader::Reader;
use baclist_core::services::ChangeListError;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut r = Reader::new(data);
    let _ = ChangeListError::decode_apdu(&mut r);
});
