#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = ddm_struct::parse_structure(data, 'A');
});
