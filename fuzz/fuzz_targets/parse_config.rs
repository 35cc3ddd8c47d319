#![no_main]

use libfuzzer_sys::fuzz_target;
use slurm2json::parse_config;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = parse_config(input);
    }
});
