#![no_main]

use libfuzzer_sys::fuzz_target;
use slurm2json::hostlist::expand;

fuzz_target!(|data: &[u8]| {
    // Expansion must either succeed or return an error, never panic
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = expand(input);
    }
});
