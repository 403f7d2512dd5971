#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::{from_bytes, from_bytes_with_opts, to_bytes, DeOpts};

fuzz_target!(|data: &[u8]| {
    let opts = DeOpts::new().max_seq_len(100).max_depth(64);
    if let Ok(v) = from_bytes_with_opts(data, opts) {
        // Anything decoded must encode, and decode again.
        let bs = to_bytes(&v).unwrap();
        from_bytes(&bs).unwrap();
    }
});
