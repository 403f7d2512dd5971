#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::error::Result;
use nbtree::{from_bytes, to_bytes, Compound, Value};

fuzz_target!(|v: Value| {
    let mut body = Compound::new();
    body.insert("", v);
    let root = body.into_root("");

    if let Ok(bs) = to_bytes(&root) {
        let _: Result<Value> = from_bytes(&bs);
    }
});
