#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must fail cleanly or yield a valid index
    if let Ok(index) = fxsa::Index::from_bytes(data) {
        let rebuilt = fxsa::Index::new(index.bytes().to_vec());
        assert_eq!(index.offsets().to_vec(), rebuilt.offsets().to_vec());
    }
});
