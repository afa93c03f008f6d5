//! Fuzz target for identifier classification
//!
//! Classification is a total function; this target verifies it never
//! panics and stays consistent with the namespace marker on any input.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if input.len() > 1000 {
            return;
        }

        let class = ferro_idres::classify(input);

        // External ids never carry the internal namespace marker.
        if !input.contains("kb|g.") {
            assert_eq!(class, ferro_idres::FeatureClass::External);
        } else {
            assert!(class.is_internal());
        }
    }
});
