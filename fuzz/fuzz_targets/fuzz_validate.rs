//! Fuzz target for card validation.
//!
//! Tests that validation never panics on arbitrary input and that its
//! outcome is consistent.

#![no_main]

use cardbrand::{identify_brand, is_valid, normalize, validate_card, verify_checksum};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let result = validate_card(data);
    assert_eq!(result.number(), normalize(data));
    assert_eq!(result.is_valid(), is_valid(data));
    assert_eq!(result.brand().cloned(), identify_brand(data));

    if result.is_valid() {
        assert!(result.brand().is_some());
        assert!(verify_checksum(result.number()));
    }
});
