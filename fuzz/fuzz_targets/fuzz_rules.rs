//! Fuzz target for JSON rule loading.
//!
//! Arbitrary documents must either load or be rejected without changing
//! the registry.

#![no_main]

use cardbrand::BrandRegistry;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let registry = BrandRegistry::new();
    let before = registry.len();

    match registry.load_json_str(data) {
        Ok(_) => {
            let _ = registry.identify("4532015112830366");
        }
        Err(_) => assert_eq!(registry.len(), before),
    }
});
