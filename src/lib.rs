//! # cardbrand
//!
//! Payment card brand identification and structural validation.
//!
//! ## Features
//!
//! - Luhn checksum verification
//! - Brand identification through an ordered, extensible regex registry
//! - Per-brand length policy
//! - Runtime registration of new brands, optionally from JSON rule files
//! - Batch validation, optionally parallel
//!
//! Validation is offline and structural: a valid number is well-formed for
//! its brand, not necessarily issued or active.
//!
//! ## Quick Start
//!
//! ```rust
//! use cardbrand::{validate_card, BrandId, ValidationError};
//!
//! let result = validate_card("4532 0151 1283 0366");
//! assert!(result.is_valid());
//! assert_eq!(result.brand(), Some(&BrandId::VISA));
//! assert_eq!(result.number(), "4532015112830366");
//!
//! // Failures still report the cleaned number and the detected brand.
//! let result = validate_card("4532-0151-1283-0367");
//! assert!(!result.is_valid());
//! assert_eq!(result.brand(), Some(&BrandId::VISA));
//! assert_eq!(result.error(), Some(&ValidationError::InvalidChecksum));
//! ```
//!
//! ## Registering Brands
//!
//! ```rust
//! use cardbrand::{BrandId, Validator};
//!
//! let validator = Validator::new();
//! let future = BrandId::new("future").unwrap();
//! validator
//!     .registry()
//!     .register(future.clone(), r"^9[0-9]{15}$", "Future Brand", [16, 19])
//!     .unwrap();
//!
//! let result = validator.validate_card("9000-0000-0000-0001");
//! assert!(result.is_valid());
//! assert_eq!(result.brand(), Some(&future));
//! ```
//!
//! Rules are tried in registration order and the first match wins. Replacing
//! a brand keeps its position; new brands go last.
//!
//! ## Built-in Brands
//!
//! | Brand | Prefix | Length |
//! |-------|--------|--------|
//! | Visa | 4 | 13, 16, 19 |
//! | Mastercard | 51-55, 2221-2720 | 16 |
//! | American Express | 34, 37 | 15 |
//! | Discover | 6011, 65 | 16 |
//! | Diners Club | 300-305, 36, 38 | 14 |
//! | JCB | 2131, 1800, 35 | 15, 16 |
//! | Elo | 504175, 506699, 5067, 509000, 627780, 636297, 636368, ... | 16 |
//! | Hipercard | 384100, 384140, 384160 | 16 |
//! | Aura | 504175, 506699, 5067, 5090-5093 | 16 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `json` | JSON rule file loading and export |
//! | `parallel` | Rayon-based batch parallelism |
//! | `cli` | Command-line tool |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
pub mod brand;
mod builtin;
pub mod card;
pub mod error;
pub mod luhn;
pub mod registry;
#[cfg(feature = "json")]
pub mod rules;
pub mod validate;

// Re-export main types at crate root
pub use batch::BatchValidator;
pub use brand::{BrandId, BrandRule};
pub use card::ValidationResult;
pub use error::{RegistryError, ValidationError};
pub use luhn::verify_checksum;
pub use registry::BrandRegistry;
pub use validate::{
    get_brand_rule, identify_brand, is_valid, normalize, register_brand, validate_card, Validator,
};

#[cfg(test)]
mod tests {
    use super::*;

    const VISA: &str = "4532015112830366";
    const AMEX: &str = "378282246310005";
    const DISCOVER: &str = "6011111111111117";
    const JCB: &str = "3530111333300000";
    const DINERS: &str = "30569309025904";
    const MASTERCARD: &str = "5555555555554444";

    #[test]
    fn test_end_to_end_visa() {
        let result = validate_card(VISA);
        assert!(result.is_valid());
        assert_eq!(result.brand(), Some(&BrandId::VISA));
        assert_eq!(result.number(), VISA);
        assert_eq!(result.length(), 16);
    }

    #[test]
    fn test_end_to_end_amex() {
        let result = validate_card(AMEX);
        assert!(result.is_valid());
        assert_eq!(result.brand(), Some(&BrandId::AMERICAN_EXPRESS));
        assert_eq!(result.length(), 15);
    }

    #[test]
    fn test_end_to_end_unknown() {
        let result = validate_card("1234567890123456");
        assert!(!result.is_valid());
        assert_eq!(result.brand(), None);
    }

    #[test]
    fn test_end_to_end_discover_spaced() {
        let result = validate_card("6011 1111 1111 1117");
        assert!(result.is_valid());
        assert_eq!(result.number(), DISCOVER);
        assert_eq!(result.brand(), Some(&BrandId::DISCOVER));
    }

    #[test]
    fn test_other_builtin_brands() {
        assert_eq!(validate_card(JCB).brand(), Some(&BrandId::JCB));
        assert!(is_valid(JCB));
        assert_eq!(validate_card(DINERS).brand(), Some(&BrandId::DINERS));
        assert!(is_valid(DINERS));
        assert_eq!(validate_card(MASTERCARD).brand(), Some(&BrandId::MASTERCARD));
        assert!(is_valid(MASTERCARD));
    }

    #[test]
    fn test_letters_are_unknown() {
        let result = validate_card("4532 0151 ABCD 0366");
        assert!(!result.is_valid());
        assert_eq!(result.brand(), None);
    }

    #[test]
    fn test_verify_checksum_reexport() {
        assert!(verify_checksum(VISA));
        assert!(verify_checksum("0000"));
        assert!(!verify_checksum("4532015112830367"));
    }

    #[test]
    fn test_thread_safety() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidationResult>();
        assert_send_sync::<ValidationError>();
        assert_send_sync::<BrandId>();
        assert_send_sync::<BrandRegistry>();
        assert_send_sync::<Validator>();
        assert_send_sync::<BatchValidator>();
    }
}
