//! Validation orchestration.
//!
//! A [`Validator`] combines normalization, brand identification, the Luhn
//! checksum, and the brand's length policy into a single operation. Every
//! outcome is returned as a [`ValidationResult`]; nothing here fails with
//! `Err`.
//!
//! The crate-root functions ([`validate_card`], [`identify_brand`], ...)
//! operate on the process-wide registry returned by
//! [`BrandRegistry::global`].

use crate::brand::{BrandId, BrandRule};
use crate::card::ValidationResult;
use crate::error::{RegistryError, ValidationError};
use crate::luhn;
use crate::registry::BrandRegistry;
use std::sync::Arc;

/// Removes spaces and hyphens from a raw card number.
///
/// No other character is touched; anything that is not a digit afterwards
/// makes validation fail. Normalizing twice is the same as normalizing once.
///
/// # Example
///
/// ```
/// use cardbrand::normalize;
///
/// assert_eq!(normalize("4532 0151-1283 0366"), "4532015112830366");
/// assert_eq!(normalize("4532.0151"), "4532.0151");
/// ```
pub fn normalize(input: &str) -> String {
    input.chars().filter(|&c| c != ' ' && c != '-').collect()
}

/// Validates card numbers against a brand registry.
///
/// Cloning a validator is cheap; clones share the registry.
///
/// # Example
///
/// ```
/// use cardbrand::{BrandId, Validator};
///
/// let validator = Validator::new();
///
/// let result = validator.validate_card("6011 1111 1111 1117");
/// assert!(result.is_valid());
/// assert_eq!(result.number(), "6011111111111117");
/// assert_eq!(result.brand(), Some(&BrandId::DISCOVER));
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<BrandRegistry>,
}

impl Validator {
    /// Creates a validator with its own registry seeded with built-in brands.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(BrandRegistry::new()))
    }

    /// Creates a validator over a shared registry.
    pub fn with_registry(registry: Arc<BrandRegistry>) -> Self {
        Self { registry }
    }

    /// Creates a validator over the process-wide registry.
    pub fn global() -> Self {
        Self::with_registry(Arc::clone(BrandRegistry::global()))
    }

    /// Returns the registry this validator consults.
    #[inline]
    pub fn registry(&self) -> &BrandRegistry {
        &self.registry
    }

    /// Validates a raw card number.
    ///
    /// Steps, in order:
    /// 1. Strip spaces and hyphens
    /// 2. Identify the brand (empty, non-digit or unmatched input stops here)
    /// 3. Verify the Luhn checksum
    /// 4. Check the length against the brand's allowed lengths
    ///
    /// The normalized number and the detected brand are populated whatever
    /// the outcome.
    pub fn validate_card(&self, input: &str) -> ValidationResult {
        let number = normalize(input);

        if let Some(error) = structural_error(&number) {
            tracing::trace!(length = number.len(), %error, "card rejected before identification");
            return ValidationResult::new(number, None, Some(error));
        }

        // Checks run against the matched rule under the registry's read lock;
        // only the id leaves it.
        let checked = self.registry.with_matching_rule(&number, |rule| {
            (rule.id().clone(), check_against_rule(&number, rule))
        });
        let Some((brand, error)) = checked else {
            tracing::trace!(length = number.len(), "no brand matched");
            return ValidationResult::new(number, None, Some(ValidationError::UnknownBrand));
        };

        tracing::trace!(
            brand = %brand,
            length = number.len(),
            valid = error.is_none(),
            "card validated"
        );
        ValidationResult::new(number, Some(brand), error)
    }

    /// Identifies the brand of a raw card number.
    ///
    /// The input is normalized first, so formatted numbers are accepted.
    pub fn identify_brand(&self, input: &str) -> Option<BrandId> {
        self.registry.identify(&normalize(input))
    }

    /// Returns true if the raw card number is valid.
    #[inline]
    pub fn is_valid(&self, input: &str) -> bool {
        self.validate_card(input).is_valid()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

fn structural_error(number: &str) -> Option<ValidationError> {
    if number.is_empty() {
        return Some(ValidationError::Empty);
    }

    number
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(position, character)| ValidationError::InvalidCharacter {
            position,
            character,
        })
}

fn check_against_rule(number: &str, rule: &BrandRule) -> Option<ValidationError> {
    if !luhn::verify_checksum(number) {
        return Some(ValidationError::InvalidChecksum);
    }

    if !rule.allows_length(number.len()) {
        return Some(ValidationError::InvalidLengthForBrand {
            brand: rule.id().clone(),
            length: number.len(),
            allowed_lengths: rule.allowed_lengths().to_vec(),
        });
    }

    None
}

/// Validates a raw card number against the process-wide registry.
///
/// # Example
///
/// ```
/// use cardbrand::{validate_card, BrandId};
///
/// let result = validate_card("4532015112830366");
/// assert!(result.is_valid());
/// assert_eq!(result.brand(), Some(&BrandId::VISA));
///
/// let result = validate_card("1234567890123456");
/// assert!(!result.is_valid());
/// assert_eq!(result.brand(), None);
/// ```
pub fn validate_card(input: &str) -> ValidationResult {
    Validator::global().validate_card(input)
}

/// Identifies the brand of a raw card number using the process-wide registry.
pub fn identify_brand(input: &str) -> Option<BrandId> {
    BrandRegistry::global().identify(&normalize(input))
}

/// Returns true if the raw card number is valid against the process-wide
/// registry.
///
/// # Example
///
/// ```
/// use cardbrand::is_valid;
///
/// assert!(is_valid("3782-822463-10005"));
/// assert!(!is_valid("3782-822463-10006"));
/// ```
#[inline]
pub fn is_valid(input: &str) -> bool {
    validate_card(input).is_valid()
}

/// Registers a brand in the process-wide registry.
///
/// See [`BrandRegistry::register`].
pub fn register_brand(
    id: BrandId,
    pattern: impl Into<String>,
    display_name: impl Into<String>,
    allowed_lengths: impl IntoIterator<Item = usize>,
) -> Result<Option<BrandRule>, RegistryError> {
    BrandRegistry::global().register(id, pattern, display_name, allowed_lengths)
}

/// Looks up a brand rule in the process-wide registry.
///
/// # Example
///
/// ```
/// use cardbrand::{get_brand_rule, BrandId};
///
/// let rule = get_brand_rule(&BrandId::AMERICAN_EXPRESS).unwrap();
/// assert_eq!(rule.display_name(), "American Express");
/// assert_eq!(rule.allowed_lengths(), &[15]);
/// ```
pub fn get_brand_rule(id: &BrandId) -> Option<BrandRule> {
    BrandRegistry::global().get(id)
}
