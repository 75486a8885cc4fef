//! The outcome of validating one card number.

use crate::brand::BrandId;
use crate::error::ValidationError;
use std::fmt;
use zeroize::Zeroize;

/// Result of [`validate_card`](crate::validate_card).
///
/// Always carries the normalized number and the detected brand, even when the
/// number is invalid, so callers can tell *which* brand failed and why.
///
/// # Security
///
/// - The normalized number is zeroed when the result is dropped
/// - Debug output is masked to prevent accidental logging
#[derive(Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Input with spaces and hyphens removed.
    number: String,
    /// The detected brand, `None` when no rule matched.
    brand: Option<BrandId>,
    /// Why validation failed, `None` on success.
    error: Option<ValidationError>,
}

impl ValidationResult {
    #[inline]
    pub(crate) fn new(number: String, brand: Option<BrandId>, error: Option<ValidationError>) -> Self {
        Self {
            number,
            brand,
            error,
        }
    }

    /// Returns the normalized number (spaces and hyphens removed).
    ///
    /// # Security Warning
    ///
    /// This exposes the full card number. Never log the result.
    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the detected brand, or `None` if no brand was recognized.
    #[inline]
    pub fn brand(&self) -> Option<&BrandId> {
        self.brand.as_ref()
    }

    /// Returns true if the number passed every check.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the reason validation failed.
    #[inline]
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Returns the number of characters in the normalized number.
    #[inline]
    pub fn length(&self) -> usize {
        self.number.chars().count()
    }

    /// Returns the last four characters of the normalized number.
    ///
    /// Safe for logging and display per PCI-DSS requirements.
    pub fn last_four(&self) -> &str {
        let start = self
            .number
            .char_indices()
            .rev()
            .nth(3)
            .map_or(0, |(index, _)| index);
        &self.number[start..]
    }

    /// Converts into a `Result`, for callers that propagate failures with `?`.
    ///
    /// # Example
    ///
    /// ```
    /// use cardbrand::{validate_card, ValidationError};
    ///
    /// let err = validate_card("4532015112830367").into_result().unwrap_err();
    /// assert_eq!(err, ValidationError::InvalidChecksum);
    /// ```
    pub fn into_result(self) -> Result<Self, ValidationError> {
        if let Some(e) = self.error.clone() {
            return Err(e);
        }
        Ok(self)
    }

    fn masked(&self) -> String {
        let last_four = self.last_four();
        let hidden = self.length() - last_four.chars().count();
        format!("{}{}", "*".repeat(hidden), last_four)
    }
}

impl fmt::Debug for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationResult")
            .field("number", &self.masked())
            .field("brand", &self.brand)
            .field("valid", &self.is_valid())
            .field("error", &self.error)
            .finish()
    }
}

impl Drop for ValidationResult {
    fn drop(&mut self) {
        self.number.zeroize();
    }
}
