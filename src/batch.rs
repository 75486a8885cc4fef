//! Batch processing for validating many card numbers.
//!
//! This module validates slices of raw card numbers with one shared
//! [`Validator`], with optional parallel processing using rayon.

use crate::card::ValidationResult;
use crate::validate::Validator;

/// Batch validator for processing multiple card numbers.
///
/// # Example
///
/// ```
/// use cardbrand::BatchValidator;
///
/// let batch = BatchValidator::new();
/// let cards = vec!["4532015112830366", "1234567890123456", "378282246310005"];
/// let results = batch.validate_all(&cards);
///
/// for (card, result) in cards.iter().zip(results.iter()) {
///     match result.error() {
///         None => println!("{}: valid", card),
///         Some(e) => println!("{}: invalid - {}", card, e),
///     }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchValidator {
    validator: Validator,
}

impl BatchValidator {
    /// Creates a batch validator with its own built-in registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a batch validator that uses the given validator's registry.
    #[inline]
    pub fn with_validator(validator: Validator) -> Self {
        Self { validator }
    }

    /// Returns the underlying validator.
    #[inline]
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Validates a batch of card numbers.
    ///
    /// Returns one result per input, in input order.
    pub fn validate_all<S: AsRef<str>>(&self, cards: &[S]) -> Vec<ValidationResult> {
        cards
            .iter()
            .map(|c| self.validator.validate_card(c.as_ref()))
            .collect()
    }

    /// Validates a batch and returns only the valid results.
    pub fn validate_valid_only<S: AsRef<str>>(&self, cards: &[S]) -> Vec<ValidationResult> {
        cards
            .iter()
            .map(|c| self.validator.validate_card(c.as_ref()))
            .filter(ValidationResult::is_valid)
            .collect()
    }

    /// Validates a batch and partitions into valid and invalid.
    ///
    /// Returns a tuple of (valid results, (input index, invalid result)).
    pub fn validate_partitioned<S: AsRef<str>>(
        &self,
        cards: &[S],
    ) -> (Vec<ValidationResult>, Vec<(usize, ValidationResult)>) {
        let mut valid = Vec::new();
        let mut invalid = Vec::new();

        for (i, card) in cards.iter().enumerate() {
            let result = self.validator.validate_card(card.as_ref());
            if result.is_valid() {
                valid.push(result);
            } else {
                invalid.push((i, result));
            }
        }

        tracing::debug!(valid = valid.len(), invalid = invalid.len(), "batch partitioned");
        (valid, invalid)
    }

    /// Counts valid and invalid cards without keeping the results.
    ///
    /// Returns a tuple of (valid_count, invalid_count).
    pub fn count_valid<S: AsRef<str>>(&self, cards: &[S]) -> (usize, usize) {
        let valid = cards
            .iter()
            .filter(|c| self.validator.is_valid(c.as_ref()))
            .count();

        (valid, cards.len() - valid)
    }

    /// Validates cards in parallel using rayon.
    ///
    /// Results keep input order.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn validate_parallel<S: AsRef<str> + Sync>(&self, cards: &[S]) -> Vec<ValidationResult> {
        use rayon::prelude::*;
        cards
            .par_iter()
            .map(|c| self.validator.validate_card(c.as_ref()))
            .collect()
    }

    /// Counts valid and invalid cards in parallel.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn count_valid_parallel<S: AsRef<str> + Sync>(&self, cards: &[S]) -> (usize, usize) {
        use rayon::prelude::*;

        let valid = cards
            .par_iter()
            .filter(|c| self.validator.is_valid(c.as_ref()))
            .count();

        (valid, cards.len() - valid)
    }
}

/// Validates a slice of cards against the process-wide registry.
///
/// # Example
///
/// ```
/// use cardbrand::batch::validate_batch;
///
/// let cards = ["4532015112830366", "378282246310005"];
/// let results = validate_batch(&cards);
/// assert!(results.iter().all(|r| r.is_valid()));
/// ```
pub fn validate_batch<S: AsRef<str>>(cards: &[S]) -> Vec<ValidationResult> {
    BatchValidator::with_validator(Validator::global()).validate_all(cards)
}

/// Counts valid and invalid cards against the process-wide registry.
///
/// # Example
///
/// ```
/// use cardbrand::batch::count_valid;
///
/// let cards = ["4532015112830366", "1234567890123456", "6011111111111117"];
/// assert_eq!(count_valid(&cards), (2, 1));
/// ```
pub fn count_valid<S: AsRef<str>>(cards: &[S]) -> (usize, usize) {
    BatchValidator::with_validator(Validator::global()).count_valid(cards)
}
