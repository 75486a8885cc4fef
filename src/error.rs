//! Error types for card validation and brand registration.
//!
//! Validation failures are reported through [`ValidationError`], carried inside
//! a [`ValidationResult`](crate::ValidationResult) rather than returned as
//! `Err`. Registry operations return [`RegistryError`].

use crate::brand::BrandId;
use std::fmt;

/// Why a card number did not validate.
///
/// Each variant provides specific details about the failure, enabling callers
/// to explain it to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input was empty after stripping spaces and hyphens.
    Empty,

    /// A character other than a decimal digit remained after normalization.
    InvalidCharacter {
        /// The position in the normalized string (0-indexed, in characters).
        position: usize,
        /// The invalid character that was found.
        character: char,
    },

    /// No registered brand pattern matched the number.
    UnknownBrand,

    /// The Luhn checksum validation failed.
    ///
    /// This usually indicates a typo in the card number.
    InvalidChecksum,

    /// The card number length is invalid for the detected brand.
    InvalidLengthForBrand {
        /// The detected card brand.
        brand: BrandId,
        /// The actual number of digits.
        length: usize,
        /// The lengths the brand accepts.
        allowed_lengths: Vec<usize>,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "card number is empty"),

            Self::InvalidCharacter {
                position,
                character,
            } => {
                write!(
                    f,
                    "invalid character '{}' at position {} (only digits, spaces, and hyphens allowed)",
                    character.escape_default(),
                    position
                )
            }

            Self::UnknownBrand => {
                write!(f, "unknown card brand - check the card number prefix")
            }

            Self::InvalidChecksum => {
                write!(f, "invalid checksum (Luhn check failed) - please verify the card number")
            }

            Self::InvalidLengthForBrand {
                brand,
                length,
                allowed_lengths,
            } => {
                if allowed_lengths.is_empty() {
                    return write!(f, "{} cards have no accepted length, got {} digits", brand, length);
                }
                let valid_str: Vec<String> =
                    allowed_lengths.iter().map(|l| l.to_string()).collect();
                write!(
                    f,
                    "{} cards must have {} digits, got {}",
                    brand,
                    valid_str.join(" or "),
                    length
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while registering or loading brand rules.
#[derive(Debug)]
pub enum RegistryError {
    /// The brand identifier is empty, malformed, or reserved.
    InvalidIdentifier(String),

    /// The match pattern is not a valid regular expression.
    InvalidPattern {
        /// The brand the pattern was registered for.
        id: BrandId,
        /// The underlying regex compilation error.
        source: regex::Error,
    },

    /// Failed to read a rule file.
    Io(std::io::Error),

    /// Failed to parse a rule file.
    Parse(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier(id) => write!(
                f,
                "invalid brand identifier {:?} (use ASCII letters, digits, '-' or '_'; \"unknown\" is reserved)",
                id
            ),
            Self::InvalidPattern { id, source } => {
                write!(f, "invalid pattern for brand {}: {}", id, source)
            }
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(s) => write!(f, "Parse error: {}", s),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
