//! Brand identifiers and matching rules.
//!
//! A [`BrandId`] names a card network. The built-in networks are available as
//! associated constants; applications may mint their own identifiers and
//! register rules for them at runtime. The absence of a brand is expressed as
//! `None`, never as a reserved identifier.

use crate::error::RegistryError;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Identifier reserved for "no brand recognized"; never accepted for a rule.
const RESERVED_ID: &str = "unknown";

/// Open identifier of a card brand.
///
/// Identifiers are non-empty and consist of ASCII letters, digits, `-` and
/// `_`. The word `unknown` (any case) is reserved.
///
/// # Example
///
/// ```
/// use cardbrand::BrandId;
///
/// let id: BrandId = "future-card".parse().unwrap();
/// assert_eq!(id.as_str(), "future-card");
/// assert_eq!(BrandId::VISA.as_str(), "visa");
/// assert!("unknown".parse::<BrandId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrandId(Cow<'static, str>);

impl BrandId {
    /// Visa.
    pub const VISA: BrandId = BrandId(Cow::Borrowed("visa"));
    /// Mastercard.
    pub const MASTERCARD: BrandId = BrandId(Cow::Borrowed("mastercard"));
    /// American Express.
    pub const AMERICAN_EXPRESS: BrandId = BrandId(Cow::Borrowed("amex"));
    /// Discover.
    pub const DISCOVER: BrandId = BrandId(Cow::Borrowed("discover"));
    /// Diners Club.
    pub const DINERS: BrandId = BrandId(Cow::Borrowed("diners"));
    /// JCB.
    pub const JCB: BrandId = BrandId(Cow::Borrowed("jcb"));
    /// Elo - Brazilian payment system.
    pub const ELO: BrandId = BrandId(Cow::Borrowed("elo"));
    /// Hipercard - Brazilian payment system.
    pub const HIPERCARD: BrandId = BrandId(Cow::Borrowed("hipercard"));
    /// Aura - Brazilian payment system.
    pub const AURA: BrandId = BrandId(Cow::Borrowed("aura"));

    /// Creates an identifier, rejecting malformed or reserved names.
    pub fn new(id: impl Into<String>) -> Result<Self, RegistryError> {
        let id = id.into();
        if !is_valid_identifier(&id) {
            return Err(RegistryError::InvalidIdentifier(id));
        }
        Ok(Self(Cow::Owned(id)))
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && !id.eq_ignore_ascii_case(RESERVED_ID)
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

impl fmt::Display for BrandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for BrandId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for BrandId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for BrandId {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BrandId> for String {
    fn from(id: BrandId) -> Self {
        id.0.into_owned()
    }
}

/// The matching rule of one brand.
///
/// The pattern is a regular expression that must match the **whole**
/// normalized digit string; it is compiled as `^(?:pattern)$`, so explicit
/// anchors are optional. The `regex` engine runs in linear time, so no pattern
/// can make identification backtrack catastrophically.
#[derive(Debug, Clone)]
pub struct BrandRule {
    id: BrandId,
    pattern: String,
    display_name: String,
    allowed_lengths: Vec<usize>,
    matcher: Regex,
}

impl BrandRule {
    /// Compiles a rule.
    ///
    /// Allowed lengths are sorted and de-duplicated. An empty set is accepted:
    /// such a brand can be identified but never validates.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidPattern`] when the pattern does not compile.
    ///
    /// # Example
    ///
    /// ```
    /// use cardbrand::{BrandId, BrandRule};
    ///
    /// let id = BrandId::new("future").unwrap();
    /// let rule = BrandRule::new(id, "9[0-9]{15}", "Future", [19, 16, 16]).unwrap();
    /// assert!(rule.matches("9000000000000001"));
    /// assert!(!rule.matches("90000000000000011"));
    /// assert_eq!(rule.allowed_lengths(), &[16, 19]);
    /// ```
    pub fn new(
        id: BrandId,
        pattern: impl Into<String>,
        display_name: impl Into<String>,
        allowed_lengths: impl IntoIterator<Item = usize>,
    ) -> Result<Self, RegistryError> {
        let pattern = pattern.into();
        let matcher = match Regex::new(&format!("^(?:{})$", pattern)) {
            Ok(re) => re,
            Err(source) => return Err(RegistryError::InvalidPattern { id, source }),
        };

        let mut allowed_lengths: Vec<usize> = allowed_lengths.into_iter().collect();
        allowed_lengths.sort_unstable();
        allowed_lengths.dedup();

        Ok(Self {
            id,
            pattern,
            display_name: display_name.into(),
            allowed_lengths,
            matcher,
        })
    }

    /// Returns the brand this rule identifies.
    #[inline]
    pub fn id(&self) -> &BrandId {
        &self.id
    }

    /// Returns the pattern as registered.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the human-readable brand name.
    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the accepted digit counts, ascending.
    #[inline]
    pub fn allowed_lengths(&self) -> &[usize] {
        &self.allowed_lengths
    }

    /// Returns true if the pattern matches the whole digit string.
    #[inline]
    pub fn matches(&self, digits: &str) -> bool {
        self.matcher.is_match(digits)
    }

    /// Returns true if `length` is one of the accepted digit counts.
    #[inline]
    pub fn allows_length(&self, length: usize) -> bool {
        self.allowed_lengths.binary_search(&length).is_ok()
    }
}
