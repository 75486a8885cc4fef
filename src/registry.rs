//! The brand registry.
//!
//! A [`BrandRegistry`] holds the ordered list of [`BrandRule`]s used for
//! identification. Identification is **first-registered-wins**: rules are
//! tried in registration order and the first whose pattern matches the whole
//! number is reported. Replacing an existing brand keeps its position; new
//! brands are appended.
//!
//! The registry is internally synchronized, so one instance can be shared
//! between threads (typically as `Arc<BrandRegistry>`) while brands are
//! registered.

use crate::brand::{BrandId, BrandRule};
use crate::builtin;
use crate::error::RegistryError;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Ordered, thread-safe set of brand rules.
///
/// # Example
///
/// ```
/// use cardbrand::{BrandId, BrandRegistry};
///
/// let registry = BrandRegistry::new();
/// assert_eq!(registry.identify("4532015112830366"), Some(BrandId::VISA));
///
/// let future = BrandId::new("future").unwrap();
/// registry
///     .register(future.clone(), r"^9[0-9]{15}$", "Future Brand", [16, 19])
///     .unwrap();
/// assert_eq!(registry.identify("9000000000000001"), Some(future));
/// ```
#[derive(Debug)]
pub struct BrandRegistry {
    rules: RwLock<Vec<BrandRule>>,
}

impl BrandRegistry {
    /// Creates a registry seeded with the built-in brands.
    pub fn new() -> Self {
        Self::from_rules(builtin::rules())
    }

    /// Creates a registry with no brands at all.
    pub fn empty() -> Self {
        Self::from_rules(Vec::new())
    }

    fn from_rules(rules: Vec<BrandRule>) -> Self {
        Self {
            rules: RwLock::new(rules),
        }
    }

    /// Returns the process-wide registry used by the crate-root functions.
    ///
    /// It is seeded with the built-in brands on first use. Prefer an owned
    /// registry where isolation matters (tests, multi-tenant services).
    pub fn global() -> &'static Arc<BrandRegistry> {
        static GLOBAL: OnceLock<Arc<BrandRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(BrandRegistry::new()))
    }

    // A poisoned lock still guards a consistent Vec: every mutation is a
    // single push or slot assignment.
    fn read(&self) -> RwLockReadGuard<'_, Vec<BrandRule>> {
        self.rules.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<BrandRule>> {
        self.rules.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Identifies the brand of a normalized digit string.
    ///
    /// Returns `None` for empty input, for input containing anything but ASCII
    /// digits, and when no rule matches.
    pub fn identify(&self, digits: &str) -> Option<BrandId> {
        self.with_matching_rule(digits, |rule| rule.id().clone())
    }

    /// Like [`identify`](Self::identify) but returns the whole matching rule.
    ///
    /// Identification and rule retrieval happen under one read lock, so the
    /// returned rule is the one that matched even if the registry is being
    /// modified concurrently.
    pub fn identify_rule(&self, digits: &str) -> Option<BrandRule> {
        self.with_matching_rule(digits, BrandRule::clone)
    }

    /// Runs `f` on the first matching rule while the read lock is held.
    pub(crate) fn with_matching_rule<T>(
        &self,
        digits: &str,
        f: impl FnOnce(&BrandRule) -> T,
    ) -> Option<T> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        self.read().iter().find(|rule| rule.matches(digits)).map(f)
    }

    /// Registers a brand, replacing any rule already held for `id`.
    ///
    /// The pattern is compiled before the registry is touched; an invalid
    /// pattern leaves the registry unchanged. Returns the replaced rule.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidPattern`] when the pattern does not compile.
    pub fn register(
        &self,
        id: BrandId,
        pattern: impl Into<String>,
        display_name: impl Into<String>,
        allowed_lengths: impl IntoIterator<Item = usize>,
    ) -> Result<Option<BrandRule>, RegistryError> {
        let rule = BrandRule::new(id, pattern, display_name, allowed_lengths)?;
        Ok(self.insert(rule))
    }

    /// Inserts a compiled rule, replacing any rule already held for its id.
    ///
    /// A replaced rule keeps its position in the match order.
    pub fn insert(&self, rule: BrandRule) -> Option<BrandRule> {
        let mut rules = self.write();
        insert_rule(&mut rules, rule)
    }

    /// Inserts several rules atomically with respect to readers.
    #[cfg(feature = "json")]
    pub(crate) fn insert_all(&self, new_rules: Vec<BrandRule>) {
        let mut rules = self.write();
        for rule in new_rules {
            insert_rule(&mut rules, rule);
        }
    }

    /// Returns the rule registered for `id`.
    pub fn get(&self, id: &BrandId) -> Option<BrandRule> {
        self.read().iter().find(|rule| rule.id() == id).cloned()
    }

    /// Returns true if a rule is registered for `id`.
    pub fn contains(&self, id: &BrandId) -> bool {
        self.read().iter().any(|rule| rule.id() == id)
    }

    /// Returns a snapshot of all rules in match order.
    pub fn rules(&self) -> Vec<BrandRule> {
        self.read().clone()
    }

    /// Returns the number of registered brands.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if no brand is registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl Default for BrandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BrandRegistry {
    fn clone(&self) -> Self {
        Self::from_rules(self.rules())
    }
}

fn insert_rule(rules: &mut Vec<BrandRule>, rule: BrandRule) -> Option<BrandRule> {
    if rule.allowed_lengths().is_empty() {
        tracing::warn!(brand = %rule.id(), "brand registered without allowed lengths; it will never validate");
    }

    match rules.iter().position(|existing| existing.id() == rule.id()) {
        Some(index) => {
            tracing::debug!(brand = %rule.id(), pattern = rule.pattern(), "replacing brand rule");
            Some(std::mem::replace(&mut rules[index], rule))
        }
        None => {
            tracing::debug!(brand = %rule.id(), pattern = rule.pattern(), "registering brand rule");
            rules.push(rule);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn future() -> BrandId {
        BrandId::new("future").unwrap()
    }

    #[test]
    fn test_builtin_identification() {
        let registry = BrandRegistry::new();
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.identify("4532015112830366"), Some(BrandId::VISA));
        assert_eq!(registry.identify("5555555555554444"), Some(BrandId::MASTERCARD));
        assert_eq!(registry.identify("378282246310005"), Some(BrandId::AMERICAN_EXPRESS));
        assert_eq!(registry.identify("6011111111111117"), Some(BrandId::DISCOVER));
        assert_eq!(registry.identify("30569309025904"), Some(BrandId::DINERS));
        assert_eq!(registry.identify("3530111333300000"), Some(BrandId::JCB));
        assert_eq!(registry.identify("6363680000000007"), Some(BrandId::ELO));
        assert_eq!(registry.identify("3841000000000007"), Some(BrandId::HIPERCARD));
        assert_eq!(registry.identify("5067800000000002"), Some(BrandId::AURA));
    }

    #[test]
    fn test_unknown_and_malformed() {
        let registry = BrandRegistry::new();
        assert_eq!(registry.identify("1234567890123456"), None);
        assert_eq!(registry.identify(""), None);
        assert_eq!(registry.identify("4532 0151 1283 0366"), None);
        assert_eq!(registry.identify("4532O15112830366"), None);
    }

    #[test]
    fn test_first_registered_wins_on_overlap() {
        let registry = BrandRegistry::new();

        // Elo is registered before Aura and both match 504175.
        let number = "5041750000000000";
        assert!(registry.get(&BrandId::AURA).unwrap().matches(number));
        assert_eq!(registry.identify(number), Some(BrandId::ELO));

        // Discover is registered before Elo and both match 6504xx.
        let number = "6504500000000007";
        assert!(registry.get(&BrandId::ELO).unwrap().matches(number));
        assert_eq!(registry.identify(number), Some(BrandId::DISCOVER));
    }

    #[test]
    fn test_registration_order_decides_in_custom_registry() {
        let registry = BrandRegistry::empty();
        let broad = BrandId::new("broad").unwrap();
        registry.register(broad.clone(), "[0-9]+", "Broad", [16]).unwrap();
        registry.register(future(), "9[0-9]{15}", "Future", [16]).unwrap();
        assert_eq!(registry.identify("9000000000000001"), Some(broad));
    }

    #[test]
    fn test_register_new_brand() {
        let registry = BrandRegistry::new();
        assert_eq!(registry.identify("9000000000000001"), None);

        let replaced = registry
            .register(future(), r"^9[0-9]{15}$", "Future Brand", [16, 19])
            .unwrap();
        assert!(replaced.is_none());
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.identify("9000000000000001"), Some(future()));

        let rule = registry.get(&future()).unwrap();
        assert_eq!(rule.display_name(), "Future Brand");
        assert_eq!(rule.allowed_lengths(), &[16, 19]);
    }

    #[test]
    fn test_register_overwrites() {
        let registry = BrandRegistry::new();
        registry.register(future(), "9[0-9]{15}", "First", [16]).unwrap();
        let replaced = registry
            .register(future(), "8[0-9]{15}", "Second", [16])
            .unwrap()
            .unwrap();
        assert_eq!(replaced.display_name(), "First");

        assert_eq!(registry.identify("9000000000000001"), None);
        assert_eq!(registry.identify("8000000000000003"), Some(future()));
        assert_eq!(registry.get(&future()).unwrap().display_name(), "Second");
        assert_eq!(registry.len(), 10);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let registry = BrandRegistry::new();
        registry
            .register(BrandId::VISA, "4[0-9]{15}", "Visa 16", [16])
            .unwrap();
        let ids: Vec<BrandId> = registry.rules().iter().map(|r| r.id().clone()).collect();
        assert_eq!(ids[0], BrandId::VISA);
        assert_eq!(registry.get(&BrandId::VISA).unwrap().display_name(), "Visa 16");
    }

    #[test]
    fn test_invalid_pattern_leaves_registry_unchanged() {
        let registry = BrandRegistry::new();
        let err = registry.register(BrandId::VISA, "4[0-9", "Broken", [16]);
        assert!(matches!(err, Err(RegistryError::InvalidPattern { .. })));
        assert_eq!(registry.get(&BrandId::VISA).unwrap().display_name(), "Visa");
    }

    #[test]
    fn test_get_missing() {
        let registry = BrandRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.get(&BrandId::VISA).is_none());
        assert!(!registry.contains(&BrandId::VISA));
        assert_eq!(registry.identify("4532015112830366"), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let registry = BrandRegistry::new();
        let copy = registry.clone();
        copy.register(future(), "9[0-9]{15}", "Future", [16]).unwrap();
        assert!(copy.contains(&future()));
        assert!(!registry.contains(&future()));
    }

    #[test]
    fn test_concurrent_register_and_identify() {
        let registry = Arc::new(BrandRegistry::new());

        let writers: Vec<_> = (0..4)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let id = BrandId::new(format!("brand-{}", i)).unwrap();
                    for _ in 0..50 {
                        registry.register(id.clone(), "9[0-9]{15}", "Test", [16]).unwrap();
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..50 {
                        assert_eq!(registry.identify("4532015112830366"), Some(BrandId::VISA));
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 13);
    }

    #[test]
    fn test_matching_rule_runs_on_first_match_only() {
        let registry = BrandRegistry::new();
        let calls = std::cell::Cell::new(0);
        let id = registry.with_matching_rule("5041750000000000", |rule| {
            calls.set(calls.get() + 1);
            rule.id().clone()
        });
        assert_eq!(id, Some(BrandId::ELO));
        assert_eq!(calls.get(), 1);

        let none = registry.with_matching_rule("1234567890123456", |_| calls.set(99));
        assert!(none.is_none());
        assert_eq!(calls.get(), 1);
        assert_eq!(registry.with_matching_rule("4532 0151", |_| ()), None);
    }

    #[test]
    fn test_registry_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BrandRegistry>();
    }
}
