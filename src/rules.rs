//! JSON rule files.
//!
//! Loads additional brand rules into a [`BrandRegistry`] and exports the
//! current rule set.
//!
//! # Feature
//!
//! Requires the `json` feature.
//!
//! # Format
//!
//! ```json
//! [
//!   {
//!     "id": "future",
//!     "pattern": "^9[0-9]{15}$",
//!     "display_name": "Future Brand",
//!     "allowed_lengths": [16, 19]
//!   }
//! ]
//! ```
//!
//! Entries are registered in file order, so an entry for an existing brand
//! replaces it in place and new brands are appended after the current ones.

use crate::brand::{BrandId, BrandRule};
use crate::error::RegistryError;
use crate::registry::BrandRegistry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;

/// One rule as stored in a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Brand identifier.
    pub id: String,
    /// Regular expression matched against the whole digit string.
    pub pattern: String,
    /// Human-readable brand name.
    pub display_name: String,
    /// Accepted digit counts.
    #[serde(default)]
    pub allowed_lengths: Vec<usize>,
}

impl RuleEntry {
    /// Compiles the entry into a rule.
    pub fn compile(self) -> Result<BrandRule, RegistryError> {
        let id = BrandId::new(self.id)?;
        BrandRule::new(id, self.pattern, self.display_name, self.allowed_lengths)
    }
}

impl From<&BrandRule> for RuleEntry {
    fn from(rule: &BrandRule) -> Self {
        Self {
            id: rule.id().to_string(),
            pattern: rule.pattern().to_string(),
            display_name: rule.display_name().to_string(),
            allowed_lengths: rule.allowed_lengths().to_vec(),
        }
    }
}

impl BrandRegistry {
    /// Registers every rule of a JSON document.
    ///
    /// All entries are compiled before any is registered: if one entry is
    /// invalid, the registry is left untouched. Returns the number of entries
    /// registered.
    ///
    /// # Example
    ///
    /// ```
    /// use cardbrand::{BrandId, BrandRegistry};
    ///
    /// let registry = BrandRegistry::new();
    /// let loaded = registry
    ///     .load_json_str(r#"[{"id": "future", "pattern": "9[0-9]{15}",
    ///                         "display_name": "Future", "allowed_lengths": [16]}]"#)
    ///     .unwrap();
    /// assert_eq!(loaded, 1);
    /// assert_eq!(registry.identify("9000000000000001"), Some(BrandId::new("future").unwrap()));
    /// ```
    pub fn load_json_str(&self, json: &str) -> Result<usize, RegistryError> {
        let entries: Vec<RuleEntry> = serde_json::from_str(json)
            .map_err(|e| RegistryError::Parse(format!("JSON parse error: {}", e)))?;

        let rules = entries
            .into_iter()
            .map(RuleEntry::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let count = rules.len();
        self.insert_all(rules);
        tracing::info!(count, "loaded brand rules");
        Ok(count)
    }

    /// Registers every rule read from a reader.
    pub fn load_json_reader<R: Read>(&self, mut reader: R) -> Result<usize, RegistryError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.load_json_str(&content)
    }

    /// Registers every rule of a JSON file.
    pub fn load_json_file<P: AsRef<Path>>(&self, path: P) -> Result<usize, RegistryError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading brand rule file");
        let content = fs::read_to_string(path)?;
        self.load_json_str(&content)
    }

    /// Exports the current rules, in match order, as a JSON array.
    pub fn to_json(&self) -> Result<String, RegistryError> {
        let entries: Vec<RuleEntry> = self.rules().iter().map(RuleEntry::from).collect();
        serde_json::to_string_pretty(&entries)
            .map_err(|e| RegistryError::Parse(format!("JSON serialize error: {}", e)))
    }
}
