//! Whole-file JSON metrics store.
//!
//! RULE: only this module touches the store file. The pipeline works on the
//! in-memory map and the caller decides when to persist.
//!
//! One invocation is one load-modify-save cycle. There is no file locking:
//! two concurrent runners can race on the read-modify-write and the last
//! save wins. Known limitation, kept from the system this replaces.

use crate::error::{SyncError, SyncResult};
use crate::record::OperatorRecord;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Store keys are normalized emails: lower-cased and trimmed. Lookups and
/// writes must go through the same normalization.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsStore {
    pub operators: BTreeMap<String, OperatorRecord>,
}

impl MetricsStore {
    /// Load the full store. A missing or unreadable file is fatal — unlike
    /// the identity directory, the store is never silently empty.
    pub fn load(path: &Path) -> SyncResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| SyncError::SourceUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let operators = serde_json::from_str(&raw)?;
        Ok(Self { operators })
    }

    /// Write the full store back, pretty-printed.
    pub fn save(&self, path: &Path) -> SyncResult<()> {
        let json = serde_json::to_string_pretty(&self.operators)?;
        fs::write(path, json)?;
        log::debug!("store saved: {} ({} operators)", path.display(), self.operators.len());
        Ok(())
    }

    pub fn contains(&self, email: &str) -> bool {
        self.operators.contains_key(&normalize_email(email))
    }

    pub fn get(&self, email: &str) -> Option<&OperatorRecord> {
        self.operators.get(&normalize_email(email))
    }

    pub fn get_mut(&mut self, email: &str) -> Option<&mut OperatorRecord> {
        self.operators.get_mut(&normalize_email(email))
    }

    /// Register an operator identity with an empty record. Onboarding
    /// surface — the merge path never invents identities.
    pub fn insert_operator(&mut self, email: &str) -> &mut OperatorRecord {
        self.operators
            .entry(normalize_email(email))
            .or_default()
    }
}
