//! Name-to-email identity directory.
//!
//! A flat JSON object mapping display names to emails, maintained by hand.
//! Resolution is case-insensitive and whitespace-trimmed; when two entries
//! differ only by case or spacing, the FIRST one in file order wins — an
//! accepted ambiguity, so the loader must preserve document order (a plain
//! sorted map would quietly change which entry is "first").

use crate::error::{SyncError, SyncResult};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Flat name→email object, deserialized into pairs in document order.
struct NamePairs(Vec<(String, String)>);

impl<'de> Deserialize<'de> for NamePairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = NamePairs;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object mapping display names to emails")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::new();
                while let Some((name, email)) = map.next_entry::<String, String>()? {
                    pairs.push((name, email));
                }
                Ok(NamePairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    entries: Vec<(String, String)>,
}

impl Directory {
    /// Load the directory. A missing file degrades to an empty directory
    /// (every lookup will fail with `UnknownIdentity` downstream); a file
    /// that exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> SyncResult<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "identity directory {} missing; resolving against an empty directory",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(SyncError::SourceUnavailable {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        };
        let pairs: NamePairs = serde_json::from_str(&raw).map_err(|e| {
            SyncError::SourceUnavailable {
                path: path.display().to_string(),
                reason: format!("invalid directory JSON: {e}"),
            }
        })?;
        Ok(Self { entries: pairs.0 })
    }

    pub fn from_pairs(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Resolve a display name to its email. Case-insensitive, trimmed,
    /// first match in file order.
    pub fn resolve(&self, display_name: &str) -> Option<&str> {
        let wanted = display_name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(name, _)| name.trim().to_lowercase() == wanted)
            .map(|(_, email)| email.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
