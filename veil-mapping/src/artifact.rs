use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use veil_core::constants::FORMAT_VERSION;
use veil_core::errors::{MappingError, VeilResult};
use veil_core::fingerprint;
use veil_core::model::{Entity, EntityKind, Placeholder};

/// One persisted placeholder ↔ entity binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub placeholder: Placeholder,
    pub kind: EntityKind,
    /// The value decode restores. Always the canonical form, never a variant.
    pub canonical: String,
    /// Every surface form seen during encode, in first-seen order.
    pub variants: Vec<String>,
}

/// The durable mapping artifact.
///
/// Entries appear in first-occurrence order. The artifact carries no
/// timestamps or machine identity: encoding the same document with the
/// same detector output twice must produce byte-identical files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    pub format_version: u32,
    /// blake3 digest of the source document the entries were derived from.
    pub fingerprint: String,
    pub entries: Vec<MappingEntry>,
}

impl Mapping {
    /// Build an artifact from the allocator's output.
    pub fn from_entities(source_text: &str, allocated: Vec<(Placeholder, Entity)>) -> Self {
        let entries = allocated
            .into_iter()
            .map(|(placeholder, entity)| MappingEntry {
                placeholder,
                kind: entity.kind,
                canonical: entity.canonical,
                variants: entity.variants,
            })
            .collect();
        Self {
            format_version: FORMAT_VERSION,
            fingerprint: fingerprint::fingerprint(source_text),
            entries,
        }
    }

    /// Serialize to pretty JSON and write atomically: bytes go to a temp
    /// file next to the target, which is then renamed into place. A crash
    /// mid-write leaves the old artifact (or nothing), never a torn one.
    pub fn save(&self, path: &Path) -> VeilResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, json).map_err(|e| MappingError::Io {
            path: tmp_path.display().to_string(),
            message: e.to_string(),
        })?;
        fs::rename(&tmp_path, path).map_err(|e| MappingError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            path = %path.display(),
            entries = self.entries.len(),
            "mapping artifact saved"
        );
        Ok(())
    }

    /// Load an artifact and validate it. Any failure here is fatal for
    /// decode: a missing, truncated, version-mismatched, or
    /// bijection-violating file cannot be trusted to restore values.
    pub fn load(path: &Path) -> VeilResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| MappingError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mapping: Mapping = serde_json::from_str(&raw).map_err(|e| MappingError::Malformed {
            reason: e.to_string(),
        })?;
        mapping.validate()?;

        tracing::debug!(
            path = %path.display(),
            entries = mapping.entries.len(),
            "mapping artifact loaded"
        );
        Ok(mapping)
    }

    /// Version and bijection checks. `load` runs this automatically; it
    /// is public for callers that build mappings in memory.
    ///
    /// The bijection rule: no placeholder appears twice, no two distinct
    /// placeholders of the same kind share a canonical value, and every
    /// entry's kind tag agrees with its placeholder's.
    pub fn validate(&self) -> Result<(), MappingError> {
        if self.format_version != FORMAT_VERSION {
            return Err(MappingError::VersionMismatch {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }

        let mut seen_placeholders: HashSet<Placeholder> = HashSet::new();
        let mut seen_values: HashMap<(EntityKind, String), Placeholder> = HashMap::new();

        for entry in &self.entries {
            if !seen_placeholders.insert(entry.placeholder) {
                return Err(MappingError::DuplicatePlaceholder {
                    placeholder: entry.placeholder.to_string(),
                });
            }
            if entry.placeholder.kind != entry.kind {
                return Err(MappingError::Malformed {
                    reason: format!(
                        "entry {} carries kind tag {}",
                        entry.placeholder,
                        entry.kind.tag()
                    ),
                });
            }
            let key = (entry.kind, entry.canonical.clone());
            if let Some(first) = seen_values.insert(key, entry.placeholder) {
                return Err(MappingError::ConflictingCanonical {
                    first: first.to_string(),
                    second: entry.placeholder.to_string(),
                    kind: entry.kind.tag().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Whether `text` is the document this mapping was derived from.
    pub fn verify_fingerprint(&self, text: &str) -> bool {
        fingerprint::matches(text, &self.fingerprint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
