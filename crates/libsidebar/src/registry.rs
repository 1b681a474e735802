//! Collections of module indexes.

use std::collections::{BTreeMap, HashMap};

use serde::{Serialize, Serializer, ser::SerializeMap};
use tracing::warn;

use crate::{
    error::{Result, SidebarError},
    index::{SidebarIndex, SymbolMatch},
    transport::{self, Document, Members, ROOT_FIELD, Record},
};

/// Sidebar indexes for a documentation site, keyed by module path.
///
/// The registry is an ordinary value owned by whoever renders the site. Modules are replaced
/// wholesale; individual indexes are never edited in place.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SidebarRegistry {
    /// Indexes keyed by module path.
    modules: BTreeMap<String, SidebarIndex>,
}

impl SidebarRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an index, returning the one it replaced for the same module, if any.
    pub fn insert(&mut self, index: SidebarIndex) -> Option<SidebarIndex> {
        self.modules.insert(index.module().to_string(), index)
    }

    /// Remove and return the index for `module`.
    pub fn remove(&mut self, module: &str) -> Option<SidebarIndex> {
        self.modules.remove(module)
    }

    /// The index for `module`, if loaded.
    pub fn get(&self, module: &str) -> Option<&SidebarIndex> {
        self.modules.get(module)
    }

    /// Module paths in sorted order.
    pub fn modules(&self) -> impl Iterator<Item = &str> + '_ {
        self.modules.keys().map(String::as_str)
    }

    /// All indexes, sorted by module path.
    pub fn iter(&self) -> impl Iterator<Item = &SidebarIndex> + '_ {
        self.modules.values()
    }

    /// Number of modules held.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no modules are held.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Every entry named `name`, across all modules, as `(module, match)` pairs.
    pub fn locate<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (&'a str, SymbolMatch<'a>)> {
        self.modules.iter().flat_map(move |(module, index)| {
            index
                .find_all(name)
                .map(move |hit| (module.as_str(), hit))
        })
    }

    /// Encode the registry as one JSON document: `{"<module>": <record>, ...}`.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a registry document.
    ///
    /// Only a malformed document root is an error. A module whose record is malformed or
    /// invalid is reported in [`LoadReport::failures`] and the remaining modules still load. A
    /// module path given more than once is reported once and none of its records are loaded.
    pub fn from_json(bytes: &[u8]) -> Result<LoadReport> {
        let Document::Object(Members(records)) =
            transport::parse_document::<Document<Record>>(bytes)?
        else {
            return Err(SidebarError::format(
                ROOT_FIELD,
                "expected an object keyed by module path",
            ));
        };

        let mut occurrences: HashMap<&str, usize> = HashMap::with_capacity(records.len());
        for (module, _) in &records {
            *occurrences.entry(module.as_str()).or_default() += 1;
        }

        let mut report = LoadReport::default();
        for (module, record) in &records {
            let Some(count) = occurrences.get_mut(module.as_str()) else {
                continue;
            };
            let result = match *count {
                0 => continue,
                1 => transport::decode_record(module, record, Some(module.as_str())),
                _ => {
                    *count = 0;
                    Err(SidebarError::format(
                        module.as_str(),
                        "module supplied more than once",
                    ))
                }
            };
            match result {
                Ok(index) => {
                    report.registry.insert(index);
                }
                Err(error) => {
                    warn!("Skipping sidebar for {module}: {error}");
                    report.failures.push(LoadFailure {
                        source: module.clone(),
                        error,
                    });
                }
            }
        }
        Ok(report)
    }
}

impl Extend<SidebarIndex> for SidebarRegistry {
    fn extend<T: IntoIterator<Item = SidebarIndex>>(&mut self, iter: T) {
        for index in iter {
            self.insert(index);
        }
    }
}

impl FromIterator<SidebarIndex> for SidebarRegistry {
    fn from_iter<T: IntoIterator<Item = SidebarIndex>>(iter: T) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

impl Serialize for SidebarRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.modules.len()))?;
        for (module, index) in &self.modules {
            map.serialize_entry(module, index)?;
        }
        map.end()
    }
}

/// A module that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    /// Module path, or the file path when no module path could be derived.
    pub source: String,
    /// Why loading failed.
    pub error: SidebarError,
}

/// Outcome of loading many modules: everything that loaded, plus what did not.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Successfully loaded indexes.
    pub registry: SidebarRegistry,
    /// Per-module failures. The sidebar for these modules is missing, nothing else is affected.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Whether every module loaded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
