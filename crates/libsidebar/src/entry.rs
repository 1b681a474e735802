//! Individual sidebar entries.

use serde::{Serialize, Serializer, ser::SerializeTuple};

/// A public item listed in a module sidebar: its name and a one-line summary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolEntry {
    /// Item name as it appears in the sidebar.
    name: String,
    /// First line of the item's documentation. May be empty.
    summary: String,
}

impl SymbolEntry {
    /// Create an entry. Names are validated when the entry is added to an index.
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
        }
    }

    /// The item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The item summary, possibly empty.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Whether the entry carries a summary.
    pub fn has_summary(&self) -> bool {
        !self.summary.is_empty()
    }
}

impl<N, S> From<(N, S)> for SymbolEntry
where
    N: Into<String>,
    S: Into<String>,
{
    fn from((name, summary): (N, S)) -> Self {
        Self::new(name, summary)
    }
}

/// Entries travel as two-element `[name, summary]` arrays.
impl Serialize for SymbolEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.name)?;
        tuple.serialize_element(&self.summary)?;
        tuple.end()
    }
}
