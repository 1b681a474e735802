//! Per-module sidebar index.
#![allow(clippy::missing_docs_in_private_items)]

use std::collections::{HashMap, HashSet};

use crate::{
    entry::SymbolEntry,
    error::{Result, ValidationError},
    transport,
};

/// One category and its entries, in producer order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    category: String,
    entries: Vec<SymbolEntry>,
}

/// A lookup hit: the entry together with the category it was listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolMatch<'a> {
    /// Category key the entry belongs to.
    pub category: &'a str,
    /// The matched entry.
    pub entry: &'a SymbolEntry,
}

impl<'a> SymbolMatch<'a> {
    /// Name of the matched entry.
    pub fn name(&self) -> &'a str {
        self.entry.name()
    }

    /// Summary of the matched entry.
    pub fn summary(&self) -> &'a str {
        self.entry.summary()
    }
}

/// Categorized, ordered sidebar items for a single module.
///
/// An index is validated on construction and never changes afterwards, so it can be shared
/// freely between readers. Category order and entry order are exactly those supplied by the
/// producer; they are the order the sidebar displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarIndex {
    module: String,
    sections: Vec<Section>,
    /// Name to `(section, entry)` positions, in category order.
    by_name: HashMap<String, Vec<(usize, usize)>>,
}

impl SidebarIndex {
    /// Build an index for `module` from `(category, entries)` pairs.
    ///
    /// Fails if the module identifier is blank, if a category key is empty or repeated, or if
    /// a category contains an empty or repeated name. The same name may appear under
    /// different categories.
    pub fn new<I, C>(module: impl Into<String>, sections: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, Vec<SymbolEntry>)>,
        C: Into<String>,
    {
        let sections = sections
            .into_iter()
            .map(|(category, entries)| Section {
                category: category.into(),
                entries,
            })
            .collect();
        Self::from_sections(module.into(), sections)
    }

    /// Start building an index for `module` one entry at a time.
    pub fn builder(module: impl Into<String>) -> SidebarIndexBuilder {
        SidebarIndexBuilder {
            module: module.into(),
            sections: Vec::new(),
        }
    }

    fn from_sections(module: String, sections: Vec<Section>) -> Result<Self> {
        if module.trim().is_empty() {
            return Err(ValidationError::EmptyModule.into());
        }

        let mut categories = HashSet::with_capacity(sections.len());
        let mut by_name: HashMap<String, Vec<(usize, usize)>> = HashMap::new();
        for (section_idx, section) in sections.iter().enumerate() {
            if section.category.is_empty() {
                return Err(ValidationError::EmptyCategory { module }.into());
            }
            if !categories.insert(section.category.as_str()) {
                return Err(ValidationError::DuplicateCategory {
                    module,
                    category: section.category.clone(),
                }
                .into());
            }

            let mut names = HashSet::with_capacity(section.entries.len());
            for (entry_idx, entry) in section.entries.iter().enumerate() {
                if entry.name().is_empty() {
                    return Err(ValidationError::EmptyName {
                        module,
                        category: section.category.clone(),
                        position: entry_idx,
                    }
                    .into());
                }
                if !names.insert(entry.name()) {
                    return Err(ValidationError::DuplicateName {
                        module,
                        category: section.category.clone(),
                        name: entry.name().to_string(),
                    }
                    .into());
                }
                by_name
                    .entry(entry.name().to_string())
                    .or_default()
                    .push((section_idx, entry_idx));
            }
        }

        Ok(Self {
            module,
            sections,
            by_name,
        })
    }

    /// Decode a record (bare JSON or a rustdoc `sidebar-items.js` script) for `module`.
    pub fn from_json(module: &str, bytes: &[u8]) -> Result<Self> {
        transport::decode(module, bytes)
    }

    /// Encode this index as a JSON record.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        transport::encode(self)
    }

    /// Encode this index in the `initSidebarItems({...});` script form.
    pub fn to_script(&self) -> Result<String> {
        transport::encode_script(self)
    }

    /// The module this index describes.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Category keys in construction order.
    ///
    /// The iterator is cheap to clone; calling this again starts from the first category.
    pub fn categories(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.sections
            .iter()
            .map(|section| section.category.as_str())
    }

    /// Entries listed under `category`, or an empty slice if the module has none.
    pub fn entries_for(&self, category: &str) -> &[SymbolEntry] {
        self.sections
            .iter()
            .find(|section| section.category == category)
            .map(|section| section.entries.as_slice())
            .unwrap_or_default()
    }

    /// Each category with its entries, in construction order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &[SymbolEntry])> + '_ {
        self.sections
            .iter()
            .map(|section| (section.category.as_str(), section.entries.as_slice()))
    }

    /// Look up `name` across all categories.
    ///
    /// If the name is listed under more than one category, the earliest category wins.
    pub fn find(&self, name: &str) -> Option<SymbolMatch<'_>> {
        let &(section, entry) = self.by_name.get(name)?.first()?;
        Some(self.match_at(section, entry))
    }

    /// Every entry named `name`, in category order.
    pub fn find_all<'a>(&'a self, name: &str) -> impl Iterator<Item = SymbolMatch<'a>> + use<'a> {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .map(move |&(section, entry)| self.match_at(section, entry))
    }

    /// Whether any category lists `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|section| section.entries.len()).sum()
    }

    /// Whether the index has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn match_at(&self, section: usize, entry: usize) -> SymbolMatch<'_> {
        let section = &self.sections[section];
        SymbolMatch {
            category: &section.category,
            entry: &section.entries[entry],
        }
    }
}

/// Incremental constructor for a [`SidebarIndex`]. Validation happens in
/// [`SidebarIndexBuilder::build`].
#[derive(Debug, Clone)]
pub struct SidebarIndexBuilder {
    module: String,
    sections: Vec<Section>,
}

impl SidebarIndexBuilder {
    /// Append an entry to `category`, creating the category after the existing ones the first
    /// time it is used.
    pub fn entry(
        mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        let category = category.into();
        let entry = SymbolEntry::new(name, summary);
        match self
            .sections
            .iter_mut()
            .find(|section| section.category == category)
        {
            Some(section) => section.entries.push(entry),
            None => self.sections.push(Section {
                category,
                entries: vec![entry],
            }),
        }
        self
    }

    /// Add a whole category. Adding the same category twice fails at build time.
    pub fn section(
        mut self,
        category: impl Into<String>,
        entries: impl IntoIterator<Item = SymbolEntry>,
    ) -> Self {
        self.sections.push(Section {
            category: category.into(),
            entries: entries.into_iter().collect(),
        });
        self
    }

    /// Validate and produce the index.
    pub fn build(self) -> Result<SidebarIndex> {
        SidebarIndex::from_sections(self.module, self.sections)
    }
}
