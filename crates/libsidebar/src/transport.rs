//! Wire format for sidebar records.
//!
//! A record is a JSON object keyed by category, each value an array of `[name, summary]`
//! pairs:
//!
//! ```text
//! {"fn":[["spawn","Spawns a new asynchronous task."]],"struct":[["JoinHandle","..."]]}
//! ```
//!
//! Decoding also accepts the script forms rustdoc writes to `sidebar-items.js`
//! (`initSidebarItems({...});` and `window.SIDEBAR_ITEMS = {...};`), and entries given as a
//! bare name, which later rustdoc releases emit in place of pairs.
#![allow(clippy::missing_docs_in_private_items)]

use std::{collections::HashSet, fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{DeserializeOwned, MapAccess, Visitor},
    ser::SerializeMap,
};
use serde_json::Value;

use crate::{
    entry::SymbolEntry,
    error::{Result, SidebarError},
    index::SidebarIndex,
};

/// Field path used for errors about the document as a whole.
pub const ROOT_FIELD: &str = "$";

/// Call wrapper used by older rustdoc releases.
const SCRIPT_CALL: &str = "initSidebarItems(";
/// Assignment used by newer rustdoc releases.
const SCRIPT_ASSIGN: &str = "window.SIDEBAR_ITEMS";

/// Records serialize as a map from category to entry pairs, preserving category order.
impl Serialize for SidebarIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories().count()))?;
        for (category, entries) in self.sections() {
            map.serialize_entry(category, entries)?;
        }
        map.end()
    }
}

/// Encode an index as a JSON record.
pub fn encode(index: &SidebarIndex) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(index)?)
}

/// Encode an index wrapped in an `initSidebarItems` call.
pub fn encode_script(index: &SidebarIndex) -> Result<String> {
    Ok(format!("{SCRIPT_CALL}{});", serde_json::to_string(index)?))
}

/// Members of a JSON object in document order. Repeated keys are kept, not merged.
#[derive(Debug)]
pub struct Members<V>(pub Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Members<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(MembersVisitor(PhantomData))
    }
}

struct MembersVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for MembersVisitor<V> {
    type Value = Members<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        let mut members = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(member) = access.next_entry::<String, V>()? {
            members.push(member);
        }
        Ok(Members(members))
    }
}

/// A parsed document: either an object whose members are kept in order, or any other value.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Document<V> {
    /// An object, members in order.
    Object(Members<V>),
    /// Anything that is not an object.
    Other(Value),
}

/// A single sidebar record as parsed, before validation.
pub type Record = Document<Value>;

/// Decode a record for `module` from bytes in any accepted form.
pub fn decode(module: &str, bytes: &[u8]) -> Result<SidebarIndex> {
    let record: Record = parse_document(bytes)?;
    decode_record(module, &record, None)
}

/// Parse bytes as JSON, unwrapping a rustdoc script if present.
pub fn parse_document<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| SidebarError::format(ROOT_FIELD, format!("not valid UTF-8: {e}")))?;
    let body = strip_script(text)?;
    serde_json::from_str(body).map_err(|e| SidebarError::format(ROOT_FIELD, e.to_string()))
}

/// Whether `c` may trail the payload of a script form.
fn is_script_tail(c: char) -> bool {
    c == ';' || c.is_whitespace()
}

/// Extract the JSON payload from the script forms, or return the trimmed input unchanged.
fn strip_script(text: &str) -> Result<&str> {
    let trimmed = text.trim_start_matches('\u{feff}').trim();
    if let Some(rest) = trimmed.strip_prefix(SCRIPT_CALL) {
        return rest
            .trim_end_matches(is_script_tail)
            .strip_suffix(')')
            .ok_or_else(|| SidebarError::format(ROOT_FIELD, "unterminated initSidebarItems call"));
    }
    if let Some(rest) = trimmed.strip_prefix(SCRIPT_ASSIGN) {
        return rest
            .trim_start()
            .strip_prefix('=')
            .map(|payload| payload.trim_start().trim_end_matches(is_script_tail))
            .ok_or_else(|| SidebarError::format(ROOT_FIELD, "expected `=` after SIDEBAR_ITEMS"));
    }
    Ok(trimmed)
}

/// Decode one parsed record.
///
/// `prefix` is prepended to field paths in errors; registry documents pass the module path.
/// A category key given twice is a format error naming that category.
pub fn decode_record(
    module: &str,
    record: &Record,
    prefix: Option<&str>,
) -> Result<SidebarIndex> {
    let categories = match record {
        Document::Object(Members(categories)) => categories,
        Document::Other(value) => {
            return Err(SidebarError::format(
                prefix.unwrap_or(ROOT_FIELD),
                format!("expected an object of categories, found {}", describe(value)),
            ));
        }
    };

    let mut seen = HashSet::with_capacity(categories.len());
    let mut sections = Vec::with_capacity(categories.len());
    for (category, entries) in categories {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{category}"),
            None => category.clone(),
        };
        if !seen.insert(category.as_str()) {
            return Err(SidebarError::format(path, "category supplied more than once"));
        }
        sections.push((category.as_str(), decode_entries(&path, entries)?));
    }
    SidebarIndex::new(module, sections)
}

fn decode_entries(path: &str, value: &Value) -> Result<Vec<SymbolEntry>> {
    let Value::Array(items) = value else {
        return Err(SidebarError::format(
            path,
            format!("expected an array of entries, found {}", describe(value)),
        ));
    };
    items
        .iter()
        .enumerate()
        .map(|(position, item)| decode_entry(&format!("{path}[{position}]"), item))
        .collect()
}

fn decode_entry(path: &str, value: &Value) -> Result<SymbolEntry> {
    match value {
        Value::String(name) => Ok(SymbolEntry::new(name.as_str(), "")),
        Value::Array(pair) => {
            if pair.is_empty() || pair.len() > 2 {
                return Err(SidebarError::format(
                    path,
                    format!("expected [name, summary], found {} elements", pair.len()),
                ));
            }
            let name = string_at(path, pair, 0)?;
            let summary = if pair.len() == 2 {
                string_at(path, pair, 1)?
            } else {
                ""
            };
            Ok(SymbolEntry::new(name, summary))
        }
        other => Err(SidebarError::format(
            path,
            format!("expected [name, summary], found {}", describe(other)),
        )),
    }
}

fn string_at<'a>(path: &str, pair: &'a [Value], position: usize) -> Result<&'a str> {
    match &pair[position] {
        Value::String(text) => Ok(text.as_str()),
        other => Err(SidebarError::format(
            format!("{path}[{position}]"),
            format!("expected a string, found {}", describe(other)),
        )),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
