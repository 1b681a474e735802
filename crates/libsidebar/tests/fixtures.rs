//! Integration tests against sidebar files produced by rustdoc.
#![allow(clippy::tests_outside_test_module)]

mod utils;

use libsidebar::{SidebarIndex, SymbolEntry, kinds};
use pretty_assertions::assert_eq;
use utils::*;

#[test]
fn futures_io_round_trip() {
    let index = load_fixture("futures_util::io");
    assert_eq!(index.module(), "futures_util::io");
    assert_eq!(
        index.categories().collect::<Vec<_>>(),
        vec!["enum", "fn", "struct", "trait", "type"]
    );

    let decoded = SidebarIndex::from_json("futures_util::io", &index.to_json().unwrap()).unwrap();
    assert_eq!(decoded, index);

    let traits: Vec<(&str, &str)> = decoded
        .entries_for(kinds::TRAIT)
        .iter()
        .map(|entry| (entry.name(), entry.summary()))
        .collect();
    assert_eq!(
        traits,
        vec![
            ("AsyncBufRead", "Read bytes asynchronously."),
            (
                "AsyncBufReadExt",
                "An extension trait which adds utility methods to `AsyncBufRead` types."
            ),
            ("AsyncRead", "Read bytes asynchronously."),
            (
                "AsyncReadExt",
                "An extension trait which adds utility methods to `AsyncRead` types."
            ),
            ("AsyncSeek", "Seek bytes asynchronously."),
            (
                "AsyncSeekExt",
                "An extension trait which adds utility methods to `AsyncSeek` types."
            ),
            ("AsyncWrite", "Write bytes asynchronously."),
            (
                "AsyncWriteExt",
                "An extension trait which adds utility methods to `AsyncWrite` types."
            ),
        ]
    );
}

#[test]
fn futures_io_keeps_producer_order() {
    let index = load_fixture("futures_util::io");
    assert_eq!(index.entries_for(kinds::STRUCT).len(), 31);
    assert_eq!(
        names(&index, kinds::FN),
        vec!["copy", "copy_buf", "empty", "repeat", "sink"]
    );
    assert_eq!(index.len(), 47);
    assert_eq!(
        index.find("Result").unwrap().summary(),
        "A specialized `Result` type for I/O operations."
    );
    let cursor = index.find("Cursor").unwrap();
    assert_eq!(cursor.category, "struct");
    assert!(cursor.summary().contains("[`AsyncSeek`]"));
}

#[test]
fn script_and_json_forms_agree() {
    let from_script = SidebarIndex::from_json("tokio::task", &fixture_bytes("tokio::task")).unwrap();
    let script = from_script.to_script().unwrap();
    assert!(script.starts_with("initSidebarItems("));

    let from_json =
        SidebarIndex::from_json("tokio::task", &from_script.to_json().unwrap()).unwrap();
    let from_rewritten = SidebarIndex::from_json("tokio::task", script.as_bytes()).unwrap();
    assert_eq!(from_json, from_script);
    assert_eq!(from_rewritten, from_script);
}

#[test]
fn script_output_matches_rustdoc() {
    let bytes = fixture_bytes("bittrex::types");
    let index = SidebarIndex::from_json("bittrex::types", &bytes).unwrap();
    assert_eq!(
        index.to_script().unwrap(),
        String::from_utf8(bytes).unwrap().trim_end()
    );
}

#[test]
fn bittrex_lookup() {
    let index = load_fixture("bittrex::types");
    assert_eq!(
        index.entries_for(kinds::STRUCT)[4..6].to_vec(),
        vec![
            SymbolEntry::new("Order", "Structure representing an order."),
            SymbolEntry::new("OrderBook", "Structure representing an order book."),
        ]
    );

    let hit = index.find("OrderBook").unwrap();
    assert_eq!(
        (hit.category, hit.summary()),
        ("struct", "Structure representing an order book.")
    );
    assert!(index.find("Missing").is_none());

    let constants = index.entries_for(kinds::CONSTANT);
    assert_eq!(constants.len(), 7);
    assert!(constants.iter().all(|entry| !entry.has_summary()));
}

#[test]
fn absent_categories_are_empty() {
    let index = load_fixture("tokio::task");
    assert!(index.entries_for(kinds::ENUM).is_empty());
    assert!(index.entries_for(kinds::TRAIT).is_empty());
    assert!(index.entries_for("never-emitted").is_empty());
    assert_eq!(
        names(&index, kinds::FN),
        vec!["block_in_place", "spawn", "spawn_blocking", "yield_now"]
    );
}

#[test]
fn awkward_text_round_trips() {
    let index = SidebarIndex::builder("crate::ünïcode")
        .entry(kinds::STRUCT, "Größe", "Quotes \"inside\" and a \\ backslash.")
        .entry(kinds::STRUCT, "Line", "First line.\nSecond line.\ttabbed")
        .entry("opaque", "日本", "Keeps </script> and `code` intact.")
        .entry(kinds::FN, "emoji", "🦀 crab")
        .build()
        .unwrap();

    let from_json = SidebarIndex::from_json(index.module(), &index.to_json().unwrap()).unwrap();
    let from_script =
        SidebarIndex::from_json(index.module(), index.to_script().unwrap().as_bytes()).unwrap();
    assert_eq!(from_json, index);
    assert_eq!(from_script, index);
    assert_eq!(
        from_script.categories().collect::<Vec<_>>(),
        vec!["struct", "opaque", "fn"]
    );
    assert_eq!(
        from_script.find("Line").unwrap().summary(),
        "First line.\nSecond line.\ttabbed"
    );
}
