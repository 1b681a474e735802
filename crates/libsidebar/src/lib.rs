//! Libsidebar loads, validates and queries the sidebar item indexes rustdoc emits for each
//! module of a documentation site.
//!
//! A sidebar index maps a symbol kind ("struct", "fn", "trait", ...) to the ordered list of
//! public items of that kind, each with a one-line summary. The set of kinds is open: an index
//! accepts any category key, and [`kinds`] only names the ones rustdoc is known to produce.
//!
//! Indexes are immutable once built. A [`SidebarRegistry`] holds the indexes for many modules,
//! and a [`Loader`] fills one from a rustdoc output directory, loading every module
//! independently so one broken file only costs that module its sidebar.
//!
//! ```
//! use libsidebar::{SidebarIndex, kinds};
//!
//! let index = SidebarIndex::builder("bittrex::types")
//!     .entry(kinds::STRUCT, "Order", "Structure representing an order.")
//!     .entry(kinds::STRUCT, "OrderBook", "Structure representing an order book.")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(index.find("OrderBook").unwrap().category, "struct");
//! assert!(index.entries_for(kinds::ENUM).is_empty());
//! ```

/// Individual sidebar entries.
mod entry;
/// Error types.
mod error;
/// Per-module index and lookup.
mod index;
pub mod kinds;
/// Reading rustdoc output trees.
mod loader;
/// Multi-module registry.
mod registry;
/// Record encoding and decoding.
mod transport;

pub use crate::{
    entry::SymbolEntry,
    error::{Result, SidebarError, ValidationError},
    index::{SidebarIndex, SidebarIndexBuilder, SymbolMatch},
    loader::{Loader, SIDEBAR_FILE_NAME},
    registry::{LoadFailure, LoadReport, SidebarRegistry},
    transport::ROOT_FIELD,
};
