use std::path::PathBuf;

use thiserror::Error;

/// Construction failures for a [`crate::SidebarIndex`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The module identifier was empty or blank.
    #[error("Module identifier must not be empty")]
    EmptyModule,

    /// A category key was empty.
    #[error("Empty category name in module `{module}`")]
    EmptyCategory {
        /// Module being constructed.
        module: String,
    },

    /// The same category key was supplied more than once.
    #[error("Category `{category}` supplied more than once in module `{module}`")]
    DuplicateCategory {
        /// Module being constructed.
        module: String,
        /// Repeated category key.
        category: String,
    },

    /// A symbol entry had an empty name.
    #[error("Empty symbol name at position {position} of `{category}` in module `{module}`")]
    EmptyName {
        /// Module being constructed.
        module: String,
        /// Category holding the entry.
        category: String,
        /// Zero-based position of the entry within its category.
        position: usize,
    },

    /// Two entries in one category share a name.
    #[error("Duplicate symbol `{name}` in `{category}` of module `{module}`")]
    DuplicateName {
        /// Module being constructed.
        module: String,
        /// Category holding both entries.
        category: String,
        /// The repeated name.
        name: String,
    },
}

/// Errors produced while building, decoding or loading sidebar indexes.
#[derive(Error, Debug)]
pub enum SidebarError {
    /// The index content violates a construction invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport data did not have the expected shape.
    #[error("Malformed sidebar data at `{field}`: {reason}")]
    Format {
        /// Path of the offending field, e.g. `struct[3][0]`.
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Failed to encode JSON.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read a sidebar file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// A sidebar file path could not be mapped to a module path.
    #[error("Invalid sidebar path: {0}")]
    InvalidPath(PathBuf),
}

impl SidebarError {
    /// Build a [`SidebarError::Format`] for the given field path.
    pub(crate) fn format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this is a construction-time validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether this is a malformed-transport failure.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SidebarError>;
