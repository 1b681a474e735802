//! Category keys emitted by rustdoc and their sidebar headings.
//!
//! The category set is open: indexes accept any non-empty key. These constants only name
//! the kinds rustdoc is known to produce.

/// Modules.
pub const MOD: &str = "mod";
/// `macro_rules!` macros.
pub const MACRO: &str = "macro";
/// Structs.
pub const STRUCT: &str = "struct";
/// Enums.
pub const ENUM: &str = "enum";
/// Unions.
pub const UNION: &str = "union";
/// Constants.
pub const CONSTANT: &str = "constant";
/// Statics.
pub const STATIC: &str = "static";
/// Traits.
pub const TRAIT: &str = "trait";
/// Free functions.
pub const FN: &str = "fn";
/// Type aliases.
pub const TYPE: &str = "type";
/// Primitive types.
pub const PRIMITIVE: &str = "primitive";
/// Keywords.
pub const KEYWORD: &str = "keyword";
/// Attribute macros.
pub const ATTR: &str = "attr";
/// Derive macros.
pub const DERIVE: &str = "derive";
/// Trait aliases.
pub const TRAIT_ALIAS: &str = "traitalias";
/// Extern types.
pub const FOREIGN_TYPE: &str = "foreigntype";

/// Known kinds in the order rustdoc lays out sidebar sections.
pub const KNOWN_KINDS: &[&str] = &[
    MOD,
    MACRO,
    STRUCT,
    ENUM,
    UNION,
    CONSTANT,
    STATIC,
    TRAIT,
    FN,
    TYPE,
    PRIMITIVE,
    KEYWORD,
    ATTR,
    DERIVE,
    TRAIT_ALIAS,
    FOREIGN_TYPE,
];

/// Whether `kind` is one rustdoc is known to emit.
pub fn is_known(kind: &str) -> bool {
    KNOWN_KINDS.contains(&kind)
}

/// Sidebar heading for a category. Unknown kinds are shown as their raw key.
pub fn label(kind: &str) -> &str {
    match kind {
        MOD => "Modules",
        MACRO => "Macros",
        STRUCT => "Structs",
        ENUM => "Enums",
        UNION => "Unions",
        CONSTANT => "Constants",
        STATIC => "Statics",
        TRAIT => "Traits",
        FN => "Functions",
        TYPE => "Type Definitions",
        PRIMITIVE => "Primitive Types",
        KEYWORD => "Keywords",
        ATTR => "Attribute Macros",
        DERIVE => "Derive Macros",
        TRAIT_ALIAS => "Trait Aliases",
        FOREIGN_TYPE => "Foreign Types",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(label(FN), "Functions");
        assert_eq!(label(TYPE), "Type Definitions");
        assert_eq!(label("opaque"), "opaque");
    }

    #[test]
    fn known() {
        assert!(is_known("constant"));
        assert!(!is_known("opaque"));
        assert!(KNOWN_KINDS.iter().all(|kind| label(kind) != *kind));
    }
}
