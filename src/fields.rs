// 🏷️ Field Catalogue - the inputs a household form is made of
// Canonical order matters: validation walks the fields in this order.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// FIELD TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Free text or a select value; present when non-empty
    Text,
    /// Checkbox; any boolean counts as present
    Boolean,
}

// ============================================================================
// FIELD KEY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Relation,
    Age,
    Smoker,
}

impl FieldKey {
    /// All fields in canonical order
    pub const ALL: [FieldKey; 3] = [FieldKey::Relation, FieldKey::Age, FieldKey::Smoker];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Relation => "relation",
            FieldKey::Age => "age",
            FieldKey::Smoker => "smoker",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::Relation => "Relationship",
            FieldKey::Age => "Age",
            FieldKey::Smoker => "Smoker?",
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKey::Relation | FieldKey::Age => FieldType::Text,
            FieldKey::Smoker => FieldType::Boolean,
        }
    }

    /// Next field in canonical order (wraps around)
    pub fn next(&self) -> Self {
        match self {
            FieldKey::Relation => FieldKey::Age,
            FieldKey::Age => FieldKey::Smoker,
            FieldKey::Smoker => FieldKey::Relation,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            FieldKey::Relation => FieldKey::Smoker,
            FieldKey::Age => FieldKey::Relation,
            FieldKey::Smoker => FieldKey::Age,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FIELD VALUE
// ============================================================================

/// A raw value as read from one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Flag(bool),
}

impl FieldValue<'_> {
    /// Text needs at least one character; a checkbox is never missing.
    pub fn has_value(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Flag(_) => true,
        }
    }
}

// ============================================================================
// RELATION OPTIONS
// ============================================================================

/// Options offered by the relationship select. The empty entry is the
/// "---" placeholder the form starts on.
pub const RELATION_OPTIONS: [&str; 7] = [
    "",
    "self",
    "spouse",
    "child",
    "parent",
    "grandparent",
    "other",
];

// ============================================================================
// TESTS
// ============================================================================
