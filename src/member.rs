// 👤 Member Records - one person in the household
//
// A Candidate is what the form holds right now (raw, unchecked).
// A NewMember is a candidate that passed validation.
// A MemberRecord is a NewMember the store gave an identity to.

use crate::fields::{FieldKey, FieldValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// MEMBER ID
// ============================================================================

/// Stable identity of a record - assigned once, never changes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        MemberId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// CANDIDATE (raw form values)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub relation: String,
    pub age: String,
    pub smoker: bool,
}

impl Candidate {
    pub fn new(relation: impl Into<String>, age: impl Into<String>, smoker: bool) -> Self {
        Candidate {
            relation: relation.into(),
            age: age.into(),
            smoker,
        }
    }

    /// Raw value of one field
    pub fn value(&self, key: FieldKey) -> FieldValue<'_> {
        match key {
            FieldKey::Relation => FieldValue::Text(&self.relation),
            FieldKey::Age => FieldValue::Text(&self.age),
            FieldKey::Smoker => FieldValue::Flag(self.smoker),
        }
    }

    /// Every field with its raw value, in canonical order
    pub fn values(&self) -> impl Iterator<Item = (FieldKey, FieldValue<'_>)> {
        FieldKey::ALL.into_iter().map(move |key| (key, self.value(key)))
    }
}

// ============================================================================
// NEW MEMBER (validated, no identity yet)
// ============================================================================

/// Only the validator builds these, so every record in a store has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    relation: String,
    age: u32,
    smoker: bool,
}

impl NewMember {
    pub(crate) fn new(relation: String, age: u32, smoker: bool) -> Self {
        NewMember {
            relation,
            age,
            smoker,
        }
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn smoker(&self) -> bool {
        self.smoker
    }
}

// ============================================================================
// MEMBER RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Stable identity - NEVER changes
    pub id: MemberId,
    pub relation: String,
    pub age: u32,
    pub smoker: bool,
    /// When the record was added (informational, not part of identity)
    pub added_at: DateTime<Utc>,
}

impl MemberRecord {
    pub(crate) fn from_new(id: MemberId, member: NewMember) -> Self {
        MemberRecord {
            id,
            relation: member.relation,
            age: member.age,
            smoker: member.smoker,
            added_at: Utc::now(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_values_in_canonical_order() {
        let candidate = Candidate::new("child", "7", false);
        let values: Vec<_> = candidate.values().collect();

        assert_eq!(
            values,
            vec![
                (FieldKey::Relation, FieldValue::Text("child")),
                (FieldKey::Age, FieldValue::Text("7")),
                (FieldKey::Smoker, FieldValue::Flag(false)),
            ]
        );
    }

    #[test]
    fn test_default_candidate_is_blank_form() {
        let candidate = Candidate::default();
        assert!(candidate.relation.is_empty());
        assert!(candidate.age.is_empty());
        assert!(!candidate.smoker);
    }

    #[test]
    fn test_record_takes_values_from_new_member() {
        let record = MemberRecord::from_new(
            MemberId::new("42"),
            NewMember::new("spouse".to_string(), 38, true),
        );

        assert_eq!(record.id.as_str(), "42");
        assert_eq!(record.relation, "spouse");
        assert_eq!(record.age, 38);
        assert!(record.smoker);
    }

    #[test]
    fn test_member_id_serializes_as_plain_string() {
        let id = MemberId::new("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }
}
