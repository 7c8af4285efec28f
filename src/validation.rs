// 📐 Form Validation
// Turns a raw Candidate into a NewMember, or reports the one field to fix.
//
// Policy: report a single error. Missing fields are checked first, in
// canonical order, and stop at the first hit. Age is only checked once
// every field has a value.

use crate::fields::FieldKey;
use crate::member::{Candidate, NewMember};
use thiserror::Error;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields. Please try again.")]
    MissingField(FieldKey),

    #[error("Invalid age. Please try again.")]
    InvalidAge,
}

impl ValidationError {
    /// Field the message belongs next to
    pub fn field(&self) -> FieldKey {
        match self {
            ValidationError::MissingField(key) => *key,
            ValidationError::InvalidAge => FieldKey::Age,
        }
    }
}

pub type ValidationResult = Result<NewMember, ValidationError>;

// ============================================================================
// VALIDATOR
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Validator
    }

    /// Validate a candidate: completeness first, then age
    pub fn validate(&self, candidate: &Candidate) -> ValidationResult {
        self.check_complete(candidate)?;
        let age = parse_age(&candidate.age).ok_or(ValidationError::InvalidAge)?;

        Ok(NewMember::new(
            candidate.relation.clone(),
            age,
            candidate.smoker,
        ))
    }

    /// First field without a value, in canonical order
    pub fn check_complete(&self, candidate: &Candidate) -> Result<(), ValidationError> {
        match candidate.values().find(|(_, value)| !value.has_value()) {
            Some((key, _)) => Err(ValidationError::MissingField(key)),
            None => Ok(()),
        }
    }
}

/// Whole base-10 integer, strictly positive. Surrounding whitespace is ignored.
pub fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|age| *age > 0)
}

// ============================================================================
// TESTS
// ============================================================================
