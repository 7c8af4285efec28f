// Household Builder - Core Library
// Form core (validation, store, controller, export) usable without any UI

pub mod config;
pub mod controller;
pub mod fields;
pub mod formatter;
pub mod household;
pub mod member;
pub mod validation;

// Re-export commonly used types
pub use config::{init_logging, Settings};
pub use controller::{Action, Controller, Outcome, PresentationSurface};
pub use fields::{FieldKey, FieldType, FieldValue, RELATION_OPTIONS};
pub use formatter::{format_household, list_label, ExportStyle};
pub use household::{HouseholdStore, IdGenerator, IdStrategy};
pub use member::{Candidate, MemberId, MemberRecord, NewMember};
pub use validation::{parse_age, ValidationError, ValidationResult, Validator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
