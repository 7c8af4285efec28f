// 🧾 Export Formatter - household list as human-readable text
// Output is for reading on screen, not for parsing back.

use crate::member::MemberRecord;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExportStyle {
    /// Pretty-printed JSON array, one field per line
    #[default]
    Json,
    /// Plain text blocks, one "key: value" line per field
    Text,
}

impl fmt::Display for ExportStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStyle::Json => f.write_str("json"),
            ExportStyle::Text => f.write_str("text"),
        }
    }
}

/// Serialize the household in display order
pub fn format_household(records: &[MemberRecord], style: ExportStyle) -> String {
    match style {
        ExportStyle::Json => format_json(records),
        ExportStyle::Text => format_text(records),
    }
}

fn format_json(records: &[MemberRecord]) -> String {
    let members: Vec<serde_json::Value> = records
        .iter()
        .map(|m| {
            json!({
                "id": m.id,
                "relation": m.relation,
                "age": m.age,
                "smoker": m.smoker,
                "added_at": m.added_at.to_rfc3339(),
            })
        })
        .collect();

    // Alternate Display of a Value is the pretty printer
    format!("{:#}", serde_json::Value::Array(members))
}

fn format_text(records: &[MemberRecord]) -> String {
    if records.is_empty() {
        return "(no household members)".to_string();
    }

    records
        .iter()
        .enumerate()
        .map(|(i, m)| {
            format!(
                "Member {}\n  id: {}\n  relation: {}\n  age: {}\n  smoker: {}",
                i + 1,
                m.id,
                m.relation,
                m.age,
                yes_no(m.smoker),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One-line caption for a list item
pub fn list_label(record: &MemberRecord) -> String {
    format!(
        "Relation: {} Age: {} Smoker: {}",
        record.relation,
        record.age,
        yes_no(record.smoker)
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

// ============================================================================
// TESTS
// ============================================================================
