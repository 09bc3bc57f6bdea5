//! Customer records and field-completeness analysis

use serde::Serialize;
use serde_json::{Map, Value};

/// One table row as returned by the store, keyed by column name
pub type Row = Map<String, Value>;

/// Maximum characters of a value shown before truncation
pub const MAX_VALUE_CHARS: usize = 50;

/// Identification of a customer, as returned by the recency lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    /// Customer identifier
    pub customer_id: String,
    /// Full name, if recorded
    pub full_name: Option<String>,
    /// Creation timestamp as text
    pub created_at: Option<String>,
}

/// A customer record: column values in table column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Zip the ordered column list with a row.
    ///
    /// Columns missing from the row are recorded as null.
    #[must_use]
    pub fn from_row(columns: &[String], row: &Row) -> Self {
        let fields = columns
            .iter()
            .map(|col| (col.clone(), row.get(col).cloned().unwrap_or(Value::Null)))
            .collect();
        Self { fields }
    }

    /// Value of a column
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.iter().find(|(name, _)| name == column).map(|(_, v)| v)
    }

    /// Value of a column rendered as text, `None` when absent or null
    #[must_use]
    pub fn get_text(&self, column: &str) -> Option<String> {
        self.get(column).filter(|v| !v.is_null()).map(display_value)
    }

    /// Iterate over `(column, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no columns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Whether a value counts as filled: not null and not the empty string
#[must_use]
pub fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Render a value as plain text (strings without JSON quotes)
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Shorten text longer than [`MAX_VALUE_CHARS`] characters, appending `...`
#[must_use]
pub fn truncate_value(text: &str) -> String {
    if text.chars().count() > MAX_VALUE_CHARS {
        let head: String = text.chars().take(MAX_VALUE_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Render a value for the human report.
///
/// Only string values are shortened; numbers, booleans and JSON documents are
/// shown in full.
#[must_use]
pub fn report_value(value: &Value) -> String {
    match value {
        Value::String(s) => truncate_value(s),
        other => display_value(other),
    }
}

/// Filled share of `total`, as a percentage rounded to one decimal
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn completeness_percentage(filled: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = filled as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Field-completeness statistics for one record
#[derive(Debug, Clone, PartialEq)]
pub struct Completeness {
    /// Total number of columns
    pub total: usize,
    /// Filled column names, in column order
    pub filled: Vec<String>,
    /// Empty column names, in column order
    pub empty: Vec<String>,
    /// Filled percentage, one decimal
    pub percentage: f64,
}

impl Completeness {
    /// Partition a record's columns into filled and empty
    #[must_use]
    pub fn of(record: &Record) -> Self {
        let (filled, empty): (Vec<_>, Vec<_>) = record.iter().partition(|(_, v)| is_filled(v));
        let filled: Vec<String> = filled.into_iter().map(|(name, _)| name.to_string()).collect();
        let empty: Vec<String> = empty.into_iter().map(|(name, _)| name.to_string()).collect();

        Self {
            total: record.len(),
            percentage: completeness_percentage(filled.len(), record.len()),
            filled,
            empty,
        }
    }

    /// Number of filled columns
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.filled.len()
    }

    /// Key fields that are present as columns but empty, in key-field order
    #[must_use]
    pub fn missing_key_fields(&self, key_fields: &[String]) -> Vec<String> {
        key_fields.iter().filter(|k| self.empty.contains(k)).cloned().collect()
    }
}
