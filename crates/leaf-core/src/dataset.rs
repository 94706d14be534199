//! Loaded headers and records

use crate::parse::{is_blank_record, parse_document};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// One row of field values, positionally aligned to the headers
pub type Record = Vec<String>;

/// Headers used when a structured source carries bare rows
pub const DEFAULT_HEADERS: &[&str] = &["First Name", "URL", "Email Address", "Company", "Position"];

/// Header keyword that marks the filterable column
pub const COMPANY_KEYWORD: &str = "company";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("no records found")]
    EmptyDataset,
    #[error("invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),
}

/// Headers plus records, read-only once constructed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

/// Shapes accepted by [`Dataset::from_json`]
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonSource {
    // Tried first: derived structs also accept sequences
    Rows(Vec<Vec<Value>>),
    Table {
        headers: Vec<String>,
        records: Vec<Vec<Value>>,
    },
}

impl Dataset {
    /// Build from already-structured headers and records.
    /// Fails if there are no records.
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::EmptyDataset);
        }
        info!(
            columns = headers.len(),
            records = records.len(),
            "dataset loaded"
        );
        Ok(Self { headers, records })
    }

    /// Parse raw CSV-like text (see [`parse_document`])
    pub fn from_text(text: &str) -> Result<Self, LoadError> {
        parse_document(text)
    }

    /// Load a structured JSON source.
    ///
    /// Accepts either `[[..], ..]` (rows only, `default_headers` apply) or
    /// `{"headers": [..], "records": [[..], ..]}`. Non-string JSON values are
    /// rendered to text, `null` becomes empty. All-blank rows are dropped.
    pub fn from_json(text: &str, default_headers: &[String]) -> Result<Self, LoadError> {
        let (headers, rows) = match serde_json::from_str::<JsonSource>(text)? {
            JsonSource::Rows(rows) => (default_headers.to_vec(), rows),
            JsonSource::Table { headers, records } => (headers, records),
        };

        let records = rows
            .into_iter()
            .map(|row| row.into_iter().map(value_to_field).collect::<Record>())
            .filter(|record| !is_blank_record(record))
            .collect();

        Self::new(headers, records)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, idx: usize) -> Option<&[String]> {
        self.records.get(idx).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of the first header containing `keyword`, case-insensitively
    pub fn column_containing(&self, keyword: &str) -> Option<usize> {
        let keyword = keyword.to_lowercase();
        self.headers
            .iter()
            .position(|header| header.to_lowercase().contains(&keyword))
    }

    /// The column the company filter targets
    pub fn company_column(&self) -> Option<usize> {
        self.column_containing(COMPANY_KEYWORD)
    }

    /// Field value, or `""` when the record is shorter than the headers
    pub fn value(&self, record_idx: usize, column: usize) -> &str {
        self.records
            .get(record_idx)
            .and_then(|record| record.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Default headers as owned strings
pub fn default_headers() -> Vec<String> {
    DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect()
}

fn value_to_field(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            Dataset::new(vec!["A".into()], vec![]),
            Err(LoadError::EmptyDataset)
        ));
    }

    #[test]
    fn test_company_column_case_insensitive() {
        let dataset = Dataset::new(
            vec!["Name".into(), "Current COMPANY name".into(), "Company".into()],
            vec![vec!["a".into(), "b".into(), "c".into()]],
        )
        .unwrap();
        assert_eq!(dataset.company_column(), Some(1));
    }

    #[test]
    fn test_company_column_missing() {
        let dataset = Dataset::new(vec!["Name".into()], vec![vec!["a".into()]]).unwrap();
        assert_eq!(dataset.company_column(), None);
    }

    #[test]
    fn test_value_short_record() {
        let dataset = Dataset::new(
            vec!["A".into(), "B".into()],
            vec![vec!["only".into()]],
        )
        .unwrap();
        assert_eq!(dataset.value(0, 0), "only");
        assert_eq!(dataset.value(0, 1), "");
        assert_eq!(dataset.value(5, 0), "");
    }

    #[test]
    fn test_from_json_rows_use_default_headers() {
        let json = r#"[["Ann","http://a.com","ann@x.com","Acme","Eng"],["","","","",""]]"#;
        let dataset = Dataset::from_json(json, &default_headers()).unwrap();
        assert_eq!(dataset.headers()[3], "Company");
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.company_column(), Some(3));
    }

    #[test]
    fn test_from_json_table_with_mixed_values() {
        let json = r#"{"headers":["Name","Age","Company"],"records":[["Ann",42,null]]}"#;
        let dataset = Dataset::from_json(json, &default_headers()).unwrap();
        assert_eq!(dataset.headers(), &["Name", "Age", "Company"].map(String::from)[..]);
        assert_eq!(dataset.record(0).unwrap(), &["Ann", "42", ""].map(String::from)[..]);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            Dataset::from_json("[]", &default_headers()),
            Err(LoadError::EmptyDataset)
        ));
        assert!(matches!(
            Dataset::from_json("{not json", &default_headers()),
            Err(LoadError::Json(_))
        ));
    }
}
