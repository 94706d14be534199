//! Leaf Core - record parsing and step-through navigation
//!
//! Parses CSV-like text into headers and records and walks them one record
//! at a time, optionally narrowed to a company filter.

pub mod dataset;
pub mod field;
pub mod filter;
pub mod parse;
pub mod step;

pub use dataset::{default_headers, Dataset, LoadError, Record, DEFAULT_HEADERS};
pub use field::FieldKind;
pub use filter::FilterPredicate;
pub use parse::{format_line, parse_document, parse_line};
pub use step::{
    Command, FilterInfo, FilterState, Mode, NavError, NavState, RecordNavigator, RenderInfo,
    Snapshot, SnapshotField,
};
