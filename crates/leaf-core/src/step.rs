//! Step-through navigation over records, with an optional company filter

use crate::dataset::{Dataset, LoadError};
use crate::field::FieldKind;
use crate::filter::FilterPredicate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Rejected navigator commands. State is never changed by a failed command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("invalid record number {input:?}: enter a number between 1 and {max}")]
    InvalidInput { input: String, max: usize },
    #[error("enter a company name to search")]
    EmptyTerm,
    #[error("no records found for company: \"{term}\"")]
    NoMatches { term: String },
    #[error("company column not found in data")]
    ColumnNotFound,
    #[error("no records loaded")]
    EmptyDataset,
}

/// Active filter and its own cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Index into `matches`
    pub position: usize,
    /// Term as the user typed it
    pub term: String,
    /// Column the term was matched against
    pub column: usize,
    /// Dataset indices of matching records, in dataset order
    pub matches: Vec<usize>,
    /// Browsing position restored by `clear_filter`
    pub browse_position: usize,
}

/// Navigation state. Each mode carries its own position, so browsing and
/// filtered cursors cannot be mixed up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    /// Nothing loaded
    Empty,
    /// Walking the full dataset
    Browsing { position: usize },
    /// Walking the filtered view
    Filtered(FilterState),
}

/// Mode tag for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Empty,
    Browsing,
    Filtered,
}

/// Position counters and control enablement for the active source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderInfo {
    /// 1-based
    pub position: usize,
    pub total: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl RenderInfo {
    fn new(position: usize, total: usize) -> Self {
        Self {
            position: position + 1,
            total,
            prev_enabled: position > 0,
            next_enabled: position + 1 < total,
        }
    }
}

/// Filter details, present only while filtered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterInfo {
    pub term: String,
    pub column: usize,
    pub column_name: String,
    /// 1-based position within the results
    pub position: usize,
    pub total: usize,
}

/// One header/value pair of the current record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotField {
    pub header: String,
    pub value: String,
    pub kind: FieldKind,
}

/// Everything a presentation layer needs to paint the current state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub mode: Mode,
    /// Dataset index of the current record (0-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_index: Option<usize>,
    pub fields: Vec<SnapshotField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterInfo>,
}

/// Commands accepted by [`RecordNavigator::dispatch`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Next,
    Previous,
    First,
    Last,
    JumpTo(i64),
    ApplyFilter(String),
    ClearFilter,
}

/// Navigator for stepping through records
#[derive(Debug, Clone)]
pub struct RecordNavigator {
    dataset: Dataset,
    state: NavState,
}

impl Default for RecordNavigator {
    fn default() -> Self {
        Self::new(Dataset::default())
    }
}

impl RecordNavigator {
    pub fn new(dataset: Dataset) -> Self {
        let state = initial_state(&dataset);
        Self { dataset, state }
    }

    /// Parse raw text and start browsing at the first record
    pub fn from_text(text: &str) -> Result<Self, LoadError> {
        Dataset::from_text(text).map(Self::new)
    }

    /// Replace the dataset and start over at the first record
    pub fn load(&mut self, dataset: Dataset) {
        self.state = initial_state(&dataset);
        self.dataset = dataset;
    }

    /// Replace the dataset from raw text. On failure the navigator is left
    /// empty.
    pub fn load_text(&mut self, text: &str) -> Result<(), LoadError> {
        match Dataset::from_text(text) {
            Ok(dataset) => {
                self.load(dataset);
                Ok(())
            }
            Err(err) => {
                self.load(Dataset::default());
                Err(err)
            }
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        match self.state {
            NavState::Empty => Mode::Empty,
            NavState::Browsing { .. } => Mode::Browsing,
            NavState::Filtered(_) => Mode::Filtered,
        }
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self.state, NavState::Filtered(_))
    }

    /// Length of the active source (dataset or filtered view)
    pub fn active_len(&self) -> usize {
        match &self.state {
            NavState::Empty => 0,
            NavState::Browsing { .. } => self.dataset.len(),
            NavState::Filtered(filter) => filter.matches.len(),
        }
    }

    /// 0-based position within the active source
    pub fn position(&self) -> Option<usize> {
        match &self.state {
            NavState::Empty => None,
            NavState::Browsing { position } => Some(*position),
            NavState::Filtered(filter) => Some(filter.position),
        }
    }

    fn position_mut(&mut self) -> Option<&mut usize> {
        match &mut self.state {
            NavState::Empty => None,
            NavState::Browsing { position } => Some(position),
            NavState::Filtered(filter) => Some(&mut filter.position),
        }
    }

    /// Move to the next record. Returns false at the end (never wraps).
    pub fn next(&mut self) -> bool {
        let len = self.active_len();
        match self.position_mut() {
            Some(position) if *position + 1 < len => {
                *position += 1;
                debug!(position = *position, "next");
                true
            }
            _ => false,
        }
    }

    /// Move to the previous record. Returns false at the start.
    pub fn previous(&mut self) -> bool {
        match self.position_mut() {
            Some(position) if *position > 0 => {
                *position -= 1;
                debug!(position = *position, "previous");
                true
            }
            _ => false,
        }
    }

    /// Move to the first record of the active source
    pub fn first(&mut self) -> bool {
        match self.position_mut() {
            Some(position) if *position > 0 => {
                *position = 0;
                debug!("first");
                true
            }
            _ => false,
        }
    }

    /// Move to the last record of the active source
    pub fn last(&mut self) -> bool {
        let last = self.active_len().saturating_sub(1);
        match self.position_mut() {
            Some(position) if *position < last => {
                *position = last;
                debug!(position = last, "last");
                true
            }
            _ => false,
        }
    }

    /// Jump to a 1-based record number in the full dataset.
    ///
    /// While filtered, this moves the browsing position that `clear_filter`
    /// resumes at and leaves the filtered cursor alone.
    pub fn jump_to(&mut self, number: i64) -> Result<(), NavError> {
        let len = self.dataset.len();
        let target = usize::try_from(number)
            .ok()
            .filter(|n| (1..=len).contains(n))
            .ok_or_else(|| NavError::InvalidInput {
                input: number.to_string(),
                max: len,
            })?;

        match &mut self.state {
            NavState::Browsing { position } => *position = target - 1,
            NavState::Filtered(filter) => filter.browse_position = target - 1,
            NavState::Empty => {}
        }
        debug!(record = target, "jump");
        Ok(())
    }

    /// Parse user input as a record number and jump to it
    pub fn jump_to_input(&mut self, input: &str) -> Result<(), NavError> {
        let number = input
            .trim()
            .parse::<i64>()
            .map_err(|_| NavError::InvalidInput {
                input: input.trim().to_string(),
                max: self.dataset.len(),
            })?;
        self.jump_to(number)
    }

    /// Filter to records whose company column contains `term`
    /// (case-insensitive). Returns the number of matches.
    ///
    /// On failure the current state, including an earlier filter, is kept.
    pub fn apply_filter(&mut self, term: &str) -> Result<usize, NavError> {
        if term.trim().is_empty() {
            return Err(NavError::EmptyTerm);
        }
        let browse_position = match &self.state {
            NavState::Empty => return Err(NavError::EmptyDataset),
            NavState::Browsing { position } => *position,
            NavState::Filtered(filter) => filter.browse_position,
        };
        let column = self
            .dataset
            .company_column()
            .ok_or(NavError::ColumnNotFound)?;
        let predicate = FilterPredicate::new(column, term).ok_or(NavError::EmptyTerm)?;

        let matches = predicate.filtered_view(&self.dataset);
        if matches.is_empty() {
            warn!(term, "filter matched nothing");
            return Err(NavError::NoMatches {
                term: term.to_string(),
            });
        }

        let count = matches.len();
        debug!(term, column, count, "filter applied");
        self.state = NavState::Filtered(FilterState {
            position: 0,
            term: term.to_string(),
            column,
            matches,
            browse_position,
        });
        Ok(count)
    }

    /// Drop the filter and resume browsing where browsing left off.
    /// Returns false if no filter was active.
    pub fn clear_filter(&mut self) -> bool {
        let NavState::Filtered(filter) = &self.state else {
            return false;
        };
        let position = filter.browse_position;
        self.state = NavState::Browsing { position };
        debug!(position, "filter cleared");
        true
    }

    /// Dataset index of the current record
    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            NavState::Empty => None,
            NavState::Browsing { position } => Some(*position),
            NavState::Filtered(filter) => filter.matches.get(filter.position).copied(),
        }
    }

    pub fn current_record(&self) -> Result<&[String], NavError> {
        self.current_index()
            .and_then(|idx| self.dataset.record(idx))
            .ok_or(NavError::EmptyDataset)
    }

    /// First email-looking value of the current record
    pub fn current_email(&self) -> Option<&str> {
        let record = self.current_record().ok()?;
        self.dataset
            .headers()
            .iter()
            .zip(record)
            .find(|(header, value)| FieldKind::classify(header, value) == FieldKind::Email)
            .map(|(_, value)| value.as_str())
    }

    pub fn render_info(&self) -> Option<RenderInfo> {
        let position = self.position()?;
        Some(RenderInfo::new(position, self.active_len()))
    }

    pub fn filter_info(&self) -> Option<FilterInfo> {
        let NavState::Filtered(filter) = &self.state else {
            return None;
        };
        Some(FilterInfo {
            term: filter.term.clone(),
            column: filter.column,
            column_name: self
                .dataset
                .headers()
                .get(filter.column)
                .cloned()
                .unwrap_or_default(),
            position: filter.position + 1,
            total: filter.matches.len(),
        })
    }

    /// Header/value pairs for the current record. Missing trailing values
    /// are reported as empty; extra values beyond the headers are dropped.
    pub fn current_fields(&self) -> Vec<SnapshotField> {
        let Ok(record) = self.current_record() else {
            return Vec::new();
        };
        self.dataset
            .headers()
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = record.get(idx).cloned().unwrap_or_default();
                SnapshotField {
                    kind: FieldKind::classify(header, &value),
                    header: header.clone(),
                    value,
                }
            })
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode(),
            record_index: self.current_index(),
            fields: self.current_fields(),
            render: self.render_info(),
            filter: self.filter_info(),
        }
    }

    /// Run one command. Movement commands at a boundary are no-ops, not errors.
    pub fn dispatch(&mut self, command: Command) -> Result<(), NavError> {
        match command {
            Command::Next => {
                self.next();
            }
            Command::Previous => {
                self.previous();
            }
            Command::First => {
                self.first();
            }
            Command::Last => {
                self.last();
            }
            Command::JumpTo(number) => self.jump_to(number)?,
            Command::ApplyFilter(term) => {
                self.apply_filter(&term)?;
            }
            Command::ClearFilter => {
                self.clear_filter();
            }
        }
        Ok(())
    }
}

fn initial_state(dataset: &Dataset) -> NavState {
    if dataset.is_empty() {
        NavState::Empty
    } else {
        NavState::Browsing { position: 0 }
    }
}
