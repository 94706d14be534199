//! Application state and logic

use crate::config::ResolvedTheme;
use arboard::Clipboard;
use leaf_core::{NavError, RecordNavigator};
use tracing::{info, warn};

mod keys;
mod prompt;


use prompt::Prompt;

/// Severity of a popup message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// Dismissable popup, shown until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// The main application state
pub struct App {
    /// Record navigator driven by key commands
    pub navigator: RecordNavigator,
    /// Display name of the loaded source (file name or "stdin")
    pub source_name: String,
    /// Whether to quit
    pub should_quit: bool,
    /// Whether to show the help popover
    pub show_help: bool,
    /// Zen mode - hide status and filter bars
    pub zen_mode: bool,
    /// Resolved theme colors
    pub theme: ResolvedTheme,
    /// Text shown for blank values
    pub empty_placeholder: String,
    /// Pending count for vim-style commands (e.g., 10j = 10 records forward)
    pub pending_count: Option<usize>,
    /// One-line status shown in the status bar until the next command
    pub status: Option<String>,
    /// Active input prompt (jump or filter)
    prompt: Option<Prompt>,
    /// Popup message (errors from rejected commands)
    message: Option<Message>,
    /// Lazily opened system clipboard
    clipboard: Option<Clipboard>,
}

impl App {
    pub fn new(navigator: RecordNavigator, source_name: String) -> Self {
        Self {
            navigator,
            source_name,
            should_quit: false,
            show_help: false,
            zen_mode: false,
            theme: ResolvedTheme::default(),
            empty_placeholder: "None".to_string(),
            pending_count: None,
            status: None,
            prompt: None,
            message: None,
            clipboard: None,
        }
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    pub(crate) fn show_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.message = Some(Message {
            kind,
            text: text.into(),
        });
    }

    /// Surface a rejected command to the user
    pub(crate) fn report(&mut self, err: NavError) {
        warn!(error = %err, "command rejected");
        self.show_message(MessageKind::Error, err.to_string());
    }

    pub fn push_count_digit(&mut self, digit: u8) {
        let current = self.pending_count.unwrap_or(0);
        self.pending_count = Some(current.saturating_mul(10).saturating_add(digit as usize));
    }

    /// Take the pending count (defaults to 1) and clear it
    pub fn take_count(&mut self) -> usize {
        self.pending_count.take().unwrap_or(1).max(1)
    }

    pub fn reset_count(&mut self) {
        self.pending_count = None;
    }

    pub fn next_record(&mut self) {
        let count = self.take_count();
        self.status = None;
        for _ in 0..count {
            if !self.navigator.next() {
                break;
            }
        }
    }

    pub fn prev_record(&mut self) {
        let count = self.take_count();
        self.status = None;
        for _ in 0..count {
            if !self.navigator.previous() {
                break;
            }
        }
    }

    pub fn goto_first(&mut self) {
        self.reset_count();
        self.status = None;
        self.navigator.first();
    }

    pub fn goto_last(&mut self) {
        self.reset_count();
        self.status = None;
        self.navigator.last();
    }

    pub fn clear_filter(&mut self) {
        self.reset_count();
        if self.navigator.clear_filter() {
            self.status = Some("Filter cleared".to_string());
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Copy the current record's email address to the system clipboard
    pub fn copy_email(&mut self) {
        self.reset_count();
        let Some(email) = self.navigator.current_email().map(str::to_string) else {
            self.show_message(MessageKind::Info, "No email address in this record");
            return;
        };

        if self.clipboard.is_none() {
            match Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    warn!(error = %e, "clipboard unavailable");
                    self.show_message(MessageKind::Error, format!("Clipboard unavailable: {}", e));
                    return;
                }
            }
        }

        let result = match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.set_text(email.clone()),
            None => return,
        };
        match result {
            Ok(()) => {
                info!("copied email to clipboard");
                self.status = Some(format!("Copied {}", email));
            }
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                self.show_message(MessageKind::Error, format!("Copy failed: {}", e));
            }
        }
    }
}
