use super::{App, MessageKind};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Jump to a 1-based record number
    Jump,
    /// Company filter term
    Filter,
}

/// Single-line input prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    pub fn label(&self, total: usize) -> String {
        match self.kind {
            PromptKind::Jump => format!("Go to record (1-{}): ", total),
            PromptKind::Filter => "Company: ".to_string(),
        }
    }
}

impl App {
    pub fn start_jump(&mut self) {
        self.reset_count();
        self.prompt = Some(Prompt {
            kind: PromptKind::Jump,
            input: String::new(),
        });
    }

    /// Open the filter prompt, prefilled with the active term
    pub fn start_filter(&mut self) {
        self.reset_count();
        let input = self
            .navigator
            .filter_info()
            .map(|info| info.term)
            .unwrap_or_default();
        self.prompt = Some(Prompt {
            kind: PromptKind::Filter,
            input,
        });
    }

    pub fn prompt_active(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn push_prompt_char(&mut self, ch: char) {
        if let Some(prompt) = self.prompt.as_mut() {
            if prompt.kind == PromptKind::Jump && !ch.is_ascii_digit() && ch != '-' {
                return;
            }
            prompt.input.push(ch);
        }
    }

    pub fn pop_prompt_char(&mut self) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.input.pop();
        }
    }

    pub fn clear_prompt_text(&mut self) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.input.clear();
        }
    }

    /// Run the prompt's command. On failure the prompt stays open with its
    /// text so the user can correct it.
    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.clone() else {
            return;
        };
        debug!(kind = ?prompt.kind, input = %prompt.input, "prompt submitted");

        match prompt.kind {
            PromptKind::Jump => match self.navigator.jump_to_input(&prompt.input) {
                Ok(()) => {
                    self.prompt = None;
                    self.status = None;
                    if self.navigator.is_filtered() {
                        self.show_message(
                            MessageKind::Info,
                            "Jump applies to the full list; clear the filter to see it",
                        );
                    }
                }
                Err(err) => self.report(err),
            },
            PromptKind::Filter => match self.navigator.apply_filter(&prompt.input) {
                Ok(count) => {
                    self.prompt = None;
                    self.status = Some(format!(
                        "{} record(s) match \"{}\"",
                        count,
                        prompt.input.trim()
                    ));
                }
                Err(err) => self.report(err),
            },
        }
    }
}
