use super::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tracing::trace;

impl App {
    /// Translate a key press into app commands
    pub fn handle_key(&mut self, key: KeyEvent) {
        trace!(?key, "key");

        // Any key dismisses a popup message
        if self.message.is_some() {
            self.dismiss_message();
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if self.prompt_active() {
            self.handle_prompt_key(key);
            return;
        }

        match key.code {
            // Digit keys for vim-style counts (e.g., 10j)
            KeyCode::Char(c @ '0'..='9') => {
                self.push_count_digit(c as u8 - b'0');
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.reset_count();
                self.should_quit = true;
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                self.next_record();
            }
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                self.prev_record();
            }
            KeyCode::Home => self.goto_first(),
            KeyCode::End | KeyCode::Char('G') => self.goto_last(),
            KeyCode::Char('g') | KeyCode::Char(':') => self.start_jump(),
            KeyCode::Char('/') => self.start_filter(),
            KeyCode::Char('c') => self.clear_filter(),
            KeyCode::Char('y') => self.copy_email(),
            KeyCode::Char('Z') => {
                self.reset_count();
                self.zen_mode = !self.zen_mode;
            }
            KeyCode::Char('?') => {
                self.reset_count();
                self.toggle_help();
            }
            _ => {
                self.reset_count();
            }
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Esc => self.cancel_prompt(),
            KeyCode::Backspace => self.pop_prompt_char(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear_prompt_text();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cancel_prompt();
            }
            KeyCode::Char(ch) => self.push_prompt_char(ch),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if self.show_help || self.message.is_some() || self.prompt_active() {
            return;
        }
        self.reset_count();
        match event.kind {
            MouseEventKind::ScrollUp => self.prev_record(),
            MouseEventKind::ScrollDown => self.next_record(),
            _ => {}
        }
    }
}
