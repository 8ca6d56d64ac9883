//! Forgot-password overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use wicket_core::validate;

use crate::common::ToastLevel;
use crate::common::text::sanitize_paste;
use crate::mutations::{StateMutation, ToastMutation};
use crate::theme::Palette;

use super::OverlayUpdate;
use super::render_utils::{
    InputHint, InputLine, OverlayConfig, render_input_line, render_overlay, render_separator,
};

/// State for the forgot-password overlay.
#[derive(Debug, Clone)]
pub struct ForgotPasswordState {
    /// The current input text for the reset email.
    pub(crate) input: String,
    /// Error message to display (e.g. invalid email).
    pub(crate) error: Option<String>,
}

impl ForgotPasswordState {
    /// Opens the overlay, prefilled with whatever the form already holds.
    pub fn open(prefill: &str) -> Self {
        Self {
            input: prefill.to_string(),
            error: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Clear error on any input
        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Enter => {
                let email = self.input.trim();
                if validate::valid_email(email) {
                    let message =
                        format!("If an account exists for {email}, a reset link is on its way.");
                    OverlayUpdate::close().with_mutations(vec![StateMutation::Toast(
                        ToastMutation::Push {
                            level: ToastLevel::Success,
                            message,
                        },
                    )])
                } else {
                    self.error = Some(validate::USERNAME_ERROR.to_string());
                    OverlayUpdate::stay()
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn handle_paste(&mut self, text: &str) -> OverlayUpdate {
        self.input.push_str(&sanitize_paste(text));
        self.error = None;
        OverlayUpdate::stay()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) -> Rect {
        let config = OverlayConfig {
            title: "Reset password".to_string(),
            width: 50,
            height: 7,
            hints: vec![
                InputHint::new("Enter", "send link"),
                InputHint::new("Esc", "cancel"),
            ],
        };
        let layout = render_overlay(frame, area, &config, palette);
        let body = layout.body;

        let input_area = Rect::new(body.x, body.y, body.width, 1);
        render_input_line(
            frame,
            input_area,
            &InputLine {
                value: &self.input,
                placeholder: "you@example.com",
            },
            palette,
        );

        render_separator(frame, Rect::new(body.x, body.y + 1, body.width, 1), palette);

        // Help text or error message
        let (help_text, help_style) = match &self.error {
            Some(error) => (error.as_str(), palette.muted_style().fg(palette.error)),
            None => (
                "We will email you a link to reset your password",
                palette.muted_style(),
            ),
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(help_text, help_style))),
            Rect::new(body.x, body.y + 2, body.width, 1),
        );

        render_separator(frame, Rect::new(body.x, body.y + 3, body.width, 1), palette);
        layout.popup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlays::OverlayTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_open_prefills_input() {
        let state = ForgotPasswordState::open("user@example.com");
        assert_eq!(state.input, "user@example.com");
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_typing_appends_and_backspace_pops() {
        let mut state = ForgotPasswordState::open("");
        state.handle_key(key(KeyCode::Char('a')));
        state.handle_key(key(KeyCode::Char('b')));
        assert_eq!(state.input, "ab");

        state.handle_key(key(KeyCode::Backspace));
        assert_eq!(state.input, "a");
    }

    #[test]
    fn test_invalid_email_shows_error_and_stays() {
        let mut state = ForgotPasswordState::open("not-an-email");
        let update = state.handle_key(key(KeyCode::Enter));

        assert!(matches!(update.transition, OverlayTransition::Stay));
        assert!(update.mutations.is_empty());
        assert_eq!(state.error.as_deref(), Some(validate::USERNAME_ERROR));
    }

    #[test]
    fn test_valid_email_closes_with_success_toast() {
        let mut state = ForgotPasswordState::open("  user@example.com  ");
        let update = state.handle_key(key(KeyCode::Enter));

        assert!(matches!(update.transition, OverlayTransition::Close));
        assert_eq!(
            update.mutations,
            vec![StateMutation::Toast(ToastMutation::Push {
                level: ToastLevel::Success,
                message: "If an account exists for user@example.com, a reset link is on its way."
                    .to_string(),
            })]
        );
    }

    /// Typing after a failed submit clears the stale error.
    #[test]
    fn test_typing_clears_error() {
        let mut state = ForgotPasswordState::open("bad");
        state.handle_key(key(KeyCode::Enter));
        assert!(state.error.is_some());

        state.handle_key(key(KeyCode::Char('x')));
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_escape_closes_without_mutations() {
        let mut state = ForgotPasswordState::open("whatever");
        let update = state.handle_key(key(KeyCode::Esc));

        assert!(matches!(update.transition, OverlayTransition::Close));
        assert!(update.mutations.is_empty());
    }

    #[test]
    fn test_paste_appends_sanitized_text() {
        let mut state = ForgotPasswordState::open("user");
        state.handle_paste("@exam\nple.com");
        assert_eq!(state.input, "user@example.com");
    }
}
