//! Sign-in form state.

use wicket_core::config::Config;

use super::editor::LineEditor;

/// Focusable controls on the form, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
    RememberMe,
}

impl Field {
    /// Next control in Tab order, wrapping.
    pub fn next(self) -> Self {
        match self {
            Field::Username => Field::Password,
            Field::Password => Field::RememberMe,
            Field::RememberMe => Field::Username,
        }
    }

    /// Previous control in Tab order, wrapping.
    pub fn prev(self) -> Self {
        match self {
            Field::Username => Field::RememberMe,
            Field::Password => Field::Username,
            Field::RememberMe => Field::Password,
        }
    }
}

/// Everything the user can edit on the sign-in card.
#[derive(Debug, Clone)]
pub struct FormState {
    pub username: LineEditor,
    pub password: LineEditor,
    pub remember_me: bool,
    pub focus: Field,
    /// Inline error under the username field, set at submit.
    pub username_error: Option<&'static str>,
    /// Inline error under the password field, set at submit.
    pub password_error: Option<&'static str>,
    /// When set, the password renders as typed instead of masked.
    pub show_password: bool,
}

impl FormState {
    /// Builds the form, pre-filling the username when one was remembered.
    pub fn from_config(config: &Config) -> Self {
        let remembered = config.remembered_username();
        Self {
            username: remembered.map(LineEditor::with_text).unwrap_or_default(),
            password: LineEditor::new(),
            remember_me: remembered.is_some(),
            focus: Field::Username,
            username_error: None,
            password_error: None,
            show_password: false,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Editor for the focused field, or None on the checkbox.
    pub fn focused_editor_mut(&mut self) -> Option<&mut LineEditor> {
        match self.focus {
            Field::Username => Some(&mut self.username),
            Field::Password => Some(&mut self.password),
            Field::RememberMe => None,
        }
    }

    /// Clears the inline error belonging to the focused field.
    pub fn clear_focused_error(&mut self) {
        match self.focus {
            Field::Username => self.username_error = None,
            Field::Password => self.password_error = None,
            Field::RememberMe => {}
        }
    }
}
