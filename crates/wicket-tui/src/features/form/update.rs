//! Sign-in form key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use wicket_core::auth::{Credentials, LoginRequest};
use wicket_core::validate::validate_credentials;

use crate::common::text::sanitize_paste;
use crate::effects::UiEffect;
use crate::mutations::{FlowMutation, StateMutation};

use super::editor::LineEditor;
use super::state::{Field, FormState};

/// Result type for key handlers.
pub type KeyResult = (Vec<UiEffect>, Vec<StateMutation>);

/// Groups the contextual state needed to decide how to handle a key
/// press, avoiding excessive function parameters.
pub struct FormContext<'a> {
    /// A sign-in attempt is in flight; the form is inert.
    pub submitting: bool,
    /// Anti-forgery token attached to submissions.
    pub form_token: &'a str,
}

/// Tracks which modifier keys are held.
struct Modifiers {
    ctrl: bool,
    shift: bool,
    alt: bool,
}

impl Modifiers {
    fn from(key: &KeyEvent) -> Self {
        Self {
            ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
            shift: key.modifiers.contains(KeyModifiers::SHIFT),
            alt: key.modifiers.contains(KeyModifiers::ALT),
        }
    }

    fn none(&self) -> bool {
        !self.ctrl && !self.shift && !self.alt
    }

    fn only_ctrl(&self) -> bool {
        self.ctrl && !self.shift && !self.alt
    }
}

/// Handles a key press aimed at the sign-in form.
pub fn handle_form_key(form: &mut FormState, ctx: &FormContext<'_>, key: KeyEvent) -> KeyResult {
    // Controls are inert while a sign-in attempt is outstanding
    if ctx.submitting {
        return (vec![], vec![]);
    }

    let mods = Modifiers::from(&key);

    // Try each handler category in order; first match wins
    handle_visibility_toggle(form, key.code, &mods)
        .or_else(|| handle_focus_keys(form, key.code, &mods))
        .or_else(|| handle_submission(form, ctx, key.code))
        .unwrap_or_else(|| handle_editing(form, key.code, &mods))
}

/// Inserts pasted text into the focused editor.
pub fn handle_form_paste(form: &mut FormState, ctx: &FormContext<'_>, text: &str) {
    if ctx.submitting {
        return;
    }

    let cleaned = sanitize_paste(text);
    if cleaned.is_empty() {
        return;
    }
    if let Some(editor) = form.focused_editor_mut() {
        editor.insert_str(&cleaned);
    }
    form.clear_focused_error();
}

fn handle_visibility_toggle(
    form: &mut FormState,
    code: KeyCode,
    mods: &Modifiers,
) -> Option<KeyResult> {
    match code {
        // Ctrl+R: reveal or mask the password
        KeyCode::Char('r') if mods.only_ctrl() => {
            form.show_password = !form.show_password;
            Some((vec![], vec![]))
        }
        _ => None,
    }
}

fn handle_focus_keys(form: &mut FormState, code: KeyCode, mods: &Modifiers) -> Option<KeyResult> {
    match code {
        KeyCode::Tab => {
            form.focus_next();
            Some((vec![], vec![]))
        }
        KeyCode::BackTab => {
            form.focus_prev();
            Some((vec![], vec![]))
        }
        KeyCode::Down if mods.none() => {
            form.focus_next();
            Some((vec![], vec![]))
        }
        KeyCode::Up if mods.none() => {
            form.focus_prev();
            Some((vec![], vec![]))
        }
        _ => None,
    }
}

fn handle_submission(
    form: &mut FormState,
    ctx: &FormContext<'_>,
    code: KeyCode,
) -> Option<KeyResult> {
    match code {
        KeyCode::Enter => Some(submit(form, ctx)),
        _ => None,
    }
}

/// Validates the trimmed fields and, when clean, starts the attempt.
fn submit(form: &mut FormState, ctx: &FormContext<'_>) -> KeyResult {
    let username = form.username.text().trim().to_string();
    let password = form.password.text().trim().to_string();

    // Assigning both results also clears stale errors on a clean pass
    let report = validate_credentials(&username, &password);
    form.username_error = report.username_error;
    form.password_error = report.password_error;
    if !report.is_ok() {
        return (vec![], vec![]);
    }

    let remember = form.remember_me;
    let request = LoginRequest::new(
        &Credentials {
            username: username.clone(),
            password,
        },
        ctx.form_token,
    );
    tracing::info!(username = %username, "submitting sign-in");

    (
        vec![UiEffect::SpawnAuthenticate {
            task: None,
            request,
        }],
        vec![StateMutation::Flow(FlowMutation::BeginSubmit {
            username,
            remember,
        })],
    )
}

fn handle_editing(form: &mut FormState, code: KeyCode, mods: &Modifiers) -> KeyResult {
    match code {
        // Space toggles the checkbox when it has focus
        KeyCode::Char(' ') if form.focus == Field::RememberMe => {
            form.remember_me = !form.remember_me;
        }
        KeyCode::Char(c) if !mods.ctrl && !mods.alt => {
            if let Some(editor) = form.focused_editor_mut() {
                editor.insert_char(c);
            }
            form.clear_focused_error();
        }
        KeyCode::Backspace => {
            let removed = form.focused_editor_mut().is_some_and(LineEditor::backspace);
            if removed {
                form.clear_focused_error();
            }
        }
        KeyCode::Delete => {
            let removed = form.focused_editor_mut().is_some_and(LineEditor::delete);
            if removed {
                form.clear_focused_error();
            }
        }
        KeyCode::Left => {
            if let Some(editor) = form.focused_editor_mut() {
                editor.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(editor) = form.focused_editor_mut() {
                editor.move_right();
            }
        }
        KeyCode::Home => {
            if let Some(editor) = form.focused_editor_mut() {
                editor.move_home();
            }
        }
        KeyCode::End => {
            if let Some(editor) = form.focused_editor_mut() {
                editor.move_end();
            }
        }
        _ => {}
    }
    (vec![], vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::StateMutation;

    fn form() -> FormState {
        FormState::from_config(&wicket_core::config::Config::default())
    }

    fn ctx() -> FormContext<'static> {
        FormContext {
            submitting: false,
            form_token: "token",
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(form: &mut FormState, text: &str) {
        for c in text.chars() {
            handle_form_key(form, &ctx(), key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = form();
        type_str(&mut form, "a@b.co");
        handle_form_key(&mut form, &ctx(), key(KeyCode::Tab));
        type_str(&mut form, "secret");

        assert_eq!(form.username.text(), "a@b.co");
        assert_eq!(form.password.text(), "secret");
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut form = form();
        assert_eq!(form.focus, Field::Username);
        handle_form_key(&mut form, &ctx(), key(KeyCode::Tab));
        assert_eq!(form.focus, Field::Password);
        handle_form_key(&mut form, &ctx(), key(KeyCode::Tab));
        assert_eq!(form.focus, Field::RememberMe);
        handle_form_key(&mut form, &ctx(), key(KeyCode::Tab));
        assert_eq!(form.focus, Field::Username);
        handle_form_key(&mut form, &ctx(), key(KeyCode::BackTab));
        assert_eq!(form.focus, Field::RememberMe);
    }

    #[test]
    fn test_space_toggles_remember_me() {
        let mut form = form();
        handle_form_key(&mut form, &ctx(), key(KeyCode::Tab));
        handle_form_key(&mut form, &ctx(), key(KeyCode::Tab));
        assert_eq!(form.focus, Field::RememberMe);

        handle_form_key(&mut form, &ctx(), key(KeyCode::Char(' ')));
        assert!(form.remember_me);
        handle_form_key(&mut form, &ctx(), key(KeyCode::Char(' ')));
        assert!(!form.remember_me);
    }

    /// Space on a text field is just a character.
    #[test]
    fn test_space_in_text_field_inserts() {
        let mut form = form();
        handle_form_key(&mut form, &ctx(), key(KeyCode::Char(' ')));
        assert_eq!(form.username.text(), " ");
        assert!(!form.remember_me);
    }

    #[test]
    fn test_ctrl_r_toggles_password_visibility() {
        let mut form = form();
        assert!(!form.show_password);
        handle_form_key(&mut form, &ctx(), ctrl_key('r'));
        assert!(form.show_password);
        handle_form_key(&mut form, &ctx(), ctrl_key('r'));
        assert!(!form.show_password);
    }

    /// Invalid fields set both inline errors and start nothing.
    #[test]
    fn test_submit_invalid_sets_errors_without_effects() {
        let mut form = form();
        type_str(&mut form, "user@");
        handle_form_key(&mut form, &ctx(), key(KeyCode::Tab));
        type_str(&mut form, "abc");

        let (effects, mutations) = handle_form_key(&mut form, &ctx(), key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(mutations.is_empty());
        assert!(form.username_error.is_some());
        assert!(form.password_error.is_some());
    }

    #[test]
    fn test_submit_valid_emits_spawn_and_begin_submit() {
        let mut form = form();
        type_str(&mut form, "  a@b.co  "); // trimmed at submit
        handle_form_key(&mut form, &ctx(), key(KeyCode::Tab));
        type_str(&mut form, "Abcdef12");

        let (effects, mutations) = handle_form_key(&mut form, &ctx(), key(KeyCode::Enter));

        assert_eq!(effects.len(), 1);
        let UiEffect::SpawnAuthenticate { task, request } = &effects[0] else {
            panic!("expected spawn effect");
        };
        assert!(task.is_none());
        assert_eq!(request.username, "a@b.co");
        assert_eq!(request.form_token, "token");

        assert_eq!(
            mutations,
            vec![StateMutation::Flow(FlowMutation::BeginSubmit {
                username: "a@b.co".to_string(),
                remember: false,
            })]
        );
        assert!(form.username_error.is_none());
        assert!(form.password_error.is_none());
    }

    /// Editing a field clears only that field's inline error.
    #[test]
    fn test_editing_clears_only_own_error() {
        let mut form = form();
        handle_form_key(&mut form, &ctx(), key(KeyCode::Enter));
        assert!(form.username_error.is_some());
        assert!(form.password_error.is_some());

        type_str(&mut form, "a");
        assert!(form.username_error.is_none());
        assert!(form.password_error.is_some());
    }

    #[test]
    fn test_form_inert_while_submitting() {
        let mut form = form();
        let busy = FormContext {
            submitting: true,
            form_token: "token",
        };

        handle_form_key(&mut form, &busy, key(KeyCode::Char('x')));
        let (effects, mutations) = handle_form_key(&mut form, &busy, key(KeyCode::Enter));

        assert_eq!(form.username.text(), "");
        assert!(effects.is_empty());
        assert!(mutations.is_empty());
    }

    #[test]
    fn test_paste_is_sanitized_and_inserted() {
        let mut form = form();
        handle_form_paste(&mut form, &ctx(), "user\n@example.com");
        assert_eq!(form.username.text(), "user@example.com");
    }

    /// A pasted value lands in the password field when it has focus.
    #[test]
    fn test_paste_respects_focus() {
        let mut form = form();
        handle_form_key(&mut form, &ctx(), key(KeyCode::Tab));
        handle_form_paste(&mut form, &ctx(), "Abcdef12");
        assert_eq!(form.password.text(), "Abcdef12");
        assert_eq!(form.username.text(), "");
    }
}
