//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use wicket_core::auth::AuthError;

use crate::common::{TaskKind, ToastLevel};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::form::{self, FormContext};
use crate::mutations::{FlowMutation, StateMutation, ToastMutation};
use crate::overlays::{
    self, ForgotPasswordState, Overlay, OverlayRequest, OverlayTransition, TwoFactorState,
};
use crate::state::{AppState, LoginFlow, TuiState};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = match event {
        UiEvent::Tick => {
            // Advance the spinner only while something animates
            if app.tui.flow.is_submitting() {
                app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            }
            app.tui.toasts.prune(Instant::now());
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if ok {
                update(app, *completed.result)
            } else {
                // Superseded or canceled; drop the stale result
                vec![]
            }
        }
        UiEvent::AuthResult { result } => handle_auth_result(app, result),
    };
    assign_task_ids(&mut app.tui, effects)
}

/// Fills in task ids for spawn effects emitted with `task: None`.
///
/// Handlers stay ignorant of the id source; every spawn that reaches the
/// runtime still carries a unique id for stale-completion checks.
fn assign_task_ids(tui: &mut TuiState, effects: Vec<UiEffect>) -> Vec<UiEffect> {
    effects
        .into_iter()
        .map(|effect| match effect {
            UiEffect::SpawnAuthenticate {
                task: None,
                request,
            } => UiEffect::SpawnAuthenticate {
                task: Some(tui.task_seq.next_id()),
                request,
            },
            other => other,
        })
        .collect()
}

// ============================================================================
// StateMutation Dispatcher
// ============================================================================

fn apply_mutations(tui: &mut TuiState, mutations: Vec<StateMutation>) {
    for mutation in mutations {
        match mutation {
            StateMutation::Flow(mutation) => apply_flow_mutation(tui, mutation),
            StateMutation::Toast(mutation) => apply_toast_mutation(tui, mutation),
        }
    }
}

fn apply_flow_mutation(tui: &mut TuiState, mutation: FlowMutation) {
    match mutation {
        FlowMutation::BeginSubmit { username, remember } => {
            tui.flow = LoginFlow::Submitting {
                started: Instant::now(),
                username,
                remember,
            };
        }
        FlowMutation::Reset => tui.flow = LoginFlow::Idle,
    }
}

fn apply_toast_mutation(tui: &mut TuiState, mutation: ToastMutation) {
    match mutation {
        ToastMutation::Push { level, message } => tui.toasts.push(level, message),
    }
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Paste(text) => handle_paste(app, &text),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Try to dispatch to the active overlay
    if let Some(mut update) = overlays::handle_overlay_key(&mut app.overlay, key) {
        apply_mutations(&mut app.tui, std::mem::take(&mut update.mutations));
        apply_overlay_transition(app, update.transition);
        return vec![];
    }

    if let Some(effects) = handle_global_key(app, key) {
        return effects;
    }

    // No overlay active - delegate to the form feature
    let ctx = FormContext {
        submitting: app.tui.flow.is_submitting(),
        form_token: &app.tui.form_token,
    };
    let (effects, mutations) = form::handle_form_key(&mut app.tui.form, &ctx, key);
    apply_mutations(&mut app.tui, mutations);
    effects
}

/// Shortcuts that work regardless of which form control has focus.
///
/// Returns `None` when the key is not a shortcut, so the caller falls
/// through to the form feature.
fn handle_global_key(app: &mut AppState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.tui.should_quit = true;
            Some(vec![UiEffect::Quit])
        }
        KeyCode::Char('t') if ctrl => {
            app.tui.theme = app.tui.theme.toggle();
            Some(vec![UiEffect::PersistTheme {
                theme: app.tui.theme,
            }])
        }
        KeyCode::Char('f') if ctrl => {
            open_overlay(app, OverlayRequest::ForgotPassword);
            Some(vec![])
        }
        KeyCode::Char('o') if ctrl => {
            // Reopen the code entry after an accidental dismiss
            if app.tui.flow.awaiting_two_factor() {
                open_overlay(app, OverlayRequest::TwoFactor);
            }
            Some(vec![])
        }
        KeyCode::Char('g') if alt => Some(social_sign_in(&mut app.tui, "Google")),
        KeyCode::Char('b') if alt => Some(social_sign_in(&mut app.tui, "Facebook")),
        KeyCode::Esc if app.tui.flow.is_submitting() => Some(cancel_sign_in(&mut app.tui)),
        _ => None,
    }
}

/// Stubbed social sign-in: the original page only logs and toasts here,
/// it never navigates.
fn social_sign_in(tui: &mut TuiState, provider: &str) -> Vec<UiEffect> {
    tracing::info!(provider, "social sign-in selected");
    tui.toasts.push(
        ToastLevel::Info,
        format!("Redirecting to the {provider} sign-in page..."),
    );
    vec![]
}

/// Abandons the in-flight sign-in attempt.
///
/// The flow resets immediately; the canceled task may still settle later,
/// and `handle_auth_result` drops that result because nothing is waiting.
fn cancel_sign_in(tui: &mut TuiState) -> Vec<UiEffect> {
    tui.flow = LoginFlow::Idle;
    tui.toasts.push(ToastLevel::Info, "Sign-in canceled.");
    vec![UiEffect::CancelTask {
        kind: TaskKind::Authenticate,
        token: tui.tasks.authenticate.cancel.clone(),
    }]
}

/// A click outside an open overlay dismisses it, like a backdrop click.
///
/// Dismissal drops the overlay state; Ctrl+O reopens the code entry with
/// blank cells.
fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    if !matches!(mouse.kind, MouseEventKind::Down(_)) || app.overlay.is_none() {
        return vec![];
    }

    let area = app.tui.overlay_area.get();
    if !area.contains(Position::new(mouse.column, mouse.row)) {
        app.overlay = None;
    }
    vec![]
}

fn handle_paste(app: &mut AppState, text: &str) -> Vec<UiEffect> {
    if let Some(mut update) = overlays::handle_overlay_paste(&mut app.overlay, text) {
        apply_mutations(&mut app.tui, std::mem::take(&mut update.mutations));
        apply_overlay_transition(app, update.transition);
        return vec![];
    }

    let ctx = FormContext {
        submitting: app.tui.flow.is_submitting(),
        form_token: &app.tui.form_token,
    };
    form::handle_form_paste(&mut app.tui.form, &ctx, text);
    vec![]
}

// ============================================================================
// Overlay Plumbing
// ============================================================================

fn apply_overlay_transition(app: &mut AppState, transition: OverlayTransition) {
    match transition {
        OverlayTransition::Stay => {}
        OverlayTransition::Close => app.overlay = None,
    }
}

fn open_overlay(app: &mut AppState, request: OverlayRequest) {
    app.overlay = Some(match request {
        OverlayRequest::TwoFactor => {
            Overlay::TwoFactor(TwoFactorState::open(app.tui.config.otp_digits))
        }
        OverlayRequest::ForgotPassword => {
            Overlay::ForgotPassword(ForgotPasswordState::open(app.tui.form.username.text()))
        }
    });
}

// ============================================================================
// Auth Settlement
// ============================================================================

/// Settles the in-flight sign-in attempt.
fn handle_auth_result(app: &mut AppState, result: Result<(), AuthError>) -> Vec<UiEffect> {
    let flow = std::mem::replace(&mut app.tui.flow, LoginFlow::Idle);
    let LoginFlow::Submitting {
        username, remember, ..
    } = flow
    else {
        // The attempt was canceled; nothing is waiting on this result
        return vec![];
    };

    match result {
        Ok(()) => {
            app.tui.flow = LoginFlow::AwaitingTwoFactor;
            open_overlay(app, OverlayRequest::TwoFactor);
            // Remember-me settles only on success: save when checked,
            // clear any previous value when not
            let username = remember.then_some(username);
            vec![UiEffect::PersistCredentials { username }]
        }
        Err(error) => {
            app.tui.toasts.push(ToastLevel::Error, error.to_string());
            vec![]
        }
    }
}
