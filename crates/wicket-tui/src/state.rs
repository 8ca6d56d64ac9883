//! TUI state model.
//!
//! ## State Hierarchy
//!
//! ```text
//! AppState
//! ├── TuiState (form, flow, toasts, theme, tasks)
//! └── Option<Overlay> (two-factor code entry, forgot-password dialog)
//! ```
//!
//! ## Split State Architecture
//!
//! The overlay lives beside `TuiState` rather than inside it so an
//! overlay handler can take `&mut self` while reading the rest of the
//! state without a borrow conflict.

use std::cell::Cell;
use std::time::Instant;

use ratatui::layout::Rect;
use wicket_core::auth;
use wicket_core::config::{Config, Theme};

use crate::common::{TaskSeq, Tasks, ToastState};
use crate::features::form::FormState;
use crate::overlays::Overlay;

/// Top-level application state.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    /// Builds the initial state from loaded configuration.
    pub fn new(config: Config) -> Self {
        let form = FormState::from_config(&config);
        Self {
            tui: TuiState {
                should_quit: false,
                form,
                flow: LoginFlow::Idle,
                toasts: ToastState::default(),
                theme: config.theme,
                tasks: Tasks::default(),
                task_seq: TaskSeq::default(),
                form_token: auth::generate_form_token(),
                spinner_frame: 0,
                overlay_area: Cell::new(Rect::default()),
                config,
            },
            overlay: None,
        }
    }
}

/// State for the main screen.
pub struct TuiState {
    /// Set when the user asked to leave; the event loop exits on it.
    pub should_quit: bool,
    /// Sign-in form fields and focus.
    pub form: FormState,
    /// Where the sign-in attempt currently stands.
    pub flow: LoginFlow,
    /// Transient notifications, newest last.
    pub toasts: ToastState,
    /// Active color palette selection.
    pub theme: Theme,
    /// Background task slots.
    pub tasks: Tasks,
    /// Monotonic task id source.
    pub task_seq: TaskSeq,
    /// Per-session anti-forgery token attached to submissions.
    pub form_token: String,
    /// Current animation frame for spinners.
    pub spinner_frame: usize,
    /// Last drawn overlay rect (set during render, used for
    /// outside-click dismissal).
    pub overlay_area: Cell<Rect>,
    /// Loaded configuration (mock backend knobs, OTP cell count).
    pub config: Config,
}

/// Where the sign-in attempt currently stands.
///
/// ```text
/// Idle -> Submitting          on a valid submit
/// Submitting -> Idle          on failure, cancel, or timeout
/// Submitting -> AwaitingTwoFactor   on success
/// AwaitingTwoFactor -> Idle   when the code entry is abandoned
/// ```
#[derive(Debug, Clone)]
pub enum LoginFlow {
    /// Waiting for input.
    Idle,
    /// A sign-in request is in flight.
    Submitting {
        /// When the request was spawned; drives the elapsed readout.
        started: Instant,
        /// Trimmed username captured at submit time.
        username: String,
        /// Remember-me choice captured at submit time.
        remember: bool,
    },
    /// Credentials accepted; waiting on the one-time code.
    AwaitingTwoFactor,
}

impl LoginFlow {
    pub fn is_submitting(&self) -> bool {
        matches!(self, LoginFlow::Submitting { .. })
    }

    pub fn awaiting_two_factor(&self) -> bool {
        matches!(self, LoginFlow::AwaitingTwoFactor)
    }
}
