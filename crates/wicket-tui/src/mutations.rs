//! State mutations applied by the reducer.
//!
//! Key handlers return mutations instead of writing to `TuiState`
//! directly, keeping every state write in `update`.

use crate::common::ToastLevel;

/// A deferred write against `TuiState`.
#[derive(Debug, Clone, PartialEq)]
pub enum StateMutation {
    Flow(FlowMutation),
    Toast(ToastMutation),
}

/// Writes against the sign-in flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowMutation {
    /// Capture the submitted values and enter `Submitting`.
    BeginSubmit { username: String, remember: bool },
    /// Return to `Idle`.
    Reset,
}

/// Writes against the toast stack.
#[derive(Debug, Clone, PartialEq)]
pub enum ToastMutation {
    Push { level: ToastLevel, message: String },
}
