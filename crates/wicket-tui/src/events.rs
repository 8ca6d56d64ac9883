//! UI event types.
//!
//! Everything the runtime feeds the reducer is one of these. Background
//! work reports back exclusively through `TaskStarted`/`TaskCompleted`,
//! with the task's own event boxed inside the completion.

use wicket_core::auth::AuthError;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Events consumed by `update`.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic timer for animations and toast expiry.
    Tick,

    /// Raw terminal input.
    Terminal(crossterm::event::Event),

    /// A background task was spawned.
    TaskStarted { kind: TaskKind, started: TaskStarted },

    /// A background task finished; its result event is routed back
    /// through the reducer unless the task was superseded.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Outcome of a sign-in attempt.
    AuthResult { result: Result<(), AuthError> },
}
