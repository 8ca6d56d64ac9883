//! UI effect types.
//!
//! Effects are the reducer's only way to reach the outside world. The
//! runtime executes them after each update: simple ones inline, spawn
//! effects as background tasks whose results come back as events.

use tokio_util::sync::CancellationToken;
use wicket_core::auth::LoginRequest;
use wicket_core::config::Theme;

use crate::common::{TaskId, TaskKind};

/// Side effects requested by the reducer.
#[derive(Debug)]
pub enum UiEffect {
    /// Exit the application.
    Quit,

    /// Start a sign-in attempt against the authentication backend.
    ///
    /// Handlers emit this with `task: None`; the reducer assigns the id
    /// before the effect reaches the runtime.
    SpawnAuthenticate {
        task: Option<TaskId>,
        request: LoginRequest,
    },

    /// Persist the active theme to the config file.
    PersistTheme { theme: Theme },

    /// Persist the remembered username, or clear it when `None`.
    PersistCredentials { username: Option<String> },

    /// Cancel a running background task by firing its token.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}
