//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return a `UiEvent`. The runtime
//! spawns them through `spawn_task` and feeds the result back into the
//! reducer; no handler touches state directly.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wicket_core::auth::{AuthError, LoginRequest, MockAuthenticator};

use crate::events::UiEvent;

/// Hard ceiling on a sign-in round trip. A backend that takes longer is
/// reported as a network failure.
const AUTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs one sign-in attempt against the backend.
///
/// Settles with a network error when the attempt times out or when the
/// cancellation token fires first.
pub async fn authenticate(
    auth: MockAuthenticator,
    request: LoginRequest,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let result = attempt(&auth, &request, cancel).await;
    UiEvent::AuthResult { result }
}

async fn attempt(
    auth: &MockAuthenticator,
    request: &LoginRequest,
    cancel: Option<CancellationToken>,
) -> Result<(), AuthError> {
    let call = tokio::time::timeout(AUTH_TIMEOUT, auth.authenticate(request));

    match cancel {
        Some(token) => tokio::select! {
            () = token.cancelled() => Err(AuthError::Network("canceled".to_string())),
            settled = call => flatten_timeout(settled),
        },
        None => flatten_timeout(call.await),
    }
}

fn flatten_timeout(
    settled: Result<Result<(), AuthError>, tokio::time::error::Elapsed>,
) -> Result<(), AuthError> {
    settled.unwrap_or_else(|_| Err(AuthError::Network("request timed out".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wicket_core::auth::Credentials;

    fn request() -> LoginRequest {
        LoginRequest::new(
            &Credentials {
                username: "a@b.co".to_string(),
                password: "Abcdef12".to_string(),
            },
            "token",
        )
    }

    /// The configured delay elapses (in virtual time) and the result
    /// comes back as an AuthResult event.
    #[tokio::test(start_paused = true)]
    async fn test_authenticate_settles_after_delay() {
        let auth = MockAuthenticator::new(Duration::from_millis(1500), 1.0);

        let event = authenticate(auth, request(), None).await;

        let UiEvent::AuthResult { result } = event else {
            panic!("expected an auth result, got {event:?}");
        };
        assert_eq!(result, Ok(()));
    }

    /// A backend slower than the timeout is reported as a network error.
    #[tokio::test(start_paused = true)]
    async fn test_authenticate_times_out() {
        let auth = MockAuthenticator::new(AUTH_TIMEOUT + Duration::from_secs(5), 1.0);

        let event = authenticate(auth, request(), None).await;

        let UiEvent::AuthResult { result } = event else {
            panic!("expected an auth result, got {event:?}");
        };
        assert_eq!(
            result,
            Err(AuthError::Network("request timed out".to_string()))
        );
    }

    /// A canceled token settles the attempt without waiting out the delay.
    #[tokio::test(start_paused = true)]
    async fn test_authenticate_honors_cancellation() {
        let auth = MockAuthenticator::new(Duration::from_millis(1500), 1.0);
        let token = CancellationToken::new();
        token.cancel();

        let event = authenticate(auth, request(), Some(token)).await;

        let UiEvent::AuthResult { result } = event else {
            panic!("expected an auth result, got {event:?}");
        };
        assert_eq!(result, Err(AuthError::Network("canceled".to_string())));
    }
}
