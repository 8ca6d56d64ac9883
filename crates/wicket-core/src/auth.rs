//! Credentials, form token, and the simulated authentication backend.
//!
//! The real wire never appears here: `MockAuthenticator` stands in for a
//! backend by sleeping a configured delay and then accepting the attempt
//! with a configured probability.

use std::fmt;
use std::time::Duration;

use base64::Engine as _;
use rand::Rng as _;

use crate::config::MockAuthConfig;

/// Fixed key for the transport-shape obfuscation below.
const OBFUSCATION_KEY: &[u8] = b"secret_key";

/// Obfuscates a password into the shape a login request carries.
///
/// XOR with a fixed key, then base64. Reversible by anyone with the source,
/// so it provides no security; it only mirrors the shape a real client
/// would put on the wire. Confidentiality is the transport layer's job.
pub fn obfuscate_password(password: &str) -> String {
    let bytes: Vec<u8> = password
        .bytes()
        .zip(OBFUSCATION_KEY.iter().cycle())
        .map(|(b, k)| b ^ k)
        .collect();
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Generates the per-session anti-forgery token carried by each request.
///
/// Client-side scaffolding only: nothing validates it. A real deployment
/// gets this from the server and has it checked there.
pub fn generate_form_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Trimmed credentials captured from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Wire shape of a sign-in attempt.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password_obfuscated: String,
    pub form_token: String,
}

impl LoginRequest {
    pub fn new(credentials: &Credentials, form_token: &str) -> Self {
        Self {
            username: credentials.username.clone(),
            password_obfuscated: obfuscate_password(&credentials.password),
            form_token: form_token.to_string(),
        }
    }
}

/// Failure taxonomy for a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The backend rejected the credentials.
    RejectedCredentials,
    /// The request never completed (timeout, connection loss).
    Network(String),
    /// The backend failed on its side.
    Server(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::RejectedCredentials => write!(f, "Incorrect username or password"),
            AuthError::Network(msg) => write!(f, "Network error: {msg}"),
            AuthError::Server(msg) => write!(f, "Server error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Simulated authentication backend.
///
/// The request content never influences the outcome.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    delay: Duration,
    success_rate: f64,
}

impl MockAuthenticator {
    pub fn new(delay: Duration, success_rate: f64) -> Self {
        Self {
            delay,
            success_rate: success_rate.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: &MockAuthConfig) -> Self {
        Self::new(config.delay(), config.success_rate)
    }

    /// Waits the configured delay, then settles the attempt.
    pub async fn authenticate(&self, request: &LoginRequest) -> Result<(), AuthError> {
        tokio::time::sleep(self.delay).await;

        let accepted = rand::thread_rng().gen_bool(self.success_rate);
        tracing::info!(username = %request.username, accepted, "mock sign-in settled");

        if accepted {
            Ok(())
        } else {
            Err(AuthError::RejectedCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            username: "a@b.co".to_string(),
            password: "Abcdef12".to_string(),
        }
    }

    /// Obfuscation is deterministic and never echoes the input.
    #[test]
    fn test_obfuscate_password_shape() {
        let out = obfuscate_password("Abcdef12");
        assert_ne!(out, "Abcdef12");
        assert!(!out.contains("Abcdef12"));
        assert_eq!(out, obfuscate_password("Abcdef12"));
    }

    /// Obfuscation is reversible with the fixed key, which is the point
    /// of documenting it as non-security.
    #[test]
    fn test_obfuscate_password_is_reversible() {
        let out = obfuscate_password("Abcdef12");
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(out)
            .unwrap();
        let back: Vec<u8> = bytes
            .iter()
            .zip(OBFUSCATION_KEY.iter().cycle())
            .map(|(b, k)| b ^ k)
            .collect();
        assert_eq!(String::from_utf8(back).unwrap(), "Abcdef12");
    }

    /// Form tokens are hex, hyphen-less, and vary per call.
    #[test]
    fn test_generate_form_token() {
        let token = generate_form_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_form_token());
    }

    /// The request carries the obfuscated password, not the original.
    #[test]
    fn test_login_request_never_carries_plaintext() {
        let request = LoginRequest::new(&credentials(), "token");
        assert_eq!(request.username, "a@b.co");
        assert_ne!(request.password_obfuscated, "Abcdef12");
        assert_eq!(request.form_token, "token");
    }

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(
            AuthError::RejectedCredentials.to_string(),
            "Incorrect username or password"
        );
        assert_eq!(
            AuthError::Network("request timed out".to_string()).to_string(),
            "Network error: request timed out"
        );
        assert_eq!(
            AuthError::Server("boom".to_string()).to_string(),
            "Server error: boom"
        );
    }

    /// Success rate 1.0 always accepts.
    #[tokio::test(start_paused = true)]
    async fn test_mock_always_succeeds_at_rate_one() {
        let auth = MockAuthenticator::new(Duration::from_millis(1500), 1.0);
        let request = LoginRequest::new(&credentials(), "token");
        assert!(auth.authenticate(&request).await.is_ok());
    }

    /// Success rate 0.0 always rejects with the credentials error.
    #[tokio::test(start_paused = true)]
    async fn test_mock_always_rejects_at_rate_zero() {
        let auth = MockAuthenticator::new(Duration::from_millis(1500), 0.0);
        let request = LoginRequest::new(&credentials(), "token");
        assert_eq!(
            auth.authenticate(&request).await,
            Err(AuthError::RejectedCredentials)
        );
    }

    /// Out-of-range rates are clamped instead of panicking the draw.
    #[tokio::test(start_paused = true)]
    async fn test_mock_clamps_success_rate() {
        let auth = MockAuthenticator::new(Duration::ZERO, 7.5);
        let request = LoginRequest::new(&credentials(), "token");
        assert!(auth.authenticate(&request).await.is_ok());
    }
}
