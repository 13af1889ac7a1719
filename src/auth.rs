//! Mocked authentication
//!
//! There is no identity backend: any non-empty credential pair signs in
//! as the fixed demo user after a simulated network delay. The delay is
//! configurable so tests can run with zero latency.

use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::models::{Role, User};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("email and password are required")]
    MissingCredentials,
}

/// The single account known to the demo build
pub fn demo_user() -> User {
    User {
        id: "1".into(),
        email: "demo@example.com".into(),
        name: "Demo User".into(),
        role: Role::Admin,
    }
}

/// Validate credentials against the mock backend.
///
/// Sleeps for `latency` to mimic a round trip, then accepts any
/// non-blank email/password pair.
pub async fn login(email: &str, password: &str, latency: Duration) -> Result<User, AuthError> {
    tokio::time::sleep(latency).await;

    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let user = demo_user();
    info!(email = %email, "login accepted");
    Ok(user)
}

/// The signed-in user for the lifetime of the process
#[derive(Debug, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!(email = %user.email, "signed out");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_accepts_any_non_empty_pair() {
        let user = login("someone@corp.test", "hunter2", Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(user, demo_user());
    }

    #[tokio::test]
    async fn test_login_rejects_blank_credentials() {
        let err = login("", "secret", Duration::ZERO).await.unwrap_err();
        assert_eq!(err, AuthError::MissingCredentials);

        let err = login("someone@corp.test", "   ", Duration::ZERO)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::MissingCredentials);
    }

    #[test]
    fn test_session_lifecycle() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());

        session.sign_in(demo_user());
        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().name, "Demo User");

        session.sign_out();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }
}
