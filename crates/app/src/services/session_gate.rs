//! Session gate — the login check in front of the dashboard.
//!
//! One configured credential pair, compared exactly. A successful login
//! issues a session cookie; logging out issues an expired one.

use relaydash_domain::error::RelayDashError;
use relaydash_domain::session::{Credentials, SessionCookie, is_session_marker};

/// Issues and revokes session markers.
pub struct SessionGate {
    credentials: Credentials,
}

impl SessionGate {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Check a login attempt.
    ///
    /// # Errors
    ///
    /// Returns [`RelayDashError::InvalidCredentials`] unless both fields equal
    /// the configured pair exactly.
    #[tracing::instrument(skip_all, fields(username = %username))]
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionCookie, RelayDashError> {
        if !self.credentials.matches(username, password) {
            tracing::info!("login rejected");
            return Err(RelayDashError::InvalidCredentials);
        }
        tracing::info!("login accepted");
        Ok(SessionCookie::issue())
    }

    /// A cookie that ends any session, whether or not one exists.
    #[must_use]
    pub fn revoke(&self) -> SessionCookie {
        SessionCookie::expired()
    }

    /// Whether the received session marker grants access.
    #[must_use]
    pub fn is_authenticated(&self, marker: Option<&str>) -> bool {
        is_session_marker(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> SessionGate {
        SessionGate::new(Credentials::new("jlatransport", "transjla"))
    }

    #[test]
    fn should_issue_cookie_when_credentials_match() {
        let cookie = gate().authenticate("jlatransport", "transjla").unwrap();
        assert_eq!(cookie.max_age.as_secs(), 86_400);
        assert!(cookie.http_only);
        assert_eq!(cookie.path, "/");
    }

    #[test]
    fn should_reject_every_other_pair() {
        let gate = gate();
        let attempts = [
            ("jlatransport", "wrong"),
            ("wrong", "transjla"),
            ("", ""),
            ("jlatransport ", "transjla"),
            ("Jlatransport", "transjla"),
            ("transjla", "jlatransport"),
        ];
        for (username, password) in attempts {
            let result = gate.authenticate(username, password);
            assert!(
                matches!(result, Err(RelayDashError::InvalidCredentials)),
                "{username}/{password} should be rejected"
            );
        }
    }

    #[test]
    fn should_revoke_with_zero_lifetime() {
        let gate = gate();
        let cookie = gate.revoke();
        assert!(cookie.max_age.is_zero());
        assert_eq!(cookie.value, "");

        // Same outcome after a login.
        let _ = gate.authenticate("jlatransport", "transjla").unwrap();
        assert!(gate.revoke().max_age.is_zero());
    }

    #[test]
    fn should_accept_only_present_markers() {
        let gate = gate();
        assert!(gate.is_authenticated(Some("token")));
        assert!(!gate.is_authenticated(Some("")));
        assert!(!gate.is_authenticated(None));
    }
}
