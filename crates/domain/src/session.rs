//! Session marker — the cookie that gates the dashboard.
//!
//! A session carries no payload: holding a non-empty `auth_token` cookie is
//! all it takes to be considered logged in.

use std::time::Duration;

use serde::Deserialize;

/// Cookie name carrying the session marker.
pub const COOKIE_NAME: &str = "auth_token";

/// Lifetime of an issued session.
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24);

/// The single username/password pair accepted by the login gate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Exact, case-sensitive comparison of both fields.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// A `Set-Cookie` instruction for the session marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: &'static str,
    pub value: String,
    pub path: &'static str,
    pub http_only: bool,
    pub max_age: Duration,
}

impl SessionCookie {
    /// A fresh session marker with an opaque random value.
    #[must_use]
    pub fn issue() -> Self {
        Self {
            name: COOKIE_NAME,
            value: uuid::Uuid::new_v4().simple().to_string(),
            path: "/",
            http_only: true,
            max_age: SESSION_TTL,
        }
    }

    /// A marker with an empty value and zero lifetime, expiring any session.
    #[must_use]
    pub fn expired() -> Self {
        Self {
            name: COOKIE_NAME,
            value: String::new(),
            path: "/",
            http_only: true,
            max_age: Duration::ZERO,
        }
    }
}

/// Whether a received `auth_token` value marks an authenticated session.
#[must_use]
pub fn is_session_marker(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}
