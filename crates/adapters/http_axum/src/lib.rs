//! # relaydash-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small **JSON API** (`/api/login`, `/api/dashboard`,
//!   `/api/relay/start`, `/api/passengers`, …) and an **SSE stream** of
//!   dashboard snapshots
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript**: pure HTML forms + `<meta http-equiv="refresh">`
//! - Gate everything but the login and health endpoints behind the
//!   `auth_token` session cookie
//!
//! ## No-JS dashboard approach
//! - Every page is rendered server-side as complete HTML.
//! - Start/stop/refresh are `<form>` elements that POST back to the server
//!   and redirect (PRG pattern). Failures redirect with `?error=` and render
//!   an alert banner.
//! - The dashboard page reloads itself every `refresh_seconds`.
//!
//! ## Dependency rule
//! Depends on `relaydash-app` (for port traits and services) and
//! `relaydash-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;
