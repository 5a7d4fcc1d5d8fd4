//! # relaydash-adapter-signalr
//!
//! Push hub adapter speaking the SignalR JSON hub protocol over a websocket.
//!
//! ## Responsibilities
//! - Negotiate a connection token over HTTP
//! - Open the websocket and complete the JSON protocol handshake
//! - Keep the connection alive with pings and detect a silent server
//! - Turn hub records into [`HubMessage`](relaydash_app::ports::HubMessage)s
//!
//! ## Dependency rule
//! Depends on `relaydash-app` (the [`PushHub`](relaydash_app::ports::PushHub)
//! port) and `relaydash-domain`.

pub mod client;
pub mod config;
pub mod error;
pub mod negotiate;
pub mod protocol;

pub use client::SignalRHub;
pub use config::HubConfig;
pub use error::HubError;
