//! Passenger — a row of the external passenger directory.

use serde::{Deserialize, Serialize};

/// A passenger account as listed by the directory.
///
/// The directory exposes the account's password in clear; it is kept for
/// completeness of the decoded record but never serialised back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    #[serde(rename = "accountID")]
    pub account_id: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub description: String,
}
