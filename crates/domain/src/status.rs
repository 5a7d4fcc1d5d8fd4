//! Relay server status and push channel health.

use serde::{Deserialize, Serialize};

/// Whether the remote retransmission server is forwarding frames.
///
/// The remote service is the source of truth; this copy is advisory and may
/// be stale between polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Running,
    #[default]
    Stopped,
    /// The relay answered but its status could not be understood.
    Error,
}

impl ServerStatus {
    /// Map the relay's `activo` flag.
    #[must_use]
    pub fn from_activo(activo: bool) -> Self {
        if activo { Self::Running } else { Self::Stopped }
    }

    /// Human label shown on the dashboard.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "En ejecución",
            Self::Stopped => "Detenido",
            Self::Error => "Error",
        }
    }
}

impl std::fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => f.write_str("running"),
            Self::Stopped => f.write_str("stopped"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Health of the push channel, independent of [`ServerStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
    Error,
}

impl ConnectionStatus {
    /// Human label shown on the dashboard.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Conectado",
            Self::Disconnected => "Desconectado",
            Self::Error => "Error",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connected => f.write_str("connected"),
            Self::Disconnected => f.write_str("disconnected"),
            Self::Error => f.write_str("error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_activo_flag() {
        assert_eq!(ServerStatus::from_activo(true), ServerStatus::Running);
        assert_eq!(ServerStatus::from_activo(false), ServerStatus::Stopped);
    }

    #[test]
    fn should_default_to_stopped_and_disconnected() {
        assert_eq!(ServerStatus::default(), ServerStatus::Stopped);
        assert_eq!(ConnectionStatus::default(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn should_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&ServerStatus::Running).unwrap(),
            "\"running\""
        );
        assert_eq!(
            serde_json::to_string(&ConnectionStatus::Error).unwrap(),
            "\"error\""
        );
    }

    #[test]
    fn should_label_in_spanish() {
        assert_eq!(ServerStatus::Stopped.label(), "Detenido");
        assert_eq!(ConnectionStatus::Connected.label(), "Conectado");
    }
}
