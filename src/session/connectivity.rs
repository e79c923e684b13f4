use serde::Serialize;
use std::fmt;

use crate::api::BackendClient;

/// Whether the backend can be used during this session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    /// Not probed yet; treated as offline
    Unknown,
    Connected,
    Offline,
}

impl ConnectivityState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectivityState::Unknown => "unknown",
            ConnectivityState::Connected => "connected",
            ConnectivityState::Offline => "offline",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectivityState::Connected)
    }
}

impl Default for ConnectivityState {
    fn default() -> Self {
        ConnectivityState::Unknown
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Single startup probe of the backend's health endpoint
pub struct ConnectivityMonitor;

impl ConnectivityMonitor {
    /// Probe `GET /health` once
    ///
    /// Never fails: any transport problem means `Offline`.
    pub async fn probe(backend: &BackendClient) -> ConnectivityState {
        match backend.health().await {
            Ok(()) => {
                tracing::info!("Backend reachable at {}", backend.base_url());
                ConnectivityState::Connected
            }
            Err(e) => {
                tracing::warn!("Backend unreachable, running in offline mode: {}", e);
                ConnectivityState::Offline
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_only_connected_counts_as_connected() {
        assert!(ConnectivityState::Connected.is_connected());
        assert!(!ConnectivityState::Offline.is_connected());
        assert!(!ConnectivityState::Unknown.is_connected());
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_string(&ConnectivityState::Offline).unwrap(),
            "\"offline\""
        );
        assert_eq!(ConnectivityState::default(), ConnectivityState::Unknown);
    }

    #[tokio::test]
    async fn test_probe_unreachable_backend_is_offline() {
        let backend = BackendClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        assert_eq!(
            ConnectivityMonitor::probe(&backend).await,
            ConnectivityState::Offline
        );
    }
}
