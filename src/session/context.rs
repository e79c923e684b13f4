use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::orders::LoyaltyLedger;
use crate::session::ConnectivityState;

/// The user the session acts for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: i32,
    pub name: String,
}

impl UserProfile {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Per-session state shared by the catalog and the order service
///
/// Connectivity is decided once by the startup probe. Loyalty points only grow,
/// and only through recorded orders.
#[derive(Debug, Clone)]
pub struct SessionContext {
    user: UserProfile,
    connectivity: ConnectivityState,
    loyalty: LoyaltyLedger,
    started_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(user: UserProfile) -> Self {
        Self {
            user,
            connectivity: ConnectivityState::Unknown,
            loyalty: LoyaltyLedger::new(),
            started_at: Utc::now(),
        }
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn connectivity(&self) -> ConnectivityState {
        self.connectivity
    }

    pub fn is_connected(&self) -> bool {
        self.connectivity.is_connected()
    }

    /// Cache the startup probe result
    ///
    /// Only the first probe counts; later calls leave the state untouched.
    pub fn record_probe(&mut self, result: ConnectivityState) -> ConnectivityState {
        if self.connectivity == ConnectivityState::Unknown {
            self.connectivity = result;
        } else {
            tracing::debug!(
                "Ignoring connectivity probe result {}, session already {}",
                result,
                self.connectivity
            );
        }
        self.connectivity
    }

    pub fn loyalty(&self) -> &LoyaltyLedger {
        &self.loyalty
    }

    pub fn loyalty_points(&self) -> u64 {
        self.loyalty.points()
    }

    pub(crate) fn credit_loyalty(&mut self, points: u32) -> u64 {
        self.loyalty.credit(points)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionContext {
        SessionContext::new(UserProfile::new(1, "Coffee Lover"))
    }

    #[test]
    fn test_new_session_is_not_connected() {
        let session = session();
        assert_eq!(session.connectivity(), ConnectivityState::Unknown);
        assert!(!session.is_connected());
        assert_eq!(session.loyalty_points(), 0);
    }

    #[test]
    fn test_probe_result_is_set_once() {
        let mut session = session();
        assert_eq!(
            session.record_probe(ConnectivityState::Connected),
            ConnectivityState::Connected
        );
        assert_eq!(
            session.record_probe(ConnectivityState::Offline),
            ConnectivityState::Connected
        );
        assert!(session.is_connected());
    }

    #[test]
    fn test_credit_loyalty() {
        let mut session = session();
        session.credit_loyalty(9);
        session.credit_loyalty(4);
        assert_eq!(session.loyalty_points(), 13);
        assert_eq!(session.loyalty().orders_credited(), 2);
    }
}
