use rust_decimal::Decimal;
use serde::Serialize;
use validator::Validate;

use crate::api::{BackendClient, TransportError};
use crate::cart::Cart;
use crate::error::Notice;
use crate::orders::{
    CreateOrderRequest, Order, OrderError, OrderId, OrderLine, OrderSource, OrderType, SubmissionState,
    SubmissionTracker,
};
use crate::session::SessionContext;

/// How a placed order reached the history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum SubmissionPath {
    /// The backend accepted the order
    Remote,
    /// The session is offline; recorded locally without a remote attempt
    Offline,
    /// The remote attempt failed in transport; recorded locally instead
    Fallback { reason: String },
}

/// Result of a placement that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementOutcome {
    /// Nothing in the cart; nothing submitted, nothing changed
    EmptyCart,
    Placed { order: Order, path: SubmissionPath },
}

impl PlacementOutcome {
    pub fn order(&self) -> Option<&Order> {
        match self {
            PlacementOutcome::Placed { order, .. } => Some(order),
            PlacementOutcome::EmptyCart => None,
        }
    }

    /// User-facing notice for this outcome
    pub fn notice(&self) -> Notice {
        match self {
            PlacementOutcome::EmptyCart => Notice::info("Your cart is empty"),
            PlacementOutcome::Placed { order, path } => {
                let placed = format!("Order placed! Total: ${:.2}", order.total);
                match path {
                    SubmissionPath::Remote => Notice::success(placed),
                    SubmissionPath::Offline => {
                        Notice::success(format!("{} (saved offline)", placed))
                    }
                    SubmissionPath::Fallback { .. } => Notice::success(format!(
                        "{} (backend unavailable, saved offline)",
                        placed
                    )),
                }
            }
        }
    }
}

/// Append-only record of the orders placed in this session
#[derive(Debug, Clone, Default)]
pub struct OrderHistory {
    orders: Vec<Order>,
    local_orders: u64,
    highest_numeric_id: u64,
}

impl OrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn local_count(&self) -> u64 {
        self.local_orders
    }

    /// Id for the next locally recorded order
    ///
    /// Always above every numeric id already in the history, remote ones
    /// included, so local ids never repeat within a session.
    pub fn next_local_sequence(&self) -> u64 {
        self.local_orders.max(self.highest_numeric_id).saturating_add(1)
    }

    fn record(&mut self, order: Order) {
        if order.source == OrderSource::Local {
            self.local_orders += 1;
        }
        if let OrderId::Number(id) = order.id {
            self.highest_numeric_id = self.highest_numeric_id.max(id);
        }
        self.orders.push(order);
    }
}

/// Service for order placement
///
/// Turns the cart into an order of record, remotely when the session is
/// connected and locally otherwise. Recording the order, crediting loyalty
/// points and clearing the cart happen together, after every fallible step.
#[derive(Debug, Default)]
pub struct OrderService {
    history: OrderHistory,
    order_type: OrderType,
    last_state: SubmissionState,
}

impl OrderService {
    pub fn new(order_type: OrderType) -> Self {
        Self {
            history: OrderHistory::new(),
            order_type,
            last_state: SubmissionState::Idle,
        }
    }

    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Final state of the most recent placement attempt
    pub fn last_state(&self) -> SubmissionState {
        self.last_state
    }

    /// Place an order for the current cart contents
    ///
    /// # Arguments
    /// * `cart` - Cart to check out; cleared only when an order is recorded
    /// * `session` - Session whose connectivity picks the path and whose ledger is credited
    /// * `backend` - Client used for the remote attempt
    ///
    /// # Returns
    /// `EmptyCart` or the placed order and its path. A backend rejection is an
    /// error and leaves cart, history and loyalty untouched.
    pub async fn place_order(
        &mut self,
        cart: &mut Cart,
        session: &mut SessionContext,
        backend: &BackendClient,
    ) -> Result<PlacementOutcome, OrderError> {
        if cart.is_empty() {
            tracing::debug!("Order placement skipped: cart is empty");
            return Ok(PlacementOutcome::EmptyCart);
        }

        let mut tracker = SubmissionTracker::new();
        tracker
            .advance(SubmissionState::Submitting)
            .map_err(OrderError::InvalidTransition)?;
        self.last_state = tracker.state();

        let lines: Vec<OrderLine> = cart.entries().iter().map(OrderLine::from).collect();
        let total = cart.total();

        let result = if session.is_connected() {
            self.submit_remote(&lines, total, session.user().id, backend)
                .await
        } else {
            Ok(self.record_offline(lines, total, SubmissionPath::Offline))
        };

        let (order, path) = match result {
            Ok(placed) => placed,
            Err(e) => {
                tracker
                    .advance(SubmissionState::Failed)
                    .map_err(OrderError::InvalidTransition)?;
                self.last_state = tracker.state();
                return Err(e);
            }
        };

        tracker
            .advance(SubmissionState::Confirmed)
            .map_err(OrderError::InvalidTransition)?;
        self.last_state = tracker.state();

        // Commit: nothing below can fail
        let balance = session.credit_loyalty(order.loyalty_points_earned);
        self.history.record(order.clone());
        cart.clear();

        tracing::info!(
            "Order {} placed ({:?}): total {}, {} loyalty points earned, balance {}",
            order.id,
            order.source,
            order.total,
            order.loyalty_points_earned,
            balance
        );

        Ok(PlacementOutcome::Placed { order, path })
    }

    async fn submit_remote(
        &self,
        lines: &[OrderLine],
        total: Decimal,
        user_id: i32,
        backend: &BackendClient,
    ) -> Result<(Order, SubmissionPath), OrderError> {
        let request = CreateOrderRequest::new(lines, total, self.order_type, user_id);
        request.validate()?;

        match backend.submit_order(&request).await {
            Ok(remote) => {
                let order = Order::from_remote(remote, lines.to_vec(), total, self.order_type);
                Ok((order, SubmissionPath::Remote))
            }
            Err(e) if e.is_business_rejection() => {
                let err = rejection(&e);
                tracing::warn!("{}", err);
                Err(err)
            }
            Err(e) => {
                tracing::warn!("Order submission failed, recording locally: {}", e);
                let path = SubmissionPath::Fallback {
                    reason: e.to_string(),
                };
                Ok(self.record_offline(lines.to_vec(), total, path))
            }
        }
    }

    fn record_offline(
        &self,
        lines: Vec<OrderLine>,
        total: Decimal,
        path: SubmissionPath,
    ) -> (Order, SubmissionPath) {
        let order = Order::local(
            self.history.next_local_sequence(),
            lines,
            total,
            self.order_type,
        );
        (order, path)
    }
}

/// Map a 4xx answer to `OrderError::Rejected`, preferring the backend's own message
fn rejection(err: &TransportError) -> OrderError {
    let (status, body) = match err {
        TransportError::Status { status, body, .. } => (*status, body.as_str()),
        other => {
            return OrderError::Rejected {
                status: 0,
                message: other.to_string(),
            }
        }
    };

    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "message"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        });

    let message = match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => format!("HTTP {}", status),
    };

    OrderError::Rejected { status, message }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::cart::engine::tests::item;
    use crate::orders::LoyaltyCalculator;
    use crate::session::{ConnectivityState, UserProfile};
    use proptest::prelude::*;
    use std::time::Duration;

    /// Any non-empty offline cart becomes one order whose total matches the cart
    #[test]
    fn prop_offline_placement_commits_cart() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let backend = BackendClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();

        proptest!(|(
            lines in prop::collection::vec((1i32..=12, 0u32..=2000u32, 1i64..=20), 1..8)
        )| {
            let mut cart = Cart::new();
            for (id, cents, qty) in lines {
                cart.add_item(&item(id, Decimal::new(cents as i64, 2), 10)).unwrap();
                cart.set_quantity(id, qty);
            }
            let expected_total = cart.total();
            let expected_lines = cart.len();

            let mut service = OrderService::new(OrderType::Pickup);
            let mut session = SessionContext::new(UserProfile::new(1, "Coffee Lover"));
            session.record_probe(ConnectivityState::Offline);

            let outcome = runtime
                .block_on(service.place_order(&mut cart, &mut session, &backend))
                .unwrap();

            let order = outcome.order().cloned();
            prop_assert!(order.is_some());
            let order = order.unwrap();
            prop_assert_eq!(order.total, expected_total);
            prop_assert_eq!(order.items.len(), expected_lines);
            prop_assert_eq!(order.loyalty_points_earned, LoyaltyCalculator::points_for(expected_total));
            prop_assert_eq!(session.loyalty_points(), u64::from(order.loyalty_points_earned));
            prop_assert!(cart.is_empty());
            prop_assert_eq!(service.history().len(), 1);
            prop_assert_eq!(service.last_state(), SubmissionState::Confirmed);
        });
    }
}
