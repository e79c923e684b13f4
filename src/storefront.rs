use serde::Serialize;

use crate::api::BackendClient;
use crate::bookings::{BookingConfirmation, BookingService};
use crate::cart::{Cart, CartError, CartSnapshot};
use crate::catalog::{CatalogStore, MenuQueryParams};
use crate::config::StorefrontConfig;
use crate::error::StorefrontError;
use crate::models::{Cafe, CatalogItem, Event, Promotion};
use crate::orders::{Order, OrderService, PlacementOutcome, SubmissionState};
use crate::promotions::{AppliedPromotion, PromotionValidator};
use crate::session::{ConnectivityMonitor, ConnectivityState, SessionContext, UserProfile};

/// Headline numbers for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub user_name: String,
    pub connectivity: ConnectivityState,
    pub menu_items: usize,
    pub cafes: usize,
    pub cart_items: u32,
    pub orders: usize,
    pub bookings: usize,
    pub loyalty_points: u64,
}

/// One user's storefront session
///
/// Owns the session context, catalog, cart, order history and booking log.
/// Every mutating call takes `&mut self`, so user actions run one at a time,
/// remote round-trips included.
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    backend: BackendClient,
    session: SessionContext,
    catalog: CatalogStore,
    cart: Cart,
    orders: OrderService,
    bookings: BookingService,
}

impl Storefront {
    /// Start a session against the configured backend
    ///
    /// Probes the backend once and loads the catalog accordingly. An unreachable
    /// backend is not an error: the session simply runs offline.
    pub async fn start(config: StorefrontConfig) -> Result<Self, StorefrontError> {
        let backend = BackendClient::new(&config.api_url, config.request_timeout)?;
        Ok(Self::with_client(config, backend).await)
    }

    /// Start a session with an already built backend client
    pub async fn with_client(config: StorefrontConfig, backend: BackendClient) -> Self {
        let mut session = SessionContext::new(UserProfile::new(config.user_id, config.user_name.clone()));
        let probed = ConnectivityMonitor::probe(&backend).await;
        session.record_probe(probed);

        let catalog = CatalogStore::load(&session, &backend).await;

        tracing::info!(
            "Session started for {} ({}): {} menu items, {} cafés, {} events, {} promotions",
            session.user().name,
            session.connectivity(),
            catalog.menu().len(),
            catalog.cafes().len(),
            catalog.events().len(),
            catalog.promotions().len()
        );

        Self {
            orders: OrderService::new(config.order_type),
            config,
            backend,
            session,
            catalog,
            cart: Cart::new(),
            bookings: BookingService::new(),
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn user(&self) -> &UserProfile {
        self.session.user()
    }

    pub fn connectivity(&self) -> ConnectivityState {
        self.session.connectivity()
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn menu(&self) -> &[CatalogItem] {
        self.catalog.menu()
    }

    pub fn cafes(&self) -> &[Cafe] {
        self.catalog.cafes()
    }

    pub fn events(&self) -> &[Event] {
        self.catalog.events()
    }

    pub fn promotions(&self) -> &[Promotion] {
        self.catalog.promotions()
    }

    pub fn cart(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    pub fn orders(&self) -> &[Order] {
        self.orders.history().orders()
    }

    /// Final state of the most recent order placement attempt
    pub fn last_submission_state(&self) -> SubmissionState {
        self.orders.last_state()
    }

    pub fn loyalty_points(&self) -> u64 {
        self.session.loyalty_points()
    }

    pub fn bookings(&self) -> &[BookingConfirmation] {
        self.bookings.bookings()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            user_name: self.session.user().name.clone(),
            connectivity: self.session.connectivity(),
            menu_items: self.catalog.menu().len(),
            cafes: self.catalog.cafes().len(),
            cart_items: self.cart.item_count(),
            orders: self.orders.history().len(),
            bookings: self.bookings.bookings().len(),
            loyalty_points: self.session.loyalty_points(),
        }
    }

    /// Filter and sort the menu
    pub fn query_menu(&self, params: MenuQueryParams) -> Result<Vec<&CatalogItem>, StorefrontError> {
        Ok(self.catalog.query_menu(params)?)
    }

    /// Add one unit of a menu item to the cart
    pub fn add_item(&mut self, item_id: i32) -> Result<CartSnapshot, StorefrontError> {
        let item = self
            .catalog
            .item(item_id)
            .ok_or(CartError::ItemNotFound(item_id))?;
        self.cart.add_item(item)?;
        Ok(self.cart.snapshot())
    }

    /// Remove a menu item from the cart; absent items are ignored
    pub fn remove_item(&mut self, item_id: i32) -> CartSnapshot {
        self.cart.remove_item(item_id);
        self.cart.snapshot()
    }

    /// Overwrite the quantity of a cart entry; zero or less removes it
    pub fn set_quantity(&mut self, item_id: i32, quantity: i64) -> CartSnapshot {
        self.cart.set_quantity(item_id, quantity);
        self.cart.snapshot()
    }

    /// Place an order for the cart contents
    pub async fn place_order(&mut self) -> Result<PlacementOutcome, StorefrontError> {
        let outcome = self
            .orders
            .place_order(&mut self.cart, &mut self.session, &self.backend)
            .await?;
        Ok(outcome)
    }

    /// Book one seat at an event
    pub fn book_event(&mut self, event_id: i32) -> Result<BookingConfirmation, StorefrontError> {
        Ok(self.bookings.book_event(&mut self.catalog, event_id)?)
    }

    /// Look up a promo code; never changes totals
    pub fn apply_code(&self, code: &str) -> Result<AppliedPromotion, StorefrontError> {
        Ok(PromotionValidator::apply_code(self.catalog.promotions(), code)?)
    }

    /// End the session and return its final summary
    pub fn end(self) -> SessionSummary {
        let summary = self.summary();
        tracing::info!(
            "Session ended for {}: {} orders, {} bookings, {} loyalty points",
            summary.user_name,
            summary.orders,
            summary.bookings,
            summary.loyalty_points
        );
        summary
    }
}
