use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::api::{BackendClient, TransportError, CAFES_PATH, EVENTS_PATH, MENU_PATH, PROMOTIONS_PATH};
use crate::catalog::{
    default_cafes, default_events, default_menu, default_promotions, MenuQueryError,
    MenuQueryParams, MenuQueryValidator,
};
use crate::models::{Cafe, CatalogItem, Event, Promotion};
use crate::session::SessionContext;

/// Where a catalog slice came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Remote,
    Defaults,
}

/// Source of each catalog slice after loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSources {
    pub menu: CatalogSource,
    pub cafes: CatalogSource,
    pub events: CatalogSource,
    pub promotions: CatalogSource,
}

impl CatalogSources {
    fn all(source: CatalogSource) -> Self {
        Self {
            menu: source,
            cafes: source,
            events: source,
            promotions: source,
        }
    }
}

/// Menu items, cafés, events and promotions for one session
///
/// Each slice is loaded from the backend or from the built-in defaults,
/// independently of the others. Only bookings mutate catalog data (event
/// participant counts).
#[derive(Debug, Clone)]
pub struct CatalogStore {
    menu: Vec<CatalogItem>,
    cafes: Vec<Cafe>,
    events: Vec<Event>,
    promotions: Vec<Promotion>,
    sources: CatalogSources,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::defaults()
    }
}

impl CatalogStore {
    /// Catalog made entirely of the built-in sample data
    pub fn defaults() -> Self {
        Self {
            menu: default_menu(),
            cafes: default_cafes(),
            events: default_events(),
            promotions: default_promotions(),
            sources: CatalogSources::all(CatalogSource::Defaults),
        }
    }

    /// Build a catalog from explicit slices
    pub fn from_parts(
        menu: Vec<CatalogItem>,
        cafes: Vec<Cafe>,
        events: Vec<Event>,
        promotions: Vec<Promotion>,
    ) -> Self {
        Self {
            menu,
            cafes,
            events,
            promotions,
            sources: CatalogSources::all(CatalogSource::Defaults),
        }
    }

    /// Load the catalog for a session
    ///
    /// Offline sessions use the defaults without touching the network. When
    /// connected, the four slices are fetched concurrently; a slice whose fetch
    /// fails falls back to its defaults on its own.
    pub async fn load(session: &SessionContext, backend: &BackendClient) -> Self {
        if !session.is_connected() {
            tracing::info!("Offline session: using built-in catalog");
            return Self::defaults();
        }

        let (menu, cafes, events, promotions) = tokio::join!(
            backend.fetch_collection::<serde_json::Value>(MENU_PATH),
            backend.fetch_collection::<serde_json::Value>(CAFES_PATH),
            backend.fetch_collection::<serde_json::Value>(EVENTS_PATH),
            backend.fetch_collection::<serde_json::Value>(PROMOTIONS_PATH),
        );

        let (menu, menu_source) = resolve_slice(
            "menu",
            menu.map(|raw| keep_valid("menu", decode_entries::<CatalogItem>("menu", raw))),
            default_menu,
        );
        let (cafes, cafes_source) = resolve_slice(
            "cafes",
            cafes.map(|raw| decode_entries::<Cafe>("cafes", raw)),
            default_cafes,
        );
        let (events, events_source) = resolve_slice(
            "events",
            events.map(|raw| keep_valid("events", decode_entries::<Event>("events", raw))),
            default_events,
        );
        let (promotions, promotions_source) = resolve_slice(
            "promotions",
            promotions.map(|raw| decode_entries::<Promotion>("promotions", raw)),
            default_promotions,
        );

        Self {
            menu,
            cafes,
            events,
            promotions,
            sources: CatalogSources {
                menu: menu_source,
                cafes: cafes_source,
                events: events_source,
                promotions: promotions_source,
            },
        }
    }

    pub fn menu(&self) -> &[CatalogItem] {
        &self.menu
    }

    pub fn cafes(&self) -> &[Cafe] {
        &self.cafes
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn promotions(&self) -> &[Promotion] {
        &self.promotions
    }

    pub fn sources(&self) -> CatalogSources {
        self.sources
    }

    pub fn item(&self, item_id: i32) -> Option<&CatalogItem> {
        self.menu.iter().find(|item| item.id == item_id)
    }

    pub fn event(&self, event_id: i32) -> Option<&Event> {
        self.events.iter().find(|event| event.id == event_id)
    }

    pub(crate) fn event_mut(&mut self, event_id: i32) -> Option<&mut Event> {
        self.events.iter_mut().find(|event| event.id == event_id)
    }

    /// Distinct menu categories in catalog order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in &self.menu {
            if !item.category.is_empty() && !categories.contains(&item.category.as_str()) {
                categories.push(item.category.as_str());
            }
        }
        categories
    }

    /// Filter and sort the menu
    pub fn query_menu(&self, params: MenuQueryParams) -> Result<Vec<&CatalogItem>, MenuQueryError> {
        let query = MenuQueryValidator::validate(params)?;
        Ok(query.apply(&self.menu))
    }
}

fn decode_entries<T: DeserializeOwned>(slice: &str, raw: Vec<serde_json::Value>) -> Vec<T> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<T>(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Dropping malformed {} entry: {}", slice, e);
                None
            }
        })
        .collect()
}

fn keep_valid<T: Validate>(slice: &str, entries: Vec<T>) -> Vec<T> {
    entries
        .into_iter()
        .filter(|entry| match entry.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Dropping invalid {} entry: {}", slice, e);
                false
            }
        })
        .collect()
}

fn resolve_slice<T>(
    slice: &str,
    fetched: Result<Vec<T>, TransportError>,
    defaults: fn() -> Vec<T>,
) -> (Vec<T>, CatalogSource) {
    match fetched {
        Ok(entries) => {
            tracing::info!("Loaded {} {} entries from backend", entries.len(), slice);
            (entries, CatalogSource::Remote)
        }
        Err(e) => {
            tracing::warn!("Failed to load {} from backend, using defaults: {}", slice, e);
            (defaults(), CatalogSource::Defaults)
        }
    }
}
