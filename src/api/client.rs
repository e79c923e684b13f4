use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::api::TransportError;
use crate::orders::{CreateOrderRequest, RemoteOrder};

pub const HEALTH_PATH: &str = "/health";
pub const MENU_PATH: &str = "/menu";
pub const CAFES_PATH: &str = "/cafes";
pub const EVENTS_PATH: &str = "/events";
pub const PROMOTIONS_PATH: &str = "/promotions";
pub const ORDERS_PATH: &str = "/orders";

/// Response body shapes the backend uses interchangeably
///
/// Collections arrive either bare (`[...]`) or wrapped (`{"data": [...]}`);
/// created orders likewise (`{...}` or `{"data": {...}}`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// HTTP client for the storefront backend API
///
/// Every request is bounded by the configured timeout. Response envelopes are
/// normalized here so the rest of the crate only sees domain values.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "http://localhost:5000/api")
    /// * `timeout` - Upper bound for each request, connect included
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probe `GET /health`; any 2xx answer means the backend is usable
    pub async fn health(&self) -> Result<(), TransportError> {
        let response = self
            .client
            .get(self.url(HEALTH_PATH))
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(HEALTH_PATH, e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status {
                path: HEALTH_PATH.to_string(),
                status: status.as_u16(),
                body: String::new(),
            })
        }
    }

    /// Fetch a catalog collection (`/menu`, `/cafes`, `/events`, `/promotions`)
    ///
    /// Ask for `serde_json::Value` entries to decode them one by one, so that a
    /// malformed entry can be dropped without losing the rest of the slice.
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, TransportError> {
        let body = self.read_body(self.client.get(self.url(path)), path).await?;
        decode_envelope(path, &body)
    }

    /// Submit an order with `POST /orders`
    ///
    /// # Returns
    /// The order the backend created, or the failure that prevented it
    pub async fn submit_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<RemoteOrder, TransportError> {
        let body = self
            .read_body(self.client.post(self.url(ORDERS_PATH)).json(request), ORDERS_PATH)
            .await?;
        decode_envelope(ORDERS_PATH, &body)
    }

    async fn read_body(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<String, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(path, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(path, e))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

fn decode_envelope<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, TransportError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .map_err(|e| TransportError::InvalidResponse {
            path: path.to_string(),
            message: e.to_string(),
        })
}
