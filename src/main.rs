use coffee_storefront::{Storefront, StorefrontConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Coffee Storefront - Starting...");

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Using backend at {}", config.api_url);

    let storefront = match Storefront::start(config).await {
        Ok(storefront) => storefront,
        Err(e) => {
            tracing::error!("{}", e.to_notice().message);
            std::process::exit(1);
        }
    };

    for cafe in storefront.cafes() {
        tracing::info!("Café: {} ({}, {})", cafe.name, cafe.address, cafe.city);
    }
    for event in storefront.events() {
        tracing::info!(
            "Event: {} on {} at {} ({} seats left)",
            event.title,
            event.date,
            event.time,
            event.seats_left()
        );
    }

    let summary = storefront.end();
    match serde_json::to_string(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize session summary: {}", e),
    }
}
