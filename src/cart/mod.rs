pub mod engine;
pub mod error;
pub mod models;
pub mod price_calculator;

pub use engine::*;
pub use error::*;
pub use models::*;
pub use price_calculator::*;
