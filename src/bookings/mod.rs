pub mod error;
pub mod models;
pub mod service;

pub use error::*;
pub use models::*;
pub use service::*;
