pub mod error;
pub mod loyalty;
pub mod models;
pub mod service;
pub mod status_machine;

pub use error::*;
pub use loyalty::*;
pub use models::*;
pub use service::*;
pub use status_machine::*;
