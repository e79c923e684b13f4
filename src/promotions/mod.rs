pub mod code_validator;
pub mod error;

pub use code_validator::*;
pub use error::*;
