pub mod defaults;
pub mod query;
pub mod store;

pub use defaults::*;
pub use query::*;
pub use store::*;
