pub mod connectivity;
pub mod context;

pub use connectivity::*;
pub use context::*;
