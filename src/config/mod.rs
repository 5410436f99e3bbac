pub mod types;
pub mod loader;
pub mod resolved;

pub use types::*;
pub use loader::*;
pub use resolved::*;
