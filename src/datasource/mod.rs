pub mod candidate;
pub mod db_kind;
pub mod dependency;
pub mod registry;

pub use candidate::*;
pub use db_kind::*;
pub use dependency::*;
pub use registry::*;
