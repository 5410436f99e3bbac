pub mod common;
pub mod datasource;

pub use common::*;
pub use datasource::*;
