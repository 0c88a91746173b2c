//! Error types

mod fetch;
mod field;

pub use fetch::*;
pub use field::*;
