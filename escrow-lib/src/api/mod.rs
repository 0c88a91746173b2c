//! Paginated list API
//!
//! The wire shape returned by list endpoints and the [`PageSource`] trait
//! listing pages fetch through.

mod memory;
mod page;
mod source;

pub use memory::*;
pub use page::*;
pub use source::*;
