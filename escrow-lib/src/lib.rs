//! Escrow back-office data library
//!
//! Row records, the paginated list wire shape, and the collaborator traits
//! (page fetching, labels, permissions) that listing pages are built on.

pub mod api;
pub mod error;
pub mod labels;
pub mod model;
pub mod permissions;
