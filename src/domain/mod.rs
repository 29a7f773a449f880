//! Domain layer types and invariants.

pub mod catalog;
pub mod entities;
pub mod error;
pub mod posts;
pub mod slug;
