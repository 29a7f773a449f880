//! Application services layer.

pub mod blog;
pub mod chrome;
pub mod error;
