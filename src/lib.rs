//! Slate: a small server-rendered blog backed by a fixed JSON file of posts.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
pub mod util;
