//! Storage layer: seed fixtures and the authoritative backends.
//!
//! # Modules
//!
//! - `backend`: [`Backend`] trait the worker talks to
//! - `fixtures`: built-in sample data
//! - `json`: JSON file store with atomic writes
//! - `memory`: volatile store with failure injection
//! - `models`: [`SeedData`] container

pub mod backend;
pub mod fixtures;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::Backend;
pub use json::JsonSeedStore;
pub use memory::InMemoryBackend;
pub use models::{SeedData, SEED_FORMAT_VERSION};
