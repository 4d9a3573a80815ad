//! Core module: curriculum model, graph derivation, and persistence

pub mod config;
pub mod error;
pub mod graph;
pub mod graph_builder;
pub mod library;
pub mod models;
pub mod normalizer;
pub mod planner;
pub mod reachability;
pub mod store;
pub mod unlock;
pub mod validate;

/// Returns the current version of the `correlativas` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
