//! Sealbox Database — SurrealDB connection management and repository
//! implementations.
//!
//! This crate provides:
//! - Connection management ([`DbConfig`], [`DbManager`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Repository implementations for the `sealbox-core` traits
//! - Idempotent demo fixtures ([`seed_demo`])
//! - Error types ([`DbError`])

mod connection;
mod error;
mod schema;
mod seed;

pub mod repository;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::run_migrations;
pub use seed::{DEMO_EMAIL, seed_demo};
