//! SQLite persistence adapters using Diesel ORM.
//!
//! This module implements the contact storage port against SQLite via
//! Diesel, with async access through `diesel-async`'s sync connection
//! wrapper and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository types hold a pool handle and translate
//!   between domain types and Diesel rows
//! - **Internal models**: Diesel row structs stay private to this module
//! - **Async-safe pooling**: connection checkout never blocks the executor
//! - **Strongly typed errors**: storage faults are mapped to domain error
//!   variants rather than leaking Diesel types

mod contacts;
mod migrations;
mod models;
mod pool;
mod schema;

pub use contacts::{ContactRepository, DieselContactRepository, RepositoryError};
pub use migrations::{run_pending_migrations, MigrationError};
pub use pool::{DbPool, PoolConfig, PoolError, SqliteConn};
