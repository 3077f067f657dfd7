//! SQLite store layer
//!
//! Schema initialization plus one module per component: media catalog,
//! operator registry, session tracker, reporting, and the demo-data
//! fixture. All state lives here; the HTTP layer holds nothing.

pub mod catalog;
pub mod demo;
pub mod init;
pub mod models;
pub mod operators;
pub mod reports;
pub mod sessions;

pub use init::init_database;
