//! Shared library for the mediatrack backend.
//!
//! Holds everything the HTTP service builds on: the error type, timestamp
//! helpers, configuration (root folder resolution and upload policy), and
//! the SQLite store layer (schema, models, and the per-component queries).

pub mod coerce;
pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
