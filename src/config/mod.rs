//! Application configuration, loaded from environment variables.
//!
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: token secret and expiry

pub mod database;
pub mod jwt;
