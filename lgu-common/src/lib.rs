//! # Lugarden Common Library
//!
//! Shared code for the Lugarden data tools including:
//! - Error taxonomy (store failures vs configuration problems)
//! - Configuration loading (environment + optional TOML)
//! - Read-only store connection
//! - Poem and mapping row models

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
