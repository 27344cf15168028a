//! Record store access: read-only connection and row models

pub mod connect;
pub mod models;

pub use connect::*;
pub use models::*;
