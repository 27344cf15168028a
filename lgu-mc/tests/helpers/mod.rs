//! Test helper modules for lgu-mc integration tests
//!
//! - MemoryStore: in-memory RecordStore with failure injection and release tracking
//! - test_db: baseline SQLite fixtures and isolated test-store provisioning

#![allow(dead_code, unused_imports)]

pub mod memory_store;
pub mod test_db;

pub use memory_store::{FailPoint, MemoryStore};
pub use test_db::{insert_mapping, insert_poem, provision_test_store, BaselineDb};
