//! SQLite-backed bucketed key-value store for cached API responses.
//!
//! This module provides a persistent cache using SQLite with async access via
//! tokio-rusqlite. It supports:
//!
//! - Named buckets, nested to any depth under a parent
//! - Snapshot reads and serialized (`IMMEDIATE`) writes
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//!
//! Entries are never expired or evicted; they live until the database file
//! is removed.

pub mod buckets;
pub mod codec;
pub mod connection;
pub mod key;
pub mod migrations;

pub use crate::Error;

pub use buckets::{BucketPath, BucketSpec, BucketStore};
pub use codec::{decode_value, encode_value};
pub use connection::CacheDb;
pub use key::CacheKey;
