//! Core types and shared functionality for quranc.
//!
//! This crate provides:
//! - Bucketed key-value cache store with SQLite backend
//! - Canonical cache key and value codecs
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{BucketPath, BucketSpec, BucketStore, CacheDb};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
