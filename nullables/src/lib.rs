//! Nullable infrastructure for deterministic testing.
//!
//! The verifier's external dependencies (the chain node and the signature primitive)
//! sit behind traits. This crate provides test-friendly implementations that:
//! - Return scripted values
//! - Record what they were asked, for assertions
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod fetcher;
pub mod primitive;

pub use fetcher::{authority_with_keys, NullFetcher};
pub use primitive::NullPrimitive;
