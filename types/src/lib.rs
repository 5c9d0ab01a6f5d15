//! Fundamental types for authsig.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! chain identifiers and endpoints, the `get_account` authority schema, the flattened
//! public-key set, and the verification request.

pub mod authority;
pub mod chain;
pub mod keys;
pub mod request;

pub use authority::{AccountAuthority, KeyWeight, PermissionEntry, RequiredAuth};
pub use chain::{ChainEndpoint, ChainId, Protocol};
pub use keys::PublicKeySet;
pub use request::VerificationRequest;
