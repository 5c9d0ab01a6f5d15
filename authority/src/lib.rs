//! Account authority resolution and signature verification.
//!
//! Answers "was this data signed by that account?" for chains that expose the
//! `/v1/chain/get_account` API:
//!
//! 1. [`ChainRegistry`] resolves a chain id to a node endpoint (no I/O).
//! 2. [`ChainClient`] fetches the account's authority from that node.
//! 3. [`extract_keys`] flattens every permission's keys into one [`PublicKeySet`].
//! 4. [`SignatureVerifier`] accepts the signature if *any* of those keys validates it.
//!
//! Key weights and permission thresholds are parsed but not enforced: a single
//! authorized key is enough.
//!
//! [`PublicKeySet`]: authsig_types::PublicKeySet

pub mod client;
pub mod config;
pub mod error;
pub mod keys;
pub mod registry;
pub mod verifier;

pub use client::{AuthorityFetcher, ChainClient};
pub use config::VerifierConfig;
pub use error::{AuthorityError, ConfigError};
pub use keys::extract_keys;
pub use registry::ChainRegistry;
pub use verifier::{find_signer, SignatureVerifier};
