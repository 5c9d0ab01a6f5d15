//! Cryptographic primitives for authsig.
//!
//! - **secp256k1 ECDSA** over SHA-256 digests for signature verification
//! - **RIPEMD-160** checksums for the base58 key and signature text encodings
//! - `PUB_K1_` / legacy `EOS` public keys and `SIG_K1_` signatures
//!
//! Verification is exposed through the [`SignaturePrimitive`] trait so callers can
//! swap in another curve or a test double.

pub mod codec;
pub mod error;
pub mod hash;
pub mod verify;

pub use codec::{
    decode_public_key, decode_signature, encode_legacy_public_key, encode_public_key,
    encode_signature, KeyType, PublicKeyData, SignatureData,
};
pub use error::CryptoError;
pub use hash::{ripemd160_checksum, sha256};
pub use verify::{K1Verifier, SignaturePrimitive};
