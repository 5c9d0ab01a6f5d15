//! Signature verification against text-encoded public keys.

use crate::codec::{decode_public_key, decode_signature, KeyType};
use crate::error::CryptoError;
use crate::hash::sha256;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{Signature, VerifyingKey};
use std::sync::Arc;

/// A signature-verification primitive over the chain's text encodings.
///
/// `Ok(false)` means "well-formed, but this key did not produce this signature".
/// `Err` means the signature or key text could not be interpreted at all.
pub trait SignaturePrimitive: Send + Sync {
    fn verify(&self, signature: &str, data: &[u8], public_key: &str)
        -> Result<bool, CryptoError>;

    /// Human-readable name of this primitive.
    fn name(&self) -> &str;
}

impl<T: SignaturePrimitive + ?Sized> SignaturePrimitive for Arc<T> {
    fn verify(&self, signature: &str, data: &[u8], public_key: &str) -> Result<bool, CryptoError> {
        (**self).verify(signature, data, public_key)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// ECDSA/secp256k1 verifier for `SIG_K1_` signatures.
///
/// The signed message is `SHA-256(data)`. High-S signatures never validate.
/// Keys of another curve (`PUB_R1_`, `PUB_WA_`) are well-formed but cannot match a
/// K1 signature, so they verify as `false`.
#[derive(Clone, Copy, Debug, Default)]
pub struct K1Verifier;

impl K1Verifier {
    pub fn new() -> Self {
        Self
    }
}

impl SignaturePrimitive for K1Verifier {
    fn verify(
        &self,
        signature: &str,
        data: &[u8],
        public_key: &str,
    ) -> Result<bool, CryptoError> {
        let sig = decode_signature(signature)?;
        if sig.key_type != KeyType::K1 {
            return Err(CryptoError::UnsupportedKeyType(sig.key_type.as_str().into()));
        }
        // bytes[0] is the recovery header; r || s follows.
        let ecdsa_sig = Signature::from_slice(&sig.bytes[1..])
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;

        let key = decode_public_key(public_key)?;
        if key.key_type != KeyType::K1 {
            return Ok(false);
        }
        let verifying_key = VerifyingKey::from_sec1_bytes(&key.bytes)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;

        let digest = sha256(data);
        Ok(verifying_key.verify_prehash(&digest, &ecdsa_sig).is_ok())
    }

    fn name(&self) -> &str {
        "secp256k1"
    }
}
