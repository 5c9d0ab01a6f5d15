//! Nullable signature primitive: scripted answers instead of curve math.

use authsig_crypto::{CryptoError, SignaturePrimitive};
use std::collections::HashSet;
use std::sync::Mutex;

/// A primitive that validates only the `(signature, data, key)` triples it was given.
///
/// Keys registered as unparsable fail with [`CryptoError::InvalidPublicKey`].
#[derive(Default)]
pub struct NullPrimitive {
    valid: HashSet<(String, Vec<u8>, String)>,
    unparsable_keys: HashSet<String>,
    checked: Mutex<Vec<String>>,
}

impl NullPrimitive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `signature` over `data` validate under `key`.
    pub fn with_valid(mut self, signature: &str, data: &[u8], key: &str) -> Self {
        self.valid
            .insert((signature.to_string(), data.to_vec(), key.to_string()));
        self
    }

    /// Make any check against `key` fail as undecodable.
    pub fn with_unparsable_key(mut self, key: &str) -> Self {
        self.unparsable_keys.insert(key.to_string());
        self
    }

    /// Keys checked so far, in call order.
    pub fn checked_keys(&self) -> Vec<String> {
        self.checked.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl SignaturePrimitive for NullPrimitive {
    fn verify(&self, signature: &str, data: &[u8], public_key: &str) -> Result<bool, CryptoError> {
        self.checked
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(public_key.to_string());
        if self.unparsable_keys.contains(public_key) {
            return Err(CryptoError::InvalidPublicKey(public_key.to_string()));
        }
        Ok(self.valid.contains(&(
            signature.to_string(),
            data.to_vec(),
            public_key.to_string(),
        )))
    }

    fn name(&self) -> &str {
        "null"
    }
}
