//! SHA-256 digests and RIPEMD-160 checksums.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of arbitrary data. This is what gets signed.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    output.copy_from_slice(&Sha256::digest(data));
    output
}

/// First four bytes of `RIPEMD-160(payload || suffix)`.
///
/// The suffix is the key-type tag (`b"K1"`, `b"R1"`, ...) for the modern encodings
/// and empty for legacy `EOS` keys.
pub fn ripemd160_checksum(payload: &[u8], suffix: &[u8]) -> [u8; 4] {
    let mut hasher = Ripemd160::new();
    hasher.update(payload);
    hasher.update(suffix);
    let digest = hasher.finalize();
    let mut output = [0u8; 4];
    output.copy_from_slice(&digest[..4]);
    output
}
