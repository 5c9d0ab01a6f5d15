//! Text encodings of public keys and signatures.
//!
//! Modern forms are `PUB_<type>_<base58>` and `SIG_<type>_<base58>`, where the base58
//! payload is the raw bytes followed by `RIPEMD-160(bytes || type)[..4]`. The legacy
//! public key form is `EOS<base58>` with an untagged checksum.
//!
//! Decoding checks prefix, base58, length, and checksum. It never checks that the bytes
//! are a valid curve point; that is left to the verifier.

use crate::error::CryptoError;
use crate::hash::ripemd160_checksum;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

pub const LEGACY_PUBLIC_KEY_PREFIX: &str = "EOS";

/// Compressed SEC1 point length for K1 and R1 keys.
const COMPRESSED_KEY_LEN: usize = 33;
/// Header byte plus `r || s`.
const SIGNATURE_LEN: usize = 65;
const CHECKSUM_LEN: usize = 4;
/// Recovery header of K1/R1 signatures: `27 + recovery_id`, plus 4 for compressed keys.
const SIGNATURE_HEADER: std::ops::RangeInclusive<u8> = 27..=34;

/// Curve / scheme tag carried in the text prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// secp256k1.
    K1,
    /// secp256r1.
    R1,
    /// WebAuthn (secp256r1 with authenticator data).
    WebAuthn,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::K1 => "K1",
            Self::R1 => "R1",
            Self::WebAuthn => "WA",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "K1" => Some(Self::K1),
            "R1" => Some(Self::R1),
            "WA" => Some(Self::WebAuthn),
            _ => None,
        }
    }

    /// Exact payload length, or `None` for variable-length WebAuthn payloads.
    fn public_key_len(&self) -> Option<usize> {
        match self {
            Self::K1 | Self::R1 => Some(COMPRESSED_KEY_LEN),
            Self::WebAuthn => None,
        }
    }

    fn signature_len(&self) -> Option<usize> {
        match self {
            Self::K1 | Self::R1 => Some(SIGNATURE_LEN),
            Self::WebAuthn => None,
        }
    }
}

/// A decoded public key: its type tag and raw bytes (checksum stripped).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKeyData {
    pub key_type: KeyType,
    pub bytes: Vec<u8>,
}

/// A decoded signature: its type tag and raw bytes (checksum stripped).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureData {
    pub key_type: KeyType,
    pub bytes: Vec<u8>,
}

/// Decode a `PUB_K1_...`, `PUB_R1_...`, `PUB_WA_...` or legacy `EOS...` public key.
pub fn decode_public_key(text: &str) -> Result<PublicKeyData, CryptoError> {
    if let Some(rest) = text.strip_prefix("PUB_") {
        let (key_type, encoded) = split_type_tag(rest, text)?;
        let bytes = decode_checked(encoded, key_type.as_str().as_bytes())?;
        check_len(key_type.public_key_len(), &bytes, COMPRESSED_KEY_LEN)?;
        return Ok(PublicKeyData { key_type, bytes });
    }

    if let Some(encoded) = text.strip_prefix(LEGACY_PUBLIC_KEY_PREFIX) {
        let bytes = decode_checked(encoded, b"")?;
        check_len(Some(COMPRESSED_KEY_LEN), &bytes, COMPRESSED_KEY_LEN)?;
        return Ok(PublicKeyData {
            key_type: KeyType::K1,
            bytes,
        });
    }

    Err(CryptoError::InvalidPrefix(text.to_string()))
}

/// Decode a `SIG_K1_...`, `SIG_R1_...` or `SIG_WA_...` signature.
///
/// K1 and R1 signatures must carry a recovery header byte in `27..=34`.
pub fn decode_signature(text: &str) -> Result<SignatureData, CryptoError> {
    let rest = text
        .strip_prefix("SIG_")
        .ok_or_else(|| CryptoError::InvalidPrefix(text.to_string()))?;
    let (key_type, encoded) = split_type_tag(rest, text)?;
    let bytes = decode_checked(encoded, key_type.as_str().as_bytes())?;
    check_len(key_type.signature_len(), &bytes, SIGNATURE_LEN)?;
    if key_type.signature_len().is_some() && !SIGNATURE_HEADER.contains(&bytes[0]) {
        return Err(CryptoError::InvalidSignature(format!(
            "header byte {} outside 27..=34",
            bytes[0]
        )));
    }
    Ok(SignatureData { key_type, bytes })
}

/// Encode a secp256k1 key as `PUB_K1_...`.
pub fn encode_public_key(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(true);
    format!("PUB_K1_{}", encode_checked(point.as_bytes(), b"K1"))
}

/// Encode a secp256k1 key in the legacy `EOS...` form.
pub fn encode_legacy_public_key(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(true);
    format!(
        "{LEGACY_PUBLIC_KEY_PREFIX}{}",
        encode_checked(point.as_bytes(), b"")
    )
}

/// Encode a secp256k1 signature as `SIG_K1_...`.
///
/// The header byte is `27 + 4 + recovery_id` (compressed-key form).
pub fn encode_signature(signature: &Signature, recovery_id: RecoveryId) -> String {
    let mut bytes = Vec::with_capacity(SIGNATURE_LEN);
    bytes.push(27 + 4 + recovery_id.to_byte());
    bytes.extend_from_slice(&signature.to_bytes());
    format!("SIG_K1_{}", encode_checked(&bytes, b"K1"))
}

fn split_type_tag<'a>(rest: &'a str, text: &str) -> Result<(KeyType, &'a str), CryptoError> {
    let (tag, encoded) = rest
        .split_once('_')
        .ok_or_else(|| CryptoError::InvalidPrefix(text.to_string()))?;
    let key_type =
        KeyType::from_tag(tag).ok_or_else(|| CryptoError::InvalidPrefix(text.to_string()))?;
    Ok((key_type, encoded))
}

fn decode_checked(encoded: &str, suffix: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut raw = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| CryptoError::InvalidBase58(e.to_string()))?;
    if raw.len() <= CHECKSUM_LEN {
        return Err(CryptoError::InvalidLength {
            expected: CHECKSUM_LEN + 1,
            actual: raw.len(),
        });
    }
    let checksum = raw.split_off(raw.len() - CHECKSUM_LEN);
    if checksum != ripemd160_checksum(&raw, suffix) {
        return Err(CryptoError::ChecksumMismatch);
    }
    Ok(raw)
}

fn encode_checked(payload: &[u8], suffix: &[u8]) -> String {
    let mut raw = payload.to_vec();
    raw.extend_from_slice(&ripemd160_checksum(payload, suffix));
    bs58::encode(raw).into_string()
}

/// `expected = None` accepts any length of at least `minimum`.
fn check_len(expected: Option<usize>, bytes: &[u8], minimum: usize) -> Result<(), CryptoError> {
    match expected {
        Some(len) if bytes.len() != len => Err(CryptoError::InvalidLength {
            expected: len,
            actual: bytes.len(),
        }),
        None if bytes.len() < minimum => Err(CryptoError::InvalidLength {
            expected: minimum,
            actual: bytes.len(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::SigningKey;

    /// The well-known development key pair shipped with every EOSIO node.
    const DEV_PRIVATE_KEY_WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";
    const DEV_PUBLIC_KEY_LEGACY: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";

    fn dev_signing_key() -> SigningKey {
        // WIF: 0x80 || secret(32) || sha256d checksum(4)
        let raw = bs58::decode(DEV_PRIVATE_KEY_WIF).into_vec().unwrap();
        assert_eq!(raw.len(), 37);
        assert_eq!(raw[0], 0x80);
        SigningKey::from_slice(&raw[1..33]).unwrap()
    }

    fn test_key(seed: u8) -> SigningKey {
        SigningKey::from_slice(&[seed; 32]).unwrap()
    }

    #[test]
    fn legacy_dev_key_matches_known_encoding() {
        let key = dev_signing_key();
        assert_eq!(
            encode_legacy_public_key(key.verifying_key()),
            DEV_PUBLIC_KEY_LEGACY
        );
    }

    #[test]
    fn legacy_and_modern_forms_decode_to_same_bytes() {
        let key = dev_signing_key();
        let legacy = decode_public_key(DEV_PUBLIC_KEY_LEGACY).unwrap();
        let modern = decode_public_key(&encode_public_key(key.verifying_key())).unwrap();
        assert_eq!(legacy.key_type, KeyType::K1);
        assert_eq!(modern.key_type, KeyType::K1);
        assert_eq!(legacy.bytes, modern.bytes);
        assert_eq!(legacy.bytes.len(), COMPRESSED_KEY_LEN);
    }

    #[test]
    fn modern_key_has_k1_prefix() {
        let text = encode_public_key(test_key(3).verifying_key());
        assert!(text.starts_with("PUB_K1_"));
    }

    #[test]
    fn signature_decodes_with_header_byte() {
        let key = test_key(9);
        let digest = crate::hash::sha256(b"hello");
        let (sig, recid) = key.sign_prehash_recoverable(&digest).unwrap();
        let text = encode_signature(&sig, recid);
        assert!(text.starts_with("SIG_K1_"));

        let decoded = decode_signature(&text).unwrap();
        assert_eq!(decoded.key_type, KeyType::K1);
        assert_eq!(decoded.bytes.len(), SIGNATURE_LEN);
        assert_eq!(decoded.bytes[0], 31 + recid.to_byte());
        assert_eq!(&decoded.bytes[1..], sig.to_bytes().as_slice());
    }

    #[test]
    fn unknown_prefix_is_rejected() {
        assert!(matches!(
            decode_public_key("ABC6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV"),
            Err(CryptoError::InvalidPrefix(_))
        ));
        assert!(matches!(
            decode_public_key("PUB_X9_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV"),
            Err(CryptoError::InvalidPrefix(_))
        ));
        assert!(matches!(
            decode_signature("K1_abc"),
            Err(CryptoError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        // Swap the last character for a different base58 digit.
        let mut text = DEV_PUBLIC_KEY_LEGACY.to_string();
        let last = text.pop().unwrap();
        text.push(if last == 'V' { 'W' } else { 'V' });
        assert!(matches!(
            decode_public_key(&text),
            Err(CryptoError::ChecksumMismatch)
        ));
    }

    #[test]
    fn legacy_checksum_does_not_validate_modern_key() {
        // Same base58 payload under the K1 prefix: checksum is tagged, so it must fail.
        let encoded = DEV_PUBLIC_KEY_LEGACY.trim_start_matches(LEGACY_PUBLIC_KEY_PREFIX);
        assert!(matches!(
            decode_public_key(&format!("PUB_K1_{encoded}")),
            Err(CryptoError::ChecksumMismatch)
        ));
    }

    #[test]
    fn invalid_base58_is_rejected() {
        assert!(matches!(
            decode_public_key("PUB_K1_0OIl"),
            Err(CryptoError::InvalidBase58(_))
        ));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let text = format!("PUB_K1_{}", encode_checked(&[2u8; 20], b"K1"));
        assert_eq!(
            decode_public_key(&text),
            Err(CryptoError::InvalidLength {
                expected: 33,
                actual: 20
            })
        );
    }

    #[test]
    fn signature_header_outside_range_is_rejected() {
        let key = test_key(9);
        let (sig, recid) = key
            .sign_prehash_recoverable(&crate::hash::sha256(b"hello"))
            .unwrap();
        let mut bytes = decode_signature(&encode_signature(&sig, recid)).unwrap().bytes;

        for header in [0u8, 26, 35, 0xff] {
            bytes[0] = header;
            let text = format!("SIG_K1_{}", encode_checked(&bytes, b"K1"));
            assert!(
                matches!(decode_signature(&text), Err(CryptoError::InvalidSignature(_))),
                "header {header} accepted"
            );
        }
        for header in SIGNATURE_HEADER {
            bytes[0] = header;
            let text = format!("SIG_K1_{}", encode_checked(&bytes, b"K1"));
            assert!(decode_signature(&text).is_ok(), "header {header} rejected");
        }
    }

    #[test]
    fn r1_key_decodes_with_its_own_tag() {
        let text = format!("PUB_R1_{}", encode_checked(&[3u8; 33], b"R1"));
        let decoded = decode_public_key(&text).unwrap();
        assert_eq!(decoded.key_type, KeyType::R1);
    }
}
