//! Any-of signature verification against an account's on-chain keys.

use crate::client::{AuthorityFetcher, ChainClient};
use crate::error::AuthorityError;
use crate::keys::extract_keys;
use crate::registry::ChainRegistry;
use authsig_crypto::{CryptoError, K1Verifier, SignaturePrimitive};
use authsig_types::{AccountAuthority, PublicKeySet, VerificationRequest};
use std::sync::Arc;

/// Verifies that data was signed by one of an account's currently authorized keys.
///
/// Each call resolves the chain, fetches the authority, extracts the keys and then
/// runs [`find_signer`]. Nothing is kept between calls, so one verifier can be shared
/// across tasks.
pub struct SignatureVerifier<F = ChainClient, P = K1Verifier> {
    registry: Arc<ChainRegistry>,
    fetcher: F,
    primitive: P,
}

impl SignatureVerifier {
    /// A verifier backed by the network client and the secp256k1 primitive.
    pub fn new(registry: Arc<ChainRegistry>) -> Self {
        Self::with_parts(registry, ChainClient::new(), K1Verifier::new())
    }
}

impl<F, P> SignatureVerifier<F, P>
where
    F: AuthorityFetcher,
    P: SignaturePrimitive,
{
    pub fn with_parts(registry: Arc<ChainRegistry>, fetcher: F, primitive: P) -> Self {
        Self {
            registry,
            fetcher,
            primitive,
        }
    }

    pub fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    /// Fetch the full authority of `account` on `chain_id`.
    pub async fn get_account_info(
        &self,
        chain_id: &str,
        account: &str,
    ) -> Result<AccountAuthority, AuthorityError> {
        let endpoint = self.registry.resolve(chain_id)?;
        tracing::debug!(chain_id, %endpoint, "resolved chain");
        self.fetcher.fetch_authority(endpoint, account).await
    }

    /// Every key currently authorized for `account`, across all permissions.
    pub async fn get_public_keys(
        &self,
        chain_id: &str,
        account: &str,
    ) -> Result<PublicKeySet, AuthorityError> {
        let authority = self.get_account_info(chain_id, account).await?;
        extract_keys(&authority)
    }

    /// The first of `account`'s keys that validates `signature` over `data`, if any.
    pub async fn find_signer(
        &self,
        chain_id: &str,
        account: &str,
        signature: &str,
        data: &[u8],
    ) -> Result<Option<String>, AuthorityError> {
        let keys = self.get_public_keys(chain_id, account).await?;
        let signer = find_signer(&self.primitive, &keys, signature, data)?;

        match signer {
            Some(key) => {
                tracing::debug!(chain_id, account, key, "signature verified");
                Ok(Some(key.to_string()))
            }
            None => {
                tracing::info!(
                    chain_id,
                    account,
                    candidates = keys.len(),
                    "signature matched no authorized key"
                );
                Ok(None)
            }
        }
    }

    /// Whether `signature` over `data` was produced by any of `account`'s keys.
    ///
    /// An account without keys never verifies.
    pub async fn verify(
        &self,
        chain_id: &str,
        account: &str,
        signature: &str,
        data: &[u8],
    ) -> Result<bool, AuthorityError> {
        Ok(self
            .find_signer(chain_id, account, signature, data)
            .await?
            .is_some())
    }

    /// [`verify`](Self::verify) taking the request as one value.
    pub async fn verify_signature(
        &self,
        request: &VerificationRequest,
    ) -> Result<bool, AuthorityError> {
        self.verify(
            request.chain_id.as_str(),
            &request.account,
            &request.signature,
            request.data.as_bytes(),
        )
        .await
    }
}

/// First match wins: return the first key in `keys` that validates the signature.
///
/// Keys are tried in order and the search stops at the first success. `Ok(None)`
/// means no key validated, which includes the empty set. A primitive error on any
/// key aborts the search.
pub fn find_signer<'a, P>(
    primitive: &P,
    keys: &'a PublicKeySet,
    signature: &str,
    data: &[u8],
) -> Result<Option<&'a str>, CryptoError>
where
    P: SignaturePrimitive + ?Sized,
{
    for key in keys.iter() {
        if primitive.verify(signature, data, key)? {
            return Ok(Some(key));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Accepts exactly one (signature, key) pair and records the keys it was asked about.
    struct OnePairPrimitive {
        signature: &'static str,
        key: &'static str,
        asked: Mutex<Vec<String>>,
    }

    impl OnePairPrimitive {
        fn new(signature: &'static str, key: &'static str) -> Self {
            Self {
                signature,
                key,
                asked: Mutex::new(Vec::new()),
            }
        }
    }

    impl SignaturePrimitive for OnePairPrimitive {
        fn verify(&self, signature: &str, _data: &[u8], key: &str) -> Result<bool, CryptoError> {
            self.asked.lock().unwrap().push(key.to_string());
            if key == "garbage" {
                return Err(CryptoError::InvalidPrefix(key.to_string()));
            }
            Ok(signature == self.signature && key == self.key)
        }

        fn name(&self) -> &str {
            "one-pair"
        }
    }

    fn keys(list: &[&str]) -> PublicKeySet {
        list.iter().copied().collect()
    }

    #[test]
    fn empty_set_finds_nothing() {
        let primitive = OnePairPrimitive::new("sig", "PUB_K1_abc");
        assert_eq!(find_signer(&primitive, &keys(&[]), "sig", b"data"), Ok(None));
        assert!(primitive.asked.lock().unwrap().is_empty());
    }

    #[test]
    fn any_matching_key_wins() {
        let primitive = OnePairPrimitive::new("sig", "PUB_K1_def");
        let set = keys(&["PUB_K1_abc", "PUB_K1_def"]);
        assert_eq!(
            find_signer(&primitive, &set, "sig", b"data"),
            Ok(Some("PUB_K1_def"))
        );
    }

    #[test]
    fn no_matching_key_finds_nothing() {
        let primitive = OnePairPrimitive::new("other", "PUB_K1_def");
        let set = keys(&["PUB_K1_abc", "PUB_K1_def"]);
        assert_eq!(find_signer(&primitive, &set, "sig", b"data"), Ok(None));
        assert_eq!(primitive.asked.lock().unwrap().len(), 2);
    }

    #[test]
    fn search_stops_at_first_match() {
        let primitive = OnePairPrimitive::new("sig", "PUB_K1_abc");
        let set = keys(&["PUB_K1_abc", "garbage"]);
        assert_eq!(
            find_signer(&primitive, &set, "sig", b"data"),
            Ok(Some("PUB_K1_abc"))
        );
        assert_eq!(*primitive.asked.lock().unwrap(), vec!["PUB_K1_abc".to_string()]);
    }

    #[test]
    fn primitive_error_aborts_search() {
        let primitive = OnePairPrimitive::new("sig", "PUB_K1_def");
        let set = keys(&["garbage", "PUB_K1_def"]);
        assert!(matches!(
            find_signer(&primitive, &set, "sig", b"data"),
            Err(CryptoError::InvalidPrefix(_))
        ));
    }
}
