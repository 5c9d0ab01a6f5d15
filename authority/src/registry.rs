//! Chain registry: resolve a chain id to the node that serves it.

use crate::error::AuthorityError;
use authsig_types::{ChainEndpoint, ChainId};
use std::collections::HashMap;

/// Read-only map of known chains and their node endpoints.
///
/// Built once (in code or from [`VerifierConfig`](crate::VerifierConfig)) and then
/// shared, typically behind an `Arc`. There is no way to mutate it after construction.
#[derive(Clone, Debug, Default)]
pub struct ChainRegistry {
    chains: HashMap<ChainId, ChainEndpoint>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self {
            chains: HashMap::new(),
        }
    }

    /// Add a chain while building the registry. A repeated id replaces the earlier endpoint.
    pub fn with_chain(mut self, chain_id: impl Into<ChainId>, endpoint: ChainEndpoint) -> Self {
        self.chains.insert(chain_id.into(), endpoint);
        self
    }

    /// Look up the endpoint for `chain_id`.
    pub fn resolve(&self, chain_id: &str) -> Result<&ChainEndpoint, AuthorityError> {
        self.chains
            .get(chain_id)
            .ok_or_else(|| AuthorityError::UnknownChain(chain_id.to_string()))
    }

    pub fn contains(&self, chain_id: &str) -> bool {
        self.chains.contains_key(chain_id)
    }

    /// All known chain ids, in no particular order.
    pub fn chain_ids(&self) -> impl Iterator<Item = &ChainId> {
        self.chains.keys()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl<K: Into<ChainId>> FromIterator<(K, ChainEndpoint)> for ChainRegistry {
    fn from_iter<I: IntoIterator<Item = (K, ChainEndpoint)>>(iter: I) -> Self {
        Self {
            chains: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
