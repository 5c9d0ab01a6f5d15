//! Nullable authority fetcher: canned accounts, no network.

use async_trait::async_trait;
use authsig_authority::{AuthorityError, AuthorityFetcher};
use authsig_types::{AccountAuthority, ChainEndpoint, KeyWeight, PermissionEntry, RequiredAuth};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type ErrorFactory = Arc<dyn Fn() -> AuthorityError + Send + Sync>;

#[derive(Clone)]
enum Scripted {
    Authority(AccountAuthority),
    Error(ErrorFactory),
}

/// A fetcher that serves pre-configured authorities and records every call.
///
/// Accounts it does not know fail the way a real node does: a `Remote` 500.
#[derive(Default)]
pub struct NullFetcher {
    accounts: HashMap<String, Scripted>,
    calls: Mutex<Vec<(ChainEndpoint, String)>>,
}

impl NullFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `authority` for `account`.
    pub fn with_account(mut self, account: impl Into<String>, authority: AccountAuthority) -> Self {
        self.accounts
            .insert(account.into(), Scripted::Authority(authority));
        self
    }

    /// Fail every fetch of `account` with the error `make_error` builds.
    pub fn with_error<E>(mut self, account: impl Into<String>, make_error: E) -> Self
    where
        E: Fn() -> AuthorityError + Send + Sync + 'static,
    {
        self.accounts
            .insert(account.into(), Scripted::Error(Arc::new(make_error)));
        self
    }

    /// All `(endpoint, account)` pairs fetched so far, in call order.
    pub fn calls(&self) -> Vec<(ChainEndpoint, String)> {
        self.lock_calls().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<(ChainEndpoint, String)>> {
        // A poisoned lock only means another test thread panicked mid-push.
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl AuthorityFetcher for NullFetcher {
    async fn fetch_authority(
        &self,
        endpoint: &ChainEndpoint,
        account: &str,
    ) -> Result<AccountAuthority, AuthorityError> {
        self.lock_calls()
            .push((endpoint.clone(), account.to_string()));
        match self.accounts.get(account) {
            Some(Scripted::Authority(authority)) => Ok(authority.clone()),
            Some(Scripted::Error(make_error)) => Err(make_error()),
            None => Err(AuthorityError::Remote {
                status: 500,
                message: format!("unknown key: {account}"),
            }),
        }
    }
}

/// Build an authority for `account` from `(permission, keys)` pairs, every key at weight 1.
pub fn authority_with_keys(account: &str, permissions: &[(&str, &[&str])]) -> AccountAuthority {
    AccountAuthority {
        account_name: Some(account.to_string()),
        permissions: Some(
            permissions
                .iter()
                .map(|(name, keys)| PermissionEntry {
                    perm_name: Some(name.to_string()),
                    required_auth: Some(RequiredAuth {
                        threshold: Some(1),
                        keys: Some(
                            keys.iter()
                                .map(|key| KeyWeight {
                                    key: key.to_string(),
                                    weight: 1,
                                })
                                .collect(),
                        ),
                        ..RequiredAuth::default()
                    }),
                    ..PermissionEntry::default()
                })
                .collect(),
        ),
        ..AccountAuthority::default()
    }
}
