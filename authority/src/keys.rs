//! Flatten an account's permission tree into its public-key set.

use crate::error::AuthorityError;
use authsig_types::{AccountAuthority, PublicKeySet};

/// Collect every key of every permission, in permission order then key order.
///
/// Missing or empty `permissions` and `keys` collections contribute nothing. A
/// permission entry without `required_auth` is a protocol mismatch and fails.
/// Delegated account permissions (`required_auth.accounts`) are not followed.
pub fn extract_keys(authority: &AccountAuthority) -> Result<PublicKeySet, AuthorityError> {
    let mut keys = PublicKeySet::new();
    for (index, permission) in authority.permissions().iter().enumerate() {
        let required_auth = permission.required_auth.as_ref().ok_or_else(|| {
            let name = permission
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{index}"));
            AuthorityError::MalformedAuthority(format!("permission {name} has no required_auth"))
        })?;
        for key_weight in required_auth.keys() {
            keys.push(key_weight.key.as_str());
        }
    }
    tracing::debug!(
        account = authority.account_name.as_deref().unwrap_or_default(),
        count = keys.len(),
        "extracted public keys"
    );
    Ok(keys)
}
