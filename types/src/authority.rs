//! Account authority schema, as returned by a node's `/v1/chain/get_account`.
//!
//! Only the fields the verifier relies on are typed. Everything else the node sends
//! is kept in the `extra` maps so the full payload can be handed back to callers.
//!
//! Absent and `null` collections both deserialize to `None`; callers go through the
//! accessor methods, which treat `None` as empty.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `get_account` response for one account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountAuthority {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,

    /// Permission levels (owner, active, custom ones).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<PermissionEntry>>,

    /// Remaining response fields, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One named permission level.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perm_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Missing only on malformed responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_auth: Option<RequiredAuth>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The authority requirement of a permission level.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequiredAuth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<KeyWeight>>,

    /// Account-permission delegations. Not followed by the verifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<Value>>,

    /// Time-delay weights. Not followed by the verifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waits: Option<Vec<Value>>,
}

/// A public key and its weight towards the permission threshold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyWeight {
    /// Public key in the chain's text encoding (`PUB_K1_...` or legacy `EOS...`).
    pub key: String,
    #[serde(default)]
    pub weight: u32,
}

impl AccountAuthority {
    /// Permission entries, empty when the node sent none.
    pub fn permissions(&self) -> &[PermissionEntry] {
        self.permissions.as_deref().unwrap_or_default()
    }

    /// Look up a permission level by name.
    pub fn permission(&self, name: &str) -> Option<&PermissionEntry> {
        self.permissions()
            .iter()
            .find(|p| p.perm_name.as_deref() == Some(name))
    }
}

impl PermissionEntry {
    pub fn name(&self) -> Option<&str> {
        self.perm_name.as_deref()
    }
}

impl RequiredAuth {
    /// Key weights, empty when the node sent none.
    pub fn keys(&self) -> &[KeyWeight] {
        self.keys.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = r#"{
        "account_name": "alice",
        "head_block_num": 361045128,
        "privileged": false,
        "permissions": [
            {
                "perm_name": "active",
                "parent": "owner",
                "required_auth": {
                    "threshold": 1,
                    "keys": [
                        {"key": "PUB_K1_abc", "weight": 1},
                        {"key": "PUB_K1_def", "weight": 1}
                    ],
                    "accounts": [],
                    "waits": []
                },
                "linked_actions": []
            },
            {
                "perm_name": "owner",
                "parent": "",
                "required_auth": {
                    "threshold": 1,
                    "keys": [{"key": "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV", "weight": 1}],
                    "accounts": [],
                    "waits": []
                }
            }
        ]
    }"#;

    #[test]
    fn parses_get_account_response() {
        let authority: AccountAuthority = serde_json::from_str(ALICE).unwrap();
        assert_eq!(authority.account_name.as_deref(), Some("alice"));
        assert_eq!(authority.permissions().len(), 2);

        let active = authority.permission("active").unwrap();
        assert_eq!(active.parent.as_deref(), Some("owner"));
        let auth = active.required_auth.as_ref().unwrap();
        assert_eq!(auth.threshold, Some(1));
        assert_eq!(auth.keys().len(), 2);
        assert_eq!(auth.keys()[1].key, "PUB_K1_def");
        assert!(active.extra.contains_key("linked_actions"));
    }

    #[test]
    fn unknown_fields_are_kept() {
        let authority: AccountAuthority = serde_json::from_str(ALICE).unwrap();
        assert_eq!(
            authority.extra.get("head_block_num"),
            Some(&Value::from(361045128u64))
        );

        let back = serde_json::to_value(&authority).unwrap();
        assert_eq!(back["privileged"], Value::Bool(false));
        assert_eq!(back["permissions"][0]["perm_name"], "active");
    }

    #[test]
    fn absent_and_null_permissions_are_empty() {
        let absent: AccountAuthority = serde_json::from_str(r#"{"account_name": "bob"}"#).unwrap();
        assert!(absent.permissions().is_empty());

        let null: AccountAuthority = serde_json::from_str(r#"{"permissions": null}"#).unwrap();
        assert!(null.permissions.is_none());
        assert!(null.permissions().is_empty());
    }

    #[test]
    fn missing_required_auth_parses_as_none() {
        let authority: AccountAuthority =
            serde_json::from_str(r#"{"permissions": [{"perm_name": "active"}]}"#).unwrap();
        assert!(authority.permissions()[0].required_auth.is_none());
    }

    #[test]
    fn null_keys_are_empty() {
        let auth: RequiredAuth = serde_json::from_str(r#"{"threshold": 1, "keys": null}"#).unwrap();
        assert!(auth.keys().is_empty());
    }

    #[test]
    fn key_without_weight_defaults_to_zero() {
        let kw: KeyWeight = serde_json::from_str(r#"{"key": "PUB_K1_abc"}"#).unwrap();
        assert_eq!(kw.weight, 0);
    }

    #[test]
    fn wrong_shape_is_rejected() {
        assert!(serde_json::from_str::<AccountAuthority>(r#"{"permissions": "active"}"#).is_err());
        assert!(serde_json::from_str::<KeyWeight>(r#"{"weight": 1}"#).is_err());
    }
}
