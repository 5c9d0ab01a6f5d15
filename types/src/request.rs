//! Verification request.

use crate::chain::ChainId;
use serde::{Deserialize, Serialize};

/// "Was `data` signed by `account` on `chain_id`?"
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub chain_id: ChainId,
    pub account: String,
    /// Signature in the chain's text encoding (`SIG_K1_...`).
    pub signature: String,
    /// The signed payload, exactly as it was signed.
    pub data: String,
}

impl VerificationRequest {
    pub fn new(
        chain_id: impl Into<ChainId>,
        account: impl Into<String>,
        signature: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            account: account.into(),
            signature: signature.into(),
            data: data.into(),
        }
    }
}
