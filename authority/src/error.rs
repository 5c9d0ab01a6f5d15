use authsig_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error("no node found for chain {0}")]
    UnknownChain(String),

    #[error("chain node unreachable: {0}")]
    Network(String),

    #[error("chain node returned an error (HTTP {status}): {message}")]
    Remote { status: u16, message: String },

    #[error("malformed account authority: {0}")]
    MalformedAuthority(String),

    #[error("cannot interpret signature or key: {0}")]
    Crypto(#[from] CryptoError),
}

impl AuthorityError {
    /// Whether repeating the same call may succeed.
    ///
    /// Transport failures and node-side errors are transient. A bad chain id,
    /// a schema mismatch, or undecodable key material will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Remote { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(String),
}
