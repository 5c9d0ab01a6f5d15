//! Chain identifiers and node endpoints.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque identifier of a blockchain network instance (usually the chain's hex id).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(String);

impl ChainId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChainId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChainId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for ChainId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// URL scheme used to reach a chain node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// TLS transport, the default for public nodes.
    #[default]
    Https,
    /// Plain HTTP, for local nodes.
    Http,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

/// Network address of a chain node's HTTP API.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainEndpoint {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub protocol: Protocol,
}

impl ChainEndpoint {
    /// An HTTPS endpoint.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            protocol: Protocol::Https,
        }
    }

    /// Override the URL scheme.
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// `{protocol}://{host}:{port}`, without a trailing slash.
    ///
    /// IPv6 literal hosts are bracketed: `http://[::1]:8888`.
    pub fn base_url(&self) -> String {
        let scheme = self.protocol.as_str();
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("{scheme}://[{}]:{}", self.host, self.port)
        } else {
            format!("{scheme}://{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Display for ChainEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_defaults_to_https() {
        let endpoint = ChainEndpoint::new("node.example", 443);
        assert_eq!(endpoint.base_url(), "https://node.example:443");
    }

    #[test]
    fn base_url_with_http() {
        let endpoint = ChainEndpoint::new("127.0.0.1", 8888).with_protocol(Protocol::Http);
        assert_eq!(endpoint.base_url(), "http://127.0.0.1:8888");
    }

    #[test]
    fn base_url_brackets_ipv6_hosts() {
        let endpoint = ChainEndpoint::new("::1", 8888).with_protocol(Protocol::Http);
        assert_eq!(endpoint.base_url(), "http://[::1]:8888");

        let endpoint = ChainEndpoint::new("[2001:db8::1]", 443);
        assert_eq!(endpoint.base_url(), "https://[2001:db8::1]:443");
    }

    #[test]
    fn endpoint_protocol_is_optional_in_json() {
        let endpoint: ChainEndpoint =
            serde_json::from_str(r#"{"host": "node.example", "port": 443}"#).unwrap();
        assert_eq!(endpoint.protocol, Protocol::Https);

        let endpoint: ChainEndpoint =
            serde_json::from_str(r#"{"host": "localhost", "port": 80, "protocol": "http"}"#)
                .unwrap();
        assert_eq!(endpoint.protocol, Protocol::Http);
    }

    #[test]
    fn chain_id_is_transparent() {
        let id = ChainId::from("chain1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""chain1""#);
        assert_eq!(id.to_string(), "chain1");
    }
}
