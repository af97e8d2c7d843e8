//! Backend kind enumeration
//!
//! Identifies which backing service a cached value belongs to. Each kind
//! owns a fully isolated store; the wire name doubles as the first path
//! segment of the control-plane URL.

use std::fmt;
use std::str::FromStr;

/// Kind of backing service behind a cache store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Configuration parameters from a parameter store
    Parameters,
    /// Records looked up by key in a document table
    Records,
    /// Secrets from a secrets manager
    Secrets,
    /// Caller-supplied key/value pairs with no backing service
    Custom,
}

impl BackendKind {
    /// The three kinds that resolve misses through a backend fetch.
    pub const FETCHABLE: [BackendKind; 3] = [Self::Parameters, Self::Records, Self::Secrets];

    /// Get the wire representation of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parameters => "parameters",
            Self::Records => "dynamodb",
            Self::Secrets => "secret",
            Self::Custom => "custom",
        }
    }

    /// Whether a cache miss for this kind can be resolved against a backend
    pub fn is_fetchable(&self) -> bool {
        !matches!(self, Self::Custom)
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "parameters" => Ok(Self::Parameters),
            "dynamodb" => Ok(Self::Records),
            "secret" => Ok(Self::Secrets),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Unknown backend kind: {}", s)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            BackendKind::Parameters,
            BackendKind::Records,
            BackendKind::Secrets,
            BackendKind::Custom,
        ] {
            let s = kind.as_str();
            let parsed: BackendKind = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(BackendKind::Parameters.to_string(), "parameters");
        assert_eq!(BackendKind::Records.to_string(), "dynamodb");
        assert_eq!(BackendKind::Secrets.to_string(), "secret");
        assert_eq!(BackendKind::Custom.to_string(), "custom");
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!("s3".parse::<BackendKind>().is_err());
        assert!("".parse::<BackendKind>().is_err());
        assert!("Parameters".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_fetchable() {
        assert!(BackendKind::Parameters.is_fetchable());
        assert!(BackendKind::Records.is_fetchable());
        assert!(BackendKind::Secrets.is_fetchable());
        assert!(!BackendKind::Custom.is_fetchable());
        assert!(!BackendKind::FETCHABLE.contains(&BackendKind::Custom));
    }
}
