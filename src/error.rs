//! Error types for Breez SDK sessions

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SdkError {
    // Configuration errors
    MissingApiKey,
    Config(String),

    // Connection errors
    InvalidMnemonic(String),
    DerivationFailed(String),
    ConnectionFailed(String),

    // Session errors
    NotConnected,
    InfoFetchFailed(String),
    SyncFailed(String),

    // Event handling errors
    EventListenerFailed(String),

    // General errors
    Generic(String),
}

impl fmt::Display for SdkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "Breez API key must be provided on mainnet"),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::InvalidMnemonic(msg) => write!(f, "Invalid mnemonic: {}", msg),
            Self::DerivationFailed(msg) => write!(f, "Key derivation failed: {}", msg),
            Self::ConnectionFailed(msg) => write!(f, "Failed to connect: {}", msg),
            Self::NotConnected => write!(f, "Session is not connected"),
            Self::InfoFetchFailed(msg) => write!(f, "Failed to fetch wallet info: {}", msg),
            Self::SyncFailed(msg) => write!(f, "Failed to sync: {}", msg),
            Self::EventListenerFailed(msg) => write!(f, "Event listener error: {}", msg),
            Self::Generic(msg) => write!(f, "Breez SDK error: {}", msg),
        }
    }
}

impl std::error::Error for SdkError {}

impl SdkError {
    /// A short remedy for errors the user can fix themselves.
    pub fn action_hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingApiKey => Some(
                "Get a free API key from https://breez.technology/request-api-key/ \
                 and set BREEZ_API_KEY (a .env file works too)",
            ),
            Self::InvalidMnemonic(_) => {
                Some("Check the mnemonic: it must be 12 or 24 BIP39 English words")
            }
            Self::NotConnected => Some("Connect a session before querying it"),
            _ => None,
        }
    }
}

#[cfg(feature = "breez")]
impl From<breez_sdk_liquid::error::SdkError> for SdkError {
    fn from(err: breez_sdk_liquid::error::SdkError) -> Self {
        Self::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = SdkError::InvalidMnemonic("unknown word".to_string());
        assert_eq!(err.to_string(), "Invalid mnemonic: unknown word");
    }

    #[test]
    fn hints_only_for_actionable_errors() {
        assert!(SdkError::MissingApiKey.action_hint().is_some());
        assert!(SdkError::InvalidMnemonic(String::new()).action_hint().is_some());
        assert!(SdkError::ConnectionFailed("offline".into()).action_hint().is_none());
    }
}
