//! Wallet session surface
//!
//! A session is opened with [`connect_with`] against one of the available
//! [`Backend`]s and is then driven through the [`WalletSdk`] trait:
//! - [`Backend::Local`] derives the wallet keys in process and never touches
//!   the network.
//! - [`Backend::Breez`] delegates to Breez SDK Liquid (requires the `breez`
//!   feature).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::SdkError,
    events::EventListener,
    local::LocalSdk,
    model::{ConnectRequest, GetInfoResponse},
};

#[async_trait]
pub trait WalletSdk: Send + Sync {
    async fn get_info(&self) -> Result<GetInfoResponse, SdkError>;

    async fn sync(&self) -> Result<(), SdkError>;

    /// Returns the id to pass to [`WalletSdk::remove_event_listener`].
    async fn add_event_listener(
        &self,
        listener: Box<dyn EventListener>,
    ) -> Result<String, SdkError>;

    async fn remove_event_listener(&self, id: &str) -> Result<(), SdkError>;

    async fn disconnect(&self) -> Result<(), SdkError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Local,
    Breez,
}

impl FromStr for Backend {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "breez" => Ok(Self::Breez),
            other => Err(SdkError::Config(format!("Unknown backend: {}", other))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Breez => write!(f, "breez"),
        }
    }
}

pub struct ConnectResponse {
    pub sdk: Arc<dyn WalletSdk>,
}

impl fmt::Debug for ConnectResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectResponse").finish_non_exhaustive()
    }
}

/// Check the parts of a request every backend relies on.
pub fn validate_request(req: &ConnectRequest) -> Result<(), SdkError> {
    req.config.validate()?;
    match (&req.mnemonic, &req.seed) {
        (Some(_), Some(_)) => Err(SdkError::Config(
            "Only one of mnemonic or seed can be set".to_string(),
        )),
        (None, None) => Err(SdkError::Config(
            "Either mnemonic or seed must be set".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Open a wallet session on the given backend
pub async fn connect_with(
    backend: Backend,
    req: ConnectRequest,
) -> Result<ConnectResponse, SdkError> {
    validate_request(&req)?;
    log::info!("Connecting {} session on {}", backend, req.config.network);
    log::debug!("Working dir: {}", req.config.working_dir);

    let sdk: Arc<dyn WalletSdk> = match backend {
        Backend::Local => Arc::new(LocalSdk::connect(req)?),
        #[cfg(feature = "breez")]
        Backend::Breez => Arc::new(crate::breez::BreezSdk::connect(req).await?),
        #[cfg(not(feature = "breez"))]
        Backend::Breez => {
            return Err(SdkError::Config(
                "Built without Breez SDK support, rebuild with --features breez".to_string(),
            ))
        }
    };

    log::info!("Session connected");
    Ok(ConnectResponse { sdk })
}
