//! Session configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{error::SdkError, model::LiquidNetwork};

pub const BREEZ_SYNC_SERVICE_URL: &str = "https://datasync.breez.technology";
pub const REGTEST_SYNC_SERVICE_URL: &str = "http://localhost:8088";

/// Session configuration, built once per run with [`default_config`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub network: LiquidNetwork,
    pub breez_api_key: Option<String>,
    /// Real-time sync endpoint. `None` disables syncing with other instances.
    pub sync_service_url: Option<String>,
    pub working_dir: String,
}

/// Create the default configuration for the given network.
///
/// Mainnet requires a Breez API key.
pub fn default_config(
    network: LiquidNetwork,
    breez_api_key: Option<String>,
) -> Result<Config, SdkError> {
    let breez_api_key = breez_api_key.filter(|k| !k.trim().is_empty());
    if network == LiquidNetwork::Mainnet && breez_api_key.is_none() {
        return Err(SdkError::MissingApiKey);
    }

    let sync_service_url = match network {
        LiquidNetwork::Mainnet | LiquidNetwork::Testnet => BREEZ_SYNC_SERVICE_URL,
        LiquidNetwork::Regtest => REGTEST_SYNC_SERVICE_URL,
    };

    Ok(Config {
        network,
        breez_api_key,
        sync_service_url: Some(sync_service_url.to_string()),
        working_dir: default_working_dir(network).to_string_lossy().to_string(),
    })
}

fn default_working_dir(network: LiquidNetwork) -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("breez-check"))
        .unwrap_or_else(|| PathBuf::from(".data"))
        .join(network.as_str())
}

impl Config {
    pub fn with_sync_service_url(mut self, url: Option<String>) -> Self {
        self.sync_service_url = url;
        self
    }

    pub fn with_working_dir(mut self, working_dir: impl Into<String>) -> Self {
        self.working_dir = working_dir.into();
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.breez_api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn validate(&self) -> Result<(), SdkError> {
        if self.working_dir.trim().is_empty() {
            return Err(SdkError::Config("Working directory must not be empty".to_string()));
        }
        if let Some(url) = &self.sync_service_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(SdkError::Config(format!("Invalid sync service URL: {}", url)));
            }
        }
        if self.network == LiquidNetwork::Mainnet && self.breez_api_key.is_none() {
            return Err(SdkError::MissingApiKey);
        }
        Ok(())
    }
}
