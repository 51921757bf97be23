//! Types shared by the configuration, connection and query surfaces

use std::fmt;
use std::str::FromStr;

use miniscript::bitcoin;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::SdkError;

/// The Liquid network a session operates against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiquidNetwork {
    Mainnet,
    Testnet,
    Regtest,
}

impl LiquidNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Regtest => "regtest",
        }
    }

    /// Bitcoin network used to encode the signer's extended keys.
    pub fn bitcoin_network(&self) -> bitcoin::Network {
        match self {
            Self::Mainnet => bitcoin::Network::Bitcoin,
            Self::Testnet | Self::Regtest => bitcoin::Network::Testnet,
        }
    }
}

impl From<bitcoin::Network> for LiquidNetwork {
    fn from(network: bitcoin::Network) -> Self {
        match network {
            bitcoin::Network::Bitcoin => Self::Mainnet,
            bitcoin::Network::Regtest => Self::Regtest,
            _ => Self::Testnet,
        }
    }
}

impl fmt::Display for LiquidNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LiquidNetwork {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "liquid" => Ok(Self::Mainnet),
            "testnet" | "liquid-testnet" | "liquidtestnet" => Ok(Self::Testnet),
            "regtest" | "liquid-regtest" => Ok(Self::Regtest),
            other => Err(SdkError::Config(format!("Invalid network: {}", other))),
        }
    }
}

/// Request to open a wallet session. Exactly one of `mnemonic` and `seed`
/// must be set.
#[derive(Clone)]
pub struct ConnectRequest {
    pub config: Config,
    pub mnemonic: Option<String>,
    pub passphrase: Option<String>,
    pub seed: Option<Vec<u8>>,
}

impl ConnectRequest {
    pub fn with_mnemonic(config: Config, mnemonic: impl Into<String>) -> Self {
        Self {
            config,
            mnemonic: Some(mnemonic.into()),
            passphrase: None,
            seed: None,
        }
    }
}

impl fmt::Debug for ConnectRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectRequest")
            .field("config", &self.config)
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .field("seed", &self.seed.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletInfo {
    pub balance_sat: u64,
    pub pending_send_sat: u64,
    pub pending_receive_sat: u64,
    /// BIP32 fingerprint of the master key, hex encoded
    pub fingerprint: String,
    /// Compressed public key of the master key, hex encoded
    pub pubkey: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainInfo {
    pub liquid_tip: u32,
    pub bitcoin_tip: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetInfoResponse {
    pub wallet_info: WalletInfo,
    pub blockchain_info: BlockchainInfo,
}

impl GetInfoResponse {
    pub fn pubkey(&self) -> &str {
        &self.wallet_info.pubkey
    }
}

/// Events emitted by a session to its registered listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkEvent {
    Synced,
    Disconnected,
}
