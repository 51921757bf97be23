//! Breez SDK Liquid session check
//!
//! Connects a wallet session from a mnemonic and reports its public key.
//! The flow is strictly linear: [`config::default_config`] →
//! [`bindings::connect`] → [`bindings::BindingLiquidSdk::get_info`] →
//! [`report::Reporter`].

pub mod bindings;
#[cfg(feature = "breez")]
pub mod breez;
pub mod config;
pub mod error;
pub mod events;
pub mod harness;
pub mod local;
pub mod logger;
pub mod model;
pub mod report;
pub mod sdk;
pub mod settings;
pub mod signer;

pub use config::{default_config, Config};
pub use error::SdkError;
pub use events::{EventListener, LogListener};
pub use model::{
    BlockchainInfo, ConnectRequest, GetInfoResponse, LiquidNetwork, SdkEvent, WalletInfo,
};
pub use report::{HarnessError, Reporter, Stage};
pub use sdk::{Backend, WalletSdk};
pub use settings::Settings;
