//! Session backed by Breez SDK Liquid

use std::sync::Arc;

use async_trait::async_trait;
use breez_sdk_liquid::prelude::{
    Config as BreezConfig, ConnectRequest as BreezConnectRequest, EventListener as BreezListener,
    LiquidNetwork as BreezNetwork, LiquidSdk, SdkEvent as BreezEvent,
};

use crate::{
    config::Config,
    error::SdkError,
    events::EventListener,
    model::{BlockchainInfo, ConnectRequest, GetInfoResponse, LiquidNetwork, SdkEvent, WalletInfo},
    sdk::WalletSdk,
};

/// Build the Breez SDK configuration matching ours
pub fn breez_config(config: &Config) -> BreezConfig {
    let network = match config.network {
        LiquidNetwork::Mainnet => BreezNetwork::Mainnet,
        LiquidNetwork::Testnet => BreezNetwork::Testnet,
        LiquidNetwork::Regtest => BreezNetwork::Regtest,
    };

    let mut breez_config = match network {
        BreezNetwork::Mainnet => BreezConfig::mainnet_esplora(config.breez_api_key.clone()),
        BreezNetwork::Testnet => BreezConfig::testnet_esplora(config.breez_api_key.clone()),
        BreezNetwork::Regtest => BreezConfig::regtest_esplora(),
    };

    breez_config.working_dir = config.working_dir.clone();
    breez_config.sync_service_url = config.sync_service_url.clone();
    breez_config
}

pub struct BreezSdk {
    sdk: Arc<LiquidSdk>,
}

impl BreezSdk {
    pub async fn connect(req: ConnectRequest) -> Result<Self, SdkError> {
        let connect_request = BreezConnectRequest {
            config: breez_config(&req.config),
            mnemonic: req.mnemonic,
            passphrase: req.passphrase,
            seed: req.seed,
        };

        let sdk = LiquidSdk::connect(connect_request)
            .await
            .map_err(|e| SdkError::ConnectionFailed(e.to_string()))?;

        Ok(Self { sdk })
    }
}

/// Forwards the SDK events we know about to one of our listeners
struct ListenerAdapter {
    inner: Box<dyn EventListener>,
}

impl BreezListener for ListenerAdapter {
    fn on_event(&self, e: BreezEvent) {
        let event = match e {
            BreezEvent::Synced => SdkEvent::Synced,
            _ => return,
        };
        self.inner.on_event(event);
    }
}

#[async_trait]
impl WalletSdk for BreezSdk {
    async fn get_info(&self) -> Result<GetInfoResponse, SdkError> {
        let info = self
            .sdk
            .get_info()
            .await
            .map_err(|e| SdkError::InfoFetchFailed(e.to_string()))?;

        Ok(GetInfoResponse {
            wallet_info: WalletInfo {
                balance_sat: info.wallet_info.balance_sat,
                pending_send_sat: info.wallet_info.pending_send_sat,
                pending_receive_sat: info.wallet_info.pending_receive_sat,
                fingerprint: info.wallet_info.fingerprint,
                pubkey: info.wallet_info.pubkey,
            },
            blockchain_info: BlockchainInfo {
                liquid_tip: info.blockchain_info.liquid_tip,
                bitcoin_tip: info.blockchain_info.bitcoin_tip,
            },
        })
    }

    async fn sync(&self) -> Result<(), SdkError> {
        self.sdk
            .sync(false)
            .await
            .map_err(|e| SdkError::SyncFailed(e.to_string()))
    }

    async fn add_event_listener(
        &self,
        listener: Box<dyn EventListener>,
    ) -> Result<String, SdkError> {
        self.sdk
            .add_event_listener(Box::new(ListenerAdapter { inner: listener }))
            .await
            .map_err(|e| SdkError::EventListenerFailed(e.to_string()))
    }

    async fn remove_event_listener(&self, id: &str) -> Result<(), SdkError> {
        self.sdk
            .remove_event_listener(id.to_string())
            .await
            .map_err(|e| SdkError::EventListenerFailed(e.to_string()))
    }

    async fn disconnect(&self) -> Result<(), SdkError> {
        self.sdk.disconnect().await.map_err(SdkError::from)
    }
}
