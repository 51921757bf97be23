//! Offline session backed by the in-process signer

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    config::Config,
    error::SdkError,
    events::{EventListener, EventManager},
    model::{BlockchainInfo, ConnectRequest, GetInfoResponse, SdkEvent, WalletInfo},
    sdk::{validate_request, WalletSdk},
    signer::SdkSigner,
};

/// Session that derives the wallet keys locally and has no chain access, so
/// balances and tips are always zero.
pub struct LocalSdk {
    config: Config,
    signer: SdkSigner,
    connected: RwLock<bool>,
    events: EventManager,
}

impl std::fmt::Debug for LocalSdk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSdk")
            .field("network", &self.config.network)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

impl LocalSdk {
    pub fn connect(req: ConnectRequest) -> Result<Self, SdkError> {
        validate_request(&req)?;
        let network = req.config.network;
        let signer = match (&req.mnemonic, &req.seed) {
            (Some(mnemonic), None) => {
                SdkSigner::from_mnemonic(mnemonic, req.passphrase.as_deref(), network)?
            }
            (None, Some(seed)) => SdkSigner::from_seed(seed, network)?,
            _ => {
                return Err(SdkError::Config(
                    "Either mnemonic or seed must be set".to_string(),
                ))
            }
        };
        log::debug!("Local signer ready: {:?}", signer);

        Ok(Self {
            config: req.config,
            signer,
            connected: RwLock::new(true),
            events: EventManager::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn ensure_connected(&self) -> Result<(), SdkError> {
        if *self.connected.read().await {
            Ok(())
        } else {
            Err(SdkError::NotConnected)
        }
    }
}

#[async_trait]
impl WalletSdk for LocalSdk {
    async fn get_info(&self) -> Result<GetInfoResponse, SdkError> {
        self.ensure_connected().await?;
        Ok(GetInfoResponse {
            wallet_info: WalletInfo {
                balance_sat: 0,
                pending_send_sat: 0,
                pending_receive_sat: 0,
                fingerprint: self.signer.fingerprint(),
                pubkey: self.signer.pubkey(),
            },
            blockchain_info: BlockchainInfo::default(),
        })
    }

    async fn sync(&self) -> Result<(), SdkError> {
        self.ensure_connected().await?;
        self.events.notify(SdkEvent::Synced).await;
        Ok(())
    }

    async fn add_event_listener(
        &self,
        listener: Box<dyn EventListener>,
    ) -> Result<String, SdkError> {
        self.ensure_connected().await?;
        Ok(self.events.add(listener).await)
    }

    async fn remove_event_listener(&self, id: &str) -> Result<(), SdkError> {
        self.events.remove(id).await
    }

    async fn disconnect(&self) -> Result<(), SdkError> {
        {
            let mut connected = self.connected.write().await;
            if !*connected {
                return Err(SdkError::NotConnected);
            }
            *connected = false;
        }
        self.events.notify(SdkEvent::Disconnected).await;
        log::info!("Local session disconnected");
        Ok(())
    }
}
