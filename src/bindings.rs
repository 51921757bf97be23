//! Blocking call surface
//!
//! Mirrors the shape exposed to foreign-language bindings: every call blocks
//! the calling thread until the async core is done. Must not be called from
//! within a tokio runtime.

use std::sync::{Arc, OnceLock};

use tokio::runtime::Runtime;

use crate::{
    config::{self, Config},
    error::SdkError,
    events::EventListener,
    model::{ConnectRequest, GetInfoResponse, LiquidNetwork},
    sdk::{self, Backend, WalletSdk},
};

static RT: OnceLock<Runtime> = OnceLock::new();

fn rt() -> Result<&'static Runtime, SdkError> {
    if let Some(rt) = RT.get() {
        return Ok(rt);
    }
    // Multi-threaded so that tasks spawned by a session keep running between
    // blocking calls.
    let runtime = Runtime::new()
        .map_err(|e| SdkError::Generic(format!("Failed to start runtime: {}", e)))?;
    // Another thread may have won the race, either runtime is fine.
    let _ = RT.set(runtime);
    RT.get()
        .ok_or_else(|| SdkError::Generic("Runtime not available".to_string()))
}

pub fn default_config(
    network: LiquidNetwork,
    breez_api_key: Option<String>,
) -> Result<Config, SdkError> {
    config::default_config(network, breez_api_key)
}

pub struct ConnectResponse {
    pub sdk: BindingLiquidSdk,
}

/// Connect using the local backend.
pub fn connect(req: ConnectRequest) -> Result<ConnectResponse, SdkError> {
    connect_with(Backend::Local, req)
}

pub fn connect_with(backend: Backend, req: ConnectRequest) -> Result<ConnectResponse, SdkError> {
    let response = rt()?.block_on(sdk::connect_with(backend, req))?;
    Ok(ConnectResponse {
        sdk: BindingLiquidSdk { sdk: response.sdk },
    })
}

#[derive(Clone)]
pub struct BindingLiquidSdk {
    sdk: Arc<dyn WalletSdk>,
}

impl BindingLiquidSdk {
    pub fn get_info(&self) -> Result<GetInfoResponse, SdkError> {
        rt()?.block_on(self.sdk.get_info())
    }

    pub fn sync(&self) -> Result<(), SdkError> {
        rt()?.block_on(self.sdk.sync())
    }

    pub fn add_event_listener(&self, listener: Box<dyn EventListener>) -> Result<String, SdkError> {
        rt()?.block_on(self.sdk.add_event_listener(listener))
    }

    pub fn remove_event_listener(&self, id: &str) -> Result<(), SdkError> {
        rt()?.block_on(self.sdk.remove_event_listener(id))
    }

    pub fn disconnect(&self) -> Result<(), SdkError> {
        rt()?.block_on(self.sdk.disconnect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::mpsc, time::Duration};

    const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn spawned_tasks_run_outside_blocking_calls() {
        let (sender, receiver) = mpsc::channel();
        rt().unwrap().spawn(async move {
            let _ = sender.send(42u32);
        });
        assert_eq!(receiver.recv_timeout(Duration::from_secs(5)), Ok(42));
    }

    #[test]
    fn blocking_flow() {
        let config = default_config(LiquidNetwork::Testnet, None)
            .unwrap()
            .with_sync_service_url(None);
        let sdk = connect(ConnectRequest::with_mnemonic(config, MNEMONIC))
            .unwrap()
            .sdk;

        let info = sdk.get_info().unwrap();
        assert_eq!(
            info.wallet_info.pubkey,
            "03d902f35f560e0470c63313c7369168d9d7df2d49bf295fd9fb7cb109ccee0494"
        );

        sdk.disconnect().unwrap();
        assert_eq!(sdk.get_info(), Err(SdkError::NotConnected));
    }
}
