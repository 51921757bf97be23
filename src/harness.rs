//! The connect-and-report check: build the configuration, connect a
//! session, query its info. Each step must succeed before the next starts.

use crate::{
    bindings::{self, BindingLiquidSdk},
    config::Config,
    error::SdkError,
    events::LogListener,
    model::{ConnectRequest, GetInfoResponse},
    report::{HarnessError, Stage},
    settings::{Settings, SyncService},
};

pub fn build_config(settings: &Settings) -> Result<Config, HarnessError> {
    let stage = |e| HarnessError::new(Stage::ConfigCreation, e);

    let mut config =
        bindings::default_config(settings.network, settings.breez_api_key.clone()).map_err(stage)?;
    match &settings.sync_service {
        SyncService::Default => {}
        SyncService::Disabled => config = config.with_sync_service_url(None),
        SyncService::Url(url) => config = config.with_sync_service_url(Some(url.clone())),
    }
    if let Some(working_dir) = &settings.working_dir {
        config = config.with_working_dir(working_dir.clone());
    }
    config.validate().map_err(stage)?;

    log::debug!("Config: {:?}", config);
    Ok(config)
}

pub fn connect(settings: &Settings, config: Config) -> Result<BindingLiquidSdk, HarnessError> {
    let mnemonic = settings.mnemonic.clone().ok_or_else(|| {
        HarnessError::new(
            Stage::ConfigCreation,
            SdkError::Config("No mnemonic given".to_string()),
        )
    })?;

    let req = ConnectRequest {
        config,
        mnemonic: Some(mnemonic),
        passphrase: settings.passphrase.clone(),
        seed: None,
    };
    let response = bindings::connect_with(settings.backend, req)
        .map_err(|e| HarnessError::new(Stage::Connect, e))?;
    Ok(response.sdk)
}

pub fn query_info(
    settings: &Settings,
    sdk: &BindingLiquidSdk,
) -> Result<GetInfoResponse, HarnessError> {
    let listener_stage = |e| HarnessError::new(Stage::EventListener, e);

    let listener_id = if settings.with_listener {
        Some(
            sdk.add_event_listener(Box::new(LogListener))
                .map_err(listener_stage)?,
        )
    } else {
        None
    };

    let info = sdk
        .get_info()
        .map_err(|e| HarnessError::new(Stage::GetInfo, e))?;

    if let Some(id) = listener_id {
        sdk.remove_event_listener(&id).map_err(listener_stage)?;
    }

    Ok(info)
}

/// Run the whole check. The session is left open.
pub fn run(settings: &Settings) -> Result<GetInfoResponse, HarnessError> {
    let config = build_config(settings)?;
    let sdk = connect(settings, config)?;
    query_info(settings, &sdk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LiquidNetwork;

    const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn settings() -> Settings {
        Settings {
            mnemonic: Some(MNEMONIC.to_string()),
            sync_service: SyncService::Disabled,
            ..Default::default()
        }
    }

    #[test]
    fn standard_mnemonic_on_testnet() {
        let info = run(&settings()).unwrap();
        assert_eq!(
            info.pubkey(),
            "03d902f35f560e0470c63313c7369168d9d7df2d49bf295fd9fb7cb109ccee0494"
        );
    }

    #[test]
    fn with_listener_registered() {
        let settings = Settings {
            with_listener: true,
            ..settings()
        };
        assert!(!run(&settings).unwrap().pubkey().is_empty());
    }

    #[test]
    fn sync_override_applied() {
        let settings = Settings {
            sync_service: SyncService::Url("https://sync.example".to_string()),
            working_dir: Some("/tmp/breez-check".to_string()),
            ..settings()
        };
        let config = build_config(&settings).unwrap();
        assert_eq!(config.sync_service_url.as_deref(), Some("https://sync.example"));
        assert_eq!(config.working_dir, "/tmp/breez-check");
    }

    #[test]
    fn malformed_mnemonic_stops_at_connect() {
        let settings = Settings {
            mnemonic: Some("abandon abandon abandon".to_string()),
            ..settings()
        };
        let err = run(&settings).unwrap_err();
        assert_eq!(err.stage, Stage::Connect);
        assert!(matches!(err.source, SdkError::InvalidMnemonic(_)));
    }

    #[test]
    fn mainnet_without_key_stops_at_config() {
        let settings = Settings {
            network: LiquidNetwork::Mainnet,
            ..settings()
        };
        let err = run(&settings).unwrap_err();
        assert_eq!(err.stage, Stage::ConfigCreation);
        assert_eq!(err.source, SdkError::MissingApiKey);
    }

    #[test]
    fn missing_mnemonic_is_a_config_error() {
        let settings = Settings {
            mnemonic: None,
            ..settings()
        };
        let err = run(&settings).unwrap_err();
        assert_eq!(err.stage, Stage::ConfigCreation);
    }

    #[test]
    fn invalid_sync_url_is_a_config_error() {
        let settings = Settings {
            sync_service: SyncService::Url("sync.example".to_string()),
            ..settings()
        };
        let err = build_config(&settings).unwrap_err();
        assert_eq!(err.stage, Stage::ConfigCreation);
    }
}
