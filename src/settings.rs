//! Run settings, layered from a TOML file, the environment and the command
//! line (later layers win).

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;

use crate::{error::SdkError, model::LiquidNetwork, sdk::Backend};

pub const API_KEY_ENV: &str = "BREEZ_API_KEY";
pub const MNEMONIC_ENV: &str = "BREEZ_CHECK_MNEMONIC";

/// Contents of the optional configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    pub network: Option<LiquidNetwork>,
    pub mnemonic: Option<String>,
    pub mnemonic_file: Option<PathBuf>,
    pub passphrase: Option<String>,
    pub breez_api_key: Option<String>,
    /// An empty string or "none" disables the sync service.
    pub sync_service_url: Option<String>,
    pub working_dir: Option<String>,
    pub backend: Option<Backend>,
    pub log_level: Option<String>,
}

impl SettingsFile {
    pub fn from_file(path: &Path) -> Result<Self, SdkError> {
        let content = fs::read_to_string(path).map_err(|e| {
            SdkError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SdkError> {
        toml::from_str(content)
            .map_err(|e| SdkError::Config(format!("Failed to parse config file: {}", e)))
    }
}

/// Values picked up from the process environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Env {
    pub breez_api_key: Option<String>,
    pub mnemonic: Option<String>,
}

impl Env {
    /// Call after loading any `.env` file.
    pub fn from_process() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            breez_api_key: var(API_KEY_ENV),
            mnemonic: var(MNEMONIC_ENV),
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub network: Option<LiquidNetwork>,
    pub mnemonic: Option<String>,
    pub mnemonic_file: Option<PathBuf>,
    pub passphrase: Option<String>,
    pub breez_api_key: Option<String>,
    pub sync_service_url: Option<String>,
    pub no_sync_service: bool,
    pub working_dir: Option<String>,
    pub backend: Option<Backend>,
    pub log_level: Option<String>,
    pub json: bool,
    pub with_listener: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncService {
    /// Keep the network's default endpoint
    Default,
    Disabled,
    Url(String),
}

impl SyncService {
    fn from_setting(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            Self::Disabled
        } else {
            Self::Url(trimmed.to_string())
        }
    }
}

/// Resolved settings for a single run
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub network: LiquidNetwork,
    pub mnemonic: Option<String>,
    pub passphrase: Option<String>,
    pub breez_api_key: Option<String>,
    pub sync_service: SyncService,
    pub working_dir: Option<String>,
    pub backend: Backend,
    pub log_level: LevelFilter,
    pub json: bool,
    pub with_listener: bool,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("network", &self.network)
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field("breez_api_key", &self.breez_api_key.is_some())
            .field("sync_service", &self.sync_service)
            .field("working_dir", &self.working_dir)
            .field("backend", &self.backend)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            network: LiquidNetwork::Testnet,
            mnemonic: None,
            passphrase: None,
            breez_api_key: None,
            sync_service: SyncService::Default,
            working_dir: None,
            backend: Backend::Local,
            log_level: LevelFilter::Info,
            json: false,
            with_listener: false,
        }
    }
}

fn read_mnemonic_file(path: &Path) -> Result<String, SdkError> {
    let content = fs::read_to_string(path).map_err(|e| {
        SdkError::Config(format!("Failed to read mnemonic file {}: {}", path.display(), e))
    })?;
    Ok(content.trim().to_string())
}

/// A mnemonic given inline wins over a mnemonic file at the same layer.
fn layer_mnemonic(
    inline: Option<String>,
    path: Option<PathBuf>,
) -> Option<Result<String, SdkError>> {
    match (inline, path) {
        (Some(mnemonic), _) => Some(Ok(mnemonic)),
        (None, Some(path)) => Some(read_mnemonic_file(&path)),
        (None, None) => None,
    }
}

fn parse_log_level(level: &str) -> Result<LevelFilter, SdkError> {
    level
        .trim()
        .parse()
        .map_err(|_| SdkError::Config(format!("Invalid log level: {}", level)))
}

impl Settings {
    pub fn resolve(file: SettingsFile, env: Env, cli: Overrides) -> Result<Self, SdkError> {
        let defaults = Self::default();

        // Mnemonic files are only read for the layer that wins.
        let (file_inline, file_path) = (file.mnemonic, file.mnemonic_file);
        let env_mnemonic = env.mnemonic;
        let mnemonic = layer_mnemonic(cli.mnemonic, cli.mnemonic_file)
            .or_else(|| env_mnemonic.map(Ok))
            .or_else(|| layer_mnemonic(file_inline, file_path))
            .transpose()?;

        let sync_service = if cli.no_sync_service {
            SyncService::Disabled
        } else if let Some(url) = cli.sync_service_url {
            SyncService::from_setting(url)
        } else if let Some(url) = file.sync_service_url {
            SyncService::from_setting(url)
        } else {
            defaults.sync_service
        };

        let log_level = match cli.log_level.or(file.log_level) {
            Some(level) => parse_log_level(&level)?,
            None => defaults.log_level,
        };

        Ok(Self {
            network: cli.network.or(file.network).unwrap_or(defaults.network),
            mnemonic,
            passphrase: cli.passphrase.or(file.passphrase),
            breez_api_key: cli
                .breez_api_key
                .or(env.breez_api_key)
                .or(file.breez_api_key),
            sync_service,
            working_dir: cli.working_dir.or(file.working_dir),
            backend: cli.backend.or(file.backend).unwrap_or(defaults.backend),
            log_level,
            json: cli.json,
            with_listener: cli.with_listener,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_file() {
        let file = SettingsFile::from_toml_str(
            r#"
            network = "regtest"
            mnemonic = "abandon about"
            breez_api_key = "key"
            sync_service_url = "none"
            working_dir = "/tmp/check"
            backend = "local"
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(file.network, Some(LiquidNetwork::Regtest));
        assert_eq!(file.backend, Some(Backend::Local));

        let settings = Settings::resolve(file, Env::default(), Overrides::default()).unwrap();
        assert_eq!(settings.network, LiquidNetwork::Regtest);
        assert_eq!(settings.sync_service, SyncService::Disabled);
        assert_eq!(settings.log_level, LevelFilter::Debug);
        assert_eq!(settings.working_dir.as_deref(), Some("/tmp/check"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(SettingsFile::from_toml_str("netwrok = \"testnet\"").is_err());
    }

    #[test]
    fn defaults_without_any_layer() {
        let settings =
            Settings::resolve(SettingsFile::default(), Env::default(), Overrides::default())
                .unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.mnemonic, None);
    }

    #[test]
    fn later_layers_win() {
        let file = SettingsFile {
            network: Some(LiquidNetwork::Mainnet),
            mnemonic: Some("from file".to_string()),
            breez_api_key: Some("file key".to_string()),
            sync_service_url: Some("https://file.example".to_string()),
            ..Default::default()
        };
        let env = Env {
            breez_api_key: Some("env key".to_string()),
            mnemonic: Some("from env".to_string()),
        };
        let cli = Overrides {
            network: Some(LiquidNetwork::Testnet),
            no_sync_service: true,
            ..Default::default()
        };

        let settings = Settings::resolve(file, env, cli).unwrap();
        assert_eq!(settings.network, LiquidNetwork::Testnet);
        assert_eq!(settings.mnemonic.as_deref(), Some("from env"));
        assert_eq!(settings.breez_api_key.as_deref(), Some("env key"));
        assert_eq!(settings.sync_service, SyncService::Disabled);
    }

    #[test]
    fn sync_url_from_cli() {
        let cli = Overrides {
            sync_service_url: Some(" https://sync.example ".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(SettingsFile::default(), Env::default(), cli).unwrap();
        assert_eq!(
            settings.sync_service,
            SyncService::Url("https://sync.example".to_string())
        );
    }

    #[test]
    fn invalid_log_level() {
        let cli = Overrides {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        assert!(Settings::resolve(SettingsFile::default(), Env::default(), cli).is_err());
    }

    #[test]
    fn stale_file_mnemonic_path_is_ignored_when_overridden() {
        let file = SettingsFile::from_toml_str(
            "mnemonic_file = \"/nonexistent/breez-check/mnemonic\"",
        )
        .unwrap();

        let cli = Overrides {
            mnemonic: Some("from cli".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(file.clone(), Env::default(), cli).unwrap();
        assert_eq!(settings.mnemonic.as_deref(), Some("from cli"));

        let env = Env {
            mnemonic: Some("from env".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(file.clone(), env, Overrides::default()).unwrap();
        assert_eq!(settings.mnemonic.as_deref(), Some("from env"));

        // Without an override the file layer is used and its path must exist.
        assert!(matches!(
            Settings::resolve(file, Env::default(), Overrides::default()),
            Err(SdkError::Config(_))
        ));
    }

    #[test]
    fn missing_mnemonic_file() {
        let cli = Overrides {
            mnemonic_file: Some(PathBuf::from("/nonexistent/breez-check/mnemonic")),
            ..Default::default()
        };
        assert!(matches!(
            Settings::resolve(SettingsFile::default(), Env::default(), cli),
            Err(SdkError::Config(_))
        ));
    }
}
