use std::path::PathBuf;

use clap::Parser;

use breez_check::{
    harness, logger,
    report::{fatal_message, HarnessError, Reporter, Stage},
    settings::{Env, Overrides, Settings, SettingsFile},
    Backend, LiquidNetwork, SdkError,
};

#[derive(Parser, Debug)]
#[command(name = "breez-check")]
#[command(about = "Connect a Breez SDK Liquid wallet session and report its public key")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Network to connect to (mainnet, testnet, regtest)
    #[arg(long)]
    network: Option<LiquidNetwork>,

    /// BIP39 mnemonic. Can also be set via BREEZ_CHECK_MNEMONIC
    #[arg(long)]
    mnemonic: Option<String>,

    /// Path to a file containing the mnemonic
    #[arg(long, conflicts_with = "mnemonic")]
    mnemonic_file: Option<PathBuf>,

    /// BIP39 passphrase
    #[arg(long)]
    passphrase: Option<String>,

    /// Breez API key. Can also be set via BREEZ_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    /// Override the real-time sync service URL
    #[arg(long)]
    sync_service_url: Option<String>,

    /// Disable the real-time sync service
    #[arg(long, conflicts_with = "sync_service_url")]
    no_sync_service: bool,

    /// Directory for the SDK's data
    #[arg(long)]
    working_dir: Option<String>,

    /// Session backend (local, breez)
    #[arg(long)]
    backend: Option<Backend>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Also print the wallet info as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Log session events while querying
    #[arg(long)]
    with_listener: bool,
}

impl From<Cli> for Overrides {
    fn from(cli: Cli) -> Self {
        Overrides {
            network: cli.network,
            mnemonic: cli.mnemonic,
            mnemonic_file: cli.mnemonic_file,
            passphrase: cli.passphrase,
            breez_api_key: cli.api_key,
            sync_service_url: cli.sync_service_url,
            no_sync_service: cli.no_sync_service,
            working_dir: cli.working_dir,
            backend: cli.backend,
            log_level: cli.log_level,
            json: cli.json,
            with_listener: cli.with_listener,
        }
    }
}

fn load_settings(cli: Cli) -> Result<Settings, SdkError> {
    let file = match &cli.config {
        Some(path) => SettingsFile::from_file(path)?,
        None => SettingsFile::default(),
    };
    Settings::resolve(file, Env::from_process(), cli.into())
}

fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    dotenv::dotenv().ok();

    let settings = match load_settings(cli) {
        Ok(settings) => settings,
        Err(e) => {
            // Logging is not set up yet.
            let err = HarnessError::new(Stage::ConfigCreation, e);
            eprintln!("{}", fatal_message(&err));
            std::process::exit(1);
        }
    };

    if let Err(e) = logger::setup_logger(settings.log_level) {
        eprintln!("Error setting up logger: {}", e);
        std::process::exit(1);
    }
    logger::setup_panic_hook();
    log::debug!("Settings: {:?}", settings);

    let reporter = Reporter::new(json);
    let info = match harness::run(&settings) {
        Ok(info) => info,
        Err(e) => reporter.fatal(&e),
    };
    if let Err(e) = reporter.report(&info) {
        reporter.fatal(&HarnessError::new(
            Stage::Report,
            SdkError::Generic(format!("Failed to serialize info: {}", e)),
        ));
    }
}
