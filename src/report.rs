//! Reporting of a run's outcome

use std::fmt;
use std::io::Write;

use crate::{error::SdkError, model::GetInfoResponse};

/// Step of the check at which an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ConfigCreation,
    Connect,
    EventListener,
    GetInfo,
    Report,
}

/// Log target of the outcome lines. Kept at `info` or more verbose
/// whatever the configured level.
pub const REPORT_TARGET: &str = "breez_check::report";

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigCreation => write!(f, "Config creation"),
            Self::Connect => write!(f, "Connect"),
            Self::EventListener => write!(f, "Event listener"),
            Self::GetInfo => write!(f, "GetInfo"),
            Self::Report => write!(f, "Report"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarnessError {
    pub stage: Stage,
    pub source: SdkError,
}

impl HarnessError {
    pub fn new(stage: Stage, source: SdkError) -> Self {
        Self { stage, source }
    }
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.source)
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// The fatal line logged before aborting. Carries the error's debug
/// representation so that the detail survives.
pub fn fatal_message(err: &HarnessError) -> String {
    format!("{} failed: {:?}", err.stage, err.source)
}

#[derive(Debug, Clone, Default)]
pub struct Reporter {
    /// Also print the whole info response as JSON on stdout
    pub json: bool,
}

impl Reporter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn report(&self, info: &GetInfoResponse) -> Result<(), serde_json::Error> {
        log::info!(target: REPORT_TARGET, "{}", info.pubkey());
        if self.json {
            println!("{}", serde_json::to_string_pretty(info)?);
        }
        Ok(())
    }

    /// Log the error and terminate the process with a non-zero status.
    pub fn fatal(&self, err: &HarnessError) -> ! {
        log::error!(target: REPORT_TARGET, "{}", fatal_message(err));
        if let Some(hint) = err.source.action_hint() {
            log::error!(target: REPORT_TARGET, "{}", hint);
        }
        log::logger().flush();
        let _ = std::io::stdout().flush();
        std::process::exit(1)
    }
}
