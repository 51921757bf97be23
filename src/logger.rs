//! Logging setup for the binary

use std::{io::Write, panic, process, time::SystemTime};

use crate::report::REPORT_TARGET;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Log to stderr. Chatty dependencies are capped at `warn` unless tracing,
/// the report lines are never filtered below `info`.
pub fn setup_logger(log_level: log::LevelFilter) -> Result<(), fern::InitError> {
    let deps_level = match log_level {
        log::LevelFilter::Trace => log::LevelFilter::Trace,
        level => level.min(log::LevelFilter::Warn),
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                now_secs(),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log_level)
        .level_for(REPORT_TARGET, log_level.max(log::LevelFilter::Info))
        .level_for("breez_sdk_liquid", deps_level)
        .level_for("hyper", deps_level)
        .level_for("rustls", deps_level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

/// Log panics with a backtrace before exiting.
pub fn setup_panic_hook() {
    panic::set_hook(Box::new(move |panic_info| {
        let file = panic_info
            .location()
            .map(|l| l.file())
            .unwrap_or_else(|| "'unknown'");
        let line = panic_info
            .location()
            .map(|l| l.line().to_string())
            .unwrap_or_else(|| "'unknown'".to_string());

        let bt = backtrace::Backtrace::new();
        let info = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned());
        log::error!(
            "panic occurred at line {} of file {}: {:?}\n{:?}",
            line,
            file,
            info,
            bt
        );

        log::logger().flush();
        let _ = std::io::stdout().flush();
        process::exit(1);
    }));
}
