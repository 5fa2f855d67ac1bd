//! Logging setup shared by the handlefs workspace.
//!
//! The level is read once from the `HANDLEFS_LOG` environment variable:
//! - `off` (default): nothing is emitted
//! - `error`, `warn`, `info`, `debug`: events at or above that level go to stderr
//!
//! Library code logs through the macros below so that the `emit` runtime is
//! the only sink to configure.

use std::sync::Once;

// Re-export emit so the macros resolve it from any crate
pub use emit;

/// Environment variable that selects the log level.
pub const LOG_ENV: &str = "HANDLEFS_LOG";

static INIT: Once = Once::new();

/// Parsed value of [`LOG_ENV`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSetting {
    Off,
    Level(emit::Level),
    /// Unrecognized value; falls back to info.
    Unknown,
}

impl LogSetting {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "off" => LogSetting::Off,
            "debug" => LogSetting::Level(emit::Level::Debug),
            "info" => LogSetting::Level(emit::Level::Info),
            "warn" => LogSetting::Level(emit::Level::Warn),
            "error" => LogSetting::Level(emit::Level::Error),
            _ => LogSetting::Unknown,
        }
    }

    /// Minimum level to emit, or `None` when logging is disabled.
    pub fn min_level(self) -> Option<emit::Level> {
        match self {
            LogSetting::Off => None,
            LogSetting::Level(level) => Some(level),
            LogSetting::Unknown => Some(emit::Level::Info),
        }
    }
}

/// Initialize diagnostics from `HANDLEFS_LOG`.
///
/// Call once at startup. Repeated calls are ignored.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let raw = std::env::var(LOG_ENV).unwrap_or_else(|_| "off".to_string());
        let setting = LogSetting::parse(&raw);

        let Some(level) = setting.min_level() else {
            return;
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        if setting == LogSetting::Unknown {
            emit::warn!("unknown {var} value {value}, using info", var: LOG_ENV, value: raw.as_str());
        }

        // The runtime lives for the rest of the process.
        std::mem::forget(rt);
    });
}

/// Log an operation users may want to see in normal runs.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log internal state useful when debugging.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log a rejected or unusual request that does not stop the caller.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log a failure.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

pub use init_diagnostics as init;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings() {
        assert_eq!(LogSetting::parse("off"), LogSetting::Off);
        assert_eq!(LogSetting::parse(""), LogSetting::Off);
        assert_eq!(LogSetting::parse("DEBUG"), LogSetting::Level(emit::Level::Debug));
        assert_eq!(LogSetting::parse(" warn "), LogSetting::Level(emit::Level::Warn));
        assert_eq!(LogSetting::parse("loud"), LogSetting::Unknown);
    }

    #[test]
    fn test_min_level() {
        assert_eq!(LogSetting::Off.min_level(), None);
        assert_eq!(LogSetting::Unknown.min_level(), Some(emit::Level::Info));
        assert_eq!(
            LogSetting::Level(emit::Level::Error).min_level(),
            Some(emit::Level::Error)
        );
    }

    #[test]
    fn test_init_is_safe_to_call_multiple_times() {
        init_diagnostics();
        init();
    }

    #[test]
    fn test_macros_compile() {
        log_info!("info message");
        log_debug!("debug message with {value}", value: 42);
        log_warn!("warn message");
        log_error!("error message");

        info!("info message");
        debug!("debug message with {value}", value: 7);
        warn!("warn message");
        error!("error message");
    }
}
