use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::{LoggerError, LoggerFormat, LoggerLevel, LoggerResult, LoggerTimeZone};

/// Environment variable selecting the output format.
pub const ENV_LOG_FORMAT: &str = "TAS_LOG_FORMAT";
/// Environment variable holding the filter expression.
pub const ENV_LOG_LEVEL: &str = "TAS_LOG_LEVEL";
/// Environment variable selecting the timestamp timezone.
pub const ENV_LOG_TZ: &str = "TAS_LOG_TZ";
/// Environment variable toggling colored output.
pub const ENV_LOG_COLOR: &str = "TAS_LOG_COLOR";

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Filter expression (e.g. `"info"`, `"tas_userdb=debug,info"`).
    pub level: LoggerLevel,
    /// Timezone for timestamps.
    pub tz: LoggerTimeZone,
    /// Include module/target names.
    pub with_targets: bool,
    /// Colored output, honored only when stdout is a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Read the configuration from the process environment, starting from defaults.
    pub fn from_env() -> LoggerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults; set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> LoggerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup(ENV_LOG_FORMAT) {
            cfg.format = v.parse()?;
        }
        if let Some(v) = lookup(ENV_LOG_LEVEL) {
            cfg.level = v.parse()?;
        }
        if let Some(v) = lookup(ENV_LOG_TZ) {
            cfg.tz = v.parse()?;
        }
        if let Some(v) = lookup(ENV_LOG_COLOR) {
            cfg.use_color = parse_flag(ENV_LOG_COLOR, &v)?;
        }
        Ok(cfg)
    }

    /// Color is used only if enabled and stdout is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}

fn parse_flag(key: &'static str, value: &str) -> LoggerResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LoggerError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}
