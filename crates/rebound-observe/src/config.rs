use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::{format::LogFormat, level::LogLevel, timezone::LogTimeZone};

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// Output format.
    pub format: LogFormat,
    /// Filter expression (e.g. `"info"`, `"rebound_core=trace,info"`).
    pub level: LogLevel,
    /// Timezone for timestamps.
    pub tz: LogTimeZone,
    /// Include the event target (module path) in each record.
    pub with_targets: bool,
    /// Colored text output; ignored unless stdout is a terminal.
    pub use_color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::default(),
            tz: LogTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LogConfig {
    /// Color is used only when requested and stdout is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}
