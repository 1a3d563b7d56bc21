use std::{fmt, str::FromStr, sync::OnceLock};

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

use crate::error::LogError;

/// Local offset captured once per process.
static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Timezone used for log timestamps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTimeZone {
    #[default]
    Utc,
    /// System timezone; see [`init_local_offset`].
    Local,
}

impl FromStr for LogTimeZone {
    type Err = LogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => Err(LogError::InvalidTimeZone(s.to_string())),
        }
    }
}

impl fmt::Display for LogTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogTimeZone::Utc => "utc",
            LogTimeZone::Local => "local",
        })
    }
}

/// Captures the local UTC offset.
///
/// Call from `main` before spawning threads: most Unix platforms refuse to
/// report the local offset once the process is multi-threaded. Falls back to
/// UTC when detection fails. Later calls are no-ops.
pub fn init_local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

/// RFC 3339 timestamps in the configured timezone.
#[derive(Debug, Clone, Copy)]
pub struct LogTimer {
    offset: UtcOffset,
}

impl LogTimer {
    pub fn new(tz: LogTimeZone) -> Self {
        let offset = match tz {
            LogTimeZone::Utc => UtcOffset::UTC,
            LogTimeZone::Local => init_local_offset(),
        };
        Self { offset }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl FormatTime for LogTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = OffsetDateTime::now_utc().to_offset(self.offset);
        match now.format(&Rfc3339) {
            Ok(ts) => write!(w, "{ts}"),
            Err(_) => write!(w, "<invalid-time>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitive() {
        assert_eq!("UTC".parse::<LogTimeZone>().unwrap(), LogTimeZone::Utc);
        assert_eq!(" local".parse::<LogTimeZone>().unwrap(), LogTimeZone::Local);
        assert!("pst".parse::<LogTimeZone>().is_err());
    }

    #[test]
    fn display_and_serde_agree() {
        for tz in [LogTimeZone::Utc, LogTimeZone::Local] {
            let json = serde_json::to_string(&tz).unwrap();
            assert_eq!(json, format!("\"{tz}\""));
        }
    }

    #[test]
    fn utc_timer_has_zero_offset() {
        assert_eq!(LogTimer::new(LogTimeZone::Utc).offset(), UtcOffset::UTC);
    }

    #[test]
    fn local_offset_is_stable() {
        let first = init_local_offset();
        assert_eq!(init_local_offset(), first);
        assert!(first.whole_hours().abs() <= 14);
        assert_eq!(LogTimer::new(LogTimeZone::Local).offset(), first);
    }
}
