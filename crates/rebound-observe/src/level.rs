use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::LogError;

/// Validated `EnvFilter` expression such as `"info"` or `"rebound_core=trace,warn"`.
///
/// The raw string is kept so the value round-trips through configuration files
/// unchanged; it is only turned into a filter when a logger is installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogLevel(String);

impl LogLevel {
    /// # Examples
    /// ```
    /// use rebound_observe::LogLevel;
    ///
    /// assert_eq!(LogLevel::new("rebound_core=trace,info").unwrap().as_str(), "rebound_core=trace,info");
    /// assert!(LogLevel::new("rebound_core=loud").is_err());
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, LogError> {
        Self::try_from(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the filter; falls back to `info` if the expression stopped parsing.
    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.0).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LogError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match EnvFilter::try_new(&s) {
            Ok(_) => Ok(Self(s)),
            Err(e) => Err(LogError::InvalidLevel(format!("{s}: {e}"))),
        }
    }
}

impl From<LogLevel> for String {
    fn from(l: LogLevel) -> Self {
        l.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_directives() {
        for lvl in ["info", "warn", "trace", "rebound_core=trace,info", "rebound_plan=debug"] {
            assert!(lvl.parse::<LogLevel>().is_ok(), "expected {lvl} to parse");
        }
    }

    #[test]
    fn rejects_bad_levels() {
        for lvl in ["rebound_core=chatty", "a=trace,b=wat"] {
            let err = lvl.parse::<LogLevel>().unwrap_err();
            assert!(matches!(err, LogError::InvalidLevel(_)), "{lvl}: {err:?}");
        }
    }

    #[test]
    fn default_is_info() {
        assert_eq!(LogLevel::default().as_str(), "info");
        let _ = LogLevel::default().to_env_filter();
    }

    #[test]
    fn serde_goes_through_validation() {
        let lvl: LogLevel = serde_json::from_str(r#""debug""#).unwrap();
        assert_eq!(lvl.as_str(), "debug");

        assert!(serde_json::from_str::<LogLevel>(r#""x=nope""#).is_err());
        assert_eq!(serde_json::to_string(&lvl).unwrap(), r#""debug""#);
    }
}
