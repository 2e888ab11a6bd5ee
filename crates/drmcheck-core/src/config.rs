//! Audit configuration

use crate::{Error, Result, UrlSlot};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Default worker pool size
pub const DEFAULT_MAX_WORKERS: usize = 3;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default primary URL column
pub const DEFAULT_URL_COLUMN: &str = "URL";

/// Default timeshift URL column
pub const DEFAULT_TIMESHIFT_COLUMN: &str = "TIMESHIFT_URL";

/// Audit run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Fixed size of the worker pool
    pub max_workers: usize,
    /// Timeout applied to each manifest request
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
    /// Column holding the primary manifest URL
    pub url_column: String,
    /// Column holding the timeshift manifest URL
    pub timeshift_column: String,
    /// User-Agent header sent with each request
    pub user_agent: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            url_column: DEFAULT_URL_COLUMN.to_string(),
            timeshift_column: DEFAULT_TIMESHIFT_COLUMN.to_string(),
            user_agent: format!("drmcheck/{}", crate::VERSION),
        }
    }
}

impl AuditConfig {
    /// Check that the configuration can drive a run
    pub fn validate(&self) -> Result<()> {
        if self.max_workers == 0 {
            return Err(Error::InvalidConfig("max_workers must be at least 1".into()));
        }
        if self.max_workers > Semaphore::MAX_PERMITS {
            return Err(Error::InvalidConfig(format!(
                "max_workers must not exceed {}",
                Semaphore::MAX_PERMITS
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::InvalidConfig("request_timeout must be non-zero".into()));
        }
        if self.url_column.trim().is_empty() || self.timeshift_column.trim().is_empty() {
            return Err(Error::InvalidConfig("URL column names must not be empty".into()));
        }
        if self.url_column == self.timeshift_column {
            return Err(Error::InvalidConfig(format!(
                "URL and timeshift columns must differ (both '{}')",
                self.url_column
            )));
        }
        Ok(())
    }

    /// Column name for a slot
    pub fn column(&self, slot: UrlSlot) -> &str {
        match slot {
            UrlSlot::Primary => &self.url_column,
            UrlSlot::Timeshift => &self.timeshift_column,
        }
    }

    /// Both designated column names, primary first
    pub fn columns(&self) -> [&str; 2] {
        [&self.url_column, &self.timeshift_column]
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.max_workers, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.columns(), ["URL", "TIMESHIFT_URL"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_workers() {
        let config = AuditConfig { max_workers: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_oversized_pool() {
        let config = AuditConfig { max_workers: usize::MAX, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = AuditConfig { max_workers: Semaphore::MAX_PERMITS, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_same_columns() {
        let config = AuditConfig {
            timeshift_column: "URL".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AuditConfig =
            serde_json::from_str(r#"{"max_workers": 8, "request_timeout": 2.5}"#).unwrap();
        assert_eq!(config.max_workers, 8);
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
        assert_eq!(config.url_column, "URL");
    }
}
