//! Environment-driven configuration, read once at startup.

use std::str::FromStr;

use crate::error::AppError;

/// Which concrete store adapters the composition root constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreDriver {
    /// PostgreSQL write store plus the two PostgreSQL read stores.
    Relational,
    /// In-memory stores, for demos and local experiments.
    InMemory,
}

impl FromStr for StoreDriver {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relational" => Ok(Self::Relational),
            "in-memory" => Ok(Self::InMemory),
            other => Err(AppError::Config(format!(
                "KLAXON_DRIVER must be 'relational' or 'in-memory', got '{other}'"
            ))),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Store driver selected for this process.
    pub driver: StoreDriver,
    /// Connection URL for the authoritative write database.
    pub write_database_url: Option<String>,
    /// Connection URL for the read-store database.
    pub read_database_url: Option<String>,
    /// Interval of the background health sweep, in seconds.
    pub sweep_interval_secs: u64,
}

impl AppConfig {
    /// Reads configuration from the environment.
    ///
    /// `WRITE_DATABASE_URL` and `READ_DATABASE_URL` each fall back to
    /// `DATABASE_URL`, so a single-database development setup needs only the
    /// one variable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let driver: StoreDriver = std::env::var("KLAXON_DRIVER")
            .unwrap_or_else(|_| "relational".to_string())
            .parse()?;
        let fallback = std::env::var("DATABASE_URL").ok();
        let write_database_url = std::env::var("WRITE_DATABASE_URL")
            .ok()
            .or_else(|| fallback.clone());
        let read_database_url = std::env::var("READ_DATABASE_URL").ok().or(fallback);
        let sweep_interval_secs: u64 = std::env::var("KLAXON_SWEEP_SECONDS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("KLAXON_SWEEP_SECONDS must be a valid u64: {e}")))?;

        Ok(Self {
            host,
            port,
            driver,
            write_database_url,
            read_database_url,
            sweep_interval_secs,
        })
    }

    /// URL of the write database; required for the relational driver.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when neither `WRITE_DATABASE_URL` nor
    /// `DATABASE_URL` was set.
    pub fn write_database_url(&self) -> Result<&str, AppError> {
        self.write_database_url.as_deref().ok_or_else(|| {
            AppError::Config("WRITE_DATABASE_URL or DATABASE_URL must be set".to_owned())
        })
    }

    /// URL of the read-store database; required for the relational driver.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when neither `READ_DATABASE_URL` nor
    /// `DATABASE_URL` was set.
    pub fn read_database_url(&self) -> Result<&str, AppError> {
        self.read_database_url.as_deref().ok_or_else(|| {
            AppError::Config("READ_DATABASE_URL or DATABASE_URL must be set".to_owned())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_parses_known_values() {
        assert_eq!(
            "relational".parse::<StoreDriver>().unwrap(),
            StoreDriver::Relational
        );
        assert_eq!(
            "in-memory".parse::<StoreDriver>().unwrap(),
            StoreDriver::InMemory
        );
    }

    #[test]
    fn test_driver_rejects_unknown_value() {
        let result = "orm".parse::<StoreDriver>();
        match result.unwrap_err() {
            AppError::Config(msg) => assert!(msg.contains("orm")),
            other => panic!("expected Config, got {other:?}"),
        }
    }
}
