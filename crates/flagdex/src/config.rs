use crate::error::Error;
use crate::storage::{resolve_data_dir, FileStorage};
use flagdex_core::retry::RetryPolicy;
use std::time::Duration;

/// REST Countries API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub retry: RetryPolicy,
}

impl ApiConfig {
    /// Build the configuration from the global CLI flags (and their env fallbacks)
    pub fn from_global(global: &crate::Global) -> Self {
        Self {
            base_url: global.api_base.trim_end_matches('/').to_string(),
            retry: RetryPolicy::new(
                global.max_attempts,
                Duration::from_millis(global.retry_delay_ms),
                global.backoff,
            ),
        }
    }
}

/// Storage rooted at `--data-dir`, or the platform data directory
pub fn storage_from_global(global: &crate::Global) -> Result<FileStorage, Error> {
    let dir = resolve_data_dir(global.data_dir.as_deref())?;
    Ok(FileStorage::new(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use flagdex_core::retry::Backoff;

    #[test]
    fn test_defaults() {
        let app = crate::App::parse_from(["flagdex", "regions"]);
        let config = ApiConfig::from_global(&app.global);

        assert_eq!(config.base_url, "https://restcountries.com/v3.1");
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_overrides() {
        let app = crate::App::parse_from([
            "flagdex",
            "regions",
            "--api-base",
            "http://localhost:8080/",
            "--max-attempts",
            "5",
            "--retry-delay-ms",
            "250",
            "--backoff",
            "exponential",
            "--data-dir",
            "/tmp/flagdex",
        ]);
        let config = ApiConfig::from_global(&app.global);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.retry.max_attempts(), 5);
        assert_eq!(config.retry.base_delay(), Duration::from_millis(250));
        assert_eq!(config.retry.backoff(), Backoff::Exponential);

        let storage = storage_from_global(&app.global).unwrap();
        assert_eq!(storage.dir(), std::path::Path::new("/tmp/flagdex"));
    }
}
