use std::time::Duration;
use url::Url;

/// Create the default blocking HTTP client for diary API requests
/// with settings for connection pooling and timeouts
pub fn create_blocking_client() -> reqwest::blocking::Client {
    reqwest::blocking::ClientBuilder::new()
        .pool_max_idle_per_host(10)
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create HTTP client")
}

/// Create the default async HTTP client for diary API requests
pub fn create_async_client() -> reqwest::Client {
    reqwest::ClientBuilder::new()
        .pool_max_idle_per_host(10)
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create HTTP client")
}

/// Configuration for the diary API client
#[derive(Debug, Clone)]
pub struct Config {
    /// URL scheme (http or https)
    pub scheme: String,
    /// API host
    pub host: String,
    /// Enable debug logging
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheme: "https".to_string(),
            host: "ruobr.ru".to_string(),
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with the given scheme and host
    pub fn new(scheme: String, host: String) -> Self {
        Config {
            scheme,
            host,
            debug: false,
        }
    }

    /// Set debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> String {
        format!("{}://{}/api", self.scheme, self.host)
    }

    /// Build the full URL for a relative target plus query parameters
    pub(crate) fn endpoint_url(
        &self,
        target: &str,
        params: &[(&str, String)],
    ) -> crate::error::Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url(), target))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}
