//! API credentials and platform selection.

use std::env;
use std::fmt;
use std::str::FromStr;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::error::{Error, Result};

/// Gateway platform a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    /// Sandbox platform; no real money moves.
    #[default]
    Test,
    /// Production platform.
    Live,
}

impl Platform {
    /// Default gateway root for this platform.
    pub fn base_url(&self) -> &'static str {
        match self {
            Platform::Test => "https://test.ligdicash.com/pay/v01/",
            Platform::Live => "https://app.ligdicash.com/pay/v01/",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Test => "test",
            Platform::Live => "live",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "test" => Ok(Platform::Test),
            "live" => Ok(Platform::Live),
            other => Err(Error::UnknownPlatform(other.to_string())),
        }
    }
}

/// Credentials and endpoint selection for the gateway API.
///
/// The API key and auth token come from the Ligdicash merchant dashboard.
/// `base_url` overrides the platform default when set; tests point it at a
/// local mock server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub auth_token: String,
    pub platform: Platform,
    pub base_url: Option<String>,
}

impl ApiConfig {
    /// Creates a configuration for the test platform.
    pub fn new(api_key: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            auth_token: auth_token.into(),
            platform: Platform::default(),
            base_url: None,
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Reads `LIGDICASH_API_KEY`, `LIGDICASH_AUTH_TOKEN` and, when present,
    /// `LIGDICASH_PLATFORM` from the environment.
    pub fn from_env() -> Result<Self> {
        let api_key =
            env::var("LIGDICASH_API_KEY").map_err(|_| Error::MissingEnv("LIGDICASH_API_KEY"))?;
        let auth_token = env::var("LIGDICASH_AUTH_TOKEN")
            .map_err(|_| Error::MissingEnv("LIGDICASH_AUTH_TOKEN"))?;
        let mut config = Self::new(api_key, auth_token);
        if let Ok(platform) = env::var("LIGDICASH_PLATFORM") {
            config.platform = platform.parse()?;
        }
        Ok(config)
    }

    /// The effective gateway root: the override when set, otherwise the
    /// platform default.
    pub fn endpoint_root(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.platform.base_url())
    }

    /// Headers attached to every gateway request. Credential values are
    /// marked sensitive so they never show up in logs.
    pub(crate) fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let mut api_key = HeaderValue::from_str(&self.api_key)?;
        api_key.set_sensitive(true);
        headers.insert(HeaderName::from_static("apikey"), api_key);

        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", self.auth_token))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}
