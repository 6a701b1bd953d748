//! Configuration objects.
//!
//! The codec itself reads no environment variables and no files on its own.
//! Callers build these structures explicitly and hand them to whatever needs
//! them: [`DecodeOptions`] to the decoder, [`ClientConfig`] to the transport
//! client that fetches and submits entity JSON.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::limits::{MAX_ENTITY_BYTES, MAX_FRAGMENT_BYTES};

/// Options controlling decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum accepted length of an entity document, in bytes.
    pub max_entity_bytes: usize,
    /// Maximum accepted length of a standalone snak/reference/claim fragment.
    pub max_fragment_bytes: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_entity_bytes: MAX_ENTITY_BYTES,
            max_fragment_bytes: MAX_FRAGMENT_BYTES,
        }
    }
}

impl DecodeOptions {
    /// Creates options with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum entity document length.
    pub fn max_entity_bytes(mut self, max: usize) -> Self {
        self.max_entity_bytes = max;
        self
    }

    /// Sets the maximum fragment length.
    pub fn max_fragment_bytes(mut self, max: usize) -> Self {
        self.max_fragment_bytes = max;
        self
    }
}

/// OAuth 1.0a owner-only consumer credentials.
///
/// Loaded explicitly from a secret file by the process that owns the
/// transport client; never cached globally.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl OAuthCredentials {
    /// Parses credentials from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let creds: OAuthCredentials = serde_json::from_str(json)?;
        creds.validate()?;
        Ok(creds)
    }

    /// Reads credentials from a JSON secret file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks that every credential field is non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("consumer_key", &self.consumer_key),
            ("consumer_secret", &self.consumer_secret),
            ("access_token", &self.access_token),
            ("access_secret", &self.access_secret),
        ];
        for (field, value) in fields {
            if value.is_empty() {
                return Err(ConfigError::EmptyField { field });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("access_secret", &"<redacted>")
            .finish()
    }
}

/// Configuration handed to the transport client at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Action API endpoint, e.g. `https://www.wikidata.org/w/api.php`.
    pub api_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Credentials for signed write requests; `None` for read-only use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<OAuthCredentials>,
    /// `maxlag` parameter for write requests, in seconds.
    #[serde(default = "default_max_lag")]
    pub max_lag: u32,
    /// Decoder limits applied to responses.
    #[serde(skip, default)]
    pub decode: DecodeOptions,
}

fn default_max_lag() -> u32 {
    5
}

impl ClientConfig {
    /// Creates a read-only configuration.
    pub fn new(api_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            user_agent: user_agent.into(),
            credentials: None,
            max_lag: default_max_lag(),
            decode: DecodeOptions::default(),
        }
    }

    /// Attaches write credentials.
    pub fn with_credentials(mut self, credentials: OAuthCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Returns true if the configuration can sign write requests.
    pub fn can_write(&self) -> bool {
        self.credentials.is_some()
    }

    /// Validates required fields and any attached credentials.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.is_empty() {
            return Err(ConfigError::EmptyField { field: "api_url" });
        }
        if self.user_agent.is_empty() {
            return Err(ConfigError::EmptyField { field: "user_agent" });
        }
        if let Some(creds) = &self.credentials {
            creds.validate()?;
        }
        Ok(())
    }
}
