use serde::{Deserialize, Serialize};

use crate::error::SignInError;

const fn enabled() -> bool {
    true
}

/// Configuration of a [`crate::SignInBridge`].
///
/// Deserializes from JSON such as:
///
/// ```json
/// { "web_client_id": "1234-abc.apps.googleusercontent.com", "auto_select": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct SignInConfig {
    /// The OAuth web client id from the Google Cloud console. Empty means unconfigured.
    pub web_client_id: String,
    /// Let the broker skip the account picker when exactly one authorized
    /// account matches.
    #[serde(default = "enabled")]
    pub auto_select: bool,
    /// Retry with every account on the device when no authorized account exists.
    #[serde(default = "enabled")]
    pub fallback_to_all_accounts: bool,
}

impl SignInConfig {
    /// Creates a configuration with default request options.
    #[must_use]
    pub fn new(web_client_id: impl Into<String>) -> Self {
        Self {
            web_client_id: web_client_id.into(),
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SignInError::InvalidConfig`] if the document is malformed or
    /// lacks `web_client_id`.
    pub fn from_json(json: &str) -> Result<Self, SignInError> {
        serde_json::from_str(json).map_err(|e| SignInError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// Whether a web client id is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.web_client_id.is_empty()
    }
}

impl Default for SignInConfig {
    fn default() -> Self {
        Self {
            web_client_id: String::new(),
            auto_select: enabled(),
            fallback_to_all_accounts: enabled(),
        }
    }
}
