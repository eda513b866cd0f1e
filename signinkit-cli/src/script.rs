//! Scripted stand-ins for the platform credential broker and host.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use eyre::WrapErr;
use serde::Deserialize;
use signinkit_core::{
    BrokerError, Credential, CredentialBroker, CredentialHost, CredentialOption, CredentialRequest,
    GoogleIdTokenCredential,
};

const fn yes() -> bool {
    true
}

/// A broker script, read from a JSON file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Responses to `get_credential`, consumed in order.
    #[serde(default)]
    pub responses: Vec<ScriptedResponse>,
    /// Error returned by `clear_credential_state`, if any.
    #[serde(default)]
    pub clear_state: Option<ScriptedError>,
    /// Whether the host reports an active context.
    #[serde(default = "yes")]
    pub host_active: bool,
    /// Whether the host can construct a broker.
    #[serde(default = "yes")]
    pub broker_available: bool,
}

impl Script {
    /// Reads and parses a script file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid script.
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading script {}", path.display()))?;
        serde_json::from_str(&raw).wrap_err("parsing script")
    }
}

/// One scripted broker answer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedResponse {
    Credential(ScriptedCredential),
    Error(ScriptedError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScriptedCredential {
    GoogleId {
        id_token: String,
        id: String,
        #[serde(default)]
        display_name: Option<String>,
    },
    Custom {
        credential_type: String,
        #[serde(default)]
        data: HashMap<String, String>,
    },
    Other {
        other: String,
    },
}

impl From<ScriptedCredential> for Credential {
    fn from(credential: ScriptedCredential) -> Self {
        match credential {
            ScriptedCredential::GoogleId {
                id_token,
                id,
                display_name,
            } => GoogleIdTokenCredential {
                id_token,
                id,
                display_name,
                given_name: None,
                family_name: None,
                profile_picture_uri: None,
                phone_number: None,
            }
            .into(),
            ScriptedCredential::Custom {
                credential_type,
                data,
            } => Self::Custom {
                credential_type,
                data,
            },
            ScriptedCredential::Other { other } => Self::Other { class_name: other },
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NoCredential,
    Cancelled,
    Interrupted,
    ProviderConfiguration,
    Other,
    Fault,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedError {
    pub kind: ErrorKind,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<ScriptedError> for BrokerError {
    fn from(error: ScriptedError) -> Self {
        let message = error.message;
        match error.kind {
            ErrorKind::NoCredential => Self::NoCredential { message },
            ErrorKind::Cancelled => Self::Cancelled { message },
            ErrorKind::Interrupted => Self::Interrupted { message },
            ErrorKind::ProviderConfiguration => Self::ProviderConfiguration { message },
            ErrorKind::Other => Self::Other {
                error_type: "scripted".to_string(),
                message,
            },
            ErrorKind::Fault => Self::UnexpectedUniFFICallbackError(message.unwrap_or_default()),
        }
    }
}

/// Replays a [`Script`].
pub struct ScriptBroker {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    clear_state: Option<ScriptedError>,
}

impl ScriptBroker {
    fn describe(request: &CredentialRequest) -> String {
        match &request.option {
            CredentialOption::GoogleId {
                scope, auto_select, ..
            } => format!("google_id(scope={scope:?}, auto_select={auto_select})"),
            CredentialOption::SignInWithGoogle { .. } => "sign_in_with_google".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl CredentialBroker for ScriptBroker {
    async fn get_credential(&self, request: CredentialRequest) -> Result<Credential, BrokerError> {
        tracing::info!(request = %Self::describe(&request), "broker request");
        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(ScriptedResponse::Credential(credential)) => Ok(credential.into()),
            Some(ScriptedResponse::Error(error)) => Err(error.into()),
            None => Err(BrokerError::NoCredential {
                message: Some("no scripted response left".to_string()),
            }),
        }
    }

    async fn clear_credential_state(&self) -> Result<(), BrokerError> {
        tracing::info!("broker clear state");
        self.clear_state.clone().map_or(Ok(()), |error| Err(error.into()))
    }
}

/// A host backed by a [`Script`].
pub struct ScriptHost {
    broker: Option<Arc<ScriptBroker>>,
    active: bool,
}

impl From<Script> for ScriptHost {
    fn from(script: Script) -> Self {
        let broker = script.broker_available.then(|| {
            Arc::new(ScriptBroker {
                responses: Mutex::new(script.responses.into()),
                clear_state: script.clear_state,
            })
        });
        Self {
            broker,
            active: script.host_active,
        }
    }
}

impl CredentialHost for ScriptHost {
    fn has_active_context(&self) -> bool {
        self.active
    }

    fn create_broker(&self) -> Option<Arc<dyn CredentialBroker>> {
        self.broker
            .clone()
            .map(|broker| broker as Arc<dyn CredentialBroker>)
    }
}
