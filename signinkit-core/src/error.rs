use thiserror::Error;

/// Message used when a broker refusal carries no message of its own.
pub(crate) const FALLBACK_REFUSAL_MESSAGE: &str = "Sign-in cancelled";
/// Message used when the host faults without any message.
pub(crate) const FALLBACK_FAULT_MESSAGE: &str = "Unknown error";

/// Errors raised by the host's credential broker.
///
/// The variants follow the exception families of the Android Credential Manager
/// so the Kotlin side can map each `GetCredentialException` one to one. Every
/// variant carries the broker's own message when it has one.
#[derive(Debug, Clone, PartialEq, Eq, Error, uniffi::Error)]
pub enum BrokerError {
    /// No credential matched the request (e.g. no previously authorized account).
    #[error("no_credential")]
    NoCredential {
        /// Broker message, if any.
        message: Option<String>,
    },
    /// The user dismissed the account picker.
    #[error("cancelled")]
    Cancelled {
        /// Broker message, if any.
        message: Option<String>,
    },
    /// The request was interrupted and may succeed if issued again.
    #[error("interrupted")]
    Interrupted {
        /// Broker message, if any.
        message: Option<String>,
    },
    /// The provider is missing or misconfigured on the device.
    #[error("provider_configuration")]
    ProviderConfiguration {
        /// Broker message, if any.
        message: Option<String>,
    },
    /// Any other broker exception, identified by its type string.
    #[error("other: {error_type}")]
    Other {
        /// The broker's exception type.
        error_type: String,
        /// Broker message, if any.
        message: Option<String>,
    },
    /// Unexpected `UniFFI` callback error.
    #[error("unexpected uniffi callback error: {0}")]
    UnexpectedUniFFICallbackError(String),
}

impl BrokerError {
    /// Returns the broker's message, if it supplied a non-empty one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        let message = match self {
            Self::NoCredential { message }
            | Self::Cancelled { message }
            | Self::Interrupted { message }
            | Self::ProviderConfiguration { message }
            | Self::Other { message, .. } => message.as_deref(),
            Self::UnexpectedUniFFICallbackError(reason) => Some(reason.as_str()),
        };
        message.filter(|message| !message.is_empty())
    }

    /// Whether the broker refused the request, as opposed to the host faulting.
    #[must_use]
    pub const fn is_refusal(&self) -> bool {
        !matches!(self, Self::UnexpectedUniFFICallbackError(_))
    }

    /// The human readable reason reported to the caller in a failure event.
    #[must_use]
    pub fn reason(&self) -> &str {
        self.message().unwrap_or(if self.is_refusal() {
            FALLBACK_REFUSAL_MESSAGE
        } else {
            FALLBACK_FAULT_MESSAGE
        })
    }
}

impl From<uniffi::UnexpectedUniFFICallbackError> for BrokerError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError(error.reason)
    }
}

/// Error outputs from `SignInKit`.
///
/// The `Display` output of each variant is the message carried by the
/// `sign_in_failed` signal.
#[derive(Debug, Clone, PartialEq, Eq, Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum SignInError {
    /// No web client id has been configured.
    #[error("Sign-in bridge not configured. Call configure() first.")]
    NotConfigured,
    /// The host has no active context (activity) to present the broker UI on.
    #[error("Host activity not available")]
    HostUnavailable,
    /// The host could not construct a credential broker.
    #[error("Credential broker not available")]
    BrokerUnavailable,
    /// The broker refused the request or the host faulted while serving it.
    #[error("{}", .0.reason())]
    Broker(#[from] BrokerError),
    /// The broker returned a credential that is not a Google ID token.
    #[error("Unexpected credential type")]
    UnexpectedCredentialType {
        /// The type (or class) of the credential that was returned.
        credential_type: String,
    },
    /// The Google ID token credential payload could not be parsed.
    #[error("Invalid Google ID token")]
    InvalidToken {
        /// Why the payload was rejected.
        reason: String,
    },
    /// A configuration document could not be parsed.
    #[error("invalid_config: {reason}")]
    InvalidConfig {
        /// Parser error details.
        reason: String,
    },
}
