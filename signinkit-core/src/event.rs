use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::credential::GoogleIdTokenCredential;

/// The engine signals a sign-in plugin exposes.
///
/// The `Display` form is the signal name registered with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, uniffi::Enum)]
#[strum(serialize_all = "snake_case")]
pub enum SignalKind {
    /// `sign_in_success(id_token, email, display_name)`
    SignInSuccess,
    /// `sign_in_failed(message)`
    SignInFailed,
    /// `sign_out_complete()`
    SignOutComplete,
}

impl SignalKind {
    /// Number of string arguments the signal carries.
    #[must_use]
    pub const fn arity(self) -> u8 {
        match self {
            Self::SignInSuccess => 3,
            Self::SignInFailed => 1,
            Self::SignOutComplete => 0,
        }
    }
}

/// A signal descriptor the host registers with the engine.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct SignalInfo {
    /// Signal name.
    pub name: String,
    /// Number of string arguments.
    pub arity: u8,
}

/// Lists every signal the bridge may emit.
#[must_use]
#[uniffi::export]
pub fn plugin_signals() -> Vec<SignalInfo> {
    SignalKind::iter()
        .map(|kind| SignalInfo {
            name: kind.to_string(),
            arity: kind.arity(),
        })
        .collect()
}

/// The outcome of a sign-in or sign-out call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Enum)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum SignInEvent {
    /// A Google ID token was obtained.
    #[serde(rename = "sign_in_success")]
    Success {
        /// The opaque ID token.
        id_token: String,
        /// The account identifier (email).
        subject: String,
        /// The display name, or an empty string.
        display_name: String,
    },
    /// The attempt failed.
    #[serde(rename = "sign_in_failed")]
    Failure {
        /// Human readable reason.
        message: String,
    },
    /// Sign-out finished.
    SignOutComplete,
}

impl SignInEvent {
    /// The signal this event is delivered as.
    #[must_use]
    pub const fn kind(&self) -> SignalKind {
        match self {
            Self::Success { .. } => SignalKind::SignInSuccess,
            Self::Failure { .. } => SignalKind::SignInFailed,
            Self::SignOutComplete => SignalKind::SignOutComplete,
        }
    }

    /// The signal arguments, in order.
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        match self {
            Self::Success {
                id_token,
                subject,
                display_name,
            } => vec![id_token.clone(), subject.clone(), display_name.clone()],
            Self::Failure { message } => vec![message.clone()],
            Self::SignOutComplete => Vec::new(),
        }
    }
}

impl From<GoogleIdTokenCredential> for SignInEvent {
    fn from(credential: GoogleIdTokenCredential) -> Self {
        Self::Success {
            id_token: credential.id_token,
            subject: credential.id,
            display_name: credential.display_name.unwrap_or_default(),
        }
    }
}

/// Receives the events of a [`crate::SignInBridge`].
///
/// The Godot plugin implements this by calling `emitSignal(kind, *arguments)`.
#[uniffi::export(with_foreign)]
pub trait SignInListener: Send + Sync {
    /// Called once per completed operation.
    fn on_event(&self, event: SignInEvent);
}
