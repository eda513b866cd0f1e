//! Host interfaces for the platform credential broker.
//!
//! On Android the host implements these on top of Jetpack Credential Manager:
//! `create_broker` wraps `CredentialManager.create(activity)`, `get_credential`
//! wraps `getCredential(activity, request)` and `clear_credential_state` wraps
//! `clearCredentialState(ClearCredentialStateRequest())`.

use std::sync::Arc;

use crate::{BrokerError, Credential, CredentialRequest};

/// The engine-side context that owns the credential broker.
#[uniffi::export(with_foreign)]
pub trait CredentialHost: Send + Sync {
    /// Whether a foreground context (the current activity) is available to
    /// present broker UI on.
    fn has_active_context(&self) -> bool;

    /// Constructs a broker bound to the current context.
    ///
    /// Returns `None` if the platform cannot provide one. Called at most once
    /// per successful construction; the bridge caches the handle.
    fn create_broker(&self) -> Option<Arc<dyn CredentialBroker>>;
}

/// Asynchronous request/response access to the platform credential broker.
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait CredentialBroker: Send + Sync {
    /// Requests a credential matching `request`, presenting UI if needed.
    ///
    /// # Errors
    ///
    /// Returns the broker refusal (no credential, user cancellation, ...) or a
    /// host fault.
    async fn get_credential(&self, request: CredentialRequest) -> Result<Credential, BrokerError>;

    /// Clears any credential state cached by the broker for this app.
    ///
    /// # Errors
    ///
    /// Returns an error if the broker could not clear its state.
    async fn clear_credential_state(&self) -> Result<(), BrokerError>;
}
