//! The sign-in bridge: guards, broker requests, classification and event emission.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use log::{debug, error, info, warn};

use crate::{
    generate_nonce, AccountScope, BrokerError, CredentialBroker, CredentialHost, CredentialRequest,
    GoogleIdTokenCredential, SignInConfig, SignInError, SignInEvent, SignInListener,
};

/// Drives Google Sign-In through the host's credential broker.
///
/// Every sign-in call resolves to exactly one [`SignInEvent`] delivered to the
/// listener (`Success` or `Failure`); every sign-out call resolves to exactly one
/// `SignOutComplete`. Failures never poison the bridge.
///
/// Calls are not serialized: a second sign-in may be started while the first
/// one is still waiting on the broker, and each reports its own event.
#[derive(uniffi::Object)]
pub struct SignInBridge {
    host: Arc<dyn CredentialHost>,
    listener: Arc<dyn SignInListener>,
    config: RwLock<SignInConfig>,
    /// Created lazily from the host, then reused.
    broker: Mutex<Option<Arc<dyn CredentialBroker>>>,
}

#[uniffi::export(async_runtime = "tokio")]
impl SignInBridge {
    /// Creates an unconfigured bridge. Call [`Self::configure`] before signing in.
    #[uniffi::constructor]
    #[must_use]
    pub fn new(host: Arc<dyn CredentialHost>, listener: Arc<dyn SignInListener>) -> Self {
        Self::with_config(host, listener, SignInConfig::default())
    }

    /// Creates a bridge with an initial configuration.
    #[uniffi::constructor]
    #[must_use]
    pub fn with_config(
        host: Arc<dyn CredentialHost>,
        listener: Arc<dyn SignInListener>,
        config: SignInConfig,
    ) -> Self {
        Self {
            host,
            listener,
            config: RwLock::new(config),
            broker: Mutex::new(None),
        }
    }

    /// Sets the web client id used by every subsequent request.
    pub fn configure(&self, web_client_id: String) {
        self.config
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .web_client_id = web_client_id;
        info!("Initialized with web client id");
    }

    /// Replaces the whole configuration.
    pub fn configure_with(&self, config: SignInConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        info!("Configuration replaced");
    }

    /// Parses and applies a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SignInError::InvalidConfig`] if the JSON is malformed; the
    /// previous configuration is kept.
    pub fn configure_from_json(&self, json: &str) -> Result<(), SignInError> {
        self.configure_with(SignInConfig::from_json(json)?);
        Ok(())
    }

    /// Whether a web client id has been configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config().is_configured()
    }

    /// Signs in, preferring accounts that already authorized this app.
    ///
    /// If the broker has no authorized account, the request is repeated once
    /// over all accounts with the same nonce.
    pub async fn sign_in(&self) {
        let result = self.sign_in_preferring_authorized().await;
        self.emit_result(result);
    }

    /// Signs in, letting the user pick any Google account on the device.
    pub async fn sign_in_with_account_chooser(&self) {
        let result = self.sign_in_any_account().await;
        self.emit_result(result);
    }

    /// Signs in through the "Sign in with Google" button flow.
    pub async fn sign_in_with_google_button(&self) {
        let result = self.sign_in_from_button().await;
        self.emit_result(result);
    }

    /// Clears the broker's credential state.
    ///
    /// Always reports `SignOutComplete`, even if clearing fails or no broker is
    /// available: the local session is over either way.
    pub async fn sign_out(&self) {
        match self.broker_handle() {
            Some(broker) => match broker.clear_credential_state().await {
                Ok(()) => info!("Sign-out complete"),
                Err(e) => warn!("Sign-out failed: {e}"),
            },
            None => debug!("No credential broker, nothing to clear"),
        }
        self.listener.on_event(SignInEvent::SignOutComplete);
    }
}

impl SignInBridge {
    /// Returns a snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> SignInConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn sign_in_preferring_authorized(&self) -> Result<GoogleIdTokenCredential, SignInError> {
        let (broker, config) = self.prepare()?;
        let nonce = generate_nonce();
        let request = CredentialRequest::google_id(
            AccountScope::Authorized,
            config.auto_select,
            &config.web_client_id,
            &nonce,
        );

        match Self::fetch(broker.as_ref(), request).await {
            Err(SignInError::Broker(BrokerError::NoCredential { .. }))
                if config.fallback_to_all_accounts =>
            {
                debug!("No authorized accounts, trying with all accounts");
                Self::request_all_accounts(broker.as_ref(), &config, &nonce).await
            }
            result => result,
        }
    }

    async fn sign_in_any_account(&self) -> Result<GoogleIdTokenCredential, SignInError> {
        let (broker, config) = self.prepare()?;
        let nonce = generate_nonce();
        Self::request_all_accounts(broker.as_ref(), &config, &nonce).await
    }

    async fn sign_in_from_button(&self) -> Result<GoogleIdTokenCredential, SignInError> {
        let (broker, config) = self.prepare()?;
        let nonce = generate_nonce();
        let request = CredentialRequest::sign_in_with_google(&config.web_client_id, &nonce);
        Self::fetch(broker.as_ref(), request).await
    }

    async fn request_all_accounts(
        broker: &dyn CredentialBroker,
        config: &SignInConfig,
        nonce: &str,
    ) -> Result<GoogleIdTokenCredential, SignInError> {
        let request = CredentialRequest::google_id(
            AccountScope::All,
            false,
            &config.web_client_id,
            nonce,
        );
        Self::fetch(broker, request).await
    }

    /// Issues one broker request and classifies the returned credential.
    async fn fetch(
        broker: &dyn CredentialBroker,
        request: CredentialRequest,
    ) -> Result<GoogleIdTokenCredential, SignInError> {
        let credential = broker.get_credential(request).await?;
        debug!("Broker returned a `{}` credential", credential.kind());
        GoogleIdTokenCredential::try_from(credential)
    }

    /// Checks the preconditions shared by every sign-in flow.
    fn prepare(&self) -> Result<(Arc<dyn CredentialBroker>, SignInConfig), SignInError> {
        let config = self.config();
        if !config.is_configured() {
            return Err(SignInError::NotConfigured);
        }
        if !self.host.has_active_context() {
            return Err(SignInError::HostUnavailable);
        }
        let broker = self.broker_handle().ok_or(SignInError::BrokerUnavailable)?;
        Ok((broker, config))
    }

    /// Returns the cached broker, creating it if the host has an active context.
    fn broker_handle(&self) -> Option<Arc<dyn CredentialBroker>> {
        let mut slot = self.broker.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() && self.host.has_active_context() {
            *slot = self.host.create_broker();
            if slot.is_some() {
                debug!("Credential broker created");
            }
        }
        slot.clone()
    }

    fn emit_result(&self, result: Result<GoogleIdTokenCredential, SignInError>) {
        let event = match result {
            Ok(credential) => {
                info!("Sign-in successful");
                SignInEvent::from(credential)
            }
            Err(e) => {
                error!("Sign-in failed: {e:?}");
                SignInEvent::Failure {
                    message: e.to_string(),
                }
            }
        };
        self.listener.on_event(event);
    }
}
