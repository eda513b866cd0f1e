/// Which accounts the broker may offer for a Google ID request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum AccountScope {
    /// Only accounts that previously authorized this web client id.
    Authorized,
    /// Every Google account on the device.
    All,
}

/// A single credential option handed to the broker.
///
/// Maps to `GetGoogleIdOption` and `GetSignInWithGoogleOption` respectively.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum CredentialOption {
    /// Bottom-sheet account selection.
    GoogleId {
        /// Account filter.
        scope: AccountScope,
        /// Lets the broker skip UI when exactly one account matches.
        auto_select: bool,
        /// The web client id of the requesting party.
        server_client_id: String,
        /// Nonce bound into the issued ID token.
        nonce: String,
    },
    /// The dedicated "Sign in with Google" button flow.
    SignInWithGoogle {
        /// The web client id of the requesting party.
        server_client_id: String,
        /// Nonce bound into the issued ID token.
        nonce: String,
    },
}

/// A request for a credential, passed to [`crate::CredentialBroker::get_credential`].
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct CredentialRequest {
    /// The option describing what to fetch.
    pub option: CredentialOption,
}

impl CredentialRequest {
    /// Builds a Google ID request.
    #[must_use]
    pub fn google_id(
        scope: AccountScope,
        auto_select: bool,
        server_client_id: &str,
        nonce: &str,
    ) -> Self {
        Self {
            option: CredentialOption::GoogleId {
                scope,
                // auto-select applies to authorized accounts only
                auto_select: auto_select && scope == AccountScope::Authorized,
                server_client_id: server_client_id.to_string(),
                nonce: nonce.to_string(),
            },
        }
    }

    /// Builds a "Sign in with Google" button request.
    #[must_use]
    pub fn sign_in_with_google(server_client_id: &str, nonce: &str) -> Self {
        Self {
            option: CredentialOption::SignInWithGoogle {
                server_client_id: server_client_id.to_string(),
                nonce: nonce.to_string(),
            },
        }
    }

    /// The nonce carried by this request.
    #[must_use]
    pub fn nonce(&self) -> &str {
        match &self.option {
            CredentialOption::GoogleId { nonce, .. }
            | CredentialOption::SignInWithGoogle { nonce, .. } => nonce,
        }
    }

    /// The account scope, or `None` for the button flow.
    #[must_use]
    pub const fn scope(&self) -> Option<AccountScope> {
        match &self.option {
            CredentialOption::GoogleId { scope, .. } => Some(*scope),
            CredentialOption::SignInWithGoogle { .. } => None,
        }
    }
}
