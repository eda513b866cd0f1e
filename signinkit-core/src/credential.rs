use std::collections::HashMap;

use crate::error::SignInError;

/// Credential type string of a Google ID token `CustomCredential`.
pub const GOOGLE_ID_TOKEN_CREDENTIAL_TYPE: &str =
    "com.google.android.libraries.identity.googleid.TYPE_GOOGLE_ID_TOKEN_CREDENTIAL";

const BUNDLE_KEY_ID_TOKEN: &str =
    "com.google.android.libraries.identity.googleid.BUNDLE_KEY_ID_TOKEN";
const BUNDLE_KEY_ID: &str = "com.google.android.libraries.identity.googleid.BUNDLE_KEY_ID";
const BUNDLE_KEY_DISPLAY_NAME: &str =
    "com.google.android.libraries.identity.googleid.BUNDLE_KEY_DISPLAY_NAME";
const BUNDLE_KEY_GIVEN_NAME: &str =
    "com.google.android.libraries.identity.googleid.BUNDLE_KEY_GIVEN_NAME";
const BUNDLE_KEY_FAMILY_NAME: &str =
    "com.google.android.libraries.identity.googleid.BUNDLE_KEY_FAMILY_NAME";
const BUNDLE_KEY_PROFILE_PICTURE_URI: &str =
    "com.google.android.libraries.identity.googleid.BUNDLE_KEY_PROFILE_PICTURE_URI";
const BUNDLE_KEY_PHONE_NUMBER: &str =
    "com.google.android.libraries.identity.googleid.BUNDLE_KEY_PHONE_NUMBER";

/// A credential returned by the broker.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum Credential {
    /// A typed credential whose payload is a flat string bundle.
    Custom {
        /// The credential type, e.g. [`GOOGLE_ID_TOKEN_CREDENTIAL_TYPE`].
        credential_type: String,
        /// The bundle entries.
        data: HashMap<String, String>,
    },
    /// Any other credential class (password, passkey, ...).
    Other {
        /// The host class name of the credential.
        class_name: String,
    },
}

impl Credential {
    /// Builds the `Custom` credential the broker returns for a Google ID token.
    #[must_use]
    pub fn google_id_token(id_token: &str, id: &str, display_name: Option<&str>) -> Self {
        GoogleIdTokenCredential {
            id_token: id_token.to_string(),
            id: id.to_string(),
            display_name: display_name.map(ToString::to_string),
            given_name: None,
            family_name: None,
            profile_picture_uri: None,
            phone_number: None,
        }
        .into()
    }

    /// The type string or class name, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Custom {
                credential_type, ..
            } => credential_type,
            Self::Other { class_name } => class_name,
        }
    }
}

/// A Google ID token credential parsed from a broker bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleIdTokenCredential {
    /// The opaque ID token.
    pub id_token: String,
    /// The account identifier (the email address).
    pub id: String,
    /// Display name, if shared.
    pub display_name: Option<String>,
    /// Given name, if shared.
    pub given_name: Option<String>,
    /// Family name, if shared.
    pub family_name: Option<String>,
    /// Profile picture URI, if shared.
    pub profile_picture_uri: Option<String>,
    /// Phone number, if shared.
    pub phone_number: Option<String>,
}

impl GoogleIdTokenCredential {
    /// Parses the bundle of a Google ID token credential.
    ///
    /// # Errors
    ///
    /// Returns [`SignInError::InvalidToken`] if the ID token or the account id is
    /// missing or empty.
    pub fn from_data(data: &HashMap<String, String>) -> Result<Self, SignInError> {
        let required = |key: &str, name: &str| {
            data.get(key)
                .filter(|value| !value.is_empty())
                .cloned()
                .ok_or_else(|| SignInError::InvalidToken {
                    reason: format!("missing {name}"),
                })
        };
        let optional = |key: &str| data.get(key).filter(|value| !value.is_empty()).cloned();

        Ok(Self {
            id_token: required(BUNDLE_KEY_ID_TOKEN, "id token")?,
            id: required(BUNDLE_KEY_ID, "id")?,
            display_name: optional(BUNDLE_KEY_DISPLAY_NAME),
            given_name: optional(BUNDLE_KEY_GIVEN_NAME),
            family_name: optional(BUNDLE_KEY_FAMILY_NAME),
            profile_picture_uri: optional(BUNDLE_KEY_PROFILE_PICTURE_URI),
            phone_number: optional(BUNDLE_KEY_PHONE_NUMBER),
        })
    }

    /// Converts the credential back into its broker bundle.
    #[must_use]
    pub fn to_data(&self) -> HashMap<String, String> {
        let mut data = HashMap::from([
            (BUNDLE_KEY_ID_TOKEN.to_string(), self.id_token.clone()),
            (BUNDLE_KEY_ID.to_string(), self.id.clone()),
        ]);
        let optional = [
            (BUNDLE_KEY_DISPLAY_NAME, &self.display_name),
            (BUNDLE_KEY_GIVEN_NAME, &self.given_name),
            (BUNDLE_KEY_FAMILY_NAME, &self.family_name),
            (BUNDLE_KEY_PROFILE_PICTURE_URI, &self.profile_picture_uri),
            (BUNDLE_KEY_PHONE_NUMBER, &self.phone_number),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                data.insert(key.to_string(), value.clone());
            }
        }
        data
    }
}

impl From<GoogleIdTokenCredential> for Credential {
    fn from(credential: GoogleIdTokenCredential) -> Self {
        Self::Custom {
            credential_type: GOOGLE_ID_TOKEN_CREDENTIAL_TYPE.to_string(),
            data: credential.to_data(),
        }
    }
}

impl TryFrom<Credential> for GoogleIdTokenCredential {
    type Error = SignInError;

    /// Classifies a broker credential, accepting only Google ID tokens.
    fn try_from(credential: Credential) -> Result<Self, Self::Error> {
        match credential {
            Credential::Custom {
                credential_type,
                data,
            } if credential_type == GOOGLE_ID_TOKEN_CREDENTIAL_TYPE => {
                Self::from_data(&data)
            }
            Credential::Custom {
                credential_type, ..
            } => Err(SignInError::UnexpectedCredentialType { credential_type }),
            Credential::Other { class_name } => Err(SignInError::UnexpectedCredentialType {
                credential_type: class_name,
            }),
        }
    }
}
