use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generates a single-use nonce for a sign-in request.
///
/// The nonce is the SHA-256 digest of a fresh random (v4) UUID, hex encoded.
/// It ends up in the `nonce` claim of the issued ID token so a backend can tie
/// the token to this request.
#[must_use]
#[uniffi::export]
pub fn generate_nonce() -> String {
    let raw = Uuid::new_v4().to_string();
    hex::encode(Sha256::digest(raw.as_bytes()))
}
