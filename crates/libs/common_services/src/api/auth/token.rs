use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rng};

/// Represents the components of a refresh token for secure storage and verification.
pub struct RefreshTokenParts {
    pub raw_token: String,
    pub selector: String,
    pub verifier_hash: String,
}

/// Generates a new set of refresh token parts: a raw token, a selector, and a verifier hash.
///
/// # Errors
///
/// * `AuthError::Internal` if hashing fails.
pub fn generate_refresh_token_parts() -> Result<RefreshTokenParts, AuthError> {
    let mut raw_bytes = [0u8; 32];
    rng().fill_bytes(&mut raw_bytes);

    let selector = URL_SAFE_NO_PAD.encode(&raw_bytes[..16]);
    let raw_token = URL_SAFE_NO_PAD.encode(raw_bytes);
    let verifier_hash = hash_password(&raw_bytes[16..])?;

    Ok(RefreshTokenParts {
        raw_token,
        selector,
        verifier_hash,
    })
}

/// Splits a raw refresh token string into its selector and verifier bytes.
///
/// # Errors
///
/// * `AuthError::InvalidToken` if the token is not valid base64 or has an incorrect length.
pub fn split_refresh_token(token: &str) -> Result<(String, Vec<u8>), AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| AuthError::InvalidToken)?;

    if bytes.len() != 32 {
        return Err(AuthError::InvalidToken);
    }

    let selector = URL_SAFE_NO_PAD.encode(&bytes[..16]);
    Ok((selector, bytes[16..].to_vec()))
}

pub fn verify_token(verifier_bytes: &[u8], verifier_hash: &str) -> Result<bool, AuthError> {
    Ok(verify_password(verifier_bytes, verifier_hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_splits_and_verifies() {
        let parts = generate_refresh_token_parts().expect("parts");
        let (selector, verifier) = split_refresh_token(&parts.raw_token).expect("split");
        assert_eq!(selector, parts.selector);
        assert!(verify_token(&verifier, &parts.verifier_hash).expect("verified"));
    }

    #[test]
    fn malformed_tokens_are_invalid() {
        assert!(matches!(
            split_refresh_token("!!not base64!!"),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            split_refresh_token(&URL_SAFE_NO_PAD.encode([1u8; 8])),
            Err(AuthError::InvalidToken)
        ));
    }
}
