use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use crate::api::auth::interfaces::{AuthClaims, CreateUser, Tokens};
use crate::api::auth::token::{
    RefreshTokenParts, generate_refresh_token_parts, split_refresh_token, verify_token,
};
use crate::database::DbError;
use crate::database::app_user::{User, UserRole, UserWithPassword};
use crate::database::user_store::{RefreshTokenStore, UserStore};
use app_state::AuthConstants;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sqlx::{Executor, PgPool, Postgres};
use tracing::{info, instrument};

/// Authenticates a user based on email and password.
///
/// # Errors
///
/// * `AuthError::InvalidCredentials` if the email or password is incorrect.
#[instrument(skip(pool, password))]
pub async fn authenticate_user(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<UserWithPassword, AuthError> {
    let user = UserStore::find_by_email_with_password(pool, email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = verify_password(password.as_ref(), &user.password)?;
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}

fn is_valid_username(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_alphanumeric() || c == ' ')
        && !name.starts_with(' ')
        && !name.ends_with(' ')
}

/// Registers a back-office user. Only the very first registration is accepted,
/// and that user becomes the admin.
///
/// # Errors
///
/// * `AuthError::InvalidUsername` when the name contains illegal characters.
/// * `AuthError::PermissionDenied` once an account exists.
/// * `AuthError::UserAlreadyExists` when the email is taken.
pub async fn create_user(pool: &PgPool, payload: &CreateUser) -> Result<User, AuthError> {
    if !is_valid_username(&payload.name) {
        return Err(AuthError::InvalidUsername);
    }
    if UserStore::any_exists(pool).await? {
        return Err(AuthError::PermissionDenied {
            user_email: payload.email.clone(),
            path: "/auth/register".to_owned(),
        });
    }

    let hashed = hash_password(payload.password.as_ref())?;
    info!(
        "Creating admin user email={}, name={}",
        payload.email, payload.name
    );
    match UserStore::create(pool, &payload.email, &payload.name, &hashed, UserRole::Admin).await
    {
        Ok(user) => Ok(user),
        Err(DbError::UniqueViolation(_)) => Err(AuthError::UserAlreadyExists),
        Err(e) => Err(e.into()),
    }
}

/// Stores a refresh token in the database.
pub async fn store_refresh_token(
    executor: impl Executor<'_, Database = Postgres>,
    auth: &AuthConstants,
    user_id: i32,
    parts: &RefreshTokenParts,
) -> Result<(), AuthError> {
    let expires_at = Utc::now() + Duration::days(auth.refresh_token_expiry_days);
    RefreshTokenStore::create(
        executor,
        user_id,
        &parts.selector,
        &parts.verifier_hash,
        expires_at,
    )
    .await?;
    Ok(())
}

/// Creates a new access token for a given user ID and role.
///
/// # Errors
///
/// * `jsonwebtoken::Error` if token encoding fails.
pub fn create_access_token(
    jwt_secret: &str,
    auth: &AuthConstants,
    user_id: i32,
    role: UserRole,
) -> Result<(String, u64), AuthError> {
    let exp = (Utc::now() + Duration::minutes(auth.access_token_expiry_minutes)).timestamp();
    let claims = AuthClaims {
        sub: user_id,
        role,
        exp,
    };
    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?;

    Ok((access_token, exp as u64))
}

/// Checks the credentials and issues a fresh access/refresh token pair.
pub async fn login(
    pool: &PgPool,
    jwt_secret: &str,
    auth: &AuthConstants,
    email: &str,
    password: &str,
) -> Result<Tokens, AuthError> {
    let user = authenticate_user(pool, email, password).await?;
    let (access_token, expiry) = create_access_token(jwt_secret, auth, user.id, user.role)?;
    let token_parts = generate_refresh_token_parts()?;
    store_refresh_token(pool, auth, user.id, &token_parts).await?;

    Ok(Tokens {
        expiry,
        access_token,
        refresh_token: token_parts.raw_token,
    })
}

/// Handles refresh token rotation, invalidating the old token and issuing a new pair.
///
/// # Errors
/// * `AuthError::InvalidToken` if the provided refresh token is malformed or invalid.
/// * `AuthError::RefreshTokenExpiredOrNotFound` if the refresh token is not found or has expired.
/// * `AuthError::UserNotFound` if the user associated with the token cannot be found.
pub async fn refresh_tokens(
    pool: &PgPool,
    jwt_secret: &str,
    auth: &AuthConstants,
    raw_token: &str,
) -> Result<Tokens, AuthError> {
    let (selector, verifier_bytes) = split_refresh_token(raw_token)?;
    let record = RefreshTokenStore::find_valid(pool, &selector)
        .await?
        .ok_or(AuthError::RefreshTokenExpiredOrNotFound)?;

    if !verify_token(&verifier_bytes, &record.verifier_hash)? {
        // A wrong verifier for a known selector means the token leaked.
        RefreshTokenStore::delete_for_user(pool, record.user_id)
            .await
            .ok();
        return Err(AuthError::InvalidToken);
    }

    let user_role = UserStore::get_user_role(pool, record.user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    let mut tx = pool.begin().await?;
    RefreshTokenStore::delete_by_selector(&mut *tx, &selector).await?;
    let new_parts = generate_refresh_token_parts()?;
    store_refresh_token(&mut *tx, auth, record.user_id, &new_parts).await?;
    tx.commit().await?;

    let (access_token, expiry) = create_access_token(jwt_secret, auth, record.user_id, user_role)?;
    Ok(Tokens {
        expiry,
        access_token,
        refresh_token: new_parts.raw_token,
    })
}

/// Deletes the refresh token matching the provided one.
///
/// Always succeeds, malformed or unknown tokens are ignored.
pub async fn logout_user(pool: &PgPool, raw_token: &str) -> Result<(), AuthError> {
    if let Ok((selector, verifier_bytes)) = split_refresh_token(raw_token)
        && let Some(record) = RefreshTokenStore::find_valid(pool, &selector).await?
        && verify_token(&verifier_bytes, &record.verifier_hash).unwrap_or(false)
    {
        RefreshTokenStore::delete_by_selector(pool, &selector).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    fn auth() -> AuthConstants {
        AuthConstants {
            access_token_expiry_minutes: 30,
            refresh_token_expiry_days: 30,
        }
    }

    #[test]
    fn usernames() {
        assert!(is_valid_username("Site Admin"));
        assert!(is_valid_username("admin2"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username(" admin"));
        assert!(!is_valid_username("admin "));
        assert!(!is_valid_username("admin!"));
    }

    #[test]
    fn access_token_carries_claims() {
        let (token, expiry) =
            create_access_token("secret", &auth(), 7, UserRole::Admin).expect("token");
        let claims = decode::<AuthClaims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .expect("decoded")
        .claims;
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.exp as u64, expiry);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn access_token_rejects_other_secret() {
        let (token, _) = create_access_token("secret", &auth(), 7, UserRole::User).expect("token");
        assert!(
            decode::<AuthClaims>(
                &token,
                &DecodingKey::from_secret(b"other"),
                &Validation::default()
            )
            .is_err()
        );
    }
}
