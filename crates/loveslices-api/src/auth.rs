//! HTTP Basic-auth extractor resolving to a registered user.
//!
//! Credentials are `email:password`; the password is verified against the
//! account's stored argon2 PHC string on every request.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rand_core::OsRng;

use loveslices_core::{store::JournalStore, user::User};

use crate::{AppState, error::ApiError};

/// Present in a handler's signature means the request carried valid
/// credentials; carries the resolved account.
pub struct Authenticated(pub User);

/// Hash a password into an argon2 PHC string for storage.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError::Internal(format!("argon2 error: {e}")))
}

/// Verify credentials directly from headers and resolve the account.
pub async fn verify_basic<S>(
  headers: &HeaderMap,
  store: &S,
) -> Result<User, ApiError>
where
  S: JournalStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds = std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (email, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;

  let user = store
    .get_user_by_email(email)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&user.password_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Ok(user)
}

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let user = verify_basic(&parts.headers, state.store.as_ref()).await?;
    Ok(Authenticated(user))
  }
}
