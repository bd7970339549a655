//! Handlers for account, invite, and partner endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/users` | Register; body: [`RegisterBody`] |
//! | `GET`    | `/users/:id` | Public profile; 404 if not found |
//! | `GET`    | `/me` | Authenticated account, sans password hash |
//! | `PUT`    | `/me/picture` | Replace the stored picture value |
//! | `POST`   | `/invites` | Create a partner invite |
//! | `POST`   | `/invites/accept` | Body: `{"code":"..."}` |
//! | `DELETE` | `/partner` | Dissolve the partner link |

use chrono::{DateTime, Utc};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use loveslices_core::{
  pairing,
  store::JournalStore,
  user::{NewUser, PartnerInvite, Profile, User, picture_url},
};

use crate::{AppState, auth::Authenticated, error::ApiError};

// ─── Bodies ───────────────────────────────────────────────────────────────────

/// A user's own account as returned by the API — everything except the
/// password hash, with the picture path normalised.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountBody {
  pub user_id:         Uuid,
  pub name:            String,
  pub email:           String,
  pub partner_id:      Option<Uuid>,
  pub profile_picture: Option<String>,
  pub created_at:      DateTime<Utc>,
}

impl From<User> for AccountBody {
  fn from(u: User) -> Self {
    Self {
      user_id:         u.user_id,
      name:            u.name,
      email:           u.email,
      partner_id:      u.partner_id,
      profile_picture: u.profile_picture.as_deref().map(picture_url),
      created_at:      u.created_at,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub name:            String,
  pub email:           String,
  pub password:        String,
  pub profile_picture: Option<String>,
}

// ─── Register ─────────────────────────────────────────────────────────────────

/// `POST /users` — returns 201 + the new account.
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let password_hash = crate::auth::hash_password(&body.password)?;
  let user = pairing::register(
    state.store.as_ref(),
    NewUser {
      name: body.name,
      email: body.email,
      password_hash,
      profile_picture: body.profile_picture,
    },
  )
  .await?;
  Ok((StatusCode::CREATED, Json(AccountBody::from(user))))
}

// ─── Me / profiles ────────────────────────────────────────────────────────────

/// `GET /me`
pub async fn me<S>(
  Authenticated(user): Authenticated,
) -> Result<Json<AccountBody>, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(AccountBody::from(user)))
}

/// `GET /users/:id` — the public profile only.
pub async fn get_profile<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Profile>, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user = state
    .store
    .get_user(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;
  Ok(Json(user.profile()))
}

#[derive(Debug, Deserialize)]
pub struct PictureBody {
  /// Either a path rooted at `/` or a bare filename; `null` clears it.
  pub profile_picture: Option<String>,
}

/// `PUT /me/picture` — replace the stored picture value and return the
/// updated account (picture normalised).
pub async fn set_picture<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
  Json(body): Json<PictureBody>,
) -> Result<Json<AccountBody>, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .set_profile_picture(user.user_id, body.profile_picture)
    .await
    .map_err(ApiError::store)?;
  let user = state
    .store
    .get_user(user.user_id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("user {} not found", user.user_id)))?;
  Ok(Json(AccountBody::from(user)))
}

// ─── Invites ──────────────────────────────────────────────────────────────────

fn invite_code() -> String {
  let mut bytes = [0u8; 16];
  OsRng.fill_bytes(&mut bytes);
  hex::encode(bytes)
}

/// `POST /invites` — returns 201 + the invite, including its code.
pub async fn create_invite<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
) -> Result<impl IntoResponse, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let invite: PartnerInvite =
    pairing::invite_partner(state.store.as_ref(), user.user_id, invite_code())
      .await?;
  Ok((StatusCode::CREATED, Json(invite)))
}

#[derive(Debug, Deserialize)]
pub struct AcceptBody {
  pub code: String,
}

/// `POST /invites/accept` — links the authenticated user with the inviter
/// and returns the accepter's updated account.
pub async fn accept_invite<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
  Json(body): Json<AcceptBody>,
) -> Result<Json<AccountBody>, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let (_inviter, accepter) =
    pairing::accept_invite(state.store.as_ref(), &body.code, user.user_id)
      .await?;
  Ok(Json(AccountBody::from(accepter)))
}

// ─── Partner ──────────────────────────────────────────────────────────────────

/// `DELETE /partner` — dissolves the link from either side.
pub async fn unlink<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
) -> Result<impl IntoResponse, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  pairing::unlink_partners(state.store.as_ref(), user.user_id).await?;
  Ok(StatusCode::NO_CONTENT)
}
