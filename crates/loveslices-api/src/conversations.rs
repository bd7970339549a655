//! Handlers for conversation endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/conversations` | Start; body: `{"topic":"..."}` |
//! | `POST` | `/conversations/:id/end` | Conclude into a spoken loveslice |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use loveslices_core::{
  pairing::{self, SpokenOutcome},
  slice::NewConversation,
  store::JournalStore,
};

use crate::{AppState, auth::Authenticated, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct StartBody {
  pub topic: Option<String>,
}

/// `POST /conversations` — returns 201 + the open conversation.
pub async fn start<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
  Json(body): Json<StartBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let conversation = state
    .store
    .add_conversation(NewConversation {
      initiator_id: user.user_id,
      topic:        body.topic,
    })
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(conversation)))
}

#[derive(Debug, Deserialize)]
pub struct EndBody {
  pub theme:   String,
  pub outcome: Option<String>,
}

/// `POST /conversations/:id/end` — concludes the conversation into a spoken
/// loveslice plus journal entry. Only a participant may do this.
pub async fn end<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
  Path(id): Path<Uuid>,
  Json(body): Json<EndBody>,
) -> Result<Json<SpokenOutcome>, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let outcome = pairing::record_spoken_loveslice(
    state.store.as_ref(),
    id,
    user.user_id,
    body.theme,
    body.outcome,
  )
  .await?;
  Ok(Json(outcome))
}
