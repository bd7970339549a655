//! Handlers for question and response endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/questions` | Body: [`NewQuestionBody`]; returns 201 |
//! | `GET`  | `/questions/:id` | 404 if not found |
//! | `POST` | `/responses` | Body: [`RespondBody`]; may form a loveslice |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use loveslices_core::{
  pairing::{self, ResponseOutcome},
  prompt::{NewQuestion, NewResponse, Question},
  store::JournalStore,
};

use crate::{AppState, auth::Authenticated, error::ApiError};

// ─── Questions ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NewQuestionBody {
  pub content: String,
  pub theme:   String,
}

/// `POST /questions` — returns 201 + the stored [`Question`].
pub async fn create_question<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewQuestionBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let question = state
    .store
    .add_question(NewQuestion { content: body.content, theme: body.theme })
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(question)))
}

/// `GET /questions/:id`
pub async fn get_question<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Question>, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let question = state
    .store
    .get_question(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("question {id} not found")))?;
  Ok(Json(question))
}

// ─── Responses ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RespondBody {
  pub question_id: Uuid,
  pub content:     String,
}

/// `POST /responses` — records the authenticated user's answer; when it
/// completes the pair, the formed loveslice and journal entry come back too.
pub async fn submit_response<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
  Json(body): Json<RespondBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let outcome: ResponseOutcome = pairing::submit_response(
    state.store.as_ref(),
    NewResponse {
      question_id: body.question_id,
      user_id:     user.user_id,
      content:     body.content,
    },
  )
  .await?;
  Ok((StatusCode::CREATED, Json(outcome)))
}
