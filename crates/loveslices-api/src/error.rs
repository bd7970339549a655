//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized")]
  Unauthorized,

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("internal error: {0}")]
  Internal(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a backend error from any store implementation.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl From<loveslices_core::Error> for ApiError {
  fn from(e: loveslices_core::Error) -> Self {
    use loveslices_core::Error as E;
    match e {
      E::UserNotFound(_)
      | E::QuestionNotFound(_)
      | E::ConversationNotFound(_)
      | E::InviteNotFound(_) => ApiError::NotFound(e.to_string()),

      E::AlreadyPartnered(_)
      | E::AlreadyAnswered { .. }
      | E::InviteAlreadyAccepted(_)
      | E::ConversationEnded(_)
      | E::EmailTaken(_) => ApiError::Conflict(e.to_string()),

      E::NotPartnered(_) | E::SelfPartnering => ApiError::BadRequest(e.to_string()),

      E::NotParticipant { .. } => ApiError::Forbidden(e.to_string()),

      E::Storage(inner) => ApiError::Store(inner),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Internal(_) | ApiError::Store(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };

    let mut res =
      (status, Json(json!({ "error": self.to_string() }))).into_response();
    if status == StatusCode::UNAUTHORIZED {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"loveslices\""),
      );
    }
    res
  }
}
