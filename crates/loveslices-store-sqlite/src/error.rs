//! Error type for `loveslices-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Attempted to update a user row that does not exist.
  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  #[error("conversation not found: {0}")]
  ConversationNotFound(Uuid),

  #[error("invite not found: {0:?}")]
  InviteNotFound(String),

  #[error("email already registered: {0:?}")]
  EmailTaken(String),

  #[error("user {user} has already answered question {question}")]
  DuplicateResponse { user: Uuid, question: Uuid },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
