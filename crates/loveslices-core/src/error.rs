//! Error types for `loveslices-core`.

use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the journal and pairing services.
///
/// Dangling references inside journal entries are NOT errors — they are
/// absorbed per entry during enrichment. Only the requesting user being
/// unknown, violated pairing rules, and backend failures abort an operation.
#[derive(Debug, Error)]
pub enum Error {
  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  #[error("question not found: {0}")]
  QuestionNotFound(Uuid),

  #[error("conversation not found: {0}")]
  ConversationNotFound(Uuid),

  #[error("conversation {0} has already ended")]
  ConversationEnded(Uuid),

  #[error("user {user} is not a participant of conversation {conversation}")]
  NotParticipant { user: Uuid, conversation: Uuid },

  #[error("invite not found: {0:?}")]
  InviteNotFound(String),

  #[error("invite {0:?} has already been accepted")]
  InviteAlreadyAccepted(String),

  #[error("user {0} already has a partner")]
  AlreadyPartnered(Uuid),

  #[error("user {0} has no partner")]
  NotPartnered(Uuid),

  #[error("users cannot partner with themselves")]
  SelfPartnering,

  #[error("user {user} has already answered question {question}")]
  AlreadyAnswered { user: Uuid, question: Uuid },

  #[error("email already registered: {0:?}")]
  EmailTaken(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend failure from any [`JournalStore`](crate::store::JournalStore)
  /// implementation. Backend failures are fatal and never retried here.
  pub fn storage<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
