//! Questions and responses — the written half of the product.
//!
//! A question is a shared prompt with a free-form theme. A response is one
//! user's answer to one question; at most one per (question, user), and
//! immutable once recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared prompt. Immutable once created except for the moderation flag,
/// which is owned by content management.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
  pub question_id: Uuid,
  pub content:     String,
  /// Free-form categorical label, e.g. "Trust" or "Intimacy".
  pub theme:       String,
  pub approved:    bool,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`JournalStore::add_question`](crate::store::JournalStore::add_question).
#[derive(Debug, Clone)]
pub struct NewQuestion {
  pub content: String,
  pub theme:   String,
}

/// One user's answer to one question. Created once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
  pub response_id: Uuid,
  pub question_id: Uuid,
  pub user_id:     Uuid,
  pub content:     String,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`JournalStore::add_response`](crate::store::JournalStore::add_response).
#[derive(Debug, Clone)]
pub struct NewResponse {
  pub question_id: Uuid,
  pub user_id:     Uuid,
  pub content:     String,
}
