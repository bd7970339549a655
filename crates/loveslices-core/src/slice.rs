//! Loveslices — paired exchanges between two partners.
//!
//! A written loveslice pairs two responses to the same question. A spoken
//! loveslice records an in-person conversation instead. Both are created by
//! the pairing service together with the couple's journal entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Written ─────────────────────────────────────────────────────────────────

/// Two responses to the same question, one from each partner.
///
/// Invariant: `response1_id` was authored by `user1_id` and `response2_id`
/// by `user2_id`, both answering `question_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loveslice {
  pub loveslice_id: Uuid,
  pub question_id:  Uuid,
  pub user1_id:     Uuid,
  pub user2_id:     Uuid,
  pub response1_id: Uuid,
  pub response2_id: Uuid,
  pub created_at:   DateTime<Utc>,
}

/// Input to [`JournalStore::add_loveslice`](crate::store::JournalStore::add_loveslice).
#[derive(Debug, Clone)]
pub struct NewLoveslice {
  pub question_id:  Uuid,
  pub user1_id:     Uuid,
  pub user2_id:     Uuid,
  pub response1_id: Uuid,
  pub response2_id: Uuid,
}

// ─── Conversations ───────────────────────────────────────────────────────────

/// An in-person exchange in progress (or concluded, once `ended_at` is set).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
  pub conversation_id: Uuid,
  pub initiator_id:    Uuid,
  pub topic:           Option<String>,
  pub started_at:      DateTime<Utc>,
  pub ended_at:        Option<DateTime<Utc>>,
}

/// Input to [`JournalStore::add_conversation`](crate::store::JournalStore::add_conversation).
#[derive(Debug, Clone)]
pub struct NewConversation {
  pub initiator_id: Uuid,
  pub topic:        Option<String>,
}

// ─── Spoken ──────────────────────────────────────────────────────────────────

/// A paired exchange logged from a concluded conversation rather than
/// written responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpokenLoveslice {
  pub spoken_loveslice_id: Uuid,
  pub conversation_id:     Uuid,
  pub user1_id:            Uuid,
  pub user2_id:            Uuid,
  pub theme:               String,
  pub outcome:             Option<String>,
  pub created_at:          DateTime<Utc>,
}

/// Input to
/// [`JournalStore::add_spoken_loveslice`](crate::store::JournalStore::add_spoken_loveslice).
#[derive(Debug, Clone)]
pub struct NewSpokenLoveslice {
  pub conversation_id: Uuid,
  pub user1_id:        Uuid,
  pub user2_id:        Uuid,
  pub theme:           String,
  pub outcome:         Option<String>,
}
