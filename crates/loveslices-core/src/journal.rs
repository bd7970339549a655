//! Journal entries and their enriched read models.
//!
//! An entry is an append-only timeline row shared by both participants. It
//! references at most one loveslice; the reference is a tagged union, so
//! "both written and spoken" is unrepresentable by construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  prompt::{Question, Response},
  slice::{Conversation, Loveslice, SpokenLoveslice},
  user::Profile,
};

// ─── Stored rows ─────────────────────────────────────────────────────────────

/// Which loveslice a journal entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SliceRef {
  Written(Uuid),
  Spoken(Uuid),
}

/// A per-couple timeline row. `theme` and `searchable_content` are
/// denormalised at creation time so filtering never needs a join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
  pub entry_id:           Uuid,
  pub user1_id:           Uuid,
  pub user2_id:           Uuid,
  pub slice:              Option<SliceRef>,
  pub theme:              String,
  pub searchable_content: String,
  pub created_at:         DateTime<Utc>,
}

/// Input to
/// [`JournalStore::add_journal_entry`](crate::store::JournalStore::add_journal_entry).
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
  pub user1_id:           Uuid,
  pub user2_id:           Uuid,
  pub slice:              SliceRef,
  pub theme:              String,
  pub searchable_content: String,
}

// ─── Enriched views ──────────────────────────────────────────────────────────

/// One half of a written slice: the response and its author's profile.
/// Either side is `None` when the referenced row is missing — a dangling
/// nested reference never aborts enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSide {
  pub response: Option<Response>,
  pub author:   Option<Profile>,
}

/// A resolved written loveslice: the slice row plus everything it references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenView {
  pub slice:     Loveslice,
  pub question:  Option<Question>,
  /// Always exactly two sides, in the slice's participant order.
  pub responses: [ResponseSide; 2],
}

/// A resolved spoken loveslice: the slice row plus its conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpokenView {
  pub slice:        SpokenLoveslice,
  pub conversation: Option<Conversation>,
}

/// Exactly one of the two enrichment shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SliceView {
  Written(WrittenView),
  Spoken(SpokenView),
}

/// The computed read model for one journal row — never stored, always
/// derived. `slice` is `None` when the entry references nothing or its
/// top-level reference dangles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntryView {
  pub entry: JournalEntry,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub slice: Option<SliceView>,
}
