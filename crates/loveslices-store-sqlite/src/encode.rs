//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings. The journal's tagged slice reference is
//! split across two nullable columns on write and rejoined on read.

use chrono::{DateTime, Utc};
use loveslices_core::{
  journal::{JournalEntry, SliceRef},
  prompt::{Question, Response},
  slice::{Conversation, Loveslice, SpokenLoveslice},
  user::{PartnerInvite, User},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── SliceRef ────────────────────────────────────────────────────────────────

/// Split a slice reference into the two `journal_entries` columns
/// `(written_loveslice_id, spoken_loveslice_id)`.
pub fn encode_slice_ref(r: SliceRef) -> (Option<String>, Option<String>) {
  match r {
    SliceRef::Written(id) => (Some(encode_uuid(id)), None),
    SliceRef::Spoken(id) => (None, Some(encode_uuid(id))),
  }
}

/// Rejoin the two columns into the tagged reference. The written column
/// wins when a legacy row carries both.
pub fn decode_slice_ref(
  written: Option<&str>,
  spoken: Option<&str>,
) -> Result<Option<SliceRef>> {
  match (written, spoken) {
    (Some(w), _) => Ok(Some(SliceRef::Written(decode_uuid(w)?))),
    (None, Some(s)) => Ok(Some(SliceRef::Spoken(decode_uuid(s)?))),
    (None, None) => Ok(None),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:         String,
  pub name:            String,
  pub email:           String,
  pub password_hash:   String,
  pub partner_id:      Option<String>,
  pub profile_picture: Option<String>,
  pub created_at:      String,
}

impl RawUser {
  /// Column order: `user_id, name, email, password_hash, partner_id,
  /// profile_picture, created_at`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:         row.get(0)?,
      name:            row.get(1)?,
      email:           row.get(2)?,
      password_hash:   row.get(3)?,
      partner_id:      row.get(4)?,
      profile_picture: row.get(5)?,
      created_at:      row.get(6)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:         decode_uuid(&self.user_id)?,
      name:            self.name,
      email:           self.email,
      password_hash:   self.password_hash,
      partner_id:      self.partner_id.as_deref().map(decode_uuid).transpose()?,
      profile_picture: self.profile_picture,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `partner_invites` row.
pub struct RawInvite {
  pub code:        String,
  pub inviter_id:  String,
  pub created_at:  String,
  pub accepted_at: Option<String>,
}

impl RawInvite {
  /// Column order: `code, inviter_id, created_at, accepted_at`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      code:        row.get(0)?,
      inviter_id:  row.get(1)?,
      created_at:  row.get(2)?,
      accepted_at: row.get(3)?,
    })
  }

  pub fn into_invite(self) -> Result<PartnerInvite> {
    Ok(PartnerInvite {
      code:        self.code,
      inviter_id:  decode_uuid(&self.inviter_id)?,
      created_at:  decode_dt(&self.created_at)?,
      accepted_at: self.accepted_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}

/// Raw strings read directly from a `questions` row.
pub struct RawQuestion {
  pub question_id: String,
  pub content:     String,
  pub theme:       String,
  pub approved:    bool,
  pub created_at:  String,
}

impl RawQuestion {
  /// Column order: `question_id, content, theme, approved, created_at`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      question_id: row.get(0)?,
      content:     row.get(1)?,
      theme:       row.get(2)?,
      approved:    row.get(3)?,
      created_at:  row.get(4)?,
    })
  }

  pub fn into_question(self) -> Result<Question> {
    Ok(Question {
      question_id: decode_uuid(&self.question_id)?,
      content:     self.content,
      theme:       self.theme,
      approved:    self.approved,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `responses` row.
pub struct RawResponse {
  pub response_id: String,
  pub question_id: String,
  pub user_id:     String,
  pub content:     String,
  pub created_at:  String,
}

impl RawResponse {
  /// Column order: `response_id, question_id, user_id, content, created_at`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      response_id: row.get(0)?,
      question_id: row.get(1)?,
      user_id:     row.get(2)?,
      content:     row.get(3)?,
      created_at:  row.get(4)?,
    })
  }

  pub fn into_response(self) -> Result<Response> {
    Ok(Response {
      response_id: decode_uuid(&self.response_id)?,
      question_id: decode_uuid(&self.question_id)?,
      user_id:     decode_uuid(&self.user_id)?,
      content:     self.content,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `loveslices` row.
pub struct RawLoveslice {
  pub loveslice_id: String,
  pub question_id:  String,
  pub user1_id:     String,
  pub user2_id:     String,
  pub response1_id: String,
  pub response2_id: String,
  pub created_at:   String,
}

impl RawLoveslice {
  /// Column order: `loveslice_id, question_id, user1_id, user2_id,
  /// response1_id, response2_id, created_at`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      loveslice_id: row.get(0)?,
      question_id:  row.get(1)?,
      user1_id:     row.get(2)?,
      user2_id:     row.get(3)?,
      response1_id: row.get(4)?,
      response2_id: row.get(5)?,
      created_at:   row.get(6)?,
    })
  }

  pub fn into_loveslice(self) -> Result<Loveslice> {
    Ok(Loveslice {
      loveslice_id: decode_uuid(&self.loveslice_id)?,
      question_id:  decode_uuid(&self.question_id)?,
      user1_id:     decode_uuid(&self.user1_id)?,
      user2_id:     decode_uuid(&self.user2_id)?,
      response1_id: decode_uuid(&self.response1_id)?,
      response2_id: decode_uuid(&self.response2_id)?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `conversations` row.
pub struct RawConversation {
  pub conversation_id: String,
  pub initiator_id:    String,
  pub topic:           Option<String>,
  pub started_at:      String,
  pub ended_at:        Option<String>,
}

impl RawConversation {
  /// Column order: `conversation_id, initiator_id, topic, started_at,
  /// ended_at`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      conversation_id: row.get(0)?,
      initiator_id:    row.get(1)?,
      topic:           row.get(2)?,
      started_at:      row.get(3)?,
      ended_at:        row.get(4)?,
    })
  }

  pub fn into_conversation(self) -> Result<Conversation> {
    Ok(Conversation {
      conversation_id: decode_uuid(&self.conversation_id)?,
      initiator_id:    decode_uuid(&self.initiator_id)?,
      topic:           self.topic,
      started_at:      decode_dt(&self.started_at)?,
      ended_at:        self.ended_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}

/// Raw strings read directly from a `spoken_loveslices` row.
pub struct RawSpokenLoveslice {
  pub spoken_loveslice_id: String,
  pub conversation_id:     String,
  pub user1_id:            String,
  pub user2_id:            String,
  pub theme:               String,
  pub outcome:             Option<String>,
  pub created_at:          String,
}

impl RawSpokenLoveslice {
  /// Column order: `spoken_loveslice_id, conversation_id, user1_id,
  /// user2_id, theme, outcome, created_at`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      spoken_loveslice_id: row.get(0)?,
      conversation_id:     row.get(1)?,
      user1_id:            row.get(2)?,
      user2_id:            row.get(3)?,
      theme:               row.get(4)?,
      outcome:             row.get(5)?,
      created_at:          row.get(6)?,
    })
  }

  pub fn into_spoken(self) -> Result<SpokenLoveslice> {
    Ok(SpokenLoveslice {
      spoken_loveslice_id: decode_uuid(&self.spoken_loveslice_id)?,
      conversation_id:     decode_uuid(&self.conversation_id)?,
      user1_id:            decode_uuid(&self.user1_id)?,
      user2_id:            decode_uuid(&self.user2_id)?,
      theme:               self.theme,
      outcome:             self.outcome,
      created_at:          decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `journal_entries` row.
pub struct RawJournalEntry {
  pub entry_id:             String,
  pub user1_id:             String,
  pub user2_id:             String,
  pub written_loveslice_id: Option<String>,
  pub spoken_loveslice_id:  Option<String>,
  pub theme:                String,
  pub searchable_content:   String,
  pub created_at:           String,
}

impl RawJournalEntry {
  /// Column order: `entry_id, user1_id, user2_id, written_loveslice_id,
  /// spoken_loveslice_id, theme, searchable_content, created_at`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      entry_id:             row.get(0)?,
      user1_id:             row.get(1)?,
      user2_id:             row.get(2)?,
      written_loveslice_id: row.get(3)?,
      spoken_loveslice_id:  row.get(4)?,
      theme:                row.get(5)?,
      searchable_content:   row.get(6)?,
      created_at:           row.get(7)?,
    })
  }

  pub fn into_entry(self) -> Result<JournalEntry> {
    Ok(JournalEntry {
      entry_id:           decode_uuid(&self.entry_id)?,
      user1_id:           decode_uuid(&self.user1_id)?,
      user2_id:           decode_uuid(&self.user2_id)?,
      slice:              decode_slice_ref(
        self.written_loveslice_id.as_deref(),
        self.spoken_loveslice_id.as_deref(),
      )?,
      theme:              self.theme,
      searchable_content: self.searchable_content,
      created_at:         decode_dt(&self.created_at)?,
    })
  }
}
