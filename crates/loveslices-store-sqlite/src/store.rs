//! [`SqliteStore`] — the SQLite implementation of [`JournalStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use loveslices_core::{
  journal::{JournalEntry, NewJournalEntry},
  prompt::{NewQuestion, NewResponse, Question, Response},
  slice::{
    Conversation, Loveslice, NewConversation, NewLoveslice,
    NewSpokenLoveslice, SpokenLoveslice,
  },
  store::{EntryFilter, JournalStore, Visibility},
  user::{NewInvite, NewUser, PartnerInvite, User},
};

use crate::{
  Error, Result,
  encode::{
    RawConversation, RawInvite, RawJournalEntry, RawLoveslice, RawQuestion,
    RawResponse, RawSpokenLoveslice, RawUser, encode_dt, encode_slice_ref,
    encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Column lists ────────────────────────────────────────────────────────────

// Kept in one place so SELECTs always match the `from_row` column order.

const USER_COLS: &str =
  "user_id, name, email, password_hash, partner_id, profile_picture, created_at";
const INVITE_COLS: &str = "code, inviter_id, created_at, accepted_at";
const QUESTION_COLS: &str = "question_id, content, theme, approved, created_at";
const RESPONSE_COLS: &str =
  "response_id, question_id, user_id, content, created_at";
const LOVESLICE_COLS: &str =
  "loveslice_id, question_id, user1_id, user2_id, response1_id, response2_id, created_at";
const CONVERSATION_COLS: &str =
  "conversation_id, initiator_id, topic, started_at, ended_at";
const SPOKEN_COLS: &str =
  "spoken_loveslice_id, conversation_id, user1_id, user2_id, theme, outcome, created_at";
const ENTRY_COLS: &str =
  "entry_id, user1_id, user2_id, written_loveslice_id, spoken_loveslice_id, theme, searchable_content, created_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Loveslices store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── JournalStore impl ───────────────────────────────────────────────────────

impl JournalStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let email_check = input.email.clone();
    let taken: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM users WHERE email = ?1",
              rusqlite::params![email_check],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    if taken {
      return Err(Error::EmailTaken(input.email));
    }

    let user = User {
      user_id:         Uuid::new_v4(),
      name:            input.name,
      email:           input.email,
      password_hash:   input.password_hash,
      partner_id:      None,
      profile_picture: input.profile_picture,
      created_at:      Utc::now(),
    };

    let id_str  = encode_uuid(user.user_id);
    let name    = user.name.clone();
    let email   = user.email.clone();
    let hash    = user.password_hash.clone();
    let picture = user.profile_picture.clone();
    let at_str  = encode_dt(user.created_at);

    // The UNIQUE constraint backstops the racy existence check above.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (
             user_id, name, email, password_hash, partner_id,
             profile_picture, created_at
           ) VALUES (?1, ?2, ?3, ?4, NULL, ?5, ?6)",
          rusqlite::params![id_str, name, email, hash, picture, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {USER_COLS} FROM users WHERE user_id = ?1"),
              rusqlite::params![id_str],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {USER_COLS} FROM users WHERE email = ?1"),
              rusqlite::params![email],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn get_users(&self, ids: &[Uuid]) -> Result<Vec<User>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let id_strs: Vec<String> = ids.iter().copied().map(encode_uuid).collect();

    let raws: Vec<RawUser> = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; id_strs.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
          "SELECT {USER_COLS} FROM users WHERE user_id IN ({placeholders})"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(id_strs), RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  async fn set_partner(
    &self,
    user_id: Uuid,
    partner_id: Option<Uuid>,
  ) -> Result<()> {
    let id_str      = encode_uuid(user_id);
    let partner_str = partner_id.map(encode_uuid);

    let updated: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET partner_id = ?2 WHERE user_id = ?1",
          rusqlite::params![id_str, partner_str],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(Error::UserNotFound(user_id));
    }
    Ok(())
  }

  async fn set_profile_picture(
    &self,
    user_id: Uuid,
    picture: Option<String>,
  ) -> Result<()> {
    let id_str = encode_uuid(user_id);

    let updated: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET profile_picture = ?2 WHERE user_id = ?1",
          rusqlite::params![id_str, picture],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(Error::UserNotFound(user_id));
    }
    Ok(())
  }

  // ── Partner invites ───────────────────────────────────────────────────────

  async fn add_invite(&self, input: NewInvite) -> Result<PartnerInvite> {
    let invite = PartnerInvite {
      code:        input.code,
      inviter_id:  input.inviter_id,
      created_at:  Utc::now(),
      accepted_at: None,
    };

    let code        = invite.code.clone();
    let inviter_str = encode_uuid(invite.inviter_id);
    let at_str      = encode_dt(invite.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO partner_invites (code, inviter_id, created_at, accepted_at)
           VALUES (?1, ?2, ?3, NULL)",
          rusqlite::params![code, inviter_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(invite)
  }

  async fn get_invite(&self, code: &str) -> Result<Option<PartnerInvite>> {
    let code = code.to_owned();

    let raw: Option<RawInvite> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {INVITE_COLS} FROM partner_invites WHERE code = ?1"
              ),
              rusqlite::params![code],
              RawInvite::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawInvite::into_invite).transpose()
  }

  async fn mark_invite_accepted(
    &self,
    code: &str,
    at: DateTime<Utc>,
  ) -> Result<()> {
    let code_owned = code.to_owned();
    let at_str     = encode_dt(at);

    let updated: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE partner_invites SET accepted_at = ?2 WHERE code = ?1",
          rusqlite::params![code_owned, at_str],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(Error::InviteNotFound(code.to_owned()));
    }
    Ok(())
  }

  // ── Questions ─────────────────────────────────────────────────────────────

  async fn add_question(&self, input: NewQuestion) -> Result<Question> {
    let question = Question {
      question_id: Uuid::new_v4(),
      content:     input.content,
      theme:       input.theme,
      approved:    true,
      created_at:  Utc::now(),
    };

    let id_str  = encode_uuid(question.question_id);
    let content = question.content.clone();
    let theme   = question.theme.clone();
    let at_str  = encode_dt(question.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO questions (question_id, content, theme, approved, created_at)
           VALUES (?1, ?2, ?3, 1, ?4)",
          rusqlite::params![id_str, content, theme, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(question)
  }

  async fn get_question(&self, id: Uuid) -> Result<Option<Question>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawQuestion> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {QUESTION_COLS} FROM questions WHERE question_id = ?1"
              ),
              rusqlite::params![id_str],
              RawQuestion::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawQuestion::into_question).transpose()
  }

  async fn get_questions(&self, ids: &[Uuid]) -> Result<Vec<Question>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let id_strs: Vec<String> = ids.iter().copied().map(encode_uuid).collect();

    let raws: Vec<RawQuestion> = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; id_strs.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
          "SELECT {QUESTION_COLS} FROM questions WHERE question_id IN ({placeholders})"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(id_strs), RawQuestion::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawQuestion::into_question).collect()
  }

  // ── Responses ─────────────────────────────────────────────────────────────

  async fn add_response(&self, input: NewResponse) -> Result<Response> {
    let existing = self
      .find_response(input.question_id, input.user_id)
      .await?;
    if existing.is_some() {
      return Err(Error::DuplicateResponse {
        user:     input.user_id,
        question: input.question_id,
      });
    }

    let response = Response {
      response_id: Uuid::new_v4(),
      question_id: input.question_id,
      user_id:     input.user_id,
      content:     input.content,
      created_at:  Utc::now(),
    };

    let id_str       = encode_uuid(response.response_id);
    let question_str = encode_uuid(response.question_id);
    let user_str     = encode_uuid(response.user_id);
    let content      = response.content.clone();
    let at_str       = encode_dt(response.created_at);

    // The UNIQUE (question_id, user_id) constraint backstops the check above.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO responses (response_id, question_id, user_id, content, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, question_str, user_str, content, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(response)
  }

  async fn get_response(&self, id: Uuid) -> Result<Option<Response>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawResponse> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {RESPONSE_COLS} FROM responses WHERE response_id = ?1"
              ),
              rusqlite::params![id_str],
              RawResponse::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawResponse::into_response).transpose()
  }

  async fn get_responses(&self, ids: &[Uuid]) -> Result<Vec<Response>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let id_strs: Vec<String> = ids.iter().copied().map(encode_uuid).collect();

    let raws: Vec<RawResponse> = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; id_strs.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
          "SELECT {RESPONSE_COLS} FROM responses WHERE response_id IN ({placeholders})"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(id_strs), RawResponse::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawResponse::into_response).collect()
  }

  async fn find_response(
    &self,
    question_id: Uuid,
    user_id: Uuid,
  ) -> Result<Option<Response>> {
    let question_str = encode_uuid(question_id);
    let user_str     = encode_uuid(user_id);

    let raw: Option<RawResponse> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {RESPONSE_COLS} FROM responses
                 WHERE question_id = ?1 AND user_id = ?2"
              ),
              rusqlite::params![question_str, user_str],
              RawResponse::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawResponse::into_response).transpose()
  }

  // ── Written loveslices ────────────────────────────────────────────────────

  async fn add_loveslice(&self, input: NewLoveslice) -> Result<Loveslice> {
    let slice = Loveslice {
      loveslice_id: Uuid::new_v4(),
      question_id:  input.question_id,
      user1_id:     input.user1_id,
      user2_id:     input.user2_id,
      response1_id: input.response1_id,
      response2_id: input.response2_id,
      created_at:   Utc::now(),
    };

    let id_str        = encode_uuid(slice.loveslice_id);
    let question_str  = encode_uuid(slice.question_id);
    let user1_str     = encode_uuid(slice.user1_id);
    let user2_str     = encode_uuid(slice.user2_id);
    let response1_str = encode_uuid(slice.response1_id);
    let response2_str = encode_uuid(slice.response2_id);
    let at_str        = encode_dt(slice.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO loveslices (
             loveslice_id, question_id, user1_id, user2_id,
             response1_id, response2_id, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            question_str,
            user1_str,
            user2_str,
            response1_str,
            response2_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(slice)
  }

  async fn get_loveslice(&self, id: Uuid) -> Result<Option<Loveslice>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawLoveslice> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {LOVESLICE_COLS} FROM loveslices WHERE loveslice_id = ?1"
              ),
              rusqlite::params![id_str],
              RawLoveslice::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawLoveslice::into_loveslice).transpose()
  }

  async fn get_loveslices(&self, ids: &[Uuid]) -> Result<Vec<Loveslice>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let id_strs: Vec<String> = ids.iter().copied().map(encode_uuid).collect();

    let raws: Vec<RawLoveslice> = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; id_strs.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
          "SELECT {LOVESLICE_COLS} FROM loveslices WHERE loveslice_id IN ({placeholders})"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(id_strs), RawLoveslice::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLoveslice::into_loveslice).collect()
  }

  // ── Conversations & spoken loveslices ─────────────────────────────────────

  async fn add_conversation(
    &self,
    input: NewConversation,
  ) -> Result<Conversation> {
    let conversation = Conversation {
      conversation_id: Uuid::new_v4(),
      initiator_id:    input.initiator_id,
      topic:           input.topic,
      started_at:      Utc::now(),
      ended_at:        None,
    };

    let id_str        = encode_uuid(conversation.conversation_id);
    let initiator_str = encode_uuid(conversation.initiator_id);
    let topic         = conversation.topic.clone();
    let at_str        = encode_dt(conversation.started_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO conversations (conversation_id, initiator_id, topic, started_at, ended_at)
           VALUES (?1, ?2, ?3, ?4, NULL)",
          rusqlite::params![id_str, initiator_str, topic, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(conversation)
  }

  async fn get_conversation(&self, id: Uuid) -> Result<Option<Conversation>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawConversation> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CONVERSATION_COLS} FROM conversations
                 WHERE conversation_id = ?1"
              ),
              rusqlite::params![id_str],
              RawConversation::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawConversation::into_conversation).transpose()
  }

  async fn get_conversations(&self, ids: &[Uuid]) -> Result<Vec<Conversation>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let id_strs: Vec<String> = ids.iter().copied().map(encode_uuid).collect();

    let raws: Vec<RawConversation> = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; id_strs.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONVERSATION_COLS} FROM conversations
           WHERE conversation_id IN ({placeholders})"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(id_strs),
            RawConversation::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawConversation::into_conversation)
      .collect()
  }

  async fn end_conversation(
    &self,
    id: Uuid,
    at: DateTime<Utc>,
  ) -> Result<Conversation> {
    let id_str = encode_uuid(id);
    let at_str = encode_dt(at);

    let updated: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE conversations SET ended_at = ?2 WHERE conversation_id = ?1",
          rusqlite::params![id_str, at_str],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(Error::ConversationNotFound(id));
    }

    self
      .get_conversation(id)
      .await?
      .ok_or(Error::ConversationNotFound(id))
  }

  async fn add_spoken_loveslice(
    &self,
    input: NewSpokenLoveslice,
  ) -> Result<SpokenLoveslice> {
    let slice = SpokenLoveslice {
      spoken_loveslice_id: Uuid::new_v4(),
      conversation_id:     input.conversation_id,
      user1_id:            input.user1_id,
      user2_id:            input.user2_id,
      theme:               input.theme,
      outcome:             input.outcome,
      created_at:          Utc::now(),
    };

    let id_str           = encode_uuid(slice.spoken_loveslice_id);
    let conversation_str = encode_uuid(slice.conversation_id);
    let user1_str        = encode_uuid(slice.user1_id);
    let user2_str        = encode_uuid(slice.user2_id);
    let theme            = slice.theme.clone();
    let outcome          = slice.outcome.clone();
    let at_str           = encode_dt(slice.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO spoken_loveslices (
             spoken_loveslice_id, conversation_id, user1_id, user2_id,
             theme, outcome, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            conversation_str,
            user1_str,
            user2_str,
            theme,
            outcome,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(slice)
  }

  async fn get_spoken_loveslice(
    &self,
    id: Uuid,
  ) -> Result<Option<SpokenLoveslice>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSpokenLoveslice> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {SPOKEN_COLS} FROM spoken_loveslices
                 WHERE spoken_loveslice_id = ?1"
              ),
              rusqlite::params![id_str],
              RawSpokenLoveslice::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSpokenLoveslice::into_spoken).transpose()
  }

  async fn get_spoken_loveslices(
    &self,
    ids: &[Uuid],
  ) -> Result<Vec<SpokenLoveslice>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let id_strs: Vec<String> = ids.iter().copied().map(encode_uuid).collect();

    let raws: Vec<RawSpokenLoveslice> = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; id_strs.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
          "SELECT {SPOKEN_COLS} FROM spoken_loveslices
           WHERE spoken_loveslice_id IN ({placeholders})"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(id_strs),
            RawSpokenLoveslice::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSpokenLoveslice::into_spoken).collect()
  }

  // ── Journal ───────────────────────────────────────────────────────────────

  async fn add_journal_entry(
    &self,
    input: NewJournalEntry,
  ) -> Result<JournalEntry> {
    let entry = JournalEntry {
      entry_id:           Uuid::new_v4(),
      user1_id:           input.user1_id,
      user2_id:           input.user2_id,
      slice:              Some(input.slice),
      theme:              input.theme,
      searchable_content: input.searchable_content,
      created_at:         Utc::now(),
    };

    let id_str    = encode_uuid(entry.entry_id);
    let user1_str = encode_uuid(entry.user1_id);
    let user2_str = encode_uuid(entry.user2_id);
    let (written_str, spoken_str) = encode_slice_ref(input.slice);
    let theme      = entry.theme.clone();
    let searchable = entry.searchable_content.clone();
    let at_str     = encode_dt(entry.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO journal_entries (
             entry_id, user1_id, user2_id, written_loveslice_id,
             spoken_loveslice_id, theme, searchable_content, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            user1_str,
            user2_str,
            written_str,
            spoken_str,
            theme,
            searchable,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(entry)
  }

  async fn list_journal_entries(
    &self,
    scope: &Visibility,
    filter: Option<&EntryFilter>,
  ) -> Result<Vec<JournalEntry>> {
    // Build WHERE clause dynamically; every `?` binds from `binds` in order.
    let mut conds: Vec<&'static str> = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    let me = encode_uuid(scope.user_id);
    match scope.partner_id {
      Some(partner) => {
        conds.push(
          "(user1_id = ? OR user2_id = ? OR user1_id = ? OR user2_id = ?)",
        );
        let partner = encode_uuid(partner);
        binds.extend([me.clone(), me, partner.clone(), partner]);
      }
      None => {
        conds.push("(user1_id = ? OR user2_id = ?)");
        binds.extend([me.clone(), me]);
      }
    }

    match filter {
      // SQLite LIKE is case-insensitive over ASCII, which is the
      // case-insensitivity this contract promises. `%%` matches everything.
      Some(EntryFilter::Search(query)) => {
        conds.push("searchable_content LIKE ?");
        binds.push(format!("%{query}%"));
      }
      Some(EntryFilter::Theme(theme)) => {
        conds.push("theme = ?");
        binds.push(theme.clone());
      }
      None => {}
    }

    let raws: Vec<RawJournalEntry> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {ENTRY_COLS}
           FROM journal_entries
           WHERE {}
           ORDER BY created_at DESC, entry_id DESC",
          conds.join(" AND ")
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(binds),
            RawJournalEntry::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawJournalEntry::into_entry).collect()
  }
}
