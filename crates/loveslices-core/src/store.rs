//! The `JournalStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `loveslices-store-sqlite`). The query, pairing, and HTTP layers depend on
//! this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  journal::{JournalEntry, NewJournalEntry},
  prompt::{NewQuestion, NewResponse, Question, Response},
  slice::{
    Conversation, Loveslice, NewConversation, NewLoveslice,
    NewSpokenLoveslice, SpokenLoveslice,
  },
  user::{NewInvite, NewUser, PartnerInvite, User},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Who may see a journal entry: the requesting user plus, when partnered,
/// their partner. Built once per request from the requester's record, never
/// per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
  pub user_id:    Uuid,
  pub partner_id: Option<Uuid>,
}

impl Visibility {
  /// Visibility scope of an unpartnered user: their own entries only.
  pub fn solo(user_id: Uuid) -> Self {
    Self { user_id, partner_id: None }
  }

  /// Visibility scope derived from a user record.
  pub fn of(user: &User) -> Self {
    Self {
      user_id:    user.user_id,
      partner_id: user.partner_id,
    }
  }
}

/// The two filter modes, mutually exclusive per call by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryFilter {
  /// Case-insensitive substring match over `searchable_content`.
  /// The empty string matches every visible entry.
  Search(String),
  /// Exact equality on the denormalised theme.
  Theme(String),
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Loveslices storage backend.
///
/// Journal entries, responses, and slices are append-only; the only mutable
/// columns are a user's partner link and picture, an invite's acceptance
/// timestamp, and a conversation's end timestamp.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait JournalStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create and persist a new account. The id and `created_at` are assigned
  /// by the store. Fails if the email is already registered.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not found.
  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Retrieve a user by registered email. Returns `None` if not found.
  fn get_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Batched point lookup; missing ids are silently absent from the result.
  fn get_users<'a>(
    &'a self,
    ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + 'a;

  /// Overwrite one side of a partner link. Reciprocity is the pairing
  /// service's responsibility; this is a single-column write.
  fn set_partner(
    &self,
    user_id: Uuid,
    partner_id: Option<Uuid>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace the stored profile-picture value (path or bare filename).
  fn set_profile_picture(
    &self,
    user_id: Uuid,
    picture: Option<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Partner invites ───────────────────────────────────────────────────

  fn add_invite(
    &self,
    input: NewInvite,
  ) -> impl Future<Output = Result<PartnerInvite, Self::Error>> + Send + '_;

  fn get_invite<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<PartnerInvite>, Self::Error>> + Send + 'a;

  /// Stamp an invite as accepted. Fails if the code is unknown.
  fn mark_invite_accepted<'a>(
    &'a self,
    code: &'a str,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Questions ─────────────────────────────────────────────────────────

  fn add_question(
    &self,
    input: NewQuestion,
  ) -> impl Future<Output = Result<Question, Self::Error>> + Send + '_;

  fn get_question(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Question>, Self::Error>> + Send + '_;

  fn get_questions<'a>(
    &'a self,
    ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + 'a;

  // ── Responses ─────────────────────────────────────────────────────────

  /// Record an answer. Fails if the user already answered this question.
  fn add_response(
    &self,
    input: NewResponse,
  ) -> impl Future<Output = Result<Response, Self::Error>> + Send + '_;

  fn get_response(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Response>, Self::Error>> + Send + '_;

  fn get_responses<'a>(
    &'a self,
    ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<Response>, Self::Error>> + Send + 'a;

  /// The answer a given user gave to a given question, if any.
  fn find_response(
    &self,
    question_id: Uuid,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Option<Response>, Self::Error>> + Send + '_;

  // ── Written loveslices ────────────────────────────────────────────────

  fn add_loveslice(
    &self,
    input: NewLoveslice,
  ) -> impl Future<Output = Result<Loveslice, Self::Error>> + Send + '_;

  fn get_loveslice(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Loveslice>, Self::Error>> + Send + '_;

  fn get_loveslices<'a>(
    &'a self,
    ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<Loveslice>, Self::Error>> + Send + 'a;

  // ── Conversations & spoken loveslices ─────────────────────────────────

  fn add_conversation(
    &self,
    input: NewConversation,
  ) -> impl Future<Output = Result<Conversation, Self::Error>> + Send + '_;

  fn get_conversation(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Conversation>, Self::Error>> + Send + '_;

  fn get_conversations<'a>(
    &'a self,
    ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<Conversation>, Self::Error>> + Send + 'a;

  /// Stamp a conversation's `ended_at` and return the updated row.
  /// Fails if the conversation is unknown.
  fn end_conversation(
    &self,
    id: Uuid,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<Conversation, Self::Error>> + Send + '_;

  fn add_spoken_loveslice(
    &self,
    input: NewSpokenLoveslice,
  ) -> impl Future<Output = Result<SpokenLoveslice, Self::Error>> + Send + '_;

  fn get_spoken_loveslice(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<SpokenLoveslice>, Self::Error>> + Send + '_;

  fn get_spoken_loveslices<'a>(
    &'a self,
    ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<SpokenLoveslice>, Self::Error>> + Send + 'a;

  // ── Journal ───────────────────────────────────────────────────────────

  fn add_journal_entry(
    &self,
    input: NewJournalEntry,
  ) -> impl Future<Output = Result<JournalEntry, Self::Error>> + Send + '_;

  /// Entries visible under `scope`, optionally narrowed by `filter`,
  /// ordered by creation time descending (ties broken by id, descending,
  /// for a stable order). This ordering is a contract callers depend on.
  fn list_journal_entries<'a>(
    &'a self,
    scope: &'a Visibility,
    filter: Option<&'a EntryFilter>,
  ) -> impl Future<Output = Result<Vec<JournalEntry>, Self::Error>> + Send + 'a;
}
