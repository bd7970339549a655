//! Write-side flows: partner links, loveslice formation, spoken slices.
//!
//! Every flow here is a precondition check followed by dependent writes
//! against the store primitives. The store itself enforces nothing about
//! reciprocity or pairing rules; this module is the only writer of them.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  journal::{JournalEntry, NewJournalEntry, SliceRef},
  prompt::{NewResponse, Question, Response},
  slice::{Conversation, Loveslice, NewLoveslice, NewSpokenLoveslice, SpokenLoveslice},
  store::JournalStore,
  user::{NewInvite, NewUser, PartnerInvite, User},
};

// ─── Accounts ────────────────────────────────────────────────────────────────

/// Register a new account. The caller supplies the argon2 hash; passwords
/// never reach this layer in the clear.
pub async fn register<S: JournalStore>(
  store: &S,
  input: NewUser,
) -> Result<User> {
  let existing = store
    .get_user_by_email(&input.email)
    .await
    .map_err(Error::storage)?;
  if existing.is_some() {
    return Err(Error::EmailTaken(input.email));
  }

  store.add_user(input).await.map_err(Error::storage)
}

// ─── Partner invites ─────────────────────────────────────────────────────────

/// Create a partner invite for `inviter_id` with a caller-supplied code.
///
/// The code's entropy is the transport layer's responsibility; this flow
/// only checks that the inviter exists and is not already partnered.
pub async fn invite_partner<S: JournalStore>(
  store: &S,
  inviter_id: Uuid,
  code: String,
) -> Result<PartnerInvite> {
  let inviter = store
    .get_user(inviter_id)
    .await
    .map_err(Error::storage)?
    .ok_or(Error::UserNotFound(inviter_id))?;
  if inviter.partner_id.is_some() {
    return Err(Error::AlreadyPartnered(inviter_id));
  }

  store
    .add_invite(NewInvite { code, inviter_id })
    .await
    .map_err(Error::storage)
}

/// Accept an invite, linking inviter and accepter reciprocally.
///
/// Rejects used codes, self-acceptance, and users already partnered on
/// either side. Returns both updated records, inviter first.
pub async fn accept_invite<S: JournalStore>(
  store: &S,
  code: &str,
  accepter_id: Uuid,
) -> Result<(User, User)> {
  let invite = store
    .get_invite(code)
    .await
    .map_err(Error::storage)?
    .ok_or_else(|| Error::InviteNotFound(code.to_owned()))?;
  if invite.accepted_at.is_some() {
    return Err(Error::InviteAlreadyAccepted(code.to_owned()));
  }
  if invite.inviter_id == accepter_id {
    return Err(Error::SelfPartnering);
  }

  let mut inviter = store
    .get_user(invite.inviter_id)
    .await
    .map_err(Error::storage)?
    .ok_or(Error::UserNotFound(invite.inviter_id))?;
  let mut accepter = store
    .get_user(accepter_id)
    .await
    .map_err(Error::storage)?
    .ok_or(Error::UserNotFound(accepter_id))?;

  if inviter.partner_id.is_some() {
    return Err(Error::AlreadyPartnered(inviter.user_id));
  }
  if accepter.partner_id.is_some() {
    return Err(Error::AlreadyPartnered(accepter.user_id));
  }

  store
    .set_partner(inviter.user_id, Some(accepter.user_id))
    .await
    .map_err(Error::storage)?;
  store
    .set_partner(accepter.user_id, Some(inviter.user_id))
    .await
    .map_err(Error::storage)?;
  store
    .mark_invite_accepted(code, Utc::now())
    .await
    .map_err(Error::storage)?;

  inviter.partner_id = Some(accepter.user_id);
  accepter.partner_id = Some(inviter.user_id);
  Ok((inviter, accepter))
}

/// Dissolve a partner link from either side. Clears both records.
pub async fn unlink_partners<S: JournalStore>(
  store: &S,
  user_id: Uuid,
) -> Result<()> {
  let user = store
    .get_user(user_id)
    .await
    .map_err(Error::storage)?
    .ok_or(Error::UserNotFound(user_id))?;
  let partner_id = user.partner_id.ok_or(Error::NotPartnered(user_id))?;

  store
    .set_partner(user_id, None)
    .await
    .map_err(Error::storage)?;
  store
    .set_partner(partner_id, None)
    .await
    .map_err(Error::storage)
}

// ─── Written loveslices ──────────────────────────────────────────────────────

/// A written loveslice plus the journal entry appended with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormedSlice {
  pub loveslice: Loveslice,
  pub entry:     JournalEntry,
}

/// What came of recording a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseOutcome {
  pub response: Response,
  /// Present when this response completed the pair.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub formed:   Option<FormedSlice>,
}

/// Record a response; when it completes the pair, form the loveslice and
/// append the couple's journal entry.
///
/// The earlier answer becomes side 1 of the slice, the new one side 2.
pub async fn submit_response<S: JournalStore>(
  store: &S,
  input: NewResponse,
) -> Result<ResponseOutcome> {
  let question = store
    .get_question(input.question_id)
    .await
    .map_err(Error::storage)?
    .ok_or(Error::QuestionNotFound(input.question_id))?;
  let author = store
    .get_user(input.user_id)
    .await
    .map_err(Error::storage)?
    .ok_or(Error::UserNotFound(input.user_id))?;

  let already = store
    .find_response(question.question_id, author.user_id)
    .await
    .map_err(Error::storage)?;
  if already.is_some() {
    return Err(Error::AlreadyAnswered {
      user:     author.user_id,
      question: question.question_id,
    });
  }

  let response = store.add_response(input).await.map_err(Error::storage)?;

  let Some(partner_id) = author.partner_id else {
    return Ok(ResponseOutcome { response, formed: None });
  };
  let Some(partner_response) = store
    .find_response(question.question_id, partner_id)
    .await
    .map_err(Error::storage)?
  else {
    return Ok(ResponseOutcome { response, formed: None });
  };

  let loveslice = store
    .add_loveslice(NewLoveslice {
      question_id:  question.question_id,
      user1_id:     partner_id,
      user2_id:     author.user_id,
      response1_id: partner_response.response_id,
      response2_id: response.response_id,
    })
    .await
    .map_err(Error::storage)?;

  let entry = store
    .add_journal_entry(NewJournalEntry {
      user1_id:           loveslice.user1_id,
      user2_id:           loveslice.user2_id,
      slice:              SliceRef::Written(loveslice.loveslice_id),
      theme:              question.theme.clone(),
      searchable_content: written_search_text(
        &question,
        &partner_response,
        &response,
      ),
    })
    .await
    .map_err(Error::storage)?;

  Ok(ResponseOutcome {
    response,
    formed: Some(FormedSlice { loveslice, entry }),
  })
}

// ─── Spoken loveslices ───────────────────────────────────────────────────────

/// A spoken loveslice, the conversation it concluded, and the journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpokenOutcome {
  pub conversation: Conversation,
  pub loveslice:    SpokenLoveslice,
  pub entry:        JournalEntry,
}

/// Conclude a conversation into a spoken loveslice and journal entry.
///
/// `recorded_by` must be the conversation's initiator or their partner; the
/// initiator must be partnered, since a slice always pairs two users.
pub async fn record_spoken_loveslice<S: JournalStore>(
  store: &S,
  conversation_id: Uuid,
  recorded_by: Uuid,
  theme: String,
  outcome: Option<String>,
) -> Result<SpokenOutcome> {
  let conversation = store
    .get_conversation(conversation_id)
    .await
    .map_err(Error::storage)?
    .ok_or(Error::ConversationNotFound(conversation_id))?;
  if conversation.ended_at.is_some() {
    return Err(Error::ConversationEnded(conversation_id));
  }

  let initiator = store
    .get_user(conversation.initiator_id)
    .await
    .map_err(Error::storage)?
    .ok_or(Error::UserNotFound(conversation.initiator_id))?;
  let partner_id = initiator
    .partner_id
    .ok_or(Error::NotPartnered(initiator.user_id))?;

  if recorded_by != initiator.user_id && recorded_by != partner_id {
    return Err(Error::NotParticipant {
      user:         recorded_by,
      conversation: conversation_id,
    });
  }

  let conversation = store
    .end_conversation(conversation_id, Utc::now())
    .await
    .map_err(Error::storage)?;

  let loveslice = store
    .add_spoken_loveslice(NewSpokenLoveslice {
      conversation_id,
      user1_id: initiator.user_id,
      user2_id: partner_id,
      theme: theme.clone(),
      outcome: outcome.clone(),
    })
    .await
    .map_err(Error::storage)?;

  let entry = store
    .add_journal_entry(NewJournalEntry {
      user1_id:           loveslice.user1_id,
      user2_id:           loveslice.user2_id,
      slice:              SliceRef::Spoken(loveslice.spoken_loveslice_id),
      theme:              loveslice.theme.clone(),
      searchable_content: spoken_search_text(&conversation, outcome.as_deref()),
    })
    .await
    .map_err(Error::storage)?;

  Ok(SpokenOutcome { conversation, loveslice, entry })
}

// ─── Searchable content ──────────────────────────────────────────────────────

/// The denormalised haystack for a written entry: prompt plus both answers.
fn written_search_text(
  question: &Question,
  response1: &Response,
  response2: &Response,
) -> String {
  format!(
    "{} {} {}",
    question.content, response1.content, response2.content
  )
}

/// The denormalised haystack for a spoken entry: topic plus outcome.
fn spoken_search_text(
  conversation: &Conversation,
  outcome: Option<&str>,
) -> String {
  let mut parts: Vec<&str> = Vec::new();
  if let Some(topic) = conversation.topic.as_deref() {
    parts.push(topic);
  }
  if let Some(outcome) = outcome {
    parts.push(outcome);
  }
  parts.join(" ")
}
