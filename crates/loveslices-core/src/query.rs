//! Journal queries: who can see what, and the enriched read models.
//!
//! Both public operations resolve the requesting user once, derive the
//! couple's [`Visibility`] scope from their partner link, fetch matching
//! entries newest first, and enrich each entry into a nested view.
//!
//! Enrichment is lenient: a dangling slice reference leaves the entry bare,
//! and a dangling nested reference leaves that sub-field `None`. One corrupt
//! row must not deny visibility into the rest of a couple's journal. Backend
//! failures, by contrast, abort the whole operation.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
  Error, Result,
  journal::{
    JournalEntry, JournalEntryView, ResponseSide, SliceRef, SliceView,
    SpokenView, WrittenView,
  },
  slice::Loveslice,
  store::{EntryFilter, JournalStore, Visibility},
  user::Profile,
};

// ─── Strategy ────────────────────────────────────────────────────────────────

/// How to resolve the nested records of a page of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Enrichment {
  /// Dependent point reads per entry. Fine at journal scale.
  #[default]
  Sequential,
  /// Collect referenced ids across the page, fetch each table once, and
  /// hash-join in memory. Same semantics, bounded number of queries.
  Batched,
}

// ─── Public operations ───────────────────────────────────────────────────────

/// Entries visible to `user_id` whose searchable content contains `query`
/// (case-insensitively), newest first, enriched.
///
/// An empty query matches every visible entry.
pub async fn search_journal_entries<S: JournalStore>(
  store: &S,
  user_id: Uuid,
  query: &str,
) -> Result<Vec<JournalEntryView>> {
  let filter = EntryFilter::Search(query.to_owned());
  query_journal(store, user_id, Some(filter), Enrichment::default()).await
}

/// Entries visible to `user_id` whose theme equals `theme` exactly
/// (not a substring match), newest first, enriched.
pub async fn journal_entries_by_theme<S: JournalStore>(
  store: &S,
  user_id: Uuid,
  theme: &str,
) -> Result<Vec<JournalEntryView>> {
  let filter = EntryFilter::Theme(theme.to_owned());
  query_journal(store, user_id, Some(filter), Enrichment::default()).await
}

/// The general form: optional filter, explicit enrichment strategy.
///
/// Fails with [`Error::UserNotFound`] if the requesting user does not exist.
pub async fn query_journal<S: JournalStore>(
  store: &S,
  user_id: Uuid,
  filter: Option<EntryFilter>,
  enrichment: Enrichment,
) -> Result<Vec<JournalEntryView>> {
  // The partner lookup happens once per request, not per entry.
  let user = store
    .get_user(user_id)
    .await
    .map_err(Error::storage)?
    .ok_or(Error::UserNotFound(user_id))?;
  let scope = Visibility::of(&user);

  let entries = store
    .list_journal_entries(&scope, filter.as_ref())
    .await
    .map_err(Error::storage)?;

  match enrichment {
    Enrichment::Sequential => {
      let mut views = Vec::with_capacity(entries.len());
      for entry in entries {
        views.push(enrich_entry(store, entry).await?);
      }
      Ok(views)
    }
    Enrichment::Batched => enrich_entries_batched(store, entries).await,
  }
}

// ─── Sequential enrichment ───────────────────────────────────────────────────

/// Resolve one entry's slice reference into its nested view.
pub async fn enrich_entry<S: JournalStore>(
  store: &S,
  entry: JournalEntry,
) -> Result<JournalEntryView> {
  let slice = match entry.slice {
    Some(SliceRef::Written(id)) => {
      match store.get_loveslice(id).await.map_err(Error::storage)? {
        Some(slice) => Some(SliceView::Written(written_view(store, slice).await?)),
        None => None,
      }
    }
    Some(SliceRef::Spoken(id)) => {
      match store.get_spoken_loveslice(id).await.map_err(Error::storage)? {
        Some(slice) => {
          let conversation = store
            .get_conversation(slice.conversation_id)
            .await
            .map_err(Error::storage)?;
          Some(SliceView::Spoken(SpokenView { slice, conversation }))
        }
        None => None,
      }
    }
    None => None,
  };

  Ok(JournalEntryView { entry, slice })
}

async fn written_view<S: JournalStore>(
  store: &S,
  slice: Loveslice,
) -> Result<WrittenView> {
  let question = store
    .get_question(slice.question_id)
    .await
    .map_err(Error::storage)?;

  let response1 = store
    .get_response(slice.response1_id)
    .await
    .map_err(Error::storage)?;
  let response2 = store
    .get_response(slice.response2_id)
    .await
    .map_err(Error::storage)?;

  let author1 = store
    .get_user(slice.user1_id)
    .await
    .map_err(Error::storage)?
    .map(|u| u.profile());
  let author2 = store
    .get_user(slice.user2_id)
    .await
    .map_err(Error::storage)?
    .map(|u| u.profile());

  Ok(WrittenView {
    slice,
    question,
    responses: [
      ResponseSide { response: response1, author: author1 },
      ResponseSide { response: response2, author: author2 },
    ],
  })
}

// ─── Batched enrichment ──────────────────────────────────────────────────────

async fn enrich_entries_batched<S: JournalStore>(
  store: &S,
  entries: Vec<JournalEntry>,
) -> Result<Vec<JournalEntryView>> {
  // Round one: the slice rows themselves.
  let mut written_ids = Vec::new();
  let mut spoken_ids = Vec::new();
  for entry in &entries {
    match entry.slice {
      Some(SliceRef::Written(id)) => written_ids.push(id),
      Some(SliceRef::Spoken(id)) => spoken_ids.push(id),
      None => {}
    }
  }

  let written: HashMap<Uuid, Loveslice> = store
    .get_loveslices(&written_ids)
    .await
    .map_err(Error::storage)?
    .into_iter()
    .map(|s| (s.loveslice_id, s))
    .collect();
  let spoken: HashMap<Uuid, _> = store
    .get_spoken_loveslices(&spoken_ids)
    .await
    .map_err(Error::storage)?
    .into_iter()
    .map(|s| (s.spoken_loveslice_id, s))
    .collect();

  // Round two: everything the resolved slices reference.
  let mut question_ids = Vec::new();
  let mut response_ids = Vec::new();
  let mut user_ids = Vec::new();
  for s in written.values() {
    question_ids.push(s.question_id);
    response_ids.extend([s.response1_id, s.response2_id]);
    user_ids.extend([s.user1_id, s.user2_id]);
  }
  let conversation_ids: Vec<Uuid> =
    spoken.values().map(|s| s.conversation_id).collect();

  let questions: HashMap<Uuid, _> = store
    .get_questions(&question_ids)
    .await
    .map_err(Error::storage)?
    .into_iter()
    .map(|q| (q.question_id, q))
    .collect();
  let responses: HashMap<Uuid, _> = store
    .get_responses(&response_ids)
    .await
    .map_err(Error::storage)?
    .into_iter()
    .map(|r| (r.response_id, r))
    .collect();
  let authors: HashMap<Uuid, Profile> = store
    .get_users(&user_ids)
    .await
    .map_err(Error::storage)?
    .into_iter()
    .map(|u| (u.user_id, u.profile()))
    .collect();
  let conversations: HashMap<Uuid, _> = store
    .get_conversations(&conversation_ids)
    .await
    .map_err(Error::storage)?
    .into_iter()
    .map(|c| (c.conversation_id, c))
    .collect();

  // Hash-join. Missing rows degrade exactly as in the sequential path.
  let views = entries
    .into_iter()
    .map(|entry| {
      let slice = match entry.slice {
        Some(SliceRef::Written(id)) => written.get(&id).map(|s| {
          SliceView::Written(WrittenView {
            slice:     s.clone(),
            question:  questions.get(&s.question_id).cloned(),
            responses: [
              ResponseSide {
                response: responses.get(&s.response1_id).cloned(),
                author:   authors.get(&s.user1_id).cloned(),
              },
              ResponseSide {
                response: responses.get(&s.response2_id).cloned(),
                author:   authors.get(&s.user2_id).cloned(),
              },
            ],
          })
        }),
        Some(SliceRef::Spoken(id)) => spoken.get(&id).map(|s| {
          SliceView::Spoken(SpokenView {
            slice:        s.clone(),
            conversation: conversations.get(&s.conversation_id).cloned(),
          })
        }),
        None => None,
      };
      JournalEntryView { entry, slice }
    })
    .collect();

  Ok(views)
}
