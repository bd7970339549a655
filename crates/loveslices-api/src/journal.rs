//! Handlers for the journal query endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/journal/search?q=...` | Free-text; empty or absent `q` matches all |
//! | `GET`  | `/journal/themes/:theme` | Exact theme match |
//!
//! The authenticated account is the requesting user; results are the
//! couple's entries, newest first, enriched.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;

use loveslices_core::{journal::JournalEntryView, query, store::JournalStore};

use crate::{AppState, auth::Authenticated, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Case-insensitive substring over the entries' searchable content.
  pub q: Option<String>,
}

/// `GET /journal/search[?q=...]`
pub async fn search<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<JournalEntryView>>, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let entries = query::search_journal_entries(
    state.store.as_ref(),
    user.user_id,
    params.q.as_deref().unwrap_or(""),
  )
  .await?;
  Ok(Json(entries))
}

/// `GET /journal/themes/:theme`
pub async fn by_theme<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
  Path(theme): Path<String>,
) -> Result<Json<Vec<JournalEntryView>>, ApiError>
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let entries =
    query::journal_entries_by_theme(state.store.as_ref(), user.user_id, &theme)
      .await?;
  Ok(Json(entries))
}
