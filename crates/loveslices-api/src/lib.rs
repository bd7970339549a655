//! JSON HTTP API for the Loveslices journal.
//!
//! Exposes an axum [`Router`] backed by any
//! [`loveslices_core::store::JournalStore`]. TLS and deployment concerns are
//! the caller's responsibility; authentication is HTTP Basic against the
//! registered accounts.

pub mod auth;
pub mod conversations;
pub mod error;
pub mod journal;
pub mod prompts;
pub mod users;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use loveslices_core::store::JournalStore;
use serde::Deserialize;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: JournalStore> {
  pub store: Arc<S>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: JournalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Accounts & partners
    .route("/users", post(users::register::<S>))
    .route("/users/{id}", get(users::get_profile::<S>))
    .route("/me", get(users::me::<S>))
    .route("/me/picture", put(users::set_picture::<S>))
    .route("/invites", post(users::create_invite::<S>))
    .route("/invites/accept", post(users::accept_invite::<S>))
    .route("/partner", delete(users::unlink::<S>))
    // Prompts
    .route(
      "/questions",
      post(prompts::create_question::<S>),
    )
    .route("/questions/{id}", get(prompts::get_question::<S>))
    .route("/responses", post(prompts::submit_response::<S>))
    // Conversations
    .route("/conversations", post(conversations::start::<S>))
    .route("/conversations/{id}/end", post(conversations::end::<S>))
    // Journal
    .route("/journal/search", get(journal::search::<S>))
    .route("/journal/themes/{theme}", get(journal::by_theme::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::body::Body;
  use axum::http::{Request, StatusCode, header};
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use loveslices_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState { store: Arc::new(store) }
  }

  fn basic(email: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{email}:{pass}")))
  }

  async fn oneshot_raw(
    state:   AppState<SqliteStore>,
    method:  &str,
    uri:     &str,
    auth:    Option<&str>,
    body:    Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(a) = auth {
      builder = builder.header(header::AUTHORIZATION, a);
    }
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    router(state).oneshot(req).await.unwrap()
  }

  async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  /// Register an account and return its JSON body.
  async fn register(
    state: AppState<SqliteStore>,
    name: &str,
    email: &str,
    pass: &str,
  ) -> Value {
    let resp = oneshot_raw(
      state,
      "POST",
      "/users",
      None,
      Some(json!({ "name": name, "email": email, "password": pass })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
  }

  /// Register two accounts and link them through the invite flow.
  async fn register_couple(state: &AppState<SqliteStore>) -> (Value, Value) {
    let a = register(state.clone(), "Amara", "a@example.com", "pw-a").await;
    let b = register(state.clone(), "Bexley", "b@example.com", "pw-b").await;

    let auth_a = basic("a@example.com", "pw-a");
    let resp =
      oneshot_raw(state.clone(), "POST", "/invites", Some(&auth_a), None).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let invite = json_body(resp).await;

    let auth_b = basic("b@example.com", "pw-b");
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/invites/accept",
      Some(&auth_b),
      Some(json!({ "code": invite["code"] })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    (a, b)
  }

  // ── Accounts ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn register_returns_account_without_hash() {
    let state = make_state().await;
    let body = register(state, "Amara", "a@example.com", "pw").await;

    assert_eq!(body["name"], "Amara");
    assert_eq!(body["email"], "a@example.com");
    assert!(body.get("password_hash").is_none());
    assert!(body["partner_id"].is_null());
  }

  #[tokio::test]
  async fn duplicate_email_registration_conflicts() {
    let state = make_state().await;
    register(state.clone(), "Amara", "a@example.com", "pw").await;

    let resp = oneshot_raw(
      state,
      "POST",
      "/users",
      None,
      Some(json!({ "name": "Copy", "email": "a@example.com", "password": "x" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
  }

  #[tokio::test]
  async fn me_without_credentials_is_401_with_challenge() {
    let state = make_state().await;
    let resp = oneshot_raw(state, "GET", "/me", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn me_with_wrong_password_is_401() {
    let state = make_state().await;
    register(state.clone(), "Amara", "a@example.com", "pw").await;

    let auth = basic("a@example.com", "wrong");
    let resp = oneshot_raw(state, "GET", "/me", Some(&auth), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn me_with_credentials_returns_account() {
    let state = make_state().await;
    register(state.clone(), "Amara", "a@example.com", "pw").await;

    let auth = basic("a@example.com", "pw");
    let resp = oneshot_raw(state, "GET", "/me", Some(&auth), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["email"], "a@example.com");
  }

  #[tokio::test]
  async fn public_profile_omits_private_fields() {
    let state = make_state().await;
    let account = register(state.clone(), "Amara", "a@example.com", "pw").await;

    let uri = format!("/users/{}", account["user_id"].as_str().unwrap());
    let resp = oneshot_raw(state, "GET", &uri, None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["name"], "Amara");
    assert!(body.get("email").is_none());
  }

  #[tokio::test]
  async fn picture_update_comes_back_normalised() {
    let state = make_state().await;
    register(state.clone(), "Amara", "a@example.com", "pw").await;

    let auth = basic("a@example.com", "pw");
    let resp = oneshot_raw(
      state,
      "PUT",
      "/me/picture",
      Some(&auth),
      Some(json!({ "profile_picture": "amara.jpg" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(
      body["profile_picture"],
      "/uploads/profile_pictures/amara.jpg"
    );
  }

  // ── Pairing ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn invite_flow_links_partners() {
    let state = make_state().await;
    let (a, _b) = register_couple(&state).await;

    let auth_a = basic("a@example.com", "pw-a");
    let resp = oneshot_raw(state, "GET", "/me", Some(&auth_a), None).await;
    let me = json_body(resp).await;
    assert!(me["partner_id"].is_string());
    assert_ne!(me["partner_id"], a["user_id"]);
  }

  #[tokio::test]
  async fn unlink_clears_partner() {
    let state = make_state().await;
    register_couple(&state).await;

    let auth_a = basic("a@example.com", "pw-a");
    let resp =
      oneshot_raw(state.clone(), "DELETE", "/partner", Some(&auth_a), None)
        .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = oneshot_raw(state, "GET", "/me", Some(&auth_a), None).await;
    let me = json_body(resp).await;
    assert!(me["partner_id"].is_null());
  }

  // ── Prompts & journal ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn unknown_question_is_404() {
    let state = make_state().await;
    let resp = oneshot_raw(
      state,
      "GET",
      &format!("/questions/{}", uuid::Uuid::new_v4()),
      None,
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  /// Create a question and have both partners answer it.
  async fn answer_question_both(
    state: &AppState<SqliteStore>,
    content: &str,
    theme: &str,
    answers: [&str; 2],
  ) -> Value {
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/questions",
      None,
      Some(json!({ "content": content, "theme": theme })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let question = json_body(resp).await;

    let mut last = Value::Null;
    for (email, pass, answer) in [
      ("a@example.com", "pw-a", answers[0]),
      ("b@example.com", "pw-b", answers[1]),
    ] {
      let resp = oneshot_raw(
        state.clone(),
        "POST",
        "/responses",
        Some(&basic(email, pass)),
        Some(json!({ "question_id": question["question_id"], "content": answer })),
      )
      .await;
      assert_eq!(resp.status(), StatusCode::CREATED);
      last = json_body(resp).await;
    }
    last
  }

  #[tokio::test]
  async fn paired_answers_form_a_loveslice() {
    let state = make_state().await;
    register_couple(&state).await;

    let outcome = answer_question_both(
      &state,
      "What made you smile today?",
      "Gratitude",
      ["Morning coffee", "Your terrible pun"],
    )
    .await;

    assert!(outcome["formed"].is_object());
    assert_eq!(outcome["formed"]["entry"]["theme"], "Gratitude");
  }

  #[tokio::test]
  async fn journal_search_returns_enriched_entries() {
    let state = make_state().await;
    register_couple(&state).await;
    answer_question_both(
      &state,
      "What are you grateful for?",
      "Gratitude",
      ["Grateful Today", "Quiet mornings"],
    )
    .await;

    // Either partner sees the entry; substring match is case-insensitive.
    let auth_b = basic("b@example.com", "pw-b");
    let resp = oneshot_raw(
      state,
      "GET",
      "/journal/search?q=grateful",
      Some(&auth_b),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    let slice = &entries[0]["slice"];
    assert_eq!(slice["kind"], "written");
    assert_eq!(slice["responses"].as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn journal_theme_filter_is_exact() {
    let state = make_state().await;
    register_couple(&state).await;
    answer_question_both(
      &state,
      "Do we trust each other?",
      "Trust Issues",
      ["Yes", "Mostly"],
    )
    .await;

    let auth_a = basic("a@example.com", "pw-a");
    let resp = oneshot_raw(
      state.clone(),
      "GET",
      "/journal/themes/Trust",
      Some(&auth_a),
      None,
    )
    .await;
    let body = json_body(resp).await;
    assert!(body.as_array().unwrap().is_empty());

    let resp = oneshot_raw(
      state,
      "GET",
      "/journal/themes/Trust%20Issues",
      Some(&auth_a),
      None,
    )
    .await;
    let body = json_body(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
  }

  // ── Conversations ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn concluded_conversation_lands_in_journal() {
    let state = make_state().await;
    register_couple(&state).await;

    let auth_a = basic("a@example.com", "pw-a");
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/conversations",
      Some(&auth_a),
      Some(json!({ "topic": "Holiday plans" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let conversation = json_body(resp).await;

    let uri = format!(
      "/conversations/{}/end",
      conversation["conversation_id"].as_str().unwrap()
    );
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      &uri,
      Some(&auth_a),
      Some(json!({ "theme": "Future", "outcome": "Agreed on the coast" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = oneshot_raw(
      state,
      "GET",
      "/journal/search?q=coast",
      Some(&auth_a),
      None,
    )
    .await;
    let body = json_body(resp).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["slice"]["kind"], "spoken");
    assert_eq!(
      entries[0]["slice"]["conversation"]["topic"],
      "Holiday plans"
    );
  }

  #[tokio::test]
  async fn outsider_cannot_conclude_a_conversation() {
    let state = make_state().await;
    register_couple(&state).await;
    register(state.clone(), "Cyrus", "c@example.com", "pw-c").await;

    let auth_a = basic("a@example.com", "pw-a");
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/conversations",
      Some(&auth_a),
      Some(json!({ "topic": null })),
    )
    .await;
    let conversation = json_body(resp).await;

    let uri = format!(
      "/conversations/{}/end",
      conversation["conversation_id"].as_str().unwrap()
    );
    let resp = oneshot_raw(
      state,
      "POST",
      &uri,
      Some(&basic("c@example.com", "pw-c")),
      Some(json!({ "theme": "Future", "outcome": null })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
  }
}
