//! Integration tests for `SqliteStore` against an in-memory database, plus
//! the query and pairing services running over it.

use std::time::Duration;

use loveslices_core::{
  Error as CoreError, pairing,
  prompt::{NewQuestion, NewResponse},
  query::{self, Enrichment},
  journal::{NewJournalEntry, SliceRef, SliceView},
  slice::NewConversation,
  store::{EntryFilter, JournalStore, Visibility},
  user::NewUser,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_user(name: &str, email: &str) -> NewUser {
  NewUser {
    name:            name.into(),
    email:           email.into(),
    password_hash:   "$argon2id$stub".into(),
    profile_picture: None,
  }
}

/// Two users linked as partners directly through the store primitives.
async fn couple(s: &SqliteStore) -> (loveslices_core::user::User, loveslices_core::user::User) {
  let a = s.add_user(new_user("Amara", "amara@example.com")).await.unwrap();
  let b = s.add_user(new_user("Bexley", "bexley@example.com")).await.unwrap();
  s.set_partner(a.user_id, Some(b.user_id)).await.unwrap();
  s.set_partner(b.user_id, Some(a.user_id)).await.unwrap();
  let a = s.get_user(a.user_id).await.unwrap().unwrap();
  let b = s.get_user(b.user_id).await.unwrap().unwrap();
  (a, b)
}

/// Let the wall clock advance so `created_at` ordering is unambiguous.
async fn tick() {
  tokio::time::sleep(Duration::from_millis(5)).await;
}

// ─── Slice-ref decoding ──────────────────────────────────────────────────────

#[test]
fn slice_ref_prefers_written_when_both_columns_set() {
  use crate::encode::{decode_slice_ref, encode_uuid};

  let written = Uuid::new_v4();
  let spoken = Uuid::new_v4();
  let decoded = decode_slice_ref(
    Some(&encode_uuid(written)),
    Some(&encode_uuid(spoken)),
  )
  .unwrap();
  assert_eq!(decoded, Some(SliceRef::Written(written)));

  assert_eq!(decode_slice_ref(None, None).unwrap(), None);
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_user() {
  let s = store().await;

  let user = s.add_user(new_user("Amara", "amara@example.com")).await.unwrap();
  assert_eq!(user.name, "Amara");
  assert!(user.partner_id.is_none());

  let fetched = s.get_user(user.user_id).await.unwrap().unwrap();
  assert_eq!(fetched.user_id, user.user_id);
  assert_eq!(fetched.email, "amara@example.com");
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_rejected() {
  let s = store().await;
  s.add_user(new_user("Amara", "amara@example.com")).await.unwrap();

  let err = s
    .add_user(new_user("Impostor", "amara@example.com"))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::EmailTaken(_)));
}

#[tokio::test]
async fn get_user_by_email() {
  let s = store().await;
  let user = s.add_user(new_user("Amara", "amara@example.com")).await.unwrap();

  let found = s.get_user_by_email("amara@example.com").await.unwrap().unwrap();
  assert_eq!(found.user_id, user.user_id);

  assert!(s.get_user_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn get_users_skips_missing_ids() {
  let s = store().await;
  let a = s.add_user(new_user("Amara", "a@example.com")).await.unwrap();
  let b = s.add_user(new_user("Bexley", "b@example.com")).await.unwrap();

  let got = s
    .get_users(&[a.user_id, Uuid::new_v4(), b.user_id])
    .await
    .unwrap();
  assert_eq!(got.len(), 2);
}

#[tokio::test]
async fn set_partner_unknown_user_errors() {
  let s = store().await;
  let err = s.set_partner(Uuid::new_v4(), None).await.unwrap_err();
  assert!(matches!(err, crate::Error::UserNotFound(_)));
}

// ─── Invites & pairing ───────────────────────────────────────────────────────

#[tokio::test]
async fn invite_and_accept_links_both_sides() {
  let s = store().await;
  let a = s.add_user(new_user("Amara", "a@example.com")).await.unwrap();
  let b = s.add_user(new_user("Bexley", "b@example.com")).await.unwrap();

  let invite = pairing::invite_partner(&s, a.user_id, "c0de".into())
    .await
    .unwrap();
  assert_eq!(invite.inviter_id, a.user_id);
  assert!(invite.accepted_at.is_none());

  let (inviter, accepter) =
    pairing::accept_invite(&s, "c0de", b.user_id).await.unwrap();
  assert_eq!(inviter.partner_id, Some(b.user_id));
  assert_eq!(accepter.partner_id, Some(a.user_id));

  // Persisted, not just returned.
  let a = s.get_user(a.user_id).await.unwrap().unwrap();
  assert_eq!(a.partner_id, Some(b.user_id));
  let invite = s.get_invite("c0de").await.unwrap().unwrap();
  assert!(invite.accepted_at.is_some());
}

#[tokio::test]
async fn invite_accepted_twice_rejected() {
  let s = store().await;
  let a = s.add_user(new_user("Amara", "a@example.com")).await.unwrap();
  let b = s.add_user(new_user("Bexley", "b@example.com")).await.unwrap();
  let c = s.add_user(new_user("Cyrus", "c@example.com")).await.unwrap();

  pairing::invite_partner(&s, a.user_id, "c0de".into()).await.unwrap();
  pairing::accept_invite(&s, "c0de", b.user_id).await.unwrap();

  let err = pairing::accept_invite(&s, "c0de", c.user_id).await.unwrap_err();
  assert!(matches!(err, CoreError::InviteAlreadyAccepted(_)));
}

#[tokio::test]
async fn invite_self_acceptance_rejected() {
  let s = store().await;
  let a = s.add_user(new_user("Amara", "a@example.com")).await.unwrap();

  pairing::invite_partner(&s, a.user_id, "c0de".into()).await.unwrap();
  let err = pairing::accept_invite(&s, "c0de", a.user_id).await.unwrap_err();
  assert!(matches!(err, CoreError::SelfPartnering));
}

#[tokio::test]
async fn partnered_inviter_rejected() {
  let s = store().await;
  let (a, _b) = couple(&s).await;

  let err = pairing::invite_partner(&s, a.user_id, "c0de".into())
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::AlreadyPartnered(_)));
}

#[tokio::test]
async fn unknown_invite_code_rejected() {
  let s = store().await;
  let b = s.add_user(new_user("Bexley", "b@example.com")).await.unwrap();

  let err = pairing::accept_invite(&s, "nope", b.user_id).await.unwrap_err();
  assert!(matches!(err, CoreError::InviteNotFound(_)));
}

#[tokio::test]
async fn unlink_clears_both_sides() {
  let s = store().await;
  let (a, b) = couple(&s).await;

  pairing::unlink_partners(&s, a.user_id).await.unwrap();

  assert!(s.get_user(a.user_id).await.unwrap().unwrap().partner_id.is_none());
  assert!(s.get_user(b.user_id).await.unwrap().unwrap().partner_id.is_none());
}

#[tokio::test]
async fn unlink_unpartnered_errors() {
  let s = store().await;
  let a = s.add_user(new_user("Amara", "a@example.com")).await.unwrap();

  let err = pairing::unlink_partners(&s, a.user_id).await.unwrap_err();
  assert!(matches!(err, CoreError::NotPartnered(_)));
}

// ─── Responses & loveslice formation ─────────────────────────────────────────

#[tokio::test]
async fn first_response_forms_nothing() {
  let s = store().await;
  let (a, _b) = couple(&s).await;
  let q = s
    .add_question(NewQuestion {
      content: "What made you smile today?".into(),
      theme:   "Gratitude".into(),
    })
    .await
    .unwrap();

  let outcome = pairing::submit_response(
    &s,
    NewResponse {
      question_id: q.question_id,
      user_id:     a.user_id,
      content:     "Morning coffee together".into(),
    },
  )
  .await
  .unwrap();

  assert!(outcome.formed.is_none());
}

#[tokio::test]
async fn second_response_forms_loveslice_and_entry() {
  let s = store().await;
  let (a, b) = couple(&s).await;
  let q = s
    .add_question(NewQuestion {
      content: "What made you smile today?".into(),
      theme:   "Gratitude".into(),
    })
    .await
    .unwrap();

  pairing::submit_response(
    &s,
    NewResponse {
      question_id: q.question_id,
      user_id:     a.user_id,
      content:     "Morning coffee together".into(),
    },
  )
  .await
  .unwrap();

  let outcome = pairing::submit_response(
    &s,
    NewResponse {
      question_id: q.question_id,
      user_id:     b.user_id,
      content:     "Your terrible pun at lunch".into(),
    },
  )
  .await
  .unwrap();

  let formed = outcome.formed.expect("second answer completes the pair");

  // The earlier answer is side 1.
  assert_eq!(formed.loveslice.user1_id, a.user_id);
  assert_eq!(formed.loveslice.user2_id, b.user_id);
  assert_eq!(formed.loveslice.question_id, q.question_id);

  assert_eq!(formed.entry.theme, "Gratitude");
  assert_eq!(
    formed.entry.slice,
    Some(SliceRef::Written(formed.loveslice.loveslice_id))
  );
  assert!(formed.entry.searchable_content.contains("smile"));
  assert!(formed.entry.searchable_content.contains("coffee"));
  assert!(formed.entry.searchable_content.contains("pun"));
}

#[tokio::test]
async fn answering_twice_rejected() {
  let s = store().await;
  let (a, _b) = couple(&s).await;
  let q = s
    .add_question(NewQuestion {
      content: "What made you smile today?".into(),
      theme:   "Gratitude".into(),
    })
    .await
    .unwrap();

  let input = NewResponse {
    question_id: q.question_id,
    user_id:     a.user_id,
    content:     "Coffee".into(),
  };
  pairing::submit_response(&s, input.clone()).await.unwrap();

  let err = pairing::submit_response(&s, input).await.unwrap_err();
  assert!(matches!(err, CoreError::AlreadyAnswered { .. }));
}

#[tokio::test]
async fn unpartnered_answers_never_pair() {
  let s = store().await;
  let a = s.add_user(new_user("Amara", "a@example.com")).await.unwrap();
  let b = s.add_user(new_user("Bexley", "b@example.com")).await.unwrap();
  let q = s
    .add_question(NewQuestion {
      content: "What made you smile today?".into(),
      theme:   "Gratitude".into(),
    })
    .await
    .unwrap();

  for user in [&a, &b] {
    let outcome = pairing::submit_response(
      &s,
      NewResponse {
        question_id: q.question_id,
        user_id:     user.user_id,
        content:     "Something".into(),
      },
    )
    .await
    .unwrap();
    assert!(outcome.formed.is_none());
  }
}

// ─── Conversations & spoken loveslices ───────────────────────────────────────

#[tokio::test]
async fn recording_spoken_slice_ends_conversation_and_appends_entry() {
  let s = store().await;
  let (a, b) = couple(&s).await;

  let conversation = s
    .add_conversation(NewConversation {
      initiator_id: a.user_id,
      topic:        Some("Holiday plans".into()),
    })
    .await
    .unwrap();

  let outcome = pairing::record_spoken_loveslice(
    &s,
    conversation.conversation_id,
    b.user_id,
    "Future".into(),
    Some("Agreed on the coast".into()),
  )
  .await
  .unwrap();

  assert!(outcome.conversation.ended_at.is_some());
  assert_eq!(outcome.loveslice.user1_id, a.user_id);
  assert_eq!(outcome.loveslice.user2_id, b.user_id);
  assert_eq!(
    outcome.entry.slice,
    Some(SliceRef::Spoken(outcome.loveslice.spoken_loveslice_id))
  );
  assert!(outcome.entry.searchable_content.contains("Holiday plans"));
  assert!(outcome.entry.searchable_content.contains("coast"));
}

#[tokio::test]
async fn spoken_slice_requires_partner() {
  let s = store().await;
  let a = s.add_user(new_user("Amara", "a@example.com")).await.unwrap();
  let conversation = s
    .add_conversation(NewConversation { initiator_id: a.user_id, topic: None })
    .await
    .unwrap();

  let err = pairing::record_spoken_loveslice(
    &s,
    conversation.conversation_id,
    a.user_id,
    "Future".into(),
    None,
  )
  .await
  .unwrap_err();
  assert!(matches!(err, CoreError::NotPartnered(_)));
}

#[tokio::test]
async fn spoken_slice_by_outsider_rejected() {
  let s = store().await;
  let (a, _b) = couple(&s).await;
  let outsider = s.add_user(new_user("Cyrus", "c@example.com")).await.unwrap();

  let conversation = s
    .add_conversation(NewConversation { initiator_id: a.user_id, topic: None })
    .await
    .unwrap();

  let err = pairing::record_spoken_loveslice(
    &s,
    conversation.conversation_id,
    outsider.user_id,
    "Future".into(),
    None,
  )
  .await
  .unwrap_err();
  assert!(matches!(err, CoreError::NotParticipant { .. }));
}

#[tokio::test]
async fn concluding_twice_rejected() {
  let s = store().await;
  let (a, _b) = couple(&s).await;
  let conversation = s
    .add_conversation(NewConversation { initiator_id: a.user_id, topic: None })
    .await
    .unwrap();

  pairing::record_spoken_loveslice(
    &s,
    conversation.conversation_id,
    a.user_id,
    "Future".into(),
    None,
  )
  .await
  .unwrap();

  let err = pairing::record_spoken_loveslice(
    &s,
    conversation.conversation_id,
    a.user_id,
    "Future".into(),
    None,
  )
  .await
  .unwrap_err();
  assert!(matches!(err, CoreError::ConversationEnded(_)));
}

// ─── Journal listing ─────────────────────────────────────────────────────────

/// Append a bare entry for a couple with the given theme and haystack.
async fn seed_entry(
  s: &SqliteStore,
  user1: Uuid,
  user2: Uuid,
  theme: &str,
  searchable: &str,
) -> loveslices_core::journal::JournalEntry {
  s.add_journal_entry(NewJournalEntry {
    user1_id:           user1,
    user2_id:           user2,
    slice:              SliceRef::Written(Uuid::new_v4()),
    theme:              theme.into(),
    searchable_content: searchable.into(),
  })
  .await
  .unwrap()
}

#[tokio::test]
async fn entries_come_back_newest_first() {
  let s = store().await;
  let (a, b) = couple(&s).await;

  let first = seed_entry(&s, a.user_id, b.user_id, "Trust", "one").await;
  tick().await;
  let second = seed_entry(&s, a.user_id, b.user_id, "Trust", "two").await;
  tick().await;
  let third = seed_entry(&s, a.user_id, b.user_id, "Trust", "three").await;

  let entries = s
    .list_journal_entries(&Visibility::of(&a), None)
    .await
    .unwrap();

  let ids: Vec<Uuid> = entries.iter().map(|e| e.entry_id).collect();
  assert_eq!(ids, vec![third.entry_id, second.entry_id, first.entry_id]);
  for pair in entries.windows(2) {
    assert!(pair[0].created_at >= pair[1].created_at);
  }
}

#[tokio::test]
async fn solo_visibility_excludes_other_couples() {
  let s = store().await;
  let (a, b) = couple(&s).await;
  let stranger = s.add_user(new_user("Cyrus", "c@example.com")).await.unwrap();

  seed_entry(&s, a.user_id, b.user_id, "Trust", "theirs").await;
  let mine =
    seed_entry(&s, stranger.user_id, stranger.user_id, "Trust", "mine").await;

  let entries = s
    .list_journal_entries(&Visibility::solo(stranger.user_id), None)
    .await
    .unwrap();
  assert_eq!(entries.len(), 1);
  assert_eq!(entries[0].entry_id, mine.entry_id);
}

#[tokio::test]
async fn partnered_visibility_spans_both_identities() {
  let s = store().await;
  let (a, b) = couple(&s).await;

  // One entry where the partner appears only in the second column.
  seed_entry(&s, b.user_id, b.user_id, "Trust", "partner-only").await;
  seed_entry(&s, a.user_id, b.user_id, "Trust", "shared").await;

  let entries = s
    .list_journal_entries(&Visibility::of(&a), None)
    .await
    .unwrap();
  assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn theme_filter_is_exact_not_substring() {
  let s = store().await;
  let (a, b) = couple(&s).await;

  seed_entry(&s, a.user_id, b.user_id, "Trust Issues", "x").await;
  let wanted = seed_entry(&s, a.user_id, b.user_id, "Trust", "y").await;

  let entries = s
    .list_journal_entries(
      &Visibility::of(&a),
      Some(&EntryFilter::Theme("Trust".into())),
    )
    .await
    .unwrap();
  assert_eq!(entries.len(), 1);
  assert_eq!(entries[0].entry_id, wanted.entry_id);
}

#[tokio::test]
async fn search_filter_is_case_insensitive_substring() {
  let s = store().await;
  let (a, b) = couple(&s).await;

  seed_entry(&s, a.user_id, b.user_id, "Gratitude", "Grateful Today for rain").await;
  seed_entry(&s, a.user_id, b.user_id, "Gratitude", "unrelated").await;

  let entries = s
    .list_journal_entries(
      &Visibility::of(&a),
      Some(&EntryFilter::Search("grateful".into())),
    )
    .await
    .unwrap();
  assert_eq!(entries.len(), 1);
  assert!(entries[0].searchable_content.contains("Grateful Today"));
}

#[tokio::test]
async fn empty_search_matches_everything_visible() {
  let s = store().await;
  let (a, b) = couple(&s).await;

  seed_entry(&s, a.user_id, b.user_id, "Trust", "one").await;
  seed_entry(&s, a.user_id, b.user_id, "Trust", "two").await;

  let entries = s
    .list_journal_entries(
      &Visibility::of(&a),
      Some(&EntryFilter::Search(String::new())),
    )
    .await
    .unwrap();
  assert_eq!(entries.len(), 2);
}

// ─── Query service ───────────────────────────────────────────────────────────

#[tokio::test]
async fn querying_as_unknown_user_errors() {
  let s = store().await;
  let err = query::search_journal_entries(&s, Uuid::new_v4(), "")
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::UserNotFound(_)));
}

#[tokio::test]
async fn empty_search_returns_couples_entries_newest_first() {
  let s = store().await;
  let (a, b) = couple(&s).await;

  let older = seed_entry(&s, a.user_id, a.user_id, "Trust", "from a").await;
  tick().await;
  let newer = seed_entry(&s, b.user_id, b.user_id, "Trust", "from b").await;

  // Either partner sees both, the more recent one first.
  let views = query::search_journal_entries(&s, a.user_id, "").await.unwrap();
  let ids: Vec<Uuid> = views.iter().map(|v| v.entry.entry_id).collect();
  assert_eq!(ids, vec![newer.entry_id, older.entry_id]);
}

#[tokio::test]
async fn written_entries_enrich_with_two_sides_and_rooted_pictures() {
  let s = store().await;
  let (a, b) = couple(&s).await;
  // One picture stored as a bare filename, one already rooted.
  s.set_profile_picture(a.user_id, Some("amara.jpg".into()))
    .await
    .unwrap();
  s.set_profile_picture(
    b.user_id,
    Some("/uploads/profile_pictures/bexley.png".into()),
  )
  .await
  .unwrap();

  let q = s
    .add_question(NewQuestion {
      content: "What are you grateful for?".into(),
      theme:   "Gratitude".into(),
    })
    .await
    .unwrap();
  for (user, answer) in [(&a, "Grateful Today"), (&b, "Quiet mornings")] {
    pairing::submit_response(
      &s,
      NewResponse {
        question_id: q.question_id,
        user_id:     user.user_id,
        content:     answer.into(),
      },
    )
    .await
    .unwrap();
  }

  let views = query::search_journal_entries(&s, a.user_id, "grateful")
    .await
    .unwrap();
  assert_eq!(views.len(), 1);

  let Some(SliceView::Written(written)) = &views[0].slice else {
    panic!("expected a written view");
  };
  assert_eq!(written.question.as_ref().unwrap().question_id, q.question_id);
  assert_eq!(written.responses.len(), 2);
  for side in &written.responses {
    assert!(side.response.is_some());
    let picture = side
      .author
      .as_ref()
      .unwrap()
      .profile_picture
      .as_deref()
      .unwrap();
    assert!(picture.starts_with('/'), "picture not rooted: {picture}");
  }
  assert_eq!(
    written.responses[0].author.as_ref().unwrap().profile_picture.as_deref(),
    Some("/uploads/profile_pictures/amara.jpg")
  );
}

#[tokio::test]
async fn dangling_slice_reference_yields_bare_entry() {
  let s = store().await;
  let (a, b) = couple(&s).await;

  // Entry pointing at a loveslice that was never written.
  seed_entry(&s, a.user_id, b.user_id, "Trust", "orphaned").await;

  let views = query::search_journal_entries(&s, a.user_id, "orphaned")
    .await
    .unwrap();
  assert_eq!(views.len(), 1);
  assert!(views[0].slice.is_none());
}

#[tokio::test]
async fn missing_nested_response_leaves_that_side_empty() {
  let s = store().await;
  let (a, b) = couple(&s).await;
  let q = s
    .add_question(NewQuestion {
      content: "What are you grateful for?".into(),
      theme:   "Gratitude".into(),
    })
    .await
    .unwrap();
  let response = s
    .add_response(NewResponse {
      question_id: q.question_id,
      user_id:     a.user_id,
      content:     "Rain".into(),
    })
    .await
    .unwrap();

  // A slice whose second response id never resolves.
  let slice = s
    .add_loveslice(loveslices_core::slice::NewLoveslice {
      question_id:  q.question_id,
      user1_id:     a.user_id,
      user2_id:     b.user_id,
      response1_id: response.response_id,
      response2_id: Uuid::new_v4(),
    })
    .await
    .unwrap();
  s.add_journal_entry(NewJournalEntry {
    user1_id:           a.user_id,
    user2_id:           b.user_id,
    slice:              SliceRef::Written(slice.loveslice_id),
    theme:              "Gratitude".into(),
    searchable_content: "Rain".into(),
  })
  .await
  .unwrap();

  let views = query::search_journal_entries(&s, a.user_id, "rain")
    .await
    .unwrap();
  let Some(SliceView::Written(written)) = &views[0].slice else {
    panic!("expected a written view");
  };

  assert!(written.responses[0].response.is_some());
  assert!(written.responses[1].response.is_none());
  // The author is still resolvable even though their response is not.
  assert!(written.responses[1].author.is_some());
}

#[tokio::test]
async fn spoken_entries_enrich_with_their_conversation() {
  let s = store().await;
  let (a, _b) = couple(&s).await;
  let conversation = s
    .add_conversation(NewConversation {
      initiator_id: a.user_id,
      topic:        Some("Budget".into()),
    })
    .await
    .unwrap();
  pairing::record_spoken_loveslice(
    &s,
    conversation.conversation_id,
    a.user_id,
    "Money".into(),
    Some("Split the savings goal".into()),
  )
  .await
  .unwrap();

  let views =
    query::journal_entries_by_theme(&s, a.user_id, "Money").await.unwrap();
  assert_eq!(views.len(), 1);

  let Some(SliceView::Spoken(spoken)) = &views[0].slice else {
    panic!("expected a spoken view");
  };
  assert_eq!(
    spoken.conversation.as_ref().unwrap().conversation_id,
    conversation.conversation_id
  );
  assert!(spoken.conversation.as_ref().unwrap().ended_at.is_some());
}

#[tokio::test]
async fn theme_query_is_exact() {
  let s = store().await;
  let (a, b) = couple(&s).await;
  seed_entry(&s, a.user_id, b.user_id, "Trust Issues", "x").await;

  let views =
    query::journal_entries_by_theme(&s, a.user_id, "Trust").await.unwrap();
  assert!(views.is_empty());
}

#[tokio::test]
async fn batched_enrichment_matches_sequential() {
  let s = store().await;
  let (a, b) = couple(&s).await;

  // A written slice, a spoken slice, and a dangling entry.
  let q = s
    .add_question(NewQuestion {
      content: "What are you grateful for?".into(),
      theme:   "Gratitude".into(),
    })
    .await
    .unwrap();
  for (user, answer) in [(&a, "Rain"), (&b, "Sun")] {
    pairing::submit_response(
      &s,
      NewResponse {
        question_id: q.question_id,
        user_id:     user.user_id,
        content:     answer.into(),
      },
    )
    .await
    .unwrap();
  }
  tick().await;
  let conversation = s
    .add_conversation(NewConversation {
      initiator_id: a.user_id,
      topic:        Some("Budget".into()),
    })
    .await
    .unwrap();
  pairing::record_spoken_loveslice(
    &s,
    conversation.conversation_id,
    a.user_id,
    "Money".into(),
    None,
  )
  .await
  .unwrap();
  tick().await;
  seed_entry(&s, a.user_id, b.user_id, "Trust", "orphaned").await;

  let sequential =
    query::query_journal(&s, a.user_id, None, Enrichment::Sequential)
      .await
      .unwrap();
  let batched = query::query_journal(&s, a.user_id, None, Enrichment::Batched)
    .await
    .unwrap();

  assert_eq!(sequential.len(), 3);
  assert_eq!(
    serde_json::to_value(&sequential).unwrap(),
    serde_json::to_value(&batched).unwrap()
  );
}
