//! User accounts, partner invites, and the public profile projection.
//!
//! Accounts are never hard-deleted. The only mutable columns are
//! `partner_id` (written by the pairing flows) and `profile_picture`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical directory served for uploaded profile pictures.
pub const PICTURE_DIR: &str = "/uploads/profile_pictures";

// ─── User ────────────────────────────────────────────────────────────────────

/// A registered account.
///
/// `partner_id` is reciprocal: whenever it points at another user, that user
/// points back. The pairing service is the only writer of this column.
#[derive(Debug, Clone)]
pub struct User {
  pub user_id:         Uuid,
  pub name:            String,
  pub email:           String,
  /// argon2 PHC string. Never appears in enriched or serialised output.
  pub password_hash:   String,
  pub partner_id:      Option<Uuid>,
  /// Either a path rooted at `/` or a bare filename under [`PICTURE_DIR`].
  pub profile_picture: Option<String>,
  pub created_at:      DateTime<Utc>,
}

impl User {
  /// The public projection of this account, picture path normalised.
  pub fn profile(&self) -> Profile {
    Profile {
      user_id:         self.user_id,
      name:            self.name.clone(),
      profile_picture: self.profile_picture.as_deref().map(picture_url),
    }
  }
}

/// Input to [`JournalStore::add_user`](crate::store::JournalStore::add_user).
/// The id and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:            String,
  pub email:           String,
  pub password_hash:   String,
  pub profile_picture: Option<String>,
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// What enrichment embeds for a response's author: identity, display name,
/// and a servable picture path — nothing private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub user_id:         Uuid,
  pub name:            String,
  /// Always rooted at `/` (see [`picture_url`]).
  pub profile_picture: Option<String>,
}

/// Normalise a stored picture value into a servable path.
///
/// Values already rooted at `/` pass through unchanged; bare filenames are
/// prefixed with [`PICTURE_DIR`]. Every consumer of stored picture values
/// must go through this one function.
pub fn picture_url(stored: &str) -> String {
  if stored.starts_with('/') {
    stored.to_owned()
  } else {
    format!("{PICTURE_DIR}/{stored}")
  }
}

// ─── Partner invites ─────────────────────────────────────────────────────────

/// A single-use code that lets another account link as the inviter's partner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerInvite {
  pub code:        String,
  pub inviter_id:  Uuid,
  pub created_at:  DateTime<Utc>,
  pub accepted_at: Option<DateTime<Utc>>,
}

/// Input to [`JournalStore::add_invite`](crate::store::JournalStore::add_invite).
/// The code is caller-supplied so the transport layer controls its entropy.
#[derive(Debug, Clone)]
pub struct NewInvite {
  pub code:       String,
  pub inviter_id: Uuid,
}

#[cfg(test)]
mod tests {
  use super::picture_url;

  #[test]
  fn rooted_paths_pass_through() {
    assert_eq!(
      picture_url("/uploads/profile_pictures/abc.jpg"),
      "/uploads/profile_pictures/abc.jpg"
    );
    assert_eq!(picture_url("/elsewhere/x.png"), "/elsewhere/x.png");
  }

  #[test]
  fn bare_filenames_are_prefixed() {
    assert_eq!(
      picture_url("abc.jpg"),
      "/uploads/profile_pictures/abc.jpg"
    );
  }
}
