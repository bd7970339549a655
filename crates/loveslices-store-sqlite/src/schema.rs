//! SQL schema for the Loveslices SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Slice-reference columns (in `loveslices`, `spoken_loveslices`, and
/// `journal_entries`) are soft references: writes set them transactionally,
/// but reads resolve them leniently so a dangling id degrades one entry
/// instead of failing a whole journal page.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id         TEXT PRIMARY KEY,
    name            TEXT NOT NULL,
    email           TEXT NOT NULL UNIQUE,
    password_hash   TEXT NOT NULL,
    partner_id      TEXT,            -- soft reference; reciprocal by convention
    profile_picture TEXT,            -- absolute path or bare filename
    created_at      TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS partner_invites (
    code        TEXT PRIMARY KEY,
    inviter_id  TEXT NOT NULL REFERENCES users(user_id),
    created_at  TEXT NOT NULL,
    accepted_at TEXT
);

CREATE TABLE IF NOT EXISTS questions (
    question_id TEXT PRIMARY KEY,
    content     TEXT NOT NULL,
    theme       TEXT NOT NULL,
    approved    INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL
);

-- Responses are immutable; at most one per (question, user).
CREATE TABLE IF NOT EXISTS responses (
    response_id TEXT PRIMARY KEY,
    question_id TEXT NOT NULL REFERENCES questions(question_id),
    user_id     TEXT NOT NULL REFERENCES users(user_id),
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    UNIQUE (question_id, user_id)
);

CREATE TABLE IF NOT EXISTS loveslices (
    loveslice_id TEXT PRIMARY KEY,
    question_id  TEXT NOT NULL,      -- soft reference
    user1_id     TEXT NOT NULL,      -- soft reference
    user2_id     TEXT NOT NULL,      -- soft reference
    response1_id TEXT NOT NULL,      -- soft reference
    response2_id TEXT NOT NULL,      -- soft reference
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS conversations (
    conversation_id TEXT PRIMARY KEY,
    initiator_id    TEXT NOT NULL REFERENCES users(user_id),
    topic           TEXT,
    started_at      TEXT NOT NULL,
    ended_at        TEXT
);

CREATE TABLE IF NOT EXISTS spoken_loveslices (
    spoken_loveslice_id TEXT PRIMARY KEY,
    conversation_id     TEXT NOT NULL, -- soft reference
    user1_id            TEXT NOT NULL, -- soft reference
    user2_id            TEXT NOT NULL, -- soft reference
    theme               TEXT NOT NULL,
    outcome             TEXT,
    created_at          TEXT NOT NULL
);

-- The journal is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
-- At most one slice reference is set; decoding prefers the written column
-- when legacy rows carry both.
CREATE TABLE IF NOT EXISTS journal_entries (
    entry_id             TEXT PRIMARY KEY,
    user1_id             TEXT NOT NULL, -- soft reference
    user2_id             TEXT NOT NULL, -- soft reference
    written_loveslice_id TEXT,          -- soft reference
    spoken_loveslice_id  TEXT,          -- soft reference
    theme                TEXT NOT NULL,
    searchable_content   TEXT NOT NULL,
    created_at           TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS journal_user1_idx   ON journal_entries(user1_id);
CREATE INDEX IF NOT EXISTS journal_user2_idx   ON journal_entries(user2_id);
CREATE INDEX IF NOT EXISTS journal_theme_idx   ON journal_entries(theme);
CREATE INDEX IF NOT EXISTS journal_created_idx ON journal_entries(created_at);
CREATE INDEX IF NOT EXISTS responses_user_idx  ON responses(user_id);

PRAGMA user_version = 1;
";
