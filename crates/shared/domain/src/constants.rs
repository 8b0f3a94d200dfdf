//! Seed data and fixed identifiers of the built-in default snapshot.

/// Storage key the whole snapshot lives under.
pub const STORAGE_KEY: &str = "box_draft_app_v1";

/// Display name used when no answer can name a player.
pub const ANONYMOUS: &str = "Anonymous";

pub const DEFAULT_BOX_COUNT: usize = 8;
pub const DEFAULT_BOX_CAPACITY: u32 = 5;
pub const DEFAULT_BOX_NAME: &str = "Team";

pub const DEFAULT_EVENT_TITLE: &str = "Tournament Registration";
pub const DEFAULT_EVENT_DESCRIPTION: &str =
    "Register now and pick your team box to participate in the upcoming tournament.";

/// Upper bound for an uploaded banner before it is embedded (2.5 MiB).
pub const DEFAULT_BANNER_MAX_BYTES: u64 = 2_621_440;

pub const PLAYER_ID_PREFIX: &str = "p_";
pub const QUESTION_ID_PREFIX: &str = "q_";
