//! # Domain Models
//!
//! This crate contains the pure data model of the box draft with a single dependency (`serde`).
//! Keep it lean: no I/O, no async, no logging. Just the persisted shapes, their seed defaults,
//! and read-only helpers over a snapshot.

pub mod config;
pub mod constants;
pub mod model;
pub mod state;

pub use model::{Answers, DraftBox, Player, Question, QuestionType, Settings};
pub use state::AppState;
