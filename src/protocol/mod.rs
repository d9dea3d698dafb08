//! Wire formats: share links and generator payloads.

pub mod generated;
pub mod share_link;

pub use share_link::{decode, decode_str, encode, SharedQuiz, QUESTIONS_PARAM, SLUG_PARAM};
