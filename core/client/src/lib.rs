//! Sender and recipient side of Letterlock.
//!
//! This module provides:
//! - Share-link construction and parsing (the fragment is the key channel)
//! - An HTTP client for the letter API
//! - The compose path: encrypt locally, submit ciphertext, build the link
//! - The view path: fetch ciphertext, decrypt locally, render or fail closed
//! - A declarative reveal timeline for staged presentation
//!
//! Everything cryptographic happens on this side. The API client sends
//! ciphertext and IV only; the key exists here and in the link fragment,
//! nowhere else.

pub mod api;
pub mod compose;
pub mod link;
pub mod timeline;
pub mod viewer;

pub use api::{FetchedLetter, LetterApi, SubmitLetter};
pub use compose::{send_letter, Draft};
pub use link::ShareLink;
pub use timeline::{ComposeStage, RevealStage, Timeline, TimelineStep};
pub use viewer::{open_letter, OpenedLetter, ViewState};
