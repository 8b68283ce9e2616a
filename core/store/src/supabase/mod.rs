//! Supabase (PostgREST) hosted letter store.
//!
//! Talks to the `letters` table through Supabase's REST interface. The
//! table holds only ciphertext, IV, and delivery metadata; the anon key
//! grants insert and select, matching the letter lifecycle.

mod client;

pub use client::{SupabaseConfig, SupabaseStore};
