//! Letter persistence for Letterlock.
//!
//! This module provides:
//! - The `LetterStore` trait every backend implements
//! - An in-memory store for testing and development
//! - A SQLite store for self-hosted deployments
//! - A Supabase (PostgREST) client for the hosted backend
//!
//! Every backend holds only ciphertext, IV, and delivery metadata. No
//! backend ever sees a decryption key.

pub mod letter;
pub mod memory;
pub mod sqlite;
pub mod store;
pub mod supabase;

pub use letter::{Letter, NewLetter};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::LetterStore;
pub use supabase::{SupabaseConfig, SupabaseStore};
