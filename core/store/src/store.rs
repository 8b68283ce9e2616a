//! Letter store trait definition.

use async_trait::async_trait;

use crate::letter::{Letter, NewLetter};
use letterlock_common::{LetterId, Result};

/// Persistence boundary for letters.
///
/// The trait deliberately exposes no update or delete: a letter is created
/// once and read many times. Implementations handle their own
/// authentication against the backing service.
#[async_trait]
pub trait LetterStore: Send + Sync {
    /// Get the store name (e.g., "memory", "sqlite", "supabase").
    fn name(&self) -> &str;

    /// Persist a new letter.
    ///
    /// # Postconditions
    /// - The returned row carries a fresh, effectively random id
    /// - `created_at` is set at insertion
    ///
    /// # Errors
    /// - `Storage` on any backend write failure
    async fn insert(&self, letter: NewLetter) -> Result<Letter>;

    /// Fetch a letter by identifier.
    ///
    /// # Errors
    /// - `NotFound` if no row matches
    /// - `Storage` on backend read failure
    async fn fetch(&self, id: &LetterId) -> Result<Letter>;
}
