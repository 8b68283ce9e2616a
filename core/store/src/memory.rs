//! In-memory letter store for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::letter::{Letter, NewLetter};
use crate::store::LetterStore;
use letterlock_common::{Error, LetterId, Result};

/// In-memory letter store.
///
/// All data is lost on drop. Useful for tests and local development
/// without a hosted backend.
#[derive(Clone)]
pub struct MemoryStore {
    letters: Arc<RwLock<HashMap<String, Letter>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            letters: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored letters.
    pub fn len(&self) -> usize {
        self.letters.read().unwrap().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LetterStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert(&self, letter: NewLetter) -> Result<Letter> {
        let letter = letter.into_letter();
        self.letters
            .write()
            .unwrap()
            .insert(letter.id.as_str().to_string(), letter.clone());
        Ok(letter)
    }

    async fn fetch(&self, id: &LetterId) -> Result<Letter> {
        self.letters
            .read()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("No letter with id {}", id)))
    }
}
