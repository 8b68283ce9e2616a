//! Share links: `{origin}/letter/{id}#{key}`.
//!
//! The fragment after `#` is retained by browsers but never included in
//! network requests, which makes it the one channel that can carry the
//! key to the recipient without the server ever seeing it.

use url::Url;

use letterlock_common::{Error, LetterId, Result};
use letterlock_crypto::LetterKey;

/// A parsed or freshly built share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    url: Url,
    id: LetterId,
    key_fragment: Option<String>,
}

impl ShareLink {
    /// Build the full share link for a letter.
    ///
    /// The key is appended as the fragment here, on the sender's device,
    /// never by the server.
    pub fn build(origin: &Url, id: &LetterId, key: &LetterKey) -> Result<Self> {
        let base = origin.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{}/letter/{}#{}", base, id, key.export()))
            .map_err(|e| Error::InvalidInput(format!("Invalid share link: {}", e)))?;

        Ok(Self {
            url,
            id: id.clone(),
            key_fragment: Some(key.export()),
        })
    }

    /// Parse a share link the recipient received.
    ///
    /// The fragment may be absent (a truncated link); that is not an error
    /// here. The viewer decides what an absent key means.
    ///
    /// # Errors
    /// - `InvalidInput` if the URL does not name a letter
    pub fn parse(link: &str) -> Result<Self> {
        let url = Url::parse(link)
            .map_err(|e| Error::InvalidInput(format!("Invalid share link: {}", e)))?;

        let mut segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let id = match (segments.pop(), segments.pop()) {
            (Some(id), Some("letter")) => LetterId::new(id)?,
            _ => {
                return Err(Error::InvalidInput(
                    "Share link does not point at a letter".to_string(),
                ))
            }
        };

        let key_fragment = url
            .fragment()
            .map(str::to_string)
            .filter(|f| !f.is_empty());

        Ok(Self {
            url,
            id,
            key_fragment,
        })
    }

    /// The letter identifier.
    pub fn id(&self) -> &LetterId {
        &self.id
    }

    /// The raw key fragment, if the link carried one.
    pub fn key_fragment(&self) -> Option<&str> {
        self.key_fragment.as_deref()
    }

    /// The full link, fragment included.
    pub fn as_url(&self) -> &Url {
        &self.url
    }
}

impl std::fmt::Display for ShareLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}
