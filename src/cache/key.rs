//! Cache Key Module
//!
//! Derives the cache key identifying one logical secret request.

use std::fmt;

/// Sentinel placed between the alias and the source identifier.
pub const KEY_SEPARATOR: char = '\0';

// == Cache Key ==
/// Key under which a decrypted secret is cached.
///
/// Built as `alias + NUL + source_id`, so two requests for the same alias
/// resolved from different sources never share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds the key for `alias` resolved through the source identified by `source_id`.
    pub fn new(alias: &str, source_id: &str) -> Self {
        let mut key = String::with_capacity(alias.len() + source_id.len() + 1);
        key.push_str(alias);
        key.push(KEY_SEPARATOR);
        key.push_str(source_id);
        Self(key)
    }

    /// Returns the alias part of the key.
    ///
    /// Splits on the last separator since source ids never contain it.
    pub fn alias(&self) -> &str {
        self.0
            .rsplit_once(KEY_SEPARATOR)
            .map_or(self.0.as_str(), |(alias, _)| alias)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keeps the sentinel out of log lines.
impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.rsplit_once(KEY_SEPARATOR) {
            Some((alias, source)) => write!(f, "{alias}@{source}"),
            None => f.write_str(&self.0),
        }
    }
}
