//! Secret source descriptor.

use std::fmt;

// == Source Kind ==
/// Where the encrypted value behind an alias lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The vault repository in the configuration registry
    #[default]
    Registry,
    /// A secret file on disk
    File,
    /// A process environment variable
    Environment,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Registry => "reg",
            SourceKind::File => "file",
            SourceKind::Environment => "env",
        }
    }
}

// == Secret Source ==
/// Describes where and how an alias should be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SecretSource {
    pub kind: SourceKind,
    /// Whether the stored value is additionally encoded before encryption
    pub encoded: bool,
}

impl SecretSource {
    pub fn new(kind: SourceKind, encoded: bool) -> Self {
        Self { kind, encoded }
    }

    /// Identifier of this source inside a cache key.
    pub fn cache_id(&self) -> String {
        let encoding = if self.encoded { "encoded" } else { "plain" };
        format!("{}:{}", self.kind.as_str(), encoding)
    }
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_id())
    }
}
