//! Journal configuration.

use crate::keys::KeyEncoding;

/// Configuration for creating or opening a journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalConfig {
    /// How record numbers map to store keys.
    pub key_encoding: KeyEncoding,

    /// Whether `commit` refuses to move the committed pointer backwards.
    ///
    /// With this disabled, `commit` installs whatever record is pending,
    /// even if `set_committed` has since advanced past it.
    pub strict_commit_order: bool,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            key_encoding: KeyEncoding::Decimal,
            strict_commit_order: true,
        }
    }
}

impl JournalConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the record key encoding.
    #[must_use]
    pub const fn key_encoding(mut self, encoding: KeyEncoding) -> Self {
        self.key_encoding = encoding;
        self
    }

    /// Sets whether commits must advance the committed pointer.
    #[must_use]
    pub const fn strict_commit_order(mut self, value: bool) -> Self {
        self.strict_commit_order = value;
        self
    }
}
