use thiserror::Error;

/// Errors returned by cursors and facade operations.
///
/// Lookups that find nothing return `None` instead of an error. These
/// variants cover the cases where the caller asked for something that needs an
/// entry to exist.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The cursor ran off either end of the tree, or was never positioned on
    /// an entry.
    #[error("cursor does not point at an entry")]
    InvalidIterator,
    /// The operation requires the key to be present.
    #[error("key not found")]
    KeyNotFound,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
