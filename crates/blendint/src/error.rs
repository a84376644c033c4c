//! Error types for the toolkit.
//!
//! Geometry requests and event dispatch never fail; rejected or misdirected
//! requests are logged and dropped. Errors only surface from tree editing on
//! dead ids and from loading theme configuration.

use std::path::PathBuf;

use blendint_core::ObjectError;

/// Result type alias for view and configuration operations.
pub type ViewResult<T> = std::result::Result<T, BlendIntError>;

/// Errors that can occur in the toolkit.
#[derive(Debug, thiserror::Error)]
pub enum BlendIntError {
    /// Tree editing on an unknown view, or an edit that would create a cycle.
    #[error("View tree error: {0}")]
    Tree(#[from] ObjectError),

    /// The view exists but is not of the requested type.
    #[error("View is not a {expected}")]
    WrongViewType { expected: &'static str },

    /// Theme file could not be parsed.
    #[error("Invalid theme configuration: {0}")]
    ThemeParse(#[from] toml::de::Error),

    /// Theme could not be serialized.
    #[error("Failed to serialize theme: {0}")]
    ThemeSerialize(#[from] toml::ser::Error),

    /// Theme file could not be read.
    #[error("Failed to read theme '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BlendIntError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a type mismatch error.
    pub fn wrong_type<V: ?Sized>() -> Self {
        Self::WrongViewType {
            expected: std::any::type_name::<V>(),
        }
    }
}
