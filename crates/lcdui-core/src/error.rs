//! Error types for the binding system.

use std::fmt;

/// Errors raised by the binding protocol.
///
/// These are *protocol* violations: the call itself was well formed, but the
/// binding was not in a state where it could serve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The binding is not attached to any model.
    Detached,
    /// The binding is attached but its model has already been dropped.
    ModelDropped,
    /// The attached model does not expose a view of the requested type.
    ViewUnavailable {
        /// The type name that was requested.
        expected: &'static str,
    },
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detached => write!(f, "Cannot invoke binding commands in detached state"),
            Self::ModelDropped => write!(f, "The attached model has been dropped"),
            Self::ViewUnavailable { expected } => {
                write!(f, "Attached model has no view of type {expected}")
            }
        }
    }
}

impl std::error::Error for BindingError {}

/// Result type for binding operations.
pub type BindingResult<T> = std::result::Result<T, BindingError>;
