//! Error types for the widget layer.

use lcdui_core::BindingError;

/// Result type alias for widget operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by widget models.
///
/// Every widget validates its arguments before touching any state, so an
/// operation that returns an error has left the model unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An argument was rejected, such as a mutable image or an over-long text.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An element index fell outside the collection.
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The operation is not allowed in the model's current state.
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// A binding-side call was made while detached.
    #[error(transparent)]
    Binding(#[from] BindingError),
}

impl Error {
    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an illegal-state error.
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }

    /// Fail unless `index < len`.
    pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { index, len })
        }
    }

    /// Fail unless `index <= len`, the valid range for insertion.
    pub(crate) fn check_insert_index(index: usize, len: usize) -> Result<()> {
        if index <= len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { index, len })
        }
    }
}
