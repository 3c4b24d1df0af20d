use thiserror::Error;

/// Boxed error type accepted from sources and user callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while configuring a driver or traversing a source.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The driver options were rejected at construction.
    ///
    /// The message names the offending option.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A parallel traversal was requested without a usable `limit`.
    #[error("option \"limit\" must be set for parallel operation")]
    MissingLimit,

    /// The source failed to materialize a window.
    #[error("failed to materialize batch {batch_index}")]
    Source {
        batch_index: usize,
        #[source]
        source: BoxError,
    },

    /// A batch callback returned an error.
    #[error("callback failed for batch {batch_index}")]
    Callback {
        batch_index: usize,
        #[source]
        source: BoxError,
    },

    /// An item callback returned an error.
    #[error("callback failed for item {index}")]
    ItemCallback {
        index: usize,
        #[source]
        source: BoxError,
    },
}

impl BatchError {
    pub(crate) fn invalid_configuration(message: impl Into<String>) -> Self {
        BatchError::InvalidConfiguration(message.into())
    }

    pub(crate) fn materialization(batch_index: usize, err: impl Into<BoxError>) -> Self {
        BatchError::Source {
            batch_index,
            source: err.into(),
        }
    }

    pub(crate) fn callback(batch_index: usize, err: impl Into<BoxError>) -> Self {
        BatchError::Callback {
            batch_index,
            source: err.into(),
        }
    }

    pub(crate) fn item_callback(index: usize, err: impl Into<BoxError>) -> Self {
        BatchError::ItemCallback {
            index,
            source: err.into(),
        }
    }

    /// Returns the batch index the error is attributed to, if any.
    pub fn batch_index(&self) -> Option<usize> {
        match self {
            BatchError::Source { batch_index, .. } | BatchError::Callback { batch_index, .. } => {
                Some(*batch_index)
            }
            _ => None,
        }
    }
}
