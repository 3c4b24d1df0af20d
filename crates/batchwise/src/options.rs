//! Driver configuration.
//!
//! [`BatchOptions`] holds the window size and the optional total item limit.
//! Options are validated when they are built and are read-only afterwards,
//! so a driver holding them never needs to re-check them.

use crate::error::BatchError;

const BATCH_SIZE_MESSAGE: &str = "mandatory option \"batchSize\" must be a positive integer";
const LIMIT_MESSAGE: &str = "option \"limit\" must be a non-negative integer";

/// Window size used by [`BatchOptions::default`].
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Configuration for a [`BatchDriver`](crate::BatchDriver).
///
/// * `batch_size` - number of items materialized per window, always `> 0`
/// * `limit` - total number of items to traverse; a non-zero limit selects
///   the parallel strategy
///
/// # Example
///
/// ```
/// use batchwise::BatchOptions;
///
/// let serial = BatchOptions::new(10).unwrap();
/// assert!(!serial.is_parallel());
///
/// let parallel = serial.with_limit(42);
/// assert!(parallel.is_parallel());
/// assert_eq!(parallel.limit(), Some(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", try_from = "serde_json::Value")
)]
pub struct BatchOptions {
    batch_size: usize,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    limit: Option<usize>,
}

impl BatchOptions {
    /// Creates serial options with the given window size.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidConfiguration`] when `batch_size` is zero.
    pub fn new(batch_size: usize) -> Result<Self, BatchError> {
        if batch_size == 0 {
            return Err(BatchError::invalid_configuration(BATCH_SIZE_MESSAGE));
        }
        Ok(Self {
            batch_size,
            limit: None,
        })
    }

    /// Returns a copy of these options with a total item limit.
    ///
    /// A limit of `0` is accepted but does not enable parallel traversal.
    pub fn with_limit(self, limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }

    /// Returns a copy of these options without a limit.
    pub fn without_limit(self) -> Self {
        Self { limit: None, ..self }
    }

    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    #[inline]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the limit only when it is usable for parallel traversal.
    #[inline]
    pub fn parallel_limit(&self) -> Option<usize> {
        self.limit.filter(|limit| *limit > 0)
    }

    /// `true` iff a non-zero limit is configured.
    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.parallel_limit().is_some()
    }

    /// Number of windows a parallel traversal issues, if a limit is set.
    pub fn batch_count(&self) -> Option<usize> {
        self.parallel_limit()
            .map(|limit| limit.div_ceil(self.batch_size))
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            limit: None,
        }
    }
}

#[cfg(feature = "serde")]
mod dynamic {
    use super::*;
    use serde_json::Value;

    impl BatchOptions {
        /// Validates an untyped options record such as `{"batchSize": 10, "limit": 42}`.
        ///
        /// `batchSize` (or `batch_size`) is mandatory and must be a positive
        /// integer. `limit` is optional; when present it must be a
        /// non-negative integer. Integral floats such as `10.0` count as
        /// integers and a `null` limit counts as absent.
        pub fn from_value(value: &Value) -> Result<Self, BatchError> {
            let Some(record) = value.as_object() else {
                return Err(BatchError::invalid_configuration(BATCH_SIZE_MESSAGE));
            };

            let batch_size = record
                .get("batchSize")
                .or_else(|| record.get("batch_size"))
                .and_then(non_negative_integer)
                .filter(|batch_size| *batch_size > 0)
                .ok_or_else(|| BatchError::invalid_configuration(BATCH_SIZE_MESSAGE))?;

            let options = Self::new(batch_size)?;
            match record.get("limit") {
                None | Some(Value::Null) => Ok(options),
                Some(limit) => non_negative_integer(limit)
                    .map(|limit| options.with_limit(limit))
                    .ok_or_else(|| BatchError::invalid_configuration(LIMIT_MESSAGE)),
            }
        }

        /// Parses and validates a JSON options record.
        pub fn from_json(json: &str) -> Result<Self, BatchError> {
            let value: Value = serde_json::from_str(json)
                .map_err(|e| BatchError::invalid_configuration(format!("malformed options: {e}")))?;
            Self::from_value(&value)
        }
    }

    impl TryFrom<Value> for BatchOptions {
        type Error = BatchError;

        fn try_from(value: Value) -> Result<Self, Self::Error> {
            Self::from_value(&value)
        }
    }

    fn non_negative_integer(value: &Value) -> Option<usize> {
        let Value::Number(number) = value else {
            return None;
        };
        if let Some(n) = number.as_u64() {
            return usize::try_from(n).ok();
        }
        // as_u64 rejects negatives and floats; only integral floats get through here
        let f = number.as_f64()?;
        if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < usize::MAX as f64 {
            Some(f as usize)
        } else {
            None
        }
    }
}
