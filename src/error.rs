// Error taxonomy for the sample source.
//
// Mirrors the shape of the teacher's `DownloadError`: one flat enum with a
// `retryable` discriminant carried on variants where retryability is a
// property of the instance, not the variant.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SampleSourceError {
    /// A load failed but may succeed on retry (network hiccup, 5xx, timeout).
    #[error("transient load error: {reason}")]
    TransientLoad { reason: String, retryable: bool },

    /// Retry budget exhausted; surfaced to the caller through `maybe_throw_error`.
    #[error("fatal load error after {attempts} attempts: {reason}")]
    FatalLoad { reason: String, attempts: u32 },

    /// The chunk source rejected or failed an operation (e.g. playlist error).
    #[error("chunk source error: {reason}")]
    ChunkSource { reason: String },

    /// A programmer error / violated invariant. Never recovered from.
    #[error("assertion violation: {reason}")]
    Assertion { reason: String },

    /// An operation was attempted on a source that has already been released.
    #[error("operation on a released sample source")]
    Released,
}

impl SampleSourceError {
    pub fn transient(reason: impl Into<String>, retryable: bool) -> Self {
        Self::TransientLoad {
            reason: reason.into(),
            retryable,
        }
    }

    pub fn chunk_source(reason: impl Into<String>) -> Self {
        Self::ChunkSource {
            reason: reason.into(),
        }
    }

    pub fn assertion(reason: impl Into<String>) -> Self {
        Self::Assertion {
            reason: reason.into(),
        }
    }

    /// Whether a fresh attempt at the same loadable could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::TransientLoad { retryable, .. } => *retryable,
            Self::FatalLoad { .. } | Self::ChunkSource { .. } | Self::Assertion { .. } | Self::Released => false,
        }
    }
}

/// Returns an `Assertion` error instead of panicking when `cond` is false.
/// Programmer errors are fatal (§7) but must never unwind through an
/// external collaborator's callback.
macro_rules! assert_or_fatal {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::SampleSourceError::assertion(format!($($arg)*)));
        }
    };
}
pub(crate) use assert_or_fatal;
