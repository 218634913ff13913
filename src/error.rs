use std::io;

/// Errors that can occur while configuring a generator or generating an identifier.
///
/// Each variant names the step that failed; the underlying cause, if any, is available through
/// [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The timestamp width is outside the supported range of 1 to 8 bytes.
    #[error("timestamp width must be between 1 and 8 bytes, got {0}")]
    InvalidWidth(usize),

    /// The timestamp region of the given width reaches into byte 8, where the format marker
    /// would overwrite the variant bits of the stored timestamp.
    #[error("timestamp width {0} overlaps the variant field of the format marker")]
    MarkerOverlap(usize),

    /// The timestamp resolution is zero.
    #[error("timestamp resolution must be non-zero")]
    ZeroResolution,

    /// The time source could not provide the current time.
    #[error("could not read the clock")]
    Clock(#[from] ClockError),

    /// The entropy source failed or returned fewer bytes than requested.
    #[error("could not fill the random bytes")]
    Entropy(#[source] io::Error),
}

/// Error reported by a [`TimeSource`](crate::TimeSource).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClockError {
    /// The time cannot be expressed in 100-nanosecond ticks since 1582-10-15.
    #[error("time is out of the representable range of ticks")]
    OutOfRange,

    /// The underlying clock is not available.
    #[error("clock unavailable")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}
