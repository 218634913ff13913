//! Fixed-point timestamps and the layout of the timestamp region

use std::{fmt, time};

use crate::codec::{encode_fixed_width, MAX_WIDTH};
use crate::{ClockError, Error, Uuid};

/// The canonical number of trailing bytes holding the timestamp.
pub const DEFAULT_WIDTH: usize = 6;

/// The widest timestamp region that leaves the version and variant fields to the random region.
pub const MAX_MARKED_WIDTH: usize = 7;

/// The canonical duration of one stored timestamp unit.
pub const DEFAULT_RESOLUTION: time::Duration = time::Duration::from_micros(100);

const NANOS_PER_TICK: u128 = 100;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const SECS_PER_DAY: u128 = 86_400;
const DAYS_PER_YEAR: f64 = 365.24219;

/// A point in time expressed as 100-nanosecond ticks since 1582-10-15T00:00:00Z, the time base
/// of RFC 4122 UUIDs.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// 1970-01-01T00:00:00Z
    pub const UNIX_EPOCH: Self = Self(122_192_928_000_000_000);

    /// Creates a timestamp from a raw tick count.
    pub const fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Returns the raw tick count.
    pub const fn ticks(&self) -> u64 {
        self.0
    }

    /// Converts a [`SystemTime`](time::SystemTime), failing if it predates 1582-10-15 or lies
    /// beyond the range of a `u64` tick count.
    ///
    /// Sub-tick remainders are rounded down, toward the past, on both sides of the Unix epoch.
    pub fn from_system_time(t: time::SystemTime) -> Result<Self, ClockError> {
        fn to_ticks(nanos: u128) -> Option<u64> {
            u64::try_from(nanos / NANOS_PER_TICK).ok()
        }

        match t.duration_since(time::UNIX_EPOCH) {
            Ok(d) => to_ticks(d.as_nanos()).and_then(|e| Self::UNIX_EPOCH.0.checked_add(e)),
            Err(err) => to_ticks(err.duration().as_nanos() + (NANOS_PER_TICK - 1))
                .and_then(|e| Self::UNIX_EPOCH.0.checked_sub(e)),
        }
        .map(Self)
        .ok_or(ClockError::OutOfRange)
    }

    /// Returns the current system time.
    pub fn now() -> Result<Self, ClockError> {
        Self::from_system_time(time::SystemTime::now())
    }
}

/// Validated layout of a timestamped identifier: the timestamp width, its resolution, and whether
/// the version and variant marker bits are stamped.
///
/// # Examples
///
/// ```rust
/// use comb::Config;
/// use std::time::Duration;
///
/// let config = Config::new(4, Duration::from_millis(1), false)?;
/// assert_eq!(config.time_range().to_string(), "0 years 49 days 61367.296000 seconds");
/// # Ok::<(), comb::Error>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Config {
    width: usize,
    resolution: time::Duration,
    format_marker: bool,
}

impl Config {
    /// Six timestamp bytes at a 100-microsecond resolution with the format marker, which covers
    /// about 892 years before wrapping.
    pub const DEFAULT: Self = Self {
        width: DEFAULT_WIDTH,
        resolution: DEFAULT_RESOLUTION,
        format_marker: true,
    };

    /// Creates a configuration.
    ///
    /// Fails with [`Error::InvalidWidth`] unless `width` is between 1 and 8, with
    /// [`Error::MarkerOverlap`] if `format_marker` is set with a width beyond
    /// [`MAX_MARKED_WIDTH`], and with [`Error::ZeroResolution`] if `resolution` is zero.
    pub fn new(
        width: usize,
        resolution: time::Duration,
        format_marker: bool,
    ) -> Result<Self, Error> {
        if !(1..=MAX_WIDTH).contains(&width) {
            return Err(Error::InvalidWidth(width));
        }
        if format_marker && width > MAX_MARKED_WIDTH {
            return Err(Error::MarkerOverlap(width));
        }
        if resolution.is_zero() {
            return Err(Error::ZeroResolution);
        }
        Ok(Self {
            width,
            resolution,
            format_marker,
        })
    }

    /// Returns the number of trailing timestamp bytes.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the duration of one stored unit.
    pub const fn resolution(&self) -> time::Duration {
        self.resolution
    }

    /// Returns `true` if the version and variant marker bits are stamped.
    pub const fn format_marker(&self) -> bool {
        self.format_marker
    }

    /// Returns the number of leading random bytes.
    pub const fn random_len(&self) -> usize {
        16 - self.width
    }

    /// Converts `time` into the number of resolution units since the epoch, rounded half away
    /// from zero and wrapped to the width of the timestamp region.
    pub fn stored_units(&self, time: Timestamp) -> u64 {
        let nanos = u128::from(time.ticks()) * NANOS_PER_TICK;
        let res = self.resolution.as_nanos();
        let units = (nanos + res / 2) / res;
        (units & u128::from(u64::MAX >> (64 - 8 * self.width))) as u64
    }

    /// Reads the timestamp region of `id`.
    pub fn read_timestamp(&self, id: &Uuid) -> u64 {
        id.timestamp_with_width(self.width)
    }

    /// Returns the span of time representable before the timestamp region wraps.
    pub fn time_range(&self) -> TimeRange {
        time_range(8 * self.width as u32, self.resolution)
    }

    /// Writes the stored units of `time` into the trailing bytes, leaving the rest untouched.
    pub(crate) fn put_timestamp(&self, bytes: &mut [u8; 16], time: Timestamp) {
        encode_fixed_width(bytes, self.random_len(), self.width, self.stored_units(time));
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Reads the timestamp stored in the trailing `n_bytes` of `id`.
///
/// # Panics
///
/// Panics if `n_bytes` is not between 1 and 8.
pub fn read_timestamp(id: &Uuid, n_bytes: usize) -> u64 {
    id.timestamp_with_width(n_bytes)
}

/// Returns a copy of `id` whose trailing `n_bytes` hold `time` at the given `resolution`.
///
/// The leading bytes are copied unchanged.
///
/// # Examples
///
/// ```rust
/// use comb::{timestamp, Timestamp, Uuid};
/// use std::time::Duration;
///
/// let t = Timestamp::from_ticks(0x1234_5678);
/// let id = timestamp::write_timestamp(Uuid::MAX, 4, t, Duration::from_nanos(100))?;
/// assert_eq!(id.to_string(), "ffffffff-ffff-ffff-ffff-ffff12345678");
/// # Ok::<(), comb::Error>(())
/// ```
pub fn write_timestamp(
    id: Uuid,
    n_bytes: usize,
    time: Timestamp,
    resolution: time::Duration,
) -> Result<Uuid, Error> {
    let config = Config::new(n_bytes, resolution, false)?;
    let mut bytes = <[u8; 16]>::from(id);
    config.put_timestamp(&mut bytes, time);
    Ok(Uuid::from(bytes))
}

/// Span of wall-clock time representable by a timestamp counter before it wraps.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TimeRange {
    /// Whole average Gregorian years (365.24219 days).
    pub years: u64,
    /// Whole days beyond `years`.
    pub days: u64,
    /// Seconds beyond `days`, including the fractional part.
    pub seconds: f64,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} years {} days {:.6} seconds",
            self.years, self.days, self.seconds
        )
    }
}

/// Computes the span covered by `2^bits` units of `resolution`.
///
/// This is a reporting helper; the encoder never relies on it.
///
/// # Panics
///
/// Panics if `bits` exceeds 64 or if the span does not fit in a `u128` count of nanoseconds or a
/// `u64` count of years.
pub fn time_range(bits: u32, resolution: time::Duration) -> TimeRange {
    assert!(bits <= 64, "`bits` must not exceed 64, got {bits}");
    let nanos = (1u128 << bits)
        .checked_mul(resolution.as_nanos())
        .unwrap_or_else(|| time_range_overflow(bits, resolution));

    let secs = nanos / NANOS_PER_SEC;
    let days = secs / SECS_PER_DAY;
    let years = days as f64 / DAYS_PER_YEAR;
    if years >= u64::MAX as f64 {
        time_range_overflow(bits, resolution);
    }

    TimeRange {
        years: years.trunc() as u64,
        days: (years.fract() * DAYS_PER_YEAR) as u64,
        seconds: (secs % SECS_PER_DAY) as f64 + (nanos % NANOS_PER_SEC) as f64 / 1e9,
    }
}

fn time_range_overflow(bits: u32, resolution: time::Duration) -> ! {
    panic!("time range of 2^{bits} units of {resolution:?} overflows")
}
