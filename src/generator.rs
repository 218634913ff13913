//! Timestamped UUID generator and related types.

use std::io;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{ClockError, Config, Error, Timestamp, Uuid};

pub mod with_rand08;
pub mod with_reader;


/// A trait that defines the byte stream interface required for the random region.
pub trait EntropySource {
    /// Fills `dest` entirely with cryptographically unpredictable bytes, or fails.
    ///
    /// Implementations must never report success after filling `dest` only partially.
    fn fill_exact(&mut self, dest: &mut [u8]) -> io::Result<()>;
}

/// A trait that defines the clock interface for [`CombGenerator`].
pub trait TimeSource {
    /// Returns the current time as 100-nanosecond ticks since 1582-10-15.
    fn now(&mut self) -> Result<Timestamp, ClockError>;
}

/// The default [`TimeSource`] that reads [`std::time::SystemTime`].
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn now(&mut self) -> Result<Timestamp, ClockError> {
        Timestamp::now()
    }
}

/// Generates a timestamped UUID from the `time` passed, filling the random region from `entropy`.
///
/// The identifier is built in a zeroed buffer: the timestamp goes into the trailing
/// `config.width()` bytes, the leading bytes are read from `entropy`, and the version and variant
/// bits are overwritten last when `config.format_marker()` is set. Nothing is returned unless
/// every step succeeds.
///
/// # Examples
///
/// ```rust
/// use comb::{generate_with, Config, Timestamp};
///
/// let mut source = comb::with_reader::Adapter(&[0x55u8; 10][..]);
/// let t = Timestamp::from_ticks(139_233_600_000_000_000);
/// let e = generate_with(&mut source, t, &Config::DEFAULT)?;
/// assert_eq!(e.to_string(), "55555555-5555-6555-f555-7ea1d944d000");
/// # Ok::<(), comb::Error>(())
/// ```
pub fn generate_with<E: EntropySource + ?Sized>(
    entropy: &mut E,
    time: Timestamp,
    config: &Config,
) -> Result<Uuid, Error> {
    let mut bytes = [0u8; 16];
    config.put_timestamp(&mut bytes, time);
    entropy
        .fill_exact(&mut bytes[..config.random_len()])
        .map_err(Error::Entropy)?;
    if config.format_marker() {
        bytes[6] = 0x60 | (bytes[6] & 0x0f);
        bytes[8] = 0xe0 | (bytes[8] & 0x1f);
    }
    Ok(Uuid::from(bytes))
}

/// Represents a generator that stamps the current time into the trailing bytes of otherwise random
/// UUIDs.
///
/// The generator holds no state between calls other than its entropy and time sources, so UUIDs
/// generated within the same resolution unit are ordered only by their random bytes. Wrap the
/// generator in a [`Mutex`](std::sync::Mutex) to share it across threads.
///
/// # Examples
///
/// ```rust
/// use comb::{CombGenerator, Config};
/// use std::time::Duration;
///
/// let config = Config::new(8, Duration::from_micros(1), false)?;
/// let mut g = CombGenerator::with_rand08(rand::rngs::OsRng).with_config(config);
/// println!("{}", g.generate()?);
/// # Ok::<(), comb::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct CombGenerator<E, T = StdSystemTime> {
    config: Config,

    /// The entropy source that fills the random region.
    entropy: E,

    /// The clock that supplies the timestamps.
    time_source: T,
}

impl<E: EntropySource> CombGenerator<E> {
    /// Creates a generator with the default configuration and the system clock.
    pub const fn new(entropy: E) -> Self {
        Self::with_entropy_and_time_sources(entropy, StdSystemTime)
    }
}

impl<E: EntropySource, T: TimeSource> CombGenerator<E, T> {
    /// Creates a generator with the default configuration and the sources given.
    pub const fn with_entropy_and_time_sources(entropy: E, time_source: T) -> Self {
        Self {
            config: Config::DEFAULT,
            entropy,
            time_source,
        }
    }

    /// Replaces the configuration of the generator.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration of the generator.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Generates a new UUID stamped with the current time.
    ///
    /// Fails with [`Error::Clock`] if the time source fails and with [`Error::Entropy`] if the
    /// entropy source cannot fill the random region.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), err))]
    pub fn generate(&mut self) -> Result<Uuid, Error> {
        let time = self.time_source.now()?;
        self.generate_core(time)
    }

    /// Generates a new UUID stamped with the `time` passed.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), err))]
    pub fn generate_core(&mut self, time: Timestamp) -> Result<Uuid, Error> {
        generate_with(&mut self.entropy, time, &self.config)
    }
}

/// Supports operations as an infinite iterator that produces the result of [`generate`] for each
/// call of `next()`.
///
/// [`generate`]: CombGenerator::generate
///
/// # Examples
///
/// ```rust
/// use comb::CombGenerator;
///
/// CombGenerator::with_rand08(rand::thread_rng())
///     .take(4)
///     .for_each(|e| println!("{}", e.unwrap()));
/// ```
impl<E: EntropySource, T: TimeSource> Iterator for CombGenerator<E, T> {
    type Item = Result<Uuid, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
