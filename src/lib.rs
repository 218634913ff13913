//! Time-ordered random UUIDs with a compact trailing timestamp
//!
//! ```rust
//! let uuid = comb::new_timestamped_uuid()?;
//! println!("{}", uuid); // e.g., "3f9a1c2e-77d0-6b41-e5c3-0391e21d7a5f"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! println!("{}", uuid.timestamp()); // units of 100 microseconds since 1582-10-15
//! # Ok::<(), comb::Error>(())
//! ```
//!
//! # Field and bit layout
//!
//! With the default configuration, this library produces identifiers with the following bit
//! layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |             rand              |  ver  |         rand          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! | var |          rand           |          timestamp            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           timestamp                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 73 `rand` bits are filled with cryptographically strong random bytes.
//! - The 4-bit `ver` field is set at `0110`.
//! - The 3-bit `var` field is set at `111`.
//! - The 48-bit `timestamp` field holds the number of 100-microsecond units elapsed since
//!   1582-10-15T00:00:00Z, rounded to the nearest unit and wrapped modulo `2^48`, which covers
//!   about 892 years before wrapping.
//!
//! The width of the timestamp (1 to 8 bytes), its resolution, and whether the `ver` and `var`
//! fields are stamped are configurable through [`Config`]:
//!
//! ```rust
//! use comb::{CombGenerator, Config};
//! use std::time::Duration;
//!
//! let config = Config::new(4, Duration::from_millis(1), false)?;
//! let mut g = CombGenerator::with_rand08(rand::rngs::OsRng).with_config(config);
//! let uuid = g.generate()?;
//! println!("{} holds {}", uuid, config.read_timestamp(&uuid));
//! println!("wraps after {}", config.time_range()); // "0 years 49 days 61367.296000 seconds"
//! # Ok::<(), comb::Error>(())
//! ```
//!
//! # Crate features
//!
//! - `global_gen` (default) enables [`new_timestamped_uuid()`] and its process-wide generator.
//! - `serde` enables serialization and deserialization of [`Uuid`].
//! - `uuid` enables conversions from and to [`uuid::Uuid`](https://docs.rs/uuid).
//! - `tracing` instruments the generator functions with `tracing` spans.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;

mod error;
pub use error::{ClockError, Error};

mod id;
pub use id::{ParseError, Uuid, Variant};

pub mod timestamp;
pub use timestamp::{Config, Timestamp};

pub mod generator;
pub use generator::{
    generate_with, with_rand08, with_reader, CombGenerator, EntropySource, StdSystemTime,
    TimeSource,
};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::new_timestamped_uuid;
