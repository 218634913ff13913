//! Integration with `rand` (v0.8) crate.

use std::io;

use rand::RngCore;

use super::{CombGenerator, EntropySource};

/// An adapter that implements [`EntropySource`] for [`RngCore`] types.
///
/// Failures reported by [`RngCore::try_fill_bytes`] are surfaced as [`io::Error`]s.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> EntropySource for Adapter<T> {
    fn fill_exact(&mut self, dest: &mut [u8]) -> io::Result<()> {
        self.0.try_fill_bytes(dest).map_err(io::Error::from)
    }
}

impl<T: RngCore> CombGenerator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// Pass a cryptographically secure generator such as [`rand::rngs::OsRng`] or
    /// [`rand::rngs::ThreadRng`].
    pub const fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
