//! Integration with [`std::io::Read`] byte streams.

use std::io;

use super::{CombGenerator, EntropySource};

/// An adapter that implements [`EntropySource`] for [`io::Read`] types.
///
/// The random region is filled with [`io::Read::read_exact`], so a stream that ends early fails
/// with [`io::ErrorKind::UnexpectedEof`] instead of leaving zero bytes behind.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<R>(/** The wrapped [`io::Read`] type. */ pub R);

impl<R: io::Read> EntropySource for Adapter<R> {
    fn fill_exact(&mut self, dest: &mut [u8]) -> io::Result<()> {
        self.0.read_exact(dest)
    }
}

impl<R: io::Read> CombGenerator<Adapter<R>> {
    /// Creates a generator object that reads random bytes from a byte stream, such as an opened
    /// `/dev/urandom`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use comb::CombGenerator;
    ///
    /// let urandom = std::fs::File::open("/dev/urandom")?;
    /// let mut g = CombGenerator::with_reader(urandom);
    /// println!("{}", g.generate()?);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub const fn with_reader(reader: R) -> Self {
        Self::new(Adapter(reader))
    }
}
