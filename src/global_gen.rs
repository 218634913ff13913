//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{Error, Uuid};
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator slot.
///
/// The guarded state is only a random number generator, so a poisoned lock is recovered.
fn lock_global_gen() -> sync::MutexGuard<'static, Option<GlobalGenInner>> {
    static G: sync::OnceLock<sync::Mutex<Option<GlobalGenInner>>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner)
}

/// Generates a timestamped UUID with the default layout.
///
/// The identifier carries 73 bits of cryptographically strong random data in its first ten bytes
/// and a 100-microsecond timestamp in its last six bytes, which covers about 892 years before
/// wrapping. The version field is set at `6` and the variant field at `111`.
///
/// This function employs a global generator seeded from the operating system. On Unix, the
/// generator is reseeded when the process ID changes (i.e., upon process forks) to prevent
/// collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = comb::new_timestamped_uuid()?;
/// println!("{}", uuid); // e.g., "3f9a1c2e-77d0-6b41-e5c3-0391e21d7a5f"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
/// # Ok::<(), comb::Error>(())
/// ```
pub fn new_timestamped_uuid() -> Result<Uuid, Error> {
    let mut slot = lock_global_gen();
    let inner = match &mut *slot {
        Some(inner) => inner,
        empty => empty.insert(GlobalGenInner::new()?),
    };
    inner.get_mut()?.generate()
}

mod inner {
    use std::io;

    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::{CombGenerator, EntropySource};
    use crate::Error;

    /// The random number generator of the global generator.
    ///
    /// The global generator employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to emulate the
    /// strategy used by [`rand::rngs::ThreadRng`].
    #[derive(Debug)]
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl GlobalGenRng {
        fn new() -> Result<Self, Error> {
            let core = ChaCha12Core::from_rng(OsRng)
                .map_err(|err| Error::Entropy(io::Error::from(err)))?;
            Ok(Self(ReseedingRng::new(core, 1024 * 64, OsRng)))
        }
    }

    impl EntropySource for GlobalGenRng {
        fn fill_exact(&mut self, dest: &mut [u8]) -> io::Result<()> {
            rand::RngCore::try_fill_bytes(&mut self.0, dest).map_err(io::Error::from)
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: CombGenerator<GlobalGenRng>,
    }

    impl GlobalGenInner {
        pub fn new() -> Result<Self, Error> {
            Ok(Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: CombGenerator::new(GlobalGenRng::new()?),
            })
        }

        /// Returns a mutable reference to the inner [`CombGenerator`] instance, reseeding the
        /// generator on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> Result<&mut CombGenerator<GlobalGenRng>, Error> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                #[cfg(feature = "tracing")]
                tracing::debug!(old_pid = self.pid, "process ID changed; reseeding generator");
                *self = Self::new()?;
            }
            Ok(&mut self.generator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::new_timestamped_uuid;
    use crate::{Config, Timestamp, Variant};

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES)
        .map(|_| new_timestamped_uuid().unwrap().into())
        .collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-6[0-9a-f]{3}-[ef][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        for _ in 0..10_000 {
            let ts_now = Config::DEFAULT.stored_units(Timestamp::now().unwrap()) as i64;
            let timestamp = new_timestamped_uuid().unwrap().timestamp() as i64;
            assert!((ts_now - timestamp).abs() < 100);
        }
    }

    /// Encodes non-decreasing timestamps over time
    #[test]
    fn encodes_non_decreasing_timestamps_over_time() {
        let mut prev = new_timestamped_uuid().unwrap().timestamp();
        for _ in 0..10_000 {
            let curr = new_timestamped_uuid().unwrap().timestamp();
            assert!(prev <= curr);
            prev = curr;
        }
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = new_timestamped_uuid().unwrap();
            assert_eq!(e.variant(), Variant::Var111);
            assert_eq!(e.version(), 6);
        }
    }

    /// Generates no collisions under multithreading
    #[test]
    fn generates_no_collisions_under_multithreading() -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(new_timestamped_uuid().unwrap()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            s.insert(e);
        }

        assert_eq!(s.len(), 4 * 10_000);
        Ok(())
    }
}
