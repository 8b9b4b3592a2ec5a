//! OS entropy for the arkworks RNG traits
//!
//! arkworks consumes `ark_std::rand` (rand 0.8) generators, while OS entropy is
//! taken from `rand` 0.9. `OsEntropy` reads the operating system generator on
//! every call and reports failures through `try_fill_bytes` instead of
//! panicking, so callers see them as `PepError::Randomness`.

use std::num::NonZeroU32;

use ark_std::rand::{CryptoRng, Error, RngCore};
use rand::{rngs::OsRng, TryRngCore};

/// Error code reported when the OS generator fails.
const OS_RNG_FAILURE: NonZeroU32 = match NonZeroU32::new(Error::CUSTOM_START) {
    Some(code) => code,
    None => unreachable!(),
};

/// Cryptographically secure RNG backed directly by the OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl OsEntropy {
    pub fn new() -> Self {
        OsEntropy
    }
}

impl RngCore for OsEntropy {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    /// Panics if the OS generator fails. Crate code draws through
    /// `try_fill_bytes` so the failure surfaces as `PepError::Randomness`;
    /// callers that need the error must do the same.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill_bytes(dest) {
            panic!("OS random number generator failed: {}", e);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        OsRng.try_fill_bytes(dest).map_err(|e| {
            tracing::error!(error = %e, "OS random number generator failed");
            Error::from(OS_RNG_FAILURE)
        })
    }
}

impl CryptoRng for OsEntropy {}

/// Seeded generator for tests; `StdRng` is a `CryptoRng`, unlike the
/// opaque generator returned by `ark_std::test_rng`.
#[cfg(test)]
pub(crate) fn test_rng() -> ark_std::rand::rngs::StdRng {
    use ark_std::rand::SeedableRng;
    ark_std::rand::rngs::StdRng::seed_from_u64(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_entropy_fills() {
        let mut rng = OsEntropy::new();
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        rng.try_fill_bytes(&mut a).unwrap();
        rng.try_fill_bytes(&mut b).unwrap();
        assert_ne!(a, b);
        assert_ne!(rng.next_u64(), rng.next_u64());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a = crate::group::random_scalar(&mut test_rng()).unwrap();
        let b = crate::group::random_scalar(&mut test_rng()).unwrap();
        assert_eq!(a, b);

        let mut rng = test_rng();
        let first = crate::keys::KeyPair::generate(&mut rng).unwrap();
        let second = crate::keys::KeyPair::generate(&mut rng).unwrap();
        assert_ne!(first.public_key(), second.public_key());
    }

    #[test]
    fn test_os_entropy_samples_scalars() {
        let mut rng = OsEntropy::new();
        let k = crate::group::random_scalar(&mut rng).unwrap();
        assert!(!ark_std::Zero::is_zero(&k));
    }
}
