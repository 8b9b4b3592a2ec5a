//! Key material: secret scalar wrapper, key pairs and master keys
//!
//! Every secret scalar in the crate lives inside a [`SecretScalar`], which
//! zeroizes on drop and never prints its value.

use ark_std::{
    rand::{CryptoRng, RngCore},
    Zero,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::PepError;
use crate::group::{generator, random_scalar, Point, Scalar};

/// Wrapper for secret scalars that zeroizes on drop.
///
/// # Security
/// - Overwritten with zero when dropped
/// - `Debug` output is redacted
#[derive(Clone)]
pub struct SecretScalar {
    value: Scalar,
}

impl SecretScalar {
    pub fn new(value: Scalar) -> Self {
        Self { value }
    }

    /// Samples a fresh random non-zero secret.
    pub fn random<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Self, PepError> {
        Ok(Self::new(random_scalar(rng)?))
    }

    /// Get a reference to the inner value
    ///
    /// # Security Warning
    /// The caller must ensure this reference is not used to leak the value
    pub fn expose_secret(&self) -> &Scalar {
        &self.value
    }
}

impl Zeroize for SecretScalar {
    fn zeroize(&mut self) {
        // arkworks field elements don't expose their limbs mutably, so
        // overwrite with the zero element.
        self.value = Scalar::zero();
    }
}

impl ZeroizeOnDrop for SecretScalar {}

impl Drop for SecretScalar {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl std::fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretScalar([REDACTED])")
    }
}

/// An ElGamal key pair: `public = private * G`.
#[derive(Clone, Debug)]
pub struct KeyPair {
    private: SecretScalar,
    public: Point,
}

impl KeyPair {
    /// Generates a fresh key pair.
    ///
    /// # Errors
    /// Returns `PepError::Randomness` if the RNG fails.
    pub fn generate<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Self, PepError> {
        let private = SecretScalar::random(rng)?;
        let public = generator() * private.expose_secret();
        Ok(KeyPair { private, public })
    }

    /// Builds a key pair from an existing private scalar.
    pub fn from_private(private: SecretScalar) -> Self {
        let public = generator() * private.expose_secret();
        KeyPair { private, public }
    }

    pub fn private_key(&self) -> &SecretScalar {
        &self.private
    }

    pub fn public_key(&self) -> Point {
        self.public
    }

    /// Multiplies the private key by `k`, producing the key pair that decrypts
    /// ciphertexts rekeyed by `k`.
    pub fn scaled(&self, k: &Scalar) -> KeyPair {
        KeyPair::from_private(SecretScalar::new(*self.private.expose_secret() * k))
    }
}

/// What a master key is used to derive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MasterKeyPurpose {
    /// Binds polymorphic cryptograms to one relay
    Adherence,
    /// Scales the global identity key into per-endpoint decryption keys
    EndpointEncryption,
}

/// A uniformly random master scalar scoped to a single purpose.
#[derive(Clone, Debug)]
pub struct MasterKey {
    purpose: MasterKeyPurpose,
    secret: SecretScalar,
}

impl MasterKey {
    pub fn generate<R: RngCore + CryptoRng + ?Sized>(
        purpose: MasterKeyPurpose,
        rng: &mut R,
    ) -> Result<Self, PepError> {
        Ok(MasterKey {
            purpose,
            secret: SecretScalar::random(rng)?,
        })
    }

    pub fn purpose(&self) -> MasterKeyPurpose {
        self.purpose
    }

    pub fn secret(&self) -> &SecretScalar {
        &self.secret
    }
}
