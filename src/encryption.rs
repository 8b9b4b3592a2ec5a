use std::fmt;

use ark_serialize::*;
use ark_std::rand::{CryptoRng, RngCore};

use crate::error::PepError;
use crate::group::{generator, random_scalar, Point, POINT_BYTES};

/// Size of a cryptogram on the wire: three compressed points.
pub const CRYPTOGRAM_BYTES: usize = 3 * POINT_BYTES;

/// A generalized ElGamal ciphertext `(A, B, C)`.
///
/// `A = t*G`, `B = m + t*pk` and `C = pk`, where `pk` is the key the ciphertext
/// is currently keyed to. `C` is advisory: it is carried through every
/// transform but never checked during decryption.
///
/// Cryptograms are immutable; every transform returns a new value.
#[derive(CanonicalSerialize, CanonicalDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cryptogram {
    a: Point,
    b: Point,
    c: Point,
}

impl Cryptogram {
    /// Creates a new cryptogram from its three components.
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Cryptogram { a, b, c }
    }

    /// Ephemeral component `t*G`.
    pub fn a(&self) -> Point {
        self.a
    }

    /// Masked message component `m + t*pk`.
    pub fn b(&self) -> Point {
        self.b
    }

    /// Public key tag.
    pub fn c(&self) -> Point {
        self.c
    }

    /// Encodes as `A || B || C`, each a 32-byte compressed point.
    ///
    /// There is no framing or authentication tag; transports that need
    /// integrity must add their own.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PepError> {
        let mut bytes = Vec::with_capacity(CRYPTOGRAM_BYTES);
        self.serialize_compressed(&mut bytes)?;
        Ok(bytes)
    }

    /// Decodes `A || B || C`, checking that every point is a valid group element.
    ///
    /// # Errors
    /// Returns `PepError::Serialization` on a length mismatch or an invalid point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PepError> {
        if bytes.len() != CRYPTOGRAM_BYTES {
            return Err(PepError::Serialization(format!(
                "cryptogram must be {} bytes, got {}",
                CRYPTOGRAM_BYTES,
                bytes.len()
            )));
        }
        Ok(Cryptogram::deserialize_compressed(bytes)?)
    }
}

impl fmt::Display for Cryptogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_bytes() {
            Ok(bytes) => f.write_str(&hex::encode(bytes)),
            Err(_) => f.write_str("<unencodable cryptogram>"),
        }
    }
}

/// Encrypts the point `m` under `pk`.
///
/// A fresh `t` is drawn for every call; reusing it would break semantic
/// security.
///
/// # Errors
/// Returns `PepError::Randomness` if the RNG fails.
pub fn encrypt<R: RngCore + CryptoRng + ?Sized>(
    pk: &Point,
    m: &Point,
    rng: &mut R,
) -> Result<Cryptogram, PepError> {
    let t = random_scalar(rng)?;

    Ok(Cryptogram {
        a: generator() * t,
        b: *m + *pk * t,
        c: *pk,
    })
}
