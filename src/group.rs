//! Group primitives shared by every other module
//!
//! All arithmetic happens in the prime-order G1 group of BN254. The curve has
//! cofactor 1, so every point on the curve is in the group and scalar inversion
//! exactly undoes scalar multiplication.

use ark_ec::PrimeGroup;
use ark_ff::{Field, PrimeField};
use ark_serialize::CanonicalSerialize;
use ark_std::{
    rand::{CryptoRng, RngCore},
    Zero,
};
use zeroize::Zeroize;

use crate::error::PepError;

/// Scalar field element.
pub type Scalar = ark_bn254::Fr;

/// Group element in projective form.
pub type Point = ark_bn254::G1Projective;

/// Length of a canonical scalar encoding.
pub const SCALAR_BYTES: usize = 32;

/// Length of a compressed point encoding.
pub const POINT_BYTES: usize = 32;

/// Number of uniform bytes reduced into one random scalar.
///
/// Twice the scalar length keeps the modular bias negligible.
const WIDE_SCALAR_BYTES: usize = 2 * SCALAR_BYTES;

/// Returns the fixed group generator `G`.
pub fn generator() -> Point {
    Point::generator()
}

/// Samples a uniformly random non-zero scalar.
///
/// # Errors
/// Returns `PepError::Randomness` if the RNG cannot produce bytes.
pub fn random_scalar<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Scalar, PepError> {
    let mut wide = [0u8; WIDE_SCALAR_BYTES];
    loop {
        rng.try_fill_bytes(&mut wide)
            .map_err(|e| PepError::Randomness(format!("failed to sample scalar: {}", e)))?;
        let scalar = reduce_scalar(&wide);
        if !scalar.is_zero() {
            wide.zeroize();
            return Ok(scalar);
        }
    }
}

/// Reduces arbitrary little-endian bytes into the scalar field.
///
/// This is the single canonical reduction rule: random sampling and key
/// derivation both go through it.
pub fn reduce_scalar(bytes: &[u8]) -> Scalar {
    Scalar::from_le_bytes_mod_order(bytes)
}

/// Computes `k^-1`.
///
/// # Errors
/// Returns `PepError::Precondition` if `k` is zero.
pub fn invert(k: &Scalar) -> Result<Scalar, PepError> {
    k.inverse()
        .ok_or_else(|| PepError::Precondition("scalar has no inverse (zero)".to_string()))
}

/// Canonical 32-byte encoding of a scalar.
///
/// # Errors
/// Returns `PepError::Serialization` if the scalar cannot be written.
pub fn scalar_to_bytes(k: &Scalar) -> Result<[u8; SCALAR_BYTES], PepError> {
    let mut out = [0u8; SCALAR_BYTES];
    k.serialize_compressed(&mut out[..])?;
    Ok(out)
}

/// Compressed 32-byte encoding of a point.
///
/// # Errors
/// Returns `PepError::Serialization` if the point cannot be written.
pub fn point_to_bytes(p: &Point) -> Result<[u8; POINT_BYTES], PepError> {
    let mut out = [0u8; POINT_BYTES];
    p.serialize_compressed(&mut out[..])?;
    Ok(out)
}
