//! Reversible encoding of short byte strings as group elements
//!
//! The payload is written into the x-coordinate of a curve point:
//!
//! ```text
//! byte 0       payload length (0..=16)
//! bytes 1..17  payload, zero padded
//! byte 17      try counter
//! bytes 18..32 zero
//! ```
//!
//! The first counter for which `x^3 + 3` is a square gives the point (taking
//! the smaller `y`). Since BN254 G1 has cofactor 1, that point is a group
//! element. Decoding reads the x-coordinate back and re-embeds to check that
//! the point is exactly the canonical one.

use ark_bn254::{Fq, G1Affine};
use ark_ec::CurveGroup;
use ark_ff::{BigInteger, PrimeField};
use ark_std::Zero;

use crate::error::PepError;
use crate::group::Point;

/// Largest payload that fits in one group element.
pub const MAX_IDENTIFIER_LEN: usize = 16;

const LEN_OFFSET: usize = 0;
const PAYLOAD_OFFSET: usize = 1;
const COUNTER_OFFSET: usize = PAYLOAD_OFFSET + MAX_IDENTIFIER_LEN;
const USED_BYTES: usize = COUNTER_OFFSET + 1;
const FIELD_BYTES: usize = 32;

/// Encodes up to [`MAX_IDENTIFIER_LEN`] bytes as a group element.
///
/// # Errors
/// Returns `PepError::Precondition` if `payload` is too long, or if no counter
/// value lands on the curve (probability 2^-256).
pub fn embed(payload: &[u8]) -> Result<Point, PepError> {
    if payload.len() > MAX_IDENTIFIER_LEN {
        return Err(PepError::Precondition(format!(
            "payload length ({}) exceeds maximum embeddable length ({})",
            payload.len(),
            MAX_IDENTIFIER_LEN
        )));
    }

    let mut x_bytes = [0u8; FIELD_BYTES];
    x_bytes[LEN_OFFSET] = payload.len() as u8;
    x_bytes[PAYLOAD_OFFSET..PAYLOAD_OFFSET + payload.len()].copy_from_slice(payload);

    for counter in 0..=u8::MAX {
        x_bytes[COUNTER_OFFSET] = counter;
        // Top 14 bytes are zero, so this never wraps modulo the field prime.
        let x = Fq::from_le_bytes_mod_order(&x_bytes);
        if let Some(point) = G1Affine::get_point_from_x_unchecked(x, false) {
            return Ok(point.into());
        }
    }

    Err(PepError::Precondition(
        "payload has no curve point for any counter value".to_string(),
    ))
}

/// Recovers the payload from a point produced by [`embed`].
///
/// # Errors
/// Returns `PepError::Decode` if the point does not carry a canonical
/// embedding. After decryption this means the keys along the chain did not
/// match, or the ciphertext was altered.
pub fn unembed(point: &Point) -> Result<Vec<u8>, PepError> {
    if point.is_zero() {
        return Err(PepError::Decode("point at infinity carries no payload".to_string()));
    }

    let affine = point.into_affine();
    let x_bytes = affine.x.into_bigint().to_bytes_le();

    if x_bytes.len() < USED_BYTES || x_bytes[USED_BYTES..].iter().any(|b| *b != 0) {
        return Err(PepError::Decode("x-coordinate has non-zero tail".to_string()));
    }

    let len = x_bytes[LEN_OFFSET] as usize;
    if len > MAX_IDENTIFIER_LEN {
        return Err(PepError::Decode(format!("invalid payload length {}", len)));
    }
    let payload = &x_bytes[PAYLOAD_OFFSET..PAYLOAD_OFFSET + len];
    if x_bytes[PAYLOAD_OFFSET + len..COUNTER_OFFSET]
        .iter()
        .any(|b| *b != 0)
    {
        return Err(PepError::Decode("payload padding is not zero".to_string()));
    }

    // Rejects the negated point and skipped counters.
    match embed(payload) {
        Ok(canonical) if canonical == *point => Ok(payload.to_vec()),
        _ => Err(PepError::Decode("point is not a canonical embedding".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{generator, random_scalar};

    #[test]
    fn test_embed_unembed() {
        let payloads: [&[u8]; 5] = [b"", b"BSN1234", b"0123456789abcdef", &[0u8; 16], &[0xff; 3]];
        for payload in payloads {
            let point = embed(payload).unwrap();
            assert_eq!(unembed(&point).unwrap(), payload);
        }
    }

    #[test]
    fn test_embedding_is_deterministic_and_injective() {
        assert_eq!(embed(b"AP1").unwrap(), embed(b"AP1").unwrap());
        assert_ne!(embed(b"AP1").unwrap(), embed(b"AP2").unwrap());
        // Trailing zero bytes are part of the payload
        assert_ne!(embed(b"A").unwrap(), embed(b"A\0").unwrap());
    }

    #[test]
    fn test_embed_rejects_long_payload() {
        let result = embed(&[7u8; MAX_IDENTIFIER_LEN + 1]);
        assert!(matches!(result, Err(PepError::Precondition(_))));
    }

    #[test]
    fn test_unembed_rejects_foreign_points() {
        let mut rng = crate::rng::test_rng();
        let k = random_scalar(&mut rng).unwrap();

        assert!(matches!(unembed(&(generator() * k)), Err(PepError::Decode(_))));
        assert!(matches!(unembed(&Point::zero()), Err(PepError::Decode(_))));
    }

    #[test]
    fn test_unembed_rejects_negated_point() {
        let point = embed(b"BSN1234").unwrap();
        assert!(matches!(unembed(&-point), Err(PepError::Decode(_))));
    }
}
