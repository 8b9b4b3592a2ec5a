//! Homomorphic transforms on cryptograms
//!
//! None of these need a private key. The relay pipeline is
//! `rerandomize -> reshuffle -> rekey`. `rerandomize` must run while the
//! cryptogram is still keyed to the public key it is given: rerandomizing
//! under the global key after `rekey` adds noise the endpoint key cannot
//! cancel.

use ark_std::rand::{CryptoRng, RngCore};

use crate::encryption::Cryptogram;
use crate::error::PepError;
use crate::group::{generator, invert, random_scalar, Point, Scalar};

/// Refreshes the randomness of `ct` under `pk`.
///
/// `A' = A + s*G`, `B' = B + s*pk`, `C' = pk`. The plaintext recovered by the
/// matching private key is unchanged, but the result is unlinkable to `ct`.
///
/// # Errors
/// Returns `PepError::Randomness` if the RNG fails.
pub fn rerandomize<R: RngCore + CryptoRng + ?Sized>(
    ct: &Cryptogram,
    pk: &Point,
    rng: &mut R,
) -> Result<Cryptogram, PepError> {
    let s = random_scalar(rng)?;
    Ok(Cryptogram::new(
        ct.a() + generator() * s,
        ct.b() + *pk * s,
        *pk,
    ))
}

/// Multiplies the encrypted message by `k`.
///
/// `A' = k*A`, `B' = k*B`, `C` unchanged. Decrypting afterwards yields
/// `k*m`, not `m`.
pub fn reshuffle(ct: &Cryptogram, k: &Scalar) -> Cryptogram {
    Cryptogram::new(ct.a() * k, ct.b() * k, ct.c())
}

/// Divides a plaintext point by `k`, undoing a later [`reshuffle`] by `k`.
///
/// # Errors
/// Returns `PepError::Precondition` if `k` is zero.
pub fn unshuffle(m: &Point, k: &Scalar) -> Result<Point, PepError> {
    Ok(*m * invert(k)?)
}

/// Moves the decryption key from `x` to `x*k`.
///
/// `A' = k^-1*A`, `B` unchanged, `C' = k*C`.
///
/// # Errors
/// Returns `PepError::Precondition` if `k` is zero.
pub fn rekey(ct: &Cryptogram, k: &Scalar) -> Result<Cryptogram, PepError> {
    let k_inv = invert(k)?;
    Ok(Cryptogram::new(ct.a() * k_inv, ct.b(), ct.c() * k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decryption::decrypt;
    use crate::embedding::{embed, unembed};
    use crate::encryption::encrypt;
    use crate::keys::KeyPair;
    use ark_std::Zero;

    #[test]
    fn test_rerandomize_preserves_plaintext() {
        let mut rng = crate::rng::test_rng();
        let kp = KeyPair::generate(&mut rng).unwrap();
        let sk = kp.private_key().expose_secret();
        let m = embed(b"BSN1234").unwrap();
        let ct = encrypt(&kp.public_key(), &m, &mut rng).unwrap();

        let r1 = rerandomize(&ct, &kp.public_key(), &mut rng).unwrap();
        let r2 = rerandomize(&ct, &kp.public_key(), &mut rng).unwrap();

        assert_eq!(decrypt(sk, &r1), decrypt(sk, &ct));
        assert_eq!(decrypt(sk, &r2), m);
        assert_ne!(r1.a(), ct.a());
        assert_ne!(r1.b(), ct.b());
        assert_ne!(r1.a(), r2.a());
        assert_ne!(r1.b(), r2.b());
        assert_eq!(r1.c(), kp.public_key());
    }

    #[test]
    fn test_reshuffle_unshuffle_inverse() {
        let mut rng = crate::rng::test_rng();
        let kp = KeyPair::generate(&mut rng).unwrap();
        let sk = kp.private_key().expose_secret();

        let payloads: [&[u8]; 3] = [b"BSN1234", b"", b"0123456789abcdef"];
        for payload in payloads {
            let k = random_scalar(&mut rng).unwrap();
            let m = embed(payload).unwrap();
            let masked = unshuffle(&m, &k).unwrap();
            let ct = encrypt(&kp.public_key(), &masked, &mut rng).unwrap();

            let shuffled = reshuffle(&ct, &k);
            assert_eq!(decrypt(sk, &shuffled), m);
            assert_eq!(shuffled.c(), ct.c());
            assert_eq!(unembed(&decrypt(sk, &shuffled)).unwrap(), payload);
        }
    }

    #[test]
    fn test_reshuffle_scales_plaintext() {
        let mut rng = crate::rng::test_rng();
        let kp = KeyPair::generate(&mut rng).unwrap();
        let k = random_scalar(&mut rng).unwrap();
        let m = embed(b"AP1").unwrap();
        let ct = encrypt(&kp.public_key(), &m, &mut rng).unwrap();

        let shuffled = reshuffle(&ct, &k);
        assert_eq!(decrypt(kp.private_key().expose_secret(), &shuffled), m * k);
    }

    #[test]
    fn test_rekey_correctness() {
        let mut rng = crate::rng::test_rng();
        let kp = KeyPair::generate(&mut rng).unwrap();
        let k = random_scalar(&mut rng).unwrap();
        let m = embed(b"SP1").unwrap();
        let ct = encrypt(&kp.public_key(), &m, &mut rng).unwrap();

        let rekeyed = rekey(&ct, &k).unwrap();
        let target = kp.scaled(&k);

        assert_eq!(decrypt(target.private_key().expose_secret(), &rekeyed), m);
        assert_eq!(rekeyed.c(), target.public_key());
        assert_eq!(rekeyed.b(), ct.b());
        // The old key no longer works
        assert_ne!(decrypt(kp.private_key().expose_secret(), &rekeyed), m);
    }

    #[test]
    fn test_rerandomize_must_precede_rekey() {
        let mut rng = crate::rng::test_rng();
        let kp = KeyPair::generate(&mut rng).unwrap();
        let shuffle_key = random_scalar(&mut rng).unwrap();
        let rekey_key = random_scalar(&mut rng).unwrap();
        let m = embed(b"BSN1234").unwrap();
        let target = kp.scaled(&rekey_key);
        let target_sk = target.private_key().expose_secret();

        let masked = unshuffle(&m, &shuffle_key).unwrap();
        let ct = encrypt(&kp.public_key(), &masked, &mut rng).unwrap();

        let rerandomized = rerandomize(&ct, &kp.public_key(), &mut rng).unwrap();
        let in_order = rekey(&reshuffle(&rerandomized, &shuffle_key), &rekey_key).unwrap();
        assert_eq!(decrypt(target_sk, &in_order), m);

        let rekeyed = rekey(&reshuffle(&ct, &shuffle_key), &rekey_key).unwrap();
        let late = rerandomize(&rekeyed, &kp.public_key(), &mut rng).unwrap();
        assert!(matches!(unembed(&decrypt(target_sk, &late)), Err(PepError::Decode(_))));

        // Rerandomizing under the key the cryptogram is keyed to is always safe
        let fresh = rerandomize(&rekeyed, &target.public_key(), &mut rng).unwrap();
        assert_eq!(decrypt(target_sk, &fresh), m);
    }

    #[test]
    fn test_zero_scalar_is_rejected() {
        let mut rng = crate::rng::test_rng();
        let kp = KeyPair::generate(&mut rng).unwrap();
        let m = embed(b"BSN1234").unwrap();
        let ct = encrypt(&kp.public_key(), &m, &mut rng).unwrap();

        assert!(matches!(unshuffle(&m, &Scalar::zero()), Err(PepError::Precondition(_))));
        assert!(matches!(rekey(&ct, &Scalar::zero()), Err(PepError::Precondition(_))));
    }
}
