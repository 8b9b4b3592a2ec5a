//! Per-role key derivation
//!
//! `derive_key` is the one place the keyed hash is computed. The authority
//! uses it at registration, the issuer to find a relay's adherence key and the
//! relay to find an endpoint's rekey scalar; all three must agree byte for byte.

use blake2::{digest::Mac, Blake2bMac512};
use zeroize::Zeroize;

use crate::error::PepError;
use crate::group::{reduce_scalar, scalar_to_bytes, Scalar};
use crate::keys::MasterKey;

/// Derives the scalar bound to `identifier` under `master`.
///
/// Computes BLAKE2b-512 in keyed mode over `identifier` with the canonical
/// 32-byte master encoding as key, then reduces the tag into the scalar field.
///
/// # Errors
/// Returns `PepError::Serialization` if the master cannot be encoded, or
/// `PepError::Precondition` if the MAC rejects the key length.
pub fn derive_key(master: &MasterKey, identifier: &[u8]) -> Result<Scalar, PepError> {
    let mut key = scalar_to_bytes(master.secret().expose_secret())?;
    let mac = Blake2bMac512::new_with_salt_and_personal(&key, &[], &[]);
    key.zeroize();

    let mut mac = mac.map_err(|e| PepError::Precondition(format!("invalid MAC key: {}", e)))?;
    mac.update(identifier);
    let mut tag = mac.finalize().into_bytes();
    let derived = reduce_scalar(&tag);
    tag.as_mut_slice().zeroize();

    Ok(derived)
}
