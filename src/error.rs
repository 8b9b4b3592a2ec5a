//! Error types for the polymorphic encryption library

use ark_serialize::SerializationError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PepError {
    /// An input violated a precondition (e.g., identifier too long, zero scalar)
    #[error("precondition failed: {0}")]
    Precondition(String),
    /// A role was used before the authority granted it keys
    #[error("key not provisioned: {0}")]
    KeyNotProvisioned(String),
    /// A decrypted point does not carry a valid embedded payload.
    ///
    /// This is the only observable signal of mismatched keys or a tampered
    /// ciphertext. It is not an authenticity guarantee.
    #[error("decode error: {0}")]
    Decode(String),
    /// The secure random number generator failed
    #[error("randomness error: {0}")]
    Randomness(String),
    /// Wire encoding or decoding of group elements failed
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<SerializationError> for PepError {
    fn from(err: SerializationError) -> Self {
        PepError::Serialization(err.to_string())
    }
}
