//! Polymorphic Encryption and Pseudonymisation
//!
//! This library implements a polymorphic encryption protocol over the BN254 G1
//! group: a central issuer encrypts a short identifier into a *polymorphic*
//! cryptogram, untrusted relays transform it without decrypting it, and only
//! the designated endpoint can recover the identifier.
//!
//! ## Overview
//!
//! The scheme is built from generalized ElGamal cryptograms `(A, B, C)` and
//! three transforms that need no private key:
//!
//! - **Rerandomize**: refresh the randomness, same plaintext
//! - **Reshuffle / Unshuffle**: multiply the plaintext by a scalar, and its inverse
//! - **ReKey**: move the decryption key from `x` to `x * k`
//!
//! ## Key Components
//!
//! - **Authority**: generates global keys and masters, provisions every role
//! - **Issuer**: `embed -> unshuffle(relay key) -> encrypt(Y)`
//! - **Relay**: `rerandomize(Y) -> reshuffle(relay key) -> rekey(endpoint key)`
//! - **Endpoint**: `decrypt -> unembed`
//!
//! The scheme gives confidentiality and unlinkability, not integrity: a
//! cryptogram sent to the wrong place only shows up as a `PepError::Decode`.
//!
//! ## Example
//!
//! ```rust
//! use ark_std::rand::{rngs::StdRng, SeedableRng};
//! use polymorphic_encryption::{
//!     authority::KeyAuthority,
//!     roles::{Endpoint, Issuer, Relay},
//! };
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let mut kma = KeyAuthority::with_rng(&mut rng).unwrap();
//!
//! let mut issuer = Issuer::new("AS1");
//! let mut relay = Relay::new("AP1");
//! let mut endpoint = Endpoint::new("SP1");
//!
//! kma.register_issuer(&mut issuer);
//! kma.register_relay(&mut relay).unwrap();
//! kma.register_endpoint(&mut endpoint).unwrap();
//!
//! let polymorphic = issuer.activate(b"BSN1234", relay.id()).unwrap();
//! let encrypted = relay.transform(&polymorphic, endpoint.id()).unwrap();
//! let identifier = endpoint.decrypt(&encrypted).unwrap();
//!
//! assert_eq!(identifier, b"BSN1234");
//! ```

pub mod authority;
pub mod decryption;
pub mod derivation;
pub mod embedding;
pub mod encryption;
pub mod error;
pub mod group;
pub mod keys;
pub mod rng;
pub mod roles;
pub mod transform;

pub use embedding::MAX_IDENTIFIER_LEN;
pub use encryption::Cryptogram;
pub use error::PepError;
