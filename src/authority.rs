//! Key management authority
//!
//! The authority is the root of trust. It creates the global key pairs and the
//! two master keys once, then hands each registering role exactly the keys that
//! role needs. It is the only holder of the global identity private key.

use std::collections::BTreeMap;

use ark_std::rand::{CryptoRng, RngCore};
use tracing::{info, warn};

use crate::derivation::derive_key;
use crate::error::PepError;
use crate::group::Point;
use crate::keys::{KeyPair, MasterKey, MasterKeyPurpose, SecretScalar};
use crate::rng::OsEntropy;
use crate::roles::{Endpoint, EndpointKeys, Issuer, IssuerKeys, Relay, RelayKeys};

/// Kind of role recorded in the registration table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleKind {
    Issuer,
    Relay,
    Endpoint,
}

/// Entry in the registration table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub kind: RoleKind,
    pub id: String,
    /// Public decryption key, for endpoints
    pub public_key: Option<Point>,
}

pub struct KeyAuthority {
    /// Global identity key pair `(y, Y)`
    identity: KeyPair,
    /// Global pseudonym key pair `(z, Z)`; only the public half is handed out
    pseudonym: KeyPair,
    adherence_master: MasterKey,
    encryption_master: MasterKey,
    registry: BTreeMap<(RoleKind, String), Registration>,
}

impl KeyAuthority {
    /// Creates an authority with key material drawn from OS entropy.
    ///
    /// # Errors
    /// Returns `PepError::Randomness` if the OS generator fails.
    pub fn new() -> Result<Self, PepError> {
        Self::with_rng(&mut OsEntropy::new())
    }

    /// Creates an authority with key material drawn from `rng`.
    ///
    /// # Errors
    /// Returns `PepError::Randomness` if `rng` fails.
    pub fn with_rng<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Self, PepError> {
        let identity = KeyPair::generate(rng)?;
        let pseudonym = KeyPair::generate(rng)?;
        let adherence_master = MasterKey::generate(MasterKeyPurpose::Adherence, rng)?;
        let encryption_master = MasterKey::generate(MasterKeyPurpose::EndpointEncryption, rng)?;

        info!("key management authority initialized");
        Ok(KeyAuthority {
            identity,
            pseudonym,
            adherence_master,
            encryption_master,
            registry: BTreeMap::new(),
        })
    }

    /// Global identity public key `Y`.
    pub fn identity_public_key(&self) -> Point {
        self.identity.public_key()
    }

    /// Global pseudonym public key `Z`.
    pub fn pseudonym_public_key(&self) -> Point {
        self.pseudonym.public_key()
    }

    /// Grants `issuer` the identity public key and the adherence master.
    pub fn register_issuer(&mut self, issuer: &mut Issuer) {
        self.record(RoleKind::Issuer, issuer.id(), None);
        issuer.provision(IssuerKeys::new(
            self.identity.public_key(),
            self.adherence_master.clone(),
        ));
    }

    /// Grants `relay` the identity public key, its derived adherence key and
    /// the endpoint-encryption master.
    ///
    /// # Errors
    /// Returns an error if key derivation fails.
    pub fn register_relay(&mut self, relay: &mut Relay) -> Result<(), PepError> {
        let adherence_key = derive_key(&self.adherence_master, relay.id().as_bytes())?;

        self.record(RoleKind::Relay, relay.id(), None);
        relay.provision(RelayKeys::new(
            self.identity.public_key(),
            SecretScalar::new(adherence_key),
            self.encryption_master.clone(),
        ));
        Ok(())
    }

    /// Grants `endpoint` its private key `y * IEd_i`, where
    /// `IEd_i = derive_key(encryption master, endpoint id)`, along with both
    /// global public keys.
    ///
    /// # Errors
    /// Returns an error if key derivation fails.
    pub fn register_endpoint(&mut self, endpoint: &mut Endpoint) -> Result<(), PepError> {
        let derived = derive_key(&self.encryption_master, endpoint.id().as_bytes())?;
        let decryption_key = self.identity.scaled(&derived);

        self.record(RoleKind::Endpoint, endpoint.id(), Some(decryption_key.public_key()));
        endpoint.provision(EndpointKeys::new(
            self.identity.public_key(),
            self.pseudonym.public_key(),
            decryption_key,
        ));
        Ok(())
    }

    pub fn is_registered(&self, kind: RoleKind, id: &str) -> bool {
        self.registry.contains_key(&(kind, id.to_string()))
    }

    /// Public decryption key of a registered endpoint.
    pub fn endpoint_public_key(&self, id: &str) -> Option<Point> {
        self.registry
            .get(&(RoleKind::Endpoint, id.to_string()))
            .and_then(|r| r.public_key)
    }

    /// All registrations, ordered by role kind then id.
    pub fn registrations(&self) -> impl Iterator<Item = &Registration> {
        self.registry.values()
    }

    fn record(&mut self, kind: RoleKind, id: &str, public_key: Option<Point>) {
        let registration = Registration {
            kind,
            id: id.to_string(),
            public_key,
        };
        if self
            .registry
            .insert((kind, id.to_string()), registration)
            .is_some()
        {
            warn!(role = ?kind, id = %id, "role registered again; granting the same keys");
        } else {
            info!(role = ?kind, id = %id, "registered role");
        }
    }
}

impl std::fmt::Debug for KeyAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyAuthority")
            .field("identity_public", &self.identity.public_key())
            .field("pseudonym_public", &self.pseudonym.public_key())
            .field("registrations", &self.registry.len())
            .finish_non_exhaustive()
    }
}
