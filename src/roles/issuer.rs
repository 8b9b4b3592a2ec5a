use ark_std::rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::derivation::derive_key;
use crate::embedding::{embed, MAX_IDENTIFIER_LEN};
use crate::encryption::{encrypt, Cryptogram};
use crate::error::PepError;
use crate::group::Point;
use crate::keys::MasterKey;
use crate::rng::OsEntropy;
use crate::transform::unshuffle;

/// Keys the authority grants an issuer.
#[derive(Clone, Debug)]
pub struct IssuerKeys {
    /// Global identity public key `Y`
    identity_public: Point,
    /// Adherence master; the issuer derives each relay's key from it
    adherence_master: MasterKey,
}

impl IssuerKeys {
    pub(crate) fn new(identity_public: Point, adherence_master: MasterKey) -> Self {
        IssuerKeys {
            identity_public,
            adherence_master,
        }
    }
}

/// Turns identifiers into polymorphic cryptograms bound to one relay.
#[derive(Debug)]
pub struct Issuer {
    id: String,
    keys: Option<IssuerKeys>,
}

impl Issuer {
    /// Creates an issuer with no keys; register it with the authority before use.
    pub fn new(id: impl Into<String>) -> Self {
        Issuer {
            id: id.into(),
            keys: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_provisioned(&self) -> bool {
        self.keys.is_some()
    }

    pub(crate) fn provision(&mut self, keys: IssuerKeys) {
        self.keys = Some(keys);
    }

    /// Activates `identifier` for the relay `relay_id` using OS entropy.
    ///
    /// See [`Issuer::activate_with_rng`].
    pub fn activate(&self, identifier: &[u8], relay_id: &str) -> Result<Cryptogram, PepError> {
        self.activate_with_rng(identifier, relay_id, &mut OsEntropy::new())
    }

    /// Produces a polymorphic cryptogram of `identifier` that only the relay
    /// `relay_id` can transform correctly.
    ///
    /// Runs `embed -> unshuffle(relay adherence key) -> encrypt(Y)`.
    ///
    /// # Errors
    /// - `PepError::Precondition` if `identifier` is longer than
    ///   [`MAX_IDENTIFIER_LEN`]; checked before any cryptographic work
    /// - `PepError::KeyNotProvisioned` if the issuer was never registered
    /// - `PepError::Randomness` if the RNG fails
    pub fn activate_with_rng<R: RngCore + CryptoRng + ?Sized>(
        &self,
        identifier: &[u8],
        relay_id: &str,
        rng: &mut R,
    ) -> Result<Cryptogram, PepError> {
        if identifier.len() > MAX_IDENTIFIER_LEN {
            return Err(PepError::Precondition(format!(
                "identifier length ({}) exceeds maximum ({})",
                identifier.len(),
                MAX_IDENTIFIER_LEN
            )));
        }
        let keys = self.keys.as_ref().ok_or_else(|| {
            PepError::KeyNotProvisioned(format!("issuer {} has not been registered", self.id))
        })?;

        let adherence_key = derive_key(&keys.adherence_master, relay_id.as_bytes())?;
        let masked = unshuffle(&embed(identifier)?, &adherence_key)?;
        let ct = encrypt(&keys.identity_public, &masked, rng)?;

        debug!(issuer = %self.id, relay = %relay_id, "activated identifier");
        Ok(ct)
    }
}
