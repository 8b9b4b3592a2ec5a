use ark_std::rand::{CryptoRng, RngCore};
use rayon::prelude::*;
use tracing::debug;

use crate::derivation::derive_key;
use crate::encryption::Cryptogram;
use crate::error::PepError;
use crate::group::{Point, Scalar};
use crate::keys::{MasterKey, SecretScalar};
use crate::rng::OsEntropy;
use crate::transform::{rekey, rerandomize, reshuffle};

/// Keys the authority grants a relay.
#[derive(Clone, Debug)]
pub struct RelayKeys {
    /// Global identity public key `Y`
    identity_public: Point,
    /// This relay's adherence key, derived from the adherence master
    adherence_key: SecretScalar,
    /// Endpoint-encryption master; the relay derives each endpoint's rekey
    /// scalar from it
    encryption_master: MasterKey,
}

impl RelayKeys {
    pub(crate) fn new(
        identity_public: Point,
        adherence_key: SecretScalar,
        encryption_master: MasterKey,
    ) -> Self {
        RelayKeys {
            identity_public,
            adherence_key,
            encryption_master,
        }
    }
}

/// Transforms polymorphic cryptograms into cryptograms for one endpoint
/// without ever seeing the plaintext.
#[derive(Debug)]
pub struct Relay {
    id: String,
    keys: Option<RelayKeys>,
}

impl Relay {
    /// Creates a relay with no keys; register it with the authority before use.
    pub fn new(id: impl Into<String>) -> Self {
        Relay {
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

    pub(crate) fn provision(&mut self, keys: RelayKeys) {
        self.keys = Some(keys);
    }

    fn keys(&self) -> Result<&RelayKeys, PepError> {
        self.keys.as_ref().ok_or_else(|| {
            PepError::KeyNotProvisioned(format!("relay {} has not been registered", self.id))
        })
    }

    /// Transforms `ct` for the endpoint `endpoint_id` using OS entropy.
    ///
    /// See [`Relay::transform_with_rng`].
    pub fn transform(&self, ct: &Cryptogram, endpoint_id: &str) -> Result<Cryptogram, PepError> {
        self.transform_with_rng(ct, endpoint_id, &mut OsEntropy::new())
    }

    /// Runs `rerandomize(Y) -> reshuffle(adherence key) -> rekey(endpoint key)`.
    ///
    /// A cryptogram activated for another relay transforms without error but
    /// will not decode at any endpoint.
    ///
    /// # Errors
    /// - `PepError::KeyNotProvisioned` if the relay was never registered
    /// - `PepError::Randomness` if the RNG fails
    pub fn transform_with_rng<R: RngCore + CryptoRng + ?Sized>(
        &self,
        ct: &Cryptogram,
        endpoint_id: &str,
        rng: &mut R,
    ) -> Result<Cryptogram, PepError> {
        let keys = self.keys()?;
        let endpoint_key = derive_key(&keys.encryption_master, endpoint_id.as_bytes())?;
        let out = transform_with_key(keys, ct, &endpoint_key, rng)?;

        debug!(relay = %self.id, endpoint = %endpoint_id, "transformed cryptogram");
        Ok(out)
    }

    /// Transforms every cryptogram in `cts` for `endpoint_id` in parallel.
    ///
    /// Each worker thread draws its own OS entropy. Output order matches input
    /// order; the first failure aborts the batch.
    pub fn transform_batch(
        &self,
        cts: &[Cryptogram],
        endpoint_id: &str,
    ) -> Result<Vec<Cryptogram>, PepError> {
        let keys = self.keys()?;
        let endpoint_key = derive_key(&keys.encryption_master, endpoint_id.as_bytes())?;

        let out = cts
            .par_iter()
            .map_init(OsEntropy::new, |rng, ct| {
                transform_with_key(keys, ct, &endpoint_key, rng)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            relay = %self.id,
            endpoint = %endpoint_id,
            count = out.len(),
            "transformed cryptogram batch"
        );
        Ok(out)
    }
}

fn transform_with_key<R: RngCore + CryptoRng + ?Sized>(
    keys: &RelayKeys,
    ct: &Cryptogram,
    endpoint_key: &Scalar,
    rng: &mut R,
) -> Result<Cryptogram, PepError> {
    let fresh = rerandomize(ct, &keys.identity_public, rng)?;
    let shuffled = reshuffle(&fresh, keys.adherence_key.expose_secret());
    rekey(&shuffled, endpoint_key)
}
