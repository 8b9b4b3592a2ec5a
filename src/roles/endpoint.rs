use tracing::debug;

use crate::decryption::decrypt;
use crate::embedding::unembed;
use crate::encryption::Cryptogram;
use crate::error::PepError;
use crate::group::Point;
use crate::keys::KeyPair;

/// Keys the authority grants an endpoint.
#[derive(Clone, Debug)]
pub struct EndpointKeys {
    /// Global identity public key `Y`
    identity_public: Point,
    /// Global pseudonym public key `Z`; no transform uses it yet
    pseudonym_public: Point,
    /// `y * IEd_i` and its public half
    decryption_key: KeyPair,
}

impl EndpointKeys {
    pub(crate) fn new(identity_public: Point, pseudonym_public: Point, decryption_key: KeyPair) -> Self {
        EndpointKeys {
            identity_public,
            pseudonym_public,
            decryption_key,
        }
    }
}

/// Final destination of a transformed cryptogram; the only role that can
/// recover the identifier.
#[derive(Debug)]
pub struct Endpoint {
    id: String,
    keys: Option<EndpointKeys>,
}

impl Endpoint {
    /// Creates an endpoint with no keys; register it with the authority before use.
    pub fn new(id: impl Into<String>) -> Self {
        Endpoint {
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

    pub(crate) fn provision(&mut self, keys: EndpointKeys) {
        self.keys = Some(keys);
    }

    fn keys(&self) -> Result<&EndpointKeys, PepError> {
        self.keys.as_ref().ok_or_else(|| {
            PepError::KeyNotProvisioned(format!("endpoint {} has not been registered", self.id))
        })
    }

    /// This endpoint's public key `y * IEd_i * G`.
    pub fn public_key(&self) -> Result<Point, PepError> {
        Ok(self.keys()?.decryption_key.public_key())
    }

    pub fn identity_public_key(&self) -> Result<Point, PepError> {
        Ok(self.keys()?.identity_public)
    }

    pub fn pseudonym_public_key(&self) -> Result<Point, PepError> {
        Ok(self.keys()?.pseudonym_public)
    }

    /// Decrypts `ct` and recovers the identifier.
    ///
    /// # Errors
    /// - `PepError::KeyNotProvisioned` if the endpoint was never registered
    /// - `PepError::Decode` if the cryptogram was not transformed for this
    ///   endpoint, was activated for a different relay than the one that
    ///   transformed it, or was altered in transit
    pub fn decrypt(&self, ct: &Cryptogram) -> Result<Vec<u8>, PepError> {
        let keys = self.keys()?;

        if ct.c() != keys.decryption_key.public_key() {
            // Advisory only; the tag is not authenticated.
            debug!(endpoint = %self.id, "cryptogram is tagged for a different public key");
        }

        let m = decrypt(keys.decryption_key.private_key().expose_secret(), ct);
        unembed(&m).inspect_err(|_| {
            debug!(endpoint = %self.id, "decryption did not yield a valid identifier");
        })
    }
}
