use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// The public half of an ed25519 key pair. Transaction outputs are locked to
/// a public key, and spending them requires a signature from the matching
/// private key.
///
/// Malformed key material is rejected at construction, so every `PublicKey`
/// in circulation is a valid curve point.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, String> {
        let verifying_key = VerifyingKey::from_bytes(bytes).map_err(|e| e.to_string())?;
        Ok(Self(verifying_key))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.0.as_bytes());
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0.as_bytes()))
    }
}

/// An ed25519 signature over a transaction's signable payload.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Signature(ed25519_dalek::Signature);

impl Signature {
    pub fn from_bytes(bytes: &[u8; 64]) -> Self {
        Self(ed25519_dalek::Signature::from_bytes(bytes))
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        self.0.to_bytes()
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0.to_bytes()[..]))
    }
}

/// The private half of an ed25519 key pair. The ledger core never sees this
/// type; it exists so that hosts, tests and the demo binary can create and
/// sign transactions.
pub struct PrivateKey(SigningKey);

impl PrivateKey {
    /// Generates a new key pair from the OS random number generator.
    pub fn generate() -> Self {
        Self(SigningKey::generate(&mut OsRng))
    }

    /// Derives a key pair from a fixed seed. Ed25519 signing is
    /// deterministic, so the same seed always reproduces the same keys and
    /// signatures, which keeps tests and benchmarks reproducible.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self(SigningKey::from_bytes(&seed))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.0.sign(message))
    }
}

/// Checks that the signature over the message was produced by the private
/// key matching the given public key.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    public_key.0.verify(message, &signature.0).is_ok()
}
