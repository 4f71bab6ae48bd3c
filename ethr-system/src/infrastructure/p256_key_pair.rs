use p256::pkcs8::{EncodePublicKey, LineEnding};
use p256::{FieldBytes, SecretKey};
use rand_core::{CryptoRng, OsRng, RngCore};

use crate::domain::key_pair::{KeyPair, KeyPairGenerator};
use crate::error::SystemError;

/// P-256 key pairs drawn from the operating system's entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct P256KeyPairGenerator;

impl KeyPairGenerator for P256KeyPairGenerator {
    fn generate(&self) -> Result<KeyPair, SystemError> {
        generate_with(&mut OsRng)
    }
}

// A uniform 32-byte draw falls outside [1, n) with probability ~2^-32, so
// hitting this many in a row means the source is broken.
const MAX_SCALAR_DRAWS: usize = 16;

/// Generates a P-256 key pair from `rng` and PEM-encodes both halves.
///
/// Draws that are zero or not below the curve order are discarded and
/// redrawn.
pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<KeyPair, SystemError> {
    let mut scalar = FieldBytes::default();

    for attempt in 1..=MAX_SCALAR_DRAWS {
        rng.try_fill_bytes(&mut scalar)
            .map_err(|e| SystemError::Crypto(format!("unable to draw secret scalar: {e}")))?;

        match SecretKey::from_bytes(&scalar) {
            Ok(secret_key) => return encode(&secret_key),
            Err(_) => tracing::debug!(attempt, "secret scalar out of range, redrawing"),
        }
    }

    Err(SystemError::Crypto(format!(
        "no valid secret scalar after {MAX_SCALAR_DRAWS} draws"
    )))
}

fn encode(secret_key: &SecretKey) -> Result<KeyPair, SystemError> {
    let private_pem = secret_key
        .to_sec1_pem(LineEnding::LF)
        .map_err(|e| SystemError::Crypto(format!("unable to encode private key to pem: {e}")))?;

    let public_pem = secret_key
        .public_key()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| SystemError::Crypto(format!("unable to encode public key to pem: {e}")))?;

    tracing::debug!(
        private_size = private_pem.len(),
        public_size = public_pem.len(),
        "generated p256 key pair"
    );

    Ok(KeyPair::new(
        private_pem.as_bytes().to_vec(),
        public_pem.into_bytes(),
    ))
}
