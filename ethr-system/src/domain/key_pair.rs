use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use crate::error::SystemError;

pub const PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// Both halves of a freshly generated key pair, already encoded for output.
///
/// The buffers are independent: the private half holds a SEC1 `EC PRIVATE KEY`
/// PEM block and the public half a SPKI `PUBLIC KEY` PEM block, unless the pair
/// has been passed through [`KeyPair::to_base64`].
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    private_key: Vec<u8>,
    public_key: Vec<u8>,
}

impl KeyPair {
    pub fn new(private_key: Vec<u8>, public_key: Vec<u8>) -> Self {
        Self {
            private_key,
            public_key,
        }
    }

    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Standard, padded base64 of each buffer.
    pub fn to_base64(&self) -> KeyPair {
        KeyPair {
            private_key: BASE64_STANDARD.encode(&self.private_key).into_bytes(),
            public_key: BASE64_STANDARD.encode(&self.public_key).into_bytes(),
        }
    }
}

// Never print key material.
impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &format_args!("<{} bytes>", self.private_key.len()))
            .field("public_key", &format_args!("<{} bytes>", self.public_key.len()))
            .finish()
    }
}

/// Port for producing PEM-encoded key pairs.
pub trait KeyPairGenerator {
    fn generate(&self) -> Result<KeyPair, SystemError>;
}
