use crate::error::SystemError;

/// `a-z`, `A-Z`, `0-9`.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_LENGTH: usize = 32;

/// Longest token a single invocation will produce.
pub const MAX_LENGTH: usize = 1 << 20;

// Largest multiple of 62 that fits in a byte. Bytes at or above it are
// rejected so that `byte % 62` stays uniform.
const REJECTION_BOUND: u8 = 248;

const DRAW_SIZE: usize = 64;

/// Port for a cryptographically secure entropy source.
pub trait RandomSource {
    fn try_fill(&mut self, dest: &mut [u8]) -> Result<(), SystemError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Draws `length` characters from [`ALPHABET`], each independently and
    /// uniformly. Lengths above [`MAX_LENGTH`] are rejected before any draw.
    pub fn generate<R: RandomSource + ?Sized>(
        length: usize,
        source: &mut R,
    ) -> Result<Token, SystemError> {
        if length > MAX_LENGTH {
            return Err(SystemError::InvalidArgument(format!(
                "token length {length} exceeds the maximum of {MAX_LENGTH}"
            )));
        }

        let mut value = String::with_capacity(length);
        let mut draw = [0u8; DRAW_SIZE];

        while value.len() < length {
            source.try_fill(&mut draw)?;

            for byte in draw.iter().copied().filter(|b| *b < REJECTION_BOUND) {
                if value.len() == length {
                    break;
                }
                value.push(ALPHABET[usize::from(byte) % ALPHABET.len()] as char);
            }
        }

        Ok(Token(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
