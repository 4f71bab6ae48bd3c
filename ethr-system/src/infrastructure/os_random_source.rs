use rand_core::{OsRng, RngCore};

use crate::domain::token::RandomSource;
use crate::error::SystemError;

/// Entropy from the operating system (`getrandom`).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomSource;

impl RandomSource for OsRandomSource {
    fn try_fill(&mut self, dest: &mut [u8]) -> Result<(), SystemError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| SystemError::RandomSource(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::{Token, ALPHABET};

    #[test]
    fn fills_buffer() {
        let mut buffer = [0u8; 64];
        OsRandomSource.try_fill(&mut buffer).unwrap();
        assert!(buffer.iter().any(|b| *b != 0));
    }

    #[test]
    fn tokens_use_only_the_alphabet() {
        for length in [0, 1, 32, 257] {
            let token = Token::generate(length, &mut OsRandomSource).unwrap();
            assert_eq!(token.as_str().len(), length);
            assert!(token.as_str().bytes().all(|b| ALPHABET.contains(&b)));
        }
    }
}
