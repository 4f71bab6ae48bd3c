use crate::domain::token::{RandomSource, Token, DEFAULT_LENGTH};
use crate::error::SystemError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateTokenCommand {
    pub length: usize,
}

impl Default for GenerateTokenCommand {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }
}

pub struct TokenService<R> {
    pub random_source: R,
}

impl<R> TokenService<R>
where
    R: RandomSource,
{
    pub fn generate(&mut self, cmd: GenerateTokenCommand) -> Result<Token, SystemError> {
        let token = Token::generate(cmd.length, &mut self.random_source)?;
        tracing::debug!(length = cmd.length, "generated random token");
        Ok(token)
    }
}
