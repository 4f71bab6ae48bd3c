use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};
use ethr_system::application_service::token_service::{GenerateTokenCommand, TokenService};
use ethr_system::domain::token::MAX_LENGTH;
use ethr_system::infrastructure::os_random_source::OsRandomSource;

use crate::config::Settings;
use crate::presentation::print_help;

#[derive(Args, Debug)]
pub struct RandomArgs {
    #[command(subcommand)]
    pub command: Option<RandomCommand>,
}

#[derive(Subcommand, Debug)]
pub enum RandomCommand {
    /// Generate a random alphanumeric token.
    Token(TokenArgs),
}

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Number of characters in the token [default: 32].
    #[arg(long, value_name = "N", value_parser = parse_length)]
    pub length: Option<usize>,
}

fn parse_length(value: &str) -> Result<usize, String> {
    let length: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a non-negative integer"))?;
    if length > MAX_LENGTH {
        return Err(format!("length must be at most {MAX_LENGTH}"));
    }
    Ok(length)
}

pub fn run(args: RandomArgs, settings: &Settings, out: &mut dyn Write) -> Result<()> {
    let Some(RandomCommand::Token(args)) = args.command else {
        return print_help(settings, &["random"], out);
    };

    let length = settings.token_length(args.length);
    tracing::debug!(command = "token", length, "flags");

    let mut service = TokenService {
        random_source: OsRandomSource,
    };
    let token = service.generate(GenerateTokenCommand { length })?;

    writeln!(out, "{token}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;

    fn token(length: Option<usize>, config: CliConfig) -> String {
        let settings = Settings::new("ethr", "/", None, config);
        let args = RandomArgs {
            command: Some(RandomCommand::Token(TokenArgs { length })),
        };
        let mut out = Vec::new();
        run(args, &settings, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prints_default_length_token_and_newline() {
        let printed = token(None, CliConfig::default());
        assert!(printed.ends_with('\n'));
        assert_eq!(printed.trim_end().len(), 32);
        assert!(printed.trim_end().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn zero_length_prints_empty_line() {
        assert_eq!(token(Some(0), CliConfig::default()), "\n");
    }

    #[test]
    fn length_flag_is_bounded() {
        assert_eq!(parse_length("16"), Ok(16));
        assert!(parse_length("-1").is_err());
        assert!(parse_length(&(MAX_LENGTH + 1).to_string()).is_err());
    }

    #[test]
    fn oversized_config_length_is_an_error() {
        let config = CliConfig::from_toml_str(&format!("[token]\nlength = {}\n", MAX_LENGTH + 1)).unwrap();
        let settings = Settings::new("ethr", "/", None, config);
        let args = RandomArgs {
            command: Some(RandomCommand::Token(TokenArgs { length: None })),
        };
        let mut out = Vec::new();
        assert!(run(args, &settings, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn config_supplies_length() {
        let config = CliConfig::from_toml_str("[token]\nlength = 10\n").unwrap();
        assert_eq!(token(None, config).trim_end().len(), 10);
    }
}
