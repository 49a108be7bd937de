mod call;
mod tools;

use borsdata_core::config::API_KEY_ENV;
use borsdata_core::{ClientConfig, RetryConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// What a command produced: the text to print and whether it is an error result.
pub struct CommandOutput {
    pub text: String,
    pub is_error: bool,
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    match &cli.command {
        Command::Tools => tools::run(cli.pretty),
        Command::Call(args) => {
            let config = client_config(cli)?;
            call::run(args, config, cli.pretty).await
        }
    }
}

/// Environment configuration with command-line overrides applied.
fn client_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_lookup(|name| {
        if name == API_KEY_ENV {
            if let Some(key) = &cli.api_key {
                return Some(key.clone());
            }
        }
        std::env::var(name).ok()
    })?;

    if let Some(max_attempts) = cli.max_attempts {
        if max_attempts == 0 {
            return Err(CliError::Command(String::from(
                "--max-attempts must be greater than zero",
            )));
        }
        config = config.with_max_attempts(max_attempts);
    }
    if cli.no_retry {
        config = config.with_retry(RetryConfig::no_retry());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    Ok(config)
}
