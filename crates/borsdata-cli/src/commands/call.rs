use borsdata_agent::ToolAdapter;
use borsdata_core::ClientConfig;
use serde_json::Value;
use tracing::info;

use crate::cli::CallArgs;
use crate::error::CliError;

use super::CommandOutput;

pub async fn run(
    args: &CallArgs,
    config: ClientConfig,
    pretty: bool,
) -> Result<CommandOutput, CliError> {
    let adapter = ToolAdapter::new(config);
    let arguments = match args.args.as_deref() {
        Some(text) => Value::String(text.to_owned()),
        None => Value::Null,
    };

    info!(tool = %args.tool, "calling tool");
    let result = adapter.call(&args.tool, arguments).await;
    let text = if pretty { result.pretty() } else { result.text };

    Ok(CommandOutput {
        text,
        is_error: result.is_error,
    })
}
