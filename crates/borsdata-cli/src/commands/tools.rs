use borsdata_agent::ToolCatalog;

use crate::error::CliError;

use super::CommandOutput;

pub fn run(pretty: bool) -> Result<CommandOutput, CliError> {
    let catalog = ToolCatalog::new().to_json();
    let text = if pretty {
        serde_json::to_string_pretty(&catalog)?
    } else {
        serde_json::to_string(&catalog)?
    };
    Ok(CommandOutput {
        text,
        is_error: false,
    })
}
