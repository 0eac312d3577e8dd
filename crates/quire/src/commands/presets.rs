//! `quire presets` command implementation.

use quire_config::{Identifier, Preset};

use crate::error::CliError;
use crate::output::Output;

/// List built-in presets with their descriptions.
pub(crate) fn execute() -> Result<(), CliError> {
    let output = Output::new();
    output.highlight("Presets");
    for preset in Preset::ALL {
        output.field(preset.id(), preset.description());
    }
    output.info("");
    output.info("Select one with `preset = \"<name>\"` in quire.toml or --preset.");
    Ok(())
}
