//! `quire resolve` command implementation.

use std::io::Write;

use clap::Args;
use quire_config::SiteConfig;

use super::config_args::ConfigArgs;
use crate::error::CliError;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Emit single-line JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let compact = self.compact;
        let loaded = self.config.load()?;
        let document = renderer_document(&loaded.site)?;

        let json = if compact {
            serde_json::to_string(&document)?
        } else {
            serde_json::to_string_pretty(&document)?
        };

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
        Ok(())
    }
}

/// Resolved config plus the stylesheets registered by the post-config hook.
fn renderer_document(site: &SiteConfig) -> Result<serde_json::Value, serde_json::Error> {
    let mut document = serde_json::to_value(site)?;
    let mut css_files = Vec::new();
    site.stylesheet_hook()
        .register(|path| css_files.push(path.display().to_string()));
    document["css_files"] = serde_json::Value::from(css_files);
    Ok(document)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quire_config::{RawRecord, resolve};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_renderer_document_includes_hook_stylesheet() {
        let raw = RawRecord::parse(
            r#"
project = "Notes"
author = "A"
release = "1.0"
extensions = ["copybutton"]
theme = "book"
theme_options = { navigation_depth = 10 }
"#,
        )
        .unwrap();
        let site = resolve(&raw).unwrap();
        let document = renderer_document(&site).unwrap();

        assert_eq!(document["project"], "Notes");
        assert_eq!(document["theme"], "book");
        assert_eq!(document["extensions"], json!(["copybutton"]));
        assert_eq!(document["theme_options"]["navigation_depth"], 10);
        assert_eq!(document["css_files"], json!(["css/custom.css"]));
        assert_eq!(document["pdf_engine"], serde_json::Value::Null);
    }
}
