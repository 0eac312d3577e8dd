//! `quire check` command implementation.

use clap::Args;
use quire_config::{ConfigError, LoadedConfig, OptionValue, SiteConfig};

use super::config_args::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Invalid`] after printing every violation, or the
    /// load error if the file could not be read or parsed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        match self.config.load() {
            Ok(loaded) => {
                print_summary(&output, &loaded);
                Ok(())
            }
            Err(ConfigError::Validation(err)) => {
                output.error(&format!("Configuration is invalid ({} problems):", err.len()));
                for violation in err.violations() {
                    output.violation(violation);
                }
                Err(CliError::Invalid(err.len()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn print_summary(output: &Output, loaded: &LoadedConfig) {
    let site = &loaded.site;
    output.success(&format!(
        "Configuration OK: {}",
        loaded.config_path.display()
    ));
    output.field("project", site.project());
    output.field("release", &format!("{} (version {})", site.release(), site.version()));
    output.field("author", site.author());
    output.field("theme", &site.theme().to_string());
    output.field("extensions", &join(site.extensions()));
    output.field("theme options", &theme_options_line(site));
    output.field(
        "static paths",
        &join(site.static_paths().iter().map(|p| p.display())),
    );
    output.field(
        "stylesheet",
        &site.stylesheet_hook().path().display().to_string(),
    );
    if let Some(engine) = site.pdf_engine() {
        output.field(
            "pdf",
            &format!("{engine}, {} document(s)", site.pdf_documents().len()),
        );
    }
}

fn theme_options_line(site: &SiteConfig) -> String {
    join(site.theme_options().iter().map(|(name, value)| match value {
        OptionValue::Bool(b) => format!("{name}={b}"),
        OptionValue::Int(i) => format!("{name}={i}"),
        OptionValue::Str(s) => format!("{name}={s:?}"),
    }))
}

fn join<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: std::fmt::Display,
{
    let joined = items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "(none)".to_owned()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quire_config::{Extension, RawRecord, resolve};

    use super::*;

    #[test]
    fn test_join_empty() {
        assert_eq!(join(Vec::<String>::new()), "(none)");
    }

    #[test]
    fn test_join_extensions() {
        assert_eq!(
            join(&[Extension::Copybutton, Extension::CodeTabs]),
            "copybutton, code_tabs"
        );
    }

    #[test]
    fn test_theme_options_line_quotes_strings() {
        let raw = RawRecord::parse(
            r#"
project = "Notes"
author = "A"
release = "1.0"
theme = "furo"
"#,
        )
        .unwrap();
        let site = resolve(&raw).unwrap();
        let line = theme_options_line(&site);

        assert!(line.contains("top_of_page_button=\"edit\""));
        assert!(line.contains("navigation_with_keys=false"));
    }
}
