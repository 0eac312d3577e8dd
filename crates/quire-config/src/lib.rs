//! Site configuration for Quire.
//!
//! Resolves a `quire.toml` record into a validated, defaulted [`SiteConfig`]
//! for the documentation renderer. Resolution collects every problem in the
//! record and reports them together as a [`ValidationError`].
//!
//! Loading is split in two:
//!
//! - [`load`] finds and parses the file, expands environment variables in
//!   metadata strings and applies [`Overrides`] from the command line.
//! - [`resolve`] is pure: it never touches the filesystem or the environment.
//!
//! ## Disabled entries
//!
//! A key named in the top-level `disabled` array is treated exactly like an
//! absent key. `theme_options.<knob>` disables a single theme knob.
//!
//! ```toml
//! project = "My Tech Notes"
//! author = "Ada"
//! release = "${RELEASE:-1.0}"
//! preset = "notes"
//! html_logo = "logo.png"
//! disabled = ["html_logo"]
//! ```
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded keys: `project`, `author`, `copyright`, `release`, `version`,
//! `html_title`.

mod error;
mod expand;
mod preset;
mod raw;
mod resolve;
mod schema;
mod theme;

use std::path::{Path, PathBuf};

pub use error::{ValidationError, Violation, ViolationKind};
pub use preset::Preset;
pub use raw::{KNOWN_KEYS, RawRecord};
pub use resolve::resolve;
pub use schema::{
    ContentFormat, Extension, Identifier, MarkupExtension, OptionValue, PdfDocument, PdfEngine,
    SiteConfig, StylesheetHook, Theme,
};
pub use theme::{Knob, KnobDefault};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "quire.toml";

/// Command-line values that override the configuration file.
///
/// Overrides are written into the raw record before resolution, so they are
/// validated like any other value. An override re-enables a disabled key.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override `preset`.
    pub preset: Option<String>,
    /// Override `theme`.
    pub theme: Option<String>,
    /// Override `project`.
    pub project: Option<String>,
    /// Override `release`.
    pub release: Option<String>,
}

impl Overrides {
    fn apply(&self, raw: &mut RawRecord) {
        let fields = [
            ("preset", &self.preset),
            ("theme", &self.theme),
            ("project", &self.project),
            ("release", &self.release),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                tracing::debug!(key, value = %value, "Applying override");
                raw.set(key, value.as_str());
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// The record was parsed but failed validation.
    #[error("Configuration error: {0}")]
    Validation(#[from] ValidationError),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config key (e.g., "release").
        field: String,
        /// Error message (e.g., "${`RELEASE`} not set").
        message: String,
    },
}

/// A resolved configuration and the file it came from.
#[derive(Debug)]
pub struct LoadedConfig {
    /// Resolved site configuration.
    pub site: SiteConfig,
    /// Path to the config file.
    pub config_path: PathBuf,
}

impl LoadedConfig {
    /// Directory relative asset paths are resolved against by the renderer.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        self.config_path.parent().unwrap_or(Path::new("."))
    }
}

/// Load and resolve configuration with optional CLI overrides.
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, searches for `quire.toml` in current directory and parents.
///
/// # Errors
///
/// Returns error if no config file is found, parsing or env expansion fails,
/// or the record does not validate.
pub fn load(
    config_path: Option<&Path>,
    overrides: Option<&Overrides>,
) -> Result<LoadedConfig, ConfigError> {
    let path = match config_path {
        Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir()?;
            discover_config(&cwd)
                .ok_or_else(|| ConfigError::NotFound(cwd.join(CONFIG_FILENAME)))?
        }
    };
    load_from_file(&path, overrides)
}

/// Load and resolve configuration from a specific file.
///
/// # Errors
///
/// Returns error if reading, parsing, env expansion or validation fails.
pub fn load_from_file(
    path: &Path,
    overrides: Option<&Overrides>,
) -> Result<LoadedConfig, ConfigError> {
    tracing::info!(path = %path.display(), "Loading configuration");
    let content = std::fs::read_to_string(path)?;
    let mut raw = RawRecord::parse(&content)?;

    // Expand environment variables before overrides so CLI values stay literal
    expand::expand_record(&mut raw)?;

    if let Some(overrides) = overrides {
        overrides.apply(&mut raw);
    }

    let site = resolve(&raw)?;
    Ok(LoadedConfig {
        site,
        config_path: path.to_path_buf(),
    })
}

/// Search for config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const NOTES: &str = r#"
project = "My Tech Notes"
copyright = "2024, Revannaswamy N"
author = "Revannaswamy N"
release = "1.0"

extensions = ["sphinx_rtd_theme", "sphinx_copybutton", "sphinx_code_tabs"]
templates_path = ["_templates"]
exclude_patterns = ["_build", "Thumbs.db", ".DS_Store"]

theme = "sphinx_rtd_theme"
html_static_path = ["_static"]

[theme_options]
logo_only = false
collapse_navigation = true
sticky_navigation = true
includehidden = true
navigation_depth = 10
titles_only = false
"#;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_notes_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), NOTES);

        let loaded = load(Some(&path), None).unwrap();
        let site = &loaded.site;

        assert_eq!(site.project(), "My Tech Notes");
        assert_eq!(site.copyright(), "2024, Revannaswamy N");
        assert_eq!(site.theme(), Theme::Rtd);
        assert_eq!(
            site.extensions(),
            &[Extension::RtdTheme, Extension::Copybutton, Extension::CodeTabs]
        );
        assert_eq!(
            site.theme_option("navigation_depth"),
            Some(&OptionValue::Int(10))
        );
        assert_eq!(loaded.config_dir(), dir.path());
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");

        let err = load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "project = ");

        let err = load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_reports_validation_errors() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            dir.path(),
            r#"
author = "A"
release = "1.0"
theme = "rtd"
theme_options = { colour = "red" }
"#,
        );

        let err = load(Some(&path), None).unwrap_err();
        let validation = match err {
            ConfigError::Validation(validation) => validation,
            other => panic!("Expected ConfigError::Validation, got {other:?}"),
        };
        assert_eq!(validation.len(), 2);
        assert!(validation.for_key("project").is_some());
        assert!(validation.for_key("theme_options.colour").is_some());
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), NOTES);
        let nested = dir.path().join("docs").join("guide");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(discover_config(&nested), Some(path));
    }

    #[test]
    fn test_discover_config_none() {
        let dir = TempDir::new().unwrap();
        // The temp dir's ancestors are not expected to contain quire.toml
        if dir
            .path()
            .ancestors()
            .all(|p| !p.join(CONFIG_FILENAME).exists())
        {
            assert_eq!(discover_config(dir.path()), None);
        }
    }

    #[test]
    fn test_overrides_take_precedence() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            dir.path(),
            r#"
project = "Notes"
author = "A"
release = "1.0"
theme = "furo"
disabled = ["theme"]
"#,
        );
        let overrides = Overrides {
            theme: Some("book".to_owned()),
            release: Some("2.1.0".to_owned()),
            ..Default::default()
        };

        let loaded = load(Some(&path), Some(&overrides)).unwrap();
        assert_eq!(loaded.site.theme(), Theme::Book);
        assert_eq!(loaded.site.release(), "2.1.0");
        assert_eq!(loaded.site.version(), "2.1");
    }

    #[test]
    fn test_override_is_validated() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), NOTES);
        let overrides = Overrides {
            preset: Some("slides".to_owned()),
            ..Default::default()
        };

        let err = load(Some(&path), Some(&overrides)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v.for_key("preset").is_some()));
    }

    #[test]
    fn test_load_expands_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUIRE_LOAD_RELEASE_TEST", "3.2.1");
        }
        let dir = TempDir::new().unwrap();
        let path = write_config(
            dir.path(),
            r#"
project = "Notes"
author = "A"
release = "${QUIRE_LOAD_RELEASE_TEST}"
"#,
        );

        let loaded = load(Some(&path), None).unwrap();
        assert_eq!(loaded.site.release(), "3.2.1");
        assert_eq!(loaded.site.version(), "3.2");

        unsafe {
            std::env::remove_var("QUIRE_LOAD_RELEASE_TEST");
        }
    }

    #[test]
    fn test_load_missing_env_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUIRE_LOAD_MISSING_TEST");
        }
        let dir = TempDir::new().unwrap();
        let path = write_config(
            dir.path(),
            r#"
project = "${QUIRE_LOAD_MISSING_TEST}"
author = "A"
release = "1.0"
"#,
        );

        let err = load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "project"));
    }
}
