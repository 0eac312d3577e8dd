//! Environment variable expansion for metadata strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use toml::Value;

use crate::ConfigError;
use crate::raw::RawRecord;

/// Keys whose string values are expanded at load time.
pub(crate) const EXPANDED_KEYS: &[&str] = &[
    "project",
    "author",
    "copyright",
    "release",
    "version",
    "html_title",
];

/// Expand `${}` references in every [`EXPANDED_KEYS`] string value.
///
/// Non-string values are left for the resolver to report.
pub(crate) fn expand_record(raw: &mut RawRecord) -> Result<(), ConfigError> {
    for key in EXPANDED_KEYS {
        if let Some(Value::String(value)) = raw.get_mut(key) {
            *value = expand_env(value, key)?;
        }
    }
    Ok(())
}

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let escaped = escape_bare_dollars(value);
    shellexpand::env_with_context(&escaped, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Double every `$` not followed by `{` so shellexpand keeps it literal.
fn escape_bare_dollars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '$' && chars.peek() != Some(&'{') {
            out.push('$');
        }
    }
    out
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}
