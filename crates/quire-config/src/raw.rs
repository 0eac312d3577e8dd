//! Raw (unvalidated) configuration record.

use toml::{Table, Value};

use crate::error::{Violation, ViolationKind};

/// Reserved key listing entries that are present but switched off.
pub(crate) const DISABLED_KEY: &str = "disabled";

/// Reserved key selecting a named preset.
pub(crate) const PRESET_KEY: &str = "preset";

/// Static asset path key.
pub(crate) const STATIC_PATH_KEY: &str = "html_static_path";

/// Accepted alternative spelling of [`STATIC_PATH_KEY`].
pub(crate) const STATIC_PATH_ALIAS: &str = "static_asset_paths";

/// Prefix for disabling a single theme knob in the `disabled` list.
const THEME_OPTION_PREFIX: &str = "theme_options.";

/// Every top-level key the resolver recognizes.
pub const KNOWN_KEYS: &[&str] = &[
    "project",
    "author",
    "release",
    "version",
    "copyright",
    "language",
    "extensions",
    "theme",
    "theme_options",
    "source_suffix",
    "myst_enable_extensions",
    "templates_path",
    STATIC_PATH_KEY,
    STATIC_PATH_ALIAS,
    "html_logo",
    "html_favicon",
    "html_title",
    "exclude_patterns",
    "latex_engine",
    "latex_documents",
    "custom_stylesheet",
    PRESET_KEY,
    DISABLED_KEY,
];

/// Flat key/value record as written by the user.
///
/// Keys listed in the top-level `disabled` array are kept in the record (so the
/// file round-trips) but are treated as absent during resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    table: Table,
}

impl RawRecord {
    /// Wrap an already-parsed TOML table.
    #[must_use]
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// Parse a record from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML parse error if `text` is not a valid document.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        Ok(Self::new(toml::from_str(text)?))
    }

    /// Underlying table, including disabled entries.
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Value for `key`, including disabled entries.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.table.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.table.get_mut(key)
    }

    /// Set `key`, re-enabling it if it was listed in `disabled`.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        if let Some(Value::Array(disabled)) = self.table.get_mut(DISABLED_KEY) {
            disabled.retain(|entry| entry.as_str() != Some(key));
        }
        self.table.insert(key.to_owned(), value.into());
    }

    /// Table with disabled entries (and the `disabled` list itself) removed.
    ///
    /// Problems with the `disabled` list are appended to `violations`.
    pub(crate) fn active(&self, violations: &mut Vec<Violation>) -> Table {
        let mut table = self.table.clone();
        let Some(disabled) = table.remove(DISABLED_KEY) else {
            return table;
        };
        let entries = match disabled {
            Value::Array(entries) => entries,
            other => {
                violations.push(Violation::new(
                    DISABLED_KEY,
                    ViolationKind::TypeMismatch {
                        expected: "array of strings",
                        found: other.type_str(),
                    },
                ));
                return table;
            }
        };

        for (i, entry) in entries.iter().enumerate() {
            let key = format!("{DISABLED_KEY}[{i}]");
            let Some(name) = entry.as_str() else {
                violations.push(Violation::new(
                    key,
                    ViolationKind::TypeMismatch {
                        expected: "string",
                        found: entry.type_str(),
                    },
                ));
                continue;
            };

            if let Some(knob) = name.strip_prefix(THEME_OPTION_PREFIX) {
                if let Some(Value::Table(options)) = table.get_mut("theme_options") {
                    options.remove(knob);
                }
            } else if name != DISABLED_KEY && KNOWN_KEYS.contains(&name) {
                tracing::debug!(key = name, "Ignoring disabled key");
                table.remove(name);
            } else {
                violations.push(Violation::new(
                    key,
                    ViolationKind::UnknownEnumValue {
                        value: name.to_owned(),
                        allowed: KNOWN_KEYS
                            .iter()
                            .copied()
                            .filter(|k| *k != DISABLED_KEY)
                            .collect(),
                    },
                ));
            }
        }

        table
    }
}

impl From<Table> for RawRecord {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}
