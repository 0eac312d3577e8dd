//! Raw record resolution.
//!
//! [`resolve`] type-checks every recognized key, fills in defaults for absent
//! ones and collects all violations before giving up. It never touches the
//! filesystem; asset paths are passed through unchecked.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use toml::{Table, Value};

use crate::error::{ValidationError, Violation, ViolationKind};
use crate::preset::{Preset, overlay};
use crate::raw::{KNOWN_KEYS, PRESET_KEY, RawRecord, STATIC_PATH_ALIAS, STATIC_PATH_KEY};
use crate::schema::{
    ContentFormat, Extension, Identifier, MarkupExtension, OptionValue, PdfDocument, PdfEngine,
    SiteConfig, Theme,
};
use crate::theme::KnobDefault;

const DEFAULT_THEME: Theme = Theme::Alabaster;
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_STYLESHEET: &str = "css/custom.css";
const DEFAULT_TEMPLATES_PATH: &[&str] = &["_templates"];
const DEFAULT_STATIC_PATH: &[&str] = &["_static"];
const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["_build", "Thumbs.db", ".DS_Store"];

/// Field order of a PDF document descriptor.
const PDF_FIELDS: [&str; 5] = ["source", "output", "title", "author", "document_class"];

/// Resolve a raw record into a [`SiteConfig`].
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violation found in the record.
pub fn resolve(raw: &RawRecord) -> Result<SiteConfig, ValidationError> {
    let mut violations = Vec::new();
    let user = raw.active(&mut violations);
    let table = apply_preset(user, &mut violations);

    let mut fields = Fields {
        table: &table,
        violations,
    };
    fields.check_unknown_keys();

    let project = fields.required_string("project");
    let author = fields.required_string("author");
    let release = fields.required_string("release");
    let version = fields
        .optional_string("version")
        .unwrap_or_else(|| short_version(&release));
    let copyright = fields.optional_string("copyright").unwrap_or_default();
    let language = fields
        .optional_string("language")
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned());

    let extensions = fields.extensions();
    let theme = match table.get("theme") {
        None => Some(DEFAULT_THEME),
        Some(value) => fields.identifier::<Theme>("theme", value),
    };
    let theme_options = fields.theme_options(theme);
    let source_suffix = fields.source_suffix();
    let markup_extensions = fields.markup_extensions();

    let templates_path = fields.distinct_paths("templates_path", DEFAULT_TEMPLATES_PATH);
    let static_key = fields.static_path_key();
    let static_paths = fields.distinct_paths(static_key, DEFAULT_STATIC_PATH);
    let logo = fields.optional_string("html_logo").map(PathBuf::from);
    let favicon = fields.optional_string("html_favicon").map(PathBuf::from);
    let html_title = fields.optional_string("html_title");
    let exclude_patterns = fields.exclude_patterns();

    let pdf_engine = match table.get("latex_engine") {
        None => None,
        Some(value) => fields.identifier::<PdfEngine>("latex_engine", value),
    };
    let pdf_documents = fields.pdf_documents();
    fields.check_pdf_consistency(pdf_engine);

    let stylesheet = fields.non_empty_string_or("custom_stylesheet", DEFAULT_STYLESHEET);

    let Fields { violations, .. } = fields;
    if !violations.is_empty() {
        tracing::debug!(count = violations.len(), "Configuration rejected");
        return Err(ValidationError::new(violations));
    }

    let config = SiteConfig {
        project,
        author,
        release,
        version,
        copyright,
        language,
        extensions,
        theme: theme.unwrap_or(DEFAULT_THEME),
        theme_options,
        source_suffix,
        markup_extensions,
        templates_path,
        static_paths,
        logo,
        favicon,
        html_title,
        exclude_patterns,
        pdf_engine,
        pdf_documents,
        stylesheet: PathBuf::from(stylesheet),
    };
    warn_on_markup_without_parser(&config);

    tracing::debug!(
        project = %config.project,
        theme = %config.theme,
        extensions = config.extensions.len(),
        "Configuration resolved"
    );
    Ok(config)
}

/// Merge the selected preset beneath the user's record.
fn apply_preset(mut user: Table, violations: &mut Vec<Violation>) -> Table {
    let Some(value) = user.remove(PRESET_KEY) else {
        return user;
    };

    let preset = match &value {
        Value::String(name) => {
            Preset::parse(name).ok_or_else(|| ViolationKind::UnknownEnumValue {
                value: name.clone(),
                allowed: Preset::allowed(),
            })
        }
        other => Err(ViolationKind::TypeMismatch {
            expected: "string",
            found: other.type_str(),
        }),
    };

    match preset {
        Ok(preset) => {
            tracing::debug!(preset = preset.id(), "Applying preset");
            overlay(preset.defaults(), user)
        }
        Err(kind) => {
            violations.push(Violation::new(PRESET_KEY, kind));
            user
        }
    }
}

/// Leading `MAJOR.MINOR` of a release string.
fn short_version(release: &str) -> String {
    release.split('.').take(2).collect::<Vec<_>>().join(".")
}

fn warn_on_markup_without_parser(config: &SiteConfig) {
    if config.has_extension(Extension::Myst) {
        return;
    }
    if !config.markup_extensions.is_empty() {
        tracing::warn!("myst_enable_extensions is set but the myst extension is not enabled");
    }
    if config
        .source_suffix
        .values()
        .any(|format| *format == ContentFormat::Markdown)
    {
        tracing::warn!("source_suffix maps to markdown but the myst extension is not enabled");
    }
}

/// Field reader that records violations instead of returning early.
struct Fields<'a> {
    table: &'a Table,
    violations: Vec<Violation>,
}

impl<'a> Fields<'a> {
    fn push(&mut self, key: impl Into<String>, kind: ViolationKind) {
        self.violations.push(Violation::new(key, kind));
    }

    fn mismatch(&mut self, key: impl Into<String>, expected: &'static str, found: &Value) {
        self.push(
            key,
            ViolationKind::TypeMismatch {
                expected,
                found: found.type_str(),
            },
        );
    }

    fn check_unknown_keys(&mut self) {
        let table = self.table;
        for key in table.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                self.push(key.as_str(), ViolationKind::UnknownKey);
            }
        }
    }

    /// Non-empty string; absent or blank is `MissingRequiredField`.
    fn required_string(&mut self, key: &str) -> String {
        let table = self.table;
        match table.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            None | Some(Value::String(_)) => {
                self.push(key, ViolationKind::MissingRequiredField);
                String::new()
            }
            Some(other) => {
                self.mismatch(key, "string", other);
                String::new()
            }
        }
    }

    fn optional_string(&mut self, key: &str) -> Option<String> {
        let table = self.table;
        match table.get(key)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.mismatch(key, "string", other);
                None
            }
        }
    }

    fn non_empty_string_or(&mut self, key: &str, default: &str) -> String {
        if self.table.contains_key(key) {
            self.required_string(key)
        } else {
            default.to_owned()
        }
    }

    fn identifier<T: Identifier>(&mut self, key: &str, value: &Value) -> Option<T> {
        let Value::String(name) = value else {
            self.mismatch(key, "string", value);
            return None;
        };
        let parsed = T::parse(name);
        if parsed.is_none() {
            self.push(
                key,
                ViolationKind::UnknownEnumValue {
                    value: name.clone(),
                    allowed: T::allowed(),
                },
            );
        }
        parsed
    }

    fn array(&mut self, key: &str) -> Option<&'a [Value]> {
        let table = self.table;
        match table.get(key)? {
            Value::Array(items) => Some(items),
            other => {
                self.mismatch(key, "array", other);
                None
            }
        }
    }

    /// String elements with their positions; non-strings are reported.
    fn string_list(&mut self, key: &str) -> Option<Vec<(usize, &'a str)>> {
        let items = self.array(key)?;
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push((i, s.as_str())),
                other => self.mismatch(format!("{key}[{i}]"), "string", other),
            }
        }
        Some(out)
    }

    /// Extensions in declared order. A repeat keeps its first position.
    fn extensions(&mut self) -> Vec<Extension> {
        let Some(items) = self.array("extensions") else {
            return Vec::new();
        };
        let mut out: Vec<Extension> = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let Some(extension) = self.identifier::<Extension>(&format!("extensions[{i}]"), item)
            else {
                continue;
            };
            if out.contains(&extension) {
                tracing::warn!(%extension, position = i, "Ignoring repeated extension");
                continue;
            }
            out.push(extension);
        }
        out
    }

    fn theme_options(&mut self, theme: Option<Theme>) -> BTreeMap<String, OptionValue> {
        let table = self.table;
        let user = match table.get("theme_options") {
            None => None,
            Some(Value::Table(user)) => Some(user),
            Some(other) => {
                self.mismatch("theme_options", "table", other);
                None
            }
        };
        // Knobs can't be checked against an unknown theme; the theme itself is reported.
        let Some(theme) = theme else {
            return BTreeMap::new();
        };

        let mut options: BTreeMap<String, OptionValue> = theme
            .knobs()
            .iter()
            .map(|k| (k.name.to_owned(), k.default.to_value()))
            .collect();

        for (name, value) in user.into_iter().flatten() {
            let key = format!("theme_options.{name}");
            let Some(knob) = theme.knob(name) else {
                self.push(key, ViolationKind::UnknownKey);
                continue;
            };
            let parsed = match (knob.default, value) {
                (KnobDefault::Bool(_), Value::Boolean(b)) => OptionValue::Bool(*b),
                (KnobDefault::Int(_), Value::Integer(i)) => OptionValue::Int(*i),
                (KnobDefault::Str(_), Value::String(s)) => OptionValue::Str(s.clone()),
                (default, other) => {
                    self.mismatch(key, default.expected(), other);
                    continue;
                }
            };
            options.insert(name.clone(), parsed);
        }
        options
    }

    fn source_suffix(&mut self) -> BTreeMap<String, ContentFormat> {
        let table = self.table;
        let suffixes = match table.get("source_suffix") {
            None => {
                return BTreeMap::from([(".rst".to_owned(), ContentFormat::ReStructuredText)]);
            }
            Some(Value::Table(suffixes)) => suffixes,
            Some(other) => {
                self.mismatch("source_suffix", "table", other);
                return BTreeMap::new();
            }
        };

        let mut out = BTreeMap::new();
        for (suffix, value) in suffixes {
            let key = format!("source_suffix[{suffix:?}]");
            if let Some(format) = self.identifier::<ContentFormat>(&key, value) {
                out.insert(suffix.clone(), format);
            }
        }
        out
    }

    fn markup_extensions(&mut self) -> BTreeSet<MarkupExtension> {
        let Some(items) = self.array("myst_enable_extensions") else {
            return BTreeSet::new();
        };
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                self.identifier::<MarkupExtension>(&format!("myst_enable_extensions[{i}]"), item)
            })
            .collect()
    }

    /// Key holding the static asset paths, either spelling.
    fn static_path_key(&mut self) -> &'static str {
        let table = self.table;
        match (
            table.contains_key(STATIC_PATH_KEY),
            table.contains_key(STATIC_PATH_ALIAS),
        ) {
            (true, true) => {
                self.push(
                    STATIC_PATH_ALIAS,
                    ViolationKind::ConflictingKeys {
                        other: STATIC_PATH_KEY,
                    },
                );
                STATIC_PATH_KEY
            }
            (false, true) => STATIC_PATH_ALIAS,
            _ => STATIC_PATH_KEY,
        }
    }

    /// Ordered path list whose entries must be distinct.
    fn distinct_paths(&mut self, key: &str, default: &[&str]) -> Vec<PathBuf> {
        let Some(items) = self.string_list(key) else {
            return default.iter().map(PathBuf::from).collect();
        };
        let mut paths: Vec<PathBuf> = Vec::with_capacity(items.len());
        for (i, item) in items {
            let path = PathBuf::from(item);
            if paths.contains(&path) {
                self.push(
                    format!("{key}[{i}]"),
                    ViolationKind::DuplicatePathEntry {
                        path: item.to_owned(),
                    },
                );
                continue;
            }
            paths.push(path);
        }
        paths
    }

    fn exclude_patterns(&mut self) -> BTreeSet<String> {
        let Some(items) = self.string_list("exclude_patterns") else {
            return DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(|p| (*p).to_owned())
                .collect();
        };
        let mut out = BTreeSet::new();
        for (i, pattern) in items {
            if let Err(e) = glob::Pattern::new(pattern) {
                self.push(
                    format!("exclude_patterns[{i}]"),
                    ViolationKind::InvalidPattern {
                        pattern: pattern.to_owned(),
                        message: e.msg.to_owned(),
                    },
                );
                continue;
            }
            out.insert(pattern.to_owned());
        }
        out
    }

    fn pdf_documents(&mut self) -> Vec<PdfDocument> {
        let Some(items) = self.array("latex_documents") else {
            return Vec::new();
        };
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.pdf_document(&format!("latex_documents[{i}]"), item))
            .collect()
    }

    /// A descriptor is either a 5-element string array or a table.
    fn pdf_document(&mut self, key: &str, value: &Value) -> Option<PdfDocument> {
        let mut parts: [String; 5] = Default::default();
        let mut ok = true;

        match value {
            Value::Array(items) if items.len() == PDF_FIELDS.len() => {
                for ((slot, field), item) in parts.iter_mut().zip(PDF_FIELDS).zip(items) {
                    ok &= self.pdf_field(&format!("{key}.{field}"), Some(item), slot);
                }
            }
            Value::Table(fields) => {
                for name in fields.keys() {
                    if !PDF_FIELDS.contains(&name.as_str()) {
                        self.push(format!("{key}.{name}"), ViolationKind::UnknownKey);
                        ok = false;
                    }
                }
                for (slot, field) in parts.iter_mut().zip(PDF_FIELDS) {
                    ok &= self.pdf_field(&format!("{key}.{field}"), fields.get(field), slot);
                }
            }
            Value::Array(_) => {
                self.push(
                    key,
                    ViolationKind::TypeMismatch {
                        expected: "array of 5 strings",
                        found: "array",
                    },
                );
                ok = false;
            }
            other => {
                self.mismatch(key, "array of 5 strings or table", other);
                ok = false;
            }
        }

        if !ok {
            return None;
        }
        let [source, output, title, author, document_class] = parts;
        Some(PdfDocument {
            source,
            output,
            title,
            author,
            document_class,
        })
    }

    fn pdf_field(&mut self, key: &str, value: Option<&Value>, slot: &mut String) -> bool {
        match value {
            Some(Value::String(s)) if !s.trim().is_empty() => {
                slot.clone_from(s);
                true
            }
            None | Some(Value::String(_)) => {
                self.push(key, ViolationKind::MissingRequiredField);
                false
            }
            Some(other) => {
                self.mismatch(key, "string", other);
                false
            }
        }
    }

    /// Engine set requires documents, and documents require an engine.
    fn check_pdf_consistency(&mut self, engine: Option<PdfEngine>) {
        let table = self.table;
        // An unrecognized engine is already reported
        if engine.is_none() && table.contains_key("latex_engine") {
            return;
        }
        let engine_set = engine.is_some();
        let documents_listed = match table.get("latex_documents") {
            Some(Value::Array(items)) => !items.is_empty(),
            // Already reported as a type mismatch
            Some(_) => return,
            None => false,
        };

        if engine_set && !documents_listed {
            self.push(
                "latex_engine",
                ViolationKind::InconsistentPdfConfig {
                    reason: "latex_engine is set but latex_documents is empty".to_owned(),
                },
            );
        } else if documents_listed && !engine_set {
            self.push(
                "latex_documents",
                ViolationKind::InconsistentPdfConfig {
                    reason: "latex_documents are listed but latex_engine is not set".to_owned(),
                },
            );
        }
    }
}
