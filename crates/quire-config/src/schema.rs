//! Resolved configuration types.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A closed set of identifiers that may appear in a raw record.
///
/// Each variant has one canonical id and any number of aliases (usually the
/// package name of the renderer add-on).
pub trait Identifier: Sized + Copy + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// Canonical identifier.
    fn id(self) -> &'static str;

    /// Accepted alternative spellings.
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    /// Look up a variant by canonical id or alias.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.id() == value || v.aliases().contains(&value))
    }

    /// Canonical ids of every variant.
    fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.id()).collect()
    }
}

/// Visual template with a shipped adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Alabaster,
    Rtd,
    Book,
    Furo,
}

impl Identifier for Theme {
    const ALL: &'static [Self] = &[Self::Alabaster, Self::Rtd, Self::Book, Self::Furo];

    fn id(self) -> &'static str {
        match self {
            Self::Alabaster => "alabaster",
            Self::Rtd => "rtd",
            Self::Book => "book",
            Self::Furo => "furo",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Alabaster | Self::Furo => &[],
            Self::Rtd => &["sphinx_rtd_theme"],
            Self::Book => &["sphinx_book_theme"],
        }
    }
}

/// Rendering capability activated by listing it in `extensions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extension {
    /// Copy button on code blocks.
    Copybutton,
    /// Tabbed code blocks.
    CodeTabs,
    /// Embedded video directive.
    Video,
    /// Lightweight-markup (Markdown) parser.
    Myst,
    /// Designed layout components (grids, cards, tabs).
    Design,
    /// Read-the-Docs theme package.
    RtdTheme,
    /// Book theme package.
    BookTheme,
}

impl Identifier for Extension {
    const ALL: &'static [Self] = &[
        Self::Copybutton,
        Self::CodeTabs,
        Self::Video,
        Self::Myst,
        Self::Design,
        Self::RtdTheme,
        Self::BookTheme,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Copybutton => "copybutton",
            Self::CodeTabs => "code_tabs",
            Self::Video => "video",
            Self::Myst => "myst",
            Self::Design => "design",
            Self::RtdTheme => "rtd_theme",
            Self::BookTheme => "book_theme",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Copybutton => &["sphinx_copybutton"],
            Self::CodeTabs => &["sphinx_code_tabs"],
            Self::Video => &["sphinxcontrib.video"],
            Self::Myst => &["myst_parser"],
            Self::Design => &["sphinx_design"],
            Self::RtdTheme => &["sphinx_rtd_theme"],
            Self::BookTheme => &["sphinx_book_theme"],
        }
    }
}

/// Sub-feature of the lightweight-markup parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupExtension {
    Amsmath,
    AttrsBlock,
    AttrsInline,
    ColonFence,
    Deflist,
    Dollarmath,
    Fieldlist,
    HtmlAdmonition,
    HtmlImage,
    Linkify,
    Replacements,
    Smartquotes,
    Strikethrough,
    Substitution,
    Tasklist,
}

impl Identifier for MarkupExtension {
    const ALL: &'static [Self] = &[
        Self::Amsmath,
        Self::AttrsBlock,
        Self::AttrsInline,
        Self::ColonFence,
        Self::Deflist,
        Self::Dollarmath,
        Self::Fieldlist,
        Self::HtmlAdmonition,
        Self::HtmlImage,
        Self::Linkify,
        Self::Replacements,
        Self::Smartquotes,
        Self::Strikethrough,
        Self::Substitution,
        Self::Tasklist,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Amsmath => "amsmath",
            Self::AttrsBlock => "attrs_block",
            Self::AttrsInline => "attrs_inline",
            Self::ColonFence => "colon_fence",
            Self::Deflist => "deflist",
            Self::Dollarmath => "dollarmath",
            Self::Fieldlist => "fieldlist",
            Self::HtmlAdmonition => "html_admonition",
            Self::HtmlImage => "html_image",
            Self::Linkify => "linkify",
            Self::Replacements => "replacements",
            Self::Smartquotes => "smartquotes",
            Self::Strikethrough => "strikethrough",
            Self::Substitution => "substitution",
            Self::Tasklist => "tasklist",
        }
    }
}

/// Content-format parser a source suffix maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ContentFormat {
    /// Structured markup.
    #[serde(rename = "restructuredtext")]
    ReStructuredText,
    /// Lightweight markup.
    #[serde(rename = "markdown")]
    Markdown,
}

impl Identifier for ContentFormat {
    const ALL: &'static [Self] = &[Self::ReStructuredText, Self::Markdown];

    fn id(self) -> &'static str {
        match self {
            Self::ReStructuredText => "restructuredtext",
            Self::Markdown => "markdown",
        }
    }
}

/// PDF (LaTeX) engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfEngine {
    Pdflatex,
    Xelatex,
    Lualatex,
    Platex,
    Uplatex,
}

impl Identifier for PdfEngine {
    const ALL: &'static [Self] = &[
        Self::Pdflatex,
        Self::Xelatex,
        Self::Lualatex,
        Self::Platex,
        Self::Uplatex,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Pdflatex => "pdflatex",
            Self::Xelatex => "xelatex",
            Self::Lualatex => "lualatex",
            Self::Platex => "platex",
            Self::Uplatex => "uplatex",
        }
    }
}

macro_rules! impl_display_via_id {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.id())
            }
        })*
    };
}

impl_display_via_id!(Theme, Extension, MarkupExtension, ContentFormat, PdfEngine);

/// One PDF build descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfDocument {
    /// Root source document name.
    pub source: String,
    /// Output file name.
    pub output: String,
    /// Document title.
    pub title: String,
    /// Document author.
    pub author: String,
    /// LaTeX document class (e.g. `manual`, `howto`).
    pub document_class: String,
}

/// Value of a theme knob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

/// Validated, defaulted site configuration.
///
/// Built only by [`resolve`](crate::resolve); there are no setters, so a value
/// handed to the renderer stays exactly as resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    pub(crate) project: String,
    pub(crate) author: String,
    pub(crate) release: String,
    pub(crate) version: String,
    pub(crate) copyright: String,
    pub(crate) language: String,
    pub(crate) extensions: Vec<Extension>,
    pub(crate) theme: Theme,
    pub(crate) theme_options: BTreeMap<String, OptionValue>,
    pub(crate) source_suffix: BTreeMap<String, ContentFormat>,
    pub(crate) markup_extensions: BTreeSet<MarkupExtension>,
    pub(crate) templates_path: Vec<PathBuf>,
    pub(crate) static_paths: Vec<PathBuf>,
    pub(crate) logo: Option<PathBuf>,
    pub(crate) favicon: Option<PathBuf>,
    pub(crate) html_title: Option<String>,
    pub(crate) exclude_patterns: BTreeSet<String>,
    pub(crate) pdf_engine: Option<PdfEngine>,
    pub(crate) pdf_documents: Vec<PdfDocument>,
    pub(crate) stylesheet: PathBuf,
}

impl SiteConfig {
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Full release string (e.g. `1.0.3`).
    #[must_use]
    pub fn release(&self) -> &str {
        &self.release
    }

    /// Short `X.Y` version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Enabled extensions in activation order.
    #[must_use]
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// Whether `extension` is enabled.
    #[must_use]
    pub fn has_extension(&self, extension: Extension) -> bool {
        self.extensions.contains(&extension)
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Every knob the theme recognizes, with user values applied over defaults.
    #[must_use]
    pub fn theme_options(&self) -> &BTreeMap<String, OptionValue> {
        &self.theme_options
    }

    /// Look up one theme knob.
    #[must_use]
    pub fn theme_option(&self, name: &str) -> Option<&OptionValue> {
        self.theme_options.get(name)
    }

    #[must_use]
    pub fn source_suffix(&self) -> &BTreeMap<String, ContentFormat> {
        &self.source_suffix
    }

    #[must_use]
    pub fn markup_extensions(&self) -> &BTreeSet<MarkupExtension> {
        &self.markup_extensions
    }

    #[must_use]
    pub fn templates_path(&self) -> &[PathBuf] {
        &self.templates_path
    }

    #[must_use]
    pub fn static_paths(&self) -> &[PathBuf] {
        &self.static_paths
    }

    #[must_use]
    pub fn logo(&self) -> Option<&Path> {
        self.logo.as_deref()
    }

    #[must_use]
    pub fn favicon(&self) -> Option<&Path> {
        self.favicon.as_deref()
    }

    #[must_use]
    pub fn html_title(&self) -> Option<&str> {
        self.html_title.as_deref()
    }

    #[must_use]
    pub fn exclude_patterns(&self) -> &BTreeSet<String> {
        &self.exclude_patterns
    }

    #[must_use]
    pub fn pdf_engine(&self) -> Option<PdfEngine> {
        self.pdf_engine
    }

    /// PDF build descriptors in the order they were declared.
    #[must_use]
    pub fn pdf_documents(&self) -> &[PdfDocument] {
        &self.pdf_documents
    }

    /// Post-configuration action that registers the custom stylesheet.
    #[must_use]
    pub fn stylesheet_hook(&self) -> StylesheetHook<'_> {
        StylesheetHook {
            path: &self.stylesheet,
        }
    }
}

/// Registers one custom stylesheet with the renderer.
///
/// The host toolchain calls [`register`](Self::register) once per build,
/// after configuration is resolved. Consuming `self` keeps it to one call.
#[derive(Debug, Clone, Copy)]
pub struct StylesheetHook<'a> {
    path: &'a Path,
}

impl<'a> StylesheetHook<'a> {
    /// Stylesheet path, relative to the first static path.
    #[must_use]
    pub fn path(&self) -> &'a Path {
        self.path
    }

    /// Hand the stylesheet to the renderer's `add_css_file` callback.
    pub fn register<F>(self, add_css_file: F)
    where
        F: FnOnce(&Path),
    {
        tracing::debug!(stylesheet = %self.path.display(), "Registering custom stylesheet");
        add_css_file(self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_canonical_id_and_alias() {
        assert_eq!(Extension::parse("copybutton"), Some(Extension::Copybutton));
        assert_eq!(
            Extension::parse("sphinx_copybutton"),
            Some(Extension::Copybutton)
        );
        assert_eq!(Theme::parse("sphinx_rtd_theme"), Some(Theme::Rtd));
        assert_eq!(Theme::parse("bootstrap"), None);
    }

    #[test]
    fn test_allowed_lists_canonical_ids_only() {
        assert_eq!(
            PdfEngine::allowed(),
            vec!["pdflatex", "xelatex", "lualatex", "platex", "uplatex"]
        );
        assert!(!Theme::allowed().contains(&"sphinx_rtd_theme"));
    }

    #[test]
    fn test_serialized_ids_match_identifiers() {
        for ext in Extension::ALL {
            let json = serde_json::to_value(ext).unwrap();
            assert_eq!(json, serde_json::Value::String(ext.id().to_owned()));
        }
        for ext in MarkupExtension::ALL {
            let json = serde_json::to_value(ext).unwrap();
            assert_eq!(json, serde_json::Value::String(ext.id().to_owned()));
        }
        for format in ContentFormat::ALL {
            let json = serde_json::to_value(format).unwrap();
            assert_eq!(json, serde_json::Value::String(format.id().to_owned()));
        }
    }
}
