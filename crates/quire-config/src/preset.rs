//! Named presets.
//!
//! A preset is a raw record merged beneath the user's record: any key the user
//! sets wins, `theme_options` merge knob by knob.

use toml::{Table, Value};

use crate::schema::{Identifier, Theme};

/// Built-in configuration preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Read-the-Docs themed notes site with copy buttons and code tabs.
    Notes,
    /// Book theme with Markdown sources and layout components.
    Book,
    /// Plain theme with Markdown sources.
    Markdown,
    /// PDF output via pdflatex (documents still come from the user).
    Pdf,
}

impl Identifier for Preset {
    const ALL: &'static [Self] = &[Self::Notes, Self::Book, Self::Markdown, Self::Pdf];

    fn id(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Book => "book",
            Self::Markdown => "markdown",
            Self::Pdf => "pdf",
        }
    }
}

fn strings(items: &[&str]) -> Value {
    Value::Array(items.iter().map(|s| Value::String((*s).to_owned())).collect())
}

fn table<const N: usize>(entries: [(&str, Value); N]) -> Table {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect()
}

impl Preset {
    /// One-line description for listings.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Notes => "rtd theme, copy buttons and tabbed code blocks",
            Self::Book => "book theme with Markdown sources and design components",
            Self::Markdown => "alabaster theme with Markdown sources",
            Self::Pdf => "pdflatex output; supply latex_documents yourself",
        }
    }

    /// Defaults record for this preset.
    #[must_use]
    pub fn defaults(self) -> Table {
        match self {
            Self::Notes => table([
                (
                    "extensions",
                    strings(&["rtd_theme", "copybutton", "code_tabs"]),
                ),
                ("theme", Value::String("rtd".to_owned())),
                (
                    "theme_options",
                    Value::Table(table([
                        ("logo_only", Value::Boolean(false)),
                        ("collapse_navigation", Value::Boolean(true)),
                        ("sticky_navigation", Value::Boolean(true)),
                        ("includehidden", Value::Boolean(true)),
                        ("navigation_depth", Value::Integer(10)),
                        ("titles_only", Value::Boolean(false)),
                    ])),
                ),
            ]),
            Self::Book => table([
                (
                    "extensions",
                    strings(&["book_theme", "myst", "design", "copybutton"]),
                ),
                ("theme", Value::String("book".to_owned())),
                ("myst_enable_extensions", strings(&["colon_fence"])),
                (
                    "source_suffix",
                    Value::Table(table([
                        (".rst", Value::String("restructuredtext".to_owned())),
                        (".md", Value::String("markdown".to_owned())),
                    ])),
                ),
            ]),
            Self::Markdown => table([
                ("extensions", strings(&["myst"])),
                ("myst_enable_extensions", strings(&["colon_fence", "deflist"])),
                (
                    "source_suffix",
                    Value::Table(table([(".md", Value::String("markdown".to_owned()))])),
                ),
            ]),
            Self::Pdf => table([("latex_engine", Value::String("pdflatex".to_owned()))]),
        }
    }
}

/// Merge `user` over `base`.
///
/// `theme_options` merge per knob, but only while the user keeps the base
/// theme: knobs of a different theme would be rejected as unknown.
pub(crate) fn overlay(base: Table, user: Table) -> Table {
    let theme_of = |t: &Table| t.get("theme").and_then(Value::as_str).and_then(Theme::parse);
    let same_theme = !user.contains_key("theme") || theme_of(&base) == theme_of(&user);

    let mut merged = base;
    if !same_theme {
        merged.remove("theme_options");
    }

    for (key, value) in user {
        match value {
            Value::Table(incoming) if key == "theme_options" => {
                if let Some(Value::Table(existing)) = merged.get_mut(&key) {
                    for (knob, setting) in incoming {
                        existing.insert(knob, setting);
                    }
                } else {
                    merged.insert(key, Value::Table(incoming));
                }
            }
            value => {
                merged.insert(key, value);
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_user_key_overrides_preset() {
        let user = table([("extensions", strings(&["video"]))]);
        let merged = overlay(Preset::Notes.defaults(), user);

        assert_eq!(merged["extensions"], strings(&["video"]));
        assert_eq!(merged["theme"], Value::String("rtd".to_owned()));
    }

    #[test]
    fn test_theme_options_merge_per_knob() {
        let user = table([(
            "theme_options",
            Value::Table(table([("navigation_depth", Value::Integer(2))])),
        )]);
        let merged = overlay(Preset::Notes.defaults(), user);
        let options = merged["theme_options"].as_table().unwrap();

        assert_eq!(options["navigation_depth"], Value::Integer(2));
        assert_eq!(options["sticky_navigation"], Value::Boolean(true));
    }

    #[test]
    fn test_theme_change_drops_preset_knobs() {
        let user = table([("theme", Value::String("furo".to_owned()))]);
        let merged = overlay(Preset::Notes.defaults(), user);

        assert!(merged.get("theme_options").is_none());
        assert_eq!(merged["theme"], Value::String("furo".to_owned()));
    }

    #[test]
    fn test_theme_alias_keeps_preset_knobs() {
        let user = table([("theme", Value::String("sphinx_rtd_theme".to_owned()))]);
        let merged = overlay(Preset::Notes.defaults(), user);

        assert!(merged.get("theme_options").is_some());
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!(Preset::parse("notes"), Some(Preset::Notes));
        assert_eq!(Preset::parse("slides"), None);
    }
}
