//! Theme adapters: the knobs each shipped theme recognizes.

use crate::schema::{OptionValue, Theme};

/// Type and default of a theme knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnobDefault {
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

impl KnobDefault {
    /// TOML type name this knob accepts.
    #[must_use]
    pub fn expected(self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Str(_) => "string",
        }
    }

    pub(crate) fn to_value(self) -> OptionValue {
        match self {
            Self::Bool(b) => OptionValue::Bool(b),
            Self::Int(i) => OptionValue::Int(i),
            Self::Str(s) => OptionValue::Str(s.to_owned()),
        }
    }
}

/// A recognized theme knob.
#[derive(Debug, Clone, Copy)]
pub struct Knob {
    pub name: &'static str,
    pub default: KnobDefault,
}

const fn knob(name: &'static str, default: KnobDefault) -> Knob {
    Knob { name, default }
}

const ALABASTER: &[Knob] = &[
    knob("description", KnobDefault::Str("")),
    knob("github_user", KnobDefault::Str("")),
    knob("github_repo", KnobDefault::Str("")),
    knob("fixed_sidebar", KnobDefault::Bool(false)),
    knob("page_width", KnobDefault::Str("940px")),
    knob("sidebar_width", KnobDefault::Str("220px")),
    knob("show_powered_by", KnobDefault::Bool(true)),
    knob("show_relbars", KnobDefault::Bool(false)),
];

const RTD: &[Knob] = &[
    knob("logo_only", KnobDefault::Bool(false)),
    knob("prev_next_buttons_location", KnobDefault::Str("bottom")),
    knob("style_external_links", KnobDefault::Bool(false)),
    knob("vcs_pageview_mode", KnobDefault::Str("")),
    knob("style_nav_header_background", KnobDefault::Str("#2980B9")),
    knob("collapse_navigation", KnobDefault::Bool(true)),
    knob("sticky_navigation", KnobDefault::Bool(true)),
    knob("navigation_depth", KnobDefault::Int(4)),
    knob("includehidden", KnobDefault::Bool(true)),
    knob("titles_only", KnobDefault::Bool(false)),
];

const BOOK: &[Knob] = &[
    knob("navigation_depth", KnobDefault::Int(4)),
    knob("show_navbar_depth", KnobDefault::Int(1)),
    knob("show_toc_level", KnobDefault::Int(1)),
    knob("collapse_navigation", KnobDefault::Bool(false)),
    knob("home_page_in_toc", KnobDefault::Bool(false)),
    knob("use_download_button", KnobDefault::Bool(true)),
    knob("use_fullscreen_button", KnobDefault::Bool(true)),
    knob("use_repository_button", KnobDefault::Bool(false)),
    knob("use_issues_button", KnobDefault::Bool(false)),
    knob("use_edit_page_button", KnobDefault::Bool(false)),
    knob("repository_url", KnobDefault::Str("")),
    knob("repository_branch", KnobDefault::Str("main")),
    knob("path_to_docs", KnobDefault::Str("")),
];

const FURO: &[Knob] = &[
    knob("sidebar_hide_name", KnobDefault::Bool(false)),
    knob("navigation_with_keys", KnobDefault::Bool(false)),
    knob("top_of_page_button", KnobDefault::Str("edit")),
    knob("light_logo", KnobDefault::Str("")),
    knob("dark_logo", KnobDefault::Str("")),
    knob("source_repository", KnobDefault::Str("")),
    knob("source_branch", KnobDefault::Str("")),
    knob("source_directory", KnobDefault::Str("")),
];

impl Theme {
    /// Knobs recognized by this theme's adapter.
    #[must_use]
    pub fn knobs(self) -> &'static [Knob] {
        match self {
            Self::Alabaster => ALABASTER,
            Self::Rtd => RTD,
            Self::Book => BOOK,
            Self::Furo => FURO,
        }
    }

    /// Look up a knob by name.
    #[must_use]
    pub fn knob(self, name: &str) -> Option<&'static Knob> {
        self.knobs().iter().find(|k| k.name == name)
    }
}
