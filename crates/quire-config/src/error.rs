//! Validation error taxonomy.
//!
//! Resolution never stops at the first problem. Every [`Violation`] found in a
//! raw record is collected into one [`ValidationError`] so a build operator can
//! fix the whole file in one pass.

use std::fmt;

/// Reason a single configuration key was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViolationKind {
    /// Required field is absent, disabled, or empty.
    #[error("required field is missing or empty")]
    MissingRequiredField,
    /// Value has the wrong TOML type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Expected type description (e.g. "string", "array of strings").
        expected: &'static str,
        /// TOML type that was found.
        found: &'static str,
    },
    /// Key is not part of the schema.
    #[error("unknown key")]
    UnknownKey,
    /// Identifier is not one of the recognized values.
    #[error("unknown value `{value}` (expected one of: {})", .allowed.join(", "))]
    UnknownEnumValue {
        /// Value as written in the record.
        value: String,
        /// Canonical identifiers accepted for this key.
        allowed: Vec<&'static str>,
    },
    /// Path appears more than once in a list that must be distinct.
    #[error("duplicate path `{path}`")]
    DuplicatePathEntry {
        /// The repeated path.
        path: String,
    },
    /// Key and its alias are both set.
    #[error("conflicts with `{other}`; set only one of them")]
    ConflictingKeys {
        /// The other spelling of the same setting.
        other: &'static str,
    },
    /// PDF engine and PDF documents disagree.
    #[error("{reason}")]
    InconsistentPdfConfig {
        /// What is inconsistent.
        reason: String,
    },
    /// Exclude pattern is not a valid glob.
    #[error("invalid glob `{pattern}`: {message}")]
    InvalidPattern {
        /// Pattern as written.
        pattern: String,
        /// Parser message.
        message: String,
    },
}

/// A rejected key together with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted key path (e.g. `theme_options.navigation_depth`, `extensions[2]`).
    pub key: String,
    /// Why the key was rejected.
    pub kind: ViolationKind,
}

impl Violation {
    pub(crate) fn new(key: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            key: key.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.kind)
    }
}

/// Every violation found while resolving one raw record, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self { violations }
    }

    /// All collected violations.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Number of collected violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Always false; a `ValidationError` carries at least one violation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Find the first violation reported for `key`.
    #[must_use]
    pub fn for_key(&self, key: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.key == key)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.violations.len();
        let noun = if count == 1 { "problem" } else { "problems" };
        write!(f, "{count} configuration {noun}:")?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
