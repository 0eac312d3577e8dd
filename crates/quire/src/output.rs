//! Colored terminal output.
//!
//! Everything goes to stderr; stdout is reserved for `quire resolve` JSON.

use console::{Style, Term};
use quire_config::Violation;

/// Width of the label column in [`Output::field`].
const LABEL_WIDTH: usize = 14;

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
    cyan_bold: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        self.line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print an aligned `label  value` line with a dimmed label.
    pub(crate) fn field(&self, label: &str, value: &str) {
        let label = format!("{label:<LABEL_WIDTH$}");
        self.line(&format!("  {}{value}", self.dim.apply_to(label)));
    }

    /// Print one violation: key in yellow, reason plain.
    pub(crate) fn violation(&self, violation: &Violation) {
        self.line(&format!(
            "  {} {}",
            self.yellow.apply_to(&violation.key),
            violation.kind
        ));
    }
}
