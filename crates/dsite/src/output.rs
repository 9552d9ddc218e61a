//! Colored terminal output.

use console::{Style, Term};

/// Terminal output on stderr.
pub(crate) struct Output {
    term: Term,
    label: Style,
    success: Style,
    warning: Style,
    error: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().cyan().bold(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
        }
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Plain message.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// `label: value` with a highlighted label.
    pub(crate) fn field(&self, label: &str, value: &str) {
        self.line(&format!("{} {value}", self.label.apply_to(format!("{label}:"))));
    }

    /// Green message.
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.success.apply_to(msg).to_string());
    }

    /// Yellow message.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.warning.apply_to(msg).to_string());
    }

    /// Red message.
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.error.apply_to(msg).to_string());
    }
}
