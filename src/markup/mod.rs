use std::fmt;

use askama_escape::{Html, escape as escape_with};

pub mod inline;

/// HTML that is safe to embed as-is.
///
/// Only the functions in this module build one, so every `Markup` has had its
/// user-supplied text escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap output rendered by one of our own templates.
    pub(crate) fn from_rendered(html: String) -> Self {
        Markup(html)
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape `<`, `>`, `&`, `"` and `'`.
pub fn escape(text: &str) -> String {
    escape_with(text, Html).to_string()
}

/// Escape citation text for a `<pre>` block.
///
/// Some exported citations arrive with their newline entities already
/// escaped once (`&#10;`), which escaping again would turn into visible
/// `&amp;#10;`. Those are folded back into a real newline entity.
// Workaround for upstream double escaping; drop once the exports are clean.
pub fn citation(text: &str) -> Markup {
    Markup(escape(text).replace("&amp;#10;", "&#10;"))
}
