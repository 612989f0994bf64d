//! Escaped identifier expressions for tables and attributes.
//!
//! SQLite accepts three escape styles for identifiers. Which one applies
//! depends on the characters in the name and, for attributes, on whether
//! the name collides with a reserved keyword.

use std::fmt;

use crate::name::{check_attr_name, NameCheck};

/// Symbols that force bracket-escaping of a table name.
const TABLE_BRACKET_SYMBOLS: &[char] = &['%', '(', ')', '-', '+', '/', '.', ','];

/// Symbols that force bracket-escaping of an attribute name.
const ATTR_BRACKET_SYMBOLS: &[char] = &[
    '%', '(', ')', '{', '}', '-', '+', '/', '.', ';', ':', '`', '\'', '"', '\0', '\\', '*', '?',
    '<', '>', '|', '!', '#', '&', '=', '~', '^', '@',
];

/// A table name rendered with the escaping SQLite requires.
///
/// ```
/// use ql_query::TableRef;
///
/// assert_eq!(TableRef::new("length(cm)").to_string(), "[length(cm)]");
/// assert_eq!(TableRef::new("monthly sales").to_string(), "'monthly sales'");
/// assert_eq!(TableRef::new("sales").to_string(), "sales");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    name: String,
}

impl TableRef {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.name;
        let leading_digit = name.chars().next().is_some_and(|c| c.is_ascii_digit());
        if leading_digit || name.chars().any(|c| TABLE_BRACKET_SYMBOLS.contains(&c)) {
            write!(f, "[{name}]")
        } else if name.chars().any(char::is_whitespace) {
            write!(f, "'{name}'")
        } else {
            f.write_str(name)
        }
    }
}

/// An attribute (column) name rendered with the escaping SQLite requires,
/// optionally wrapped in an aggregate function.
///
/// Quote characters and newlines in the raw name are replaced with `_`
/// before rendering.
///
/// ```
/// use ql_query::Attr;
///
/// assert_eq!(Attr::new("a+b").to_string(), "[a+b]");
/// assert_eq!(Attr::new("key").to_string(), "key");
/// assert_eq!(Attr::with_function("value", "SUM").to_string(), "SUM(value)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    name: String,
    function: Option<String>,
}

impl Attr {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: sanitize(&name.into()),
            function: None,
        }
    }

    /// Wrap the attribute in a SQL function, e.g. `SUM(value)`.
    pub fn with_function<S: Into<String>, F: Into<String>>(name: S, function: F) -> Self {
        Self {
            name: sanitize(&name.into()),
            function: Some(function.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn escaped(&self) -> String {
        let name = &self.name;

        // Quoting takes precedence: a bracketed identifier terminates at
        // the first `]` in the name.
        let reserved = matches!(check_attr_name(name), Ok(NameCheck::ReservedNonReusable));
        if reserved || name.contains(['[', ']', '_']) {
            return format!("\"{name}\"");
        }

        let need_bracket = name
            .chars()
            .any(|c| ATTR_BRACKET_SYMBOLS.contains(&c) || c.is_ascii_digit() || c.is_whitespace());
        if need_bracket {
            return format!("[{name}]");
        }

        // "join" slips past the keyword check when lowercase but still
        // breaks statements unless bracketed.
        if name == "join" {
            return format!("[{name}]");
        }

        name.clone()
    }
}

fn sanitize(name: &str) -> String {
    name.replace(['\'', '"', ',', '\n', '\r'], "_")
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let escaped = self.escaped();
        match &self.function {
            Some(func) => write!(f, "{func}({escaped})"),
            None => f.write_str(&escaped),
        }
    }
}

/// A comma-joined list of attributes, optionally all wrapped in the same
/// function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrList {
    attrs: Vec<Attr>,
}

impl AttrList {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            attrs: names.iter().map(|n| Attr::new(n.as_ref())).collect(),
        }
    }

    pub fn with_function<S: AsRef<str>>(names: &[S], function: &str) -> Self {
        Self {
            attrs: names
                .iter()
                .map(|n| Attr::with_function(n.as_ref(), function))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }
}

impl fmt::Display for AttrList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.attrs.iter().map(|a| a.to_string()).collect();
        f.write_str(&rendered.join(","))
    }
}

#[cfg(test)]
#[path = "expr_test.rs"]
mod tests;
