use std::collections::BTreeMap;

use super::SparqlError;

/// A typed value bound into a query template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Rendered as a double-quoted string literal.
    String(String),
    /// Rendered as a bare integer.
    Integer(u64),
    Boolean(bool),
    /// Rendered space separated, for `VALUES` blocks.
    Values(Vec<Literal>),
}

impl Literal {
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Self::String(value) => {
                out.push('"');
                for ch in value.chars() {
                    match ch {
                        '\\' => out.push_str("\\\\"),
                        '"' => out.push_str("\\\""),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\t' => out.push_str("\\t"),
                        '\u{8}' => out.push_str("\\b"),
                        '\u{c}' => out.push_str("\\f"),
                        other => out.push(other),
                    }
                }
                out.push('"');
            }
            Self::Integer(value) => out.push_str(&value.to_string()),
            Self::Boolean(value) => out.push_str(if *value { "true" } else { "false" }),
            Self::Values(values) => {
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        out.push(' ');
                    }
                    value.render_into(out);
                }
            }
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// A query template plus the literals bound to its `$name` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparqlQuery {
    template: String,
    bindings: BTreeMap<String, Literal>,
}

impl SparqlQuery {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            bindings: BTreeMap::new(),
        }
    }

    /// Binds a value to the `$name` placeholder, replacing earlier bindings.
    #[must_use]
    pub fn bind(mut self, (name, value): (&str, impl Into<Literal>)) -> Self {
        self.bindings.insert(name.to_string(), value.into());
        self
    }

    /// Substitutes every placeholder with its escaped literal.
    ///
    /// A `$` not followed by a name character is copied through unchanged.
    ///
    /// # Errors
    /// Returns `SparqlError::UnboundParameter` for a placeholder with no value.
    pub fn render(&self) -> Result<String, SparqlError> {
        let mut out = String::with_capacity(self.template.len());
        let mut chars = self.template.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch != '$' {
                out.push(ch);
                continue;
            }
            let mut name = String::new();
            while let Some(&next) = chars.peek() {
                if next.is_ascii_alphanumeric() || next == '_' {
                    name.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            if name.is_empty() {
                out.push('$');
                continue;
            }
            let value = self
                .bindings
                .get(&name)
                .ok_or_else(|| SparqlError::UnboundParameter(name.clone()))?;
            value.render_into(&mut out);
        }
        Ok(out)
    }
}
