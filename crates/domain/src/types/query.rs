//! Structured object-store queries
//!
//! Queries are built from `(field, operator, value)` terms joined with `and`
//! and rendered to the store's query language on demand. Values are escaped
//! at render time, so names containing quotes or backslashes cannot break out
//! of their literal.
//!
//! ```
//! use punchcard_domain::Query;
//!
//! let q = Query::new().name_is("O'Brien.csv").in_folder("f1").not_trashed();
//! assert_eq!(q.render(), r"name = 'O\'Brien.csv' and 'f1' in parents and trashed = false");
//! ```

use std::fmt;

use crate::StoredObject;

/// Queryable object attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    MimeType,
    Parents,
    Trashed,
}

impl Field {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::MimeType => "mimeType",
            Self::Parents => "parents",
            Self::Trashed => "trashed",
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    /// Collection membership, rendered as `value in field`.
    In,
}

/// Literal on the right-hand side of a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "'{}'", escape(text)),
            Self::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

/// A single `(field, operator, value)` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub field: Field,
    pub operator: Operator,
    pub value: Value,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field.as_str();
        match self.operator {
            Operator::Equals => write!(f, "{field} = {}", self.value),
            Operator::NotEquals => write!(f, "{field} != {}", self.value),
            Operator::Contains => write!(f, "{field} contains {}", self.value),
            Operator::In => write!(f, "{} in {field}", self.value),
        }
    }
}

impl Term {
    /// Evaluate the term against listed metadata.
    #[must_use]
    pub fn matches(&self, object: &StoredObject) -> bool {
        match (self.field, &self.value) {
            (Field::Trashed, Value::Bool(flag)) => match self.operator {
                Operator::Equals => object.trashed == *flag,
                Operator::NotEquals => object.trashed != *flag,
                Operator::Contains | Operator::In => false,
            },
            (Field::Parents, Value::Text(parent)) => match self.operator {
                Operator::In | Operator::Contains => object.parents.iter().any(|p| p == parent),
                Operator::Equals | Operator::NotEquals => false,
            },
            (Field::Name | Field::MimeType, Value::Text(expected)) => {
                let actual =
                    if self.field == Field::Name { &object.name } else { &object.mime_type };
                match self.operator {
                    Operator::Equals => actual == expected,
                    Operator::NotEquals => actual != expected,
                    Operator::Contains => actual.contains(expected.as_str()),
                    Operator::In => false,
                }
            }
            _ => false,
        }
    }
}

/// Conjunction of terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    terms: Vec<Term>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary term.
    #[must_use]
    pub fn term(mut self, field: Field, operator: Operator, value: Value) -> Self {
        self.terms.push(Term { field, operator, value });
        self
    }

    #[must_use]
    pub fn name_is(self, name: impl Into<String>) -> Self {
        self.term(Field::Name, Operator::Equals, Value::Text(name.into()))
    }

    #[must_use]
    pub fn mime_type_is(self, mime_type: impl Into<String>) -> Self {
        self.term(Field::MimeType, Operator::Equals, Value::Text(mime_type.into()))
    }

    #[must_use]
    pub fn in_folder(self, folder_id: impl Into<String>) -> Self {
        self.term(Field::Parents, Operator::In, Value::Text(folder_id.into()))
    }

    #[must_use]
    pub fn not_trashed(self) -> Self {
        self.term(Field::Trashed, Operator::Equals, Value::Bool(false))
    }

    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Render to the store's query language.
    #[must_use]
    pub fn render(&self) -> String {
        self.terms.iter().map(ToString::to_string).collect::<Vec<_>>().join(" and ")
    }

    /// `true` when every term matches.
    #[must_use]
    pub fn matches(&self, object: &StoredObject) -> bool {
        self.terms.iter().all(|term| term.matches(object))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '\'') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
