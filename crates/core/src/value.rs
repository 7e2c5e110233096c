use std::collections::BTreeMap;
use std::fmt;

/// A typed property value exchanged with a [`PropertySource`](crate::PropertySource).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Str(String),
    StrList(Vec<String>),
    Int(i64),
    /// String-keyed dictionary, e.g. MPRIS track metadata.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Loose truthiness: `false`, `0`, `""` and empty collections are false.
    pub fn truthy(&self) -> bool {
        match self {
            Self::Bool(b)    => *b,
            Self::Int(n)     => *n != 0,
            Self::Str(s)     => !s.is_empty(),
            Self::StrList(l) => !l.is_empty(),
            Self::Map(m)     => !m.is_empty(),
        }
    }

    /// Short type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_)    => "bool",
            Self::Str(_)     => "string",
            Self::StrList(_) => "string list",
            Self::Int(_)     => "integer",
            Self::Map(_)     => "map",
        }
    }
}

/// Human-readable rendering used when a value is substituted into display text.
/// String lists are joined with `,`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b)    => write!(f, "{b}"),
            Self::Str(s)     => f.write_str(s),
            Self::StrList(l) => f.write_str(&l.join(",")),
            Self::Int(n)     => write!(f, "{n}"),
            Self::Map(m)     => {
                let entries: Vec<String> = m.iter().map(|(k, v)| format!("{k}={v}")).collect();
                write!(f, "{{{}}}", entries.join(", "))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(l: Vec<String>) -> Self {
        Self::StrList(l)
    }
}
