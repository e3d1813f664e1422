use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    static ref NUMERIC_CELL: Regex = Regex::new(r"^-?\d+(\.\d+)?$").unwrap();
}

/// One typed cell of a decoded recommendation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
}

/// Header-ordered, string-keyed row. Unknown columns are carried as-is.
pub type Record = IndexMap<String, Scalar>;

impl Scalar {
    /// Coerce a raw CSV cell: empty is null, `true`/`false` are booleans,
    /// plain decimal numbers are numbers, everything else stays text.
    pub fn coerce(raw: &str) -> Scalar {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Scalar::Null;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Scalar::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Scalar::Boolean(false);
        }
        if NUMERIC_CELL.is_match(trimmed) {
            if let Ok(number) = trimmed.parse::<f64>() {
                return Scalar::Number(number);
            }
        }
        Scalar::Text(trimmed.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}
