//! # Book Records
//!
//! The catalog entity and the request shape used to create or overwrite it.

use serde::{Deserialize, Serialize};

use super::errors::{CatalogError, CatalogResult};

/// A catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-generated identifier, never changes after creation
    pub id: String,

    pub title: String,

    pub author: String,

    /// Publication year, `null` in JSON when unknown
    pub year: Option<i64>,

    /// ISBN, empty when unknown
    pub isbn: String,
}

/// Raw `year` as clients send it: a number, a numeric string from a form
/// field, or occasionally a boolean.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl YearValue {
    /// Normalize to an integer year.
    ///
    /// Zero, booleans and the empty string mean "no year". Floats truncate
    /// toward zero. Strings use their leading integer prefix, so `"1965"`
    /// and `" 1965 AD"` both give 1965 while `"unknown"` gives `None`.
    /// Out-of-range numbers and numeric strings saturate at the `i64` bounds.
    pub fn normalize(&self) -> Option<i64> {
        match self {
            YearValue::Bool(_) => None,
            YearValue::Int(0) => None,
            YearValue::Int(n) => Some(*n),
            YearValue::Float(f) if *f == 0.0 || !f.is_finite() => None,
            YearValue::Float(f) => Some(f.trunc() as i64),
            YearValue::Text(s) => parse_leading_int(s),
        }
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &rest[..digits_len];
    let parsed = if negative {
        format!("-{}", digits).parse()
    } else {
        digits.parse()
    };

    // Only overflow can fail here: the prefix is all ASCII digits.
    Some(parsed.unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}

/// Create/update request body
///
/// Every field is optional at the type level; presence of `title` and
/// `author` is checked by [`BookInput::validate`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BookInput {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub year: Option<YearValue>,

    #[serde(default)]
    pub isbn: Option<String>,
}

/// Normalized, validated book fields (everything but the id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub year: Option<i64>,
    pub isbn: String,
}

impl BookFields {
    pub fn into_book(self, id: String) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            year: self.year,
            isbn: self.isbn,
        }
    }
}

impl BookInput {
    /// Convenience constructor for the two required fields
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: YearValue) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Check required fields and apply normalization
    pub fn validate(&self) -> CatalogResult<BookFields> {
        let title = non_empty(&self.title).ok_or(CatalogError::Validation)?;
        let author = non_empty(&self.author).ok_or(CatalogError::Validation)?;

        Ok(BookFields {
            title: title.to_string(),
            author: author.to_string(),
            year: self.year.as_ref().and_then(YearValue::normalize),
            isbn: self.isbn.clone().unwrap_or_default(),
        })
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
