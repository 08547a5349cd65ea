//! URI and URI-reference values (RFC 3986).
//!
//! Only the syntax the CloudEvents type system relies on is checked:
//! - A URI reference contains no whitespace, control characters or
//!   characters RFC 3986 never allows (`<>"{}|\^` and backtick).
//! - If a scheme is present (a `:` before any `/`, `?` or `#`), it must be
//!   `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
//! - An absolute URI is a URI reference with a scheme.
//!
//! Values are stored exactly as written; no normalization is applied.

use std::fmt;

/// Error type for URI parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriParseError {
    pub message: String,
}

impl fmt::Display for UriParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UriParseError {}

/// An absolute URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri(String);

impl Uri {
    /// Parses an absolute URI.
    pub fn parse(text: impl Into<String>) -> Result<Self, UriParseError> {
        let text = text.into();
        match check_reference(&text)? {
            Some(_) => Ok(Uri(text)),
            None => Err(UriParseError {
                message: format!("URI is not absolute: {}", text),
            }),
        }
    }

    /// Returns the URI text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the scheme (text before the first `:`).
    pub fn scheme(&self) -> &str {
        self.0.split(':').next().unwrap_or_default()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A URI reference: either an absolute URI or a relative reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriReference(String);

impl UriReference {
    /// Parses a URI reference.
    pub fn parse(text: impl Into<String>) -> Result<Self, UriParseError> {
        let text = text.into();
        check_reference(&text)?;
        Ok(UriReference(text))
    }

    /// Returns the reference text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the reference carries a scheme.
    pub fn is_absolute(&self) -> bool {
        scheme_end(&self.0).is_some()
    }
}

impl From<Uri> for UriReference {
    fn from(uri: Uri) -> Self {
        UriReference(uri.0)
    }
}

impl fmt::Display for UriReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UriReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns the index of the scheme-terminating `:` if the text starts with
/// a syntactically valid scheme.
fn scheme_end(text: &str) -> Option<usize> {
    let colon = text.find(':')?;
    // A ':' after a path, query or fragment delimiter is not a scheme separator.
    if text[..colon].contains(['/', '?', '#']) {
        return None;
    }
    let scheme = &text[..colon];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return None,
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some(colon)
    } else {
        None
    }
}

/// Validates reference syntax, returning the scheme end if absolute.
fn check_reference(text: &str) -> Result<Option<usize>, UriParseError> {
    if text.is_empty() {
        return Err(UriParseError {
            message: "URI reference is empty".to_string(),
        });
    }

    if let Some(c) = text.chars().find(|c| {
        c.is_whitespace()
            || c.is_control()
            || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`')
    }) {
        return Err(UriParseError {
            message: format!("URI reference contains invalid character {:?}: {}", c, text),
        });
    }

    // A leading segment containing ':' must be a valid scheme, otherwise the
    // reference is ambiguous (RFC 3986 section 4.2).
    let first_segment_end = text.find(['/', '?', '#']).unwrap_or(text.len());
    if text[..first_segment_end].contains(':') && scheme_end(text).is_none() {
        return Err(UriParseError {
            message: format!("URI reference has an invalid scheme: {}", text),
        });
    }

    Ok(scheme_end(text))
}
