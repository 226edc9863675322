//! Request cookies

/// A cookie to send with a request.
///
/// Only `name` and `value` go on the wire; the remaining attributes are kept
/// so callers can pass cookies through from a response or a jar unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    pub expires: Option<i64>,
    pub max_age: Option<i64>,
}

impl Cookie {
    /// Create a cookie with just a name and value
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Parse a `NAME=VALUE` pair
    pub fn parse(input: &str) -> Option<Self> {
        let (name, value) = input.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, value.trim()))
    }
}

/// Convert cookies to HTTP header format
pub fn cookies_to_header(cookies: &[Cookie]) -> String {
    cookies
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ")
}
