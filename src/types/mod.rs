//! Core transaction and annotation value types.
//!
//! Transactions are owned by the host; the engine only reads them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Highlight colours the host can attach to a stored transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HighlightColor {
    /// No highlight.
    #[default]
    None,
    /// Red.
    Red,
    /// Orange.
    Orange,
    /// Yellow.
    Yellow,
    /// Green.
    Green,
    /// Cyan.
    Cyan,
    /// Blue.
    Blue,
    /// Pink.
    Pink,
    /// Magenta.
    Magenta,
    /// Gray.
    Gray,
}

impl HighlightColor {
    /// Every colour in palette order.
    pub const ALL: [HighlightColor; 10] = [
        Self::None,
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Cyan,
        Self::Blue,
        Self::Pink,
        Self::Magenta,
        Self::Gray,
    ];

    /// Upper-case palette name, as the host spells it.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Red => "RED",
            Self::Orange => "ORANGE",
            Self::Yellow => "YELLOW",
            Self::Green => "GREEN",
            Self::Cyan => "CYAN",
            Self::Blue => "BLUE",
            Self::Pink => "PINK",
            Self::Magenta => "MAGENTA",
            Self::Gray => "GRAY",
        }
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A highlight colour name outside the host palette.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown highlight color: {0}")]
pub struct UnknownHighlightColor(pub String);

impl FromStr for HighlightColor {
    type Err = UnknownHighlightColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownHighlightColor(s.to_owned()))
    }
}

impl TryFrom<String> for HighlightColor {
    type Error = UnknownHighlightColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HighlightColor> for String {
    fn from(color: HighlightColor) -> Self {
        color.name().to_owned()
    }
}

/// Wire form of a request: the method, the full URL and, optionally, the
/// path exactly as captured.
#[derive(Debug, Deserialize)]
struct RawRequest {
    method: String,
    url: String,
    #[serde(default)]
    path: Option<String>,
}

/// An already-parsed HTTP request as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRequest")]
pub struct Request {
    /// Request method, upper-case as supplied.
    pub method: String,
    /// Path including any query string.
    pub path: String,
    /// Path with the query string removed.
    pub path_without_query: String,
    /// Full request URL.
    pub url: String,
}

impl Request {
    /// Build a request from a method and an absolute URL.
    ///
    /// The URL is parsed and re-serialised, so dot-segments are resolved,
    /// scheme and host are lower-cased, default ports dropped and unsafe
    /// characters percent-encoded. Use [`Request::from_parts`] to keep the
    /// host's captured text verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error when `url` is not an absolute URL.
    pub fn from_url(method: &str, url: &str) -> Result<Self, url::ParseError> {
        let parsed = url::Url::parse(url)?;
        let path_without_query = parsed.path().to_owned();
        let path = match parsed.query() {
            Some(query) => format!("{path_without_query}?{query}"),
            None => path_without_query.clone(),
        };
        Ok(Self {
            method: method.to_owned(),
            path,
            path_without_query,
            url: parsed.as_str().to_owned(),
        })
    }

    /// Build a request from host-reported text without any URL parsing.
    ///
    /// `path` includes the query string; the query-less path is everything
    /// before the first `?`.
    pub fn from_parts(method: &str, url: &str, path: &str) -> Self {
        let path_without_query = path.split_once('?').map_or(path, |(p, _)| p);
        Self {
            method: method.to_owned(),
            path: path.to_owned(),
            path_without_query: path_without_query.to_owned(),
            url: url.to_owned(),
        }
    }
}

impl TryFrom<RawRequest> for Request {
    type Error = url::ParseError;

    fn try_from(raw: RawRequest) -> Result<Self, Self::Error> {
        match raw.path {
            Some(path) => Ok(Self::from_parts(&raw.method, &raw.url, &path)),
            None => Self::from_url(&raw.method, &raw.url),
        }
    }
}

/// An HTTP response; only the decoded body text is consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Response body as text.
    pub body: String,
}

/// A captured request paired with its optional response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// The captured request.
    pub request: Request,
    /// The response, when one was received.
    #[serde(default)]
    pub response: Option<Response>,
}

impl Transaction {
    /// Pair a request with an optional response.
    pub fn new(request: Request, response: Option<Response>) -> Self {
        Self { request, response }
    }

    /// Response body text, if a response exists.
    pub fn response_body(&self) -> Option<&str> {
        self.response.as_ref().map(|r| r.body.as_str())
    }
}
