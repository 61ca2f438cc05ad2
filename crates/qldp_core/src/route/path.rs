//! Path patterns and locations.
//!
//! # Responsibility
//! - Compile route patterns such as `/people/:id` into matchers.
//! - Split a navigated URL into pathname and decoded query.
//!
//! # Invariants
//! - Matching is case-insensitive and tolerates one trailing slash.
//! - Exact patterns match the whole pathname; non-exact patterns match a
//!   prefix ending on a segment boundary.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

static PARAM_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid param name regex"));

/// Compiled route pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    param_names: Vec<String>,
    exact: Regex,
    prefix: Regex,
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PathPattern {}

/// Successful match of a pattern against a pathname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// Pattern that matched, e.g. `/people/:id`.
    pub path: String,
    /// Matched portion of the pathname.
    pub url: String,
    pub params: BTreeMap<String, String>,
    /// Whether the whole pathname was consumed.
    pub is_exact: bool,
}

impl PathPattern {
    /// Parses and compiles one pattern.
    ///
    /// # Errors
    /// - Pattern does not start with `/` or contains an empty segment.
    /// - A `:param` name is empty, invalid, or used twice.
    pub fn parse(raw: &str) -> Result<Self, PathPatternError> {
        let trimmed = raw.trim();
        if !trimmed.starts_with('/') {
            return Err(PathPatternError::MissingLeadingSlash(trimmed.to_string()));
        }

        let body = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let mut source = String::new();
        let mut param_names = Vec::new();
        let mut seen = BTreeSet::new();

        if !body.is_empty() {
            for segment in body[1..].split('/') {
                if segment.is_empty() {
                    return Err(PathPatternError::EmptySegment(trimmed.to_string()));
                }
                source.push('/');
                match segment.strip_prefix(':') {
                    Some(name) => {
                        if !PARAM_NAME_RE.is_match(name) {
                            return Err(PathPatternError::InvalidParamName(name.to_string()));
                        }
                        if !seen.insert(name.to_string()) {
                            return Err(PathPatternError::DuplicateParam(name.to_string()));
                        }
                        source.push_str("([^/]+)");
                        param_names.push(name.to_string());
                    }
                    None => source.push_str(&regex::escape(segment)),
                }
            }
        }

        let exact = compile(&format!("(?i)^{source}/?$"))?;
        let prefix = compile(&format!("(?i)^{source}(?:/|$)"))?;

        Ok(Self {
            raw: trimmed.to_string(),
            param_names,
            exact,
            prefix,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Matches `pathname` against this pattern.
    pub fn matches(&self, pathname: &str, exact: bool) -> Option<PathMatch> {
        let matcher = if exact { &self.exact } else { &self.prefix };
        let captures = matcher.captures(pathname)?;
        let whole = captures.get(0)?.as_str();

        let params = self
            .param_names
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                captures
                    .get(index + 1)
                    .map(|value| (name.clone(), value.as_str().to_string()))
            })
            .collect();

        let url = match whole.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped.to_string(),
            _ if whole.is_empty() => "/".to_string(),
            _ => whole.to_string(),
        };
        let is_exact = url.len() >= pathname.trim_end_matches('/').len();

        Some(PathMatch {
            path: self.raw.clone(),
            url,
            params,
            is_exact,
        })
    }
}

fn compile(source: &str) -> Result<Regex, PathPatternError> {
    Regex::new(source).map_err(|err| PathPatternError::Compile(err.to_string()))
}

/// Pattern parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPatternError {
    MissingLeadingSlash(String),
    EmptySegment(String),
    InvalidParamName(String),
    DuplicateParam(String),
    Compile(String),
}

impl Display for PathPatternError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingLeadingSlash(value) => {
                write!(f, "route pattern must start with `/`: {value}")
            }
            Self::EmptySegment(value) => write!(f, "route pattern has an empty segment: {value}"),
            Self::InvalidParamName(value) => {
                write!(f, "route parameter name is invalid: `{value}`")
            }
            Self::DuplicateParam(value) => write!(f, "route parameter is duplicated: {value}"),
            Self::Compile(message) => write!(f, "route pattern failed to compile: {message}"),
        }
    }
}

impl Error for PathPatternError {}

/// Navigated location: pathname plus decoded query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    pub query: BTreeMap<String, String>,
}

impl Location {
    /// Splits `url` on `?` (ignoring any `#fragment`) and decodes the query.
    ///
    /// An empty pathname becomes `/`. Repeated query keys keep the last value.
    pub fn parse(url: &str) -> Self {
        let without_fragment = url.split('#').next().unwrap_or_default().trim();
        let (pathname, search) = match without_fragment.split_once('?') {
            Some((pathname, search)) => (pathname, search),
            None => (without_fragment, ""),
        };

        let pathname = if pathname.is_empty() {
            "/".to_string()
        } else if pathname.starts_with('/') {
            pathname.to_string()
        } else {
            format!("/{pathname}")
        };

        let query = url::form_urlencoded::parse(search.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        Self { pathname, query }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pathname)?;
        if !self.query.is_empty() {
            let search = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            write!(f, "?{search}")?;
        }
        Ok(())
    }
}
