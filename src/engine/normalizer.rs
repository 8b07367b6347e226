//! Request labelling: collapse variable path segments into stable tokens.
//!
//! Rules are applied in order, each one rewriting the output of the previous
//! one. Reordering the default rules changes the resulting labels.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Canonical UUID shape after a slash, matched case-insensitively.
const UUID_PATTERN: &str =
    r"(?i)/[0-9A-F]{8}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{12}";
/// Slash followed by a run of decimal digits. Not anchored at the segment end.
const NUMBER_PATTERN: &str = r"/\d+";
/// Single-digit API version segment.
const VERSION_PATTERN: &str = r"/v\d/";

/// One substitution step of a [`RuleSet`].
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: String,
}

impl RewriteRule {
    /// Compile a rule from a regex and its replacement text.
    ///
    /// # Errors
    ///
    /// Returns an error when `pattern` is not a valid regex.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_owned(),
        })
    }

    /// Rule replacing a literal substring everywhere it occurs.
    ///
    /// # Errors
    ///
    /// Returns an error when the escaped needle exceeds the regex size limit.
    pub fn literal(needle: &str, replacement: &str) -> Result<Self, regex::Error> {
        Self::new(&regex::escape(needle), replacement)
    }

    /// Source text of the rule's pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Replacement text.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Rewrite every non-overlapping match in `input`.
    pub fn apply(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, regex::NoExpand(self.replacement.as_str()))
            .into_owned()
    }
}

/// Ordered list of rewrite rules, applied left to right.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    /// Empty rule set; leaves every path untouched.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard cascade: UUIDs, `/api/` prefix, numeric ids, version markers.
    pub fn default_rules() -> Self {
        let rules = [
            RewriteRule::new(UUID_PATTERN, "/:uuid"),
            RewriteRule::literal("/api/", "/"),
            RewriteRule::new(NUMBER_PATTERN, "/:num"),
            RewriteRule::new(VERSION_PATTERN, "/"),
        ];

        Self {
            rules: rules.into_iter().filter_map(Result::ok).collect(),
        }
    }

    /// Append a rule after the existing ones.
    pub fn push(&mut self, rule: RewriteRule) {
        self.rules.push(rule);
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Run `path` through every rule in order.
    pub fn apply(&self, path: &str) -> String {
        self.rules
            .iter()
            .fold(path.to_owned(), |current, rule| rule.apply(&current))
    }
}

/// Short display name for a request: `"<METHOD> <normalized-path>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Borrow the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives [`Label`]s using a [`RuleSet`].
#[derive(Debug, Clone)]
pub struct PathNormalizer {
    rules: RuleSet,
}

impl Default for PathNormalizer {
    fn default() -> Self {
        Self::new(RuleSet::default_rules())
    }
}

impl PathNormalizer {
    /// Normalizer using a custom rule set.
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Shared normalizer with the default rules, compiled once per process.
    pub fn shared() -> &'static PathNormalizer {
        static DEFAULT: OnceLock<PathNormalizer> = OnceLock::new();
        DEFAULT.get_or_init(PathNormalizer::default)
    }

    /// Rules this normalizer applies.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Rewrite a query-less path.
    pub fn normalize_path(&self, path_without_query: &str) -> String {
        self.rules.apply(path_without_query)
    }

    /// Label for `method` and `path_without_query`.
    pub fn label(&self, method: &str, path_without_query: &str) -> Label {
        Label(format!(
            "{method} {}",
            self.normalize_path(path_without_query)
        ))
    }
}

/// Label a request with the default rules.
pub fn normalize(method: &str, path_without_query: &str) -> Label {
    PathNormalizer::shared().label(method, path_without_query)
}
