//! Ignore rules applied to directory entry base names during discovery

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single ignore rule.
///
/// In configuration files a rule is a plain string. A string wrapped in
/// slashes (`"/^\\.htaccess/"`) is a regular expression searched anywhere in
/// the base name; any other string must match the base name exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IgnoreRule {
    Exact(String),
    Pattern(Regex),
}

impl IgnoreRule {
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    /// Compile a regular expression rule.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|e| Error::InvalidIgnorePattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// Parse the textual form used in configuration files.
    pub fn parse(rule: &str) -> Result<Self> {
        match rule
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
        {
            Some(pattern) if !pattern.is_empty() => Self::pattern(pattern),
            _ => Ok(Self::exact(rule)),
        }
    }

    /// Whether an entry with this base name is ignored.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => exact == name,
            Self::Pattern(regex) => regex.is_match(name),
        }
    }
}

impl PartialEq for IgnoreRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for IgnoreRule {}

impl TryFrom<String> for IgnoreRule {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<IgnoreRule> for String {
    fn from(rule: IgnoreRule) -> Self {
        rule.to_string()
    }
}

impl std::fmt::Display for IgnoreRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(name) => write!(f, "{}", name),
            Self::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

/// True if any rule matches the base name.
pub fn is_ignored(rules: &[IgnoreRule], name: &str) -> bool {
    rules.iter().any(|rule| rule.matches(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_wrapped_rule_is_a_pattern() {
        let rule = IgnoreRule::parse("/^\\.htaccess/").unwrap();
        assert!(matches!(rule, IgnoreRule::Pattern(_)));
        assert!(rule.matches(".htaccess"));
        assert!(rule.matches(".htaccess.bak"));
        assert!(!rule.matches("x.htaccess"));
    }

    #[test]
    fn plain_rule_matches_exactly() {
        let rule = IgnoreRule::parse(".git").unwrap();
        assert!(rule.matches(".git"));
        assert!(!rule.matches(".github"));
        assert!(!rule.matches("a.git"));
    }

    #[test]
    fn lone_slashes_are_exact_names() {
        assert_eq!(IgnoreRule::parse("/").unwrap(), IgnoreRule::exact("/"));
        assert_eq!(IgnoreRule::parse("//").unwrap(), IgnoreRule::exact("//"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = IgnoreRule::parse("/([/").unwrap_err();
        assert!(matches!(err, Error::InvalidIgnorePattern { .. }));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for text in ["CVS", "/^\\.htaccess/", "/\\.tmp$/"] {
            let rule = IgnoreRule::parse(text).unwrap();
            assert_eq!(rule.to_string(), text);
        }
    }
}
