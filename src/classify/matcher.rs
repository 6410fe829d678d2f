//! Term matching strategies.
//!
//! Every keyword list (eligibility, blocklist, per-category intent) is wrapped
//! in a [`Matcher`] so the classifier never hard-codes how a term is found.

use regex::Regex;
use serde::Deserialize;

use crate::error::ConfigError;

/// A compiled, ordered list of terms.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// First term (in configured order) present in `lowered`.
    /// Callers pass text that is already lower-cased.
    fn first_match(&self, lowered: &str) -> Option<&str>;

    fn is_empty(&self) -> bool;

    fn contains_any(&self, lowered: &str) -> bool {
        self.first_match(lowered).is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Raw substring containment ("alp" also hits "alpha").
    #[default]
    Substring,
    /// Term must sit between word boundaries.
    WholeWord,
}

impl MatchStrategy {
    pub fn build(self, terms: &[String]) -> Result<Box<dyn Matcher>, ConfigError> {
        Ok(match self {
            MatchStrategy::Substring => Box::new(SubstringMatcher::new(terms)),
            MatchStrategy::WholeWord => Box::new(WholeWordMatcher::new(terms)?),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SubstringMatcher {
    terms: Vec<String>,
}

impl SubstringMatcher {
    pub fn new(terms: &[String]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_lowercase()).collect(),
        }
    }
}

impl Matcher for SubstringMatcher {
    fn first_match(&self, lowered: &str) -> Option<&str> {
        self.terms
            .iter()
            .find(|t| lowered.contains(t.as_str()))
            .map(String::as_str)
    }

    fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct WholeWordMatcher {
    terms: Vec<(String, Regex)>,
}

impl WholeWordMatcher {
    pub fn new(terms: &[String]) -> Result<Self, ConfigError> {
        let terms = terms
            .iter()
            .map(|t| {
                let t = t.to_lowercase();
                let re = Regex::new(&format!(r"\b{}\b", regex::escape(&t))).map_err(|e| {
                    ConfigError::Pattern {
                        term: t.clone(),
                        source: e,
                    }
                })?;
                Ok((t, re))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { terms })
    }
}

impl Matcher for WholeWordMatcher {
    fn first_match(&self, lowered: &str) -> Option<&str> {
        self.terms
            .iter()
            .find(|(_, re)| re.is_match(lowered))
            .map(|(t, _)| t.as_str())
    }

    fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
