// src/classify/mod.rs
//! Title classification: eligibility, junk rejection, region and closing date.

pub mod matcher;

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::config::ClassificationConfig;
use crate::error::ConfigError;
use crate::gazetteer::{resolve_region, Region};
use crate::posting::{Category, UNKNOWN_CLOSING_DATE};
use matcher::Matcher;

/// Why a title was or was not admitted by the keyword lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Admitted { term: String },
    Blocked { term: String },
    NoEligibleTerm,
}

impl Eligibility {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Eligibility::Admitted { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub eligible: bool,
    pub eligibility: Eligibility,
    pub region: Region,
    pub closing_date: String,
}

/// Compiled keyword lists for one run.
#[derive(Debug)]
pub struct TextClassifier {
    eligibility: Box<dyn Matcher>,
    blocklist: Box<dyn Matcher>,
    active_intent: Box<dyn Matcher>,
    upcoming_intent: Box<dyn Matcher>,
}

impl TextClassifier {
    pub fn from_config(cfg: &ClassificationConfig) -> Result<Self, ConfigError> {
        let s = cfg.match_strategy;
        Ok(Self {
            eligibility: s.build(&cfg.eligibility_terms)?,
            blocklist: s.build(&cfg.blocklist_terms)?,
            active_intent: s.build(&cfg.categories.active.intent_terms)?,
            upcoming_intent: s.build(&cfg.categories.upcoming.intent_terms)?,
        })
    }

    pub fn new(eligibility: Box<dyn Matcher>, blocklist: Box<dyn Matcher>) -> Self {
        let none = || -> Box<dyn Matcher> { Box::new(matcher::SubstringMatcher::new(&[])) };
        Self {
            eligibility,
            blocklist,
            active_intent: none(),
            upcoming_intent: none(),
        }
    }

    /// Blocklist first: a blocked term wins even if an eligibility term is present.
    pub fn eligibility(&self, title: &str) -> Eligibility {
        let lowered = title.to_lowercase();
        if let Some(t) = self.blocklist.first_match(&lowered) {
            return Eligibility::Blocked { term: t.to_string() };
        }
        match self.eligibility.first_match(&lowered) {
            Some(t) => Eligibility::Admitted { term: t.to_string() },
            None => Eligibility::NoEligibleTerm,
        }
    }

    pub fn classify(&self, title: &str) -> Classification {
        let eligibility = self.eligibility(title);
        Classification {
            eligible: eligibility.is_admitted(),
            eligibility,
            region: resolve_region(title),
            closing_date: extract_closing_date(title),
        }
    }

    /// Category-specific intent check. An empty intent list admits everything.
    pub fn has_intent(&self, title: &str, category: Category) -> bool {
        let m = match category {
            Category::Active => &self.active_intent,
            Category::Upcoming => &self.upcoming_intent,
        };
        m.is_empty() || m.contains_any(&title.to_lowercase())
    }
}

fn closing_date_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| {
        // ASCII digits only; `\d` would also take Devanagari and other scripts.
        Regex::new(r"\b[0-9]{1,2}[/-][0-9]{1,2}(?:[/-](?:[0-9]{4}|[0-9]{2}))?\b")
            .expect("closing date regex")
    })
}

/// First `DD/MM/YYYY`, `DD-MM-YYYY`, `DD/MM/YY` or bare `DD/MM` in `title`.
/// Purely syntactic; `31/02` is returned as-is.
pub fn extract_closing_date(title: &str) -> String {
    closing_date_re()
        .find(title)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_CLOSING_DATE.to_string())
}
