// src/config/classification.rs
use serde::Deserialize;

use crate::classify::matcher::MatchStrategy;
use crate::error::ConfigError;
use crate::posting::Category;

fn default_max_age_days() -> u32 {
    30
}

/// Everything that steers classification for one run. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassificationConfig {
    #[serde(default)]
    pub match_strategy: MatchStrategy,
    /// At least one must appear in a title.
    pub eligibility_terms: Vec<String>,
    /// Any hit rejects the title outright.
    #[serde(default)]
    pub blocklist_terms: Vec<String>,
    /// Link fragments considered official (e.g. ".gov.in").
    #[serde(default)]
    pub allowed_domains: Vec<String>,
    /// Source-name fragments that are never trusted; overrides `allowed_domains`.
    #[serde(default)]
    pub denied_sources: Vec<String>,
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
    #[serde(default)]
    pub categories: CategoriesConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoriesConfig {
    #[serde(default = "CategoryConfig::active_seed")]
    pub active: CategoryConfig,
    #[serde(default = "CategoryConfig::upcoming_seed")]
    pub upcoming: CategoryConfig,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            active: CategoryConfig::active_seed(),
            upcoming: CategoryConfig::upcoming_seed(),
        }
    }
}

/// Per-category query and admission settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryConfig {
    /// Feed search window (`when:<N>d`).
    pub search_window_days: u32,
    /// Leading query terms, e.g. `recruitment` or `calendar`.
    #[serde(default)]
    pub query_terms: Vec<String>,
    /// When non-empty, a title must contain one of these.
    #[serde(default)]
    pub intent_terms: Vec<String>,
    /// `site:` restrictions added to the query.
    #[serde(default)]
    pub sites: Vec<String>,
}

impl CategoryConfig {
    pub(crate) fn active_seed() -> Self {
        Self {
            search_window_days: 2,
            query_terms: strings(&["recruitment"]),
            intent_terms: strings(&["recruitment", "vacancy", "apply"]),
            sites: strings(&["gov.in", "nic.in", "indianrailways.gov.in", "wbp.gov.in"]),
        }
    }

    pub(crate) fn upcoming_seed() -> Self {
        Self {
            search_window_days: 7,
            query_terms: strings(&["calendar", "schedule", "short notice", "upcoming"]),
            intent_terms: Vec::new(),
            sites: strings(&["gov.in", "nic.in", "ssc.nic.in", "rrbcdg.gov.in"]),
        }
    }
}

impl ClassificationConfig {
    /// Built-in lists used when no config file is present.
    pub fn default_seed() -> Self {
        Self {
            match_strategy: MatchStrategy::Substring,
            eligibility_terms: strings(&[
                "12th pass",
                "higher secondary",
                "ssc chsl",
                "ssc mts",
                "ssc gd",
                "constable",
                "data entry",
                "clerk",
                "railway",
                "group d",
                "alp",
                "technician",
            ]),
            blocklist_terms: strings(&[
                "admit card",
                "result",
                "answer key",
                "cutoff",
                "syllabus",
                "graduate",
                "b.tech",
                "mba",
            ]),
            allowed_domains: strings(&[".gov.in", ".nic.in"]),
            denied_sources: strings(&[
                "adda247",
                "sarkari result",
                "sarkariresult",
                "freejobalert",
                "testbook",
                "jagran josh",
            ]),
            max_age_days: default_max_age_days(),
            categories: CategoriesConfig::default(),
        }
    }

    pub fn category(&self, category: Category) -> &CategoryConfig {
        match category {
            Category::Active => &self.categories.active,
            Category::Upcoming => &self.categories.upcoming,
        }
    }

    /// Trim, lower-case, drop empties and repeated entries. Order is kept:
    /// evaluation is first-match-wins.
    pub fn normalized(mut self) -> Self {
        self.eligibility_terms = clean_terms(self.eligibility_terms);
        self.blocklist_terms = clean_terms(self.blocklist_terms);
        self.allowed_domains = clean_terms(self.allowed_domains);
        self.denied_sources = clean_terms(self.denied_sources);
        for c in [&mut self.categories.active, &mut self.categories.upcoming] {
            c.query_terms = clean_terms(std::mem::take(&mut c.query_terms));
            c.intent_terms = clean_terms(std::mem::take(&mut c.intent_terms));
            c.sites = clean_terms(std::mem::take(&mut c.sites));
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.eligibility_terms.is_empty() {
            return Err(ConfigError::EmptyEligibility);
        }
        if self.max_age_days == 0 {
            return Err(ConfigError::InvalidWindow {
                name: "max_age_days",
                value: 0,
            });
        }
        for (name, c) in [
            ("categories.active.search_window_days", &self.categories.active),
            (
                "categories.upcoming.search_window_days",
                &self.categories.upcoming,
            ),
        ] {
            if c.search_window_days == 0 {
                return Err(ConfigError::InvalidWindow { name, value: 0 });
            }
        }
        // Surfaces whole-word pattern problems at startup instead of mid-run.
        for terms in [&self.eligibility_terms, &self.blocklist_terms] {
            self.match_strategy.build(terms)?;
        }
        if self.allowed_domains.is_empty() {
            tracing::warn!("allowed_domains is empty; every entry will fail the trust check");
        }
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn clean_terms(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_valid() {
        let cfg = ClassificationConfig::default_seed().normalized();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_age_days, 30);
        assert_eq!(cfg.category(Category::Active).search_window_days, 2);
        assert!(cfg.category(Category::Upcoming).intent_terms.is_empty());
    }

    #[test]
    fn normalization_keeps_order_and_drops_noise() {
        let out = clean_terms(strings(&[" Clerk ", "", "railway", "CLERK", "alp"]));
        assert_eq!(out, strings(&["clerk", "railway", "alp"]));
    }

    #[test]
    fn empty_eligibility_is_fatal() {
        let mut cfg = ClassificationConfig::default_seed();
        cfg.eligibility_terms = strings(&["  ", ""]);
        let cfg = cfg.normalized();
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyEligibility)));
    }

    #[test]
    fn zero_windows_are_fatal() {
        let mut cfg = ClassificationConfig::default_seed();
        cfg.max_age_days = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidWindow {
                name: "max_age_days",
                ..
            })
        ));

        let mut cfg = ClassificationConfig::default_seed();
        cfg.categories.upcoming.search_window_days = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn missing_sections_fall_back_to_seeds() {
        let cfg: ClassificationConfig =
            toml::from_str(r#"eligibility_terms = ["clerk"]"#).unwrap();
        assert_eq!(cfg.max_age_days, 30);
        assert_eq!(cfg.categories, CategoriesConfig::default());
        assert_eq!(cfg.match_strategy, MatchStrategy::Substring);
        assert!(cfg.blocklist_terms.is_empty());
    }
}
