// src/trust.rs
//! Source trust policy.
//!
//! Aggregator sites republish official links verbatim, so a link that looks
//! official is not enough: the claimed source name is checked against the
//! deny-list first, and only then is the link checked against the allow-list.

use crate::config::ClassificationConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustReason {
    DeniedSource(String),
    AllowedDomain(String),
    UnlistedDomain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustDecision {
    pub accept: bool,
    pub reason: TrustReason,
}

#[derive(Debug, Clone, Copy)]
pub struct TrustPolicy<'a> {
    allowed_domains: &'a [String],
    denied_sources: &'a [String],
}

impl<'a> TrustPolicy<'a> {
    /// Both lists are expected lower-cased (see `ClassificationConfig::normalized`).
    pub fn new(allowed_domains: &'a [String], denied_sources: &'a [String]) -> Self {
        Self {
            allowed_domains,
            denied_sources,
        }
    }

    pub fn from_config(cfg: &'a ClassificationConfig) -> Self {
        Self::new(&cfg.allowed_domains, &cfg.denied_sources)
    }

    pub fn decide(&self, link: &str, source_name: &str) -> TrustDecision {
        let source = source_name.to_lowercase();
        if let Some(d) = self.denied_sources.iter().find(|d| source.contains(d.as_str())) {
            return TrustDecision {
                accept: false,
                reason: TrustReason::DeniedSource(d.clone()),
            };
        }

        let link = link.to_lowercase();
        match self
            .allowed_domains
            .iter()
            .find(|a| link.contains(a.as_str()))
        {
            Some(a) => TrustDecision {
                accept: true,
                reason: TrustReason::AllowedDomain(a.clone()),
            },
            None => TrustDecision {
                accept: false,
                reason: TrustReason::UnlistedDomain,
            },
        }
    }

    pub fn is_trusted(&self, link: &str, source_name: &str) -> bool {
        self.decide(link, source_name).accept
    }
}
