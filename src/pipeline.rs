// src/pipeline.rs
//! Per-entry gate conjunction and category bucketing.
//!
//! Gates run in a fixed order and short-circuit on the first rejection:
//! classifier (keywords + category intent) → trust → freshness.
//! Surviving entries become [`Posting`]s tagged with the category of the
//! query that produced them, deduplicated by link within that category.

use chrono::{DateTime, FixedOffset, Utc};
use metrics::counter;
use std::collections::HashSet;

use crate::classify::{Eligibility, TextClassifier};
use crate::config::{default_display_offset, ClassificationConfig};
use crate::error::ConfigError;
use crate::freshness::is_fresh;
use crate::ingest::query::build_query;
use crate::ingest::types::{FeedSource, RawEntry};
use crate::ingest::{ensure_metrics_described, fetch_or_empty};
use crate::posting::{format_published, Category, JobBoard, Posting};
use crate::trust::{TrustPolicy, TrustReason};

/// Source label used when a feed item does not name its publisher.
pub const DEFAULT_SOURCE_NAME: &str = "Official Govt Site";

/// Why an entry did not become a posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Ineligible(Eligibility),
    MissingIntent,
    Untrusted(TrustReason),
    Stale,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub seen: usize,
    pub rejected_classifier: usize,
    pub rejected_trust: usize,
    pub rejected_freshness: usize,
    pub duplicates: usize,
    pub kept: usize,
}

impl RunStats {
    fn record(&mut self, r: &Rejection) {
        match r {
            Rejection::Ineligible(_) | Rejection::MissingIntent => self.rejected_classifier += 1,
            Rejection::Untrusted(_) => self.rejected_trust += 1,
            Rejection::Stale => self.rejected_freshness += 1,
        }
    }
}

/// Orchestrator for one run. Borrows the config read-only, so one instance can
/// serve both categories concurrently.
#[derive(Debug)]
pub struct Pipeline<'a> {
    config: &'a ClassificationConfig,
    classifier: TextClassifier,
    trust: TrustPolicy<'a>,
    display_offset: FixedOffset,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a ClassificationConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config,
            classifier: TextClassifier::from_config(config)?,
            trust: TrustPolicy::from_config(config),
            display_offset: default_display_offset(),
        })
    }

    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = offset;
        self
    }

    /// Swap in a classifier built with a different matching strategy.
    pub fn with_classifier(mut self, classifier: TextClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &ClassificationConfig {
        self.config
    }

    pub fn display_offset(&self) -> FixedOffset {
        self.display_offset
    }

    /// Decide a single entry.
    pub fn evaluate(
        &self,
        entry: &RawEntry,
        category: Category,
        now: DateTime<Utc>,
    ) -> Result<Posting, Rejection> {
        let c = self.classifier.classify(&entry.title);
        if !c.eligible {
            return Err(Rejection::Ineligible(c.eligibility));
        }
        if !self.classifier.has_intent(&entry.title, category) {
            return Err(Rejection::MissingIntent);
        }

        let source = entry.source_name.as_deref().unwrap_or_default();
        let decision = self.trust.decide(&entry.link, source);
        if !decision.accept {
            return Err(Rejection::Untrusted(decision.reason));
        }

        if !is_fresh(entry.published_at, self.config.max_age_days, now) {
            return Err(Rejection::Stale);
        }

        Ok(Posting {
            title: entry.title.clone(),
            link: entry.link.clone(),
            published_display: entry
                .published_at
                .map(|p| format_published(p, self.display_offset))
                .unwrap_or_default(),
            closing_date: c.closing_date,
            source_name: entry
                .source_name
                .clone()
                .unwrap_or_else(|| DEFAULT_SOURCE_NAME.to_string()),
            region: c.region,
            category,
        })
    }

    pub fn run(
        &self,
        entries: &[RawEntry],
        category: Category,
        now: DateTime<Utc>,
    ) -> Vec<Posting> {
        self.run_with_stats(entries, category, now).0
    }

    /// Classify `entries` in input order. Accepted postings sharing a link keep
    /// only the first one.
    pub fn run_with_stats(
        &self,
        entries: &[RawEntry],
        category: Category,
        now: DateTime<Utc>,
    ) -> (Vec<Posting>, RunStats) {
        ensure_metrics_described();

        let mut stats = RunStats {
            seen: entries.len(),
            ..RunStats::default()
        };
        let mut seen_links: HashSet<String> = HashSet::new();
        let mut out = Vec::new();

        for entry in entries {
            match self.evaluate(entry, category, now) {
                Ok(p) => {
                    if !seen_links.insert(p.link.trim().to_string()) {
                        stats.duplicates += 1;
                        continue;
                    }
                    out.push(p);
                }
                Err(r) => {
                    tracing::debug!(
                        target: "pipeline",
                        %category,
                        link = %entry.link,
                        reason = ?r,
                        "entry rejected"
                    );
                    stats.record(&r);
                }
            }
        }
        stats.kept = out.len();

        counter!("pipeline_entries_total").increment(stats.seen as u64);
        counter!("pipeline_rejected_total", "gate" => "classifier")
            .increment(stats.rejected_classifier as u64);
        counter!("pipeline_rejected_total", "gate" => "trust")
            .increment(stats.rejected_trust as u64);
        counter!("pipeline_rejected_total", "gate" => "freshness")
            .increment(stats.rejected_freshness as u64);
        counter!("pipeline_dedup_total").increment(stats.duplicates as u64);
        counter!("pipeline_kept_total").increment(stats.kept as u64);

        tracing::info!(
            target: "pipeline",
            %category,
            seen = stats.seen,
            kept = stats.kept,
            classifier = stats.rejected_classifier,
            trust = stats.rejected_trust,
            freshness = stats.rejected_freshness,
            duplicates = stats.duplicates,
            "category classified"
        );

        (out, stats)
    }
}

/// Combine category outputs. The same notice may appear in both lists.
pub fn merge(
    active: Vec<Posting>,
    upcoming: Vec<Posting>,
    generated_at: DateTime<Utc>,
) -> JobBoard {
    JobBoard {
        active,
        upcoming,
        generated_at,
    }
}

/// Query every source for `category` and classify the combined entries.
/// Failing sources contribute nothing.
pub async fn collect_category(
    sources: &[Box<dyn FeedSource>],
    pipeline: &Pipeline<'_>,
    category: Category,
    now: DateTime<Utc>,
) -> Vec<Posting> {
    let query = build_query(pipeline.config(), category);
    let mut entries = Vec::new();
    for s in sources {
        entries.extend(fetch_or_empty(s.as_ref(), &query).await);
    }
    pipeline.run(&entries, category, now)
}

/// Both categories, fetched concurrently, merged into one board stamped `now`.
pub async fn collect_board(
    sources: &[Box<dyn FeedSource>],
    pipeline: &Pipeline<'_>,
    now: DateTime<Utc>,
) -> JobBoard {
    let (active, upcoming) = tokio::join!(
        collect_category(sources, pipeline, Category::Active, now),
        collect_category(sources, pipeline, Category::Upcoming, now),
    );
    merge(active, upcoming, now)
}
