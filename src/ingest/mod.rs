// src/ingest/mod.rs
pub mod providers;
pub mod query;
pub mod types;

use crate::ingest::types::{FeedQuery, FeedSource, RawEntry};
use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration so series show up with descriptions.
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_entries_total", "Entries parsed from feeds.");
        describe_counter!(
            "ingest_skipped_total",
            "Feed items dropped for missing title or link."
        );
        describe_counter!(
            "ingest_provider_errors_total",
            "Feed fetch/parse errors recovered as empty results."
        );
        describe_histogram!("ingest_parse_ms", "Feed parse time in milliseconds.");
        describe_counter!("pipeline_entries_total", "Entries seen by the pipeline.");
        describe_counter!(
            "pipeline_rejected_total",
            "Entries rejected, labelled by gate."
        );
        describe_counter!(
            "pipeline_dedup_total",
            "Entries dropped as same-link duplicates."
        );
        describe_counter!("pipeline_kept_total", "Postings produced.");
    });
}

/// Normalize a feed title: decode entities, strip tags, collapse whitespace.
pub fn normalize_title(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    out = out
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    re_ws.replace_all(&out, " ").trim().to_string()
}

/// Fetch from one source, turning any failure into an empty list.
/// A single unreachable source must never abort the run.
pub async fn fetch_or_empty(source: &dyn FeedSource, query: &FeedQuery) -> Vec<RawEntry> {
    ensure_metrics_described();
    match source.fetch(query).await {
        Ok(entries) => {
            tracing::debug!(
                source = source.name(),
                category = %query.category,
                entries = entries.len(),
                "feed fetched"
            );
            entries
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                source = source.name(),
                category = %query.category,
                "feed fetch failed; continuing without it"
            );
            counter!("ingest_provider_errors_total").increment(1);
            Vec::new()
        }
    }
}
