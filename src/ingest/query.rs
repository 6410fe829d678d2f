// src/ingest/query.rs
//! Search-query construction for feed providers.
//!
//! Shape: `<lead> AND (<elig1> OR <elig2>) AND (site:a OR site:b) when:<N>d`
//! where `<lead>` is a bare term when only one is configured, otherwise a
//! parenthesised OR of quoted terms.

use crate::config::ClassificationConfig;
use crate::ingest::types::FeedQuery;
use crate::posting::Category;

pub fn build_query(cfg: &ClassificationConfig, category: Category) -> FeedQuery {
    let c = cfg.category(category);
    FeedQuery {
        category,
        query: render_query(
            &c.query_terms,
            &cfg.eligibility_terms,
            &c.sites,
            c.search_window_days,
        ),
    }
}

pub fn render_query(
    lead_terms: &[String],
    eligibility_terms: &[String],
    sites: &[String],
    window_days: u32,
) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);

    match lead_terms {
        [] => {}
        [one] => parts.push(one.clone()),
        many => parts.push(format!(
            "({})",
            many.iter()
                .map(|t| format!("\"{t}\""))
                .collect::<Vec<_>>()
                .join(" OR ")
        )),
    }
    if !eligibility_terms.is_empty() {
        parts.push(format!("({})", eligibility_terms.join(" OR ")));
    }
    if !sites.is_empty() {
        parts.push(format!(
            "({})",
            sites
                .iter()
                .map(|s| format!("site:{s}"))
                .collect::<Vec<_>>()
                .join(" OR ")
        ));
    }

    format!("{} when:{}d", parts.join(" AND "), window_days)
}
