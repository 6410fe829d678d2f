// src/freshness.rs
//! Publication-age gate. `now` is always supplied by the caller.

use chrono::{DateTime, Utc};

/// Accept when the entry is at most `max_age_days` whole days old.
///
/// A missing timestamp is rejected: freshness cannot be shown. Timestamps
/// slightly in the future (feed clock skew) count as age zero.
pub fn is_fresh(
    published_at: Option<DateTime<Utc>>,
    max_age_days: u32,
    now: DateTime<Utc>,
) -> bool {
    let Some(published) = published_at else {
        return false;
    };
    let age_days = now.signed_duration_since(published).num_days();
    age_days <= i64::from(max_age_days)
}
