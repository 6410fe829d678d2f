// src/posting.rs
//! Output value types: [`Category`], [`Posting`] and the persisted [`JobBoard`].

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gazetteer::Region;

/// Closing date placeholder when the title carries no recognisable date.
pub const UNKNOWN_CLOSING_DATE: &str = "unknown — consult notice";

/// Display format for a posting's publish date, e.g. `15 Oct 2026`.
pub const PUBLISHED_DISPLAY_FORMAT: &str = "%d %b %Y";
/// Display format for the board timestamp, e.g. `17 Oct 2026, 03:04 PM`.
pub const LAST_UPDATED_FORMAT: &str = "%d %b %Y, %I:%M %p";

/// Which query produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Active,
    Upcoming,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Active, Category::Upcoming];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Active => "active",
            Category::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One accepted announcement. Field names on the wire are the durable contract
/// consumed by the listing front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub title: String,
    pub link: String,
    #[serde(rename = "date")]
    pub published_display: String,
    #[serde(rename = "end_date")]
    pub closing_date: String,
    #[serde(rename = "source")]
    pub source_name: String,
    #[serde(flatten)]
    pub region: Region,
    #[serde(rename = "type")]
    pub category: Category,
}

/// Final result of a run, as handed to a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct JobBoard {
    pub active: Vec<Posting>,
    pub upcoming: Vec<Posting>,
    pub generated_at: DateTime<Utc>,
}

/// Serialized shape of a [`JobBoard`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobBoardDocument {
    pub active: Vec<Posting>,
    pub upcoming: Vec<Posting>,
    pub last_updated: String,
}

impl JobBoard {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.upcoming.is_empty()
    }

    pub fn postings(&self, category: Category) -> &[Posting] {
        match category {
            Category::Active => &self.active,
            Category::Upcoming => &self.upcoming,
        }
    }

    /// Render into the persisted document, formatting `generated_at` in `tz`.
    pub fn to_document(&self, tz: FixedOffset) -> JobBoardDocument {
        JobBoardDocument {
            active: self.active.clone(),
            upcoming: self.upcoming.clone(),
            last_updated: format_last_updated(self.generated_at, tz),
        }
    }
}

pub fn format_published(at: DateTime<Utc>, tz: FixedOffset) -> String {
    at.with_timezone(&tz)
        .format(PUBLISHED_DISPLAY_FORMAT)
        .to_string()
}

pub fn format_last_updated(at: DateTime<Utc>, tz: FixedOffset) -> String {
    at.with_timezone(&tz).format(LAST_UPDATED_FORMAT).to_string()
}
