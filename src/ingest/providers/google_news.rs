// src/ingest/providers/google_news.rs
//! Google News RSS search provider.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use time::{format_description::well_known::Rfc2822, OffsetDateTime};

use crate::error::FetchError;
use crate::ingest::normalize_title;
use crate::ingest::types::{FeedQuery, FeedSource, RawEntry};

pub const GOOGLE_NEWS_SEARCH_URL: &str = "https://news.google.com/rss/search";
const GOOGLE_NEWS_HOST: &str = "news.google.com";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source: Option<ItemSource>,
}

/// `<source url="https://ssc.gov.in">ssc.gov.in</source>`
#[derive(Debug, Deserialize)]
struct ItemSource {
    #[serde(rename = "@url", default)]
    url: Option<String>,
    #[serde(rename = "$text", default)]
    name: Option<String>,
}

/// Search results link to `news.google.com/rss/articles/<id>` redirects, which
/// say nothing about the publisher. When the item names its publisher
/// (`<source url=..>`), link there instead and keep the article id as the
/// fragment so distinct articles from one publisher stay distinct.
fn publisher_link(link: &str, source_url: Option<&str>) -> String {
    let Ok(article) = Url::parse(link) else {
        return link.to_string();
    };
    if article.host_str() != Some(GOOGLE_NEWS_HOST) {
        return link.to_string();
    }
    let Some(mut publisher) = source_url.and_then(|u| Url::parse(u.trim()).ok()) else {
        return link.to_string();
    };
    if !matches!(publisher.scheme(), "http" | "https") {
        return link.to_string();
    }
    let article_id = article
        .path_segments()
        .and_then(|mut segs| segs.next_back())
        .filter(|id| !id.is_empty());
    publisher.set_fragment(article_id);
    publisher.to_string()
}

fn parse_rfc2822(ts: &str) -> Option<DateTime<Utc>> {
    let odt = OffsetDateTime::parse(ts.trim(), &Rfc2822).ok()?;
    DateTime::<Utc>::from_timestamp(odt.unix_timestamp(), odt.nanosecond())
}

/// Parse an RSS document into raw entries. Items without a title or link are skipped.
pub fn parse_feed(xml: &str) -> Result<Vec<RawEntry>, FetchError> {
    let t0 = std::time::Instant::now();
    let rss: Rss = from_str(xml).map_err(|e| FetchError::Malformed(e.to_string()))?;

    let mut out = Vec::with_capacity(rss.channel.item.len());
    let mut skipped = 0u64;
    for it in rss.channel.item {
        let title = it.title.as_deref().map(normalize_title).unwrap_or_default();
        let link = it.link.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() || link.is_empty() {
            skipped += 1;
            continue;
        }
        let (source_url, source_name) = match it.source {
            Some(s) => (s.url, s.name),
            None => (None, None),
        };
        out.push(RawEntry {
            title,
            link: publisher_link(link, source_url.as_deref()),
            published_at: it.pub_date.as_deref().and_then(parse_rfc2822),
            source_name: source_name
                .map(|n| normalize_title(&n))
                .filter(|n| !n.is_empty()),
        });
    }

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("ingest_parse_ms").record(ms);
    counter!("ingest_entries_total").increment(out.len() as u64);
    counter!("ingest_skipped_total").increment(skipped);
    Ok(out)
}

/// Build the RSS search URL for `query` (India edition, English).
pub fn search_url(base: &str, query: &str) -> Result<Url, FetchError> {
    Url::parse_with_params(
        base,
        &[
            ("q", query),
            ("hl", "en-IN"),
            ("gl", "IN"),
            ("ceid", "IN:en"),
        ],
    )
    .map_err(|e| FetchError::Url(e.to_string()))
}

enum Mode {
    /// Static document returned for every query.
    Fixture(String),
    Http {
        client: Client,
        base_url: String,
        timeout: Duration,
        max_retries: u8,
    },
}

pub struct GoogleNewsRssProvider {
    mode: Mode,
}

impl GoogleNewsRssProvider {
    pub fn new() -> Self {
        Self::with_base_url(GOOGLE_NEWS_SEARCH_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            mode: Mode::Http {
                client: Client::new(),
                base_url: base_url.to_string(),
                timeout: Duration::from_secs(15),
                max_retries: 3,
            },
        }
    }

    pub fn from_fixture(xml: &str) -> Self {
        Self {
            mode: Mode::Fixture(xml.to_string()),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        if let Mode::Http { timeout, .. } = &mut self.mode {
            *timeout = Duration::from_secs(secs);
        }
        self
    }

    pub fn with_retries(mut self, retries: u8) -> Self {
        if let Mode::Http { max_retries, .. } = &mut self.mode {
            *max_retries = retries.max(1);
        }
        self
    }

    async fn get_with_retries(
        client: &Client,
        url: Url,
        timeout: Duration,
        max_retries: u8,
    ) -> Result<String, FetchError> {
        let mut attempt: u8 = 0;
        loop {
            attempt += 1;
            let res = client.get(url.clone()).timeout(timeout).send().await;
            let err = match res {
                Ok(rsp) if rsp.status().is_success() => return Ok(rsp.text().await?),
                // 4xx will not change on retry
                Ok(rsp) if rsp.status().is_client_error() => {
                    return Err(FetchError::Status(rsp.status().as_u16()))
                }
                Ok(rsp) => FetchError::Status(rsp.status().as_u16()),
                Err(e) => FetchError::Http(e),
            };
            if attempt >= max_retries {
                return Err(err);
            }
            tracing::debug!(error = %err, attempt, "feed request failed; retrying");
            tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1))).await;
        }
    }
}

impl Default for GoogleNewsRssProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedSource for GoogleNewsRssProvider {
    async fn fetch(&self, query: &FeedQuery) -> Result<Vec<RawEntry>, FetchError> {
        match &self.mode {
            Mode::Fixture(xml) => parse_feed(xml),
            Mode::Http {
                client,
                base_url,
                timeout,
                max_retries,
            } => {
                let url = search_url(base_url, &query.query)?;
                let body = Self::get_with_retries(client, url, *timeout, *max_retries).await?;
                parse_feed(&body)
            }
        }
    }

    fn name(&self) -> &str {
        "google-news"
    }
}
