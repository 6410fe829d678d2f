// tests/pipeline_scenarios.rs
use chrono::{DateTime, Duration, TimeZone, Utc};
use govjob_feed::classify::TextClassifier;
use govjob_feed::config::ClassificationConfig;
use govjob_feed::pipeline::Pipeline;
use govjob_feed::posting::{Category, UNKNOWN_CLOSING_DATE};
use govjob_feed::trust::TrustPolicy;
use govjob_feed::{resolve_region, RawEntry, Region};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 6, 30, 0).unwrap()
}

fn scenario_config() -> ClassificationConfig {
    let mut c = ClassificationConfig::default_seed();
    c.eligibility_terms = vec!["chsl".into()];
    c.allowed_domains = vec![".gov.in".into()];
    c.denied_sources = vec!["adda247".into()];
    c.max_age_days = 30;
    c.normalized()
}

fn chsl_entry(source: &str, published_at: Option<DateTime<Utc>>) -> RawEntry {
    RawEntry {
        title: "SSC CHSL Recruitment 2026 last date: 25/03".into(),
        link: "https://ssc.gov.in/x".into(),
        published_at,
        source_name: Some(source.into()),
    }
}

#[test]
fn official_chsl_notice_becomes_one_posting() {
    let cfg = scenario_config();
    let p = Pipeline::new(&cfg).unwrap();
    let entries = vec![chsl_entry("ssc.gov.in", Some(now() - Duration::days(2)))];

    for category in Category::ALL {
        let out = p.run(&entries, category, now());
        assert_eq!(out.len(), 1, "category {category}");
        let posting = &out[0];
        assert_eq!(posting.closing_date, "25/03");
        assert_eq!(posting.region, Region::central());
        assert_eq!(posting.category, category);
        assert_eq!(posting.source_name, "ssc.gov.in");
        assert_eq!(posting.published_display, "15 Oct 2026");
    }
}

#[test]
fn deny_listed_aggregator_yields_nothing() {
    let cfg = scenario_config();
    let p = Pipeline::new(&cfg).unwrap();
    let entries = vec![chsl_entry("adda247", Some(now() - Duration::days(2)))];
    assert!(p.run(&entries, Category::Active, now()).is_empty());
}

#[test]
fn undated_entry_yields_nothing() {
    let cfg = scenario_config();
    let p = Pipeline::new(&cfg).unwrap();
    let entries = vec![chsl_entry("ssc.gov.in", None)];
    assert!(p.run(&entries, Category::Upcoming, now()).is_empty());
}

#[test]
fn same_link_twice_keeps_first_seen_fields() {
    let cfg = scenario_config();
    let p = Pipeline::new(&cfg).unwrap();
    let first = chsl_entry("ssc.gov.in", Some(now() - Duration::days(2)));
    let mut second = first.clone();
    second.title = "SSC CHSL Recruitment 2026 (revised) last date: 30/03".into();
    second.published_at = Some(now() - Duration::days(1));

    let out = p.run(&[first.clone(), second], Category::Active, now());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].title, first.title);
    assert_eq!(out[0].closing_date, "25/03");
}

#[test]
fn stale_first_copy_does_not_hide_fresh_second() {
    let cfg = scenario_config();
    let p = Pipeline::new(&cfg).unwrap();
    let stale = chsl_entry("ssc.gov.in", Some(now() - Duration::days(45)));
    let mut fresh = stale.clone();
    fresh.title = "SSC CHSL Recruitment 2026 (reopened) last date: 30/03".into();
    fresh.published_at = Some(now() - Duration::days(1));

    let (out, stats) = p.run_with_stats(&[stale, fresh.clone()], Category::Active, now());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].title, fresh.title);
    assert_eq!(out[0].closing_date, "30/03");
    assert_eq!(out[0].published_display, "16 Oct 2026");
    assert_eq!(stats.rejected_freshness, 1);
    assert_eq!(stats.duplicates, 0);
}

#[test]
fn output_preserves_input_order() {
    let cfg = scenario_config();
    let p = Pipeline::new(&cfg).unwrap();
    let mk = |n: i64| RawEntry {
        title: format!("CHSL notice {n}"),
        link: format!("https://ssc.gov.in/{n}"),
        published_at: Some(now() - Duration::days(n)),
        source_name: None,
    };
    let entries: Vec<RawEntry> = [3, 1, 2].into_iter().map(mk).collect();
    let titles: Vec<String> = p
        .run(&entries, Category::Upcoming, now())
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, ["CHSL notice 3", "CHSL notice 1", "CHSL notice 2"]);
}

#[test]
fn blocklist_always_wins_over_eligibility() {
    let cfg = ClassificationConfig::default_seed().normalized();
    let c = TextClassifier::from_config(&cfg).unwrap();
    for blocked in &cfg.blocklist_terms {
        for eligible in &cfg.eligibility_terms {
            let title = format!("{} {} 2026", eligible.to_uppercase(), blocked);
            assert!(!c.classify(&title).eligible, "{title}");
        }
    }
}

#[test]
fn eligibility_without_blocklist_admits() {
    let cfg = ClassificationConfig::default_seed().normalized();
    let c = TextClassifier::from_config(&cfg).unwrap();
    for eligible in &cfg.eligibility_terms {
        let title = format!("Notification for {eligible} posts");
        let out = c.classify(&title);
        assert!(out.eligible, "{title}");
        assert_eq!(out.closing_date, UNKNOWN_CLOSING_DATE);
    }
}

#[test]
fn district_precedes_state_everywhere() {
    assert_eq!(
        resolve_region("Rajasthan board exam centre moved to Patna"),
        Region::new("Bihar", "Patna")
    );
    assert_eq!(
        resolve_region("Rajasthan board exam"),
        Region::state_wide("Rajasthan")
    );
}

#[test]
fn trust_denies_even_official_links() {
    let cfg = scenario_config();
    let t = TrustPolicy::from_config(&cfg);
    assert!(!t.is_trusted("https://ssc.gov.in/x", "ADDA247 Exams"));
    assert!(t.is_trusted("https://ssc.gov.in/x", "Staff Selection Commission"));
}
