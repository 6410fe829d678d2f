// tests/config_load.rs
use govjob_feed::classify::matcher::MatchStrategy;
use govjob_feed::config::{load_default, load_from, ENV_CONFIG_PATH, ENV_MAX_AGE_DAYS};
use govjob_feed::error::ConfigError;
use govjob_feed::ClassificationConfig;
use std::{env, fs};

#[test]
fn toml_file_is_normalized_and_validated() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("classification.toml");
    fs::write(
        &p,
        r#"
match_strategy = "whole_word"
eligibility_terms = [" Clerk ", "", "ALP", "clerk"]
blocklist_terms = ["Result"]
allowed_domains = [".GOV.IN"]
denied_sources = ["Adda247"]
max_age_days = 14

[categories.upcoming]
search_window_days = 10
query_terms = ["calendar"]
"#,
    )
    .unwrap();

    let cfg = load_from(&p).unwrap();
    assert_eq!(cfg.match_strategy, MatchStrategy::WholeWord);
    assert_eq!(cfg.eligibility_terms, vec!["clerk", "alp"]);
    assert_eq!(cfg.blocklist_terms, vec!["result"]);
    assert_eq!(cfg.allowed_domains, vec![".gov.in"]);
    assert_eq!(cfg.denied_sources, vec!["adda247"]);
    assert_eq!(cfg.max_age_days, 14);
    assert_eq!(cfg.categories.upcoming.search_window_days, 10);
    assert_eq!(cfg.categories.active.search_window_days, 2);
}

#[test]
fn json_file_with_empty_eligibility_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("classification.json");
    fs::write(&p, r#"{ "eligibility_terms": [] }"#).unwrap();
    assert!(matches!(load_from(&p), Err(ConfigError::EmptyEligibility)));
}

#[test]
fn unparsable_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("classification.toml");
    fs::write(&p, "eligibility_terms = [unterminated").unwrap();
    assert!(matches!(load_from(&p), Err(ConfigError::Toml(_))));
    assert!(matches!(
        load_from(&dir.path().join("missing.toml")),
        Err(ConfigError::Io { .. })
    ));
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks_then_seed() {
    // Isolate CWD so the repo's own config/ is not picked up.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_MAX_AGE_DAYS);

    // 1) Nothing on disk → seed
    let seed = load_default().unwrap();
    assert_eq!(seed, ClassificationConfig::default_seed().normalized());

    // 2) config/classification.toml fallback
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(
        cfg_dir.join("classification.toml"),
        r#"eligibility_terms = ["constable"]"#,
    )
    .unwrap();
    assert_eq!(load_default().unwrap().eligibility_terms, vec!["constable"]);

    // 3) Env path wins
    let p_env = tmp.path().join("override.json");
    fs::write(&p_env, r#"{ "eligibility_terms": ["group d"] }"#).unwrap();
    env::set_var(ENV_CONFIG_PATH, p_env.display().to_string());
    assert_eq!(load_default().unwrap().eligibility_terms, vec!["group d"]);

    // 4) Max-age override, and its validation
    env::set_var(ENV_MAX_AGE_DAYS, "9");
    assert_eq!(load_default().unwrap().max_age_days, 9);
    env::set_var(ENV_MAX_AGE_DAYS, "0");
    assert!(matches!(
        load_default(),
        Err(ConfigError::InvalidWindow { .. })
    ));
    env::remove_var(ENV_MAX_AGE_DAYS);

    // 5) Env path pointing nowhere is fatal
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml").display().to_string());
    assert!(matches!(
        load_default(),
        Err(ConfigError::MissingPath { .. })
    ));
    env::remove_var(ENV_CONFIG_PATH);

    env::set_current_dir(&old).unwrap();
}
