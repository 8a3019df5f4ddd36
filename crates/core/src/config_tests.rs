// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;
use yare::parameterized;

#[test]
fn minimal_config_uses_defaults() {
    let config = WatchConfig::from_yaml("flag_dir: /flags\nmanifest_complete: /flags/done\n").unwrap();
    assert_eq!(config, WatchConfig::new("/flags", "/flags/done"));
    assert_eq!(config.misfire_grace(), Duration::from_secs(3600));
    assert_eq!(config.debounce(), Duration::from_secs(10));
    assert_eq!(config.max_concurrent_jobs, 10);
    assert_eq!(config.webhook_url, None);
}

#[test]
fn full_config() {
    let yaml = "\
flag_dir: /flags
manifest_complete: /archive
webhook_url: https://example.webhook.office.com/hook
misfire_grace_time_s: 60
debounce_s: 0
max_concurrent_jobs: 2
log_dir: /var/log/wd
";
    let config = WatchConfig::from_yaml(yaml).unwrap();
    assert_eq!(
        config.webhook_url.as_deref(),
        Some("https://example.webhook.office.com/hook")
    );
    assert_eq!(config.misfire_grace_time_s, 60);
    assert_eq!(config.debounce(), Duration::ZERO);
    assert_eq!(config.max_concurrent_jobs, 2);
    assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/wd")));
}

#[parameterized(
    no_workers = { "max_concurrent_jobs: 0", "max_concurrent_jobs" },
    bad_webhook = { "webhook_url: teams", "webhook_url" },
    same_dirs = { "manifest_complete: /flags", "manifest_complete" },
)]
fn invalid_values_are_rejected(line: &str, field: &str) {
    let yaml = format!("flag_dir: /flags\n{}\n", line);
    let yaml = if line.starts_with("manifest_complete") {
        yaml
    } else {
        format!("{}manifest_complete: /done\n", yaml)
    };
    match WatchConfig::from_yaml(&yaml) {
        Err(ConfigError::Invalid { field: f, .. }) => assert_eq!(f, field),
        other => panic!("expected invalid {}, got {:?}", field, other),
    }
}

#[test]
fn missing_required_key_is_parse_error() {
    assert!(matches!(
        WatchConfig::from_yaml("flag_dir: /flags\n"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn unknown_key_is_parse_error() {
    assert!(matches!(
        WatchConfig::from_yaml("flag_dir: /a\nmanifest_complete: /b\nflagdir: /c\n"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "flag_dir: /flags\nmanifest_complete: /done").unwrap();
    let config = WatchConfig::load(file.path()).unwrap();
    assert_eq!(config.flag_dir, PathBuf::from("/flags"));
}

#[test]
fn load_missing_file_names_path() {
    let err = WatchConfig::load(Path::new("/nonexistent/watch.yml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/watch.yml"));
}

#[test]
fn summary_uses_human_durations() {
    let summary = WatchConfig::new("/flags", "/done").summary();
    assert!(summary.contains("misfire_grace=1h"));
    assert!(summary.contains("debounce=10s"));
    assert!(summary.contains("webhook=none"));
}
