// tests/config.rs
use std::{env, fs};

use this_day_in_history::config::{HistoryConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

const ENV_VARS: [&str; 4] = [
    "HISTORY_CONFIG_PATH",
    "HISTORY_BASE_URL",
    "HISTORY_TIMEOUT_SECS",
    "HISTORY_EXPOSE_METRICS",
];

fn clear_env() {
    for k in ENV_VARS {
        env::remove_var(k);
    }
}

#[test]
fn load_toml_and_json_paths() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("history.toml");
    fs::write(
        &p_toml,
        r#"
base_url = "http://upstream.local/events"
timeout_secs = 4
"#,
    )
    .unwrap();
    let c = HistoryConfig::load_from(&p_toml).unwrap();
    assert_eq!(c.base_url, "http://upstream.local/events");
    assert_eq!(c.timeout_secs, 4);
    assert!(!c.expose_metrics);

    let p_json = dir.path().join("history.json");
    fs::write(&p_json, r#"{"expose_metrics": true}"#).unwrap();
    let cj = HistoryConfig::load_from(&p_json).unwrap();
    assert_eq!(cj.base_url, DEFAULT_BASE_URL);
    assert_eq!(cj.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert!(cj.expose_metrics);
}

#[test]
fn broken_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("history.toml");
    fs::write(&p, "timeout_secs = \"ten\"").unwrap();
    assert!(HistoryConfig::load_from(&p).is_err());
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // Isolate CWD so the repo's own config/ is not picked up.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    clear_env();

    // 1) Nothing anywhere -> defaults
    let c = HistoryConfig::load_default().unwrap();
    assert_eq!(c, HistoryConfig::default());

    // 2) Fallback TOML in ./config/
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("history.toml"), "timeout_secs = 7").unwrap();
    assert_eq!(HistoryConfig::load_default().unwrap().timeout_secs, 7);

    // 3) Env path wins over the fallback
    let p_env = tmp.path().join("other.json");
    fs::write(&p_env, r#"{"timeout_secs": 2}"#).unwrap();
    env::set_var("HISTORY_CONFIG_PATH", p_env.display().to_string());
    assert_eq!(HistoryConfig::load_default().unwrap().timeout_secs, 2);

    // 4) Env path pointing nowhere is an error
    env::set_var("HISTORY_CONFIG_PATH", tmp.path().join("missing.toml"));
    assert!(HistoryConfig::load_default().is_err());

    clear_env();
    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn env_overrides_apply_last() {
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    clear_env();

    env::set_var("HISTORY_BASE_URL", "http://127.0.0.1:9/history");
    env::set_var("HISTORY_TIMEOUT_SECS", "0");
    env::set_var("HISTORY_EXPOSE_METRICS", "1");
    let c = HistoryConfig::load_default().unwrap();
    assert_eq!(c.base_url, "http://127.0.0.1:9/history");
    assert_eq!(c.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert!(c.expose_metrics);

    env::set_var("HISTORY_TIMEOUT_SECS", "soon");
    assert!(HistoryConfig::load_default().is_err());

    clear_env();
    env::set_current_dir(&old).unwrap();
}
