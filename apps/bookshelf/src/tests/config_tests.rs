use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_settings_file(name: &str, contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("bookshelf_config_test_{name}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(SETTINGS_FILE);
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn missing_file_yields_defaults() {
    let path = env::temp_dir().join("bookshelf_config_test_absent").join(SETTINGS_FILE);
    let settings = load_settings_from(&path, no_env).expect("settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.page_size.get(), 10);
    assert_eq!(settings.search_debounce, Duration::from_millis(500));
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        "file",
        r#"
api_base_url = "https://books.example.test/api/books"
page_size = 25
search_debounce_ms = 250
"#,
    );
    let settings = load_settings_from(&path, no_env).expect("settings");
    assert_eq!(settings.api_base_url, "https://books.example.test/api/books");
    assert_eq!(settings.page_size.get(), 25);
    assert_eq!(settings.search_debounce, Duration::from_millis(250));
    assert_eq!(settings.log_filter, "info");

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file_and_ignores_bad_numbers() {
    let path = temp_settings_file("env", "page_size = 25\n");
    let vars: HashMap<&str, &str> = HashMap::from([
        ("BOOKSHELF_API_BASE_URL", "http://legacy.test/books"),
        ("APP__API_BASE_URL", "http://app.test/books"),
        ("APP__PAGE_SIZE", "0"),
        ("APP__SEARCH_DEBOUNCE_MS", "soon"),
        ("APP__LOG_FILTER", "client_core=debug"),
    ]);
    let settings = load_settings_from(&path, |key| vars.get(key).map(|v| v.to_string()))
        .expect("settings");

    assert_eq!(settings.api_base_url, "http://app.test/books");
    assert_eq!(settings.page_size.get(), 25);
    assert_eq!(settings.search_debounce, DEFAULT_SEARCH_QUIET_PERIOD);
    assert_eq!(settings.log_filter, "client_core=debug");

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn malformed_file_is_an_error() {
    let path = temp_settings_file("bad", "page_size = \"many\"\n");
    let err = load_settings_from(&path, no_env).expect_err("bad file");
    assert!(err.to_string().contains("failed to parse settings file"));

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}
