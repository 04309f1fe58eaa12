use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults() {
    let cfg = PanelConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, PanelConfig::default());
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
    assert_eq!(
        cfg.timeouts,
        Timeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn from_lookup_overrides() {
    let cfg = PanelConfig::from_lookup(lookup_from(&[
        ("PANEL_API_BASE_URL", "https://panel.example.test/api/v1/"),
        ("PANEL_STORAGE_PATH", "/tmp/panel.json"),
        ("PANEL_REQUEST_TIMEOUT_SECS", "42"),
        ("PANEL_CONNECT_TIMEOUT_SECS", " 7 "),
    ]))
    .unwrap();

    assert_eq!(cfg.api_base_url, "https://panel.example.test/api/v1");
    assert_eq!(cfg.storage_path, PathBuf::from("/tmp/panel.json"));
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn from_lookup_blank_storage_path_uses_default() {
    let cfg = PanelConfig::from_lookup(lookup_from(&[("PANEL_STORAGE_PATH", "  ")])).unwrap();
    assert_eq!(cfg.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
}

#[test]
fn from_lookup_bad_timeout_errors() {
    let err = PanelConfig::from_lookup(lookup_from(&[("PANEL_REQUEST_TIMEOUT_SECS", "soon")]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("PANEL_REQUEST_TIMEOUT_SECS"));
}

#[test]
fn from_lookup_zero_timeout_errors() {
    let err = PanelConfig::from_lookup(lookup_from(&[("PANEL_CONNECT_TIMEOUT_SECS", "0")]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("greater than zero"));
}

#[test]
fn normalize_base_url_trims_slashes_and_whitespace() {
    assert_eq!(normalize_base_url(" http://localhost:8000/api/v1// "), "http://localhost:8000/api/v1");
}

#[test]
fn timeouts_convert_to_durations() {
    let t = Timeouts { request_secs: 5, connect_secs: 2 };
    assert_eq!(t.request(), Duration::from_secs(5));
    assert_eq!(t.connect(), Duration::from_secs(2));
}
