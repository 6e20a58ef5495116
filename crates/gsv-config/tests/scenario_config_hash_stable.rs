//! Scenario: the effective-config hash identifies a run.
//!
//! GREEN when:
//! - the same layers always hash identically
//! - key order inside YAML does not change the hash
//! - an override layer changes both the value and the hash
//! - the hash is 64 lowercase hex chars (sha256)

use gsv_config::load_layered_yaml_from_strings;

const BASE_YAML: &str = r#"
contract:
  injection_dates: ["2021-12-11", "2021-12-13"]
  injection_volumes: [100002, 100003]
  withdrawal_dates: ["2021-12-14", "2021-12-16"]
  withdrawal_volumes: [100000, 100005]
facility:
  rate_per_day: 50000
  max_capacity: 2000000
"#;

const BASE_YAML_REORDERED: &str = r#"
facility:
  max_capacity: 2000000
  rate_per_day: 50000
contract:
  withdrawal_volumes: [100000, 100005]
  withdrawal_dates: ["2021-12-14", "2021-12-16"]
  injection_volumes: [100002, 100003]
  injection_dates: ["2021-12-11", "2021-12-13"]
"#;

const OVERLAY_YAML: &str = r#"
facility:
  max_capacity: 150000
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn reordered_keys_produce_same_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();
    assert_eq!(
        a.config_hash, b.config_hash,
        "key order in source YAML must not change the hash"
    );
}

#[test]
fn overlay_changes_value_and_hash() {
    let base = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let merged = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();

    assert_ne!(base.config_hash, merged.config_hash);
    assert_eq!(
        merged
            .config_json
            .pointer("/facility/max_capacity")
            .and_then(|v| v.as_i64()),
        Some(150_000)
    );
    // Untouched sibling survives the merge.
    assert_eq!(
        merged
            .config_json
            .pointer("/facility/rate_per_day")
            .and_then(|v| v.as_i64()),
        Some(50_000)
    );
}

#[test]
fn hash_is_64_hex_chars() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(loaded.config_hash.len(), 64);
    assert!(loaded
        .config_hash
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}
