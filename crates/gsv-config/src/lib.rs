//! gsv-config
//!
//! Layered YAML contract configuration:
//! - documents merged in order, later layers override earlier ones
//! - canonical JSON + sha256 hash identifies the effective config of a run
//! - consumed-pointer registry flags keys no command reads
//! - typed extraction into schedule and pricing inputs

use anyhow::{Context, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;

mod consumption;
mod contract;

pub use consumption::{
    consumed_pointers_for, report_unused_keys, ConfigUse, UnusedKeyPolicy, UnusedKeyReport,
};
pub use contract::{
    parse_contract_date, ContractConfig, ContractSection, CostsSection, CurveKnot,
    FacilitySection, PricingSection,
};

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

impl LoadedConfig {
    /// Typed view of the merged document.
    pub fn contract(&self) -> Result<ContractConfig> {
        ContractConfig::from_json(&self.config_json)
    }
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    // Earlier docs are the base, later docs override.
    let mut merged = serde_json::json!({});
    for (i, raw) in yaml_docs.iter().enumerate() {
        let v_yaml: serde_yaml::Value =
            serde_yaml::from_str(raw).with_context(|| format!("invalid yaml in layer {i}"))?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        merged = deep_merge(merged, v_json);
    }

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Objects merge key by key; anything else (lists included) is replaced
/// wholesale by the later layer.
fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

fn canonicalize_json(v: &Value) -> Result<String> {
    // serde_json's default map is ordered by key, so compact output is canonical.
    serde_json::to_string(v).context("canonical json serialize failed")
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
