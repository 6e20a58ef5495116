//! Consumed-pointer registry and unused-key guard.
//!
//! A consumed pointer is a JSON Pointer prefix. A leaf under any consumed
//! prefix counts as read; every other leaf is unused. Catches typos such as
//! `/costs/monthly_fees` that would otherwise be silently ignored.

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// What the effective config is being used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigUse {
    /// Feasibility only: orders and facility.
    Schedule,
    /// Feasibility plus pricing and costs.
    Valuation,
}

impl ConfigUse {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigUse::Schedule => "SCHEDULE",
            ConfigUse::Valuation => "VALUATION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    pub usage: String,
    /// Sorted, unique.
    pub consumed_prefixes: Vec<String>,
    /// Sorted, unique.
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

const CONTRACT_AND_FACILITY: &[&str] = &[
    "/contract/injection_dates",
    "/contract/injection_volumes",
    "/contract/withdrawal_dates",
    "/contract/withdrawal_volumes",
    "/facility/rate_per_day",
    "/facility/max_capacity",
];

const COSTS_AND_PRICING: &[&str] = &[
    "/costs/monthly_fee",
    "/costs/transfer_fee_per_million",
    "/costs/transport_fee_per_event",
    "/pricing/model",
    // seasonal_trend
    "/pricing/intercept",
    "/pricing/slope",
    "/pricing/amplitude",
    "/pricing/phase",
    // curve
    "/pricing/knots",
];

/// Pointers actually read by [`crate::ContractConfig`] for `usage`.
pub fn consumed_pointers_for(usage: ConfigUse) -> Vec<&'static str> {
    match usage {
        ConfigUse::Schedule => CONTRACT_AND_FACILITY.to_vec(),
        ConfigUse::Valuation => CONTRACT_AND_FACILITY
            .iter()
            .chain(COSTS_AND_PRICING)
            .copied()
            .collect(),
    }
}

/// Unused-key report for `usage`. `Fail` turns a non-clean report into an
/// error; `Warn` logs it and returns it.
pub fn report_unused_keys(
    usage: ConfigUse,
    config_json: &Value,
    policy: UnusedKeyPolicy,
) -> Result<UnusedKeyReport> {
    let consumed: BTreeSet<String> = consumed_pointers_for(usage)
        .into_iter()
        .map(normalize_pointer)
        .collect();
    let consumed_prefixes: Vec<String> = consumed.into_iter().collect();

    let mut leaves: Vec<String> = Vec::new();
    collect_leaf_pointers(config_json, "", &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|leaf| !consumed_prefixes.iter().any(|cp| is_prefix_pointer(cp, leaf)))
        .collect();
    unused.sort();
    unused.dedup();

    let report = UnusedKeyReport {
        usage: usage.as_str().to_string(),
        consumed_prefixes,
        unused_leaf_pointers: unused,
    };

    if !report.is_clean() {
        if policy == UnusedKeyPolicy::Fail {
            bail!(
                "CONFIG_UNUSED_KEYS (usage={}): {} unused config leaf key(s) detected. \
                Remove them or fix their spelling. First few: {}",
                report.usage,
                report.unused_leaf_pointers.len(),
                preview_list(&report.unused_leaf_pointers, 12)
            );
        }
        warn!(
            usage = %report.usage,
            count = report.unused_leaf_pointers.len(),
            first = %preview_list(&report.unused_leaf_pointers, 5),
            "unused config keys"
        );
    }

    Ok(report)
}

/// Leading "/" required, no trailing "/" unless the pointer is just "/".
fn normalize_pointer(p: &str) -> String {
    let mut s = p.trim().to_string();
    if s.is_empty() {
        return "/".to_string();
    }
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    while s.ends_with('/') && s.len() > 1 {
        s.pop();
    }
    s
}

/// "/a/b" consumes "/a/b" and "/a/b/c" but not "/a/bc". "/" consumes all.
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if prefix == "/" || leaf == prefix {
        return true;
    }
    leaf.strip_prefix(prefix)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) => {
            for (k, vv) in map.iter() {
                let next = format!("{}/{}", prefix, escape_pointer_token(k));
                collect_leaf_pointers(vv, &next, out);
            }
        }
        Value::Array(arr) => {
            for (i, vv) in arr.iter().enumerate() {
                collect_leaf_pointers(vv, &format!("{prefix}/{i}"), out);
            }
        }
        _ => {
            if prefix.is_empty() {
                out.push("/".to_string());
            } else {
                out.push(prefix.to_string());
            }
        }
    }
}

fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}

fn preview_list(items: &[String], n: usize) -> String {
    format!("{:?}", items.iter().take(n).collect::<Vec<_>>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_respects_token_boundary() {
        assert!(is_prefix_pointer("/pricing/knots", "/pricing/knots/0/price"));
        assert!(is_prefix_pointer("/facility/rate_per_day", "/facility/rate_per_day"));
        assert!(!is_prefix_pointer("/pricing/slope", "/pricing/slopes"));
        assert!(is_prefix_pointer("/", "/anything"));
    }

    #[test]
    fn pointer_normalization() {
        assert_eq!(normalize_pointer("costs/monthly_fee/"), "/costs/monthly_fee");
        assert_eq!(normalize_pointer("  "), "/");
    }

    #[test]
    fn escaped_keys_round_trip_through_pointer() {
        let v = serde_json::json!({"a/b": {"c~d": 1}});
        let mut leaves = Vec::new();
        collect_leaf_pointers(&v, "", &mut leaves);
        assert_eq!(leaves, vec!["/a~1b/c~0d".to_string()]);
        assert_eq!(v.pointer(&leaves[0]), Some(&serde_json::json!(1)));
    }
}
