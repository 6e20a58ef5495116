//! Command handlers for the `gsv` binary.
//!
//! Shared loading, fault reporting and export helpers live here.

pub mod schedule;
pub mod value;

use anyhow::{Context, Result};
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

use gsv_artifacts::{run_id_for, write_run_artifacts, RunResult, WriteRunArtifactsArgs};
use gsv_config::{
    load_layered_yaml, report_unused_keys, ConfigUse, ContractConfig, LoadedConfig,
    UnusedKeyPolicy,
};
use gsv_schedule::ContractFault;

/// Exit code for a contract that violates facility constraints. Config and
/// IO errors exit with 1, clap usage errors with 2.
pub const EXIT_CONTRACT_FAULT: u8 = 3;

/// Merge the layers, run the unused-key guard and extract the typed config.
pub fn load_contract(
    config_paths: &[String],
    usage: ConfigUse,
    strict_keys: bool,
) -> Result<(LoadedConfig, ContractConfig)> {
    let refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
    let loaded = load_layered_yaml(&refs)?;

    let policy = if strict_keys {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    report_unused_keys(usage, &loaded.config_json, policy)?;

    let contract = loaded.contract()?;
    println!("config_hash={}", loaded.config_hash);
    Ok((loaded, contract))
}

/// Print the fault in key=value form and pick the exit code.
pub fn report_fault(fault: &ContractFault) -> ExitCode {
    let date = fault
        .offending_date()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("fault={}", fault.kind().as_str());
    println!("fault_date={date}");
    eprintln!("contract rejected: {fault}");
    ExitCode::from(EXIT_CONTRACT_FAULT)
}

pub fn export(
    out: Option<&Path>,
    command: &str,
    loaded: &LoadedConfig,
    result: RunResult<'_>,
) -> Result<()> {
    let Some(root) = out else {
        return Ok(());
    };
    let res = write_run_artifacts(WriteRunArtifactsArgs {
        exports_root: root,
        run_id: run_id_for(&loaded.config_hash),
        command,
        config_hash: &loaded.config_hash,
        result,
    })
    .with_context(|| format!("export to {} failed", root.display()))?;

    info!(run_dir = %res.run_dir.display(), "artifacts written");
    println!("run_dir={}", res.run_dir.display());
    Ok(())
}
