use anyhow::{Context, Result};
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

use gsv_artifacts::RunResult;
use gsv_config::ConfigUse;
use gsv_pricing::value_contract;
use gsv_schedule::{normalize, simulate_with_schedule, validate_facility, ContractFault};

use super::{export, load_contract, report_fault};

/// `gsv value`: simulate, then price events and net off storage costs.
pub fn run(config_paths: &[String], out: Option<&Path>, strict_keys: bool) -> Result<ExitCode> {
    let (loaded, cfg) = load_contract(config_paths, ConfigUse::Valuation, strict_keys)?;
    let orders = cfg.orders()?;
    let facility = cfg.facility();
    let costs = cfg.cost_model()?;
    let oracle = cfg.oracle()?;

    let simulated = validate_facility(&facility)
        .and_then(|_| normalize(&orders))
        .map_err(ContractFault::from)
        .and_then(|seq| simulate_with_schedule(&seq, &facility).map(|r| (seq, r)));
    let (seq, (report, schedule)) = match simulated {
        Ok(v) => v,
        Err(fault) => {
            export(out, "value", &loaded, RunResult::Fault(&fault))?;
            return Ok(report_fault(&fault));
        }
    };

    let valuation = value_contract(&seq, &report, oracle.as_ref(), &costs)
        .context("valuation failed")?;
    info!(
        path = report.path.as_str(),
        horizon_days = report.horizon_days,
        contract_value = %valuation.contract_value,
        "contract valued"
    );

    println!("path={}", report.path.as_str());
    println!("start_date={}", valuation.start_date);
    println!("end_date={}", valuation.end_date);
    println!("horizon_days={}", valuation.horizon_days);
    println!("peak_level={}", report.peak_level);
    for e in &valuation.events {
        println!(
            "event date={} volume={} unit_price={} contribution={}",
            e.date, e.signed_volume, e.unit_price, e.contribution
        );
    }
    let sc = &valuation.storage_cost;
    println!("gross_margin={}", valuation.gross_margin);
    println!("storage_months={}", sc.months);
    println!("facility_fee={}", sc.facility_fee);
    println!("transfer_fee={}", sc.transfer_fee);
    println!("transport_fee={}", sc.transport_fee);
    println!("storage_cost={}", sc.total);
    println!("contract_value={}", valuation.contract_value);

    export(
        out,
        "value",
        &loaded,
        RunResult::Feasible {
            seq: &seq,
            report: &report,
            schedule: schedule.as_ref(),
            valuation: Some(&valuation),
        },
    )?;
    Ok(ExitCode::SUCCESS)
}
