use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;

use gsv_artifacts::RunResult;
use gsv_config::ConfigUse;
use gsv_schedule::{
    normalize, simulate_with_schedule, validate_facility, ContractFault, SimulationPath,
};

use super::{export, load_contract, report_fault};

/// `gsv schedule`: feasibility plus the trajectory, no pricing.
pub fn run(config_paths: &[String], out: Option<&Path>, strict_keys: bool) -> Result<ExitCode> {
    let (loaded, cfg) = load_contract(config_paths, ConfigUse::Schedule, strict_keys)?;
    let orders = cfg.orders()?;
    let facility = cfg.facility();

    let simulated = validate_facility(&facility)
        .and_then(|_| normalize(&orders))
        .map_err(ContractFault::from)
        .and_then(|seq| simulate_with_schedule(&seq, &facility).map(|r| (seq, r)));
    let (seq, (report, schedule)) = match simulated {
        Ok(v) => v,
        Err(fault) => {
            export(out, "schedule", &loaded, RunResult::Fault(&fault))?;
            return Ok(report_fault(&fault));
        }
    };

    println!("path={}", report.path.as_str());
    println!("start_date={}", report.first_date);
    println!("end_date={}", report.end_date());
    println!("horizon_days={}", report.horizon_days);
    println!("peak_level={}", report.peak_level);
    let unit = match report.path {
        SimulationPath::DailySchedule => "day",
        SimulationPath::Instantaneous => "event",
    };
    for (i, p) in report.trajectory.iter().enumerate() {
        println!("{unit}={i} date={} inventory={}", p.date, p.level);
    }

    export(
        out,
        "schedule",
        &loaded,
        RunResult::Feasible {
            seq: &seq,
            report: &report,
            schedule: schedule.as_ref(),
            valuation: None,
        },
    )?;
    Ok(ExitCode::SUCCESS)
}
