//! Run artifacts under `exports/<run_id>/`:
//! - `manifest.json`: config hash, path taken, horizon, outcome
//! - `schedule.csv`: per-day rows (daily path) or per-event rows (fast path)
//! - `valuation.json`: priced events and cost breakdown, when valued
//!
//! A faulted run still gets a manifest carrying the fault.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use gsv_pricing::ContractValuation;
use gsv_schedule::{ContractFault, DailySchedule, EventSequence, SimulationReport};

pub const SCHEMA_VERSION: i32 = 1;

pub const MANIFEST_JSON: &str = "manifest.json";
pub const SCHEDULE_CSV: &str = "schedule.csv";
pub const VALUATION_JSON: &str = "valuation.json";

const DAILY_HEADER: &str =
    "day,date,injection_active,injection_volume,withdrawal_active,withdrawal_volume,inventory\n";
const EVENT_HEADER: &str = "event,date,direction,signed_volume,inventory\n";

/// Same effective config, same run directory.
pub fn run_id_for(config_hash: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, config_hash.as_bytes())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub schema_version: i32,
    pub run_id: Uuid,
    pub command: String,
    pub config_hash: String,
    pub created_at_utc: DateTime<Utc>,
    pub outcome: RunOutcome,
    pub artifacts: ArtifactList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunOutcome {
    Feasible {
        path: String,
        first_date: NaiveDate,
        end_date: NaiveDate,
        horizon_days: i64,
        peak_level: i64,
    },
    Fault {
        kind: String,
        date: Option<NaiveDate>,
        message: String,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactList {
    pub manifest_json: String,
    pub schedule_csv: Option<String>,
    pub valuation_json: Option<String>,
}

pub struct WriteRunArtifactsArgs<'a> {
    pub exports_root: &'a Path,
    pub run_id: Uuid,
    pub command: &'a str,
    pub config_hash: &'a str,
    pub result: RunResult<'a>,
}

/// What the run produced.
pub enum RunResult<'a> {
    Feasible {
        seq: &'a EventSequence,
        report: &'a SimulationReport,
        /// Present when the daily path ran.
        schedule: Option<&'a DailySchedule>,
        valuation: Option<&'a ContractValuation>,
    },
    Fault(&'a ContractFault),
}

#[derive(Debug)]
pub struct WriteRunArtifactsResult {
    pub run_dir: PathBuf,
    pub manifest_path: PathBuf,
}

pub fn write_run_artifacts(args: WriteRunArtifactsArgs<'_>) -> Result<WriteRunArtifactsResult> {
    let run_dir = args.exports_root.join(args.run_id.to_string());
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("create exports dir failed: {}", run_dir.display()))?;

    let mut artifacts = ArtifactList {
        manifest_json: MANIFEST_JSON.to_string(),
        ..ArtifactList::default()
    };

    let outcome = match args.result {
        RunResult::Feasible {
            seq,
            report,
            schedule,
            valuation,
        } => {
            let csv = match schedule {
                Some(s) => daily_schedule_csv(s, report),
                None => event_schedule_csv(seq, report),
            };
            write_file(&run_dir.join(SCHEDULE_CSV), &csv)?;
            artifacts.schedule_csv = Some(SCHEDULE_CSV.to_string());

            if let Some(v) = valuation {
                let json =
                    serde_json::to_string_pretty(v).context("serialize valuation failed")?;
                write_file(&run_dir.join(VALUATION_JSON), &format!("{json}\n"))?;
                artifacts.valuation_json = Some(VALUATION_JSON.to_string());
            }

            RunOutcome::Feasible {
                path: report.path.as_str().to_string(),
                first_date: report.first_date,
                end_date: report.end_date(),
                horizon_days: report.horizon_days,
                peak_level: report.peak_level,
            }
        }
        RunResult::Fault(fault) => RunOutcome::Fault {
            kind: fault.kind().as_str().to_string(),
            date: fault.offending_date(),
            message: fault.to_string(),
        },
    };

    let manifest = RunManifest {
        schema_version: SCHEMA_VERSION,
        run_id: args.run_id,
        command: args.command.to_string(),
        config_hash: args.config_hash.to_string(),
        created_at_utc: Utc::now(),
        outcome,
        artifacts,
    };

    let manifest_path = run_dir.join(MANIFEST_JSON);
    let json = serde_json::to_string_pretty(&manifest).context("serialize manifest failed")?;
    write_file(&manifest_path, &format!("{json}\n"))?;

    Ok(WriteRunArtifactsResult {
        run_dir,
        manifest_path,
    })
}

/// One row per simulated day; `inventory` is the end-of-day level.
pub fn daily_schedule_csv(schedule: &DailySchedule, report: &SimulationReport) -> String {
    let mut out = String::from(DAILY_HEADER);
    for day in 0..schedule.horizon_days() {
        let level = report.trajectory.get(day).map(|p| p.level).unwrap_or(0);
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            day,
            schedule.date_of(day),
            schedule.injection.signal[day] as u8,
            schedule.injection.volume[day],
            schedule.withdrawal.signal[day] as u8,
            schedule.withdrawal.volume[day],
            level
        ));
    }
    out
}

/// One row per client action; `inventory` is the level after the action.
pub fn event_schedule_csv(seq: &EventSequence, report: &SimulationReport) -> String {
    let mut out = String::from(EVENT_HEADER);
    for (i, (order, point)) in seq.events().iter().zip(&report.trajectory).enumerate() {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            i,
            order.date,
            order.direction().as_str(),
            order.signed_volume,
            point.level
        ));
    }
    out
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("write failed: {}", path.display()))
}
