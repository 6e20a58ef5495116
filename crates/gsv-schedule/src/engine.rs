use tracing::debug;

use crate::horizon::{extend_horizon, instantaneous_horizon};
use crate::normalize::{normalize, validate_facility};
use crate::overlap::first_overlap;
use crate::schedule::{build_daily_schedule, DailySchedule};
use crate::walker::{validate_event_prefix, walk_inventory};
use crate::{
    ContractFault, ContractOrders, EventSequence, FacilitySpec, InventoryPoint, SimulationPath,
    SimulationReport,
};

/// Validate and simulate a raw order set.
///
/// Pipeline: normalize -> overlap check -> (daily schedule | event prefix).
pub fn simulate(
    orders: &ContractOrders,
    facility: &FacilitySpec,
) -> Result<SimulationReport, ContractFault> {
    validate_facility(facility)?;
    let seq = normalize(orders)?;
    simulate_sequence(&seq, facility)
}

/// Simulate an already-normalized sequence, choosing the path by overlap.
pub fn simulate_sequence(
    seq: &EventSequence,
    facility: &FacilitySpec,
) -> Result<SimulationReport, ContractFault> {
    simulate_with_schedule(seq, facility).map(|(report, _)| report)
}

/// Like [`simulate_sequence`], also returning the daily schedule when the
/// daily path ran (`None` on the instantaneous path).
pub fn simulate_with_schedule(
    seq: &EventSequence,
    facility: &FacilitySpec,
) -> Result<(SimulationReport, Option<DailySchedule>), ContractFault> {
    validate_facility(facility)?;

    match first_overlap(seq, facility.rate_per_day) {
        Some(pair) => {
            debug!(
                pair,
                earlier = %seq.events()[pair].date,
                later = %seq.events()[pair + 1].date,
                "actions overlap; simulating daily schedule"
            );
            let (report, schedule) = run_daily_path(seq, facility)?;
            Ok((report, Some(schedule)))
        }
        None => {
            debug!(events = seq.event_count(), "no overlap; validating event prefix");
            Ok((run_instantaneous_path(seq, facility)?, None))
        }
    }
}

/// General path: horizon extension, daily schedule, inventory walk.
///
/// Bounds faults found by the walk take precedence over a horizon overrun.
///
/// Usable on any sequence, overlapping or not. Also returns the schedule so
/// callers can export per-day rows.
pub fn run_daily_path(
    seq: &EventSequence,
    facility: &FacilitySpec,
) -> Result<(SimulationReport, DailySchedule), ContractFault> {
    let horizon_days = extend_horizon(seq, facility.rate_per_day)?;
    debug!(horizon_days, span_days = seq.span_days(), "horizon computed");

    let schedule = build_daily_schedule(seq, facility.rate_per_day, horizon_days);
    let trajectory = walk_inventory(&schedule, facility.max_capacity)?;
    schedule.ensure_placed()?;

    let report = SimulationReport {
        path: SimulationPath::DailySchedule,
        horizon_days,
        first_date: seq.first_date(),
        peak_level: peak(&trajectory),
        trajectory,
    };
    Ok((report, schedule))
}

/// Fast path: exact per-event prefix sums.
pub fn run_instantaneous_path(
    seq: &EventSequence,
    facility: &FacilitySpec,
) -> Result<SimulationReport, ContractFault> {
    let trajectory = validate_event_prefix(seq, facility.max_capacity)?;
    Ok(SimulationReport {
        path: SimulationPath::Instantaneous,
        horizon_days: instantaneous_horizon(seq, facility.rate_per_day),
        first_date: seq.first_date(),
        peak_level: peak(&trajectory),
        trajectory,
    })
}

fn peak(points: &[InventoryPoint]) -> i64 {
    points.iter().map(|p| p.level).max().unwrap_or(0)
}
