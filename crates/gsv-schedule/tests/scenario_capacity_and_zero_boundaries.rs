//! Scenario: inventory bounds are inclusive.
//!
//! GREEN when:
//! - a level exactly equal to capacity passes; capacity + 1 faults on that day
//! - a level exactly 0 passes; -1 faults on that day
//! - the `duration == gap` pair is treated as overlapping and still passes
//!   with trajectory 50k, 100k, 50k, 0
//! - an overdraw on day 0 is reported on day 0 even when a later injection
//!   runs past the horizon

use chrono::NaiveDate;
use gsv_schedule::*;

const RATE: i64 = 50_000;

fn dec(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 12, day).unwrap()
}

fn levels(report: &SimulationReport) -> Vec<i64> {
    report.trajectory.iter().map(|p| p.level).collect()
}

#[test]
fn duration_equal_to_gap_is_overlap_and_feasible() {
    let orders = ContractOrders::from_pairs([(dec(1), 100_000)], [(dec(3), 100_000)]);
    let seq = normalize(&orders).unwrap();
    assert!(detect_overlap(&seq, RATE));

    let report = simulate(&orders, &FacilitySpec::new(RATE, 100_000)).unwrap();
    assert_eq!(report.path, SimulationPath::DailySchedule);
    assert_eq!(report.horizon_days, 4);
    assert_eq!(levels(&report), vec![50_000, 100_000, 50_000, 0]);
}

#[test]
fn one_more_day_of_gap_is_not_overlap() {
    let orders = ContractOrders::from_pairs([(dec(1), 100_000)], [(dec(4), 100_000)]);
    let report = simulate(&orders, &FacilitySpec::new(RATE, 100_000)).unwrap();
    assert_eq!(report.path, SimulationPath::Instantaneous);
    assert_eq!(levels(&report), vec![100_000, 0]);
    assert_eq!(report.horizon_days, 3 + 2);
}

#[test]
fn capacity_exactly_reached_is_legal() {
    let orders = ContractOrders::from_pairs(
        [(dec(1), 100_000), (dec(2), 50_000)],
        [(dec(4), 150_000)],
    );
    let report = simulate(&orders, &FacilitySpec::new(RATE, 150_000)).unwrap();
    assert_eq!(
        levels(&report),
        vec![50_000, 100_000, 150_000, 100_000, 50_000, 0]
    );
}

#[test]
fn two_injections_one_unit_over_capacity_fault_on_last_injection_day() {
    // Second injection starts on a busy day, is stacked, and its last
    // (only) day is Dec 3.
    let orders = ContractOrders::from_pairs(
        [(dec(1), 100_000), (dec(2), 50_000)],
        [(dec(4), 150_000)],
    );
    let err = simulate(&orders, &FacilitySpec::new(RATE, 149_999)).unwrap_err();
    assert_eq!(
        err,
        ContractFault::CapacityExceeded {
            date: dec(3),
            level: 150_000,
            capacity: 149_999,
        }
    );
}

#[test]
fn instantaneous_capacity_boundary() {
    let orders = ContractOrders::from_pairs([(dec(1), 80_000)], [(dec(10), 80_000)]);

    assert!(simulate(&orders, &FacilitySpec::new(RATE, 80_000)).is_ok());

    let err = simulate(&orders, &FacilitySpec::new(RATE, 79_999)).unwrap_err();
    assert_eq!(err.kind(), FaultKind::CapacityExceeded);
    assert_eq!(err.offending_date(), Some(dec(1)));
}

#[test]
fn zero_level_is_legal_and_minus_one_faults() {
    // Fully drained mid-contract, then refilled.
    let ok = ContractOrders::from_pairs(
        [(dec(1), 10_000), (dec(10), 5_000)],
        [(dec(5), 10_000), (dec(20), 5_000)],
    );
    let report = simulate(&ok, &FacilitySpec::new(RATE, 1_000_000)).unwrap();
    assert_eq!(levels(&report), vec![10_000, 0, 5_000, 0]);

    let short = ContractOrders::from_pairs(
        [(dec(1), 9_999), (dec(10), 5_001)],
        [(dec(5), 10_000), (dec(20), 5_000)],
    );
    let err = simulate(&short, &FacilitySpec::new(RATE, 1_000_000)).unwrap_err();
    assert_eq!(
        err,
        ContractFault::InsufficientStock {
            date: dec(5),
            level: -1,
        }
    );
}

#[test]
fn overdraw_wins_over_injection_past_horizon() {
    // 2M injected from Dec 6 needs 40 days; the horizon (40 days from Dec 1)
    // ends before it completes, but the stock is already short on Dec 1.
    let orders = ContractOrders::from_pairs(
        [(dec(6), 2_000_000)],
        [(dec(1), 1_950_000), (dec(7), 50_000)],
    );
    let err = simulate(&orders, &FacilitySpec::new(RATE, 5_000_000)).unwrap_err();
    assert_eq!(
        err,
        ContractFault::InsufficientStock {
            date: dec(1),
            level: -50_000,
        }
    );
}
