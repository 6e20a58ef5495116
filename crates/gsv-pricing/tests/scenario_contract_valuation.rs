//! Scenario: valuation roll-up over simulated contracts.
//!
//! # Invariants under test
//!
//! 1. Gross margin is withdrawal proceeds minus injection cost, so a flat
//!    price on a net-zero contract yields exactly zero margin.
//! 2. Storage cost = monthly rental × (whole months + 1)
//!    + transfer fee per million handled + transport fee per event.
//! 3. Contract end date is first date + horizon, whichever path ran.
//! 4. A non-finite model price is an error, never a NaN valuation.

use chrono::NaiveDate;
use gsv_pricing::*;
use gsv_schedule::{normalize, simulate_sequence, ContractOrders, FacilitySpec, SimulationPath};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dollars(v: i64) -> Micros {
    Micros::new(v * MICROS_SCALE)
}

fn reference_orders() -> ContractOrders {
    let dec = |day| d(2021, 12, day);
    ContractOrders::from_pairs(
        [
            (dec(11), 100_002),
            (dec(13), 100_003),
            (dec(15), 700_000),
            (dec(17), 100_000),
        ],
        [(dec(14), 300_000), (dec(16), 600_005), (dec(18), 100_000)],
    )
}

#[test]
fn flat_price_leaves_only_storage_costs() {
    let seq = normalize(&reference_orders()).unwrap();
    let report = simulate_sequence(&seq, &FacilitySpec::new(50_000, 2_000_000)).unwrap();

    let costs = CostModel {
        monthly_fee: dollars(100_000),
        transfer_fee_per_million: dollars(10_000),
        transport_fee_per_event: dollars(50_000),
    };
    let v = value_contract(&seq, &report, &FlatOracle { price: 2.0 }, &costs).unwrap();

    assert_eq!(v.path, SimulationPath::DailySchedule);
    assert_eq!(v.gross_margin, Micros::ZERO);
    assert_eq!(v.events.len(), 7);
    assert_eq!(v.events[0].contribution, dollars(200_004));
    assert_eq!(v.events[4].contribution, dollars(-1_200_010));

    let sc = &v.storage_cost;
    assert_eq!(sc.months, 1);
    assert_eq!(sc.total_handled, 2_000_010);
    assert_eq!(sc.event_count, 7);
    assert_eq!(sc.facility_fee, dollars(100_000));
    assert_eq!(sc.transfer_fee, Micros::new(20_000_100_000));
    assert_eq!(sc.transport_fee, dollars(350_000));
    assert_eq!(sc.total, Micros::new(470_000_100_000));

    assert_eq!(v.contract_value, Micros::new(-470_000_100_000));
    assert_eq!(v.end_date, d(2022, 1, 4));
    assert_eq!(v.horizon_days, 24);
}

#[test]
fn rising_curve_pays_the_spread() {
    // price(t) = t dollars; Jan 31 2021 is t = 13, Mar 31 2021 is t = 15.
    let orders = ContractOrders::from_pairs([(d(2021, 1, 31), 100)], [(d(2021, 3, 31), 100)]);
    let seq = normalize(&orders).unwrap();
    let report = simulate_sequence(&seq, &FacilitySpec::new(1_000, 1_000)).unwrap();
    assert_eq!(report.path, SimulationPath::Instantaneous);

    let curve = CurveOracle::new(vec![(0.0, 0.0), (100.0, 100.0)]).unwrap();
    let v = value_contract(&seq, &report, &curve, &CostModel::default()).unwrap();

    assert_eq!(v.events[0].unit_price, dollars(13));
    assert_eq!(v.events[1].unit_price, dollars(15));
    assert_eq!(v.gross_margin, dollars(200));
    assert_eq!(v.storage_cost.months, 3);
    assert_eq!(v.storage_cost.total, Micros::ZERO);
    assert_eq!(v.contract_value, dollars(200));
    assert_eq!(v.end_date, d(2021, 4, 1));
}

#[test]
fn month_roll_over_starts_another_rental_period() {
    let orders = ContractOrders::from_pairs([(d(2022, 1, 20), 10)], [(d(2022, 2, 20), 10)]);
    let seq = normalize(&orders).unwrap();
    let report = simulate_sequence(&seq, &FacilitySpec::new(10, 10)).unwrap();
    let costs = CostModel {
        monthly_fee: dollars(1_000),
        ..CostModel::default()
    };
    let v = value_contract(&seq, &report, &FlatOracle { price: 1.0 }, &costs).unwrap();
    assert_eq!(v.storage_cost.months, 2);
    assert_eq!(v.contract_value, dollars(-2_000));
}

#[test]
fn non_finite_price_is_rejected() {
    let seq = normalize(&reference_orders()).unwrap();
    let report = simulate_sequence(&seq, &FacilitySpec::new(50_000, 2_000_000)).unwrap();
    let err = value_contract(
        &seq,
        &report,
        &FlatOracle { price: f64::NAN },
        &CostModel::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PricingError::NonFinitePrice { date, .. } if date == d(2021, 12, 11)));
}
