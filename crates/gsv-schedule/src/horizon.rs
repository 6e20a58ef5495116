//! Simulation horizon (day count from the first event date).
//!
//! The carry-over is kept in volume units (`extra_days * rate`) so the fold
//! stays in integer arithmetic and the single rounding step happens at the end.

use crate::overlap::{action_duration, ceil_div, gap_days};
use crate::{normalize::withdrawal_orders, EventSequence, InputError, Order};

/// Leftover withdrawal volume carried between adjacent withdrawal pairs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrainCarry {
    pub extra_volume: i128,
}

impl DrainCarry {
    /// Advance the carry across one adjacent withdrawal pair.
    ///
    /// If the earlier withdrawal's duration plus the carried days reaches the
    /// gap, the carry becomes `carry + |volume| - gap * rate`: a withdrawal
    /// that clears inside its gap spends the spare days on the backlog. The
    /// carry never drops below zero. Otherwise the facility caught up and the
    /// carry resets.
    pub fn step(self, earlier: &Order, later: &Order, rate_per_day: i64) -> Self {
        let rate = i128::from(rate_per_day);
        let needed = i128::from(action_duration(earlier.signed_volume, rate_per_day));
        let gap = i128::from(gap_days(earlier.date, later.date));

        if needed * rate + self.extra_volume >= gap * rate {
            let backlog = self.extra_volume + i128::from(earlier.abs_volume()) - gap * rate;
            Self {
                extra_volume: backlog.max(0),
            }
        } else {
            Self::default()
        }
    }
}

/// Horizon for the overlap path.
///
/// Folds [`DrainCarry`] over the withdrawal-only subsequence, then adds the
/// last withdrawal's full volume: the final action must always complete.
pub fn extend_horizon(seq: &EventSequence, rate_per_day: i64) -> Result<i64, InputError> {
    let withdrawals = withdrawal_orders(seq);
    let last = withdrawals.last().ok_or(InputError::LastEventNotWithdrawal {
        date: seq.last_date(),
    })?;

    let carry = withdrawals
        .windows(2)
        .fold(DrainCarry::default(), |carry, w| {
            carry.step(&w[0], &w[1], rate_per_day)
        });

    let rate = i128::from(rate_per_day);
    let extra = carry.extra_volume + i128::from(last.abs_volume());
    let total = i128::from(seq.span_days()) * rate + extra;

    i64::try_from(ceil_div(total, rate)).map_err(|_| InputError::VolumeOverflow)
}

/// Horizon for the non-overlapping path: the span plus the drain time of the
/// final action.
pub fn instantaneous_horizon(seq: &EventSequence, rate_per_day: i64) -> i64 {
    seq.span_days() + action_duration(seq.last().signed_volume, rate_per_day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{normalize, ContractOrders};
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 12, day).unwrap()
    }

    #[test]
    fn carry_accumulates_while_behind() {
        // 300k over a 2-day gap at 50k/day leaves 200k (4 days).
        let c = DrainCarry::default().step(
            &Order::withdrawal(d(14), 300_000),
            &Order::withdrawal(d(16), 600_005),
            50_000,
        );
        assert_eq!(c.extra_volume, 200_000);

        let c = c.step(
            &Order::withdrawal(d(16), 600_005),
            &Order::withdrawal(d(18), 100_000),
            50_000,
        );
        assert_eq!(c.extra_volume, 700_005);
    }

    #[test]
    fn carry_resets_when_caught_up() {
        let c = DrainCarry {
            extra_volume: 10_000,
        }
        .step(
            &Order::withdrawal(d(1), 50_000),
            &Order::withdrawal(d(10), 50_000),
            50_000,
        );
        assert_eq!(c, DrainCarry::default());
    }

    #[test]
    fn carry_floors_at_zero() {
        // duration 2 >= gap 2, but 60k fits in two days of 50k.
        let c = DrainCarry::default().step(
            &Order::withdrawal(d(1), 60_000),
            &Order::withdrawal(d(3), 60_000),
            50_000,
        );
        assert_eq!(c.extra_volume, 0);
    }

    #[test]
    fn spare_gap_days_drain_the_backlog() {
        // 200k behind; 50k clears in one of two gap days, the other takes 50k
        // off the backlog.
        let c = DrainCarry {
            extra_volume: 200_000,
        }
        .step(
            &Order::withdrawal(d(3), 50_000),
            &Order::withdrawal(d(5), 100_000),
            50_000,
        );
        assert_eq!(c.extra_volume, 150_000);
    }

    #[test]
    fn early_finish_does_not_shorten_last_drain() {
        let orders = ContractOrders::from_pairs(
            [(d(1), 120_000)],
            [(d(2), 60_000), (d(4), 60_000)],
        );
        let seq = normalize(&orders).unwrap();
        // span 3 + 60k / 50k -> 5: the last 60k still needs days 3 and 4.
        assert_eq!(extend_horizon(&seq, 50_000).unwrap(), 5);
    }

    #[test]
    fn horizon_ends_when_last_withdrawal_drains() {
        let orders = ContractOrders::from_pairs(
            [(d(1), 450_000)],
            [(d(2), 300_000), (d(4), 50_000), (d(6), 100_000)],
        );
        let seq = normalize(&orders).unwrap();
        // span 5 + (150k + 100k) / 50k
        assert_eq!(extend_horizon(&seq, 50_000).unwrap(), 10);
    }

    #[test]
    fn reference_contract_horizon() {
        let orders = ContractOrders::from_pairs(
            [
                (d(11), 100_002),
                (d(13), 100_003),
                (d(15), 700_000),
                (d(17), 100_000),
            ],
            [(d(14), 300_000), (d(16), 600_005), (d(18), 100_000)],
        );
        let seq = normalize(&orders).unwrap();
        // span 7 + (200k + 500_005 + 100k) / 50k = 7 + 16.0001 -> 24
        assert_eq!(extend_horizon(&seq, 50_000).unwrap(), 24);
    }

    #[test]
    fn instantaneous_horizon_adds_last_drain() {
        let orders = ContractOrders::from_pairs([(d(1), 120_000)], [(d(10), 120_000)]);
        let seq = normalize(&orders).unwrap();
        assert_eq!(instantaneous_horizon(&seq, 50_000), 9 + 3);
    }
}
