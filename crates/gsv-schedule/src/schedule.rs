//! Daily schedule builder (overlap path).
//!
//! Every order is spread over consecutive days at the facility rate. An order
//! whose start day is still busy with an earlier order's tail is stacked onto
//! the next free day, and its volume is merged with add-cap-carry so no day
//! ever moves more than the rate.
//!
//! Arrays are allocated once from the horizon and never resized. Volume that
//! would land past the horizon is recorded per direction, never dropped.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::overlap::action_duration;
use crate::{ContractFault, Direction, EventSequence, Order};

/// Split `volume` into full-rate chunks plus one non-zero remainder chunk.
pub fn split_into_chunks(volume: i64, rate_per_day: i64) -> Vec<i64> {
    debug_assert!(rate_per_day > 0);
    let mut out = Vec::new();
    let mut left = volume;
    while left >= rate_per_day {
        out.push(rate_per_day);
        left -= rate_per_day;
    }
    if left > 0 {
        out.push(left);
    }
    out
}

/// Add `chunks` into `buffer` from `start`, capping every cell at `cap` and
/// pushing the excess forward until absorbed.
///
/// Returns the volume that could not be absorbed before the buffer ended
/// (0 when everything fit).
pub fn merge_with_carry(buffer: &mut [i64], chunks: &[i64], start: usize, cap: i64) -> i64 {
    let mut carry = 0i64;
    let mut idx = start;

    for chunk in chunks {
        match buffer.get_mut(idx) {
            Some(cell) => {
                let sum = *cell + chunk + carry;
                *cell = sum.min(cap);
                carry = (sum - cap).max(0);
            }
            None => carry += chunk,
        }
        idx += 1;
    }

    while carry > 0 {
        let Some(cell) = buffer.get_mut(idx) else {
            break;
        };
        let sum = *cell + carry;
        *cell = sum.min(cap);
        carry = (sum - cap).max(0);
        idx += 1;
    }

    carry
}

/// Per-day activity for one direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionSchedule {
    pub direction: Direction,
    /// true = an action of this direction is in progress that day.
    pub signal: Vec<bool>,
    /// Volume actually moved that day, in `[0, rate]`.
    pub volume: Vec<i64>,
    /// Volume that did not fit before the horizon ended.
    pub unplaced: i64,
}

impl DirectionSchedule {
    fn zeroed(direction: Direction, horizon: usize) -> Self {
        Self {
            direction,
            signal: vec![false; horizon],
            volume: vec![0; horizon],
            unplaced: 0,
        }
    }

    pub fn total_volume(&self) -> i64 {
        self.volume.iter().sum()
    }

    /// Place one order of `volume` starting at `start_day`.
    ///
    /// A busy start day shifts the signal to the next free day. The volume is
    /// always merged from `start_day`, so partly filled cells absorb it first.
    /// Returns the unplaced volume (> 0 means the horizon was too short).
    fn place(&mut self, start_day: usize, volume: i64, rate_per_day: i64) -> i64 {
        if start_day >= self.signal.len() {
            return volume;
        }

        let span = action_duration(volume, rate_per_day) as usize;
        // None: the signal is already set through the horizon.
        if let Some(free) = self.signal[start_day..].iter().position(|active| !active) {
            mark(&mut self.signal, start_day + free, span);
        }

        let chunks = split_into_chunks(volume, rate_per_day);
        merge_with_carry(&mut self.volume, &chunks, start_day, rate_per_day)
    }
}

fn mark(signal: &mut [bool], from: usize, span: usize) {
    let end = from.saturating_add(span).min(signal.len());
    for s in &mut signal[from..end] {
        *s = true;
    }
}

/// Both directions over a fixed horizon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySchedule {
    pub first_date: NaiveDate,
    pub rate_per_day: i64,
    pub injection: DirectionSchedule,
    pub withdrawal: DirectionSchedule,
}

impl DailySchedule {
    pub fn horizon_days(&self) -> usize {
        self.injection.signal.len()
    }

    pub fn date_of(&self, day: usize) -> NaiveDate {
        self.first_date + chrono::Duration::days(day as i64)
    }

    pub fn direction(&self, dir: Direction) -> &DirectionSchedule {
        match dir {
            Direction::Injection => &self.injection,
            Direction::Withdrawal => &self.withdrawal,
        }
    }

    /// `HorizonOverrun` for the first direction with unplaced volume.
    ///
    /// Run after the inventory walk: a bounds fault inside the horizon wins.
    pub fn ensure_placed(&self) -> Result<(), ContractFault> {
        match [&self.injection, &self.withdrawal]
            .into_iter()
            .find(|d| d.unplaced > 0)
        {
            Some(d) => Err(ContractFault::HorizonOverrun {
                direction: d.direction,
                date: self.date_of(self.horizon_days()),
                unplaced_volume: d.unplaced,
            }),
            None => Ok(()),
        }
    }
}

/// Build the per-day schedule for both directions.
///
/// Day 0 is the sequence's first date. Directions are built independently
/// with identical placement logic. Volume past the horizon is recorded in
/// [`DirectionSchedule::unplaced`]; see [`DailySchedule::ensure_placed`].
pub fn build_daily_schedule(
    seq: &EventSequence,
    rate_per_day: i64,
    horizon_days: i64,
) -> DailySchedule {
    let horizon = usize::try_from(horizon_days.max(0)).unwrap_or(0);
    let first_date = seq.first_date();

    let mut injection = DirectionSchedule::zeroed(Direction::Injection, horizon);
    let mut withdrawal = DirectionSchedule::zeroed(Direction::Withdrawal, horizon);

    for target in [&mut injection, &mut withdrawal] {
        let dir = target.direction;
        let mut orders: Vec<&Order> = seq.of_direction(dir).collect();
        orders.sort_by_key(|o| o.date);

        for order in orders {
            let start_day = (order.date - first_date).num_days();
            let start_day = usize::try_from(start_day).unwrap_or(usize::MAX);
            let unplaced = target.place(start_day, order.abs_volume(), rate_per_day);
            if unplaced > 0 {
                tracing::debug!(
                    direction = dir.as_str(),
                    order_date = %order.date,
                    unplaced,
                    "order does not fit within horizon"
                );
                target.unplaced += unplaced;
            }
        }
    }

    DailySchedule {
        first_date,
        rate_per_day,
        injection,
        withdrawal,
    }
}
