use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transfer direction relative to the storage facility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Injection,
    Withdrawal,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Injection => "INJECTION",
            Direction::Withdrawal => "WITHDRAWAL",
        }
    }
}

/// A single dated client action.
///
/// signed_volume carries direction:
/// +volume = injection, -volume = withdrawal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub date: NaiveDate,
    pub signed_volume: i64,
}

impl Order {
    pub fn injection(date: NaiveDate, volume: i64) -> Self {
        debug_assert!(volume > 0, "injection volume must be > 0");
        Self {
            date,
            signed_volume: volume,
        }
    }

    pub fn withdrawal(date: NaiveDate, volume: i64) -> Self {
        debug_assert!(volume > 0, "withdrawal volume must be > 0");
        Self {
            date,
            signed_volume: -volume,
        }
    }

    pub fn direction(&self) -> Direction {
        if self.signed_volume < 0 {
            Direction::Withdrawal
        } else {
            Direction::Injection
        }
    }

    pub fn abs_volume(&self) -> i64 {
        self.signed_volume.abs()
    }
}

/// Raw client orders as supplied by the caller: parallel date/volume lists
/// per direction. Withdrawal volumes are positive here and negated on merge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractOrders {
    pub injection_dates: Vec<NaiveDate>,
    pub injection_volumes: Vec<i64>,
    pub withdrawal_dates: Vec<NaiveDate>,
    pub withdrawal_volumes: Vec<i64>,
}

impl ContractOrders {
    /// Build from (date, volume) pairs. Lengths always match.
    pub fn from_pairs<I, W>(injections: I, withdrawals: W) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, i64)>,
        W: IntoIterator<Item = (NaiveDate, i64)>,
    {
        let (injection_dates, injection_volumes) = injections.into_iter().unzip();
        let (withdrawal_dates, withdrawal_volumes) = withdrawals.into_iter().unzip();
        Self {
            injection_dates,
            injection_volumes,
            withdrawal_dates,
            withdrawal_volumes,
        }
    }
}

/// Facility limits: one shared daily rate for both directions and a hard cap
/// on stored volume.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilitySpec {
    pub rate_per_day: i64,
    pub max_capacity: i64,
}

impl FacilitySpec {
    pub fn new(rate_per_day: i64, max_capacity: i64) -> Self {
        Self {
            rate_per_day,
            max_capacity,
        }
    }
}

/// Chronologically sorted, validated event sequence.
///
/// Invariants (enforced by [`crate::normalize()`]):
/// - non-empty
/// - dates are non-decreasing
/// - signed volumes sum to exactly zero
/// - the last event is a withdrawal
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EventSequence {
    events: Vec<Order>,
}

impl EventSequence {
    pub(crate) fn from_sorted(events: Vec<Order>) -> Self {
        debug_assert!(!events.is_empty());
        debug_assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
        Self { events }
    }

    pub fn events(&self) -> &[Order] {
        &self.events
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.events[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.events[self.events.len() - 1].date
    }

    pub fn last(&self) -> &Order {
        &self.events[self.events.len() - 1]
    }

    /// Calendar days between the first and last event.
    pub fn span_days(&self) -> i64 {
        (self.last_date() - self.first_date()).num_days()
    }

    /// Events of one direction, in sequence order.
    pub fn of_direction(&self, dir: Direction) -> impl Iterator<Item = &Order> {
        self.events.iter().filter(move |o| o.direction() == dir)
    }

    /// Sum of absolute volumes across all events.
    pub fn total_handled(&self) -> i64 {
        self.events.iter().map(Order::abs_volume).sum()
    }
}

/// Which validation path the simulation took.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationPath {
    /// No overlap: per-event prefix sums over exact volumes.
    Instantaneous,
    /// Overlap: per-day rate-limited schedule replay.
    DailySchedule,
}

impl SimulationPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationPath::Instantaneous => "INSTANTANEOUS",
            SimulationPath::DailySchedule => "DAILY_SCHEDULE",
        }
    }
}

/// Inventory level observed at a point of the simulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryPoint {
    pub date: NaiveDate,
    pub level: i64,
}

/// Successful simulation outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub path: SimulationPath,
    /// Simulated day count; day 0 is the first event date.
    pub horizon_days: i64,
    pub first_date: NaiveDate,
    /// Per-event points on the instantaneous path, per-day points on the
    /// daily path.
    pub trajectory: Vec<InventoryPoint>,
    pub peak_level: i64,
}

impl SimulationReport {
    /// Date the contract is fully unwound (first date + horizon).
    pub fn end_date(&self) -> NaiveDate {
        self.first_date + chrono::Duration::days(self.horizon_days)
    }
}
