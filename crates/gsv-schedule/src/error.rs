use chrono::NaiveDate;

use crate::Direction;

/// Precondition failures on the raw order set. Caller must fix the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Date list and volume list of one direction differ in length.
    CountMismatch {
        direction: Direction,
        dates: usize,
        volumes: usize,
    },
    /// No orders at all.
    Empty,
    /// A supplied volume is zero or negative.
    NonPositiveVolume {
        direction: Direction,
        index: usize,
        volume: i64,
    },
    /// Daily rate must be > 0.
    NonPositiveRate { rate_per_day: i64 },
    /// Capacity must be >= 0.
    NegativeCapacity { max_capacity: i64 },
    /// Storage is not empty after the last order.
    NonZeroNet { net_volume: i64 },
    /// Chronologically last order must be a withdrawal.
    LastEventNotWithdrawal { date: NaiveDate },
    /// Signed volume arithmetic left the i64 range.
    VolumeOverflow,
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::CountMismatch {
                direction,
                dates,
                volumes,
            } => write!(
                f,
                "{} dates ({}) do not match {} volumes ({})",
                direction.as_str(),
                dates,
                direction.as_str(),
                volumes
            ),
            InputError::Empty => write!(f, "no orders supplied"),
            InputError::NonPositiveVolume {
                direction,
                index,
                volume,
            } => write!(
                f,
                "{} volume at index {} must be > 0 (got {})",
                direction.as_str(),
                index,
                volume
            ),
            InputError::NonPositiveRate { rate_per_day } => {
                write!(f, "rate_per_day must be > 0 (got {})", rate_per_day)
            }
            InputError::NegativeCapacity { max_capacity } => {
                write!(f, "max_capacity must be >= 0 (got {})", max_capacity)
            }
            InputError::NonZeroNet { net_volume } => write!(
                f,
                "storage not empty at contract end: net volume {} (must be 0)",
                net_volume
            ),
            InputError::LastEventNotWithdrawal { date } => {
                write!(f, "last order on {} must be a withdrawal", date)
            }
            InputError::VolumeOverflow => write!(f, "volume arithmetic overflow"),
        }
    }
}

impl std::error::Error for InputError {}

/// Fault categories surfaced to the reporting layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FaultKind {
    InputMismatch,
    CapacityExceeded,
    InsufficientStock,
    HorizonOverrun,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::InputMismatch => "INPUT_MISMATCH",
            FaultKind::CapacityExceeded => "CAPACITY_EXCEEDED",
            FaultKind::InsufficientStock => "INSUFFICIENT_STOCK",
            FaultKind::HorizonOverrun => "HORIZON_OVERRUN",
        }
    }
}

/// Terminal simulation fault. The contract as specified is infeasible and
/// must be re-parameterised by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractFault {
    InputMismatch(InputError),
    /// Stored volume went above facility capacity.
    CapacityExceeded {
        date: NaiveDate,
        level: i64,
        capacity: i64,
    },
    /// Stored volume went below zero.
    InsufficientStock { date: NaiveDate, level: i64 },
    /// Schedule needed days past the computed horizon.
    HorizonOverrun {
        direction: Direction,
        date: NaiveDate,
        unplaced_volume: i64,
    },
}

impl ContractFault {
    pub fn kind(&self) -> FaultKind {
        match self {
            ContractFault::InputMismatch(_) => FaultKind::InputMismatch,
            ContractFault::CapacityExceeded { .. } => FaultKind::CapacityExceeded,
            ContractFault::InsufficientStock { .. } => FaultKind::InsufficientStock,
            ContractFault::HorizonOverrun { .. } => FaultKind::HorizonOverrun,
        }
    }

    /// Calendar date at which the simulation stopped (none for input faults).
    pub fn offending_date(&self) -> Option<NaiveDate> {
        match self {
            ContractFault::InputMismatch(_) => None,
            ContractFault::CapacityExceeded { date, .. }
            | ContractFault::InsufficientStock { date, .. }
            | ContractFault::HorizonOverrun { date, .. } => Some(*date),
        }
    }
}

impl From<InputError> for ContractFault {
    fn from(e: InputError) -> Self {
        ContractFault::InputMismatch(e)
    }
}

impl std::fmt::Display for ContractFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractFault::InputMismatch(e) => write!(f, "input mismatch: {}", e),
            ContractFault::CapacityExceeded {
                date,
                level,
                capacity,
            } => write!(
                f,
                "capacity exceeded on {}: level {} > capacity {}",
                date, level, capacity
            ),
            ContractFault::InsufficientStock { date, level } => {
                write!(f, "insufficient stock on {}: level {} < 0", date, level)
            }
            ContractFault::HorizonOverrun {
                direction,
                date,
                unplaced_volume,
            } => write!(
                f,
                "{} schedule overruns horizon ending {}: {} unplaced",
                direction.as_str(),
                date,
                unplaced_volume
            ),
        }
    }
}

impl std::error::Error for ContractFault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContractFault::InputMismatch(e) => Some(e),
            _ => None,
        }
    }
}
