//! gsv-schedule
//!
//! Inventory scheduling and constraint simulation for a storage contract.
//!
//! Pipeline: ORDERS -> NORMALIZE -> OVERLAP -> (HORIZON -> SCHEDULE -> WALK | PREFIX)
//!
//! - Orders merged into one chronologically sorted signed-volume sequence
//! - Overlap when an action's rate-limited duration reaches the gap to the next
//! - Overlapping contracts replayed day by day at the facility rate
//! - Non-overlapping contracts checked with exact per-event prefix sums
//! - Inventory must stay within `[0, capacity]`; first violation is terminal
//!
//! Deterministic, pure logic. No IO, no wall-clock.

mod engine;
mod error;
mod normalize;
mod types;

pub mod horizon;
pub mod overlap;
pub mod schedule;
pub mod walker;

pub use engine::{
    run_daily_path, run_instantaneous_path, simulate, simulate_sequence, simulate_with_schedule,
};
pub use error::{ContractFault, FaultKind, InputError};
pub use horizon::{extend_horizon, instantaneous_horizon, DrainCarry};
pub use normalize::{normalize, validate_facility, withdrawal_orders};
pub use overlap::{action_duration, detect_overlap, first_overlap, gap_days};
pub use schedule::{
    build_daily_schedule, merge_with_carry, split_into_chunks, DailySchedule, DirectionSchedule,
};
pub use types::{
    ContractOrders, Direction, EventSequence, FacilitySpec, InventoryPoint, Order,
    SimulationPath, SimulationReport,
};
pub use walker::{validate_event_prefix, walk_inventory};
