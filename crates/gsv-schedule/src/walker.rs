use crate::schedule::DailySchedule;
use crate::{ContractFault, EventSequence, InventoryPoint};

/// Inventory bounds check shared by both paths.
fn check_level(
    date: chrono::NaiveDate,
    level: i64,
    capacity: i64,
) -> Result<(), ContractFault> {
    if level > capacity {
        return Err(ContractFault::CapacityExceeded {
            date,
            level,
            capacity,
        });
    }
    if level < 0 {
        return Err(ContractFault::InsufficientStock { date, level });
    }
    Ok(())
}

/// Replay the daily schedule, one point per day.
///
/// Stops at the first day whose closing level leaves `[0, capacity]`.
pub fn walk_inventory(
    schedule: &DailySchedule,
    capacity: i64,
) -> Result<Vec<InventoryPoint>, ContractFault> {
    let inj = &schedule.injection;
    let wd = &schedule.withdrawal;

    let mut level = 0i64;
    let mut out = Vec::with_capacity(schedule.horizon_days());

    for day in 0..schedule.horizon_days() {
        match (inj.signal[day], wd.signal[day]) {
            (true, true) => level += inj.volume[day] - wd.volume[day],
            (true, false) => level += inj.volume[day],
            (false, true) => level -= wd.volume[day],
            (false, false) => {}
        }

        let date = schedule.date_of(day);
        check_level(date, level, capacity)?;
        out.push(InventoryPoint { date, level });
    }

    Ok(out)
}

/// Non-overlapping path: running sum of exact signed volumes, one point per
/// event. Faults report the event date.
pub fn validate_event_prefix(
    seq: &EventSequence,
    capacity: i64,
) -> Result<Vec<InventoryPoint>, ContractFault> {
    let mut level = 0i64;
    let mut out = Vec::with_capacity(seq.event_count());

    for order in seq.events() {
        level += order.signed_volume;
        check_level(order.date, level, capacity)?;
        out.push(InventoryPoint {
            date: order.date,
            level,
        });
    }

    Ok(out)
}
