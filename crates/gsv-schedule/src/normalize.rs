//! Merge injection/withdrawal order lists into one validated sequence.

use chrono::NaiveDate;

use crate::{ContractOrders, Direction, EventSequence, FacilitySpec, InputError, Order};

/// Validate facility limits before any scheduling arithmetic divides by the rate.
pub fn validate_facility(facility: &FacilitySpec) -> Result<(), InputError> {
    if facility.rate_per_day <= 0 {
        return Err(InputError::NonPositiveRate {
            rate_per_day: facility.rate_per_day,
        });
    }
    if facility.max_capacity < 0 {
        return Err(InputError::NegativeCapacity {
            max_capacity: facility.max_capacity,
        });
    }
    Ok(())
}

/// Merge both order lists into one chronologically sorted [`EventSequence`].
///
/// Tie-break on equal dates: stable over the concatenation
/// `injections ++ withdrawals`, so injections come first and each list keeps
/// its input order.
pub fn normalize(orders: &ContractOrders) -> Result<EventSequence, InputError> {
    let mut merged = side_orders(
        Direction::Injection,
        &orders.injection_dates,
        &orders.injection_volumes,
    )?;
    merged.extend(side_orders(
        Direction::Withdrawal,
        &orders.withdrawal_dates,
        &orders.withdrawal_volumes,
    )?);

    if merged.is_empty() {
        return Err(InputError::Empty);
    }

    // Vec::sort_by_key is stable.
    merged.sort_by_key(|o| o.date);

    let net = merged
        .iter()
        .try_fold(0i64, |acc, o| acc.checked_add(o.signed_volume))
        .ok_or(InputError::VolumeOverflow)?;
    if net != 0 {
        return Err(InputError::NonZeroNet { net_volume: net });
    }

    let seq = EventSequence::from_sorted(merged);
    let last = seq.last();
    if last.direction() != Direction::Withdrawal {
        return Err(InputError::LastEventNotWithdrawal { date: last.date });
    }

    Ok(seq)
}

/// Withdrawal-only subsequence, re-sorted chronologically on its own.
pub fn withdrawal_orders(seq: &EventSequence) -> Vec<Order> {
    let mut out: Vec<Order> = seq.of_direction(Direction::Withdrawal).cloned().collect();
    out.sort_by_key(|o| o.date);
    out
}

fn side_orders(
    direction: Direction,
    dates: &[NaiveDate],
    volumes: &[i64],
) -> Result<Vec<Order>, InputError> {
    if dates.len() != volumes.len() {
        return Err(InputError::CountMismatch {
            direction,
            dates: dates.len(),
            volumes: volumes.len(),
        });
    }

    dates
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(index, (date, volume))| {
            if *volume <= 0 {
                return Err(InputError::NonPositiveVolume {
                    direction,
                    index,
                    volume: *volume,
                });
            }
            Ok(match direction {
                Direction::Injection => Order::injection(*date, *volume),
                Direction::Withdrawal => Order::withdrawal(*date, *volume),
            })
        })
        .collect()
}
