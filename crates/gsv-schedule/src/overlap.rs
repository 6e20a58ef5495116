use chrono::NaiveDate;

use crate::EventSequence;

/// Ceiling division for a strictly positive divisor. Correct for negative
/// numerators as well.
pub(crate) fn ceil_div(num: i128, den: i128) -> i128 {
    debug_assert!(den > 0, "ceil_div divisor must be > 0");
    let q = num.div_euclid(den);
    if num.rem_euclid(den) == 0 {
        q
    } else {
        q + 1
    }
}

/// Whole days needed to move `volume` at `rate_per_day`. A partial day still
/// occupies a full day.
pub fn action_duration(volume: i64, rate_per_day: i64) -> i64 {
    ceil_div(i128::from(volume.unsigned_abs()), i128::from(rate_per_day)) as i64
}

/// Calendar days from `earlier` to `later`.
pub fn gap_days(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// Index of the first adjacent pair `(i, i + 1)` whose earlier action cannot
/// finish before the later one starts (`duration >= gap`).
pub fn first_overlap(seq: &EventSequence, rate_per_day: i64) -> Option<usize> {
    seq.events().windows(2).position(|w| {
        action_duration(w[0].signed_volume, rate_per_day) >= gap_days(w[0].date, w[1].date)
    })
}

/// True if any adjacent pair overlaps. Selects the daily-schedule path.
pub fn detect_overlap(seq: &EventSequence, rate_per_day: i64) -> bool {
    first_overlap(seq, rate_per_day).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{normalize, ContractOrders};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 3, day).unwrap()
    }

    #[test]
    fn duration_rounds_up() {
        assert_eq!(action_duration(100_000, 50_000), 2);
        assert_eq!(action_duration(100_001, 50_000), 3);
        assert_eq!(action_duration(-49_999, 50_000), 1);
        assert_eq!(action_duration(1, 50_000), 1);
    }

    #[test]
    fn ceil_div_handles_negative_numerators() {
        assert_eq!(ceil_div(-3, 2), -1);
        assert_eq!(ceil_div(-4, 2), -2);
        assert_eq!(ceil_div(5, 5), 1);
        assert_eq!(ceil_div(0, 5), 0);
    }

    #[test]
    fn duration_equal_to_gap_is_overlap() {
        let seq = normalize(&ContractOrders::from_pairs(
            [(d(1), 100_000)],
            [(d(3), 100_000)],
        ))
        .unwrap();
        assert!(detect_overlap(&seq, 50_000));
        assert_eq!(first_overlap(&seq, 50_000), Some(0));
    }

    #[test]
    fn duration_below_gap_is_not_overlap() {
        let seq = normalize(&ContractOrders::from_pairs(
            [(d(1), 100_000)],
            [(d(4), 100_000)],
        ))
        .unwrap();
        assert!(!detect_overlap(&seq, 50_000));
    }

    #[test]
    fn withdrawal_followed_by_close_event_overlaps() {
        // Withdrawal durations count by absolute volume.
        let seq = normalize(&ContractOrders::from_pairs(
            [(d(1), 200_000)],
            [(d(6), 150_000), (d(8), 50_000)],
        ))
        .unwrap();
        assert_eq!(first_overlap(&seq, 50_000), Some(1));
    }
}
