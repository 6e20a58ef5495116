use serde::{Deserialize, Serialize};

use gsv_schedule::EventSequence;

use crate::calendar::whole_months_between;
use crate::{Micros, PricingError};

/// Volume unit the transfer fee is quoted against.
pub const TRANSFER_FEE_UNIT: i64 = 1_000_000;

/// Facility and logistics fees charged to the client.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostModel {
    /// Rental per started contract month.
    pub monthly_fee: Micros,
    /// Per million units injected or withdrawn.
    pub transfer_fee_per_million: Micros,
    /// Per client action, either direction.
    pub transport_fee_per_event: Micros,
}

/// Storage cost broken down by component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StorageCost {
    pub months: i64,
    pub total_handled: i64,
    pub event_count: i64,
    pub facility_fee: Micros,
    pub transfer_fee: Micros,
    pub transport_fee: Micros,
    pub total: Micros,
}

impl CostModel {
    /// Price the storage side of a contract.
    ///
    /// Months run from the first to the last event date, whole months plus
    /// one: any roll-over into a new month starts another rental period.
    pub fn storage_cost(&self, seq: &EventSequence) -> Result<StorageCost, PricingError> {
        let months = whole_months_between(seq.first_date(), seq.last_date()) + 1;
        let total_handled = seq.total_handled();
        let event_count = seq.event_count() as i64;

        let facility_fee = self
            .monthly_fee
            .checked_mul_volume(months)
            .ok_or(PricingError::Overflow { what: "facility fee" })?;
        let transfer_fee = self
            .transfer_fee_per_million
            .checked_mul_ratio(total_handled, TRANSFER_FEE_UNIT)
            .ok_or(PricingError::Overflow { what: "transfer fee" })?;
        let transport_fee = self
            .transport_fee_per_event
            .checked_mul_volume(event_count)
            .ok_or(PricingError::Overflow { what: "transport fee" })?;

        let total = facility_fee
            .checked_add(transfer_fee)
            .and_then(|t| t.checked_add(transport_fee))
            .ok_or(PricingError::Overflow { what: "storage cost" })?;

        Ok(StorageCost {
            months,
            total_handled,
            event_count,
            facility_fee,
            transfer_fee,
            transport_fee,
            total,
        })
    }
}
