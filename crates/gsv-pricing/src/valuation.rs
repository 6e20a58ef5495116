use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use gsv_schedule::{EventSequence, SimulationPath, SimulationReport};

use crate::calendar::time_index;
use crate::costs::{CostModel, StorageCost};
use crate::oracle::PriceOracle;
use crate::{Micros, PricingError};

/// One priced client action.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventValuation {
    pub date: NaiveDate,
    pub signed_volume: i64,
    pub time_index: f64,
    pub unit_price: Micros,
    /// `unit price × signed volume`: positive for injections (client pays),
    /// negative for withdrawals (client earns).
    pub contribution: Micros,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContractValuation {
    pub path: SimulationPath,
    pub start_date: NaiveDate,
    /// First date + horizon: the day storage is empty again.
    pub end_date: NaiveDate,
    pub horizon_days: i64,
    pub events: Vec<EventValuation>,
    /// Withdrawal proceeds minus injection cost.
    pub gross_margin: Micros,
    pub storage_cost: StorageCost,
    pub contract_value: Micros,
}

/// Price every event of a simulated contract and net off storage costs.
///
/// `report` must come from simulating `seq`; only its path and horizon are
/// read here.
pub fn value_contract(
    seq: &EventSequence,
    report: &SimulationReport,
    oracle: &dyn PriceOracle,
    costs: &CostModel,
) -> Result<ContractValuation, PricingError> {
    let mut events = Vec::with_capacity(seq.event_count());
    let mut contributions = Micros::ZERO;

    for order in seq.events() {
        let t = time_index(order.date);
        let price = oracle.price(t);
        let non_finite = PricingError::NonFinitePrice {
            date: order.date,
            time_index: t,
        };
        if !price.is_finite() {
            return Err(non_finite);
        }

        let unit_price = Micros::from_dollars(price).ok_or(non_finite)?;
        let contribution = Micros::from_dollars(price * order.signed_volume as f64)
            .ok_or(PricingError::Overflow { what: "event contribution" })?;
        contributions = contributions
            .checked_add(contribution)
            .ok_or(PricingError::Overflow { what: "gross margin" })?;

        debug!(date = %order.date, time_index = t, %unit_price, %contribution, "event priced");
        events.push(EventValuation {
            date: order.date,
            signed_volume: order.signed_volume,
            time_index: t,
            unit_price,
            contribution,
        });
    }

    let gross_margin = -contributions;
    let storage_cost = costs.storage_cost(seq)?;
    let contract_value = gross_margin
        .checked_sub(storage_cost.total)
        .ok_or(PricingError::Overflow { what: "contract value" })?;

    Ok(ContractValuation {
        path: report.path,
        start_date: report.first_date,
        end_date: report.end_date(),
        horizon_days: report.horizon_days,
        events,
        gross_margin,
        storage_cost,
        contract_value,
    })
}
