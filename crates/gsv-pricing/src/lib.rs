//! gsv-pricing
//!
//! Turns a simulated storage contract into a dollar value:
//! - per-event unit prices from a [`PriceOracle`] over a continuous month index
//! - gross margin = withdrawal proceeds - injection cost
//! - storage cost = monthly rental + per-million transfer fee + per-event transport
//!
//! Money is fixed-point micros. Deterministic, pure logic. No IO.

mod calendar;
mod costs;
mod error;
mod money;
mod oracle;
mod valuation;

pub use calendar::{days_in_month, time_index, whole_months_between, EPOCH_YEAR};
pub use costs::{CostModel, StorageCost, TRANSFER_FEE_UNIT};
pub use error::PricingError;
pub use money::{Micros, MICROS_SCALE};
pub use oracle::{CurveOracle, FlatOracle, PriceOracle, SeasonalTrendOracle};
pub use valuation::{value_contract, ContractValuation, EventValuation};
