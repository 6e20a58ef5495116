use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use gsv_pricing::{
    time_index, CostModel, CurveOracle, Micros, PriceOracle, SeasonalTrendOracle,
};
use gsv_schedule::{ContractOrders, FacilitySpec};

/// Accepted date spellings: ISO `YYYY-MM-DD` and the trade-ticket `DD/MM/YY`.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%y"];

pub fn parse_contract_date(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .with_context(|| format!("unparseable date '{raw}' (expected YYYY-MM-DD or DD/MM/YY)"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSection {
    pub injection_dates: Vec<String>,
    pub injection_volumes: Vec<i64>,
    pub withdrawal_dates: Vec<String>,
    pub withdrawal_volumes: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacilitySection {
    pub rate_per_day: i64,
    pub max_capacity: i64,
}

/// Fees in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostsSection {
    pub monthly_fee: f64,
    pub transfer_fee_per_million: f64,
    pub transport_fee_per_event: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveKnot {
    pub date: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PricingSection {
    SeasonalTrend {
        intercept: f64,
        slope: f64,
        amplitude: f64,
        #[serde(default)]
        phase: f64,
    },
    Curve {
        knots: Vec<CurveKnot>,
    },
}

/// Typed view of the effective config. `costs` and `pricing` are only
/// required for valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractConfig {
    pub contract: ContractSection,
    pub facility: FacilitySection,
    #[serde(default)]
    pub costs: Option<CostsSection>,
    #[serde(default)]
    pub pricing: Option<PricingSection>,
}

impl ContractConfig {
    pub fn from_json(v: &Value) -> Result<Self> {
        serde_json::from_value(v.clone()).context("config does not match contract schema")
    }

    /// Parsed orders. Length and volume checks are left to normalization so
    /// they surface as contract faults.
    pub fn orders(&self) -> Result<ContractOrders> {
        let c = &self.contract;
        Ok(ContractOrders {
            injection_dates: parse_dates(&c.injection_dates, "injection_dates")?,
            injection_volumes: c.injection_volumes.clone(),
            withdrawal_dates: parse_dates(&c.withdrawal_dates, "withdrawal_dates")?,
            withdrawal_volumes: c.withdrawal_volumes.clone(),
        })
    }

    pub fn facility(&self) -> FacilitySpec {
        FacilitySpec::new(self.facility.rate_per_day, self.facility.max_capacity)
    }

    pub fn cost_model(&self) -> Result<CostModel> {
        let Some(costs) = &self.costs else {
            bail!("missing /costs section (required for valuation)");
        };
        Ok(CostModel {
            monthly_fee: fee(costs.monthly_fee, "monthly_fee")?,
            transfer_fee_per_million: fee(
                costs.transfer_fee_per_million,
                "transfer_fee_per_million",
            )?,
            transport_fee_per_event: fee(
                costs.transport_fee_per_event,
                "transport_fee_per_event",
            )?,
        })
    }

    pub fn oracle(&self) -> Result<Box<dyn PriceOracle>> {
        match &self.pricing {
            None => bail!("missing /pricing section (required for valuation)"),
            Some(PricingSection::SeasonalTrend {
                intercept,
                slope,
                amplitude,
                phase,
            }) => Ok(Box::new(SeasonalTrendOracle {
                intercept: *intercept,
                slope: *slope,
                amplitude: *amplitude,
                phase: *phase,
            })),
            Some(PricingSection::Curve { knots }) => {
                let mut points = Vec::with_capacity(knots.len());
                for (i, k) in knots.iter().enumerate() {
                    let date = parse_contract_date(&k.date)
                        .with_context(|| format!("/pricing/knots/{i}/date"))?;
                    points.push((time_index(date), k.price));
                }
                let curve = CurveOracle::new(points).context("invalid /pricing/knots")?;
                Ok(Box::new(curve))
            }
        }
    }
}

fn parse_dates(raw: &[String], field: &str) -> Result<Vec<NaiveDate>> {
    raw.iter()
        .enumerate()
        .map(|(i, s)| parse_contract_date(s).with_context(|| format!("/contract/{field}/{i}")))
        .collect()
}

fn fee(dollars: f64, field: &str) -> Result<Micros> {
    if dollars < 0.0 {
        bail!("/costs/{field} must be >= 0, got {dollars}");
    }
    Micros::from_dollars(dollars)
        .with_context(|| format!("/costs/{field} out of range: {dollars}"))
}
