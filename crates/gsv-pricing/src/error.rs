use chrono::NaiveDate;

/// Valuation failures. All are input or range problems; none are retried.
#[derive(Clone, Debug, PartialEq)]
pub enum PricingError {
    /// Oracle returned NaN or an infinity.
    NonFinitePrice { date: NaiveDate, time_index: f64 },
    /// A money amount left the i64 micros range.
    Overflow { what: &'static str },
    EmptyCurve,
    BadCurve { reason: String },
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::NonFinitePrice { date, time_index } => {
                write!(f, "non-finite price on {date} (time index {time_index:.4})")
            }
            PricingError::Overflow { what } => write!(f, "money overflow computing {what}"),
            PricingError::EmptyCurve => write!(f, "price curve has no knots"),
            PricingError::BadCurve { reason } => write!(f, "invalid price curve: {reason}"),
        }
    }
}

impl std::error::Error for PricingError {}
