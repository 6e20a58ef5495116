//! Unit price models.
//!
//! A model maps a continuous month index (see [`crate::time_index`]) to a
//! price per unit in dollars. The scheduling core never calls these; the
//! valuation roll-up does, once per event.

use std::f64::consts::PI;

use crate::PricingError;

pub trait PriceOracle {
    /// Unit price in dollars at `time_index` (months since Jan 2020).
    fn price(&self, time_index: f64) -> f64;
}

/// Constant price. Mostly useful for tests and what-if runs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlatOracle {
    pub price: f64,
}

impl PriceOracle for FlatOracle {
    fn price(&self, _time_index: f64) -> f64 {
        self.price
    }
}

/// Linear trend with a 12-month sinusoidal season:
///
/// `price(t) = intercept + slope·t + amplitude·sin(2π(t − phase) / 12)`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SeasonalTrendOracle {
    pub intercept: f64,
    pub slope: f64,
    pub amplitude: f64,
    /// Month index offset of the seasonal zero crossing.
    pub phase: f64,
}

impl PriceOracle for SeasonalTrendOracle {
    fn price(&self, t: f64) -> f64 {
        self.intercept + self.slope * t + self.amplitude * (2.0 * PI * (t - self.phase) / 12.0).sin()
    }
}

/// Piecewise-linear interpolation over `(time_index, price)` knots.
/// Flat beyond the first and last knot.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveOracle {
    knots: Vec<(f64, f64)>,
}

impl CurveOracle {
    /// Knots must be non-empty, finite, and strictly increasing in time.
    pub fn new(knots: Vec<(f64, f64)>) -> Result<Self, PricingError> {
        if knots.is_empty() {
            return Err(PricingError::EmptyCurve);
        }
        if knots.iter().any(|(t, p)| !t.is_finite() || !p.is_finite()) {
            return Err(PricingError::BadCurve {
                reason: "non-finite knot".to_string(),
            });
        }
        if let Some(w) = knots.windows(2).find(|w| w[1].0 <= w[0].0) {
            return Err(PricingError::BadCurve {
                reason: format!("knot at {} not after {}", w[1].0, w[0].0),
            });
        }
        Ok(Self { knots })
    }

    pub fn knots(&self) -> &[(f64, f64)] {
        &self.knots
    }
}

impl PriceOracle for CurveOracle {
    fn price(&self, t: f64) -> f64 {
        let first = self.knots[0];
        let last = self.knots[self.knots.len() - 1];
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }

        // First knot strictly after t; always exists and is > 0 here.
        let hi = self.knots.partition_point(|(kt, _)| *kt <= t);
        let (t0, p0) = self.knots[hi - 1];
        let (t1, p1) = self.knots[hi];
        p0 + (p1 - p0) * (t - t0) / (t1 - t0)
    }
}
