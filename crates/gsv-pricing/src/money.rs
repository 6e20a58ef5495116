//! Fixed-point money.
//!
//! All monetary amounts are `i64` micros (1 USD = 1_000_000). Volumes stay
//! plain `i64` units and never convert implicitly.
//!
//! Arithmetic that can overflow on realistic inputs (price × volume,
//! fee × count) is checked and surfaces as [`crate::PricingError::Overflow`].

use std::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

pub const MICROS_SCALE: i64 = 1_000_000;

/// A monetary amount at 1e-6 scale.
///
/// No `From<i64>`; construct with [`Micros::new`] or [`Micros::from_dollars`].
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Micros(i64);

impl Micros {
    pub const ZERO: Micros = Micros(0);

    #[inline]
    pub const fn new(raw: i64) -> Self {
        Micros(raw)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Round a dollar amount to the nearest micro.
    ///
    /// `None` for non-finite input or a value outside the `i64` range.
    pub fn from_dollars(dollars: f64) -> Option<Micros> {
        if !dollars.is_finite() {
            return None;
        }
        let scaled = (dollars * MICROS_SCALE as f64).round();
        if scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return None;
        }
        Some(Micros(scaled as i64))
    }

    /// Lossy conversion for display and JSON export only.
    pub fn to_dollars(self) -> f64 {
        self.0 as f64 / MICROS_SCALE as f64
    }

    #[inline]
    pub fn checked_add(self, rhs: Micros) -> Option<Micros> {
        self.0.checked_add(rhs.0).map(Micros)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Micros) -> Option<Micros> {
        self.0.checked_sub(rhs.0).map(Micros)
    }

    /// Per-unit amount times a plain volume or count.
    #[inline]
    pub fn checked_mul_volume(self, volume: i64) -> Option<Micros> {
        self.0.checked_mul(volume).map(Micros)
    }

    /// `self × numerator / denominator`, rounded half away from zero.
    /// Used for per-million fees where the intermediate product needs i128.
    pub fn checked_mul_ratio(self, numerator: i64, denominator: i64) -> Option<Micros> {
        if denominator == 0 {
            return None;
        }
        let num = self.0 as i128 * numerator as i128;
        let den = denominator as i128;
        let magnitude = (num.abs() + den.abs() / 2) / den.abs();
        let rounded = magnitude * num.signum() * den.signum();
        i64::try_from(rounded).ok().map(Micros)
    }
}

impl Add for Micros {
    type Output = Micros;
    #[inline]
    fn add(self, rhs: Micros) -> Micros {
        Micros(self.0 + rhs.0)
    }
}

impl Sub for Micros {
    type Output = Micros;
    #[inline]
    fn sub(self, rhs: Micros) -> Micros {
        Micros(self.0 - rhs.0)
    }
}

impl Neg for Micros {
    type Output = Micros;
    #[inline]
    fn neg(self) -> Micros {
        Micros(-self.0)
    }
}

impl AddAssign for Micros {
    #[inline]
    fn add_assign(&mut self, rhs: Micros) {
        self.0 += rhs.0;
    }
}

impl std::fmt::Display for Micros {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dollars = self.0 / MICROS_SCALE;
        let frac = (self.0 % MICROS_SCALE).abs();
        // -0.5 would otherwise lose its sign.
        if self.0 < 0 && dollars == 0 {
            write!(f, "-{dollars}.{frac:06}")
        } else {
            write!(f, "{dollars}.{frac:06}")
        }
    }
}
