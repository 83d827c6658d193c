use rust_decimal::Decimal;
use std::fmt;
use std::ops;

use crate::errors::*;

pub use rust_decimal::prelude::Zero;

/// A rupee amount backed by a `Decimal`.
///
/// Amounts arrive from the service as JSON numbers and are converted at two
/// decimal places (paise). Derived figures such as prorated milestones keep
/// the full precision of the division; rounding happens only when an amount
/// is formatted for display.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Rupees(Decimal);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Granularity {
    Yearly,
    Monthly,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PaceStatus {
    Ahead,
    Behind,
}

impl Rupees {
    const SCALE: u32 = 2;

    pub fn from_f64(amount: f64) -> Rupees {
        Rupees(Decimal::new(
            (amount * 10f64.powi(Self::SCALE as i32)).round() as i64,
            Self::SCALE,
        ))
    }

    pub fn from_i64(amount: i64) -> Rupees {
        Rupees(Decimal::new(amount, 0))
    }

    pub fn to_decimal(self) -> Decimal {
        self.0
    }

    /// Cumulative amount after `months` months at this monthly rate.
    pub fn over_months(self, months: u32) -> Rupees {
        Rupees(self.0 * Decimal::new(i64::from(months), 0))
    }

    /// The proportional share `self * numerator / denominator`, kept at full
    /// precision. Multiplying before dividing means the share at
    /// `numerator == denominator` is the whole amount exactly.
    pub fn prorate(self, numerator: u32, denominator: u32) -> Rupees {
        assert!(
            denominator != 0,
            "Rupees::prorate denominator must be nonzero"
        );
        Rupees(
            self.0 * Decimal::new(i64::from(numerator), 0)
                / Decimal::new(i64::from(denominator), 0),
        )
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::zero()
    }
}

impl ops::Add for Rupees {
    type Output = Rupees;
    fn add(self, other: Rupees) -> Rupees {
        Rupees(self.0 + other.0)
    }
}

impl ops::AddAssign for Rupees {
    fn add_assign(&mut self, other: Rupees) {
        self.0 += other.0;
    }
}

impl ops::Sub for Rupees {
    type Output = Rupees;
    fn sub(self, other: Rupees) -> Rupees {
        Rupees(self.0 - other.0)
    }
}

impl ops::Neg for Rupees {
    type Output = Rupees;
    fn neg(self) -> Rupees {
        Rupees(self.0.neg())
    }
}

impl Zero for Rupees {
    fn zero() -> Rupees {
        Rupees(Decimal::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Granularity {
    pub fn from_str(value: &str) -> Result<Granularity> {
        match value {
            "yearly" => Ok(Granularity::Yearly),
            "monthly" => Ok(Granularity::Monthly),
            _ => bail!("Invalid view granularity (expected yearly or monthly): {}", value),
        }
    }

    pub fn months_per_period(self) -> u32 {
        match self {
            Granularity::Yearly => 12,
            Granularity::Monthly => 1,
        }
    }

    pub fn period_count(self, target_years: u32) -> u32 {
        match self {
            Granularity::Yearly => target_years,
            Granularity::Monthly => target_years * 12,
        }
    }

    pub fn period_noun(self) -> &'static str {
        match self {
            Granularity::Yearly => "Year",
            Granularity::Monthly => "Month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Yearly => write!(f, "yearly"),
            Granularity::Monthly => write!(f, "monthly"),
        }
    }
}

impl PaceStatus {
    /// A tie counts as ahead.
    pub fn from_projection(projected: Rupees, milestone: Rupees) -> PaceStatus {
        if projected >= milestone {
            PaceStatus::Ahead
        } else {
            PaceStatus::Behind
        }
    }
}

impl fmt::Display for PaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaceStatus::Ahead => write!(f, "Ahead"),
            PaceStatus::Behind => write!(f, "Behind"),
        }
    }
}
