//! Pricing strategies.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::Money;
use domain::Vehicle;

use crate::error::{PricingError, Result};

/// Computes the amount owed for one stay.
///
/// Implementations must be deterministic: the same vehicle category and
/// timestamps always price the same.
pub trait PricingStrategy: Send + Sync {
    /// Stable name used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Prices the stay between `check_in` and `check_out`.
    ///
    /// Returns [`PricingError::InvalidInterval`] when `check_out` precedes
    /// `check_in`.
    fn price(
        &self,
        vehicle: &Vehicle,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<Money>;
}

/// Baseline tariff: the category hourly rate applied to the minutes past
/// the category grace period.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPricing;

impl StandardPricing {
    pub const NAME: &'static str = "standard";

    /// Minutes of the stay that are billed, floored at zero.
    pub fn billable_minutes(
        vehicle: &Vehicle,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<f64> {
        if check_out < check_in {
            return Err(PricingError::InvalidInterval {
                check_in,
                check_out,
            });
        }

        let total_minutes = (check_out - check_in).num_milliseconds() as f64 / 60_000.0;
        Ok((total_minutes - f64::from(vehicle.grace_minutes())).max(0.0))
    }
}

impl PricingStrategy for StandardPricing {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn price(
        &self,
        vehicle: &Vehicle,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<Money> {
        let billable = Self::billable_minutes(vehicle, check_in, check_out)?;
        let cents = vehicle.base_rate().cents() as f64 * billable / 60.0;
        Ok(Money::from_cents_rounded(cents))
    }
}

/// Applies a fixed multiplier to the result of an inner strategy and
/// rounds again to the cent.
#[derive(Debug, Clone, Copy)]
pub struct AdjustedPricing<S = StandardPricing> {
    name: &'static str,
    factor: f64,
    inner: S,
}

impl<S: PricingStrategy> AdjustedPricing<S> {
    /// Wraps `inner`, multiplying its amounts by `factor`.
    pub fn new(name: &'static str, factor: f64, inner: S) -> Self {
        Self {
            name,
            factor,
            inner,
        }
    }
}

impl AdjustedPricing {
    /// 20% discount.
    pub fn happy_hour() -> Self {
        Self::new("happy_hour", 0.80, StandardPricing)
    }

    /// 30% surcharge.
    pub fn valet() -> Self {
        Self::new("valet", 1.30, StandardPricing)
    }

    /// 50% surcharge.
    pub fn special_event() -> Self {
        Self::new("special_event", 1.50, StandardPricing)
    }

    /// 15% discount.
    pub fn overnight() -> Self {
        Self::new("overnight", 0.85, StandardPricing)
    }
}

impl<S: PricingStrategy> PricingStrategy for AdjustedPricing<S> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn price(
        &self,
        vehicle: &Vehicle,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<Money> {
        let base = self.inner.price(vehicle, check_in, check_out)?;
        Ok(base.scale(self.factor))
    }
}

/// Returns every predefined strategy, baseline first.
pub fn builtin_strategies() -> Vec<Arc<dyn PricingStrategy>> {
    vec![
        Arc::new(StandardPricing),
        Arc::new(AdjustedPricing::happy_hour()),
        Arc::new(AdjustedPricing::valet()),
        Arc::new(AdjustedPricing::special_event()),
        Arc::new(AdjustedPricing::overnight()),
    ]
}
