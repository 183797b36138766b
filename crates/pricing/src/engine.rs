//! Swappable pricing engine.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::Money;
use domain::Vehicle;
use parking_lot::RwLock;

use crate::error::{PricingError, Result};
use crate::strategy::{PricingStrategy, StandardPricing};

/// Holds the active [`PricingStrategy`].
///
/// Callers price through the engine and never see which strategy is active,
/// so the tariff can change at runtime without touching them. Share it
/// behind an [`Arc`].
pub struct PricingEngine {
    active: RwLock<Arc<dyn PricingStrategy>>,
}

impl PricingEngine {
    /// Creates an engine using [`StandardPricing`].
    pub fn new() -> Self {
        Self::with_strategy(StandardPricing)
    }

    pub fn with_strategy<S: PricingStrategy + 'static>(strategy: S) -> Self {
        Self {
            active: RwLock::new(Arc::new(strategy)),
        }
    }

    /// Replaces the active strategy, returning the previous one.
    #[tracing::instrument(skip(self, strategy), fields(strategy = strategy.name()))]
    pub fn set_strategy(&self, strategy: Arc<dyn PricingStrategy>) -> Arc<dyn PricingStrategy> {
        let previous = std::mem::replace(&mut *self.active.write(), strategy);
        tracing::info!(previous = previous.name(), "pricing strategy changed");
        previous
    }

    /// Name of the active strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.active.read().name()
    }

    /// Prices a stay with the active strategy.
    #[tracing::instrument(skip(self, vehicle), fields(plate = %vehicle.plate()))]
    pub fn price(
        &self,
        vehicle: &Vehicle,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<Money> {
        // Clone out so a concurrent swap never waits on a running quote.
        let strategy = Arc::clone(&self.active.read());
        let name = strategy.name();

        match strategy.price(vehicle, check_in, check_out) {
            Ok(amount) => {
                tracing::debug!(strategy = name, %amount, "stay priced");
                metrics::counter!("pricing_quotes_total", "strategy" => name).increment(1);
                Ok(amount)
            }
            Err(e) => {
                tracing::warn!(strategy = name, error = %e, "pricing rejected");
                Err(e)
            }
        }
    }

    /// Prices a closed record from its own timestamps.
    pub fn price_stay(&self, vehicle: &Vehicle) -> Result<Money> {
        match (vehicle.check_in(), vehicle.check_out()) {
            (Some(check_in), Some(check_out)) => self.price(vehicle, check_in, check_out),
            _ => Err(PricingError::IncompleteStay {
                plate: vehicle.plate().clone(),
            }),
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PricingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingEngine")
            .field("strategy", &self.strategy_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::AdjustedPricing;
    use chrono::{Duration, TimeZone};
    use domain::Category;

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        let check_in = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        (check_in, check_in + Duration::hours(2))
    }

    #[test]
    fn defaults_to_standard() {
        let engine = PricingEngine::default();
        assert_eq!(engine.strategy_name(), "standard");
    }

    #[test]
    fn swapping_changes_later_quotes_only() {
        let engine = PricingEngine::new();
        let car = Vehicle::new(Category::Standard, "A1");
        let (check_in, check_out) = window();

        let before = engine.price(&car, check_in, check_out).unwrap();
        let previous = engine.set_strategy(Arc::new(AdjustedPricing::happy_hour()));
        let after = engine.price(&car, check_in, check_out).unwrap();

        assert_eq!(previous.name(), "standard");
        assert_eq!(before.cents(), 17_500);
        assert_eq!(after.cents(), 14_000);
        assert_eq!(engine.strategy_name(), "happy_hour");
    }

    #[test]
    fn price_is_idempotent() {
        let engine = PricingEngine::with_strategy(AdjustedPricing::valet());
        let car = Vehicle::new(Category::Standard, "A1");
        let (check_in, check_out) = window();

        let first = engine.price(&car, check_in, check_out).unwrap();
        let second = engine.price(&car, check_in, check_out).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn price_stay_requires_both_timestamps() {
        let engine = PricingEngine::new();
        let fresh = Vehicle::new(Category::Light, "M1");

        let err = engine.price_stay(&fresh).unwrap_err();
        assert_eq!(
            err,
            PricingError::IncompleteStay {
                plate: "M1".into()
            }
        );
    }

    #[test]
    fn price_stay_uses_record_timestamps() {
        let engine = PricingEngine::new();
        let (check_in, check_out) = window();
        let car = Vehicle::restore(
            "A1",
            Category::Standard.default_details(),
            Some(check_in),
            Some(check_out),
        )
        .unwrap();

        assert_eq!(engine.price_stay(&car).unwrap(), Money::from_units(175));
    }
}
