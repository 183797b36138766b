//! Scripted walkthrough of a day at the lot.

use chrono::Duration;
use common::{Money, Plate};
use domain::{Category, ParkingError, ParkingLot, Vehicle, VehicleDetails};
use pricing::{PricingEngine, builtin_strategies};
use state_store::StateStore;

use crate::error::Result;

/// Quote of a reference stay under one strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub strategy: &'static str,
    pub amount: Money,
}

/// Bill for a vehicle that left the lot.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub plate: Plate,
    pub category: Category,
    pub stay: Duration,
    pub amount: Money,
}

/// What the walkthrough did.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub quotes: Vec<Quote>,
    pub receipts: Vec<Receipt>,
    /// Vehicles admitted while filling the lot.
    pub filled: usize,
    /// Plate turned away once the lot was full.
    pub rejected: Option<Plate>,
}

/// Length of the stay quoted under every strategy.
pub const REFERENCE_STAY_HOURS: i64 = 2;

fn arrivals() -> Vec<Vehicle> {
    vec![
        Vehicle::with_details(
            "AB123",
            VehicleDetails::Light {
                displacement_cc: 250,
            },
        ),
        Vehicle::with_details(
            "AC456BD",
            VehicleDetails::Standard {
                make: "Toyota".to_string(),
            },
        ),
        Vehicle::with_details(
            "AD789EF",
            VehicleDetails::Heavy {
                cargo_capacity_kg: 2500.0,
            },
        ),
    ]
}

/// Checks out and bills every vehicle still parked, in plate order.
///
/// Used on start-up to settle the vehicles a previous run left in the
/// restored state, so the walkthrough starts from an empty lot.
#[tracing::instrument(skip_all)]
pub fn release_carry_over<S: StateStore>(
    lot: &ParkingLot<S>,
    engine: &PricingEngine,
) -> Result<Vec<Receipt>> {
    let mut plates: Vec<Plate> = lot.snapshot().into_keys().collect();
    plates.sort();

    let mut receipts = Vec::with_capacity(plates.len());
    for plate in plates {
        receipts.push(settle(lot, engine, &plate)?);
    }
    Ok(receipts)
}

fn settle<S: StateStore>(
    lot: &ParkingLot<S>,
    engine: &PricingEngine,
    plate: &Plate,
) -> Result<Receipt> {
    let released = lot.check_out(plate)?;
    let amount = engine.price_stay(&released)?;
    tracing::info!(plate = %released.plate(), %amount, "vehicle billed");
    Ok(Receipt {
        plate: released.plate().clone(),
        category: released.category(),
        stay: released.stay().unwrap_or_else(Duration::zero),
        amount,
    })
}

/// Runs the walkthrough against `lot`, which should start empty.
///
/// One vehicle per category checks in, the standard one is quoted for a
/// two-hour stay under every built-in strategy, all three check out and are
/// billed, and the lot is then filled until a vehicle is turned away. After
/// quoting, the engine goes back to the strategy it started with.
#[tracing::instrument(skip_all)]
pub fn run<S: StateStore>(lot: &ParkingLot<S>, engine: &PricingEngine) -> Result<Report> {
    let mut report = Report::default();

    let mut parked = Vec::new();
    for vehicle in arrivals() {
        parked.push(lot.check_in(vehicle)?);
    }
    tracing::info!(
        occupied = lot.occupied_count(),
        free = lot.free_count(),
        "arrivals parked"
    );

    if let Some(reference) = parked.iter().find(|v| v.category() == Category::Standard)
        && let Some(check_in) = reference.check_in()
    {
        let check_out = check_in + Duration::hours(REFERENCE_STAY_HOURS);
        let mut original = None;
        for strategy in builtin_strategies() {
            let previous = engine.set_strategy(strategy);
            original.get_or_insert(previous);
            let amount = engine.price(reference, check_in, check_out)?;
            report.quotes.push(Quote {
                strategy: engine.strategy_name(),
                amount,
            });
        }
        if let Some(original) = original {
            engine.set_strategy(original);
        }
    }

    for vehicle in &parked {
        report.receipts.push(settle(lot, engine, vehicle.plate())?);
    }

    let categories = Category::ALL;
    let mut n = 0;
    loop {
        let plate = Plate::new(format!("FILL-{n:03}"));
        let vehicle = Vehicle::new(categories[n % categories.len()], plate.clone());
        match lot.check_in(vehicle) {
            Ok(_) => n += 1,
            Err(ParkingError::CapacityExhausted { .. }) => {
                report.rejected = Some(plate);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    report.filled = n;
    tracing::info!(filled = n, "lot filled to capacity");

    Ok(report)
}
