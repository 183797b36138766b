//! Parking demo entry point.

use std::sync::Arc;

use demo::config::Config;
use demo::scenario;
use domain::{CameraSensor, OccupancySensor, ParkingLot, SecuritySensor};
use pricing::PricingEngine;
use state_store::JsonFileStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Build the lot, restore the previous run and settle its vehicles
    let lot = ParkingLot::new(JsonFileStore::new(config.state_path.clone()), config.lot);
    let engine = PricingEngine::new();

    match lot.restore_state().await {
        Ok(Some(summary)) => tracing::info!(
            restored = summary.restored,
            skipped = summary.skipped,
            "previous state restored"
        ),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "could not read previous state"),
    }
    let carried = scenario::release_carry_over(&lot, &engine).expect("settling carry-over failed");
    if !carried.is_empty() {
        let total: common::Money = carried.iter().map(|r| r.amount).sum();
        tracing::info!(vehicles = carried.len(), %total, "carry-over vehicles billed");
    }

    // 4. Attach sensors
    let occupancy = Arc::new(OccupancySensor::default());
    let camera = Arc::new(CameraSensor::new("Main Entrance"));
    let security = Arc::new(SecuritySensor::new());
    lot.subscribe(&occupancy);
    lot.subscribe(&camera);
    lot.subscribe(&security);

    // 5. Run the walkthrough
    let report = scenario::run(&lot, &engine).expect("walkthrough failed");

    for quote in &report.quotes {
        tracing::info!(strategy = quote.strategy, amount = %quote.amount, "two-hour standard quote");
    }
    let billed: common::Money = report.receipts.iter().map(|r| r.amount).sum();
    tracing::info!(receipts = report.receipts.len(), total = %billed, "billing complete");
    if let Some(plate) = &report.rejected {
        tracing::info!(%plate, filled = report.filled, "lot full, vehicle turned away");
    }

    let reading = occupancy.reading();
    tracing::info!(
        occupied = reading.occupied,
        free = reading.free,
        critical_alerts = reading.critical_alerts,
        camera_records = camera.records().len(),
        security_alerts = security.alerts().len(),
        "sensor summary"
    );

    // 6. Persist and report metrics
    if let Err(e) = lot.save_state().await {
        tracing::error!(error = %e, path = %config.state_path.display(), "state not saved");
    }

    println!("{}", metrics_handle.render());
}
