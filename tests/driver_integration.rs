// tests/driver_integration.rs
//! Timer-driven telemetry against the full control panel
#![cfg(feature = "desktop")]

use rover_panel::config::PanelConfig;
use rover_panel::panel::{ControlPanel, PanelEvent};
use rover_panel::telemetry::{FnSink, TelemetryDriver, TickSnapshot};
use std::time::Duration;
use tokio::sync::watch;

fn seeded_config(seed: u64) -> PanelConfig {
    let mut config = PanelConfig::default();
    config.telemetry.seed = Some(seed);
    config.telemetry.tick_interval_ms = 100;
    config
}

#[tokio::test(start_paused = true)]
async fn test_driver_ticks_panel() {
    let config = seeded_config(11);
    let mut panel = ControlPanel::new(&config).expect("Failed to build panel");
    let (_tx, rx) = watch::channel(false);

    let mut collected: Vec<TickSnapshot> = Vec::new();
    let ticks = TelemetryDriver::from_settings(&config.telemetry)
        .with_max_ticks(5)
        .run(&mut panel, &mut collected, rx)
        .await;

    assert_eq!(ticks, 5);
    assert_eq!(panel.bank().ticks(), 5);
    assert!(collected.iter().all(|s| s.readings.len() == 12));
}

#[tokio::test(start_paused = true)]
async fn test_seeded_runs_match_manual_ticks() {
    let config = seeded_config(2024);

    let mut driven = ControlPanel::new(&config).unwrap();
    let (_tx, rx) = watch::channel(false);
    let mut collected: Vec<TickSnapshot> = Vec::new();
    TelemetryDriver::from_settings(&config.telemetry)
        .with_max_ticks(8)
        .run(&mut driven, &mut collected, rx)
        .await;

    let mut manual = ControlPanel::new(&config).unwrap();
    for snapshot in &collected {
        match manual.handle(PanelEvent::Tick).unwrap() {
            rover_panel::PanelOutcome::Ticked(expected) => assert_eq!(expected.readings, snapshot.readings),
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_from_another_task() {
    let config = seeded_config(3);
    let mut panel = ControlPanel::new(&config).unwrap();
    let (tx, rx) = watch::channel(false);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(350)).await;
        let _ = tx.send(true);
    });

    let mut sink = FnSink(|_: &TickSnapshot| {});
    let ticks = TelemetryDriver::from_settings(&config.telemetry)
        .run(&mut panel, &mut sink, rx)
        .await;

    // ticks at 0, 100, 200 and 300 ms
    assert_eq!(ticks, 4);
}
