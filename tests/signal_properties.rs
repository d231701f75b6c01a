// tests/signal_properties.rs
//! Property tests for the drifting signal recurrence

use proptest::prelude::*;
use rover_panel::telemetry::{GaussianNoise, ScriptedNoise, SignalError, SignalState};

fn arb_state() -> impl Strategy<Value = SignalState> {
    (
        -1_000.0f64..1_000.0,
        -1_000.0f64..1_000.0,
        0.0f64..50.0,
        0.0f64..1.5,
        0.0f64..0.9,
    )
        .prop_map(|(current, ideal, std_dev, alpha, beta)| {
            SignalState::with_gains(current, ideal, std_dev, alpha, beta).unwrap()
        })
}

proptest! {
    #[test]
    fn prop_fixed_noise_is_deterministic(
        state in arb_state(),
        draws in prop::collection::vec(-10.0f64..10.0, 1..32),
    ) {
        let mut a = state.clone();
        let mut b = state;

        for draw in &draws {
            let left = a.advance(*draw);
            let right = b.advance(*draw);
            prop_assert_eq!(left.to_bits(), right.to_bits());
            prop_assert_eq!(a.last_delta().to_bits(), b.last_delta().to_bits());
        }
    }

    #[test]
    fn prop_seeded_sources_replay(state in arb_state(), seed in any::<u64>()) {
        let mut a = state.clone();
        let mut b = state;
        let mut noise_a = GaussianNoise::seeded(seed);
        let mut noise_b = GaussianNoise::seeded(seed);

        for _ in 0..16 {
            prop_assert_eq!(a.step_with(&mut noise_a), b.step_with(&mut noise_b));
        }
    }

    #[test]
    fn prop_zero_noise_converges(
        current in -1_000.0f64..1_000.0,
        offset in 1e-3f64..500.0,
        above in any::<bool>(),
        alpha in 0.01f64..0.5,
    ) {
        let ideal = if above { current + offset } else { current - offset };
        let mut state = SignalState::with_gains(current, ideal, 0.0, alpha, 0.0).unwrap();

        let mut distance = (ideal - current).abs();
        for _ in 0..10 {
            let value = state.step();
            let next = (ideal - value).abs();
            prop_assert!(next < distance, "distance grew from {} to {}", distance, next);
            // no overshoot: the value stays on the starting side of the setpoint
            prop_assert_eq!(value < ideal, current < ideal);
            distance = next;
        }
    }

    #[test]
    fn prop_at_target_is_fixed_point(ideal in -1_000.0f64..1_000.0, alpha in 0.0f64..2.0, beta in 0.0f64..1.0) {
        let mut state = SignalState::with_gains(ideal, ideal, 0.0, alpha, beta).unwrap();
        state.set_last_delta(0.0);

        for _ in 0..5 {
            prop_assert_eq!(state.step(), ideal);
        }
    }

    #[test]
    fn prop_channels_are_independent(
        first in arb_state(),
        second in arb_state(),
        n1 in -5.0f64..5.0,
        n2 in -5.0f64..5.0,
    ) {
        let (mut a1, mut b1) = (first.clone(), second.clone());
        a1.advance(n1);
        b1.advance(n2);

        let (mut a2, mut b2) = (first, second);
        b2.advance(n2);
        a2.advance(n1);

        prop_assert_eq!(a1, a2);
        prop_assert_eq!(b1, b2);
    }

    #[test]
    fn prop_negative_spread_rejected(std_dev in -1e6f64..-1e-12) {
        prop_assert_eq!(
            SignalState::new(1.0, 1.0, std_dev),
            Err(SignalError::InvalidStdDev(std_dev))
        );
    }
}

#[test]
fn test_construction_validation() {
    assert!(matches!(SignalState::new(3.29, 3.3, -1.0), Err(SignalError::InvalidStdDev(_))));
    assert!(SignalState::new(3.29, 3.3, f64::NAN).is_err());
    assert!(SignalState::new(3.29, 3.3, 0.0).is_ok());
}

#[test]
fn test_worked_example() {
    let mut state = SignalState::new(3.29, 3.30, 0.0).unwrap();
    assert!((state.last_delta() - 0.01).abs() < 1e-12);

    let mut silent = ScriptedNoise::new([0.0, 0.0]);
    let first = state.step_with(&mut silent);
    assert!((state.last_delta() - 0.002).abs() < 1e-9);
    let second = state.step_with(&mut silent);

    assert_eq!(format!("{:.3}", first), "3.292");
    assert_eq!(format!("{:.3}", second), "3.293");
    assert_eq!(silent.remaining(), 0);
}
