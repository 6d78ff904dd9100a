use proptest::prelude::*;

use super::*;

proptest! {
    #[test]
    fn moving_average_stays_within_window_bounds(
        samples in prop::collection::vec(-10.0f32..10.0, 1..40),
        window in 1usize..10,
    ) {
        let mut f = MovingAverage::new(window);
        for s in &samples {
            f.add_sample(*s);
        }
        let tail = &samples[samples.len().saturating_sub(window)..];
        let lo = tail.iter().cloned().fold(f32::INFINITY, f32::min);
        let hi = tail.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let out = f.smoothed();
        prop_assert!(out >= lo - 1e-4 && out <= hi + 1e-4);
    }

    #[test]
    fn ema_stays_between_previous_state_and_sample(
        first in -5.0f32..5.0,
        next in -5.0f32..5.0,
        alpha in 0.0f32..=1.0,
    ) {
        let mut f = ExponentialMovingAverage::new(alpha);
        f.add_sample(first);
        f.add_sample(next);
        let out = f.smoothed();
        prop_assert!(out >= first.min(next) - 1e-4 && out <= first.max(next) + 1e-4);
    }

    #[test]
    fn one_euro_converges_for_any_constant(value in -100.0f32..100.0) {
        let mut f = OneEuroFilter::new(1.0, 0.007, 1.0);
        f.add_sample(0.0, 0.0);
        for i in 1..400 {
            f.add_sample(value, i as f64 / 30.0);
        }
        prop_assert!((f.smoothed() - value).abs() < 1e-2);
    }
}
