use std::rc::Rc;

use proptest::prelude::*;

use super::*;
use crate::config::GestureConfig;
use crate::detectors::fixtures::{open_palm, translated};
use crate::landmarks::HandFrame;
use crate::time::ManualClock;

proptest! {
    #[test]
    fn history_keeps_the_most_recent_frames(count in 0usize..100, capacity in 1usize..40) {
        let mut history = HandHistory::with_capacity(capacity);
        for i in 0..count {
            history.push(HandFrame::new(0, Vec::new(), i as f64));
        }
        prop_assert_eq!(history.len(), count.min(capacity));
        let first = count.saturating_sub(capacity);
        let stamps: Vec<f64> = history.iter().map(|f| f.timestamp).collect();
        let expected: Vec<f64> = (first..count).map(|i| i as f64).collect();
        prop_assert_eq!(stamps, expected);
    }

    #[test]
    fn swipes_closer_than_debounce_emit_once(debounce in 50.0f64..1000.0, fraction in 0.0f64..0.99) {
        let clock = ManualClock::new(0.0);
        let mut config = GestureConfig::default();
        config.swipe.debounce_ms = debounce;
        let mut engine = GestureEngine::with_default_detectors(config, RecordingSink::new(), Rc::new(clock.clone()));
        engine.apply_preset(Preset::Navigation);

        let left = translated(&open_palm(), -0.2, 0.0);
        let right = open_palm();
        engine.process_frame(HandFrame::new(0, left.clone(), 0.0));
        engine.process_frame(HandFrame::new(0, right.clone(), 100.0));

        // Same qualifying motion again, `gap` ms after the first swipe
        let gap = debounce * fraction;
        clock.set(gap);
        engine.process_frame(HandFrame::new(0, left, 200.0));
        engine.process_frame(HandFrame::new(0, right, 300.0));

        prop_assert_eq!(engine.sink().count("gesture:swipe:right"), 1);
    }
}
