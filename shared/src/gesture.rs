//! Click-vs-drag classification for a single pointer press.
//!
//! A gesture is fully described by two timestamps: when the pointer went down and when it
//! came back up (or "now", while it is still held). There is exactly one breakpoint:
//! anything strictly shorter than the threshold is a click, everything else is a drag.

use nalgebra::Vector2;

/// Outcome of a completed press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Click,
    Drag,
}

/// Pointer state captured at pointer-down.
///
/// Only lives for the duration of one press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Screen-space pointer position (pixels, origin top-left).
    pub screen: Vector2<f32>,
    /// Monotonic timestamp in seconds.
    pub time: f32,
}

impl PointerSample {
    #[inline]
    pub fn new(screen: Vector2<f32>, time: f32) -> Self {
        Self { screen, time }
    }
}

/// Classify a press that went down at `down_time` and was released at `up_time`.
#[inline]
pub fn classify(down_time: f32, up_time: f32, threshold_secs: f32) -> Gesture {
    if up_time - down_time < threshold_secs {
        Gesture::Click
    } else {
        Gesture::Drag
    }
}

/// Has a press that started at `down_time` been held long enough to count as a drag at `now`?
///
/// Shares the breakpoint with [`classify`], so a press that becomes a drag while held is
/// also classified as a drag on release.
#[inline]
pub fn is_held(down_time: f32, now: f32, threshold_secs: f32) -> bool {
    classify(down_time, now, threshold_secs) == Gesture::Drag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CLICK_THRESHOLD_SECS;

    #[test]
    fn short_press_is_a_click() {
        assert_eq!(classify(1.0, 1.05, CLICK_THRESHOLD_SECS), Gesture::Click);
        assert_eq!(classify(0.0, 0.0, CLICK_THRESHOLD_SECS), Gesture::Click);
    }

    #[test]
    fn threshold_boundary_resolves_to_drag() {
        // Exact binary fractions so the subtraction lands on the threshold exactly.
        assert_eq!(classify(0.5, 0.75, 0.25), Gesture::Drag);
        assert!(is_held(0.5, 0.75, 0.25));
    }

    #[test]
    fn long_press_is_a_drag() {
        assert_eq!(classify(2.0, 2.15, CLICK_THRESHOLD_SECS), Gesture::Drag);
        assert_eq!(classify(2.0, 10.0, CLICK_THRESHOLD_SECS), Gesture::Drag);
    }

    #[test]
    fn classification_is_monotonic_in_elapsed_time() {
        // Sweep elapsed time and make sure we flip from Click to Drag exactly once.
        let mut flips = 0;
        let mut prev = classify(0.0, 0.0, CLICK_THRESHOLD_SECS);
        for i in 1..=400 {
            let elapsed = i as f32 * 0.001;
            let g = classify(0.0, elapsed, CLICK_THRESHOLD_SECS);
            if g != prev {
                assert_eq!(prev, Gesture::Click);
                assert_eq!(g, Gesture::Drag);
                flips += 1;
            }
            prev = g;
        }
        assert_eq!(flips, 1);
    }

    #[test]
    fn held_matches_release_classification() {
        for &(down, now) in &[(0.0, 0.02), (1.0, 1.2), (3.0, 3.5), (4.0, 4.0999)] {
            let held = is_held(down, now, CLICK_THRESHOLD_SECS);
            let drag = classify(down, now, CLICK_THRESHOLD_SECS) == Gesture::Drag;
            assert_eq!(held, drag);
        }
    }
}
