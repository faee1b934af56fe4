//! Click effects and the deadline queue that cleans them up.

use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::constants::{EFFECT_LIFETIME_SECS, EFFECT_YAW_DEGREES};

/// Request to spawn a short-lived visual effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectRequest {
    pub position: Point3<f32>,
    pub rotation: UnitQuaternion<f32>,
    /// Seconds until the effect should be removed.
    pub lifetime: f32,
}

impl EffectRequest {
    /// Standard click burst at a world point.
    pub fn click_at(position: Point3<f32>) -> Self {
        Self {
            position,
            rotation: UnitQuaternion::from_axis_angle(
                &Vector3::y_axis(),
                EFFECT_YAW_DEGREES.to_radians(),
            ),
            lifetime: EFFECT_LIFETIME_SECS,
        }
    }
}

/// Handle returned by [`DeferredQueue::schedule`], used to cancel an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// One-shot tasks keyed by deadline.
///
/// Polled once per frame with the current time. Each entry is handed back exactly once, in
/// deadline order (ties in scheduling order). Cancelling removes the entry before it fires.
#[derive(Clone, Debug)]
pub struct DeferredQueue<T> {
    // Kept sorted by (deadline, id).
    entries: Vec<(f32, TaskId, T)>,
    next_id: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedule `item` to come due at `deadline`.
    pub fn schedule(&mut self, deadline: f32, item: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        // Insert after every entry with an earlier-or-equal deadline.
        let at = self.entries.partition_point(|(d, _, _)| *d <= deadline);
        self.entries.insert(at, (deadline, id, item));
        id
    }

    /// Remove a pending entry. Returns it if it hadn't fired yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let index = self.entries.iter().position(|(_, i, _)| *i == id)?;
        Some(self.entries.remove(index).2)
    }

    /// Remove and return every entry whose deadline is `<= now`.
    pub fn drain_due(&mut self, now: f32) -> Vec<T> {
        let due = self.entries.partition_point(|(d, _, _)| *d <= now);
        self.entries.drain(..due).map(|(_, _, item)| item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_effect_uses_fixed_yaw_and_lifetime() {
        let request = EffectRequest::click_at(Point3::new(1.0, 0.0, 2.0));
        assert_eq!(request.position, Point3::new(1.0, 0.0, 2.0));
        assert!((request.rotation.angle() - std::f32::consts::FRAC_PI_2).abs() < 1.0e-5);
        assert_eq!(request.lifetime, 1.0);
    }

    #[test]
    fn entries_fire_once_in_deadline_order() {
        let mut queue = DeferredQueue::new();
        queue.schedule(3.0, "c");
        queue.schedule(1.0, "a");
        queue.schedule(2.0, "b");
        queue.schedule(1.0, "a2");

        assert!(queue.drain_due(0.5).is_empty());
        assert_eq!(queue.drain_due(1.0), vec!["a", "a2"]);
        assert_eq!(queue.drain_due(1.0), Vec::<&str>::new());
        assert_eq!(queue.drain_due(10.0), vec!["b", "c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn cancelled_entries_never_fire() {
        let mut queue = DeferredQueue::new();
        let keep = queue.schedule(1.0, 1);
        let drop = queue.schedule(1.0, 2);

        assert_eq!(queue.cancel(drop), Some(2));
        assert_eq!(queue.cancel(drop), None);
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.drain_due(2.0), vec![1]);
        assert_eq!(queue.cancel(keep), None);
    }
}
