use log::trace;
use nalgebra::{UnitQuaternion, Vector3};
use rand::{Rng, rngs::StdRng};

use crate::settings::MovementTuning;

/// Local up axis of a prop.
#[inline]
pub fn local_up() -> Vector3<f32> {
    Vector3::y()
}

/// Local forward axis of a prop. Props "face" +Z in their own frame.
#[inline]
pub fn local_forward() -> Vector3<f32> {
    Vector3::z()
}

/// Output of a single hop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hop {
    /// World-space impulse, already rotated into the prop's frame at the moment of the hop.
    pub impulse: Vector3<f32>,
    /// Yaw to apply on top of the current orientation (local frame).
    pub rotation_delta: UnitQuaternion<f32>,
}

impl Hop {
    /// Orientation the prop should ease toward after this hop.
    #[inline]
    pub fn target_rotation(&self, current: UnitQuaternion<f32>) -> UnitQuaternion<f32> {
        current * self.rotation_delta
    }
}

/// Randomized hop scheduler for wandering props.
///
/// Behavior
/// - Does nothing until `now >= next_jump_time`.
/// - On a hop, reschedules `next_jump_time = now + uniform(interval)`.
/// - Draws vertical/horizontal speeds and a yaw in `[-max_angle, max_angle]`.
/// - Expresses the impulse in the prop's current up/forward basis, so a prop hops toward the
///   direction it is facing *before* the new yaw is applied.
#[derive(Clone, Debug)]
pub struct MovementDriver<R: Rng = StdRng> {
    tuning: MovementTuning,
    next_jump_time: f32,
    rng: R,
}

impl<R: Rng> MovementDriver<R> {
    /// Driver that hops on its first tick.
    pub fn new(tuning: MovementTuning, rng: R) -> Self {
        Self {
            tuning,
            next_jump_time: 0.0,
            rng,
        }
    }

    /// Driver whose first hop is one random interval after `now`.
    pub fn with_initial_delay(tuning: MovementTuning, rng: R, now: f32) -> Self {
        let mut driver = Self::new(tuning, rng);
        driver.reschedule(now);
        driver
    }

    #[inline]
    pub fn next_jump_time(&self) -> f32 {
        self.next_jump_time
    }

    /// Advance the driver to `now`, returning a hop if one is due.
    pub fn tick(&mut self, now: f32, orientation: UnitQuaternion<f32>) -> Option<Hop> {
        if now < self.next_jump_time {
            return None;
        }
        self.reschedule(now);

        let max_angle = self.tuning.max_look_angle_degrees.to_radians();
        let yaw = if max_angle > 0.0 {
            self.rng.random_range(-max_angle..=max_angle)
        } else {
            0.0
        };
        let vertical = self.tuning.vertical_speed.sample(&mut self.rng);
        let horizontal = self.tuning.horizontal_speed.sample(&mut self.rng);

        let local = local_up() * vertical + local_forward() * horizontal;
        let hop = Hop {
            impulse: orientation * local,
            rotation_delta: UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw),
        };

        trace!(
            "hop at {now:.3}s: impulse {:?}, yaw {:.1}deg, next at {:.3}s",
            hop.impulse,
            yaw.to_degrees(),
            self.next_jump_time
        );
        Some(hop)
    }

    fn reschedule(&mut self, now: f32) {
        self.next_jump_time = now + self.tuning.interval.sample(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TuningRange;
    use rand::SeedableRng;

    fn tuning() -> MovementTuning {
        MovementTuning {
            interval: TuningRange::new(0.5, 1.0),
            vertical_speed: TuningRange::new(2.0, 4.0),
            horizontal_speed: TuningRange::new(1.0, 2.0),
            max_look_angle_degrees: 30.0,
        }
    }

    fn driver(seed: u64) -> MovementDriver {
        MovementDriver::new(tuning(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn fresh_driver_hops_immediately_and_reschedules() {
        let mut d = driver(1);
        let hop = d.tick(0.0, UnitQuaternion::identity());
        assert!(hop.is_some());
        assert!(tuning().interval.contains(d.next_jump_time()));
    }

    #[test]
    fn delayed_driver_waits_for_first_interval() {
        let mut d = MovementDriver::with_initial_delay(tuning(), StdRng::seed_from_u64(2), 10.0);
        let first = d.next_jump_time();
        assert!(first >= 10.5 && first <= 11.0);
        assert!(d.tick(10.0, UnitQuaternion::identity()).is_none());
        assert!(d.tick(first - 0.001, UnitQuaternion::identity()).is_none());
        assert!(d.tick(first, UnitQuaternion::identity()).is_some());
    }

    #[test]
    fn hop_values_come_from_tuning_ranges() {
        let mut d = driver(3);
        let mut now = 0.0;
        for _ in 0..200 {
            let hop = d.tick(now, UnitQuaternion::identity()).expect("hop due");
            // With identity orientation the impulse is (0, vertical, horizontal).
            assert!(hop.impulse.x.abs() < 1.0e-6);
            assert!(tuning().vertical_speed.contains(hop.impulse.y));
            assert!(tuning().horizontal_speed.contains(hop.impulse.z));
            assert!(hop.rotation_delta.angle() <= 30.0_f32.to_radians() + 1.0e-5);
            now = d.next_jump_time();
        }
    }

    #[test]
    fn impulse_follows_current_facing() {
        let fixed = MovementTuning {
            vertical_speed: TuningRange::fixed(3.0),
            horizontal_speed: TuningRange::fixed(2.0),
            max_look_angle_degrees: 0.0,
            ..tuning()
        };
        let mut d = MovementDriver::new(fixed, StdRng::seed_from_u64(4));

        // Facing +X: a quarter turn about +Y maps local +Z onto world +X.
        let facing_x = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 90.0_f32.to_radians());
        let hop = d.tick(0.0, facing_x).expect("hop due");

        assert!((hop.impulse - Vector3::new(2.0, 3.0, 0.0)).norm() < 1.0e-5);
        assert_eq!(hop.rotation_delta, UnitQuaternion::identity());
    }

    #[test]
    fn never_fires_before_next_jump_time() {
        let mut d = driver(5);
        let dt = 0.02;
        let mut last_fire: Option<f32> = None;
        for step in 0..5_000 {
            let now = step as f32 * dt;
            let scheduled = d.next_jump_time();
            if d.tick(now, UnitQuaternion::identity()).is_some() {
                assert!(now >= scheduled);
                if let Some(prev) = last_fire {
                    assert!(now - prev >= tuning().interval.min - 1.0e-4);
                }
                last_fire = Some(now);
            }
        }
    }

    #[test]
    fn fire_count_is_bounded_by_interval_range() {
        let seconds = 60.0_f32;
        let dt = 0.02;
        let steps = (seconds / dt) as usize;

        for seed in 0..8 {
            let mut d = driver(seed);
            let fires = (0..steps)
                .filter(|step| {
                    d.tick(*step as f32 * dt, UnitQuaternion::identity())
                        .is_some()
                })
                .count();

            let low = (seconds / tuning().interval.max).floor() as usize;
            let high = (seconds / tuning().interval.min).ceil() as usize + 1;
            assert!(
                fires >= low && fires <= high,
                "seed {seed}: {fires} fires outside [{low}, {high}]"
            );
        }
    }

    #[test]
    fn target_rotation_composes_in_local_frame() {
        let current = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.3);
        let hop = Hop {
            impulse: Vector3::zeros(),
            rotation_delta: UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.2),
        };
        let target = hop.target_rotation(current);
        assert!((target.angle() - 0.5).abs() < 1.0e-5);
    }
}
