use nalgebra::UnitQuaternion;

use crate::constants::LOOK_ROTATION_SECS;

/// Quadratic ease-out: fast start, gentle settle.
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Eased orientation change from `from` to `to` over a fixed duration.
///
/// The tween is sampled with absolute timestamps so it behaves the same at any tick rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationTween {
    from: UnitQuaternion<f32>,
    to: UnitQuaternion<f32>,
    start: f32,
    duration: f32,
}

impl RotationTween {
    pub fn new(
        from: UnitQuaternion<f32>,
        to: UnitQuaternion<f32>,
        start: f32,
        duration: f32,
    ) -> Self {
        Self {
            from,
            to,
            start,
            duration: duration.max(0.0),
        }
    }

    /// Tween with the standard look-rotation duration.
    pub fn look(from: UnitQuaternion<f32>, to: UnitQuaternion<f32>, start: f32) -> Self {
        Self::new(from, to, start, LOOK_ROTATION_SECS)
    }

    /// Normalized progress in `[0, 1]`.
    #[inline]
    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_finished(&self, now: f32) -> bool {
        self.progress(now) >= 1.0
    }

    /// Orientation at `now`.
    pub fn sample(&self, now: f32) -> UnitQuaternion<f32> {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        // `try_slerp` only fails for (near) opposite rotations; fall back to nlerp there.
        let eased = ease_out_quad(t);
        self.from
            .try_slerp(&self.to, eased, 1.0e-6)
            .unwrap_or_else(|| self.from.nlerp(&self.to, eased))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn yaw(deg: f32) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), deg.to_radians())
    }

    #[test]
    fn ease_hits_endpoints_and_clamps() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(-3.0), 0.0);
        assert_eq!(ease_out_quad(7.0), 1.0);
        // Ease-out runs ahead of linear in the middle.
        assert!(ease_out_quad(0.5) > 0.5);
    }

    #[test]
    fn tween_starts_at_from_and_ends_at_to() {
        let tween = RotationTween::look(yaw(0.0), yaw(40.0), 1.0);

        assert!(tween.sample(1.0).angle_to(&yaw(0.0)) < 1.0e-5);
        assert!(tween.sample(0.5).angle_to(&yaw(0.0)) < 1.0e-5);
        assert!(tween.sample(1.2).angle_to(&yaw(40.0)) < 1.0e-5);
        assert!(tween.sample(5.0).angle_to(&yaw(40.0)) < 1.0e-5);
        assert!(tween.is_finished(1.2));
        assert!(!tween.is_finished(1.1));
    }

    #[test]
    fn tween_is_not_a_snap() {
        let tween = RotationTween::look(yaw(0.0), yaw(40.0), 0.0);
        let mid = tween.sample(0.1);

        let from_start = mid.angle_to(&yaw(0.0));
        let to_end = mid.angle_to(&yaw(40.0));
        assert!(from_start > 0.0);
        assert!(to_end > 0.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let tween = RotationTween::new(yaw(0.0), yaw(90.0), 2.0, 0.0);
        assert!(tween.is_finished(2.0));
        assert!(tween.sample(2.0).angle_to(&yaw(90.0)) < 1.0e-5);
    }
}
