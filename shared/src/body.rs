//! Seams between the interaction core and the engine around it.
//!
//! The core never owns a physics body or a camera. It borrows them for the duration of one
//! call through these traits, so the same state machine runs against Rapier, an ECS, or a
//! test double.

use nalgebra::{Point3, UnitQuaternion, Vector2, Vector3};

use crate::camera::Pose;

/// The physics body backing a prop.
///
/// Every method must be a silent no-op when the underlying body no longer exists.
pub trait PhysicsBody {
    /// Current world pose.
    fn pose(&self) -> Pose;

    /// Kinematic bodies ignore gravity and impulses and only move through [`PhysicsBody::move_to`].
    fn set_kinematic(&mut self, kinematic: bool);

    fn is_kinematic(&self) -> bool;

    /// Move a kinematic body to `position` over the next step, colliding on the way.
    fn move_to(&mut self, position: Point3<f32>);

    /// Add an instantaneous change in momentum (world space).
    fn apply_impulse(&mut self, impulse: Vector3<f32>);

    fn set_rotation(&mut self, rotation: UnitQuaternion<f32>);
}

/// Maps a screen-space pointer to a world position.
pub trait PointerProjector {
    /// World position under `screen`, at the same camera depth as `depth_anchor`.
    ///
    /// Returns `None` when there is no active camera or the ray misses the depth plane.
    fn project(&self, screen: Vector2<f32>, depth_anchor: Point3<f32>) -> Option<Point3<f32>>;
}

/// Projector for scenes without a camera. Always fails, so drags degrade to no movement.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProjector;

impl PointerProjector for NoProjector {
    fn project(&self, _screen: Vector2<f32>, _depth_anchor: Point3<f32>) -> Option<Point3<f32>> {
        None
    }
}
