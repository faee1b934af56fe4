//! Shared camera target.
//!
//! One record per scene. Props write to it when they gain or lose focus; the camera-follow
//! collaborator reads it every frame and smooths toward it. Writes only happen on state-entry
//! transitions, so there is at most one writer per frame.

use std::sync::{Arc, Mutex, PoisonError};

use nalgebra::{Point3, UnitQuaternion};

/// World-space position + orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub translation: Point3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

impl Pose {
    #[inline]
    pub fn new(translation: Point3<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    #[inline]
    pub fn from_translation(translation: Point3<f32>) -> Self {
        Self::new(translation, UnitQuaternion::identity())
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::from_translation(Point3::origin())
    }
}

/// Cloneable handle to the scene's camera target.
///
/// Every clone points at the same record; the scene creates it once and hands a clone to each
/// prop at construction.
#[derive(Clone, Debug, Default)]
pub struct CameraTarget {
    pose: Arc<Mutex<Pose>>,
}

impl CameraTarget {
    pub fn new(initial: Pose) -> Self {
        Self {
            pose: Arc::new(Mutex::new(initial)),
        }
    }

    /// Overwrite the target pose.
    pub fn set_target(&self, pose: Pose) {
        let mut guard = self.pose.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = pose;
    }

    /// Current target pose.
    pub fn pose(&self) -> Pose {
        *self.pose.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
