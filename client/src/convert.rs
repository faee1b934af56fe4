//! Glue between Bevy's glam types and the nalgebra types the prop core speaks.

use bevy::prelude::*;
use nalgebra::{Point3, UnitQuaternion, Vector2};
use prop_shared::Pose;

pub fn to_vec3(p: Point3<f32>) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

pub fn to_point(v: Vec3) -> Point3<f32> {
    Point3::new(v.x, v.y, v.z)
}

pub fn to_screen(v: Vec2) -> Vector2<f32> {
    Vector2::new(v.x, v.y)
}

pub fn to_quat(q: UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

pub fn pose_to_transform(pose: Pose) -> Transform {
    Transform::from_translation(to_vec3(pose.translation)).with_rotation(to_quat(pose.rotation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_matches_on_both_sides() {
        let q = UnitQuaternion::from_euler_angles(0.1, 0.7, -0.3);
        let v = to_quat(q) * Vec3::Z;
        let w = q * nalgebra::Vector3::z();
        assert!((v - Vec3::new(w.x, w.y, w.z)).length() < 1.0e-5);
    }

    #[test]
    fn pose_maps_onto_transform() {
        let pose = Pose::from_translation(Point3::new(1.0, 2.0, 3.0));
        let transform = pose_to_transform(pose);
        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }
}
