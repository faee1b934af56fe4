use bevy::{camera::Exposure, prelude::*};
use prop_shared::CameraTarget;

use crate::convert::to_vec3;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
    app.add_systems(PostUpdate, follow_target);
}

/// Where the camera sits relative to whatever it is looking at.
pub const CAMERA_OFFSET_GLOBAL: Vec3 = Vec3::new(0.0, 6.0, -9.0);
const CAMERA_DECAY_RATE: f32 = 4.0;

/// The camera target shared with every prop. Focusing a prop writes its pose here, unfocusing
/// writes the scene's default anchor back.
#[derive(Resource, Clone, Default)]
pub struct SceneCamera(pub CameraTarget);

fn add_camera(mut commands: Commands, target: Res<SceneCamera>) {
    let look_at = to_vec3(target.0.pose().translation);
    commands.spawn((
        Exposure { ev100: 9.7 },
        bevy::core_pipeline::tonemapping::Tonemapping::AcesFitted,
        Camera3d::default(),
        Transform::from_translation(look_at + CAMERA_OFFSET_GLOBAL).looking_at(look_at, Vec3::Y),
        DistanceFog {
            color: Color::srgba(0.35, 0.48, 0.66, 1.0),
            directional_light_color: Color::srgba(1.0, 0.95, 0.85, 0.5),
            directional_light_exponent: 30.0,
            falloff: FogFalloff::from_visibility_colors(
                200.0,
                Color::srgb(0.35, 0.5, 0.66),
                Color::srgb(0.8, 0.8, 0.7),
            ),
        },
    ));
}

fn follow_target(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    target: Res<SceneCamera>,
    time: Res<Time>,
) {
    let Ok(mut cam_tf) = camera_query.single_mut() else {
        return;
    };

    let look_at = to_vec3(target.0.pose().translation);
    let dt = time.delta_secs();

    cam_tf
        .translation
        .smooth_nudge(&(look_at + CAMERA_OFFSET_GLOBAL), CAMERA_DECAY_RATE, dt);

    let facing = cam_tf.looking_at(look_at, Vec3::Y).rotation;
    let t = 1.0 - (-CAMERA_DECAY_RATE * dt).exp();
    cam_tf.rotation = cam_tf.rotation.slerp(facing, t);
}
