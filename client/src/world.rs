use bevy::prelude::*;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use prop_shared::{CameraTarget, ColliderShapeDef, Pose, PropWorld, WorldStaticDef};

use crate::{camera::SceneCamera, convert::to_vec3, physics::Physics};

/// Half the side of the fenced play area, in meters.
const ARENA_HALF: f32 = 8.0;
const WALL_HALF_THICKNESS: f32 = 0.25;
const WALL_HALF_HEIGHT: f32 = 1.0;

const ROCK_CENTER: Vec3 = Vec3::new(-3.0, 0.0, 4.0);
const ROCK_RADIUS: f32 = 0.8;

/// Where the camera returns when no prop is focused.
#[derive(Resource, Clone, Copy)]
pub struct SceneAnchor(pub Pose);

pub(super) fn plugin(app: &mut App) {
    let anchor = Pose::from_translation(Point3::new(0.0, 0.5, 0.0));
    app.insert_resource(SceneAnchor(anchor));
    app.insert_resource(SceneCamera(CameraTarget::new(anchor)));
    app.insert_resource(Physics(PropWorld::new(scenery())));

    app.add_systems(Startup, setup);
}

/// Static colliders: the ground, a low fence around the arena and a boulder to bump into.
fn scenery() -> Vec<WorldStaticDef> {
    let mut statics = vec![WorldStaticDef {
        id: 0,
        translation: Vector3::zeros(),
        rotation: UnitQuaternion::identity(),
        shape: ColliderShapeDef::Plane {
            offset_along_normal: 0.0,
        },
    }];

    let along_x = Vector3::new(ARENA_HALF, WALL_HALF_HEIGHT, WALL_HALF_THICKNESS);
    let along_z = Vector3::new(WALL_HALF_THICKNESS, WALL_HALF_HEIGHT, ARENA_HALF);
    let walls = [
        (Vector3::new(0.0, WALL_HALF_HEIGHT, ARENA_HALF), along_x),
        (Vector3::new(0.0, WALL_HALF_HEIGHT, -ARENA_HALF), along_x),
        (Vector3::new(ARENA_HALF, WALL_HALF_HEIGHT, 0.0), along_z),
        (Vector3::new(-ARENA_HALF, WALL_HALF_HEIGHT, 0.0), along_z),
    ];
    for (id, (translation, half_extents)) in (1..).zip(walls) {
        statics.push(WorldStaticDef {
            id,
            translation,
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Cuboid { half_extents },
        });
    }

    statics.push(WorldStaticDef {
        id: 5,
        translation: Vector3::new(ROCK_CENTER.x, ROCK_CENTER.y, ROCK_CENTER.z),
        rotation: UnitQuaternion::identity(),
        shape: ColliderShapeDef::Sphere {
            radius: ROCK_RADIUS,
        },
    });
    statics
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    anchor: Res<SceneAnchor>,
) {
    info!("World setup, camera anchor at {:?}", to_vec3(anchor.0.translation));

    commands.spawn((
        Name::new("Ground"),
        Pickable::default(),
        Transform::from_xyz(0., 0., 0.),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(50., 50.).build())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::linear_rgb(0.2, 0.3, 0.25),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
    ));

    let fence = materials.add(Color::srgb_u8(139, 115, 85));
    for def in scenery() {
        if let ColliderShapeDef::Cuboid { half_extents } = def.shape {
            commands.spawn((
                Name::new("Fence"),
                Mesh3d(meshes.add(Cuboid::new(
                    half_extents.x * 2.0,
                    half_extents.y * 2.0,
                    half_extents.z * 2.0,
                ))),
                MeshMaterial3d(fence.clone()),
                Transform::from_xyz(def.translation.x, def.translation.y, def.translation.z),
            ));
        }
    }

    commands.spawn((
        Name::new("Boulder"),
        Pickable::default(),
        Mesh3d(meshes.add(Sphere::new(ROCK_RADIUS))),
        MeshMaterial3d(materials.add(Color::srgb_u8(120, 120, 128))),
        Transform::from_translation(ROCK_CENTER),
    ));

    // light
    commands.spawn((
        PointLight {
            shadows_enabled: true,
            range: 40.0,
            intensity: 4_000_000.0,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0),
    ));
}
