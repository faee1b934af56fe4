//! Interactive props: spawning, pointer routing and the fixed-rate behavior tick.

use std::sync::Arc;

use bevy::{picking::pointer::PointerInteraction, prelude::*, window::PrimaryWindow};
use leafwing_input_manager::prelude::ActionState;
use nalgebra::{Point3, Vector2, Vector3};
use prop_shared::{
    Behavior, InteractiveObject, NoProjector, PointerProjector, PointerSample, Pose, PropBodyDef,
    PropConfig, SceneLinks, rapier_world::rapier3d::prelude::RigidBodyHandle,
};

use crate::{
    camera::SceneCamera,
    convert::{to_point, to_screen, to_vec3},
    input::InputAction,
    physics::{Physics, step_world},
    talk_text::TalkText,
    world::SceneAnchor,
};

const PROP_HALF_EXTENT: f32 = 0.25;
/// 8 kg/m^3 gives a 0.5 m cube a mass of 1 kg, so hop speeds read directly as impulses.
const PROP_DENSITY: f32 = 8.0;
const HOVER_GLOW: LinearRgba = LinearRgba::rgb(0.25, 0.2, 0.05);

/// A prop in the scene: its interaction state plus the Rapier body it drives.
#[derive(Component)]
pub struct Prop {
    pub object: InteractiveObject,
    pub body: RigidBodyHandle,
}

/// The prop the pointer went down on, until the pointer comes back up.
#[derive(Resource, Default)]
struct Grabbed(Option<Entity>);

struct PropSpawn {
    name: &'static str,
    at: Vec3,
    color: Color,
    behavior: Behavior,
    script: &'static [&'static str],
    half_extents: Vec3,
}

const PROPS: &[PropSpawn] = &[
    PropSpawn {
        name: "Teapot",
        at: Vec3::new(-2.0, PROP_HALF_EXTENT, 1.0),
        color: Color::srgb(0.49, 0.56, 1.0),
        behavior: Behavior::Interactive,
        script: &["Oh! Hello there.", "I've been hopping about all day."],
        half_extents: Vec3::splat(PROP_HALF_EXTENT),
    },
    PropSpawn {
        name: "Lantern",
        at: Vec3::new(1.5, PROP_HALF_EXTENT, -1.0),
        color: Color::srgb(1.0, 0.75, 0.3),
        behavior: Behavior::Interactive,
        script: &["Mind the fence.", "It's taller than it looks."],
        half_extents: Vec3::splat(PROP_HALF_EXTENT),
    },
    PropSpawn {
        name: "Crate",
        at: Vec3::new(3.0, PROP_HALF_EXTENT, 2.5),
        color: Color::srgb(0.6, 0.42, 0.25),
        behavior: Behavior::Interactive,
        script: &[],
        half_extents: Vec3::splat(PROP_HALF_EXTENT),
    },
    PropSpawn {
        name: "Letter",
        at: Vec3::new(0.0, 0.05, 3.0),
        color: Color::srgb(0.95, 0.93, 0.85),
        behavior: Behavior::Ambient,
        script: &[],
        half_extents: Vec3::new(0.2, 0.05, 0.15),
    },
];

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<Grabbed>();

    app.add_systems(Startup, spawn_props);
    app.add_systems(Update, (route_pointer, track_hover).chain());
    app.add_systems(FixedUpdate, tick_props.before(step_world));
}

fn spawn_props(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut physics: ResMut<Physics>,
    camera: Res<SceneCamera>,
    anchor: Res<SceneAnchor>,
    talk: Res<TalkText>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();

    for spawn in PROPS {
        let links = SceneLinks::new(camera.0.clone(), anchor.0)
            .with_talk_text(Arc::new(talk.0.clone()));
        let config = PropConfig {
            behavior: spawn.behavior,
            script: spawn.script.iter().map(|line| line.to_string()).collect(),
            ..default()
        };
        let object = match InteractiveObject::new(config, links, now) {
            Ok(object) => object,
            Err(err) => {
                error!("Skipping prop {}: {err}", spawn.name);
                continue;
            }
        };

        let half = spawn.half_extents;
        let body = physics.0.spawn_prop(&PropBodyDef {
            density: PROP_DENSITY,
            ..PropBodyDef::cuboid(
                Pose::from_translation(to_point(spawn.at)),
                Vector3::new(half.x, half.y, half.z),
            )
        });
        object.prepare_body(&mut physics.0.body(body));

        let mut entity = commands.spawn((
            Name::new(spawn.name),
            Mesh3d(meshes.add(Cuboid::from_size(half * 2.0))),
            MeshMaterial3d(materials.add(spawn.color)),
            Transform::from_translation(spawn.at),
            Prop { object, body },
        ));
        // Ambient props can't be clicked, so they shouldn't block the pointer either.
        if spawn.behavior == Behavior::Interactive {
            entity.insert(Pickable::default());
        } else {
            entity.insert(Pickable::IGNORE);
        }
    }
}

/// Projects screen positions through the scene camera onto a camera-facing plane.
struct CameraProjector<'a> {
    camera: &'a Camera,
    transform: &'a GlobalTransform,
}

impl PointerProjector for CameraProjector<'_> {
    fn project(&self, screen: Vector2<f32>, depth_anchor: Point3<f32>) -> Option<Point3<f32>> {
        let ray = self
            .camera
            .viewport_to_world(self.transform, Vec2::new(screen.x, screen.y))
            .ok()?;
        let plane = InfinitePlane3d::new(self.transform.forward());
        let distance = ray.intersect_plane(to_vec3(depth_anchor), plane)?;
        Some(to_point(ray.get_point(distance)))
    }
}

/// Feed pointer down/held/up into the prop the pointer went down on.
fn route_pointer(
    actions: Res<ActionState<InputAction>>,
    interactions: Query<&PointerInteraction>,
    window: Single<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    time: Res<Time>,
    mut grabbed: ResMut<Grabbed>,
    mut props: Query<&mut Prop>,
    mut physics: ResMut<Physics>,
) {
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let sample = PointerSample::new(to_screen(cursor), time.elapsed_secs());

    if actions.just_pressed(&InputAction::Grab) {
        let Ok(interaction) = interactions.single() else {
            return;
        };
        let Some((entity, _hit)) = interaction.get_nearest_hit() else {
            return;
        };
        let Ok(mut prop) = props.get_mut(*entity) else {
            return;
        };

        let prop = &mut *prop;
        let body = physics.0.body(prop.body);
        match cameras.single() {
            Ok((camera, transform)) => {
                let projector = CameraProjector { camera, transform };
                prop.object.pointer_down(sample, &body, &projector);
            }
            Err(_) => prop.object.pointer_down(sample, &body, &NoProjector),
        }
        grabbed.0 = Some(*entity);
        return;
    }

    let Some(entity) = grabbed.0 else {
        return;
    };
    let Ok(mut prop) = props.get_mut(entity) else {
        grabbed.0 = None;
        return;
    };
    let prop = &mut *prop;
    let mut body = physics.0.body(prop.body);

    let transition = if actions.just_released(&InputAction::Grab) {
        grabbed.0 = None;
        prop.object.pointer_up(sample, &mut body)
    } else if actions.pressed(&InputAction::Grab) {
        prop.object.pointer_drag(sample, &mut body)
    } else {
        // Release happened while the cursor was outside the window.
        grabbed.0 = None;
        prop.object.pointer_up(sample, &mut body)
    };

    if let Some(t) = transition {
        debug!("{entity}: {:?} -> {:?}", t.from, t.to);
    }
}

fn track_hover(
    interactions: Query<&PointerInteraction>,
    mut props: Query<(Entity, &mut Prop, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let hovered = interactions
        .single()
        .ok()
        .and_then(|interaction| interaction.get_nearest_hit())
        .map(|(entity, _)| *entity);

    for (entity, mut prop, material) in &mut props {
        let is_hovered = hovered == Some(entity);
        if prop.object.is_hovered() == is_hovered {
            continue;
        }
        prop.object.on_hover(is_hovered);

        if let Some(material) = materials.get_mut(&material.0) {
            material.emissive = if is_hovered {
                HOVER_GLOW
            } else {
                LinearRgba::BLACK
            };
        }
    }
}

/// Fixed-rate behavior: wandering hops for idle props, pointer tracking while dragged.
fn tick_props(
    mut props: Query<&mut Prop>,
    mut physics: ResMut<Physics>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();
    match cameras.single() {
        Ok((camera, transform)) => {
            tick_all(&mut props, &mut physics, now, &CameraProjector { camera, transform })
        }
        Err(_) => tick_all(&mut props, &mut physics, now, &NoProjector),
    }
}

fn tick_all(
    props: &mut Query<&mut Prop>,
    physics: &mut Physics,
    now: f32,
    projector: &impl PointerProjector,
) {
    for mut prop in props.iter_mut() {
        let prop = &mut *prop;
        prop.object
            .fixed_tick(now, &mut physics.0.body(prop.body), projector);
    }
}
