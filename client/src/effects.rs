//! Short-lived bursts where the pointer clicks the scene.

use bevy::{picking::pointer::PointerInteraction, prelude::*};
use leafwing_input_manager::prelude::ActionState;
use prop_shared::{DeferredQueue, EffectRequest};

use crate::{
    convert::{to_point, to_quat, to_vec3},
    input::InputAction,
};

const BURST_RADIUS: f32 = 0.08;
const BURST_GROWTH: f32 = 3.0;

#[derive(Resource)]
struct BurstAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

/// Bursts waiting to be removed, keyed by when their lifetime runs out.
#[derive(Resource, Default)]
struct Expiring(DeferredQueue<Entity>);

#[derive(Component)]
struct ClickBurst {
    spawned_at: f32,
    lifetime: f32,
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<Expiring>();
    app.add_systems(Startup, load_burst_assets);
    app.add_systems(Update, (spawn_click_burst, grow_bursts, expire_bursts));
}

fn load_burst_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(BurstAssets {
        mesh: meshes.add(Sphere::new(BURST_RADIUS)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 0.9, 0.5, 0.6),
            emissive: LinearRgba::rgb(4.0, 3.0, 1.0),
            alpha_mode: AlphaMode::Blend,
            ..default()
        }),
    });
}

fn spawn_click_burst(
    mut commands: Commands,
    actions: Res<ActionState<InputAction>>,
    interactions: Query<&PointerInteraction>,
    assets: Option<Res<BurstAssets>>,
    mut expiring: ResMut<Expiring>,
    time: Res<Time>,
) {
    if !actions.just_pressed(&InputAction::Grab) {
        return;
    }
    let Some(assets) = assets else {
        return;
    };
    let Ok(interaction) = interactions.single() else {
        return;
    };
    let Some((_entity, hit)) = interaction.get_nearest_hit() else {
        return;
    };
    let Some(pos) = hit.position else {
        return;
    };

    let request = EffectRequest::click_at(to_point(pos));
    let now = time.elapsed_secs();
    let burst = commands
        .spawn((
            Name::new("Click burst"),
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
            Transform::from_translation(to_vec3(request.position))
                .with_rotation(to_quat(request.rotation)),
            Pickable::IGNORE,
            ClickBurst {
                spawned_at: now,
                lifetime: request.lifetime,
            },
        ))
        .id();
    expiring.0.schedule(now + request.lifetime, burst);
}

fn grow_bursts(mut bursts: Query<(&ClickBurst, &mut Transform)>, time: Res<Time>) {
    let now = time.elapsed_secs();
    for (burst, mut transform) in &mut bursts {
        let t = ((now - burst.spawned_at) / burst.lifetime).clamp(0.0, 1.0);
        transform.scale = Vec3::splat(1.0 + BURST_GROWTH * t);
    }
}

fn expire_bursts(mut commands: Commands, mut expiring: ResMut<Expiring>, time: Res<Time>) {
    for entity in expiring.0.drain_due(time.elapsed_secs()) {
        // Something else may have removed it already.
        if let Ok(mut burst) = commands.get_entity(entity) {
            burst.despawn();
        }
    }
}
