use bevy::prelude::*;
use prop_shared::{DEFAULT_FIXED_DT, PropWorld};

use crate::{convert::pose_to_transform, props::Prop};

/// The Rapier world every prop body lives in.
#[derive(Resource, Default)]
pub struct Physics(pub PropWorld);

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(Time::<Fixed>::from_seconds(DEFAULT_FIXED_DT as f64));
    app.init_resource::<Physics>();

    app.add_systems(FixedUpdate, step_world);
    app.add_systems(Update, sync_transforms);
}

pub fn step_world(mut physics: ResMut<Physics>, time: Res<Time>) {
    physics.0.step(time.delta_secs());
}

/// Rapier owns prop poses; mirror them into the render transforms.
fn sync_transforms(physics: Res<Physics>, mut props: Query<(&Prop, &mut Transform)>) {
    for (prop, mut transform) in &mut props {
        if let Some(pose) = physics.0.pose(prop.body) {
            *transform = pose_to_transform(pose).with_scale(transform.scale);
        }
    }
}
