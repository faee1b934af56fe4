//! Debug/performance tooling for native dev builds.
//!
//! Besides the perf overlay this draws the shared camera target and each prop's state, which
//! is usually the first thing to look at when focus hand-off misbehaves.

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;
use prop_shared::PropState;

use crate::{camera::SceneCamera, convert::to_vec3, props::Prop};

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(Update, (draw_camera_target, draw_prop_states));
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn draw_camera_target(mut gizmos: Gizmos, target: Res<SceneCamera>) {
    let at = to_vec3(target.0.pose().translation);
    gizmos.sphere(Isometry3d::from_translation(at), 0.15, Color::srgb(1.0, 0.2, 0.8));
}

fn state_color(state: PropState) -> Color {
    match state {
        PropState::None => Color::srgb(0.5, 0.5, 0.5),
        PropState::Idle => Color::srgb(0.2, 0.9, 0.3),
        PropState::Dragging => Color::srgb(1.0, 0.6, 0.1),
        PropState::Focused => Color::srgb(0.3, 0.6, 1.0),
    }
}

fn draw_prop_states(mut gizmos: Gizmos, props: Query<(&Prop, &GlobalTransform)>) {
    for (prop, transform) in &props {
        let top = transform.translation() + Vec3::Y * 0.6;
        gizmos.line(transform.translation(), top, state_color(prop.object.state()));
    }
}
