use bevy::{
    prelude::*,
    window::{
        CursorEntered, CursorIcon, PrimaryWindow, SystemCursorIcon, WindowFocused, WindowResized,
    },
};
use prop_shared::PropState;

use crate::props::Prop;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CursorKind {
    Default,
    /// Over a prop that can be clicked or grabbed.
    Hover,
    /// A prop is following the pointer.
    Grab,
}

#[derive(Resource)]
struct CurrentCursor(CursorKind);

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(CurrentCursor(CursorKind::Default));

    app.add_systems(Update, pick_cursor);

    // Apply when our desired cursor changes
    app.add_systems(
        Update,
        apply_cursor
            .after(pick_cursor)
            .run_if(resource_changed::<CurrentCursor>),
    );

    // Re-apply on focus/enter to avoid OS/browser resets
    app.add_systems(
        Update,
        (reapply_on_focus, reapply_on_enter, reapply_on_resize),
    );
}

fn icon_for(kind: CursorKind) -> CursorIcon {
    let icon = match kind {
        CursorKind::Default => SystemCursorIcon::Default,
        CursorKind::Hover => SystemCursorIcon::Pointer,
        CursorKind::Grab => SystemCursorIcon::Grabbing,
    };
    CursorIcon::System(icon)
}

fn pick_cursor(props: Query<&Prop>, mut current: ResMut<CurrentCursor>) {
    let mut desired = CursorKind::Default;
    for prop in &props {
        if prop.object.state() == PropState::Dragging {
            desired = CursorKind::Grab;
            break;
        }
        if prop.object.is_hovered() {
            desired = CursorKind::Hover;
        }
    }

    // Only touch the resource on a real change so `resource_changed` stays meaningful.
    if current.0 != desired {
        current.0 = desired;
    }
}

fn apply_cursor(
    mut commands: Commands,
    window: Single<Entity, With<PrimaryWindow>>,
    current: Res<CurrentCursor>,
    q_icon: Query<Option<&CursorIcon>, With<PrimaryWindow>>,
) {
    let desired = icon_for(current.0);

    // Only insert if missing or different
    let needs_update = match q_icon.get(*window) {
        Ok(Some(existing)) => existing != &desired,
        Ok(None) => true,
        Err(_) => true,
    };

    if needs_update {
        commands.entity(*window).insert(desired);
    }
}

fn reapply_on_focus(
    mut commands: Commands,
    mut messages: MessageReader<WindowFocused>,
    window: Single<Entity, With<PrimaryWindow>>,
    current: Res<CurrentCursor>,
) {
    for message in messages.read() {
        if message.focused {
            commands.entity(*window).insert(icon_for(current.0));
        }
    }
}

fn reapply_on_resize(
    mut commands: Commands,
    mut messages: MessageReader<WindowResized>,
    window: Single<Entity, With<PrimaryWindow>>,
    current: Res<CurrentCursor>,
) {
    for _ in messages.read() {
        commands.entity(*window).insert(icon_for(current.0));
    }
}

fn reapply_on_enter(
    mut commands: Commands,
    mut messages: MessageReader<CursorEntered>,
    window: Single<Entity, With<PrimaryWindow>>,
    current: Res<CurrentCursor>,
) {
    for _ in messages.read() {
        commands.entity(*window).insert(icon_for(current.0));
    }
}
