use bevy::prelude::*;
use prop_shared::SharedText;

/// Dialogue line shown for the focused prop. Props write into the shared buffer; the UI reads it.
#[derive(Resource, Clone, Default)]
pub struct TalkText(pub SharedText);

#[derive(Component)]
struct TalkTextNode;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<TalkText>();
    app.add_systems(Startup, spawn_talk_text);
    app.add_systems(Update, mirror_talk_text);
}

fn spawn_talk_text(mut commands: Commands) {
    commands.spawn((
        Name::new("Talk text"),
        TalkTextNode,
        Text::new(""),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(32.0),
            left: Val::Px(32.0),
            ..default()
        },
    ));
}

fn mirror_talk_text(talk: Res<TalkText>, mut node: Single<&mut Text, With<TalkTextNode>>) {
    let line = talk.0.text();
    if node.0 != line {
        node.0 = line;
    }
}
