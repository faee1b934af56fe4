pub mod body;
pub mod camera;
pub mod constants;
pub mod dialogue;
pub mod effects;
pub mod gesture;
pub mod interaction;
pub mod movement;
pub mod rapier_world;
pub mod settings;
pub mod tween;

pub use body::{NoProjector, PhysicsBody, PointerProjector};
pub use camera::{CameraTarget, Pose};
pub use constants::{
    CLICK_THRESHOLD_SECS, DEFAULT_FIXED_DT, EFFECT_LIFETIME_SECS, LOOK_ROTATION_SECS,
};
pub use dialogue::{DialogueProgress, SharedText, TextSink};
pub use effects::{DeferredQueue, EffectRequest, TaskId};
pub use gesture::{Gesture, PointerSample, classify, is_held};
pub use interaction::{InteractiveObject, PropState, SceneLinks, Transition};
pub use movement::{Hop, MovementDriver};
pub use rapier_world::{ColliderShapeDef, PropBodyDef, PropWorld, RapierBody, WorldStaticDef};
pub use settings::{Behavior, ConfigError, MovementTuning, PropConfig, TuningRange};
pub use tween::RotationTween;
