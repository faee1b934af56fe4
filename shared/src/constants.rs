/// Press duration (seconds) that separates a click from a drag.
///
/// Convention:
/// - `up - down < CLICK_THRESHOLD_SECS` is a click
/// - anything longer, including exactly the threshold, is a drag
pub const CLICK_THRESHOLD_SECS: f32 = 0.1;

/// Duration (seconds) of the eased look rotation that accompanies each hop.
pub const LOOK_ROTATION_SECS: f32 = 0.2;

/// How long a spawned click effect lives before it is removed (seconds).
pub const EFFECT_LIFETIME_SECS: f32 = 1.0;

/// Yaw (degrees) applied to every click effect.
pub const EFFECT_YAW_DEGREES: f32 = 90.0;

/// Gravity magnitude in meters per second squared (positive value).
pub const GRAVITY_MPS2: f32 = 9.81;

/// Fixed physics step used when the caller doesn't supply one (seconds).
pub const DEFAULT_FIXED_DT: f32 = 1.0 / 50.0;
