/*!
Per-prop tuning and validation.

Every prop carries its own copy of these values. Defaults are sensible for a ~0.5 m prop with a
mass of about 1 kg; the client overrides them per prop where it wants variety.

Notes
- Distances are in meters, time in seconds, angles in degrees.
- Ranges are closed intervals sampled uniformly.
- Validation happens once at construction. Nothing here is checked per tick.
*/

use rand::Rng;
use thiserror::Error;

use crate::constants::CLICK_THRESHOLD_SECS;

/// Rejected configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name}: min {min} is greater than max {max}")]
    InvertedRange { name: &'static str, min: f32, max: f32 },

    #[error("{name}: value must be finite")]
    NonFinite { name: &'static str },

    #[error("{name}: value must not be negative (got {value})")]
    Negative { name: &'static str, value: f32 },
}

/// Closed interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TuningRange {
    pub min: f32,
    pub max: f32,
}

impl TuningRange {
    #[inline]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Degenerate range that always samples `value`.
    #[inline]
    pub const fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    /// Draw a value uniformly from the closed interval.
    ///
    /// Callers are expected to have run [`TuningRange::validate`] first.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.random_range(self.min..=self.max)
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NonFinite { name });
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    fn validate_non_negative(&self, name: &'static str) -> Result<(), ConfigError> {
        self.validate(name)?;
        if self.min < 0.0 {
            return Err(ConfigError::Negative {
                name,
                value: self.min,
            });
        }
        Ok(())
    }
}

/// Wander tuning: how often a prop hops, how hard, and how far it turns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementTuning {
    /// Seconds between hops.
    pub interval: TuningRange,
    /// Impulse along the prop's local up axis.
    pub vertical_speed: TuningRange,
    /// Impulse along the prop's local forward axis.
    pub horizontal_speed: TuningRange,
    /// Each hop turns the prop by a random yaw in `[-max, max]` degrees.
    pub max_look_angle_degrees: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            interval: TuningRange::new(1.0, 3.0),
            vertical_speed: TuningRange::new(2.0, 4.0),
            horizontal_speed: TuningRange::new(0.5, 1.5),
            max_look_angle_degrees: 45.0,
        }
    }
}

impl MovementTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.interval.validate_non_negative("interval")?;
        self.vertical_speed.validate("vertical_speed")?;
        self.horizontal_speed.validate("horizontal_speed")?;

        let angle = self.max_look_angle_degrees;
        if !angle.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "max_look_angle_degrees",
            });
        }
        if angle < 0.0 {
            return Err(ConfigError::Negative {
                name: "max_look_angle_degrees",
                value: angle,
            });
        }
        Ok(())
    }
}

/// Which capabilities a prop exposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Behavior {
    /// Wanders, can be dragged, and focuses on click.
    #[default]
    Interactive,
    /// Wanders from the moment it spawns and ignores pointer presses (letter props).
    Ambient,
}

/// Everything needed to build one prop.
#[derive(Clone, Debug, PartialEq)]
pub struct PropConfig {
    pub behavior: Behavior,
    pub movement: MovementTuning,
    /// Dialogue lines shown while focused.
    pub script: Vec<String>,
    /// Steps consumed each time the prop gains focus.
    ///
    /// Zero keeps the prop on its first line forever.
    pub advance_per_focus: usize,
    pub click_threshold_secs: f32,
}

impl Default for PropConfig {
    fn default() -> Self {
        Self {
            behavior: Behavior::default(),
            movement: MovementTuning::default(),
            script: Vec::new(),
            advance_per_focus: 0,
            click_threshold_secs: CLICK_THRESHOLD_SECS,
        }
    }
}

impl PropConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate()?;
        if !self.click_threshold_secs.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "click_threshold_secs",
            });
        }
        if self.click_threshold_secs < 0.0 {
            return Err(ConfigError::Negative {
                name: "click_threshold_secs",
                value: self.click_threshold_secs,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn defaults_are_valid() {
        assert_eq!(PropConfig::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let config = PropConfig {
            movement: MovementTuning {
                vertical_speed: TuningRange::new(5.0, 1.0),
                ..MovementTuning::default()
            },
            ..PropConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                name: "vertical_speed",
                min: 5.0,
                max: 1.0
            })
        );
    }

    #[test]
    fn negative_interval_and_angle_are_rejected() {
        let tuning = MovementTuning {
            interval: TuningRange::new(-1.0, 1.0),
            ..MovementTuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Negative {
                name: "interval",
                ..
            })
        ));

        let tuning = MovementTuning {
            max_look_angle_degrees: -10.0,
            ..MovementTuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Negative {
                name: "max_look_angle_degrees",
                ..
            })
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let config = PropConfig {
            click_threshold_secs: f32::NAN,
            ..PropConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                name: "click_threshold_secs"
            })
        );

        let tuning = MovementTuning {
            horizontal_speed: TuningRange::new(0.0, f32::INFINITY),
            ..MovementTuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn samples_stay_inside_the_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = TuningRange::new(0.25, 0.75);
        for _ in 0..1000 {
            assert!(range.contains(range.sample(&mut rng)));
        }

        let fixed = TuningRange::fixed(2.0);
        assert_eq!(fixed.sample(&mut rng), 2.0);
    }
}
