// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation and layout tunables.

/// Timing and geometry parameters for a [`VisualTree`](crate::VisualTree).
///
/// The defaults give one comparison step every half second, nodes gliding at
/// 200 units per second, and a layout whose horizontal spread grows with the
/// square of the remaining depth.
///
/// ```rust
/// use sapling_tree::AnimationConfig;
///
/// let config = AnimationConfig::default().with_step_interval(0.25);
/// assert!(config.validate().is_ok());
/// assert!(AnimationConfig::default().with_move_speed(0.0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationConfig {
    /// Seconds between two comparison steps of an operation.
    pub step_interval: f64,
    /// Speed, in layout units per second, at which nodes ease toward their targets.
    pub move_speed: f64,
    /// Horizontal spread constant; a child sits `depth_remaining² × spread` away from its parent.
    pub spread: f64,
    /// Vertical distance between two depth levels.
    pub row_height: f64,
    /// Distance under which an easing node snaps onto its target.
    pub snap_distance: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step_interval: 0.5,
            move_speed: 200.0,
            spread: 15.0,
            row_height: 80.0,
            snap_distance: 1.0,
        }
    }
}

impl AnimationConfig {
    /// Set the interval between comparison steps.
    #[must_use]
    pub fn with_step_interval(mut self, seconds: f64) -> Self {
        self.step_interval = seconds;
        self
    }

    /// Set the easing speed.
    #[must_use]
    pub fn with_move_speed(mut self, speed: f64) -> Self {
        self.move_speed = speed;
        self
    }

    /// Set the horizontal spread constant.
    #[must_use]
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Set the vertical distance between depth levels.
    #[must_use]
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// Set the snapping distance.
    #[must_use]
    pub fn with_snap_distance(mut self, distance: f64) -> Self {
        self.snap_distance = distance;
        self
    }

    /// Check that every field is usable.
    ///
    /// All values must be finite. `move_speed`, `spread` and `row_height` must be
    /// strictly positive; `step_interval` and `snap_distance` may be zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("step_interval", self.step_interval, false),
            ("move_speed", self.move_speed, true),
            ("spread", self.spread, true),
            ("row_height", self.row_height, true),
            ("snap_distance", self.snap_distance, false),
        ];
        for (field, value, strictly_positive) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
            if strictly_positive && value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

/// Rejected [`AnimationConfig`] value.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The value is NaN or infinite.
    #[error("`{field}` must be finite, got {value}")]
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The value must be greater than zero.
    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The value must not be negative.
    #[error("`{field}` must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}
