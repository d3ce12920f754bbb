//! Engine settings.
//!
//! Resolution and marching settings for the renderer, and speed/collision
//! settings for movement. Both are checked once when the engine is built.

use crate::error::ConfigError;

/// Internal render resolution and ray-march parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Columns in the internal frame, one ray each.
    pub hres: usize,
    /// Rows below (and above) the horizon; the frame is `2 * halfvres` tall.
    pub halfvres: usize,
    /// Horizontal field of view in degrees.
    pub fov_deg: f32,
    /// Ray-march step in map units.
    pub step: f32,
    /// Distance after which a ray counts as a miss.
    pub max_distance: f32,
    /// Added to the depth before projecting wall height.
    pub epsilon: f32,
    /// Wall brightness falloff per unit of depth.
    pub falloff: f32,
    /// Modulate wall colors with the wall tile texture.
    pub textured_walls: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            hres: 200,
            halfvres: 150,
            fov_deg: 60.0,
            step: 0.02,
            max_distance: 32.0,
            epsilon: 0.001,
            falloff: 0.5,
            textured_walls: false,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hres == 0 || self.halfvres == 0 {
            return Err(ConfigError::InvalidSetting("render resolution must be non-zero"));
        }
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(ConfigError::InvalidSetting("fov must be within (0, 180) degrees"));
        }
        if !(self.step > 0.0) || !(self.max_distance > self.step) {
            return Err(ConfigError::InvalidSetting(
                "march step must be positive and below the cutoff distance",
            ));
        }
        if !(self.epsilon > 0.0) || !(self.falloff >= 0.0) {
            return Err(ConfigError::InvalidSetting(
                "epsilon must be positive and falloff non-negative",
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn vres(&self) -> usize {
        2 * self.halfvres
    }

    /// Upper bound on march iterations per column.
    #[inline]
    pub fn max_steps(&self) -> usize {
        (self.max_distance / self.step).ceil() as usize
    }
}

/// Walking speed and collision settings.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveConfig {
    /// Map units per second.
    pub speed: f32,
    /// Gap kept between the camera and any wall.
    pub clearance: f32,
    /// Largest rotation applied in one frame, radians.
    pub max_turn: f32,
    /// Radians per unit of pointer delta.
    pub turn_sensitivity: f32,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            clearance: 0.2,
            max_turn: 0.2,
            turn_sensitivity: 1.0 / 200.0,
        }
    }
}

impl MoveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed >= 0.0) || !self.speed.is_finite() {
            return Err(ConfigError::InvalidSetting("speed must be finite and non-negative"));
        }
        // the four-corner probe only covers the center cell while r < 0.5
        if !(self.clearance > 0.0 && self.clearance < 0.5) {
            return Err(ConfigError::InvalidSetting("clearance must be within (0, 0.5)"));
        }
        if !(self.max_turn > 0.0) || !(self.turn_sensitivity >= 0.0) {
            return Err(ConfigError::InvalidSetting("turn limits must be positive"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineConfig {
    pub render: RenderConfig,
    pub movement: MoveConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render.validate()?;
        self.movement.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!((1600..=1601).contains(&RenderConfig::default().max_steps()));
    }

    #[test]
    fn test_rejects_bad_settings() {
        let render = RenderConfig {
            fov_deg: 180.0,
            ..Default::default()
        };
        assert!(render.validate().is_err());

        let render = RenderConfig {
            hres: 0,
            ..Default::default()
        };
        assert!(render.validate().is_err());

        let movement = MoveConfig {
            clearance: 0.5,
            ..Default::default()
        };
        assert!(movement.validate().is_err());

        let movement = MoveConfig {
            speed: f32::NAN,
            ..Default::default()
        };
        assert!(movement.validate().is_err());
    }
}
