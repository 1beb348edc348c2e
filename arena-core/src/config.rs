use crate::error::{ArenaError, Result};
use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAP_SIZE: f64 = 500.0;

/// Logical arena: a square of side `map_size` whose origin sits at `(center_x, center_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub map_size: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            map_size: DEFAULT_MAP_SIZE,
            center_x: DEFAULT_MAP_SIZE / 2.0,
            center_y: DEFAULT_MAP_SIZE / 2.0,
        }
    }
}

impl ArenaConfig {
    pub fn new(map_size: f64, center_x: f64, center_y: f64) -> Result<Self> {
        let config = Self {
            map_size,
            center_x,
            center_y,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ArenaConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.map_size.is_finite() || self.map_size <= 0.0 {
            return Err(ArenaError::InvalidConfig(format!(
                "map_size must be positive, got {}",
                self.map_size
            )));
        }
        if !self.center_x.is_finite() || !self.center_y.is_finite() {
            return Err(ArenaError::InvalidConfig(
                "map center must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    /// Display size at which one logical unit maps to one display unit.
    pub fn unit_display_size(&self) -> Size {
        Size::new(self.map_size, self.map_size)
    }
}
