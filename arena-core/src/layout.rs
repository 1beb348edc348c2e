use crate::config::ArenaConfig;
use crate::error::{ArenaError, Result};
use crate::geometry::{Point, Size};
use crate::robot::RobotVisual;
use crate::transform::{center_offset, check_scale_ratio, scale_ratio};
use log::{debug, warn};

/// Owns every robot icon and the display size they are laid out in. All icons share
/// one scale ratio, derived from the last accepted display size.
#[derive(Debug, Clone)]
pub struct MultiRobotLayoutEngine {
    config: ArenaConfig,
    robots: Vec<RobotVisual>,
    display_size: Size,
}

impl Default for MultiRobotLayoutEngine {
    fn default() -> Self {
        Self::new(ArenaConfig::default())
    }
}

impl MultiRobotLayoutEngine {
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            config,
            robots: Vec::new(),
            display_size: config.unit_display_size(),
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn display_size(&self) -> Size {
        self.display_size
    }

    pub fn robots(&self) -> &[RobotVisual] {
        &self.robots
    }

    pub fn robot(&self, index: usize) -> Result<&RobotVisual> {
        let len = self.robots.len();
        self.robots
            .get(index)
            .ok_or(ArenaError::OutOfRange { index, len })
    }

    pub fn robot_mut(&mut self, index: usize) -> Result<&mut RobotVisual> {
        let len = self.robots.len();
        self.robots
            .get_mut(index)
            .ok_or(ArenaError::OutOfRange { index, len })
    }

    pub fn len(&self) -> usize {
        self.robots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    pub fn scale_ratio(&self) -> f64 {
        scale_ratio(self.display_size, self.config.map_size)
    }

    /// Maps a logical arena position to display coordinates.
    pub fn to_display(&self, logical: Point) -> Point {
        let ratio = self.scale_ratio();
        let offset = center_offset(self.display_size, self.config.center(), ratio);
        logical * ratio + offset
    }

    /// Rescales every robot in lockstep, then records the new size. A degenerate size
    /// is rejected before anything is touched.
    pub fn resize(&mut self, new_size: Size) -> Result<()> {
        if new_size.is_degenerate() {
            warn!(
                "ignoring degenerate display size {}x{}",
                new_size.width, new_size.height
            );
            return Err(ArenaError::DegenerateDisplaySize {
                width: new_size.width,
                height: new_size.height,
            });
        }

        // Checked once so no robot is rescaled unless all of them can be.
        let ratio = scale_ratio(new_size, self.config.map_size);
        check_scale_ratio(ratio)?;
        for robot in &mut self.robots {
            robot.rescale(ratio)?;
        }
        self.display_size = new_size;
        debug!(
            "resized to {}x{} (ratio {ratio})",
            new_size.width, new_size.height
        );
        Ok(())
    }

    pub fn min_size(&self) -> Size {
        self.robots
            .iter()
            .map(RobotVisual::min_size)
            .fold(Size::ZERO, Size::max)
    }

    pub fn add_robot(&mut self) -> Result<usize> {
        let mut robot = RobotVisual::new();
        robot.rescale(self.scale_ratio())?;
        self.robots.push(robot);
        Ok(self.robots.len() - 1)
    }
}
