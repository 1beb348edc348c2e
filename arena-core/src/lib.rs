pub mod config;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod layout;
pub mod pose;
pub mod robot;
pub mod transform;

pub use config::ArenaConfig;
pub use error::{ArenaError, Result};
pub use geometry::{Point, Size};
pub use handle::{Canvas, LabelKind, MultiRobotHandle, RobotGroup};
pub use layout::MultiRobotLayoutEngine;
pub use pose::{Pose, PoseLog};
pub use robot::{RobotVisual, Segment, SegmentRole, TextAlign, TextLabel};
pub use transform::{TransformState, center_offset, rotate_point, scale_ratio};
