use crate::error::Result;
use crate::geometry::{Point, Size};
use crate::transform::{TransformState, rotate_point};

pub const LABEL_TEXT_SIZE: f64 = 8.0;
pub const POSE_LABEL_OFFSET: Point = Point::new(0.0, -20.0);
// Rough glyph advance relative to text size, used only for layout hints.
const LABEL_CHAR_WIDTH_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentRole {
    Body,
    Heading,
    Axle,
}

/// A stroked line in icon-local display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub role: SegmentRole,
    pub start: Point,
    pub end: Point,
    pub stroke_width: f64,
}

impl Segment {
    pub const fn new(role: SegmentRole, start: Point, end: Point, stroke_width: f64) -> Self {
        Self {
            role,
            start,
            end,
            stroke_width,
        }
    }

    fn scale(&mut self, factor: f64) {
        self.start = self.start * factor;
        self.end = self.end * factor;
        self.stroke_width *= factor;
    }

    fn rotate(&mut self, delta_deg: f64) {
        self.start = rotate_point(self.start, delta_deg);
        self.end = rotate_point(self.end, delta_deg);
    }

    pub fn bounding_size(&self) -> Size {
        Size::new(
            (self.end.x - self.start.x).abs(),
            (self.end.y - self.start.y).abs(),
        )
    }
}

// Authored pointing up the screen, which the pose frame calls 90 degrees.
pub const AUTHORED_SEGMENTS: [Segment; 3] = [
    Segment::new(
        SegmentRole::Body,
        Point::new(0.0, -10.0),
        Point::new(0.0, 10.0),
        13.0,
    ),
    Segment::new(
        SegmentRole::Heading,
        Point::new(0.0, 0.0),
        Point::new(0.0, -9.0),
        3.0,
    ),
    Segment::new(
        SegmentRole::Axle,
        Point::new(-10.0, 0.0),
        Point::new(10.0, 0.0),
        6.5,
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Leading,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    text: String,
    pub offset: Point,
    pub text_size: f64,
    pub align: TextAlign,
    revision: u64,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, offset: Point, align: TextAlign) -> Self {
        Self {
            text: text.into(),
            offset,
            text_size: LABEL_TEXT_SIZE,
            align,
            revision: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bumped on every text change; surfaces that cache glyphs compare against it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.revision += 1;
    }

    pub fn estimated_size(&self) -> Size {
        let chars = self.text.chars().count() as f64;
        Size::new(chars * self.text_size * LABEL_CHAR_WIDTH_RATIO, self.text_size)
    }
}

/// One robot icon. `segments` always hold the authored geometry with the current
/// transform baked in; there is no pristine copy to recompute from.
#[derive(Debug, Clone)]
pub struct RobotVisual {
    segments: [Segment; 3],
    pose_label: TextLabel,
    transform: TransformState,
}

impl Default for RobotVisual {
    fn default() -> Self {
        Self::new()
    }
}

impl RobotVisual {
    pub fn new() -> Self {
        Self {
            segments: AUTHORED_SEGMENTS,
            pose_label: TextLabel::new("(0, 0, 0)", POSE_LABEL_OFFSET, TextAlign::Leading),
            transform: TransformState::new(),
        }
    }

    pub fn segments(&self) -> &[Segment; 3] {
        &self.segments
    }

    pub fn pose_label(&self) -> &TextLabel {
        &self.pose_label
    }

    pub fn transform(&self) -> TransformState {
        self.transform
    }

    /// Turns the icon to `theta_deg`. A non-finite heading is refused and leaves the
    /// geometry untouched.
    pub fn rotate(&mut self, theta_deg: f64) -> Result<()> {
        let Some(delta) = self.transform.rotate_to(theta_deg)? else {
            return Ok(());
        };
        for segment in &mut self.segments {
            segment.rotate(delta);
        }
        Ok(())
    }

    pub fn rescale(&mut self, new_ratio: f64) -> Result<()> {
        let adjustment = self.transform.rescale_to(new_ratio)?;
        for segment in &mut self.segments {
            segment.scale(adjustment);
        }
        Ok(())
    }

    pub fn set_pose_label(&mut self, x: i32, y: i32, theta: i32) {
        self.pose_label.set_text(format!("({x}, {y}, {theta})"));
    }

    pub fn min_size(&self) -> Size {
        self.segments
            .iter()
            .map(Segment::bounding_size)
            .fold(self.pose_label.estimated_size(), Size::max)
    }
}
