use arena_core::{Canvas, LabelKind, Point, SegmentRole, TextAlign, TextLabel};
use macroquad::prelude::*;

pub const BODY_COLOR: Color = BLUE;
pub const HEADING_COLOR: Color = RED;
pub const POSE_LABEL_COLOR: Color = RED;
pub const ID_LABEL_COLOR: Color = DARKGREEN;
pub const ARENA_BORDER_COLOR: Color = LIGHTGRAY;

// Label sizes are in display units; macroquad fonts read poorly below ~16px.
const LABEL_FONT_SCALE: f64 = 2.0;

/// Draws straight onto the macroquad frame buffer.
pub struct MacroquadCanvas;

fn segment_color(role: SegmentRole) -> Color {
    match role {
        SegmentRole::Body | SegmentRole::Axle => BODY_COLOR,
        SegmentRole::Heading => HEADING_COLOR,
    }
}

impl Canvas for MacroquadCanvas {
    fn draw_segment(&mut self, start: Point, end: Point, stroke_width: f64, role: SegmentRole) {
        draw_line(
            start.x as f32,
            start.y as f32,
            end.x as f32,
            end.y as f32,
            (stroke_width as f32).max(1.0),
            segment_color(role),
        );
    }

    fn draw_label(&mut self, position: Point, label: &TextLabel, kind: LabelKind) {
        let font_size = (label.text_size * LABEL_FONT_SCALE).round().max(1.0) as u16;
        let color = match kind {
            LabelKind::Pose => POSE_LABEL_COLOR,
            LabelKind::Id => ID_LABEL_COLOR,
        };
        let dims = measure_text(label.text(), None, font_size, 1.0);
        // Label positions are top-left (leading) or center anchors; draw_text wants a baseline.
        let (x, y) = match label.align {
            TextAlign::Leading => (position.x as f32, position.y as f32 + dims.offset_y),
            TextAlign::Center => (
                position.x as f32 - dims.width * 0.5,
                position.y as f32 + dims.offset_y - dims.height * 0.5,
            ),
        };
        draw_text(label.text(), x, y, font_size as f32, color);
    }
}

/// Outline of the logical arena square after letterboxing.
pub fn draw_arena_border(top_left: Point, side: f64) {
    draw_rectangle_lines(
        top_left.x as f32,
        top_left.y as f32,
        side as f32,
        side as f32,
        2.0,
        ARENA_BORDER_COLOR,
    );
}
