use crate::config::ArenaConfig;
use crate::error::{ArenaError, Result};
use crate::geometry::{Point, Size};
use crate::layout::MultiRobotLayoutEngine;
use crate::pose::Pose;
use crate::robot::{RobotVisual, SegmentRole, TextAlign, TextLabel};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Pose,
    Id,
}

/// Immediate-mode drawing surface the handle renders onto.
pub trait Canvas {
    fn draw_segment(&mut self, start: Point, end: Point, stroke_width: f64, role: SegmentRole);
    fn draw_label(&mut self, position: Point, label: &TextLabel, kind: LabelKind);
}

/// Container child for one robot: where its icon sits on screen and its id tag.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotGroup {
    pub id: u32,
    logical: Point,
    position: Point,
    id_label: TextLabel,
}

impl RobotGroup {
    fn new(id: u32, position: Point) -> Self {
        Self {
            id,
            logical: Point::default(),
            position,
            id_label: TextLabel::new(id.to_string(), Point::default(), TextAlign::Center),
        }
    }

    /// Last logical arena position reported for this robot.
    pub fn logical(&self) -> Point {
        self.logical
    }

    /// Display-space origin of the icon.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn id_label(&self) -> &TextLabel {
        &self.id_label
    }
}

/// Index-addressed façade over the layout engine and its per-robot groups.
/// `groups[i]` always belongs to `engine.robots()[i]`.
#[derive(Debug, Clone, Default)]
pub struct MultiRobotHandle {
    engine: MultiRobotLayoutEngine,
    groups: Vec<RobotGroup>,
}

impl MultiRobotHandle {
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            engine: MultiRobotLayoutEngine::new(config),
            groups: Vec::new(),
        }
    }

    pub fn engine(&self) -> &MultiRobotLayoutEngine {
        &self.engine
    }

    pub fn num_robots(&self) -> usize {
        self.engine.len()
    }

    pub fn add_robot(&mut self, id: u32) -> Result<usize> {
        let index = self.engine.add_robot()?;
        let origin = self.engine.to_display(Point::default());
        self.groups.push(RobotGroup::new(id, origin));
        debug_assert_eq!(self.groups.len(), self.engine.len());
        debug!("registered robot {id} at index {index}");
        Ok(index)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.num_robots();
        if index >= len {
            return Err(ArenaError::OutOfRange { index, len });
        }
        Ok(())
    }

    pub fn robot(&self, index: usize) -> Result<&RobotVisual> {
        self.engine.robot(index)
    }

    pub fn group(&self, index: usize) -> Result<&RobotGroup> {
        self.check_index(index)?;
        Ok(&self.groups[index])
    }

    pub fn position(&self, index: usize) -> Result<Point> {
        self.group(index).map(RobotGroup::position)
    }

    /// Places robot `index` at a logical arena position.
    pub fn move_to(&mut self, index: usize, logical: Point) -> Result<()> {
        self.check_index(index)?;
        if !(logical.x.is_finite() && logical.y.is_finite()) {
            return Err(ArenaError::InvalidPosition {
                x: logical.x,
                y: logical.y,
            });
        }
        let position = self.engine.to_display(logical);
        let group = &mut self.groups[index];
        group.logical = logical;
        group.position = position;
        Ok(())
    }

    pub fn rotate(&mut self, index: usize, theta_deg: f64) -> Result<()> {
        self.engine.robot_mut(index)?.rotate(theta_deg)
    }

    pub fn set_pose_label(&mut self, index: usize, x: i32, y: i32, theta: i32) -> Result<()> {
        self.engine.robot_mut(index)?.set_pose_label(x, y, theta);
        Ok(())
    }

    /// One pose tick: move, rotate, then refresh the label with rounded values.
    /// The index and the pose are both checked before anything changes.
    pub fn apply_pose(&mut self, index: usize, pose: Pose) -> Result<()> {
        self.check_index(index)?;
        pose.check_finite()?;
        self.move_to(index, pose.position())?;
        self.rotate(index, pose.theta_deg)?;
        let (x, y, theta) = pose.rounded();
        self.set_pose_label(index, x, y, theta)
    }

    /// Rescales every icon and re-anchors each group at its last logical position.
    pub fn resize(&mut self, size: Size) -> Result<()> {
        self.engine.resize(size)?;
        for group in &mut self.groups {
            group.position = self.engine.to_display(group.logical);
        }
        Ok(())
    }

    pub fn min_size(&self) -> Size {
        self.engine.min_size()
    }

    pub fn render<C: Canvas>(&self, canvas: &mut C) {
        for (robot, group) in self.engine.robots().iter().zip(&self.groups) {
            let origin = group.position;
            for segment in robot.segments() {
                canvas.draw_segment(
                    origin + segment.start,
                    origin + segment.end,
                    segment.stroke_width,
                    segment.role,
                );
            }
            let pose_label = robot.pose_label();
            canvas.draw_label(origin + pose_label.offset, pose_label, LabelKind::Pose);
            canvas.draw_label(origin + group.id_label.offset, &group.id_label, LabelKind::Id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCanvas {
        segments: Vec<(Point, Point, f64, SegmentRole)>,
        labels: Vec<(Point, String, LabelKind)>,
    }

    impl Canvas for RecordingCanvas {
        fn draw_segment(&mut self, start: Point, end: Point, stroke_width: f64, role: SegmentRole) {
            self.segments.push((start, end, stroke_width, role));
        }

        fn draw_label(&mut self, position: Point, label: &TextLabel, kind: LabelKind) {
            self.labels.push((position, label.text().to_string(), kind));
        }
    }

    fn handle_with_robots(count: u32) -> MultiRobotHandle {
        let mut handle = MultiRobotHandle::new(ArenaConfig::new(100.0, 50.0, 50.0).unwrap());
        for id in 0..count {
            handle.add_robot(id + 10).unwrap();
        }
        handle
    }

    #[test]
    fn add_robot_registers_group_at_matching_index() {
        let mut handle = handle_with_robots(0);
        assert_eq!(handle.add_robot(7).unwrap(), 0);
        assert_eq!(handle.add_robot(3).unwrap(), 1);
        assert_eq!(handle.num_robots(), 2);
        assert_eq!(handle.group(1).unwrap().id, 3);
        assert_eq!(handle.group(1).unwrap().id_label().text(), "3");
        assert_eq!(handle.position(0).unwrap(), Point::new(50.0, 50.0));
    }

    #[test]
    fn move_only_touches_target_robot() {
        let mut handle = handle_with_robots(3);
        let before: Vec<RobotGroup> = (0..3).map(|i| handle.group(i).unwrap().clone()).collect();
        let robots_before: Vec<_> = (0..3).map(|i| *handle.robot(i).unwrap().segments()).collect();

        handle.move_to(1, Point::new(20.0, -5.0)).unwrap();

        assert_eq!(handle.group(0).unwrap(), &before[0]);
        assert_eq!(handle.group(2).unwrap(), &before[2]);
        assert_eq!(handle.position(1).unwrap(), Point::new(70.0, 45.0));
        for (i, segments) in robots_before.iter().enumerate() {
            assert_eq!(handle.robot(i).unwrap().segments(), segments);
        }
    }

    #[test]
    fn out_of_range_leaves_state_unchanged() {
        let mut handle = handle_with_robots(3);
        handle.move_to(0, Point::new(1.0, 2.0)).unwrap();
        let groups: Vec<RobotGroup> = (0..3).map(|i| handle.group(i).unwrap().clone()).collect();

        assert!(matches!(
            handle.move_to(5, Point::new(1.0, 1.0)),
            Err(ArenaError::OutOfRange { index: 5, len: 3 })
        ));
        assert!(matches!(
            handle.rotate(3, 10.0),
            Err(ArenaError::OutOfRange { .. })
        ));
        assert!(matches!(
            handle.set_pose_label(9, 1, 2, 3),
            Err(ArenaError::OutOfRange { .. })
        ));
        assert!(matches!(
            handle.apply_pose(4, Pose::new(1.0, 1.0, 1.0)),
            Err(ArenaError::OutOfRange { .. })
        ));

        for (i, group) in groups.iter().enumerate() {
            assert_eq!(handle.group(i).unwrap(), group);
            assert_eq!(handle.robot(i).unwrap().transform().rotation_deg(), 90.0);
            assert_eq!(handle.robot(i).unwrap().pose_label().text(), "(0, 0, 0)");
        }
    }

    #[test]
    fn apply_pose_moves_rotates_and_labels() {
        let mut handle = handle_with_robots(1);
        handle.apply_pose(0, Pose::new(10.4, -3.6, 44.5)).unwrap();

        let robot = handle.robot(0).unwrap();
        assert_eq!(robot.transform().rotation_deg(), 44.5);
        assert_eq!(robot.pose_label().text(), "(10, -4, 45)");
        assert_eq!(handle.group(0).unwrap().logical(), Point::new(10.4, -3.6));
    }

    #[test]
    fn non_finite_pose_is_refused_before_any_change() {
        let mut handle = handle_with_robots(1);
        handle.apply_pose(0, Pose::new(5.0, 5.0, 30.0)).unwrap();
        let group = handle.group(0).unwrap().clone();
        let robot = handle.robot(0).unwrap().clone();

        assert!(matches!(
            handle.apply_pose(0, Pose::new(1.0, 1.0, f64::NAN)),
            Err(ArenaError::InvalidHeading { .. })
        ));
        assert!(matches!(
            handle.apply_pose(0, Pose::new(f64::INFINITY, 1.0, 45.0)),
            Err(ArenaError::InvalidPosition { .. })
        ));
        assert!(matches!(
            handle.rotate(0, f64::NEG_INFINITY),
            Err(ArenaError::InvalidHeading { .. })
        ));
        assert!(matches!(
            handle.move_to(0, Point::new(0.0, f64::NAN)),
            Err(ArenaError::InvalidPosition { .. })
        ));

        assert_eq!(handle.group(0).unwrap(), &group);
        assert_eq!(handle.robot(0).unwrap().segments(), robot.segments());
        assert_eq!(handle.robot(0).unwrap().pose_label().text(), "(5, 5, 30)");

        // The next good tick still lands exactly where a fresh robot would.
        handle.apply_pose(0, Pose::new(0.0, 0.0, 90.0)).unwrap();
        let body = handle.robot(0).unwrap().segments()[0];
        assert!(body.start.x.abs() < 1e-9 && (body.start.y + 10.0).abs() < 1e-9);
        assert!(body.end.x.abs() < 1e-9 && (body.end.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn resize_reanchors_groups() {
        let mut handle = handle_with_robots(2);
        handle.move_to(0, Point::new(10.0, 10.0)).unwrap();
        handle.resize(Size::new(400.0, 200.0)).unwrap();

        // ratio 2, offset (100 + 100, 100)
        assert_eq!(handle.position(0).unwrap(), Point::new(220.0, 120.0));
        assert_eq!(handle.position(1).unwrap(), Point::new(200.0, 100.0));
        assert_eq!(handle.robot(1).unwrap().transform().scale_ratio(), 2.0);
    }

    #[test]
    fn degenerate_resize_is_reported() {
        let mut handle = handle_with_robots(1);
        assert!(matches!(
            handle.resize(Size::new(0.0, 0.0)),
            Err(ArenaError::DegenerateDisplaySize { .. })
        ));
        assert_eq!(handle.engine().display_size(), Size::new(100.0, 100.0));
    }

    #[test]
    fn render_draws_segments_then_labels_per_robot() {
        let mut handle = handle_with_robots(2);
        handle.move_to(1, Point::new(-10.0, 0.0)).unwrap();
        let mut canvas = RecordingCanvas::default();
        handle.render(&mut canvas);

        assert_eq!(canvas.segments.len(), 6);
        assert_eq!(canvas.labels.len(), 4);

        let (start, end, stroke, role) = canvas.segments[3];
        assert_eq!(role, SegmentRole::Body);
        assert_eq!(start, Point::new(40.0, 40.0));
        assert_eq!(end, Point::new(40.0, 60.0));
        assert_eq!(stroke, 13.0);

        assert_eq!(
            canvas.labels[2],
            (Point::new(40.0, 30.0), "(0, 0, 0)".to_string(), LabelKind::Pose)
        );
        assert_eq!(
            canvas.labels[3],
            (Point::new(40.0, 50.0), "11".to_string(), LabelKind::Id)
        );
    }
}
