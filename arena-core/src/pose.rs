use crate::error::{ArenaError, Result};
use crate::geometry::Point;
use chrono::NaiveTime;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const POSE_LOG_HEADER: &str = "time,id,x[cm],y[cm],theta[degrees] (the delimiter is a space)";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub theta_deg: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, theta_deg: f64) -> Self {
        Self { x, y, theta_deg }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn check_finite(&self) -> Result<()> {
        if !(self.x.is_finite() && self.y.is_finite()) {
            return Err(ArenaError::InvalidPosition {
                x: self.x,
                y: self.y,
            });
        }
        if !self.theta_deg.is_finite() {
            return Err(ArenaError::InvalidHeading {
                theta_deg: self.theta_deg,
            });
        }
        Ok(())
    }

    /// Integer `(x, y, theta)` as shown on the pose label.
    pub fn rounded(&self) -> (i32, i32, i32) {
        (
            self.x.round() as i32,
            self.y.round() as i32,
            self.theta_deg.round() as i32,
        )
    }
}

/// Space-delimited pose history, one line per reported pose. Owned by whoever drives
/// the update loop; call [`PoseLog::finish`] on shutdown to flush it.
pub struct PoseLog<W: Write> {
    writer: W,
}

impl PoseLog<BufWriter<File>> {
    /// Creates (or truncates) the log file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> PoseLog<W> {
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "{POSE_LOG_HEADER}")?;
        Ok(Self { writer })
    }

    pub fn record(&mut self, time: NaiveTime, id: u32, pose: Pose) -> Result<()> {
        writeln!(
            self.writer,
            "{} {} {} {} {}",
            time.format("%H:%M:%S%.6f"),
            id,
            pose.x,
            pose.y,
            pose.theta_deg
        )?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(Pose::new(2.5, -2.5, 359.4).rounded(), (3, -3, 359));
    }

    #[test]
    fn writes_header_then_records() {
        let mut log = PoseLog::new(Vec::new()).unwrap();
        let time = NaiveTime::from_hms_micro_opt(13, 4, 5, 120).unwrap();
        log.record(time, 2, Pose::new(12.5, -3.0, 90.0)).unwrap();
        let bytes = log.finish().unwrap();

        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![POSE_LOG_HEADER, "13:04:05.000120 2 12.5 -3 90"]);
    }
}
