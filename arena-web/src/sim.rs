use arena_core::{ArenaConfig, Pose};
use fastrand::Rng;

const SPEED_UNITS_PER_SEC: f64 = 40.0;
const MAX_TURN_RATE_DEG: f64 = 120.0;
const TURN_JITTER_DEG: f64 = 90.0;

#[derive(Debug, Clone)]
pub struct WanderingRobot {
    pub id: u32,
    pub pose: Pose,
    turn_rate_deg: f64,
}

/// Random-walk pose source standing in for real robots reporting over the network.
pub struct Simulation {
    robots: Vec<WanderingRobot>,
    min: (f64, f64),
    max: (f64, f64),
    rng: Rng,
}

impl Simulation {
    pub fn new(config: &ArenaConfig, seed: u64) -> Self {
        Self {
            robots: Vec::new(),
            min: (-config.center_x, -config.center_y),
            max: (
                config.map_size - config.center_x,
                config.map_size - config.center_y,
            ),
            rng: Rng::with_seed(seed),
        }
    }

    pub fn spawn(&mut self, id: u32) {
        let x = self.min.0 + self.rng.f64() * (self.max.0 - self.min.0);
        let y = self.min.1 + self.rng.f64() * (self.max.1 - self.min.1);
        let theta = (self.rng.f64() * 360.0).floor();
        self.robots.push(WanderingRobot {
            id,
            pose: Pose::new(x, y, theta),
            turn_rate_deg: 0.0,
        });
    }

    pub fn robots(&self) -> &[WanderingRobot] {
        &self.robots
    }

    pub fn step(&mut self, delta_seconds: f64) {
        for robot in &mut self.robots {
            let jitter = (self.rng.f64() - 0.5) * 2.0 * TURN_JITTER_DEG * delta_seconds;
            robot.turn_rate_deg =
                (robot.turn_rate_deg + jitter).clamp(-MAX_TURN_RATE_DEG, MAX_TURN_RATE_DEG);

            let mut theta = robot.pose.theta_deg + robot.turn_rate_deg * delta_seconds;
            let (sin, cos) = theta.to_radians().sin_cos();
            // Display y grows downward, so a positive heading moves toward smaller y.
            let mut x = robot.pose.x + cos * SPEED_UNITS_PER_SEC * delta_seconds;
            let mut y = robot.pose.y - sin * SPEED_UNITS_PER_SEC * delta_seconds;

            if x < self.min.0 || x > self.max.0 {
                x = x.clamp(self.min.0, self.max.0);
                theta = 180.0 - theta;
            }
            if y < self.min.1 || y > self.max.1 {
                y = y.clamp(self.min.1, self.max.1);
                theta = -theta;
            }

            robot.pose = Pose::new(x, y, theta.rem_euclid(360.0));
        }
    }
}
