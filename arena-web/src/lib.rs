use arena_core::{ArenaConfig, MultiRobotHandle, Point, Pose, Size};
#[cfg(target_arch = "wasm32")]
use macroquad::miniquad;
use macroquad::prelude::*;

use crate::sim::Simulation;
use crate::surface::{MacroquadCanvas, draw_arena_border};

mod sim;
mod surface;

const ARENA_CONFIG_PATH: &str = "assets/arena.json";
#[cfg(not(target_arch = "wasm32"))]
const POSE_LOG_PATH: &str = "positions.csv";
const SIMULATED_ROBOTS: u32 = 5;
const SIMULATION_SEED: u64 = 42;
const POSE_TICK_SECONDS: f32 = 1.0 / 20.0;

#[cfg(not(target_arch = "wasm32"))]
type PoseSink = Option<arena_core::PoseLog<std::io::BufWriter<std::fs::File>>>;
// The browser build has no writable filesystem.
#[cfg(target_arch = "wasm32")]
type PoseSink = ();

#[cfg(not(target_arch = "wasm32"))]
pub mod general_log;

// The browser build has no `log` backend, so everything goes through miniquad there.
fn log_ui_action(label: &str) {
    #[cfg(target_arch = "wasm32")]
    miniquad::info!("{}", label);
    #[cfg(not(target_arch = "wasm32"))]
    ::log::info!("{}", label);
}

fn log_warning(message: &str) {
    #[cfg(target_arch = "wasm32")]
    miniquad::warn!("{}", message);
    #[cfg(not(target_arch = "wasm32"))]
    ::log::warn!("{}", message);
}

fn log_failure(message: &str) {
    #[cfg(target_arch = "wasm32")]
    miniquad::error!("{}", message);
    #[cfg(not(target_arch = "wasm32"))]
    ::log::error!("{}", message);
}

async fn load_arena_config() -> ArenaConfig {
    let loaded = load_string(ARENA_CONFIG_PATH)
        .await
        .map_err(|err| err.to_string());
    parse_arena_config(loaded).unwrap_or_else(|err| {
        log_warning(&format!(
            "using default arena config ({ARENA_CONFIG_PATH}: {err})"
        ));
        ArenaConfig::default()
    })
}

fn parse_arena_config(loaded: Result<String, String>) -> Result<ArenaConfig, String> {
    let json = loaded?;
    ArenaConfig::from_json_str(&json).map_err(|err| err.to_string())
}

struct ViewerState {
    handle: MultiRobotHandle,
    sim: Simulation,
    last_screen: Size,
    pose_log: PoseSink,
}

impl ViewerState {
    fn new(config: ArenaConfig) -> Self {
        let mut handle = MultiRobotHandle::new(config);
        let mut sim = Simulation::new(&config, SIMULATION_SEED);
        for id in 1..=SIMULATED_ROBOTS {
            match handle.add_robot(id) {
                Ok(_) => sim.spawn(id),
                Err(err) => log_failure(&format!("robot {id} not registered: {err}")),
            }
        }

        Self {
            handle,
            sim,
            last_screen: config.unit_display_size(),
            pose_log: open_pose_log(),
        }
    }

    fn sync_screen_size(&mut self) {
        let screen = Size::new(screen_width() as f64, screen_height() as f64);
        if screen == self.last_screen {
            return;
        }
        // Minimised windows report zero; keep the last good layout until they come back.
        match self.handle.resize(screen) {
            Ok(()) => self.last_screen = screen,
            Err(err) => ::log::debug!("{err}"),
        }
    }

    fn pose_tick(&mut self, delta_seconds: f32) {
        self.sim.step(delta_seconds as f64);
        for (index, robot) in self.sim.robots().iter().enumerate() {
            if let Err(err) = self.handle.apply_pose(index, robot.pose) {
                log_failure(&format!("robot {}: {err}", robot.id));
                continue;
            }

            record_pose(&mut self.pose_log, robot.id, robot.pose);
        }
    }

    fn render(&self) {
        clear_background(WHITE);

        let engine = self.handle.engine();
        let config = engine.config();
        let top_left = engine.to_display(Point::new(-config.center_x, -config.center_y));
        draw_arena_border(top_left, config.map_size * engine.scale_ratio());

        self.handle.render(&mut MacroquadCanvas);

        draw_text(
            &format!("robots: {}", self.handle.num_robots()),
            10.0,
            20.0,
            20.0,
            DARKGRAY,
        );
    }

    fn shutdown(self) {
        close_pose_log(self.pose_log);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_pose_log() -> PoseSink {
    match arena_core::PoseLog::create(POSE_LOG_PATH) {
        Ok(pose_log) => Some(pose_log),
        Err(err) => {
            ::log::error!("could not open {POSE_LOG_PATH}: {err}");
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn record_pose(sink: &mut PoseSink, id: u32, pose: Pose) {
    let Some(pose_log) = sink.as_mut() else {
        return;
    };
    let now = chrono::Local::now().time();
    if let Err(err) = pose_log.record(now, id, pose) {
        ::log::error!("pose log disabled: {err}");
        *sink = None;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn close_pose_log(sink: PoseSink) {
    if let Some(pose_log) = sink {
        if let Err(err) = pose_log.finish() {
            ::log::error!("failed to flush pose log: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn open_pose_log() -> PoseSink {}

#[cfg(target_arch = "wasm32")]
fn record_pose(_sink: &mut PoseSink, _id: u32, _pose: Pose) {}

#[cfg(target_arch = "wasm32")]
fn close_pose_log(_sink: PoseSink) {}

pub async fn run() {
    install_panic_hook();
    let config = load_arena_config().await;
    let mut viewer = ViewerState::new(config);
    let mut accumulator = 0.0_f32;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            log_ui_action("viewer: quit");
            break;
        }

        viewer.sync_screen_size();

        // Poses arrive at a fixed rate regardless of frame rate.
        accumulator += get_frame_time();
        while accumulator >= POSE_TICK_SECONDS {
            viewer.pose_tick(POSE_TICK_SECONDS);
            accumulator -= POSE_TICK_SECONDS;
        }

        viewer.render();

        next_frame().await;
    }

    viewer.shutdown();
}

#[cfg(target_arch = "wasm32")]
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if let Some(location) = info.location() {
            miniquad::error!("panic at {}:{}: {}", location.file(), location.line(), msg);
        } else {
            miniquad::error!("panic: {}", msg);
        }
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn install_panic_hook() {}
