#[macroquad::main("Robot Arena")]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    arena_web_lib::general_log::init();

    arena_web_lib::run().await;

    #[cfg(not(target_arch = "wasm32"))]
    arena_web_lib::general_log::shutdown();
}
