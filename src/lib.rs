use crate::app::App;
use crate::args::Args;

mod app;
pub mod args;
pub mod effect;
pub mod error;
pub mod presenter;
mod render;
pub mod resource;
pub mod transform;
mod view;

pub fn run(args: Args) {
    cfg_if::cfg_if! {
        if #[cfg(target_arch="wasm32")] {
            console_error_panic_hook::set_once();
            if console_log::init_with_level(log::Level::Info).is_err() {
                log::warn!("Logger was already initialized");
            }
        } else {
            env_logger::init();
        }
    }

    let event_loop = match App::create_event_loop() {
        Ok(event_loop) => event_loop,
        Err(error) => {
            log::error!("Failed to create event loop: {error}");
            return;
        }
    };
    // Frames are driven by transformer replies, not by polling.
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Wait);

    cfg_if::cfg_if! {
        if #[cfg(target_arch="wasm32")] {
            use winit::platform::web::EventLoopExtWebSys;
            let app = App::new(&event_loop, args);
            event_loop.spawn_app(app);
        } else {
            let mut app = App::new(&event_loop, args);
            if let Err(error) = event_loop.run_app(&mut app) {
                log::error!("Event loop terminated with an error: {error}");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    run(Args::web_default());
}
