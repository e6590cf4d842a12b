use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::args::Args;
use crate::effect::frame::FrameBuffer;
use crate::presenter::Presenter;
use crate::resource::source::{load_image, ImageSourceLocation};
use crate::transform::{create_transformer, FrameSink};
use crate::view::ViewSystem;

pub struct App {
    event_loop_proxy: EventLoopProxy<UserEvent>,
    args: Args,
    view_system: Option<ViewSystem>,
    presenter: Presenter,
    image_requested: bool,
}

impl App {
    pub fn new(event_loop: &EventLoop<UserEvent>, args: Args) -> Self {
        let event_loop_proxy = event_loop.create_proxy();
        let transformer = create_transformer(args.execution_mode, event_loop_proxy.clone());

        App {
            event_loop_proxy,
            args,
            view_system: None,
            presenter: Presenter::new(transformer),
            image_requested: false,
        }
    }

    pub fn create_event_loop() -> Result<EventLoop<UserEvent>, EventLoopError> {
        EventLoop::<UserEvent>::with_user_event().build()
    }

    fn create_window(event_loop: &ActiveEventLoop) -> Result<Window, winit::error::OsError> {
        cfg_if::cfg_if! {
            if #[cfg(target_arch="wasm32")] {
                use winit::platform::web::WindowAttributesExtWebSys;
                event_loop.create_window(Window::default_attributes().with_append(true))
            } else {
                event_loop.create_window(
                    Window::default_attributes().with_title("ticker dither"),
                )
            }
        }
    }

    async fn initialize_view_system(event_loop_proxy: EventLoopProxy<UserEvent>, window: Window) {
        match ViewSystem::from_window(window).await {
            Ok(view_system) => {
                if event_loop_proxy
                    .send_event(UserEvent::ViewSystemReady(view_system))
                    .is_err()
                {
                    log::debug!("Event loop closed before the view system was ready");
                }
            }
            Err(error) => log::error!("Failed to create view system: {error:#}"),
        }
    }

    async fn load_source_image(
        event_loop_proxy: EventLoopProxy<UserEvent>,
        location: ImageSourceLocation,
    ) {
        let result = load_image(&location).await;

        if event_loop_proxy
            .send_event(UserEvent::ImageLoaded(result))
            .is_err()
        {
            log::debug!("Event loop closed before the image was loaded");
        }
    }

    fn spawn(future: impl std::future::Future<Output = ()> + 'static) {
        cfg_if::cfg_if! {
            if #[cfg(target_arch="wasm32")] {
                wasm_bindgen_futures::spawn_local(future);
            } else {
                pollster::block_on(future);
            }
        }
    }

    fn resize_presenter(&mut self, canvas_size: (u32, u32)) {
        if let Err(error) = self.presenter.resize(canvas_size) {
            log::error!("Failed to resize: {error:#}");
        }
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("Application resumed");

        if self.view_system.is_none() {
            let window = match App::create_window(event_loop) {
                Ok(window) => window,
                Err(error) => {
                    log::error!("Failed to create window: {error}");
                    event_loop.exit();
                    return;
                }
            };

            let event_loop_proxy = self.event_loop_proxy.clone();
            App::spawn(async move {
                App::initialize_view_system(event_loop_proxy, window).await;
            });
        }

        if !self.image_requested {
            self.image_requested = true;

            let event_loop_proxy = self.event_loop_proxy.clone();
            let location = self.args.image.clone();
            App::spawn(async move {
                App::load_source_image(event_loop_proxy, location).await;
            });
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let view_system = match &mut self.view_system {
            Some(view_system) => view_system,
            None => return,
        };

        if view_system.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                view_system.render_system.set_view_dimensions(new_size);
                self.resize_presenter((new_size.width, new_size.height));
            }
            WindowEvent::RedrawRequested => {
                let result = match self.presenter.tick(&mut view_system.render_system) {
                    Ok(true) => Ok(()),
                    Ok(false) => view_system.render_system.render(),
                    Err(error) => Err(error),
                };

                if let Err(error) = result {
                    match error.downcast_ref::<wgpu::SurfaceError>() {
                        Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            view_system.render_system.sync_view_dimensions()
                        }
                        Some(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("OutOfMemory");
                            event_loop.exit();
                        }
                        Some(wgpu::SurfaceError::Timeout) => {
                            log::warn!("Surface timeout");
                        }
                        None => log::error!("Failed to present frame: {error:#}"),
                    }
                }
            }
            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::ViewSystemReady(view_system) => {
                log::info!("View system created");

                let canvas_size = view_system.canvas_size();
                view_system.window.request_redraw();
                self.view_system = Some(view_system);
                self.resize_presenter(canvas_size);
            }
            UserEvent::ImageLoaded(Ok(image)) => {
                if let Err(error) = self.presenter.set_image(image) {
                    log::error!("Failed to start animation: {error:#}");
                }
            }
            UserEvent::ImageLoaded(Err(error)) => {
                log::error!("{error:#}");
            }
            UserEvent::FrameReady(frame_buffer) => {
                if self.presenter.on_frame_ready(frame_buffer) {
                    if let Some(view_system) = &self.view_system {
                        view_system.window.request_redraw();
                    }
                }
            }
        }
    }
}

pub enum UserEvent {
    ViewSystemReady(ViewSystem),
    ImageLoaded(anyhow::Result<image::DynamicImage>),
    FrameReady(FrameBuffer),
}

impl FrameSink for EventLoopProxy<UserEvent> {
    fn frame_ready(&self, frame_buffer: FrameBuffer) {
        if self.send_event(UserEvent::FrameReady(frame_buffer)).is_err() {
            log::debug!("Event loop closed, dropping computed frame");
        }
    }
}
