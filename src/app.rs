//! Windowed application shell
//!
//! Wires winit to the composer and render engine. The composer and all
//! scene state are built before the window exists; GPU resources appear
//! when `resumed` hands us a surface.

use std::sync::Arc;
use std::time::Instant;

use log::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::composer::{ComposerConfig, SceneComposer};
use crate::gfx::RenderEngine;

pub struct CampusApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: ComposerConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    composer: Option<SceneComposer>,
    start: Instant,
}

impl CampusApp {
    pub fn new(config: ComposerConfig) -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                composer: None,
                start: Instant::now(),
            },
        }
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title("Campus at Every Hour")
            .with_inner_size(winit::dpi::LogicalSize::new(1200, 800));

        let Ok(window) = event_loop.create_window(attributes) else {
            error!("failed to create window");
            event_loop.exit();
            return;
        };

        let window_handle = Arc::new(window);
        let (width, height) = window_handle.inner_size().into();

        let window_clone = window_handle.clone();
        let renderer = pollster::block_on(async move {
            RenderEngine::new(window_clone, width, height).await
        });

        match renderer {
            Ok(renderer) => {
                let composer = SceneComposer::new(self.config, width, height);
                info!("scene ready: hour {} ({})", composer.hour(), composer.title());

                self.window = Some(window_handle.clone());
                self.render_engine = Some(renderer);
                self.composer = Some(composer);
                window_handle.request_redraw();
            }
            Err(err) => {
                error!("failed to initialize renderer: {}", err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        let Some(composer) = self.composer.as_mut() else {
            return;
        };
        let Some(window) = self.window.as_ref() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        ..
                    },
                ..
            } => {
                if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                    composer.dispose();
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Err(err) = composer.handle_resize(render_engine, width, height) {
                    // Minimized windows report a zero-area target
                    info!("skipping resize: {}", err);
                }
            }
            WindowEvent::CloseRequested => {
                composer.dispose();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                composer.update(self.start.elapsed().as_secs_f64());
                if let Err(err) = composer.render(render_engine) {
                    error!("render failed: {}", err);
                }
                window.request_redraw();
            }
            _ => (),
        }
    }
}
