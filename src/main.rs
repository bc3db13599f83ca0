use std::sync::Arc;

use twisted_prism::config::DemoConfig;
use twisted_prism::engine::{FrameOutcome, PrismRenderEngine};
use twisted_prism::error::PrismError;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Blend-factor step per arrow-key press (the native stand-in for the
/// original page's slider).
const BLEND_STEP: f32 = 0.05;

struct DemoApp {
    window: Option<Arc<Window>>,
    engine: Option<PrismRenderEngine>,
    config: DemoConfig,
}

impl DemoApp {
    fn new(config: DemoConfig) -> Self {
        Self {
            window: None,
            engine: None,
            config,
        }
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Twisted Prism")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let config = DemoConfig {
            width: inner.width.max(1),
            height: inner.height.max(1),
            ..self.config
        };

        let engine = match pollster::block_on(PrismRenderEngine::new(
            window.clone(),
            config,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(engine) = &mut self.engine {
                engine.teardown();
            }
            event_loop.exit();
            return;
        }

        let Some(engine) = &mut self.engine else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                engine.resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                engine.update();
                match engine.render() {
                    Ok(FrameOutcome::Drawn | FrameOutcome::Skipped) => {}
                    Err(
                        wgpu::SurfaceError::Outdated
                        | wgpu::SurfaceError::Lost,
                    ) => {
                        if let Some(w) = &self.window {
                            let inner = w.inner_size();
                            engine.resize(inner.width, inner.height);
                        }
                    }
                    Err(e) => {
                        log::error!("render error: {e:?}");
                    }
                }
                // Always reschedule — an occluded surface skips the draw,
                // never the loop.
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event: key, .. } => {
                if key.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = key.physical_key else {
                    return;
                };
                match code {
                    KeyCode::ArrowUp => {
                        let blend = engine.blend_factor() + BLEND_STEP;
                        engine.set_blend_factor(blend);
                        log::debug!("blend factor: {}", engine.blend_factor());
                    }
                    KeyCode::ArrowDown => {
                        let blend = engine.blend_factor() - BLEND_STEP;
                        engine.set_blend_factor(blend);
                        log::debug!("blend factor: {}", engine.blend_factor());
                    }
                    _ => {}
                }
            }

            other => {
                let _ = engine.handle_event(&other);
            }
        }
    }
}

/// Open the window and run the event loop. Blocks until the window is
/// closed.
fn run(config: DemoConfig) -> Result<(), PrismError> {
    let event_loop =
        EventLoop::new().map_err(|e| PrismError::Host(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DemoApp::new(config);
    event_loop
        .run_app(&mut app)
        .map_err(|e| PrismError::Host(e.to_string()))
}

fn main() {
    env_logger::init();

    let run_in_background = std::env::args()
        .any(|arg| arg == "--run-in-background");
    let config = DemoConfig {
        run_in_background,
        ..Default::default()
    };

    if let Err(e) = run(config) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
