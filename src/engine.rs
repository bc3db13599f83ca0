//! The render loop: setup-once, step-repeatedly, teardown-once.
//!
//! Mirrors the lifecycle contract of the original canvas component: mount
//! builds the GPU state and uploads the mesh, every frame advances the
//! camera and either draws or skips based on visibility, and unmount tears
//! everything down idempotently.

use glam::{EulerRot, Quat};
use winit::event::WindowEvent;

use crate::camera::{InputHandler, TrackballCamera, TrackballCameraOptions};
use crate::config::DemoConfig;
use crate::error::PrismError;
use crate::geometry::prism::build_twisted_prism;
use crate::gpu::render_context::RenderContext;
use crate::renderer::PrismRenderer;
use crate::visibility::VisibilityChecker;

/// Long-axis length of the demo prism.
const STRETCH_LENGTH: f32 = 50.0;
/// Cross-section grid resolution.
const BASE_DIVISIONS: u32 = 3;
/// Full cross-section rotations over the prism's length.
const TWIST_COUNT: f32 = 1.0;
/// Initial camera pitch in degrees.
const INITIAL_PITCH_DEGREES: f32 = 0.1;

/// What a frame step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A draw call was issued and the frame presented.
    Drawn,
    /// No GPU work was issued (occluded, or already torn down). The
    /// schedule stays alive either way.
    Skipped,
}

/// The visibility gate: draw when the surface is visible or background
/// rendering is forced. Skipping a draw never cancels the schedule — the
/// host keeps requesting frames regardless of the outcome.
#[must_use]
pub fn should_draw(visible: bool, run_in_background: bool) -> bool {
    visible || run_in_background
}

/// Owns the GPU context, mesh, camera, and visibility state for one mounted
/// demo instance.
pub struct PrismRenderEngine {
    context: RenderContext,
    renderer: PrismRenderer,
    camera: TrackballCamera,
    input: InputHandler,
    visibility: VisibilityChecker,
    run_in_background: bool,
    torn_down: bool,
}

impl PrismRenderEngine {
    /// Set up the engine: acquire the GPU context, build and upload the
    /// twisted-prism mesh, and initialize camera and visibility state.
    ///
    /// # Errors
    ///
    /// Returns [`PrismError`] if GPU context acquisition fails or the mesh
    /// parameters are rejected. Nothing is left to clean up on failure.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        config: DemoConfig,
    ) -> Result<Self, PrismError> {
        let context =
            RenderContext::new(window, (config.width, config.height)).await?;

        let mesh =
            build_twisted_prism(STRETCH_LENGTH, BASE_DIVISIONS, TWIST_COUNT)?;
        let renderer = PrismRenderer::new(&context, &mesh);

        let camera = TrackballCamera::new(TrackballCameraOptions {
            rotation: Quat::from_euler(
                EulerRot::XYZ,
                INITIAL_PITCH_DEGREES.to_radians(),
                0.0,
                0.0,
            ),
            lock_horizontal: true,
            ..Default::default()
        });

        log::info!(
            "engine mounted: {}x{}, run_in_background={}",
            config.width,
            config.height,
            config.run_in_background
        );

        Ok(Self {
            context,
            renderer,
            camera,
            input: InputHandler::new(),
            visibility: VisibilityChecker::new(),
            run_in_background: config.run_in_background,
            torn_down: false,
        })
    }

    /// Feed one window event to the engine (pointer input and occlusion
    /// callbacks). Returns `true` if the event was consumed.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        if let WindowEvent::Occluded(occluded) = event {
            self.visibility.observe_occluded(*occluded);
            return true;
        }
        self.input.handle_event(&mut self.camera, event)
    }

    /// Advance per-frame state. Applies pointer input queued since the last
    /// frame; always runs, even when the subsequent draw is skipped.
    pub fn update(&mut self) {
        self.camera.update();
    }

    /// Run one frame step: sample visibility once, then either draw the
    /// mesh with the current camera matrix and blend factor, or skip all
    /// GPU work.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain texture cannot be
    /// acquired; the host reacts by reconfiguring the surface.
    pub fn render(&mut self) -> Result<FrameOutcome, wgpu::SurfaceError> {
        if self.torn_down {
            return Ok(FrameOutcome::Skipped);
        }

        // Sampled once per frame; not re-read mid-frame.
        let visible = self.visibility.is_visible();
        if !should_draw(visible, self.run_in_background) {
            return Ok(FrameOutcome::Skipped);
        }

        let matrix = self
            .camera
            .matrix(self.context.config.width, self.context.config.height);
        self.renderer
            .set_view_projection(&self.context.queue, matrix);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        self.renderer.draw(&mut encoder, &view);
        self.context.submit(encoder);
        frame.present();

        Ok(FrameOutcome::Drawn)
    }

    /// Set the shape blend factor from the host's control, clamped to
    /// `[0,1]`. 0 = twisted prism, 1 = spherized.
    pub fn set_blend_factor(&mut self, factor: f32) {
        self.renderer
            .set_blend_factor(&self.context.queue, factor);
    }

    /// The engine's authoritative blend factor.
    #[must_use]
    pub fn blend_factor(&self) -> f32 {
        self.renderer.blend_factor()
    }

    /// Reconfigure the surface and depth attachment for a new size.
    /// Zero-sized dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.renderer
            .resize(&self.context.device, width, height);
    }

    /// Tear down: stop accepting frames and input, detach visibility
    /// observation. Idempotent — a second call has no further effect — and
    /// never raises. GPU resources are released when the engine drops.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.camera.cleanup();
        self.visibility.cleanup();
        log::info!("engine unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::VisibilityChecker;

    #[test]
    fn test_gate_truth_table() {
        assert!(should_draw(true, false));
        assert!(should_draw(true, true));
        assert!(should_draw(false, true));
        assert!(!should_draw(false, false));
    }

    #[test]
    fn test_gate_tracks_visibility_observations() {
        // While occluded and not forced, no frame in the interval draws;
        // with run_in_background the gate is always open.
        let mut vis = VisibilityChecker::new();
        vis.observe_occluded(true);
        for _ in 0..10 {
            assert!(!should_draw(vis.is_visible(), false));
            assert!(should_draw(vis.is_visible(), true));
        }
        vis.observe_occluded(false);
        assert!(should_draw(vis.is_visible(), false));
    }
}
