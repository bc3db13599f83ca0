//! Pointer-driven trackball camera.
//!
//! Pointer events only queue input; all orientation/distance mutation
//! happens in [`TrackballCamera::update`], once per frame, so the frame
//! ordering guarantee (update, then matrix read, then draw) holds no matter
//! when events arrive.

use glam::{Mat4, Quat, Vec2, Vec3};

use super::core::Camera;

const FOVY_DEGREES: f32 = 45.0;
const ZNEAR: f32 = 0.1;
const ZFAR: f32 = 100.0;

const ROTATE_SPEED: f32 = 0.01;
const PAN_SPEED: f32 = 0.005;
const ZOOM_SPEED: f32 = 0.05;
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 20.0;

/// Construction options for [`TrackballCamera`].
#[derive(Debug, Clone, Copy)]
pub struct TrackballCameraOptions {
    /// Initial orientation.
    pub rotation: Quat,
    /// Initial orbit distance.
    pub distance: f32,
    /// Ignore the vertical drag component (no rotation about the view's
    /// horizontal axis).
    pub lock_horizontal: bool,
    /// Ignore the horizontal drag component (no rotation about the view's
    /// vertical axis).
    pub lock_vertical: bool,
}

impl Default for TrackballCameraOptions {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            distance: 3.0,
            lock_horizontal: false,
            lock_vertical: false,
        }
    }
}

/// Pointer-interaction state: a drag is in flight or it is not.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { last: Vec2 },
}

/// Orbit camera whose orientation is driven by 2D pointer drags.
pub struct TrackballCamera {
    orientation: Quat,
    distance: f32,
    world_offset: Vec3,
    lock_horizontal: bool,
    lock_vertical: bool,

    drag: DragState,
    pending_rotation: Vec2,
    pending_pan: Vec2,
    pending_zoom: f32,
    detached: bool,
}

impl Default for TrackballCamera {
    fn default() -> Self {
        Self::new(TrackballCameraOptions::default())
    }
}

impl TrackballCamera {
    /// Create a camera from the given options.
    #[must_use]
    pub fn new(options: TrackballCameraOptions) -> Self {
        Self {
            orientation: options.rotation.normalize(),
            distance: options.distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            world_offset: Vec3::ZERO,
            lock_horizontal: options.lock_horizontal,
            lock_vertical: options.lock_vertical,
            drag: DragState::Idle,
            pending_rotation: Vec2::ZERO,
            pending_pan: Vec2::ZERO,
            pending_zoom: 0.0,
            detached: false,
        }
    }

    /// Current orientation quaternion.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Current orbit distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// `true` while a drag gesture is in flight.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    // -- pointer events (queue input only) --------------------------------

    /// Pointer pressed at `pos`: Idle -> Dragging, capturing the origin.
    pub fn pointer_down(&mut self, pos: Vec2) {
        if self.detached {
            return;
        }
        self.drag = DragState::Dragging { last: pos };
    }

    /// Pointer moved: while dragging, accumulate displacement (rotation) or
    /// pan displacement when `pan` is set.
    pub fn pointer_move(&mut self, pos: Vec2, pan: bool) {
        if self.detached {
            return;
        }
        if let DragState::Dragging { last } = self.drag {
            let delta = pos - last;
            if pan {
                self.pending_pan += delta;
            } else {
                self.pending_rotation += delta;
            }
            self.drag = DragState::Dragging { last: pos };
        }
    }

    /// Pointer released / left / cancelled: Dragging -> Idle. Displacement
    /// already queued stays queued.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Scroll input: queue a zoom step, independent of orientation.
    pub fn scroll(&mut self, delta: f32) {
        if self.detached {
            return;
        }
        self.pending_zoom += delta;
    }

    // -- per-frame step ----------------------------------------------------

    /// Apply input queued since the last call. Callable every frame in any
    /// interaction state; a call with no queued input changes nothing.
    pub fn update(&mut self) {
        let rotation = self.pending_rotation;
        let pan = self.pending_pan;
        let zoom = self.pending_zoom;
        self.pending_rotation = Vec2::ZERO;
        self.pending_pan = Vec2::ZERO;
        self.pending_zoom = 0.0;

        if rotation != Vec2::ZERO {
            self.apply_rotation(rotation);
        }
        if pan != Vec2::ZERO {
            let right = self.orientation * Vec3::X;
            let up = self.orientation * Vec3::Y;
            self.world_offset +=
                right * (-pan.x * PAN_SPEED) + up * (pan.y * PAN_SPEED);
        }
        if zoom != 0.0 {
            self.distance = (self.distance * (1.0 - zoom * ZOOM_SPEED))
                .clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }

    /// Map drag displacement to rotation about the view's vertical
    /// (from the horizontal component) and horizontal (from the vertical
    /// component) axes, honoring the lock flags.
    fn apply_rotation(&mut self, delta: Vec2) {
        if !self.lock_vertical {
            let up = self.orientation * Vec3::Y;
            self.orientation = Quat::from_axis_angle(
                up,
                -delta.x * ROTATE_SPEED,
            ) * self.orientation;
        }
        if !self.lock_horizontal {
            let right = self.orientation * Vec3::X;
            self.orientation = Quat::from_axis_angle(
                right,
                -delta.y * ROTATE_SPEED,
            ) * self.orientation;
        }
        self.orientation = self.orientation.normalize();
    }

    // -- read-only accessors ----------------------------------------------

    /// Compose the view-projection matrix for the given viewport size:
    /// perspective projection from the aspect ratio and fixed fov/near/far,
    /// times a view transform from the current orientation, distance, and
    /// world offset. Recomputed on every call; does not mutate state.
    #[must_use]
    pub fn matrix(
        &self,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Mat4 {
        let aspect =
            viewport_width as f32 / viewport_height.max(1) as f32;
        let camera = Camera {
            eye: self.world_offset
                + self.orientation * Vec3::Z * self.distance,
            target: self.world_offset,
            up: self.orientation * Vec3::Y,
            aspect,
            fovy: FOVY_DEGREES,
            znear: ZNEAR,
            zfar: ZFAR,
        };
        camera.build_matrix()
    }

    // -- teardown ----------------------------------------------------------

    /// Stop accepting input. Idempotent: a second call is a no-op.
    pub fn cleanup(&mut self) {
        self.detached = true;
        self.drag = DragState::Idle;
        self.pending_rotation = Vec2::ZERO;
        self.pending_pan = Vec2::ZERO;
        self.pending_zoom = 0.0;
    }
}
