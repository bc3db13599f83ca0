//! Trackball orbit camera: projection math, pointer-driven controller, and
//! winit event translation.

pub mod controller;
pub mod core;
pub mod input;

pub use controller::{TrackballCamera, TrackballCameraOptions};
pub use input::InputHandler;
