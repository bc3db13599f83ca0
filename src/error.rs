//! Crate-level error types.

use std::fmt;

use crate::geometry::GeometryError;
use crate::gpu::render_context::RenderContextError;

/// Errors produced by the twisted-prism crate.
#[derive(Debug)]
pub enum PrismError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Invalid mesh construction parameters.
    Geometry(GeometryError),
    /// Event-loop / host window failure.
    Host(String),
}

impl fmt::Display for PrismError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Geometry(e) => write!(f, "geometry error: {e}"),
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for PrismError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Geometry(e) => Some(e),
            Self::Host(_) => None,
        }
    }
}

impl From<RenderContextError> for PrismError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<GeometryError> for PrismError {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e)
    }
}
