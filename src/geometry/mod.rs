//! Procedural mesh construction: plane grids, the twisted prism, and the
//! interleaved vertex format shared with the GPU pipeline.

pub mod palette;
pub mod plane;
pub mod prism;

use std::fmt;

/// Number of `f32` fields per [`PrismVertex`].
pub const FLOATS_PER_VERTEX: usize = 8;

/// Upper bound on grid divisions per axis. Keeps cell counts inside safe
/// integer range and vertex buffers inside plausible memory before an
/// allocation would fail on its own.
pub const MAX_GRID_DIVISIONS: u32 = 4096;

/// 32-byte interleaved vertex: position, face color, barycentric tag.
///
/// The barycentric tag cycles `(0,0), (0,1), (1,0)` over each triangle's
/// corners and is consumed by the fragment stage to synthesize wireframe
/// lines from screen-space derivatives.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PrismVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Face color, constant per logical face.
    pub color: [f32; 3],
    /// Barycentric corner tag.
    pub barycenter: [f32; 2],
}

/// Vertex buffer layout matching [`PrismVertex`]: three attributes at
/// shader locations 0 (position), 1 (color), 2 (barycenter).
#[must_use]
pub fn prism_vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<PrismVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 24,
                shader_location: 2,
            },
        ],
    }
}

/// The barycentric tag for the `i`-th emitted point of a triangle stream.
#[must_use]
pub fn barycenter_tag(i: usize) -> [f32; 2] {
    match i % 3 {
        0 => [0.0, 0.0],
        1 => [0.0, 1.0],
        _ => [1.0, 0.0],
    }
}

/// Invalid mesh construction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// A grid was requested with zero divisions along some axis.
    ZeroDivisions {
        /// Requested divisions along U.
        divisions_u: u32,
        /// Requested divisions along V.
        divisions_v: u32,
    },
    /// A grid was requested beyond [`MAX_GRID_DIVISIONS`] along some axis.
    GridTooLarge {
        /// Requested divisions along U.
        divisions_u: u32,
        /// Requested divisions along V.
        divisions_v: u32,
    },
    /// The prism's long-axis length must be finite and positive.
    InvalidStretch {
        /// The rejected length.
        stretch_length: f32,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDivisions {
                divisions_u,
                divisions_v,
            } => write!(
                f,
                "grid divisions must be positive, got {divisions_u}x{divisions_v}"
            ),
            Self::GridTooLarge {
                divisions_u,
                divisions_v,
            } => write!(
                f,
                "grid divisions must be at most {MAX_GRID_DIVISIONS} per axis, \
                 got {divisions_u}x{divisions_v}"
            ),
            Self::InvalidStretch { stretch_length } => write!(
                f,
                "stretch length must be finite and positive, got {stretch_length}"
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_8_floats() {
        assert_eq!(size_of::<PrismVertex>(), FLOATS_PER_VERTEX * 4);
    }

    #[test]
    fn test_barycenter_tags_cycle() {
        assert_eq!(barycenter_tag(0), [0.0, 0.0]);
        assert_eq!(barycenter_tag(1), [0.0, 1.0]);
        assert_eq!(barycenter_tag(2), [1.0, 0.0]);
        assert_eq!(barycenter_tag(3), [0.0, 0.0]);
        assert_eq!(barycenter_tag(301), [0.0, 1.0]);
    }

    #[test]
    fn test_layout_matches_vertex_stride() {
        let layout = prism_vertex_buffer_layout();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[2].offset, 24);
    }
}
