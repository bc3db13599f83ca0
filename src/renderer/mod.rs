//! The prism render pipeline: one shader program, one write-once vertex
//! buffer, one uniform buffer.

use wgpu::util::DeviceExt;

use crate::geometry::{prism_vertex_buffer_layout, PrismVertex};
use crate::gpu::render_context::RenderContext;

/// GPU uniform block: view-projection matrix plus the shape blend factor.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PrismUniform {
    /// Combined view-projection matrix.
    pub world_view_projection: [[f32; 4]; 4],
    /// Blend between authored position (0) and sphere projection (1).
    pub blend_factor: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 3],
}

impl Default for PrismUniform {
    fn default() -> Self {
        Self {
            world_view_projection: glam::Mat4::IDENTITY.to_cols_array_2d(),
            blend_factor: 0.0,
            _pad: [0.0; 3],
        }
    }
}

impl PrismUniform {
    /// Set the blend factor, clamped to `[0,1]`.
    pub fn set_blend_factor(&mut self, factor: f32) {
        self.blend_factor = factor.clamp(0.0, 1.0);
    }

    /// Store this frame's view-projection matrix.
    pub fn set_view_projection(&mut self, matrix: glam::Mat4) {
        self.world_view_projection = matrix.to_cols_array_2d();
    }
}

/// Owns the prism's GPU program and buffers for its entire lifetime.
pub struct PrismRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    uniform: PrismUniform,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
}

impl PrismRenderer {
    /// Compile the shader, build the pipeline, and upload `mesh` once as
    /// static vertex storage.
    #[must_use]
    pub fn new(context: &RenderContext, mesh: &[PrismVertex]) -> Self {
        let device = &context.device;

        let shader =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Prism Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("../../assets/shaders/prism.wgsl").into(),
                ),
            });

        let uniform = PrismUniform::default();
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Prism Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let bind_group_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Prism Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Prism Bind Group"),
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Prism Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Prism Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[prism_vertex_buffer_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: Some(depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Prism Vertex Buffer"),
                contents: bytemuck::cast_slice(mesh),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let depth_view = create_depth_view(
            device,
            context.config.width,
            context.config.height,
        );

        log::info!(
            "prism pipeline ready: {} vertices ({} triangles)",
            mesh.len(),
            mesh.len() / 3
        );

        Self {
            pipeline,
            vertex_buffer,
            vertex_count: mesh.len() as u32,
            uniform,
            uniform_buffer,
            bind_group,
            depth_view,
        }
    }

    /// Number of triangles in the uploaded mesh.
    #[must_use]
    pub fn triangle_count(&self) -> u32 {
        self.vertex_count / 3
    }

    /// Current blend factor (the renderer holds the authoritative copy).
    #[must_use]
    pub fn blend_factor(&self) -> f32 {
        self.uniform.blend_factor
    }

    /// Set the shape blend factor, clamped to `[0,1]`, and push it to the
    /// GPU.
    pub fn set_blend_factor(&mut self, queue: &wgpu::Queue, factor: f32) {
        self.uniform.set_blend_factor(factor);
        self.write_uniform(queue);
    }

    /// Upload this frame's view-projection matrix.
    pub fn set_view_projection(
        &mut self,
        queue: &wgpu::Queue,
        matrix: glam::Mat4,
    ) {
        self.uniform.set_view_projection(matrix);
        self.write_uniform(queue);
    }

    fn write_uniform(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Recreate the depth attachment for a new surface size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.depth_view = create_depth_view(device, width, height);
        }
    }

    /// Encode one render pass drawing the whole mesh into `target`.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
    ) {
        let mut pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Prism Pass"),
                color_attachments: &[Some(
                    wgpu::RenderPassColorAttachment {
                        view: target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    },
                )],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

/// Background clear color (gruvbox dark).
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.016,
    g: 0.016,
    b: 0.016,
    a: 1.0,
};

/// Standard depth-stencil state for the prism pass.
fn depth_stencil_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: wgpu::TextureFormat::Depth32Float,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

fn create_depth_view(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Prism Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_defaults() {
        let uniform = PrismUniform::default();
        assert_eq!(uniform.blend_factor, 0.0);
        assert_eq!(
            uniform.world_view_projection,
            glam::Mat4::IDENTITY.to_cols_array_2d()
        );
    }

    #[test]
    fn test_blend_factor_clamped() {
        let mut uniform = PrismUniform::default();
        uniform.set_blend_factor(1.5);
        assert_eq!(uniform.blend_factor, 1.0);
        uniform.set_blend_factor(-0.2);
        assert_eq!(uniform.blend_factor, 0.0);
        uniform.set_blend_factor(0.42);
        assert_eq!(uniform.blend_factor, 0.42);
    }

    #[test]
    fn test_view_projection_stored_column_major() {
        let mut uniform = PrismUniform::default();
        let matrix = glam::Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0);
        uniform.set_view_projection(matrix);
        assert_eq!(
            uniform.world_view_projection,
            matrix.to_cols_array_2d()
        );
    }

    #[test]
    fn test_uniform_is_pod_and_aligned() {
        // mat4 (64 bytes) + f32 + 12 bytes padding = 80, a multiple of 16
        // as uniform buffers require.
        assert_eq!(size_of::<PrismUniform>(), 80);
        assert_eq!(size_of::<PrismUniform>() % 16, 0);
    }
}
