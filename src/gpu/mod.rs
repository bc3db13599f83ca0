//! wgpu resource acquisition.

pub mod render_context;
