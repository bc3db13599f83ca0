//! Host embedding contract.

/// Parameters the host supplies when mounting the demo.
#[derive(Debug, Clone, Copy)]
pub struct DemoConfig {
    /// Initial surface width in physical pixels.
    pub width: u32,
    /// Initial surface height in physical pixels.
    pub height: u32,
    /// Keep issuing draw calls while the surface is occluded.
    pub run_in_background: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            run_in_background: false,
        }
    }
}
