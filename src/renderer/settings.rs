//! Renderer configuration.
//!
//! Consumed once during [`Renderer::init`](crate::Renderer::init) to set up
//! the GPU context and fixed pipeline state.

/// Global configuration for renderer initialization.
#[derive(Debug, Clone)]
pub struct RendererSettings {
    /// Enable vertical synchronization. The frame loop is driven by redraw
    /// requests either way; vsync just caps presentation to refresh rate.
    pub vsync: bool,

    /// GPU adapter selection preference.
    pub power_preference: wgpu::PowerPreference,

    /// Background clear color.
    pub clear_color: wgpu::Color,

    /// Depth buffer texture format.
    pub depth_format: wgpu::TextureFormat,

    /// Back-face culling. Off by default: hat parts are generated with
    /// winding that is not verified consistent, and the shapes are thin
    /// enough to be seen from both sides.
    pub cull_back_faces: bool,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            vsync: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
            // Fixed light-gray studio background.
            clear_color: wgpu::Color {
                r: 0.94,
                g: 0.94,
                b: 0.94,
                a: 1.0,
            },
            depth_format: wgpu::TextureFormat::Depth32Float,
            cull_back_faces: false,
        }
    }
}
