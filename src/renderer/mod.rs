//! Minimal render pipeline.
//!
//! The [`Renderer`] owns the GPU context, the compiled hat shader program,
//! and the single live [`GpuMesh`]. Its lifecycle is
//! `Uninitialized → Ready → Disposed`: [`Renderer::init`] acquires the
//! context and compiles the default program (fatal on failure),
//! [`Renderer::render_frame`] runs once per animation tick, and after
//! [`Renderer::dispose`] every call fails with
//! [`Disposed`](MillinerError::Disposed). Per-frame surface errors are
//! logged and the frame skipped; they never abort the loop.

pub mod context;
pub mod mesh;
pub mod program;
pub mod settings;
mod snapshot;

use std::sync::Arc;

use bytemuck::Zeroable;
use glam::{Mat4, Vec3};
use winit::window::Window;

use crate::camera::OrbitCamera;
use crate::errors::{MillinerError, Result};
use crate::geometry::Mesh;

pub use context::WgpuContext;
pub use mesh::GpuMesh;
pub use program::{
    HAT_FRAGMENT_SHADER, HAT_VERTEX_SHADER, HatUniforms, ShaderLocation, ShaderProgram,
};
pub use settings::RendererSettings;

/// Fixed vertical field of view in degrees.
const FOV_Y_DEGREES: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;
/// The hat sits slightly below eye level.
const MODEL_OFFSET: Vec3 = Vec3::new(0.0, -0.5, 0.0);
/// World-space directional light (normalized before upload).
const LIGHT_DIRECTION: Vec3 = Vec3::new(0.5, 0.7, 0.5);

/// Frame counters exposed as the renderer's observability hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStats {
    /// Frames processed, including skipped and no-mesh frames.
    pub frames: u64,
    /// Indexed draw calls actually issued.
    pub draw_calls: u64,
    /// Index count of the most recent draw call.
    pub last_index_count: u32,
}

pub(crate) struct Gpu {
    pub(crate) context: WgpuContext,
    pub(crate) program: ShaderProgram,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub struct Renderer {
    settings: RendererSettings,
    gpu: Option<Gpu>,
    mesh: Option<GpuMesh>,
    disposed: bool,
    stats: RenderStats,
}

impl Renderer {
    #[must_use]
    pub fn new(settings: RendererSettings) -> Self {
        Self {
            settings,
            gpu: None,
            mesh: None,
            disposed: false,
            stats: RenderStats::default(),
        }
    }

    /// Acquires the graphics context for the window and compiles the
    /// default program. Fatal on failure: no valid program means rendering
    /// is impossible, so errors propagate to abort initialization.
    pub async fn init(&mut self, window: Arc<Window>) -> Result<()> {
        if self.disposed {
            return Err(MillinerError::Disposed);
        }

        let size = window.inner_size();
        let context = WgpuContext::new(window, &self.settings, size.width, size.height).await?;

        let program = ShaderProgram::compile(
            &context.device,
            HAT_VERTEX_SHADER,
            HAT_FRAGMENT_SHADER,
            context.color_format(),
            context.depth_format,
            self.settings.cull_back_faces,
        )?;
        debug_assert!(program.locate("position").is_some());
        debug_assert!(program.locate("normal").is_some());

        let uniform_buffer = {
            use wgpu::util::DeviceExt;
            context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Hat Uniforms"),
                    contents: bytemuck::bytes_of(&HatUniforms::zeroed()),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                })
        };

        let bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Hat Bind Group"),
            layout: &program.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let (width, height) = context.size();
        log::info!(
            "renderer initialized ({width}x{height}, {:?})",
            context.color_format()
        );

        self.gpu = Some(Gpu {
            context,
            program,
            uniform_buffer,
            bind_group,
        });
        Ok(())
    }

    /// True once initialized and not yet disposed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.disposed && self.gpu.is_some()
    }

    #[must_use]
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.context.resize(width, height);
        }
    }

    /// Uploads a freshly generated mesh, replacing the previous handle.
    /// On upload failure the previous handle stays live, so the last valid
    /// hat keeps rendering.
    pub fn set_mesh(&mut self, mesh: &Mesh, color: Vec3) -> Result<()> {
        if self.disposed {
            return Err(MillinerError::Disposed);
        }
        let Some(gpu) = self.gpu.as_ref() else {
            return Err(MillinerError::ContextUnavailable(
                "renderer not initialized".into(),
            ));
        };

        let handle = mesh::upload(&gpu.context.device, mesh, color)?;
        self.stats.last_index_count = handle.index_count;
        self.mesh = Some(handle);
        Ok(())
    }

    /// Renders one frame for the given camera state. With no mesh uploaded
    /// this is a logged no-op. Surface acquisition errors are logged and
    /// the frame skipped; the loop continues.
    pub fn render_frame(&mut self, camera: &OrbitCamera, time: f32) -> Result<()> {
        if self.disposed {
            return Err(MillinerError::Disposed);
        }
        self.stats.frames += 1;
        let Some(gpu) = self.gpu.as_ref() else {
            return Err(MillinerError::ContextUnavailable(
                "renderer not initialized".into(),
            ));
        };

        let Some(hat) = self.mesh.as_ref() else {
            log::debug!("no mesh uploaded; skipping frame");
            return Ok(());
        };

        let frame = match gpu.context.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(frame)
            | wgpu::CurrentSurfaceTexture::Suboptimal(frame) => frame,
            wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated => {
                log::warn!("surface lost/outdated; reconfiguring and skipping frame");
                gpu.context
                    .surface
                    .configure(&gpu.context.device, &gpu.context.config);
                return Ok(());
            }
            other => {
                log::warn!("failed to acquire frame ({other:?}); skipping");
                return Ok(());
            }
        };

        let uniforms = frame_uniforms(camera, gpu.context.aspect(), hat.color);
        gpu.context
            .queue
            .write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            gpu.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Frame Encoder"),
                });

        draw_hat(gpu, hat, &mut encoder, &view, &gpu.context.depth_texture_view);

        gpu.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        self.stats.draw_calls += 1;
        log::trace!("frame {} at t={time:.2}s", self.stats.frames);
        Ok(())
    }

    /// Releases GPU program and buffer resources. Any renderer call after
    /// this fails with [`Disposed`](MillinerError::Disposed).
    pub fn dispose(&mut self) {
        self.mesh = None;
        self.gpu = None;
        self.disposed = true;
        log::info!("renderer disposed");
    }
}

/// Builds the per-frame uniform block: fixed 45° projection, view from the
/// orbit camera, model translation, inverse-transpose normal matrix.
/// Matrices are recomputed from scratch every frame, never accumulated.
fn frame_uniforms(camera: &OrbitCamera, aspect: f32, color: Vec3) -> HatUniforms {
    let projection = Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR);
    let view = camera.view_matrix();
    let model = Mat4::from_translation(MODEL_OFFSET);

    HatUniforms {
        mvp: (projection * view * model).to_cols_array_2d(),
        normal_matrix: model.inverse().transpose().to_cols_array_2d(),
        light_dir: LIGHT_DIRECTION.normalize().extend(0.0).to_array(),
        base_color: color.extend(1.0).to_array(),
    }
}

/// Records the clear + single indexed draw into `encoder`. Shared by the
/// on-screen frame path and the offscreen snapshot path.
fn draw_hat(
    gpu: &Gpu,
    hat: &GpuMesh,
    encoder: &mut wgpu::CommandEncoder,
    color_view: &wgpu::TextureView,
    depth_view: &wgpu::TextureView,
) {
    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Hat Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(gpu.context.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    pass.set_pipeline(&gpu.program.pipeline);
    pass.set_bind_group(0, &gpu.bind_group, &[]);
    pass.set_vertex_buffer(0, hat.position_buffer.slice(..));
    pass.set_vertex_buffer(1, hat.normal_buffer.slice(..));
    pass.set_index_buffer(hat.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
    pass.draw_indexed(0..hat.index_count, 0, 0..1);
}
