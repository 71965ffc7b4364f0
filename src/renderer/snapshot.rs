//! Frame snapshot for PNG export.
//!
//! Renders the current mesh into an offscreen texture in the surface
//! format, copies it into a row-padded readback buffer, and converts the
//! mapped bytes into an [`image::RgbaImage`]. The snapshot reflects the
//! same camera and lighting as the on-screen frame.

use image::RgbaImage;

use crate::camera::OrbitCamera;
use crate::errors::{MillinerError, Result};

use super::{Renderer, frame_uniforms};

impl Renderer {
    /// Captures the current hat with the given camera into an RGBA image
    /// sized to the surface.
    pub fn snapshot(&mut self, camera: &OrbitCamera) -> Result<RgbaImage> {
        if self.disposed {
            return Err(MillinerError::Disposed);
        }
        let Some(gpu) = self.gpu.as_ref() else {
            return Err(MillinerError::ContextUnavailable(
                "renderer not initialized".into(),
            ));
        };
        let Some(hat) = self.mesh.as_ref() else {
            return Err(MillinerError::Snapshot("no mesh uploaded".into()));
        };

        let format = gpu.context.color_format();
        let swizzle_bgra = match format {
            wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => false,
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => true,
            other => {
                return Err(MillinerError::Snapshot(format!(
                    "unsupported surface format {other:?}"
                )));
            }
        };

        let (width, height) = gpu.context.size();
        let target = gpu.context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Snapshot Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());

        // Rows must be aligned for texture-to-buffer copies.
        let bytes_per_row = width * 4;
        let padded_bytes_per_row =
            bytes_per_row.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let readback = gpu.context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Snapshot Readback"),
            size: u64::from(padded_bytes_per_row) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let uniforms = frame_uniforms(camera, gpu.context.aspect(), hat.color);
        gpu.context
            .queue
            .write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder =
            gpu.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Snapshot Encoder"),
                });
        super::draw_hat(
            gpu,
            hat,
            &mut encoder,
            &target_view,
            &gpu.context.depth_texture_view,
        );
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        gpu.context.queue.submit(std::iter::once(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        gpu.context
            .device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| MillinerError::Snapshot(e.to_string()))?;
        rx.recv()
            .map_err(|e| MillinerError::Snapshot(e.to_string()))?
            .map_err(|e| MillinerError::Snapshot(e.to_string()))?;

        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        {
            let data = slice.get_mapped_range();
            for row in data.chunks_exact(padded_bytes_per_row as usize) {
                pixels.extend_from_slice(&row[..bytes_per_row as usize]);
            }
        }
        readback.unmap();

        if swizzle_bgra {
            for px in pixels.chunks_exact_mut(4) {
                px.swap(0, 2);
            }
        }

        RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| MillinerError::Snapshot("pixel buffer size mismatch".into()))
    }
}
