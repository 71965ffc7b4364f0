//! GPU mesh upload.
//!
//! [`upload`] copies a generated [`Mesh`](crate::geometry::Mesh) into three
//! GPU buffers and returns an opaque render-ready handle. The caller's mesh
//! is untouched; the handle owns the buffers and releases them on drop, so
//! replacing the live handle on a configuration change cannot leak.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::errors::{MillinerError, Result};
use crate::geometry::Mesh;

/// An uploaded, render-ready mesh.
pub struct GpuMesh {
    pub position_buffer: wgpu::Buffer,
    pub normal_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    /// Number of indices to draw; always `mesh.indices.len()`.
    pub index_count: u32,
    pub color: Vec3,
}

/// Uploads mesh data under an out-of-memory error scope. A failed
/// allocation returns [`Upload`](MillinerError::Upload) and leaves any
/// previously uploaded handle untouched in the caller.
pub fn upload(device: &wgpu::Device, mesh: &Mesh, color: Vec3) -> Result<GpuMesh> {
    debug_assert_eq!(mesh.positions.len(), mesh.normals.len());
    debug_assert_eq!(mesh.indices.len() % 3, 0);

    let error_scope = device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

    let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Hat Positions"),
        contents: bytemuck::cast_slice(&mesh.positions),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let normal_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Hat Normals"),
        contents: bytemuck::cast_slice(&mesh.normals),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Hat Indices"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    if let Some(error) = pollster::block_on(error_scope.pop()) {
        return Err(MillinerError::Upload(error.to_string()));
    }

    Ok(GpuMesh {
        position_buffer,
        normal_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
        color,
    })
}
