//! Shader program management.
//!
//! Compiles the vertex and fragment WGSL sources into separate shader
//! modules and links them into one render pipeline, capturing driver
//! validation logs through error scopes so a bad shader fails with
//! [`ShaderCompile`](crate::MillinerError::ShaderCompile) (and a bad link
//! with [`ProgramLink`](crate::MillinerError::ProgramLink)) instead of
//! aborting the process.

use std::collections::HashMap;

use crate::errors::{MillinerError, Result};

/// Default vertex stage: transforms positions by the MVP matrix and carries
/// the transformed normal to the fragment stage.
pub const HAT_VERTEX_SHADER: &str = r"
struct Uniforms {
    mvp: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    light_dir: vec4<f32>,
    base_color: vec4<f32>,
};

@group(0) @binding(0) var<uniform> u: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = u.mvp * vec4<f32>(in.position, 1.0);
    out.normal = (u.normal_matrix * vec4<f32>(in.normal, 0.0)).xyz;
    return out;
}
";

/// Default fragment stage. The lighting law is fixed:
/// `base_color * (max(dot(n, light), 0) * 0.8 + 0.2)` — 0.8 diffuse weight
/// over a 0.2 ambient floor.
pub const HAT_FRAGMENT_SHADER: &str = r"
struct Uniforms {
    mvp: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    light_dir: vec4<f32>,
    base_color: vec4<f32>,
};

@group(0) @binding(0) var<uniform> u: Uniforms;

@fragment
fn fs_main(@location(0) normal: vec3<f32>) -> @location(0) vec4<f32> {
    let n = normalize(normal);
    let diffuse = max(dot(n, u.light_dir.xyz), 0.0);
    let lit = u.base_color.rgb * (diffuse * 0.8 + 0.2);
    return vec4<f32>(lit, 1.0);
}
";

/// CPU-side mirror of the shader `Uniforms` block (std140-compatible:
/// vec3 uniforms are padded out to vec4).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HatUniforms {
    pub mvp: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub light_dir: [f32; 4],
    pub base_color: [f32; 4],
}

/// A named slot resolved by [`ShaderProgram::locate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderLocation {
    /// Vertex attribute shader location (also the vertex buffer slot).
    Attribute(u32),
    /// Byte offset of a field inside the uniform block.
    Uniform { offset: u32 },
}

/// A compiled and linked shader program plus its fixed binding layout.
pub struct ShaderProgram {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
    locations: HashMap<&'static str, ShaderLocation>,
}

impl ShaderProgram {
    /// Compiles both stages and links them into a render pipeline targeting
    /// the given color/depth formats.
    pub fn compile(
        device: &wgpu::Device,
        vertex_source: &str,
        fragment_source: &str,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        cull_back_faces: bool,
    ) -> Result<Self> {
        let vs_module = compile_stage(device, vertex_source, "vertex")?;
        let fs_module = compile_stage(device, fragment_source, "fragment")?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Hat Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Hat Pipeline Layout"),
            bind_group_layouts: &[Some(&bind_group_layout)],
            immediate_size: 0,
        });

        let vertex_buffers = [
            // Position buffer, slot 0
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                }],
            },
            // Normal buffer, slot 1
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                }],
            },
        ];

        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Hat Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &vs_module,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fs_module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: cull_back_faces.then_some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: Some(true),
                depth_compare: Some(wgpu::CompareFunction::Less),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });
        if let Some(error) = pollster::block_on(error_scope.pop()) {
            return Err(MillinerError::ProgramLink(error.to_string()));
        }

        Ok(Self {
            pipeline,
            bind_group_layout,
            locations: binding_table(),
        })
    }

    /// Looks up a named attribute or uniform field. Returns `None` for
    /// names the program does not expose — absent attributes are legal,
    /// not an error.
    #[must_use]
    pub fn locate(&self, name: &str) -> Option<ShaderLocation> {
        self.locations.get(name).copied()
    }
}

fn compile_stage(
    device: &wgpu::Device,
    source: &str,
    stage: &'static str,
) -> Result<wgpu::ShaderModule> {
    let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(stage),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match pollster::block_on(error_scope.pop()) {
        None => Ok(module),
        Some(error) => Err(MillinerError::ShaderCompile {
            stage,
            log: error.to_string(),
        }),
    }
}

/// The fixed binding layout of the default program. Uniform offsets match
/// the field layout of [`HatUniforms`].
pub(crate) fn binding_table() -> HashMap<&'static str, ShaderLocation> {
    HashMap::from([
        ("position", ShaderLocation::Attribute(0)),
        ("normal", ShaderLocation::Attribute(1)),
        ("mvp", ShaderLocation::Uniform { offset: 0 }),
        ("normal_matrix", ShaderLocation::Uniform { offset: 64 }),
        ("light_dir", ShaderLocation::Uniform { offset: 128 }),
        ("base_color", ShaderLocation::Uniform { offset: 144 }),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_table_matches_uniform_layout() {
        let table = binding_table();
        assert_eq!(table["position"], ShaderLocation::Attribute(0));
        assert_eq!(table["normal"], ShaderLocation::Attribute(1));
        assert_eq!(table["mvp"], ShaderLocation::Uniform { offset: 0 });
        assert_eq!(
            table["normal_matrix"],
            ShaderLocation::Uniform {
                offset: std::mem::offset_of!(HatUniforms, normal_matrix) as u32
            }
        );
        assert_eq!(
            table["light_dir"],
            ShaderLocation::Uniform {
                offset: std::mem::offset_of!(HatUniforms, light_dir) as u32
            }
        );
        assert_eq!(
            table["base_color"],
            ShaderLocation::Uniform {
                offset: std::mem::offset_of!(HatUniforms, base_color) as u32
            }
        );
        assert_eq!(std::mem::size_of::<HatUniforms>(), 160);
    }

    #[test]
    fn unknown_name_is_not_found() {
        assert_eq!(binding_table().get("uv"), None);
    }
}
