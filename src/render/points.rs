use anyhow::{anyhow, bail};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::shader::{LinkedProgram, PipelineDesc, ShaderProgram, ShaderSource, Uniform};
use super::TRAIL_FORMAT;
use crate::palette;
use crate::view::OFFSCREEN;

pub const POINT_VERTEX_WGSL: &str = r#"
struct PointUniforms {
    viewport: vec2<f32>,
    dot_size: f32,
    pad0: f32,
};

@group(0) @binding(0) var<uniform> u: PointUniforms;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vi: u32,
    @location(0) center: vec2<f32>,
    @location(1) color: vec4<f32>,
) -> VsOut {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, 0.5),
    );
    let px = center + corners[vi] * u.dot_size;
    let ndc = px / u.viewport * 2.0 - vec2<f32>(1.0, 1.0);
    var out: VsOut;
    out.pos = vec4<f32>(ndc, 0.0, 1.0);
    out.color = color;
    return out;
}
"#;

pub const POINT_FRAGMENT_WGSL: &str = r#"
@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return color;
}
"#;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct PointUniforms {
    viewport: [f32; 2],
    dot_size: f32,
    _pad: f32,
}

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x4];

/// Instance count for `sample_count` points, or an error when the per-frame
/// color buffer would not fit in a single GPU buffer.
pub fn instance_budget(sample_count: usize, max_buffer_size: u64) -> anyhow::Result<u32> {
    let bytes = sample_count
        .checked_mul(std::mem::size_of::<[f32; 4]>())
        .and_then(|b| u64::try_from(b).ok())
        .ok_or_else(|| anyhow!("{sample_count} points per frame overflow a buffer size"))?;
    if bytes > max_buffer_size {
        bail!(
            "{sample_count} points per frame need a {bytes}-byte color buffer, \
             over the device limit of {max_buffer_size}; lower --iterations or --steps-per-frame"
        );
    }
    u32::try_from(sample_count).map_err(|_| anyhow!("{sample_count} points exceed the instance limit"))
}

pub struct PointStreamer {
    positions: Vec<[f32; 2]>,
    colors: Vec<[f32; 4]>,
    position_buffer: Option<wgpu::Buffer>,
    color_buffer: Option<wgpu::Buffer>,
    uniforms: Uniform<PointUniforms>,
    bind_group: wgpu::BindGroup,
    program: LinkedProgram,
    instance_count: u32,
}

impl PointStreamer {
    pub fn new(
        device: &wgpu::Device,
        source: &ShaderSource,
        iterations: usize,
        steps_per_frame: usize,
    ) -> anyhow::Result<Self> {
        let sample_count = iterations
            .checked_mul(steps_per_frame)
            .ok_or_else(|| anyhow!("{iterations} x {steps_per_frame} points per frame overflow"))?;
        let instance_count = instance_budget(sample_count, device.limits().max_buffer_size)?;
        let colors = palette::frame_colors(iterations, steps_per_frame);
        let positions = vec![OFFSCREEN; colors.len()];

        let uniforms = Uniform::new(
            device,
            "points.uniforms",
            PointUniforms {
                viewport: [1.0, 1.0],
                dot_size: 1.0,
                _pad: 0.0,
            },
        );
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("points.bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("points.bind_group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.binding(),
            }],
        });

        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &POSITION_ATTRS,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &COLOR_ATTRS,
            },
        ];
        let program = ShaderProgram::compile(device, source)?.link(
            device,
            PipelineDesc {
                bind_group_layout: &layout,
                buffers: &buffers,
                format: TRAIL_FORMAT,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            },
        )?;

        Ok(Self {
            positions,
            colors,
            position_buffer: None,
            color_buffer: None,
            uniforms,
            bind_group,
            program,
            instance_count,
        })
    }

    pub fn positions_mut(&mut self) -> &mut [[f32; 2]] {
        &mut self.positions
    }

    // Fresh allocations every frame; the GPU may still be reading the last ones.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, viewport: [f32; 2], dot_size: f32) {
        self.uniforms.set(
            queue,
            PointUniforms {
                viewport,
                dot_size,
                _pad: 0.0,
            },
        );
        self.position_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("points.positions"),
            contents: bytemuck::cast_slice(&self.positions),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.color_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("points.colors"),
            contents: bytemuck::cast_slice(&self.colors),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let (Some(positions), Some(colors)) = (&self.position_buffer, &self.color_buffer) else {
            return;
        };
        self.program.activate(pass);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, positions.slice(..));
        pass.set_vertex_buffer(1, colors.slice(..));
        pass.draw(0..6, 0..self.instance_count);
    }
}
