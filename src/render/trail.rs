use bytemuck::{Pod, Zeroable};

use super::points::PointStreamer;
use super::shader::{LinkedProgram, PipelineDesc, ShaderProgram, ShaderSource, Uniform};
use super::TRAIL_FORMAT;

pub const TRAIL_VERTEX_WGSL: &str = r#"
@vertex
fn vs_main(@builtin(vertex_index) vi: u32) -> @builtin(position) vec4<f32> {
    var corners = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -3.0),
        vec2<f32>(3.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );
    return vec4<f32>(corners[vi], 0.0, 1.0);
}
"#;

pub const TRAIL_FRAGMENT_WGSL: &str = r#"
struct TrailUniforms {
    fade: f32,
    pad0: f32,
    pad1: f32,
    pad2: f32,
};

@group(0) @binding(0) var<uniform> u: TrailUniforms;
@group(0) @binding(1) var prev: texture_2d<f32>;

@fragment
fn fs_main(@builtin(position) pos: vec4<f32>) -> @location(0) vec4<f32> {
    let c = textureLoad(prev, vec2<i32>(pos.xy), 0);
    return vec4<f32>(max(c.rgb - vec3<f32>(u.fade), vec3<f32>(0.0)), 1.0);
}
"#;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct TrailUniforms {
    fade: f32,
    _pad: [f32; 3],
}

impl TrailUniforms {
    fn fade(fade: f32) -> Self {
        Self { fade, _pad: [0.0; 3] }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PingPong {
    front: usize,
}

impl PingPong {
    pub fn read(self) -> usize {
        self.front
    }

    pub fn write(self) -> usize {
        1 - self.front
    }

    pub fn swap(&mut self) {
        self.front = self.write();
    }
}

struct TrailTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

pub struct TrailCompositor {
    width: u32,
    height: u32,
    layout: wgpu::BindGroupLayout,
    targets: [TrailTarget; 2],
    fade_binds: [wgpu::BindGroup; 2],
    present_binds: [wgpu::BindGroup; 2],
    fade_uniform: Uniform<TrailUniforms>,
    present_uniform: Uniform<TrailUniforms>,
    fade_program: LinkedProgram,
    present_program: LinkedProgram,
    ping: PingPong,
}

impl TrailCompositor {
    pub fn new(
        device: &wgpu::Device,
        source: &ShaderSource,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("trail.bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
            ],
        });

        let program = ShaderProgram::compile(device, source)?;
        let fade_program = program.link(
            device,
            PipelineDesc {
                bind_group_layout: &layout,
                buffers: &[],
                format: TRAIL_FORMAT,
                blend: None,
            },
        )?;
        let present_program = program.link(
            device,
            PipelineDesc {
                bind_group_layout: &layout,
                buffers: &[],
                format: surface_format,
                blend: None,
            },
        )?;

        let fade_uniform = Uniform::new(device, "trail.fade", TrailUniforms::fade(0.0));
        let present_uniform = Uniform::new(device, "trail.present", TrailUniforms::fade(0.0));
        let targets = make_targets(device, width, height);
        let fade_binds = make_binds(device, &layout, &fade_uniform, &targets);
        let present_binds = make_binds(device, &layout, &present_uniform, &targets);

        Ok(Self {
            width,
            height,
            layout,
            targets,
            fade_binds,
            present_binds,
            fade_uniform,
            present_uniform,
            fade_program,
            present_program,
            ping: PingPong::default(),
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.targets = make_targets(device, width, height);
        self.fade_binds = make_binds(device, &self.layout, &self.fade_uniform, &self.targets);
        self.present_binds = make_binds(device, &self.layout, &self.present_uniform, &self.targets);
        self.ping = PingPong::default();
    }

    /// Fades the last image into the other texture and draws `points` over it.
    pub fn composite(
        &mut self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        fade: f32,
        points: &PointStreamer,
    ) {
        self.fade_uniform.set(queue, TrailUniforms::fade(fade));
        let read = self.ping.read();
        let write = self.ping.write();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("trail.fade"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets[write].view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.fade_program.activate(&mut pass);
            pass.set_bind_group(0, &self.fade_binds[read], &[]);
            pass.draw(0..3, 0..1);
            points.draw(&mut pass);
        }
        self.ping.swap();
    }

    pub fn present(&self, encoder: &mut wgpu::CommandEncoder, surface: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("trail.present"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        self.present_program.activate(&mut pass);
        pass.set_bind_group(0, &self.present_binds[self.ping.read()], &[]);
        pass.draw(0..3, 0..1);
    }
}

fn make_targets(device: &wgpu::Device, width: u32, height: u32) -> [TrailTarget; 2] {
    let make = |label: &str| {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TRAIL_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        TrailTarget {
            _texture: texture,
            view,
        }
    };
    [make("trail.a"), make("trail.b")]
}

fn make_binds(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniform: &Uniform<TrailUniforms>,
    targets: &[TrailTarget; 2],
) -> [wgpu::BindGroup; 2] {
    let make = |target: &TrailTarget| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("trail.bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform.binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&target.view),
                },
            ],
        })
    };
    [make(&targets[0]), make(&targets[1])]
}
