use anyhow::{bail, Context};
use bytemuck::Pod;
use std::marker::PhantomData;
use std::path::Path;
use wgpu::util::DeviceExt;

#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub label: String,
    pub vertex: String,
    pub fragment: String,
    pub geometry: Option<String>,
}

impl ShaderSource {
    pub fn embedded(label: &str, vertex: &str, fragment: &str) -> Self {
        Self {
            label: label.to_string(),
            vertex: vertex.to_string(),
            fragment: fragment.to_string(),
            geometry: None,
        }
    }

    pub fn from_dir(dir: &Path, label: &str) -> anyhow::Result<Self> {
        let read = |stage: &str| {
            let path = dir.join(format!("{label}.{stage}.wgsl"));
            std::fs::read_to_string(&path)
                .with_context(|| format!("read shader source {}", path.display()))
        };
        let geom_path = dir.join(format!("{label}.geom.wgsl"));
        let geometry = if geom_path.exists() {
            Some(read("geom")?)
        } else {
            None
        };
        Ok(Self {
            label: label.to_string(),
            vertex: read("vert")?,
            fragment: read("frag")?,
            geometry,
        })
    }

    pub fn resolve(
        dir: Option<&Path>,
        label: &str,
        vertex: &str,
        fragment: &str,
    ) -> anyhow::Result<Self> {
        match dir {
            Some(dir) => Self::from_dir(dir, label),
            None => Ok(Self::embedded(label, vertex, fragment)),
        }
    }
}

pub struct ShaderProgram {
    label: String,
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
}

pub struct PipelineDesc<'a> {
    pub bind_group_layout: &'a wgpu::BindGroupLayout,
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub format: wgpu::TextureFormat,
    pub blend: Option<wgpu::BlendState>,
}

impl ShaderProgram {
    /// Compiles both stages. Any diagnostic is returned as an error; callers treat it as fatal.
    pub fn compile(device: &wgpu::Device, source: &ShaderSource) -> anyhow::Result<Self> {
        if source.geometry.is_some() {
            bail!(
                "shader program '{}': geometry stage is not supported by this GPU backend",
                source.label
            );
        }

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(format!("{}.vert", source.label).as_str()),
            source: wgpu::ShaderSource::Wgsl(source.vertex.as_str().into()),
        });
        let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(format!("{}.frag", source.label).as_str()),
            source: wgpu::ShaderSource::Wgsl(source.fragment.as_str().into()),
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            bail!("shader program '{}' failed to compile:\n{err}", source.label);
        }

        Ok(Self {
            label: source.label.clone(),
            vertex,
            fragment,
        })
    }

    pub fn link(&self, device: &wgpu::Device, desc: PipelineDesc<'_>) -> anyhow::Result<LinkedProgram> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(format!("{}.layout", self.label).as_str()),
            bind_group_layouts: &[desc.bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label.as_str()),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &self.vertex,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: desc.buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &self.fragment,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: desc.format,
                    blend: desc.blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            bail!("shader program '{}' failed to link:\n{err}", self.label);
        }
        Ok(LinkedProgram { pipeline })
    }
}

pub struct LinkedProgram {
    pipeline: wgpu::RenderPipeline,
}

impl LinkedProgram {
    pub fn activate(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
    }
}

/// Byte size of the uniform buffer backing a `T`, rounded up to 16.
pub const fn uniform_size<T>() -> usize {
    let n = std::mem::size_of::<T>();
    let padded = (n + 15) / 16 * 16;
    if padded == 0 { 16 } else { padded }
}

/// A uniform slot holding one value of `T`: 1-4 scalars of `f32`/`i32`/`u32`,
/// a 4×4 matrix, or a `#[repr(C)]` block of them.
pub struct Uniform<T: Pod> {
    buffer: wgpu::Buffer,
    _marker: PhantomData<T>,
}

impl<T: Pod> Uniform<T> {
    pub fn new(device: &wgpu::Device, label: &str, value: T) -> Self {
        let mut contents = vec![0u8; uniform_size::<T>()];
        contents[..std::mem::size_of::<T>()].copy_from_slice(bytemuck::bytes_of(&value));
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: &contents,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            buffer,
            _marker: PhantomData,
        }
    }

    pub fn set(&self, queue: &wgpu::Queue, value: T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&value));
    }

    pub fn binding(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}
