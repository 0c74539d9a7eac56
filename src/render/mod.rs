pub mod points;
pub mod shader;
pub mod trail;

use std::sync::Arc;

use anyhow::{anyhow, Context};
use log::{debug, info, warn};
use winit::window::Window;

use crate::config::{Config, DotSize, TrailPreset};
use points::{PointStreamer, POINT_FRAGMENT_WGSL, POINT_VERTEX_WGSL};
use shader::ShaderSource;
use trail::{TrailCompositor, TRAIL_FRAGMENT_WGSL, TRAIL_VERTEX_WGSL};

pub const TRAIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub struct FrameRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    trail: TrailCompositor,
    points: PointStreamer,
}

impl FrameRenderer {
    pub fn new(window: Arc<Window>, cfg: &Config) -> anyhow::Result<Self> {
        pollster::block_on(Self::new_async(window, cfg))
    }

    async fn new_async(window: Arc<Window>, cfg: &Config) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .context("create window surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or_else(|| anyhow!("no GPU adapter can present to this window"))?;
        let info = adapter.get_info();
        info!("gpu adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("chaos_equations.device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .context("request GPU device")?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow!("window surface reports no supported formats"))?;
        let present_mode = if cfg.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        let max_dim = device.limits().max_texture_dimension_2d;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.clamp(1, max_dim),
            height: size.height.clamp(1, max_dim),
            present_mode,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        debug!(
            "surface configured: {}x{} {:?} {:?}",
            config.width, config.height, config.format, config.present_mode
        );

        let shader_dir = cfg.shader_dir.as_deref();
        let point_source =
            ShaderSource::resolve(shader_dir, "point", POINT_VERTEX_WGSL, POINT_FRAGMENT_WGSL)?;
        let trail_source =
            ShaderSource::resolve(shader_dir, "trail", TRAIL_VERTEX_WGSL, TRAIL_FRAGMENT_WGSL)?;
        let points = PointStreamer::new(&device, &point_source, cfg.iterations, cfg.steps_per_frame)?;
        let trail = TrailCompositor::new(&device, &trail_source, format, config.width, config.height)?;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            trail,
            points,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Ignores zero sizes, which some platforms report while minimized.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let max_dim = self.device.limits().max_texture_dimension_2d;
        self.config.width = width.min(max_dim);
        self.config.height = height.min(max_dim);
        self.surface.configure(&self.device, &self.config);
        self.trail.resize(&self.device, self.config.width, self.config.height);
        info!("resized to {}x{}", self.config.width, self.config.height);
    }

    pub fn positions_mut(&mut self) -> &mut [[f32; 2]] {
        self.points.positions_mut()
    }

    pub fn render(&mut self, trail: TrailPreset, dot: DotSize) -> anyhow::Result<()> {
        let Some(frame) = self.acquire()? else {
            return Ok(());
        };
        let viewport = [self.config.width as f32, self.config.height as f32];
        self.points.upload(&self.device, &self.queue, viewport, dot.pixels());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame"),
            });
        self.trail
            .composite(&self.queue, &mut encoder, trail.fade_amount(), &self.points);
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.trail.present(&mut encoder, &view);
        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    pub fn present_only(&mut self) -> anyhow::Result<()> {
        let Some(frame) = self.acquire()? else {
            return Ok(());
        };
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame.paused"),
            });
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.trail.present(&mut encoder, &view);
        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn acquire(&mut self) -> anyhow::Result<Option<wgpu::SurfaceTexture>> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost or outdated; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                debug!("surface acquire timed out; skipping frame");
                Ok(None)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                Err(anyhow!("GPU out of memory while acquiring a frame"))
            }
            #[allow(unreachable_patterns)]
            Err(err) => {
                warn!("surface error: {err}; skipping frame");
                Ok(None)
            }
        }
    }
}
