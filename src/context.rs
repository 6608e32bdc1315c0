//! Central GPU and window context.
//!
//! Owns the surface, device, queue and the camera resources shared by every
//! pipeline. The context knows nothing about the scene content; the composer
//! builds on top of it.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use winit::window::Window;

use crate::{
    camera::{self, CameraResources, Projection},
    config::BackdropConfig,
    data_structures::texture::Texture,
};

#[derive(Debug)]
pub struct Context {
    pub window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub depth_texture: Texture,
    pub camera: CameraResources,
    pub projection: Projection,
    /// Device pixel ratio, clamped to the configured maximum.
    pub pixel_ratio: f32,
}

impl Context {
    pub async fn new(window: Arc<Window>, backdrop: &BackdropConfig) -> Result<Self> {
        let size = window.inner_size();
        let pixel_ratio = clamped_pixel_ratio(window.scale_factor(), backdrop.max_pixel_ratio);

        log::info!("wgpu setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("no compatible graphics adapter: {}", e))?;

        log::info!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The shaders assume an sRGB surface; a linear format would render
        // everything darker.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let projection = Projection::new(
            config.width,
            config.height,
            cgmath::Deg(backdrop.camera_fov_deg),
            0.1,
            100.0,
        );
        let camera = CameraResources::new(
            &device,
            camera::backdrop_camera(backdrop.camera_position),
            &projection,
        );

        let depth_texture =
            Texture::create_depth_texture(&device, [config.width, config.height], "depth_texture");

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            depth_texture,
            camera,
            projection,
            pixel_ratio,
        })
    }

    pub fn resolution(&self) -> [f32; 2] {
        [self.config.width as f32, self.config.height as f32]
    }
}

/// Device pixel ratio capped at the configured maximum. Recomputed whenever
/// the window changes monitor or scale, not just at startup.
pub fn clamped_pixel_ratio(scale_factor: f64, max_pixel_ratio: f32) -> f32 {
    (scale_factor as f32).min(max_pixel_ratio)
}
