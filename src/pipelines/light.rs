//! Point lights for the backdrop scene.
//!
//! Two lights are always present: a pointer-tracked key light near the camera
//! and a dim fixed fill light below the page. Only the key light's position
//! changes per frame.

use wgpu::util::DeviceExt;

use crate::config::BackdropConfig;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    position: [f32; 3],
    intensity: f32,
    color: [f32; 3],
    // Uniforms require 16 byte spacing, hence the trailing pad.
    _padding: u32,
}

impl LightUniform {
    pub fn new(position: [f32; 3], color: [f32; 3], intensity: f32) -> Self {
        Self {
            position,
            intensity,
            color,
            _padding: 0,
        }
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }
}

/// Both scene lights in one uniform buffer slot.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub top: LightUniform,
    pub bottom: LightUniform,
}

#[derive(Debug)]
pub struct LightResources {
    pub uniform: LightsUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(device: &wgpu::Device, config: &BackdropConfig) -> Self {
        let uniform = LightsUniform {
            top: LightUniform::new(
                [0.0, 0.0, config.top_light_z],
                config.top_light_color,
                config.top_light_intensity,
            ),
            bottom: LightUniform::new(
                config.bottom_light_position,
                config.bottom_light_color,
                config.bottom_light_intensity,
            ),
        };

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("light_bind_group_layout"),
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("light_bind_group"),
        });

        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Move the pointer-tracked key light. Takes effect on the next
    /// [`write`](Self::write).
    pub fn set_top_position(&mut self, position: [f32; 3]) {
        self.uniform.top = LightUniform {
            position,
            ..self.uniform.top
        };
    }

    pub fn write(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
