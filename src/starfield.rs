//! Procedural star field: point geometry generation and its GPU resources.
//!
//! Generation is pure so the distribution invariants can be tested; the GPU
//! half allocates its vertex buffer once and is never resized. Per frame only
//! the `time` uniform (and the field's own rotation) change; `pixel_ratio`
//! and `resolution` change only on window resize.

use rand::{Rng, SeedableRng, rngs::StdRng};
use wgpu::util::DeviceExt;

use crate::{
    config::StarBounds,
    data_structures::{instance::Instance, model::Vertex},
};

/// CPU-side star point cloud: `positions` is `3 * count` interleaved xyz
/// floats, `scales` is one factor per star in `[0, 1)`.
#[derive(Clone, Debug)]
pub struct StarFieldGeometry {
    pub positions: Vec<f32>,
    pub scales: Vec<f32>,
}

impl StarFieldGeometry {
    /// Draw `count` stars i.i.d. uniform: `x` from `[-width/2, width/2)`,
    /// `y` from `[0, height)`, `z` from `[-depth/2, depth/2)`, scale from
    /// `[0, 1)`. Non-reproducible run to run.
    pub fn generate(count: usize, bounds: StarBounds) -> Self {
        Self::from_rng(count, bounds, &mut rand::thread_rng())
    }

    /// Deterministic variant for tests; default behaviour stays unseeded.
    pub fn generate_seeded(count: usize, bounds: StarBounds, seed: u64) -> Self {
        Self::from_rng(count, bounds, &mut StdRng::seed_from_u64(seed))
    }

    fn from_rng<R: Rng>(count: usize, bounds: StarBounds, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count * 3);
        let mut scales = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push((rng.r#gen::<f32>() - 0.5) * bounds.width);
            positions.push(rng.r#gen::<f32>() * bounds.height);
            positions.push((rng.r#gen::<f32>() - 0.5) * bounds.depth);
            scales.push(rng.r#gen::<f32>());
        }
        Self { positions, scales }
    }

    pub fn count(&self) -> usize {
        self.scales.len()
    }

    fn to_raw(&self) -> Vec<StarInstanceRaw> {
        self.scales
            .iter()
            .enumerate()
            .map(|(i, &scale)| StarInstanceRaw {
                position: [
                    self.positions[i * 3],
                    self.positions[i * 3 + 1],
                    self.positions[i * 3 + 2],
                ],
                scale,
            })
            .collect()
    }
}

/// Per-star data as stored on the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarInstanceRaw {
    pub position: [f32; 3],
    pub scale: f32,
}

impl Vertex for StarInstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<StarInstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// Star shader uniforms. Layout matches `star.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarUniforms {
    model: [[f32; 4]; 4],
    resolution: [f32; 2],
    pixel_ratio: f32,
    point_size: f32,
    time: f32,
    _padding: [f32; 3],
}

/// GPU-resident star field: the instance buffer plus the live uniform set
/// `{pixel_ratio, point_size, time}` and the field's world transform.
#[derive(Debug)]
pub struct StarField {
    count: u32,
    pub instance_buffer: wgpu::Buffer,
    uniforms: StarUniforms,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl StarField {
    pub fn new(
        device: &wgpu::Device,
        geometry: &StarFieldGeometry,
        point_size: f32,
        pixel_ratio: f32,
        resolution: [f32; 2],
    ) -> Self {
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Star Instance Buffer"),
            contents: bytemuck::cast_slice(&geometry.to_raw()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniforms = StarUniforms {
            model: Instance::default().to_matrix().into(),
            resolution,
            pixel_ratio,
            point_size,
            time: 0.0,
            _padding: [0.0; 3],
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Star Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
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
                label: Some("star_bind_group_layout"),
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("star_bind_group"),
        });

        Self {
            count: geometry.count() as u32,
            instance_buffer,
            uniforms,
            uniform_buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Per-frame update: elapsed seconds and the field's world transform.
    pub fn set_frame(&mut self, queue: &wgpu::Queue, time: f32, world: &Instance) {
        self.uniforms.time = time;
        self.uniforms.model = world.to_matrix().into();
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[self.uniforms]));
    }

    /// Resize-time update of pixel ratio and viewport resolution.
    pub fn set_surface(&mut self, queue: &wgpu::Queue, pixel_ratio: f32, resolution: [f32; 2]) {
        self.uniforms.pixel_ratio = pixel_ratio;
        self.uniforms.resolution = resolution;
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[self.uniforms]));
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn time(&self) -> f32 {
        self.uniforms.time
    }
}
