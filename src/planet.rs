//! Procedural planet: a UV sphere with diffuse and normal textures.

use anyhow::Result;
use cgmath::{InnerSpace, Vector3};

use crate::{
    config::BackdropConfig,
    data_structures::{
        model::{Material, Mesh, Model, ModelVertex, diffuse_normal_layout},
        texture::Texture,
    },
};

/// Generate the vertices and indices of a UV sphere.
///
/// `segments` is used for both the longitudinal and latitudinal resolution,
/// matching the reference planet's 64x64 sphere. The tangent frame follows
/// the longitude derivative so normal mapping works at every latitude.
pub fn uv_sphere(radius: f32, segments: u32) -> (Vec<ModelVertex>, Vec<u32>) {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(((segments + 1) * (segments + 1)) as usize);
    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);

    for ring in 0..=segments {
        let v = ring as f32 / segments as f32;
        let theta = v * std::f32::consts::PI;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for segment in 0..=segments {
            let u = segment as f32 / segments as f32;
            let phi = u * std::f32::consts::TAU;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = Vector3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
            let tangent = Vector3::new(-sin_phi, 0.0, cos_phi);
            let bitangent = normal.cross(tangent);

            vertices.push(ModelVertex {
                position: (normal * radius).into(),
                tex_coords: [u, v],
                normal: normal.into(),
                tangent: tangent.into(),
                bitangent: bitangent.into(),
            });
        }
    }

    let stride = segments + 1;
    for ring in 0..segments {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    (vertices, indices)
}

/// Build the planet model: generated sphere mesh plus its textured material.
///
/// Missing texture files degrade to flat defaults with a warning; the planet
/// always renders.
pub fn build_planet(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    config: &BackdropConfig,
) -> Result<Model> {
    let layout = diffuse_normal_layout(device);

    let diffuse = match &config.planet_diffuse {
        Some(path) => match std::fs::read(path) {
            Ok(bytes) => Texture::from_bytes(device, queue, &bytes, "planet diffuse", false)?,
            Err(e) => {
                log::warn!("planet diffuse texture {:?} unavailable: {}", path, e);
                Texture::create_solid_color([96, 96, 110, 255], device, queue)
            }
        },
        None => Texture::create_solid_color([96, 96, 110, 255], device, queue),
    };
    let normal = match &config.planet_normal {
        Some(path) => match std::fs::read(path) {
            Ok(bytes) => Texture::from_bytes(device, queue, &bytes, "planet normal", true)?,
            Err(e) => {
                log::warn!("planet normal texture {:?} unavailable: {}", path, e);
                Texture::create_default_normal_map(2, 2, device, queue)
            }
        },
        None => Texture::create_default_normal_map(2, 2, device, queue),
    };

    let material = Material::new(device, "planet", diffuse, normal, &layout);
    let (vertices, indices) = uv_sphere(config.planet_radius, config.planet_segments);
    let mesh = Mesh::new(device, "planet", &vertices, &indices, 0);

    Ok(Model {
        meshes: vec![mesh],
        materials: vec![material],
    })
}
