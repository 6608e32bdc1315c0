//! Asset loading: the glTF avatar, its materials and its animation clips.
//!
//! Loading runs off the render thread and produces CPU-side data only; GPU
//! upload happens when the update loop splices the avatar into the scene.
//! Animation channels are grouped by the node they target, so a clip that
//! drives several joints keeps one track per joint.

pub mod animation;
pub mod slot;

use std::{
    collections::HashMap,
    io::{BufReader, Cursor},
    path::Path,
};

use anyhow::{Context, Result, anyhow};

use crate::{
    data_structures::{instance::Instance, model::ModelVertex},
    resources::animation::{AnimationClip, Keyframes, ModelAnimation, merge_with_base},
};

/// One mesh primitive, ready for vertex buffer upload, with the index of the
/// material it binds.
#[derive(Clone, Debug)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    pub material: usize,
}

/// The encoded texture images of one material. Decoding and upload happen at
/// splice time on the loop thread; a `None` component falls back to a flat
/// default there.
#[derive(Clone, Debug)]
pub struct MaterialData {
    pub name: String,
    pub diffuse: Option<Vec<u8>>,
    pub normal: Option<Vec<u8>>,
}

/// One node of the avatar hierarchy: rest pose, the primitives it renders and
/// the merged animation tracks targeting this node.
#[derive(Clone, Debug)]
pub struct AvatarNode {
    pub name: String,
    pub local: Instance,
    pub meshes: Vec<MeshData>,
    pub animations: Vec<ModelAnimation>,
    pub children: Vec<AvatarNode>,
}

/// The decoded avatar: its node hierarchy plus the materials the meshes
/// reference by index.
#[derive(Clone, Debug)]
pub struct AvatarData {
    pub roots: Vec<AvatarNode>,
    pub materials: Vec<MaterialData>,
}

impl AvatarData {
    /// Total mesh primitives across the hierarchy.
    pub fn mesh_count(&self) -> usize {
        fn count(node: &AvatarNode) -> usize {
            node.meshes.len() + node.children.iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }
}

/// Load and decode the avatar glTF binary.
///
/// External buffer and image URIs are resolved against `resource_dir`. The
/// file must contain at least one mesh; a file without animations yields an
/// avatar that simply never moves.
pub async fn load_avatar(path: &Path, resource_dir: &Path) -> Result<AvatarData> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading avatar asset {:?}", path))?;
    let gltf = gltf::Gltf::from_reader(BufReader::new(Cursor::new(bytes)))
        .with_context(|| format!("decoding avatar asset {:?}", path))?;

    // Load buffers
    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                if let Some(blob) = gltf.blob.as_deref() {
                    buffer_data.push(blob.to_vec());
                }
            }
            gltf::buffer::Source::Uri(uri) => {
                let bin = tokio::fs::read(resource_dir.join(uri))
                    .await
                    .with_context(|| format!("reading avatar buffer {:?}", uri))?;
                buffer_data.push(bin);
            }
        }
    }

    let animations = load_animations(&gltf, &buffer_data);
    let materials = load_materials(&gltf, &buffer_data, resource_dir).await?;

    let roots = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .map(|scene| {
            scene
                .nodes()
                .map(|node| build_node(node, &buffer_data, &animations))
                .collect()
        })
        .unwrap_or_default();

    let data = AvatarData { roots, materials };
    if data.mesh_count() == 0 {
        return Err(anyhow!("avatar asset {:?} contains no meshes", path));
    }
    Ok(data)
}

/// Read every animation's channels into clips, grouped by the node each
/// channel targets. A clip animating several joints contributes one entry per
/// joint.
fn load_animations(gltf: &gltf::Gltf, buffer_data: &[Vec<u8>]) -> HashMap<usize, Vec<AnimationClip>> {
    let mut clips: HashMap<usize, Vec<AnimationClip>> = HashMap::new();
    for animation in gltf.animations() {
        for channel in animation.channels() {
            let reader = channel.reader(|buffer| buffer_data.get(buffer.index()).map(|b| &b[..]));
            let timestamps = match reader.read_inputs() {
                Some(gltf::accessor::Iter::Standard(times)) => times.collect(),
                _ => Vec::new(),
            };
            let keyframes = match reader.read_outputs() {
                Some(gltf::animation::util::ReadOutputs::Translations(translations)) => {
                    Keyframes::Translation(translations.map(Into::into).collect())
                }
                Some(gltf::animation::util::ReadOutputs::Rotations(rotations)) => {
                    Keyframes::Rotation(rotations.into_f32().map(Into::into).collect())
                }
                Some(gltf::animation::util::ReadOutputs::Scales(scales)) => {
                    Keyframes::Scale(scales.map(Into::into).collect())
                }
                _ => Keyframes::Other,
            };
            clips
                .entry(channel.target().node().index())
                .or_default()
                .push(AnimationClip {
                    name: animation.name().unwrap_or("Default").to_string(),
                    keyframes,
                    timestamps,
                });
        }
    }
    clips
}

/// Extract each material's base-colour and normal images as encoded bytes.
async fn load_materials(
    gltf: &gltf::Gltf,
    buffer_data: &[Vec<u8>],
    resource_dir: &Path,
) -> Result<Vec<MaterialData>> {
    let mut materials = Vec::new();
    for material in gltf.materials() {
        let name = material.name().unwrap_or("avatar_material").to_string();
        let diffuse = match material
            .pbr_metallic_roughness()
            .base_color_texture()
            .map(|info| info.texture().source().source())
        {
            Some(source) => image_bytes(source, buffer_data, resource_dir).await?,
            None => None,
        };
        let normal = match material
            .normal_texture()
            .map(|info| info.texture().source().source())
        {
            Some(source) => image_bytes(source, buffer_data, resource_dir).await?,
            None => None,
        };
        materials.push(MaterialData {
            name,
            diffuse,
            normal,
        });
    }
    Ok(materials)
}

async fn image_bytes(
    source: gltf::image::Source<'_>,
    buffer_data: &[Vec<u8>],
    resource_dir: &Path,
) -> Result<Option<Vec<u8>>> {
    match source {
        gltf::image::Source::View { view, .. } => {
            let bytes = buffer_data
                .get(view.buffer().index())
                .and_then(|buffer| buffer.get(view.offset()..view.offset() + view.length()))
                .map(|slice| slice.to_vec());
            if bytes.is_none() {
                log::warn!("avatar texture view out of range, using a flat fallback");
            }
            Ok(bytes)
        }
        gltf::image::Source::Uri { uri, .. } => {
            let bytes = tokio::fs::read(resource_dir.join(uri))
                .await
                .with_context(|| format!("reading avatar texture {:?}", uri))?;
            Ok(Some(bytes))
        }
    }
}

/// Convert one glTF node and its subtree, merging its clips over its rest
/// pose so components without a channel keep their file values.
fn build_node(
    node: gltf::scene::Node,
    buffer_data: &[Vec<u8>],
    animations: &HashMap<usize, Vec<AnimationClip>>,
) -> AvatarNode {
    let (position, rotation, scale) = node.transform().decomposed();
    let local = Instance {
        position: position.into(),
        rotation: rotation.into(),
        scale: scale.into(),
    };
    let clips = animations.get(&node.index()).cloned().unwrap_or_default();
    let merged = merge_with_base(clips, &local);

    let meshes = node
        .mesh()
        .map(|mesh| read_mesh(mesh, buffer_data))
        .unwrap_or_default();
    let children = node
        .children()
        .map(|child| build_node(child, buffer_data, animations))
        .collect();

    AvatarNode {
        name: node.name().unwrap_or("avatar_node").to_string(),
        local,
        meshes,
        animations: merged,
        children,
    }
}

fn read_mesh(mesh: gltf::Mesh, buffer_data: &[Vec<u8>]) -> Vec<MeshData> {
    let mut primitives = Vec::new();
    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| buffer_data.get(buffer.index()).map(|b| &b[..]));

        let mut vertices = Vec::new();
        if let Some(positions) = reader.read_positions() {
            vertices.extend(positions.map(|position| ModelVertex {
                position,
                ..Default::default()
            }));
        }
        if let Some(normals) = reader.read_normals() {
            for (vertex, normal) in vertices.iter_mut().zip(normals) {
                vertex.normal = normal;
            }
        }
        if let Some(tex_coords) = reader.read_tex_coords(0).map(|tc| tc.into_f32()) {
            for (vertex, tex_coord) in vertices.iter_mut().zip(tex_coords) {
                vertex.tex_coords = tex_coord;
            }
        }
        if let Some(tangents) = reader.read_tangents() {
            for (vertex, tangent) in vertices.iter_mut().zip(tangents) {
                // The w component carries the bitangent sign.
                let t: cgmath::Vector4<f32> = tangent.into();
                vertex.tangent = t.truncate().into();
                let normal: cgmath::Vector3<f32> = vertex.normal.into();
                vertex.bitangent = (normal.cross(t.truncate()) * t.w).into();
            }
        }

        let mut indices = Vec::new();
        if let Some(raw_indices) = reader.read_indices() {
            indices.extend(raw_indices.into_u32());
        }
        if vertices.is_empty() || indices.is_empty() {
            continue;
        }
        primitives.push(MeshData {
            name: mesh.name().unwrap_or("avatar_mesh").to_string(),
            vertices,
            indices,
            material: primitive.material().index().unwrap_or(0),
        });
    }
    primitives
}
