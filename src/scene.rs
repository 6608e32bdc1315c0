//! Scene composition and the per-frame render pass.
//!
//! The composer builds the backdrop in a fixed order (lights, star field,
//! planet, camera rig), kicks off the avatar load and owns all GPU resources
//! the frame loop touches. Applying a [`FrameState`] is the only way scene
//! state changes; rendering records one pass over the opaque geometry followed
//! by the additive star field.

use std::sync::mpsc;

use wgpu::util::DeviceExt;

use crate::{
    config::BackdropConfig,
    context::Context,
    data_structures::{
        model::{DrawModel, Material, Mesh, Model, diffuse_normal_layout},
        scene_graph::{NodeId, NodeKind, SceneGraph},
        texture::Texture,
    },
    frame::FrameState,
    pipelines::{light::LightResources, scene::mk_scene_pipeline, star::mk_star_pipeline},
    planet::build_planet,
    resources::{
        AvatarData, AvatarNode, MaterialData, load_avatar,
        animation::AnimationPlayer,
        slot::{AssetSlot, AssetState},
    },
    starfield::{StarField, StarFieldGeometry},
};

/// One avatar node spliced into the graph: its primitives (empty for pure
/// containers) and the clip player driving its local transform.
#[derive(Debug)]
struct AvatarPart {
    node: NodeId,
    meshes: Vec<Mesh>,
    instance_buffer: Option<wgpu::Buffer>,
    player: Option<AnimationPlayer>,
}

/// The avatar once spliced into the scene: the materials its meshes index
/// into and one part per node of its hierarchy.
#[derive(Debug)]
struct Avatar {
    materials: Vec<Material>,
    parts: Vec<AvatarPart>,
}

#[derive(Debug)]
pub struct Scene {
    config: BackdropConfig,
    graph: SceneGraph,
    lights: LightResources,
    star_field: StarField,
    star_node: NodeId,
    planet: Model,
    planet_node: NodeId,
    planet_instance_buffer: wgpu::Buffer,
    camera_node: NodeId,
    avatar_slot: AssetSlot<AvatarData>,
    avatar: Option<Avatar>,
    scene_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,
}

impl Scene {
    /// Compose the backdrop and start loading the avatar in the background.
    pub fn new(
        ctx: &Context,
        runtime: &tokio::runtime::Runtime,
        config: BackdropConfig,
    ) -> anyhow::Result<Self> {
        let mut graph = SceneGraph::new();
        let root = graph.root();

        // The lights are not graph nodes: the key light's tracking is a
        // per-frame assignment from the derived frame state.
        let lights = LightResources::new(&ctx.device, &config);

        let geometry = StarFieldGeometry::generate(config.star_count, config.star_bounds);
        let star_field = StarField::new(
            &ctx.device,
            &geometry,
            config.star_point_size,
            ctx.pixel_ratio,
            ctx.resolution(),
        );
        let star_node = graph.add_node(
            root,
            NodeKind::StarField,
            cgmath::Vector3::from(config.star_offset).into(),
        );

        let planet = build_planet(&ctx.device, &ctx.queue, &config)?;
        let planet_node = graph.add_node(
            root,
            NodeKind::Planet,
            cgmath::Vector3::from(config.planet_offset).into(),
        );
        let planet_instance_buffer =
            ctx.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Planet Instance Buffer"),
                    contents: bytemuck::cast_slice(&[graph.world(planet_node).to_raw()]),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                });

        let camera_node = graph.add_node(
            root,
            NodeKind::CameraRig,
            cgmath::Vector3::from(config.camera_position).into(),
        );

        let (sender, receiver) = mpsc::channel();
        let avatar_path = config.avatar_path.clone();
        let decoder_dir = config.decoder_dir.clone();
        runtime.spawn(async move {
            let result = load_avatar(&avatar_path, &decoder_dir).await;
            // The receiver only disappears when the scene is torn down.
            let _ = sender.send(result);
        });
        let avatar_slot = AssetSlot::pending(receiver);

        let scene_pipeline = mk_scene_pipeline(
            &ctx.device,
            &ctx.config,
            &ctx.camera.bind_group_layout,
            &lights.bind_group_layout,
        );
        let star_pipeline = mk_star_pipeline(
            &ctx.device,
            &ctx.config,
            &ctx.camera.bind_group_layout,
            &star_field.bind_group_layout,
        );

        Ok(Self {
            config,
            graph,
            lights,
            star_field,
            star_node,
            planet,
            planet_node,
            planet_instance_buffer,
            camera_node,
            avatar_slot,
            avatar: None,
            scene_pipeline,
            star_pipeline,
        })
    }

    /// Check the avatar load and splice the sub-scene in on the frame it
    /// resolves. Called once per tick from the frame loop; a failed load
    /// leaves the scene without an avatar.
    ///
    /// Every node of the glTF hierarchy becomes a graph node under the avatar
    /// root, so joint-level animation tracks move their own sub-trees.
    pub fn poll_avatar(&mut self, ctx: &Context) {
        let Some(data) = self.avatar_slot.poll() else {
            return;
        };

        let layout = diffuse_normal_layout(&ctx.device);
        let mut materials: Vec<Material> = data
            .materials
            .iter()
            .map(|material| upload_material(ctx, material, &layout))
            .collect();
        if materials.is_empty() {
            materials.push(Material::untextured(
                &ctx.device,
                &ctx.queue,
                "avatar",
                &layout,
            ));
        }

        let root = self.graph.add_node(
            self.graph.root(),
            NodeKind::Avatar,
            cgmath::Vector3::from(self.config.avatar_offset).into(),
        );
        let mut parts = Vec::new();
        for node in data.roots {
            self.splice_node(ctx, node, root, materials.len(), &mut parts);
        }
        self.graph.update_world_transforms();

        let animated = parts.iter().filter(|part| part.player.is_some()).count();
        log::info!(
            "avatar loaded: {} nodes, {} animated, {} materials",
            parts.len(),
            animated,
            materials.len()
        );

        self.avatar = Some(Avatar { materials, parts });
    }

    /// Convert one decoded avatar node into a graph node and GPU buffers,
    /// then recurse over its children.
    fn splice_node(
        &mut self,
        ctx: &Context,
        data: AvatarNode,
        parent: NodeId,
        material_count: usize,
        parts: &mut Vec<AvatarPart>,
    ) {
        let node = self
            .graph
            .add_node(parent, NodeKind::Avatar, data.local.clone());
        let meshes: Vec<Mesh> = data
            .meshes
            .iter()
            .map(|mesh| {
                Mesh::new(
                    &ctx.device,
                    &mesh.name,
                    &mesh.vertices,
                    &mesh.indices,
                    mesh.material.min(material_count.saturating_sub(1)),
                )
            })
            .collect();
        let instance_buffer = (!meshes.is_empty()).then(|| {
            ctx.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Avatar Instance Buffer"),
                    contents: bytemuck::cast_slice(&[data.local.to_raw()]),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                })
        });
        let player = data.animations.into_iter().next().map(AnimationPlayer::new);

        parts.push(AvatarPart {
            node,
            meshes,
            instance_buffer,
            player,
        });
        for child in data.children {
            self.splice_node(ctx, child, node, material_count, parts);
        }
    }

    pub fn avatar_ready(&self) -> bool {
        self.avatar_slot.state() == AssetState::Loaded
    }

    /// Apply one derived frame to the scene: node transforms, animation
    /// playback and every uniform/instance buffer the pass reads.
    pub fn apply(&mut self, ctx: &mut Context, frame: &FrameState) {
        self.graph.set_rotation_y(self.planet_node, frame.planet_angle);
        self.graph.set_rotation_y(self.star_node, frame.star_angle);

        // Scroll parallax replaces the rig's vertical position outright; the
        // initial y from the config only holds until the first tick.
        let mut rig = self.graph.local(self.camera_node).clone();
        rig.position.y = frame.camera_y;
        self.graph.set_local(self.camera_node, rig);

        if let Some(avatar) = &mut self.avatar {
            for part in &mut avatar.parts {
                if let Some(player) = &mut part.player {
                    if frame.advance_avatar {
                        player.advance(frame.avatar_delta);
                    }
                    self.graph.set_local(part.node, player.pose());
                }
            }
        }

        self.graph.update_world_transforms();

        self.lights.set_top_position(frame.top_light_position);
        self.lights.write(&ctx.queue);

        let rig_world = self.graph.world(self.camera_node);
        ctx.camera.camera.position = cgmath::Point3::new(
            rig_world.position.x,
            rig_world.position.y,
            rig_world.position.z,
        );
        ctx.camera.write(&ctx.queue, &ctx.projection);

        self.star_field
            .set_frame(&ctx.queue, frame.star_time, self.graph.world(self.star_node));

        ctx.queue.write_buffer(
            &self.planet_instance_buffer,
            0,
            bytemuck::cast_slice(&[self.graph.world(self.planet_node).to_raw()]),
        );
        if let Some(avatar) = &self.avatar {
            for part in &avatar.parts {
                if let Some(buffer) = &part.instance_buffer {
                    ctx.queue.write_buffer(
                        buffer,
                        0,
                        bytemuck::cast_slice(&[self.graph.world(part.node).to_raw()]),
                    );
                }
            }
        }
    }

    /// Propagate a surface resize into the star shader's screen metrics.
    pub fn resize(&mut self, ctx: &Context) {
        self.star_field
            .set_surface(&ctx.queue, ctx.pixel_ratio, ctx.resolution());
    }

    /// Record the backdrop into one render pass: opaque geometry first, the
    /// additive star field last.
    pub fn record<'a>(&'a self, ctx: &'a Context, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.scene_pipeline);
        render_pass.set_vertex_buffer(1, self.planet_instance_buffer.slice(..));
        render_pass.draw_model_instanced(
            &self.planet,
            0..1,
            &ctx.camera.bind_group,
            &self.lights.bind_group,
        );
        if let Some(avatar) = &self.avatar {
            for part in &avatar.parts {
                if let Some(buffer) = &part.instance_buffer {
                    render_pass.set_vertex_buffer(1, buffer.slice(..));
                    for mesh in &part.meshes {
                        render_pass.draw_mesh_instanced(
                            mesh,
                            &avatar.materials[mesh.material],
                            0..1,
                            &ctx.camera.bind_group,
                            &self.lights.bind_group,
                        );
                    }
                }
            }
        }

        render_pass.set_pipeline(&self.star_pipeline);
        render_pass.set_bind_group(0, &ctx.camera.bind_group, &[]);
        render_pass.set_bind_group(1, &self.star_field.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.star_field.instance_buffer.slice(..));
        render_pass.draw(0..6, 0..self.star_field.count());
    }

    pub fn star_count(&self) -> u32 {
        self.star_field.count()
    }
}

/// Decode one material's images and build its bind group. An absent or
/// undecodable image falls back to the flat defaults so a bad texture never
/// sinks the whole avatar.
fn upload_material(ctx: &Context, data: &MaterialData, layout: &wgpu::BindGroupLayout) -> Material {
    let diffuse = data
        .diffuse
        .as_deref()
        .and_then(|bytes| {
            Texture::from_bytes(&ctx.device, &ctx.queue, bytes, &data.name, false)
                .map_err(|err| log::warn!("decoding diffuse texture {}: {err}", data.name))
                .ok()
        })
        .unwrap_or_else(|| {
            Texture::create_solid_color([255, 255, 255, 255], &ctx.device, &ctx.queue)
        });
    let normal = data
        .normal
        .as_deref()
        .and_then(|bytes| {
            Texture::from_bytes(&ctx.device, &ctx.queue, bytes, &data.name, true)
                .map_err(|err| log::warn!("decoding normal texture {}: {err}", data.name))
                .ok()
        })
        .unwrap_or_else(|| Texture::create_default_normal_map(2, 2, &ctx.device, &ctx.queue));
    Material::new(&ctx.device, &data.name, diffuse, normal, layout)
}
