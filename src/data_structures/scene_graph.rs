//! Arena scene graph.
//!
//! Nodes live in one owned arena and are addressed by stable [`NodeId`]
//! handles; edges run parent to child only. Tracking relations (the light
//! following the pointer) are per-frame assignments in the update loop, not
//! graph edges. The graph owns local transforms and derives world transforms
//! top-down on demand.

use cgmath::{Rad, Rotation3};

use crate::data_structures::instance::Instance;

/// Stable handle into the scene graph arena. Nodes are never removed, so a
/// handle stays valid for the life of the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a node contributes to the rendered frame. The graph itself treats all
/// kinds alike; the scene keeps handles to the nodes it renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Group,
    StarField,
    Planet,
    CameraRig,
    Avatar,
}

#[derive(Debug)]
struct Node {
    #[allow(unused)]
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: Instance,
    world: Instance,
    kind: NodeKind,
}

#[derive(Debug)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    /// An empty graph containing only the root group node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                local: Instance::default(),
                world: Instance::default(),
                kind: NodeKind::Group,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add_node(&mut self, parent: NodeId, kind: NodeKind, local: Instance) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            world: local.clone(),
            local,
            kind,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn local(&self, id: NodeId) -> &Instance {
        &self.nodes[id.0].local
    }

    pub fn set_local(&mut self, id: NodeId, local: Instance) {
        self.nodes[id.0].local = local;
    }

    /// Replace only the node's rotation with a rotation of `angle` radians
    /// around Y, keeping position and scale.
    pub fn set_rotation_y(&mut self, id: NodeId, angle: f32) {
        self.nodes[id.0].local.rotation = cgmath::Quaternion::from_angle_y(Rad(angle));
    }

    /// World transform as of the last [`update_world_transforms`](Self::update_world_transforms).
    pub fn world(&self, id: NodeId) -> &Instance {
        &self.nodes[id.0].world
    }

    /// Recompute every world transform by composing parents onto children,
    /// top-down from the root.
    pub fn update_world_transforms(&mut self) {
        let mut stack = vec![(self.root(), Instance::default())];
        while let Some((id, parent_world)) = stack.pop() {
            let world = &parent_world * &self.nodes[id.0].local;
            self.nodes[id.0].world = world.clone();
            for &child in &self.nodes[id.0].children {
                stack.push((child, world.clone()));
            }
        }
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Whether any node of the given kind exists in the graph.
    pub fn contains_kind(&self, kind: NodeKind) -> bool {
        self.nodes.iter().any(|node| node.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
