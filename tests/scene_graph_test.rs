use cgmath::{Quaternion, Rad, Rotation3, Vector3};
use starscape::data_structures::{
    instance::Instance,
    scene_graph::{NodeKind, SceneGraph},
};

#[test]
fn new_graph_holds_only_the_root_group() {
    let graph = SceneGraph::new();
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.kind(graph.root()), NodeKind::Group);
    assert!(graph.children(graph.root()).is_empty());
}

#[test]
fn world_transforms_compose_down_the_tree() {
    let mut graph = SceneGraph::new();
    let parent = graph.add_node(
        graph.root(),
        NodeKind::Group,
        Vector3::new(1.0, 0.0, 0.0).into(),
    );
    let child = graph.add_node(parent, NodeKind::Planet, Vector3::new(0.0, 2.0, 0.0).into());

    graph.update_world_transforms();
    assert_eq!(graph.world(child).position, Vector3::new(1.0, 2.0, 0.0));
    assert_eq!(graph.world(parent).position, Vector3::new(1.0, 0.0, 0.0));
}

#[test]
fn parent_rotation_carries_children_around() {
    let mut graph = SceneGraph::new();
    let pivot = graph.add_node(graph.root(), NodeKind::Group, Instance::default());
    let child = graph.add_node(pivot, NodeKind::StarField, Vector3::new(1.0, 0.0, 0.0).into());

    graph.set_rotation_y(pivot, std::f32::consts::FRAC_PI_2);
    graph.update_world_transforms();

    let world = graph.world(child).position;
    assert!(world.x.abs() < 1e-6);
    assert!((world.z - (-1.0)).abs() < 1e-6);
}

#[test]
fn set_rotation_y_keeps_position_and_scale() {
    let mut graph = SceneGraph::new();
    let node = graph.add_node(
        graph.root(),
        NodeKind::Planet,
        Vector3::new(0.0, -0.1, 0.0).into(),
    );
    graph.set_rotation_y(node, 0.75);
    assert_eq!(graph.local(node).position, Vector3::new(0.0, -0.1, 0.0));
    assert_eq!(graph.local(node).scale, Vector3::new(1.0, 1.0, 1.0));
    assert_eq!(
        graph.local(node).rotation,
        Quaternion::from_angle_y(Rad(0.75))
    );
}

#[test]
fn splicing_adds_the_avatar_kind() {
    let mut graph = SceneGraph::new();
    assert!(!graph.contains_kind(NodeKind::Avatar));
    let avatar = graph.add_node(
        graph.root(),
        NodeKind::Avatar,
        Vector3::new(0.0, -12.0, 0.0).into(),
    );
    assert!(graph.contains_kind(NodeKind::Avatar));
    graph.update_world_transforms();
    assert_eq!(graph.world(avatar).position, Vector3::new(0.0, -12.0, 0.0));
}

#[test]
fn handles_stay_valid_as_the_graph_grows() {
    let mut graph = SceneGraph::new();
    let first = graph.add_node(graph.root(), NodeKind::Group, Instance::default());
    for _ in 0..10 {
        graph.add_node(graph.root(), NodeKind::Group, Instance::default());
    }
    assert_eq!(graph.kind(first), NodeKind::Group);
    assert_eq!(graph.len(), 12);
}
