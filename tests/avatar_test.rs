use cgmath::{Quaternion, Vector3};
use starscape::data_structures::{instance::Instance, model::ModelVertex};
use starscape::resources::animation::{
    AnimationClip, AnimationPlayer, Keyframes, merge_with_base,
};
use starscape::resources::{AvatarData, AvatarNode, MeshData};

fn triangle(name: &str, material: usize) -> MeshData {
    MeshData {
        name: name.to_string(),
        vertices: vec![ModelVertex::default(); 3],
        indices: vec![0, 1, 2],
        material,
    }
}

fn container(name: &str, meshes: Vec<MeshData>, children: Vec<AvatarNode>) -> AvatarNode {
    AvatarNode {
        name: name.to_string(),
        local: Instance::default(),
        meshes,
        animations: Vec::new(),
        children,
    }
}

fn joint_player(base: &Instance, keyframes: Keyframes) -> AnimationPlayer {
    let clip = merge_with_base(
        vec![AnimationClip {
            name: "Wave".to_string(),
            keyframes,
            timestamps: vec![0.0, 1.0, 2.0],
        }],
        base,
    )
    .into_iter()
    .next()
    .unwrap();
    AnimationPlayer::new(clip)
}

#[test]
fn mesh_count_spans_the_whole_hierarchy() {
    let data = AvatarData {
        roots: vec![container(
            "body",
            vec![triangle("torso", 0)],
            vec![
                container(
                    "head",
                    vec![triangle("face", 1), triangle("hair", 1)],
                    vec![],
                ),
                container("rig", vec![], vec![]),
            ],
        )],
        materials: vec![],
    };
    assert_eq!(data.mesh_count(), 3);
}

#[test]
fn primitives_keep_their_material_indices() {
    let node = container(
        "body",
        vec![triangle("skin", 2), triangle("shirt", 0)],
        vec![],
    );
    assert_eq!(node.meshes[0].material, 2);
    assert_eq!(node.meshes[1].material, 0);
}

#[test]
fn sibling_joints_play_their_own_tracks() {
    let arm_base = Instance {
        position: Vector3::new(1.0, 0.0, 0.0),
        ..Default::default()
    };
    let head_base = Instance {
        position: Vector3::new(0.0, 2.0, 0.0),
        ..Default::default()
    };
    let mut arm = joint_player(
        &arm_base,
        Keyframes::Rotation(vec![
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
            Quaternion::new(0.0, 0.0, 1.0, 0.0),
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
        ]),
    );
    let mut head = joint_player(
        &head_base,
        Keyframes::Translation(vec![
            Vector3::new(0.0, 2.0, 0.0),
            Vector3::new(0.0, 2.5, 0.0),
            Vector3::new(0.0, 2.0, 0.0),
        ]),
    );

    // Mid-clip: the second keyframe of each track.
    arm.advance(1.5);
    head.advance(1.5);

    // The arm rotates in place around its own pivot.
    let arm_pose = arm.pose();
    assert_eq!(arm_pose.position, Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(arm_pose.rotation, Quaternion::new(0.0, 0.0, 1.0, 0.0));

    // The head bobs without inheriting the arm's rotation.
    let head_pose = head.pose();
    assert_eq!(head_pose.position, Vector3::new(0.0, 2.5, 0.0));
    assert_eq!(head_pose.rotation, Quaternion::new(1.0, 0.0, 0.0, 0.0));
}
