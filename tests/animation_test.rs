use cgmath::{Quaternion, Vector3};
use starscape::data_structures::instance::Instance;
use starscape::resources::animation::{
    AnimationClip, AnimationPlayer, Keyframes, ModelAnimation, merge, merge_with_base,
};

fn walk_clip() -> ModelAnimation {
    let clips = vec![
        AnimationClip {
            name: "Walk".to_string(),
            keyframes: Keyframes::Translation(vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(2.0, 0.0, 0.0),
            ]),
            timestamps: vec![0.0, 1.0, 2.0],
        },
        AnimationClip {
            name: "Walk".to_string(),
            keyframes: Keyframes::Rotation(vec![Quaternion::new(1.0, 0.0, 0.0, 0.0)]),
            timestamps: vec![0.0],
        },
    ];
    merge(clips).into_iter().next().unwrap()
}

#[test]
fn merge_folds_channels_of_one_clip_into_one_track() {
    let animation = walk_clip();
    assert_eq!(animation.name, "Walk");
    assert_eq!(animation.instances.len(), 3);
    // The shorter rotation track is padded with its first value.
    assert_eq!(animation.instances[2].rotation, Quaternion::new(1.0, 0.0, 0.0, 0.0));
    assert_eq!(animation.timestamps, vec![0.0, 1.0, 2.0]);
}

#[test]
fn merge_keeps_distinct_clips_in_encounter_order() {
    let clips = vec![
        AnimationClip {
            name: "Idle".to_string(),
            keyframes: Keyframes::Translation(vec![Vector3::new(0.0, 0.0, 0.0)]),
            timestamps: vec![0.0],
        },
        AnimationClip {
            name: "Wave".to_string(),
            keyframes: Keyframes::Translation(vec![Vector3::new(0.0, 1.0, 0.0)]),
            timestamps: vec![0.0],
        },
    ];
    let merged = merge(clips);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].name, "Idle");
    assert_eq!(merged[1].name, "Wave");
}

#[test]
fn rotation_only_tracks_keep_the_rest_pose_translation() {
    let base = Instance {
        position: Vector3::new(0.0, 1.5, 0.0),
        ..Default::default()
    };
    let clips = vec![AnimationClip {
        name: "Nod".to_string(),
        keyframes: Keyframes::Rotation(vec![
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
            Quaternion::new(0.0, 1.0, 0.0, 0.0),
        ]),
        timestamps: vec![0.0, 1.0],
    }];
    let merged = merge_with_base(clips, &base);
    assert_eq!(merged.len(), 1);
    // A joint with no translation channel stays where the file put it
    // instead of collapsing onto its parent's origin.
    for instance in &merged[0].instances {
        assert_eq!(instance.position, Vector3::new(0.0, 1.5, 0.0));
    }
    assert_eq!(
        merged[0].instances[1].rotation,
        Quaternion::new(0.0, 1.0, 0.0, 0.0)
    );
}

#[test]
fn player_starts_playing_at_time_zero() {
    let player = AnimationPlayer::new(walk_clip());
    assert!(player.is_playing());
    assert_eq!(player.time(), 0.0);
    assert_eq!(player.pose().position, Vector3::new(0.0, 0.0, 0.0));
    assert_eq!(player.clip_name(), "Walk");
}

#[test]
fn pose_is_frozen_until_advanced() {
    let player = AnimationPlayer::new(walk_clip());
    // No advance calls: repeated sampling never moves.
    for _ in 0..3 {
        assert_eq!(player.pose().position, Vector3::new(0.0, 0.0, 0.0));
    }
}

#[test]
fn advance_steps_through_keyframes() {
    let mut player = AnimationPlayer::new(walk_clip());
    player.advance(1.5);
    assert_eq!(player.pose().position, Vector3::new(1.0, 0.0, 0.0));
}

#[test]
fn playback_loops_over_the_clip_duration() {
    let mut player = AnimationPlayer::new(walk_clip());
    player.advance(2.5);
    // 2.5 wraps to 0.5 in a 2 second clip.
    assert_eq!(player.pose().position, Vector3::new(0.0, 0.0, 0.0));
    assert_eq!(player.time(), 2.5);
}

#[test]
fn negative_deltas_never_rewind() {
    let mut player = AnimationPlayer::new(walk_clip());
    player.advance(1.0);
    player.advance(-5.0);
    assert_eq!(player.time(), 1.0);
}

#[test]
fn empty_clip_poses_identity() {
    let player = AnimationPlayer::new(ModelAnimation::default());
    assert_eq!(player.pose().position, Vector3::new(0.0, 0.0, 0.0));
}
