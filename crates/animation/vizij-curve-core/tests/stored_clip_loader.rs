use approx::assert_relative_eq;
use std::f32::consts::FRAC_PI_4;

use vizij_curve_core::{
    parse_scalar_track_json, parse_stored_clip_json, parse_stored_clip_json_with_config,
    AnimationError, Config, Interpolation, Quat, Transform, Vec3,
};

fn load_clip(name: &str) -> vizij_curve_core::Clip {
    let json = vizij_test_fixtures::clips::json(name).expect("load clip fixture");
    parse_stored_clip_json(&json).expect("parse clip fixture")
}

#[test]
fn every_manifest_clip_parses() {
    for key in vizij_test_fixtures::clips::keys() {
        let clip = load_clip(&key);
        assert!(clip.duration() > 0.0, "clip '{key}' should have a span");
        assert!(clip.tracks().iter().all(|t| t.is_valid()));
    }
}

#[test]
fn bounce_fixture_loads_tracks_and_span() {
    let clip = load_clip("bounce");
    assert_eq!(clip.name, "bounce");
    assert!(clip.looping);
    assert_eq!(clip.len(), 2);
    assert_eq!(clip.joint_at(0), Some(0));
    assert_eq!(clip.joint_at(1), Some(2));
    assert_eq!(clip.start_time(), 0.0);
    assert_eq!(clip.end_time(), 1.0);

    let root = clip.track(0).expect("root track");
    assert_eq!(root.position.interpolation(), Interpolation::Linear);
    assert_eq!(root.position.len(), 3);
    assert!(root.scale.is_empty());
    assert_eq!(
        clip.track(2).expect("scale track").scale.interpolation(),
        Interpolation::Constant
    );
}

#[test]
fn bounce_samples_into_pose_with_looping() {
    let clip = load_clip("bounce");
    let mut pose = [Transform::IDENTITY; 3];

    let time = clip.sample(&mut pose, 1.25);
    assert_relative_eq!(time, 0.25, epsilon = 1e-6);
    assert_relative_eq!(pose[0].position.y, 1.0, epsilon = 1e-5);
    assert!(pose[0].rotation.axis().approx_eq(Vec3::Y));
    assert!(pose[0].rotation.angle() > 0.0 && pose[0].rotation.angle() < FRAC_PI_4);
    assert_relative_eq!(pose[0].rotation.len(), 1.0, epsilon = 1e-5);
    assert_eq!(pose[1], Transform::IDENTITY);
    assert_eq!(pose[2].scale, Vec3::ONE);

    clip.sample(&mut pose, 0.75);
    assert_eq!(pose[2].scale, Vec3::splat(1.5));
    assert_relative_eq!(pose[0].position.y, 1.0, epsilon = 1e-5);
}

#[test]
fn short_pose_skips_out_of_range_joints() {
    let clip = load_clip("bounce");
    let mut pose = [Transform::IDENTITY; 1];
    clip.sample(&mut pose, 0.5);
    assert_relative_eq!(pose[0].position.y, 2.0, epsilon = 1e-5);
}

#[test]
fn sway_cubic_rotation_takes_short_path_and_clamps() {
    let clip = load_clip("sway");
    assert!(!clip.looping);
    assert_eq!(clip.start_time(), 0.0);
    assert_eq!(clip.end_time(), 2.0);

    let mut pose = [Transform::IDENTITY; 2];
    clip.sample(&mut pose, 1.5);
    let eighth = Quat::from_axis_angle(Vec3::Z, FRAC_PI_4);
    assert_relative_eq!(pose[1].rotation.dot(eighth).abs(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(pose[1].position.x, -1.0, epsilon = 1e-6);

    let time = clip.sample(&mut pose, 5.0);
    assert_eq!(time, 2.0);
    assert!(pose[1].rotation.same_orientation(Quat::IDENTITY));
}

#[test]
fn ease_track_matches_recorded_samples() {
    let json = vizij_test_fixtures::tracks::json("ease").expect("load ease track");
    let track = parse_scalar_track_json(&json).expect("parse ease track");
    assert_eq!(track.interpolation(), Interpolation::Cubic);

    let expected: Vec<(f32, f32)> = vizij_test_fixtures::tracks::expected("ease")
        .expect("load expected samples")
        .expect("ease has expected samples");
    assert!(!expected.is_empty());
    for (time, value) in expected {
        assert_relative_eq!(track.sample(time, false), value, epsilon = 1e-4);
    }
}

#[test]
fn step_track_fixture_holds_values() {
    let json = vizij_test_fixtures::tracks::json("steps").expect("load steps track");
    let track = parse_scalar_track_json(&json).expect("parse steps track");
    assert_eq!(track.interpolation(), Interpolation::Constant);
    assert_eq!(track.sample(1.5, false), 2.0);
    assert_eq!(track.sample(3.5, true), 1.0);
    assert!(vizij_test_fixtures::tracks::expected::<Vec<(f32, f32)>>("steps")
        .expect("steps entry")
        .is_none());
}

#[test]
fn config_supplies_missing_fields() {
    let json = r#"{ "name": "idle", "tracks": [ { "id": 0,
        "position": { "frames": [
            { "time": 0.0, "value": [0, 0, 0] },
            { "time": 1.0, "value": [1, 0, 0] }
        ] } } ] }"#;

    let clip = parse_stored_clip_json(json).expect("parse with defaults");
    assert!(clip.looping);
    assert_eq!(
        clip.track(0).expect("track").position.interpolation(),
        Interpolation::Linear
    );

    let config = Config {
        default_interpolation: Interpolation::Cubic,
        default_looping: false,
        ..Config::default()
    };
    let clip = parse_stored_clip_json_with_config(json, &config).expect("parse with config");
    assert!(!clip.looping);
    assert_eq!(
        clip.track(0).expect("track").position.interpolation(),
        Interpolation::Cubic
    );
}

#[test]
fn unordered_clip_frames_are_rejected() {
    let json = r#"{ "name": "bad", "tracks": [ { "id": 3,
        "scale": { "frames": [
            { "time": 1.0, "value": [1, 1, 1] },
            { "time": 0.0, "value": [2, 2, 2] }
        ] } } ] }"#;
    let err = parse_stored_clip_json(json).unwrap_err();
    assert_eq!(
        err,
        AnimationError::UnorderedFrames {
            track: "joint 3 scale".to_string(),
            index: 1,
            previous: 1.0,
            time: 0.0,
        }
    );
    assert!(!err.is_recoverable());
}
