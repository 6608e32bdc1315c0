use starscape::{
    clock::{FrameClock, FrameTick},
    config::BackdropConfig,
    context::clamped_pixel_ratio,
    frame::FrameState,
    input::InputState,
};
use winit::dpi::PhysicalPosition;

fn tick(elapsed: f32, delta: f32) -> FrameTick {
    FrameTick { elapsed, delta }
}

#[test]
fn camera_parallax_is_linear_in_scroll() {
    let config = BackdropConfig::default();
    let mut input = InputState::new(800.0, 800.0, config.page_length);
    input.scroll_by(200.0);

    let frame = FrameState::derive(tick(0.0, 0.0), &input, false, &config);
    assert!((frame.camera_y - (-0.875)).abs() < 1e-6);
}

#[test]
fn rotations_scale_with_elapsed_time() {
    let config = BackdropConfig::default();
    let input = InputState::new(800.0, 600.0, config.page_length);

    let frame = FrameState::derive(tick(10.0, 0.016), &input, false, &config);
    assert!((frame.planet_angle - 0.75).abs() < 1e-6);
    assert!((frame.star_angle - 0.030).abs() < 1e-6);
    assert!((frame.star_time - 10.0).abs() < 1e-6);
}

#[test]
fn key_light_tracks_pointer_with_inverted_y() {
    let config = BackdropConfig::default();
    let mut input = InputState::new(800.0, 800.0, config.page_length);
    input.set_pointer(PhysicalPosition::new(600.0, 200.0));

    let frame = FrameState::derive(tick(0.0, 0.0), &input, false, &config);
    assert!((frame.top_light_position[0] - 0.25).abs() < 1e-6);
    assert!((frame.top_light_position[1] - 0.25).abs() < 1e-6);
    assert!((frame.top_light_position[2] - config.top_light_z).abs() < 1e-6);
}

#[test]
fn pointer_is_clamped_to_half_unit_square() {
    let config = BackdropConfig::default();
    let mut input = InputState::new(800.0, 600.0, config.page_length);
    input.set_pointer(PhysicalPosition::new(5000.0, -400.0));
    let pointer = input.pointer();
    assert_eq!(pointer.x, 0.5);
    assert_eq!(pointer.y, -0.5);
}

#[test]
fn avatar_advances_only_when_loaded_and_at_bottom() {
    let config = BackdropConfig::default();
    let mut top = InputState::new(800.0, 800.0, config.page_length);
    let mut bottom = InputState::new(800.0, 800.0, config.page_length);
    // Past the end of the virtual document; scroll_by clamps to the max.
    bottom.scroll_by(1e9);
    top.scroll_by(0.0);

    for (input, loaded, expect) in [
        (&top, false, false),
        (&top, true, false),
        (&bottom, false, false),
        (&bottom, true, true),
    ] {
        let frame = FrameState::derive(tick(1.0, 0.016), input, loaded, &config);
        assert_eq!(frame.advance_avatar, expect);
        assert!((frame.avatar_delta - 0.016).abs() < 1e-6);
    }
}

#[test]
fn scroll_is_clamped_to_document_range() {
    let config = BackdropConfig::default();
    let mut input = InputState::new(800.0, 600.0, config.page_length);
    input.scroll_by(-500.0);
    assert_eq!(input.scroll_y(), 0.0);
    input.scroll_by(1e9);
    // document 1800, viewport 600
    assert_eq!(input.scroll_y(), 1200.0);
}

#[test]
fn at_bottom_is_trivially_true_for_single_screen_pages() {
    let config = BackdropConfig::default();
    // page_length 1.0: the whole document fits in the viewport.
    let input = InputState::new(800.0, 600.0, 1.0);
    let frame = FrameState::derive(tick(0.0, 0.0), &input, true, &config);
    assert!(frame.at_bottom);
    assert!(frame.advance_avatar);
}

#[test]
fn resize_reclamps_the_scroll_offset() {
    let config = BackdropConfig::default();
    let mut input = InputState::new(800.0, 600.0, config.page_length);
    input.scroll_by(1200.0);
    input.resize(400.0, 300.0, config.page_length);
    // New document 900, viewport 300: max scroll is 600.
    assert_eq!(input.scroll_y(), 600.0);
}

#[test]
fn pixel_ratio_is_clamped_to_the_configured_maximum() {
    assert_eq!(clamped_pixel_ratio(3.0, 2.0), 2.0);
    assert_eq!(clamped_pixel_ratio(1.5, 2.0), 1.5);
    assert_eq!(clamped_pixel_ratio(1.0, 2.0), 1.0);
}

#[test]
fn clock_delta_is_non_negative_and_elapsed_monotonic() {
    let mut clock = FrameClock::new();
    let mut previous = 0.0;
    for _ in 0..5 {
        let t = clock.tick();
        assert!(t.delta >= 0.0);
        assert!(t.elapsed >= previous);
        previous = t.elapsed;
    }
}
