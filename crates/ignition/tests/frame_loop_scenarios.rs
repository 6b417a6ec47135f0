//! Frame loop behaviour end to end: clock → animation → controls → render.

mod common;

use std::f32::consts::{PI, TAU};

use common::{canvas, start, start_failing, try_start};
use ignition::shared::IgnitionConfig;
use ignition::ui::{ParamEvent, ParamPanel};
use ignition::{FrameError, SceneEvent, StartupError};

#[test]
fn test_nine_fps_over_twelve_tenths() {
    let mut h = start(&[0.1; 12]);
    assert_eq!(h.frame_loop.run_frames(12).unwrap(), 12);

    let log = h.log.borrow();
    let steps: u32 = log.frames.iter().map(|s| s.sprite_steps).sum();
    assert_eq!(steps, 10);

    let animation = h.frame_loop.animation();
    assert!((animation.sprite_offset().x - 2.5).abs() < 1e-5);
    assert!((animation.flame().accumulated() - 0.0889).abs() < 1e-3);
    assert!((animation.starfield().y - 1.2).abs() < 1e-5);

    // The renderer samples folded offsets.
    let last = log.frames.last().unwrap();
    assert!((last.flame_offset_x - 0.5).abs() < 1e-5);
    assert!((last.starfield_offset_y - 0.2).abs() < 1e-5);
    assert!((last.rotation_y - 1.2 * PI).abs() < 1e-4);
}

#[test]
fn test_fps_change_applies_from_next_frame() {
    let mut h = start(&[0.1; 4]);
    h.frame_loop.run_frames(3).unwrap();
    assert!(h.events.send(SceneEvent::Param(ParamEvent::FramesPerSecondChanged { fps: 18 })));

    let stats = h.frame_loop.run_frame().unwrap();
    assert_eq!(stats.events_processed, 1);
    assert_eq!(h.frame_loop.animation().frames_per_second(), 18);

    let log = h.log.borrow();
    // 0.0778s carried at 9 fps plus 0.1s, at 1/18s per step.
    assert_eq!(log.frames[3].sprite_steps, 3);
    // Three frames at ratio 1, one at ratio 2.
    assert!((log.frames[3].starfield_offset_y - 0.5).abs() < 1e-5);
}

#[test]
fn test_panel_edits_reach_loop_through_bus() {
    let mut h = start(&[0.0; 2]);
    let mut panel = ParamPanel::default();

    panel.edit_frames_per_second(27.0, &mut h.events);
    panel.edit_offset_x(0.75, &mut h.events);
    h.frame_loop.run_frame().unwrap();

    assert_eq!(h.frame_loop.animation().frames_per_second(), 27);
    assert_eq!(h.frame_loop.animation().sprite_offset().x, 0.75);

    panel.sync(h.frame_loop.animation());
    assert_eq!(panel.offset_x().value(), 0.75);
}

#[test]
fn test_stalled_or_broken_clock_does_not_hang() {
    let mut h = start(&[1.0e9, f32::INFINITY, 0.1]);
    assert_eq!(h.frame_loop.run_frames(3).unwrap(), 3);

    let log = h.log.borrow();
    assert_eq!(log.frames[0].sprite_steps, u32::MAX);
    assert_eq!(log.frames[1].sprite_steps, 0);
    assert!(log.frames.iter().all(|s| s.rotation_y.is_finite()));
    assert!((0.0..1.0).contains(&log.frames[2].flame_offset_x));
}

#[test]
fn test_rotation_overshoot_resets_next_frame() {
    let mut h = start(&[2.2, 0.01]);
    h.frame_loop.run_frames(2).unwrap();

    let log = h.log.borrow();
    assert!(log.frames[0].rotation_y >= TAU);
    assert!(log.frames[1].rotation_y < TAU);
    assert!((log.frames[1].rotation_y - 0.01 * PI).abs() < 1e-5);
}

#[test]
fn test_resize_handled_once_per_event() {
    let mut h = start(&[0.016; 3]);
    assert_eq!(h.log.borrow().resizes.len(), 1);

    h.events.send(SceneEvent::Resized {
        width: 1000,
        height: 500,
        device_pixel_ratio: 3.0,
    });
    h.events.send(SceneEvent::Resized {
        width: 600,
        height: 600,
        device_pixel_ratio: 1.5,
    });
    h.frame_loop.run_frames(3).unwrap();

    let log = h.log.borrow();
    assert_eq!(log.resizes.len(), 3);
    assert_eq!(log.resizes[1].aspect, 2.0);
    assert_eq!(log.resizes[1].pixel_ratio, 2.0);
    assert_eq!(log.resizes[1].physical_width, 2000);
    assert_eq!(log.resizes[2].aspect, 1.0);
    assert_eq!(log.resizes[2].pixel_ratio, 1.5);
    assert!(log.frames.iter().all(|s| s.camera_aspect == 1.0));
    assert_eq!(h.frame_loop.viewport().resize_count(), 3);
}

#[test]
fn test_absent_canvas_fails_before_any_frame() {
    let (result, _events, log) =
        try_start(IgnitionConfig::default(), &canvas("canvas#other"), &[0.1], None);

    match result {
        Err(StartupError::MissingMountPoint { selector }) => assert_eq!(selector, "canvas#webgl"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("startup should fail without a canvas"),
    }
    let log = log.borrow();
    assert!(log.frames.is_empty());
    assert!(log.resizes.is_empty());
}

#[test]
fn test_invalid_config_fails_startup() {
    let mut config = IgnitionConfig::default();
    config.flame.frames_per_second = 99;

    let (result, _events, log) = try_start(config, &canvas("canvas#webgl"), &[], None);
    assert!(matches!(result, Err(StartupError::Config(_))));
    assert!(log.borrow().resizes.is_empty());
}

#[test]
fn test_render_error_halts_loop() {
    let mut h = start_failing(&[0.1; 10], Some(3));

    let err = h.frame_loop.run().unwrap_err();
    assert_eq!(
        err,
        FrameError::Render {
            frame: 3,
            reason: "device lost".into()
        }
    );
    assert_eq!(h.frame_loop.frame_count(), 2);
    assert!(!h.frame_loop.is_running());

    // Halted loops schedule nothing more.
    assert_eq!(h.frame_loop.run_frames(5).unwrap(), 0);
    assert_eq!(h.log.borrow().frames.len(), 2);
}

#[test]
fn test_controls_error_halts_loop() {
    struct BrokenControls;

    impl ignition::CameraController for BrokenControls {
        fn update(&mut self) -> Result<ignition::core::CameraPose, String> {
            Err("pointer capture lost".into())
        }
    }

    let h = start(&[0.1]);
    let mut frame_loop = h.frame_loop.with_controls(Box::new(BrokenControls));

    let err = frame_loop.run_frames(3).unwrap_err();
    assert!(matches!(err, FrameError::Controls { frame: 1, .. }));
    assert!(h.log.borrow().frames.is_empty());
    assert!(!frame_loop.is_running());
}

#[test]
fn test_stop_from_another_thread() {
    let mut h = start(&[]);
    let handle = h.frame_loop.stop_handle();

    h.frame_loop.run_frames(4).unwrap();
    std::thread::spawn(move || handle.stop()).join().unwrap();
    h.frame_loop.run().unwrap();

    assert_eq!(h.frame_loop.frame_count(), 4);
}
