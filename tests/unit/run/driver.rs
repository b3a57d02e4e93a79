use super::*;
use crate::encode::session::{EncodeTarget, open_encode_session};
use crate::foundation::core::Fps;
use crate::pattern::kinds::{ColorMode, PatternKind, RandomnessMode};
use crate::present::surface::InMemorySurface;
use crate::render::config::PipelineConfig;

fn pipeline() -> FramePipeline {
    let mut cfg = PipelineConfig::new(
        16,
        12,
        4,
        PatternKind::Trigonometric,
        ColorMode::DirectRgb,
        RandomnessMode::Classic,
        3,
    );
    cfg.animated = true;
    FramePipeline::configure(cfg).unwrap()
}

#[test]
fn clock_is_index_based() {
    let mut s = RunSchedule::new(1, 3);
    s.start_time = 1.0;
    let times: Vec<f32> = s.frame_plan().map(|(_, _, t)| t).collect();
    assert_eq!(times, vec![1.0, 1.05, 1.1]);
    assert_eq!(s.time_at(200), 11.0);
}

#[test]
fn reseeding_is_deterministic_and_keeps_first_seed() {
    let mut s = RunSchedule::new(77, 4);
    s.reseed_each_frame = true;
    let a: Vec<u64> = s.frame_plan().map(|(_, seed, _)| seed).collect();
    let b: Vec<u64> = s.frame_plan().map(|(_, seed, _)| seed).collect();
    assert_eq!(a, b);
    assert_eq!(a[0], 77);
    assert_ne!(a[1], a[2]);

    s.reseed_each_frame = false;
    assert!(s.frame_plan().all(|(_, seed, _)| seed == 77));
}

#[test]
fn key_reseed_ors_in_the_scaled_key() {
    assert_eq!(seed_with_key(0, 97), 970);
    assert_eq!(seed_with_key(0b1, 0), 1);
    assert_eq!(seed_with_key(1024, 3), 1024 | 30);
}

#[test]
fn present_frames_swaps_every_frame() {
    let mut p = pipeline();
    let mut surface = InMemorySurface::new();
    let stats = present_frames(&mut p, &mut surface, &RunSchedule::new(5, 4)).unwrap();
    assert_eq!(stats.frames, 4);
    assert_eq!(surface.swaps(), 4);
    let shown: Vec<_> = surface.frames().collect();
    let idx: Vec<u64> = shown.iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3]);
    // animated clock moves the pattern
    assert_ne!(shown[0].1, shown[3].1);
}

#[test]
fn render_to_session_counts_frames() {
    let mut p = pipeline();
    let mut session = open_encode_session(
        EncodeTarget::Memory { reorder_depth: 2 },
        Fps::integer(10).unwrap(),
        16,
        12,
    )
    .unwrap();
    let stats = render_to_session(&mut p, &mut session, &RunSchedule::new(9, 20)).unwrap();
    assert_eq!(stats.frames, 20);
    assert_eq!(stats.last_seed, 9);
    let summary = session.close().unwrap();
    assert_eq!(summary.frames, 20);
    assert_eq!(summary.duration_secs, 2.0);
}

#[test]
fn empty_schedule_is_rejected() {
    let mut p = pipeline();
    let mut surface = InMemorySurface::new();
    assert!(present_frames(&mut p, &mut surface, &RunSchedule::new(1, 0)).is_err());
}
