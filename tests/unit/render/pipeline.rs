use super::*;

fn config(workers: usize) -> PipelineConfig {
    PipelineConfig::new(
        64,
        40,
        8,
        PatternKind::Polar,
        ColorMode::DirectRgb,
        RandomnessMode::Classic,
        workers,
    )
}

#[test]
fn configure_rejects_bad_input() {
    assert!(FramePipeline::configure(config(0)).is_err());
    let mut c = config(2);
    c.tile_size = 0;
    assert!(matches!(
        FramePipeline::configure(c),
        Err(TileforgeError::Validation(_))
    ));
}

#[test]
fn frame_is_black_before_first_generate() {
    let p = FramePipeline::configure(config(2)).unwrap();
    assert!(p.frame().data().iter().all(|&b| b == 0));
    assert_eq!(p.frames_generated(), 0);
}

#[test]
fn generate_is_idempotent_in_classic_mode() {
    let mut p = FramePipeline::configure(config(3)).unwrap();
    let first = p.generate_frame(7, 0.0).unwrap().clone();
    let second = p.generate_frame(7, 0.0).unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(p.frames_generated(), 2);
}

#[test]
fn worker_count_change_keeps_output() {
    let mut p = FramePipeline::configure(config(1)).unwrap();
    let one = p.generate_frame(99, 0.0).unwrap().clone();
    p.set_worker_count(7).unwrap();
    let seven = p.generate_frame(99, 0.0).unwrap().clone();
    assert_eq!(one, seven);
    assert_eq!(p.last_report().workers, 7);
}

#[test]
fn set_worker_count_validates() {
    let mut p = FramePipeline::configure(config(1)).unwrap();
    assert!(p.set_worker_count(0).is_err());
    assert!(p.set_worker_count(crate::render::config::MAX_WORKERS + 1).is_err());
    assert_eq!(p.config().workers, 1);
}

#[test]
fn scratch_assembly_reports_copied_bytes() {
    let mut p = FramePipeline::configure(config(4)).unwrap();
    p.set_assembly(AssemblyStrategy::Scratch);
    p.generate_frame(1, 0.0).unwrap();
    assert_eq!(p.last_report().copied_bytes, 64 * 40 * 3);
}

#[test]
fn workers_clamp_to_height() {
    let mut c = config(16);
    c.height = 3;
    let mut p = FramePipeline::configure(c).unwrap();
    p.generate_frame(5, 0.0).unwrap();
    assert_eq!(p.last_report().workers, 3);
}

#[test]
fn chaotic_state_persists_and_resets_on_seed_change() {
    let mut c = config(2);
    c.randomness = RandomnessMode::ChaoticAttractor;
    let mut p = FramePipeline::configure(c).unwrap();

    p.generate_frame(11, 0.0).unwrap();
    let after_one = p.chaotic_state();
    assert_ne!(after_one, ChaoticState::INITIAL);

    p.generate_frame(11, 0.0).unwrap();
    let after_two = p.chaotic_state();
    assert_ne!(after_two, after_one);

    // A new seed restarts from the initial state, so one frame lands where the first one did.
    p.generate_frame(12, 0.0).unwrap();
    let mut fresh = FramePipeline::configure(p.config().clone()).unwrap();
    fresh.generate_frame(12, 0.0).unwrap();
    assert_eq!(p.chaotic_state(), fresh.chaotic_state());
}

#[test]
fn switching_randomness_resets_chaos() {
    let mut c = config(2);
    c.randomness = RandomnessMode::ChaoticAttractor;
    let mut p = FramePipeline::configure(c).unwrap();
    p.generate_frame(3, 0.0).unwrap();
    p.set_randomness(RandomnessMode::Classic);
    assert_eq!(p.chaotic_state(), ChaoticState::INITIAL);
}

#[test]
fn outline_fill_overwrites_previous_frame() {
    let mut p = FramePipeline::configure(config(2)).unwrap();
    p.generate_frame(1, 0.0).unwrap();
    p.set_fill(TileFill::Outline);
    let frame = p.generate_frame(1, 0.0).unwrap();
    assert_eq!(frame.pixel(3, 3), Some([0, 0, 0]));
}
