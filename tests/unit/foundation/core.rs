use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_frames_to_secs_is_exact_for_integer_rates() {
    let fps = Fps::integer(30).unwrap();
    assert_eq!(fps.frames_to_secs(150), 5.0);
    assert_eq!(fps.frames_to_secs(0), 0.0);
}

#[test]
fn fps_ntsc_rate_frame_duration() {
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.as_f64() - 29.97).abs() < 0.001);
    assert!((fps.frame_duration_secs() - 1001.0 / 30000.0).abs() < 1e-12);
}

#[test]
fn canvas_center_rounds_down() {
    let c = Canvas {
        width: 801,
        height: 601,
    };
    assert_eq!(c.center_x(), 400);
    assert_eq!(c.center_y(), 300);
    assert_eq!(c.pixel_count(), 801 * 601);
}

#[test]
fn tile_grid_rounds_partial_tiles_up() {
    let grid = TileGrid::new(
        Canvas {
            width: 805,
            height: 600,
        },
        10,
    )
    .unwrap();
    assert_eq!(grid.cols, 81);
    assert_eq!(grid.rows, 60);
    assert_eq!(grid.tile_count(), 81 * 60);
    assert_eq!(grid.origin(80, 59), (800, 590));
    assert_eq!(grid.index(2, 1), 83);
    assert_eq!(grid.tile_row_of(599), 59);
}

#[test]
fn tile_grid_rejects_zero_tile_size() {
    let canvas = Canvas {
        width: 10,
        height: 10,
    };
    assert!(TileGrid::new(canvas, 0).is_err());
}
