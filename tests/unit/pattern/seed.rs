use super::*;

fn ctx(width: u32, height: u32, time_offset: f32, animated: bool) -> PatternContext {
    PatternContext {
        canvas: Canvas { width, height },
        tile_size: 10,
        time_offset,
        animated,
    }
}

#[test]
fn original_static_is_base_seed_or_product() {
    let c = ctx(800, 600, 0.0, false);
    assert_eq!(derive_seed(0, 0, PatternKind::Original, &c, 42), 42);
    assert_eq!(derive_seed(10, 20, PatternKind::Original, &c, 0), 200);
    assert_eq!(derive_seed(10, 20, PatternKind::Original, &c, 1), 201);
}

#[test]
fn original_animated_at_time_zero_matches_static() {
    let s = ctx(800, 600, 0.0, false);
    let a = ctx(800, 600, 0.0, true);
    for (x, y) in [(0, 0), (30, 40), (790, 590)] {
        assert_eq!(
            derive_seed(x, y, PatternKind::Original, &s, 7),
            derive_seed(x, y, PatternKind::Original, &a, 7)
        );
    }
}

#[test]
fn negative_intermediates_sign_extend_into_high_bits() {
    // sin(3.5) * 100 truncates to -35, cos(0) * 100 to 100.
    let c = ctx(800, 600, 0.0, false);
    let seed = derive_seed(70, 0, PatternKind::Trigonometric, &c, 0);
    assert_eq!(seed, (-3500i64) as u64);
}

#[test]
fn fractal_static_combines_two_scales() {
    let c = ctx(800, 600, 0.0, false);
    assert_eq!(derive_seed(16, 16, PatternKind::Fractal, &c, 0), 256 ^ 4);
}

#[test]
fn symmetry_static_mirrors_about_vertical_center() {
    let c = ctx(800, 600, 0.0, false);
    for (x, y) in [(10, 20), (150, 70), (399, 299)] {
        assert_eq!(
            derive_seed(x, y, PatternKind::Symmetry, &c, 3),
            derive_seed(800 - x, y, PatternKind::Symmetry, &c, 3)
        );
    }
}

#[test]
fn symmetry_survives_single_pixel_canvas() {
    let c = ctx(1, 1, 0.0, true);
    let _ = derive_seed(0, 0, PatternKind::Symmetry, &c, 3);
}

#[test]
fn or_patterns_keep_every_base_seed_bit() {
    let base = 0xA5A5_0000_0000_F00Fu64;
    let c = ctx(640, 480, 1.7, true);
    for pattern in [
        PatternKind::Original,
        PatternKind::Polar,
        PatternKind::Trigonometric,
        PatternKind::Fractal,
        PatternKind::WaveInterference,
        PatternKind::Symmetry,
        PatternKind::Kaleidoscope,
    ] {
        for (x, y) in [(0, 0), (120, 40), (630, 470)] {
            assert_eq!(derive_seed(x, y, pattern, &c, base) & base, base, "{pattern}");
        }
    }
}

#[test]
fn every_pattern_is_a_pure_function() {
    let c = ctx(320, 240, 2.25, true);
    for pattern in PatternKind::ALL {
        for (x, y) in [(0, 0), (16, 8), (310, 230)] {
            assert_eq!(
                derive_seed(x, y, pattern, &c, 99),
                derive_seed(x, y, pattern, &c, 99)
            );
        }
    }
}

#[test]
fn patterns_vary_across_the_image() {
    let c = ctx(320, 240, 0.5, true);
    for pattern in PatternKind::ALL {
        let mut seen = std::collections::HashSet::new();
        for y in (0..240).step_by(20) {
            for x in (0..320).step_by(20) {
                seen.insert(derive_seed(x, y, pattern, &c, 1234));
            }
        }
        assert!(seen.len() > 4, "{pattern} produced {} distinct seeds", seen.len());
    }
}

#[test]
fn cellular_pixels_cluster_into_few_cells() {
    let c = PatternContext {
        canvas: Canvas {
            width: 400,
            height: 400,
        },
        tile_size: 10,
        time_offset: 0.0,
        animated: false,
    };
    let mut cells = std::collections::HashSet::new();
    for y in 200..203 {
        for x in 200..203 {
            // Distance bands only touch the low bits.
            cells.insert(derive_seed(x, y, PatternKind::Cellular, &c, 0) >> 32);
        }
    }
    assert!(cells.len() <= 4);
}

#[test]
fn normalized_position_spans_unit_square() {
    let c = ctx(200, 100, 0.0, false);
    assert_eq!(c.normalized(0, 0), (0.0, 0.0));
    assert_eq!(c.normalized(100, 50), (0.5, 0.5));
}

#[test]
fn enhanced_seed_is_keyed_by_tile_and_base_seed() {
    let a = enhanced_seed(100, 1, 3, 4);
    assert_eq!(a, enhanced_seed(100, 1, 3, 4));
    assert_ne!(a, enhanced_seed(100, 1, 4, 3));
    assert_ne!(a, enhanced_seed(100, 2, 3, 4));
    // Only the drawn bits differ between two pattern seeds on the same tile.
    assert_eq!(a ^ enhanced_seed(200, 1, 3, 4), 100 ^ 200);
}
