use super::*;

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> FrameBuffer {
    let mut f = FrameBuffer::black(width, height).unwrap();
    for px in f.data_mut().chunks_exact_mut(3) {
        px.copy_from_slice(&rgb);
    }
    f
}

#[test]
fn black_and_white_hit_limited_range_luma() {
    assert_eq!(luma(0, 0, 0), 16);
    assert_eq!(luma(255, 255, 255), 235);
    assert_eq!(chroma(0, 0, 0), (128, 128));
    assert_eq!(chroma(255, 255, 255), (128, 128));
}

#[test]
fn saturated_primaries_stay_in_chroma_range() {
    assert_eq!(chroma(0, 0, 255).0, 240);
    assert_eq!(chroma(255, 0, 0).1, 240);
    for rgb in [[255, 255, 0], [0, 255, 255], [255, 0, 255], [0, 255, 0]] {
        let (u, v) = chroma(rgb[0], rgb[1], rgb[2]);
        assert!((16..=240).contains(&u), "{rgb:?} -> u {u}");
        assert!((16..=240).contains(&v), "{rgb:?} -> v {v}");
    }
}

#[test]
fn solid_frame_converts_to_flat_planes() {
    let canvas = Canvas {
        width: 4,
        height: 2,
    };
    let mut conv = Yuv420Converter::new(canvas).unwrap();
    let yuv = conv.convert(&solid(4, 2, [255, 255, 255])).unwrap();
    assert!(yuv.y().iter().all(|&v| v == 235));
    assert_eq!(yuv.u(), &[128, 128]);
    assert_eq!(yuv.v(), &[128, 128]);
    assert_eq!(yuv.byte_len(), 8 + 2 + 2);
}

#[test]
fn chroma_averages_each_two_by_two_block() {
    let canvas = Canvas {
        width: 2,
        height: 2,
    };
    let mut f = solid(2, 2, [0, 0, 0]);
    // top row blue, bottom row black: block average is (0, 0, 128)
    f.data_mut()[..6].copy_from_slice(&[0, 0, 255, 0, 0, 255]);
    let mut conv = Yuv420Converter::new(canvas).unwrap();
    let yuv = conv.convert(&f).unwrap();
    assert_eq!(yuv.u(), &[chroma(0, 0, 128).0]);
    assert_eq!(yuv.v(), &[chroma(0, 0, 128).1]);
}

#[test]
fn odd_dimensions_round_chroma_up() {
    let canvas = Canvas {
        width: 3,
        height: 3,
    };
    let mut conv = Yuv420Converter::new(canvas).unwrap();
    let yuv = conv.convert(&solid(3, 3, [10, 20, 30])).unwrap();
    assert_eq!(yuv.u().len(), 4);
    let (u, v) = chroma(10, 20, 30);
    assert!(yuv.u().iter().all(|&c| c == u));
    assert!(yuv.v().iter().all(|&c| c == v));
}

#[test]
fn size_mismatch_is_rejected() {
    let mut conv = Yuv420Converter::new(Canvas {
        width: 4,
        height: 4,
    })
    .unwrap();
    assert!(conv.convert(&solid(2, 2, [0, 0, 0])).is_err());
}
