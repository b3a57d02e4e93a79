use super::*;

fn frame(fill: u8) -> FrameBuffer {
    let mut f = FrameBuffer::black(2, 2).unwrap();
    f.data_mut().fill(fill);
    f
}

#[test]
fn only_swapped_frames_are_shown() {
    let mut s = InMemorySurface::new();
    s.present(FrameIndex(0), &frame(1)).unwrap();
    assert!(s.front().is_none());
    s.swap_buffers().unwrap();
    s.present(FrameIndex(1), &frame(2)).unwrap();
    s.swap_buffers().unwrap();
    assert_eq!(s.frames().len(), 2);
    assert_eq!(s.front(), Some(&frame(2)));
    assert_eq!(s.swaps(), 2);
}

#[test]
fn swap_without_present_keeps_front() {
    let mut s = InMemorySurface::new();
    s.present(FrameIndex(0), &frame(5)).unwrap();
    s.swap_buffers().unwrap();
    s.swap_buffers().unwrap();
    assert_eq!(s.frames().len(), 1);
    assert_eq!(s.front(), Some(&frame(5)));
}

#[test]
fn out_of_order_present_is_rejected() {
    let mut s = InMemorySurface::new();
    s.present(FrameIndex(3), &frame(0)).unwrap();
    s.swap_buffers().unwrap();
    assert!(s.present(FrameIndex(3), &frame(0)).is_err());
    assert!(s.present(FrameIndex(2), &frame(0)).is_err());
}

#[test]
fn history_is_capped_to_the_newest_frames() {
    let mut s = InMemorySurface::with_history(3);
    for i in 0..10u8 {
        s.present(FrameIndex(u64::from(i)), &frame(i)).unwrap();
        s.swap_buffers().unwrap();
    }
    let kept: Vec<u64> = s.frames().map(|(i, _)| i.0).collect();
    assert_eq!(kept, vec![7, 8, 9]);
    assert_eq!(s.front(), Some(&frame(9)));
    assert_eq!(s.front_index(), Some(FrameIndex(9)));
    assert_eq!(s.swaps(), 10);
    // ordering is enforced against the last shown index, not just retained frames
    assert!(s.present(FrameIndex(8), &frame(0)).is_err());
}

#[test]
fn zero_history_still_keeps_the_front_frame() {
    let mut s = InMemorySurface::with_history(0);
    s.present(FrameIndex(0), &frame(1)).unwrap();
    s.swap_buffers().unwrap();
    s.present(FrameIndex(1), &frame(2)).unwrap();
    s.swap_buffers().unwrap();
    assert_eq!(s.frames().len(), 1);
    assert_eq!(s.front(), Some(&frame(2)));
    assert_eq!(InMemorySurface::new().frames().len(), 0);
}
