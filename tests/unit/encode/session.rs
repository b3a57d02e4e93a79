use super::*;

fn fps30() -> Fps {
    Fps::integer(30).unwrap()
}

fn memory_session(reorder_depth: usize) -> EncodeSession {
    open_encode_session(EncodeTarget::Memory { reorder_depth }, fps30(), 8, 6).unwrap()
}

#[test]
fn lifecycle_walks_the_states() {
    let backend = Box::new(MemoryBackend::default());
    let mut s = EncodeSession::new(backend, EncodeParams::new(8, 6, fps30())).unwrap();
    assert_eq!(s.state(), SessionState::Uninitialized);
    assert!(s.submit_frame(&FrameBuffer::black(8, 6).unwrap()).is_err());

    s.begin().unwrap();
    assert_eq!(s.state(), SessionState::Open);
    s.submit_frame(&FrameBuffer::black(8, 6).unwrap()).unwrap();
    assert_eq!(s.state(), SessionState::Encoding);

    let summary = s.close().unwrap();
    assert_eq!(s.state(), SessionState::Closed);
    assert_eq!(summary.frames, 1);
    assert_eq!(summary.packets, 1);
    assert!(!summary.failed);
}

#[test]
fn close_drains_reordered_packets() {
    let mut s = memory_session(4);
    let frame = FrameBuffer::black(8, 6).unwrap();
    for _ in 0..10 {
        s.submit_frame(&frame).unwrap();
    }
    assert_eq!(s.packets(), 6);
    let summary = s.close().unwrap();
    assert_eq!(summary.packets, 10);
}

#[test]
fn submit_after_close_is_rejected() {
    let mut s = memory_session(0);
    let frame = FrameBuffer::black(8, 6).unwrap();
    s.submit_frame(&frame).unwrap();
    s.close().unwrap();
    assert!(matches!(
        s.submit_frame(&frame),
        Err(TileforgeError::Validation(_))
    ));
    assert!(s.close().is_err());
    assert_eq!(s.frames(), 1);
}

#[test]
fn wrong_frame_size_does_not_fail_the_session() {
    let mut s = memory_session(0);
    assert!(s.submit_frame(&FrameBuffer::black(4, 4).unwrap()).is_err());
    assert_eq!(s.state(), SessionState::Open);
}

#[test]
fn backend_error_fails_session_and_close_keeps_partial_output() {
    let backend = Box::new(MemoryBackend::new(0).fail_at_frame(3));
    let mut s = EncodeSession::open(backend, EncodeParams::new(8, 6, fps30())).unwrap();
    let frame = FrameBuffer::black(8, 6).unwrap();
    for _ in 0..3 {
        s.submit_frame(&frame).unwrap();
    }
    assert!(matches!(
        s.submit_frame(&frame),
        Err(TileforgeError::Encode(_))
    ));
    assert_eq!(s.state(), SessionState::Failed);
    assert!(s.failure().is_some_and(|m| m.contains("frame 3")));
    assert!(s.submit_frame(&frame).is_err());

    let summary = s.close().unwrap();
    assert!(summary.failed);
    assert_eq!(summary.frames, 3);
    assert_eq!(summary.packets, 3);
    assert_eq!(s.state(), SessionState::Closed);
}

#[test]
fn session_rejects_zero_bitrate() {
    let mut params = EncodeParams::new(8, 6, fps30());
    params.bitrate_kbps = 0;
    assert!(EncodeSession::open(Box::new(MemoryBackend::default()), params).is_err());
}
