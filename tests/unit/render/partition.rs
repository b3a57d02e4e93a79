use super::*;

fn assert_exact_cover(height: u32, spans: &[RowSpan]) {
    let mut next = 0;
    for s in spans {
        assert_eq!(s.start, next, "gap or overlap at row {next}");
        next = s.end;
    }
    assert_eq!(next, height);
}

#[test]
fn height_601_over_8_workers() {
    let spans = partition_rows(601, 8).unwrap();
    assert_eq!(spans.len(), 8);
    assert_eq!(spans.iter().map(|s| s.len()).sum::<u32>(), 601);
    assert_eq!(spans[0].len(), 76);
    for s in &spans[1..] {
        assert_eq!(s.len(), 75);
    }
    assert_exact_cover(601, &spans);
}

#[test]
fn exact_partition_for_many_shapes() {
    for height in [1u32, 2, 7, 64, 100, 599, 600, 601, 1080] {
        for workers in 1..=height.min(33) as usize {
            let spans = partition_rows(height, workers).unwrap();
            assert_eq!(spans.len(), workers);
            assert_exact_cover(height, &spans);
            assert!(spans.iter().all(|s| !s.is_empty()));
            let max = spans.iter().map(|s| s.len()).max().unwrap();
            let min = spans.iter().map(|s| s.len()).min().unwrap();
            assert!(max - min <= 1);
        }
    }
}

#[test]
fn every_row_is_owned_by_exactly_one_span() {
    let spans = partition_rows(97, 6).unwrap();
    for y in 0..97 {
        assert_eq!(spans.iter().filter(|s| s.contains(y)).count(), 1);
    }
}

#[test]
fn more_workers_than_rows_leaves_empty_tail() {
    let spans = partition_rows(3, 5).unwrap();
    assert_exact_cover(3, &spans);
    assert_eq!(spans.iter().filter(|s| s.is_empty()).count(), 2);
    assert!(spans[..3].iter().all(|s| s.len() == 1));
}

#[test]
fn zero_workers_is_an_error() {
    assert!(partition_rows(10, 0).is_err());
}
