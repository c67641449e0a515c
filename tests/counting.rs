use ccount::math::Centroid;
use ccount::{CentroidCounter, CounterConfig, Detection, MatchPolicy};

fn at(cx: f32, cy: f32) -> Detection {
    Detection::from_xywh(cx, cy, 30.0, 60.0, 0.9, 0)
}

fn registry(counter: &CentroidCounter) -> Vec<(u64, (f32, f32))> {
    counter
        .registry()
        .iter()
        .map(|t| (t.track_id, (t.centroid.x, t.centroid.y)))
        .collect()
}

#[test]
fn scenarios_a_b_c() {
    let mut counter = CentroidCounter::with_radius(50.0);

    // A
    let res = counter.count(&[at(100.0, 100.0)]);
    assert_eq!(res.current_count, 1);
    assert_eq!(res.total_count, 1);
    assert_eq!(registry(&counter), vec![(0, (100.0, 100.0))]);

    // B: ~11.2px away, same object
    let res = counter.count(&[at(110.0, 105.0)]);
    assert_eq!(res.current_count, 0);
    assert_eq!(res.total_count, 1);
    assert_eq!(registry(&counter), vec![(0, (110.0, 105.0))]);

    // C
    let res = counter.count(&[at(400.0, 400.0)]);
    assert_eq!(res.current_count, 1);
    assert_eq!(res.total_count, 2);
    assert_eq!(
        registry(&counter),
        vec![(0, (110.0, 105.0)), (1, (400.0, 400.0))]
    );
}

// Two detections both within reach of track 0 but 60px from each other.
fn scenario_d(policy: MatchPolicy) -> (CentroidCounter, u32) {
    let mut counter = CentroidCounter::new(CounterConfig::new(50.0).with_policy(policy));
    counter.count(&[at(100.0, 100.0)]);

    let res = counter.count(&[at(130.0, 100.0), at(70.0, 100.0)]);
    (counter, res.current_count)
}

#[test]
fn scenario_d_snapshot_last_detection_wins() {
    let (counter, new_in_frame) = scenario_d(MatchPolicy::Snapshot);

    assert_eq!(new_in_frame, 0);
    assert_eq!(counter.total_count(), 1);
    assert_eq!(counter.registry().centroid(0), Some(Centroid::new(70.0, 100.0)));
    assert_eq!(counter.registry().get(0).unwrap().hits, 3);
}

#[test]
fn scenario_d_mutate_as_you_go_sees_moved_track() {
    let (counter, new_in_frame) = scenario_d(MatchPolicy::MutateAsYouGo);

    // the first detection drags track 0 to x=130, leaving the second 60px away
    assert_eq!(new_in_frame, 1);
    assert_eq!(
        registry(&counter),
        vec![(0, (130.0, 100.0)), (1, (70.0, 100.0))]
    );
}

#[test]
fn snapshot_ignores_tracks_created_in_the_same_frame() {
    let mut counter =
        CentroidCounter::new(CounterConfig::default().with_policy(MatchPolicy::Snapshot));
    let res = counter.count(&[at(100.0, 100.0), at(105.0, 100.0)]);
    assert_eq!(res.current_count, 2);

    let mut counter = CentroidCounter::default();
    let res = counter.count(&[at(100.0, 100.0), at(105.0, 100.0)]);
    assert_eq!(res.current_count, 1);
    assert_eq!(counter.registry().centroid(0), Some(Centroid::new(105.0, 100.0)));
}

#[test]
fn repeated_observation_counts_once() {
    for radius in [0.5, 1.0, 50.0, 1000.0] {
        let mut counter = CentroidCounter::with_radius(radius);
        let news: Vec<_> = (0..10)
            .map(|_| counter.count(&[at(321.0, 123.0)]).current_count)
            .collect();

        assert_eq!(news[0], 1);
        assert!(news[1..].iter().all(|&n| n == 0));
        assert_eq!(counter.total_count(), 1);
    }
}

#[test]
fn huge_coordinates_still_match_themselves() {
    let mut counter = CentroidCounter::default();
    let det = Detection::new(3.0e38, 0.0, 3.2e38, 10.0, 0.9, 0);

    let news: Vec<_> = (0..3).map(|_| counter.count(&[det]).current_count).collect();
    assert_eq!(news, vec![1, 0, 0]);
    assert_eq!(counter.total_count(), 1);
    assert!(counter.registry().centroid(0).unwrap().x.is_finite());
}

#[test]
fn distance_equal_to_radius_is_a_new_track() {
    let mut counter = CentroidCounter::with_radius(50.0);
    counter.count(&[at(100.0, 100.0)]);

    // 3-4-5 triangle scaled by 10
    let res = counter.count(&[at(130.0, 140.0)]);
    assert_eq!(res.current_count, 1);
    assert_eq!(counter.registry().centroid(0), Some(Centroid::new(100.0, 100.0)));
}

#[test]
fn first_match_not_nearest_match() {
    let mut counter = CentroidCounter::with_radius(50.0);
    counter.count(&[at(100.0, 100.0), at(160.0, 100.0)]);
    assert_eq!(counter.total_count(), 2);

    // 35px from track 0, 25px from track 1: track 0 still takes it
    counter.count(&[at(135.0, 100.0)]);
    assert_eq!(counter.registry().centroid(0), Some(Centroid::new(135.0, 100.0)));
    assert_eq!(counter.registry().centroid(1), Some(Centroid::new(160.0, 100.0)));
}

#[test]
fn non_positive_radius_makes_everything_new() {
    for radius in [0.0, -10.0] {
        let mut counter = CentroidCounter::with_radius(radius);
        assert_eq!(counter.count(&[at(10.0, 10.0)]).current_count, 1);
        assert_eq!(counter.count(&[at(10.0, 10.0), at(10.0, 10.0)]).current_count, 2);
        assert_eq!(counter.total_count(), 3);
        assert_eq!(counter.registry().len(), 3);
    }
}

#[test]
fn empty_frames_leave_registry_untouched() {
    let mut counter = CentroidCounter::default();
    counter.count(&[at(100.0, 100.0)]);
    let before = registry(&counter);

    for _ in 0..5 {
        let res = counter.count(std::iter::empty::<Detection>());
        assert_eq!(res.current_count, 0);
        assert_eq!(res.total_count, 1);
    }

    assert_eq!(registry(&counter), before);
}

#[test]
fn partial_frame_failure_keeps_stream_going() {
    let mut counter = CentroidCounter::default();
    let frame = [
        at(100.0, 100.0),
        Detection::new(0.0, f32::INFINITY, 10.0, 10.0, 0.9, 0),
        Detection::new(0.0, 20.0, 10.0, 10.0, 0.9, 0),
        at(400.0, 100.0),
    ];

    let res = counter.count(&frame);
    assert_eq!(res.skipped, 2);
    assert_eq!(res.current_count, 2);

    let res = counter.count(&[at(102.0, 100.0)]);
    assert_eq!(res.current_count, 0);
}

#[test]
fn lazy_detector_output_is_accepted() {
    let mut counter = CentroidCounter::default();
    let lazy = (0..4).map(|i| at(100.0 + i as f32 * 200.0, 100.0));

    assert_eq!(counter.process_frame(lazy, 50.0), 4);
}

#[test]
fn independent_counters_do_not_interfere() {
    let mut a = CentroidCounter::default();
    let mut b = CentroidCounter::default();

    a.count(&[at(100.0, 100.0), at(400.0, 400.0)]);
    b.count(&[at(100.0, 100.0)]);

    assert_eq!(a.total_count(), 2);
    assert_eq!(b.total_count(), 1);
}
