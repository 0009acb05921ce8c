use linecount_rs::{CounterConfig, CrossingKind, Detection, LineCounter};

const FRAME_WIDTH: u32 = 1000; // line_out_x = 200, line_in_x = 700

/// A person-sized box whose centroid sits at the given x.
fn person_at(x: f32) -> Detection {
    Detection::new(x - 20.0, 100.0, x + 20.0, 300.0, 0.9)
}

#[test]
fn test_simple_entry() {
    let mut counter = LineCounter::new(CounterConfig::default());

    // Frame 1: one person just short of the IN line
    let tracks = counter.update(FRAME_WIDTH, vec![person_at(690.0)]);
    assert_eq!(tracks.len(), 1);
    let id = tracks[0].id;
    assert_eq!(counter.counts().in_count, 0);

    // Frame 2: crossed the IN line, 15 px of movement
    let tracks = counter.update(FRAME_WIDTH, vec![person_at(705.0)]);
    assert_eq!(tracks[0].id, id);
    assert_eq!(tracks[0].direction, Some(CrossingKind::In));
    assert_eq!(counter.counts().in_count, 1);
    assert_eq!(counter.counts().occupancy(), 1);
}

#[test]
fn test_lingering_on_in_line_counts_once() {
    let mut counter = LineCounter::new(CounterConfig::default());

    counter.update(FRAME_WIDTH, vec![person_at(690.0)]);
    counter.update(FRAME_WIDTH, vec![person_at(710.0)]);
    assert_eq!(counter.counts().in_count, 1);

    // Several more frames past the line: no transition edge, no recount.
    for x in [705.0, 715.0, 708.0, 712.0] {
        let tracks = counter.update(FRAME_WIDTH, vec![person_at(x)]);
        assert_eq!(tracks[0].direction, None);
    }
    assert_eq!(counter.counts().in_count, 1);
}

#[test]
fn test_jitter_on_in_line_never_counts() {
    let mut counter = LineCounter::new(CounterConfig::default());

    // Centroid oscillating within 5 px of the line at 700.
    for x in [698.0, 701.0, 697.0, 702.0, 698.0, 701.0] {
        counter.update(FRAME_WIDTH, vec![person_at(x)]);
    }
    assert_eq!(counter.counts().in_count, 0);
    assert_eq!(counter.counts().out_count, 0);
}

#[test]
fn test_exit_then_reentry_counted() {
    let mut counter = LineCounter::new(CounterConfig::default());

    // Walk out across the OUT line at 200.
    counter.update(FRAME_WIDTH, vec![person_at(210.0)]);
    let tracks = counter.update(FRAME_WIDTH, vec![person_at(190.0)]);
    assert_eq!(tracks[0].direction, Some(CrossingKind::Out));
    assert_eq!(counter.counts().out_count, 1);
    assert!(tracks[0].last_out);
    assert!(!tracks[0].last_in);

    // Walk back right across the frame in association-sized steps, then
    // over the IN line. last_out is set, so the IN count is permitted.
    let mut id = tracks[0].id;
    for x in [290.0, 390.0, 490.0, 590.0, 690.0] {
        let tracks = counter.update(FRAME_WIDTH, vec![person_at(x)]);
        assert_eq!(tracks[0].id, id, "identity must survive the walk");
        id = tracks[0].id;
    }
    let tracks = counter.update(FRAME_WIDTH, vec![person_at(705.0)]);
    assert_eq!(tracks[0].direction, Some(CrossingKind::In));
    assert_eq!(counter.counts().in_count, 1);
    assert_eq!(counter.counts().out_count, 1);
    assert_eq!(counter.counts().occupancy(), 0);
}

#[test]
fn test_reentry_blocked_without_exit() {
    let mut counter = LineCounter::new(CounterConfig::default());

    counter.update(FRAME_WIDTH, vec![person_at(690.0)]);
    counter.update(FRAME_WIDTH, vec![person_at(710.0)]);
    assert_eq!(counter.counts().in_count, 1);

    // Drift back below the line and cross again without an OUT in
    // between: the hysteresis flag blocks a second count.
    counter.update(FRAME_WIDTH, vec![person_at(660.0)]);
    counter.update(FRAME_WIDTH, vec![person_at(690.0)]);
    let tracks = counter.update(FRAME_WIDTH, vec![person_at(710.0)]);
    assert_eq!(tracks[0].direction, None);
    assert_eq!(counter.counts().in_count, 1);
}

#[test]
fn test_undetected_gap_mints_new_identity() {
    let mut counter = LineCounter::new(CounterConfig::default());

    // Frame N: two people.
    let tracks = counter.update(FRAME_WIDTH, vec![person_at(300.0), person_at(500.0)]);
    let gone = tracks[0].id;
    let stays = tracks[1].id;

    // Frame N+1: the first person drops out, a third appears.
    let tracks = counter.update(FRAME_WIDTH, vec![person_at(505.0), person_at(800.0)]);
    assert_eq!(tracks[0].id, stays);
    let third = tracks[1].id;
    assert!(third > stays);

    // Frame N+2: the first person reappears where they were: their old
    // identity is gone for good, a fresh one is issued.
    let tracks = counter.update(
        FRAME_WIDTH,
        vec![person_at(302.0), person_at(510.0), person_at(805.0)],
    );
    let reissued = tracks.iter().find(|t| t.centroid.0 < 400).unwrap().id;
    assert_ne!(reissued, gone);
    assert!(reissued > third);
}

#[test]
fn test_identities_issued_in_strictly_increasing_order() {
    let mut counter = LineCounter::new(CounterConfig::default());
    let mut issued = Vec::new();

    // Alternate detection gaps so identities keep churning.
    for frame in 0..6 {
        let dets = if frame % 2 == 0 {
            vec![person_at(300.0), person_at(600.0)]
        } else {
            vec![]
        };
        for track in counter.update(FRAME_WIDTH, dets) {
            if !issued.contains(&track.id) {
                issued.push(track.id);
            }
        }
    }

    // Issued order is the discovery order and strictly increases.
    for pair in issued.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    assert_eq!(issued.len(), 6);
}

#[test]
fn test_reset_starts_a_new_session() {
    let mut counter = LineCounter::new(CounterConfig::default());

    counter.update(FRAME_WIDTH, vec![person_at(690.0)]);
    counter.update(FRAME_WIDTH, vec![person_at(710.0)]);
    assert_eq!(counter.counts().in_count, 1);

    counter.reset();
    assert_eq!(counter.counts().in_count, 0);
    assert!(counter.tracks().is_empty());

    // Identity numbering continues; the person right on the line gets a
    // fresh track with no history, so nothing counts on reappearance.
    let tracks = counter.update(FRAME_WIDTH, vec![person_at(710.0)]);
    assert_eq!(tracks[0].id, 1);
    assert_eq!(counter.counts().in_count, 0);
}

#[test]
fn test_two_people_crossing_in_one_frame() {
    let mut counter = LineCounter::new(CounterConfig::default());

    // One entering, one leaving, far apart so association is unambiguous.
    counter.update(FRAME_WIDTH, vec![person_at(690.0), person_at(210.0)]);
    counter.update(FRAME_WIDTH, vec![person_at(705.0), person_at(190.0)]);

    let counts = counter.counts();
    assert_eq!(counts.in_count, 1);
    assert_eq!(counts.out_count, 1);
    assert_eq!(counts.occupancy(), 0);
}
