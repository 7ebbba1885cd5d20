use chart_pp::{Difficulty, DifficultyAttributes};

use self::common::*;

mod common;

#[test]
fn empty_chart_is_all_zero() {
    let attrs = Difficulty::new().calculate(&chart(Vec::new()));

    assert_eq!(attrs, DifficultyAttributes::default());
}

#[test]
fn single_object_contributes_no_strain() {
    let attrs = Difficulty::new().calculate(&chart(vec![tap(100.0, 100.0, 500.0, 0)]));

    assert_eq_float(attrs.movement, 0.0);
    assert_eq_float(attrs.reading, 0.0);
    assert_eq_float(attrs.density, 0.0);
    assert_eq_float(attrs.stars, 0.0);
    assert_eq!(attrs.n_taps, 1);
}

#[test]
fn two_spaced_objects_rate_above_zero() {
    let attrs = Difficulty::new().calculate(&jump_pattern(2));

    assert!(attrs.movement > 0.0);
    assert!(attrs.density > 0.0);
    assert!(attrs.stars > 0.0);
}

#[test]
fn determinism() {
    let chart = jump_pattern(100);

    let a = Difficulty::new().mods(8).calculate(&chart);
    let b = Difficulty::new().mods(8).calculate(&chart);

    // Bit-identical, not merely close.
    assert_eq!(a.stars.to_bits(), b.stars.to_bits());
    assert_eq!(a.movement.to_bits(), b.movement.to_bits());
    assert_eq!(a.reading.to_bits(), b.reading.to_bits());
    assert_eq!(a.density.to_bits(), b.density.to_bits());
    assert_eq!(a, b);
}

#[test]
fn extending_a_pattern_never_lowers_skills() {
    let mut prev = Difficulty::new().calculate(&jump_pattern(8));

    for n in [16, 32, 64, 128] {
        let curr = Difficulty::new().calculate(&jump_pattern(n));

        assert!(curr.movement >= prev.movement - 1e-12);
        assert!(curr.reading >= prev.reading - 1e-12);
        assert!(curr.density >= prev.density - 1e-12);
        assert!(curr.stars >= prev.stars - 1e-12);

        prev = curr;
    }
}

#[test]
fn chord_rating_is_order_independent() {
    // Four simultaneous objects in distinct lanes; handing the calculator
    // the same chord in a different list order must not change the density
    // rating.
    let build = |lanes: &[usize]| {
        let mut objects = vec![tap(100.0, 100.0, 200.0, 0)];

        objects.extend(
            lanes
                .iter()
                .map(|&lane| tap(100.0 + 80.0 * lane as f32, 200.0, 1200.0, lane)),
        );

        Difficulty::new().calculate(&chart(objects))
    };

    let forward = build(&[0, 1, 2, 3]);
    let shuffled = build(&[2, 0, 3, 1]);

    assert_eq_float(forward.density, shuffled.density);
}

#[test]
fn double_time_rates_higher() {
    let chart = jump_pattern(64);

    let nomod = Difficulty::new().calculate(&chart);
    let dt = Difficulty::new().mods(1 << 6).calculate(&chart);

    assert!(dt.stars > nomod.stars);
    assert!(dt.great_hit_window < nomod.great_hit_window);
    assert!((dt.clock_rate - 1.5).abs() < f64::EPSILON);
}

#[test]
fn hidden_raises_reading() {
    let chart = jump_pattern(64);

    let nomod = Difficulty::new().calculate(&chart);
    let hd = Difficulty::new().mods(1 << 3).calculate(&chart);

    assert!(hd.reading > nomod.reading);
    assert_eq_float(hd.density, nomod.density);
}

#[test]
fn holds_rate_above_taps() {
    use chart_pp::Pos2;

    let taps = chart(vec![
        tap(100.0, 100.0, 500.0, 0),
        tap(300.0, 100.0, 1000.0, 0),
        tap(100.0, 100.0, 1500.0, 0),
    ]);

    let holds = chart(vec![
        hold(
            100.0,
            100.0,
            500.0,
            900.0,
            vec![Pos2::new(250.0, 220.0), Pos2::new(400.0, 100.0)],
        ),
        tap(300.0, 100.0, 1000.0, 0),
        tap(100.0, 100.0, 1500.0, 0),
    ]);

    let tap_attrs = Difficulty::new().calculate(&taps);
    let hold_attrs = Difficulty::new().calculate(&holds);

    assert!(hold_attrs.movement > tap_attrs.movement);
    assert_eq!(hold_attrs.n_holds, 1);
    assert!(hold_attrs.max_combo > tap_attrs.max_combo);
}

#[test]
fn cancellation_returns_none() {
    use chart_pp::Cancellation;

    let cancel = Cancellation::new();
    cancel.cancel();

    let attrs = Difficulty::new().calculate_cancellable(&jump_pattern(64), &cancel);

    assert!(attrs.is_none());
}

#[test]
fn attribute_pairs_round_trip() {
    let attrs = Difficulty::new().mods(8 + 16).calculate(&jump_pattern(64));

    let imported = DifficultyAttributes::from_pairs(&attrs.to_pairs()).unwrap();

    assert_eq_float(imported.stars, attrs.stars);
    assert_eq_float(imported.movement, attrs.movement);
    assert_eq_float(imported.reading, attrs.reading);
    assert_eq_float(imported.density, attrs.density);
    assert_eq_float(imported.great_hit_window, attrs.great_hit_window);
    assert_eq_float(imported.good_hit_window, attrs.good_hit_window);
    assert_eq_float(imported.meh_hit_window, attrs.meh_hit_window);
    assert_eq_float(imported.preempt, attrs.preempt);
    assert_eq_float(imported.clock_rate, attrs.clock_rate);
    assert_eq!(imported.n_taps, attrs.n_taps);
    assert_eq!(imported.n_holds, attrs.n_holds);
    assert_eq!(imported.n_ticks, attrs.n_ticks);
    assert_eq!(imported.max_combo, attrs.max_combo);
}
