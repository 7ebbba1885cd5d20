use chart_pp::{Difficulty, Judgements, PerformanceAttributes};

use self::common::*;

mod common;

#[test]
fn zero_successful_hits_floor() {
    let attrs = Difficulty::new().calculate(&jump_pattern(64));

    let perf = attrs
        .performance()
        .judgements(Judgements {
            n_miss: 64,
            ..Default::default()
        })
        .calculate();

    assert!(perf.deviation.is_infinite());
    assert_eq_float(perf.pp, 0.0);
    assert_eq_float(perf.pp_difficulty, 0.0);
    assert_eq_float(perf.pp_acc, 0.0);
}

#[test]
fn cleaner_plays_approach_the_ceiling_monotonically() {
    let attrs = Difficulty::new().calculate(&jump_pattern(64));

    let mut prev_pp = -1.0;
    let mut prev_deviation = f64::INFINITY;

    // Sweep from an all-good play to an all-great play.
    for n_great in (0..=64).step_by(8) {
        let perf = attrs
            .clone()
            .performance()
            .judgements(Judgements {
                n_great,
                n_good: 64 - n_great,
                ..Default::default()
            })
            .calculate();

        assert!(perf.pp >= prev_pp);
        assert!(perf.deviation <= prev_deviation);

        prev_pp = perf.pp;
        prev_deviation = perf.deviation;
    }

    // The perfect play has a near-zero deviation and the highest value.
    assert!(prev_deviation < 20.0);
}

#[test]
fn determinism() {
    let attrs = Difficulty::new().calculate(&jump_pattern(64));

    let judgements = Judgements {
        n_great: 50,
        n_good: 10,
        n_meh: 2,
        n_miss: 2,
    };

    let a = attrs
        .clone()
        .performance()
        .judgements(judgements)
        .calculate();
    let b = attrs.performance().judgements(judgements).calculate();

    assert_eq!(a.pp.to_bits(), b.pp.to_bits());
    assert_eq!(a.deviation.to_bits(), b.deviation.to_bits());
    assert_eq!(a, b);
}

#[test]
fn harder_charts_award_more() {
    let easy = Difficulty::new().calculate(&jump_pattern(16));
    let hard = Difficulty::new().mods(1 << 6).calculate(&jump_pattern(64));

    assert!(hard.stars > easy.stars);

    let judgements = |n| Judgements {
        n_great: n,
        ..Default::default()
    };

    let easy_pp = easy
        .performance()
        .judgements(judgements(16))
        .calculate()
        .pp;
    let hard_pp = hard
        .performance()
        .judgements(judgements(64))
        .calculate()
        .pp;

    assert!(hard_pp > easy_pp);
}

#[test]
fn accuracy_shortcut_matches_explicit_counts() {
    let attrs = Difficulty::new().calculate(&jump_pattern(64));

    let via_accuracy = attrs
        .clone()
        .performance()
        .accuracy(100.0)
        .calculate();

    let via_judgements = attrs
        .performance()
        .judgements(Judgements {
            n_great: 64,
            ..Default::default()
        })
        .calculate();

    assert_eq_float(via_accuracy.pp, via_judgements.pp);
}

#[test]
fn performance_pairs_round_trip() {
    let attrs = Difficulty::new().calculate(&jump_pattern(64));

    let perf = attrs
        .performance()
        .judgements(Judgements {
            n_great: 60,
            n_good: 3,
            n_meh: 0,
            n_miss: 1,
        })
        .calculate();

    let imported =
        PerformanceAttributes::from_pairs(perf.difficulty.clone(), &perf.to_pairs()).unwrap();

    assert_eq_float(imported.pp, perf.pp);
    assert_eq_float(imported.pp_difficulty, perf.pp_difficulty);
    assert_eq_float(imported.pp_acc, perf.pp_acc);
    assert_eq_float(imported.deviation, perf.deviation);
    assert_eq_float(imported.effective_miss_count, perf.effective_miss_count);
    assert_eq!(imported.difficulty, perf.difficulty);
}
