#![allow(dead_code)] // not every test file uses every helper

use chart_pp::{Chart, HitObject, HitObjectKind, Pos2};

pub fn assert_eq_float(actual: f64, expected: f64) {
    if actual.is_infinite() && expected.is_infinite() {
        return;
    }

    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "expected {expected} but got {actual}"
    );
}

pub fn tap(x: f32, y: f32, start_time: f64, column: usize) -> HitObject {
    HitObject {
        pos: Pos2::new(x, y),
        start_time,
        column,
        kind: HitObjectKind::Tap,
    }
}

pub fn hold(x: f32, y: f32, start_time: f64, end_time: f64, path: Vec<Pos2>) -> HitObject {
    HitObject {
        pos: Pos2::new(x, y),
        start_time,
        column: 0,
        kind: HitObjectKind::Hold { end_time, path },
    }
}

pub fn chart(hit_objects: Vec<HitObject>) -> Chart {
    Chart {
        hit_objects,
        difficulty: 5.0,
        velocity: 1.0,
        tick_rate: 1.0,
    }
}

/// A back-and-forth jump pattern: `n` taps, 150 ms apart, alternating between
/// two well-spaced positions.
pub fn jump_pattern(n: usize) -> Chart {
    let objects = (0..n)
        .map(|i| {
            let x = if i % 2 == 0 { 100.0 } else { 350.0 };

            tap(x, 200.0, 500.0 + 150.0 * i as f64, i % 2)
        })
        .collect();

    chart(objects)
}
