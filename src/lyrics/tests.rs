use std::time::Duration;

use super::{LyricLine, LyricSheet};

fn line(secs: f64, text: &str) -> LyricLine {
    LyricLine {
        time: Duration::from_secs_f64(secs),
        text: text.into(),
    }
}

fn at(secs: f64) -> Duration {
    Duration::from_secs_f64(secs)
}

fn text_at(s: &LyricSheet, secs: f64) -> Option<&str> {
    s.active_index(at(secs)).map(|i| s.lines()[i].text.as_str())
}

fn sheet() -> LyricSheet {
    LyricSheet::new(vec![line(0.0, "a"), line(2.0, "b"), line(5.0, "c")])
}

#[test]
fn active_line_follows_position() {
    let s = sheet();
    assert_eq!(text_at(&s, 0.0), Some("a"));
    assert_eq!(text_at(&s, 1.0), Some("a"));
    assert_eq!(text_at(&s, 2.0), Some("b"));
    assert_eq!(text_at(&s, 4.9), Some("b"));
    assert_eq!(text_at(&s, 5.1), Some("c"));
}

#[test]
fn no_line_before_first_timestamp() {
    let s = LyricSheet::new(vec![line(2.0, "late start"), line(4.0, "second")]);
    assert_eq!(s.active_index(at(0.0)), None);
    assert_eq!(s.active_index(at(1.9)), None);
    // Boundary equality: a line becomes active exactly at its timestamp.
    assert_eq!(s.active_index(at(2.0)), Some(0));
}

#[test]
fn last_line_sticks_after_final_timestamp() {
    let s = sheet();
    assert_eq!(text_at(&s, 5.0), Some("c"));
    assert_eq!(text_at(&s, 500.0), Some("c"));
}

#[test]
fn empty_sheet_has_no_active_line() {
    let s = LyricSheet::default();
    assert!(s.is_empty());
    assert_eq!(s.active_index(at(0.0)), None);
    assert_eq!(s.active_index(at(30.0)), None);
}

#[test]
fn construction_sorts_unordered_lines() {
    let s = LyricSheet::new(vec![line(5.0, "c"), line(0.0, "a"), line(2.0, "b")]);
    let texts: Vec<&str> = s.lines().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}

#[test]
fn equal_timestamps_keep_original_order() {
    let s = LyricSheet::new(vec![
        line(2.0, "first"),
        line(1.0, "intro"),
        line(2.0, "second"),
    ]);
    let texts: Vec<&str> = s.lines().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["intro", "first", "second"]);
    // The later of the tied lines wins once their shared timestamp passes.
    assert_eq!(text_at(&s, 2.5), Some("second"));
}

#[test]
fn active_index_is_monotone_in_position() {
    let s = sheet();
    let mut last: Option<usize> = None;
    for half_secs in 0..=14 {
        let idx = s.active_index(at(f64::from(half_secs) * 0.5));
        if let (Some(prev), Some(cur)) = (last, idx) {
            assert!(cur >= prev, "index moved backward at {half_secs}");
        }
        if idx.is_some() {
            last = idx;
        }
    }
}

#[test]
fn active_index_is_stateless_across_call_order() {
    let s = sheet();
    let positions = [5.1, 0.0, 4.9, 2.0, 1.0, 500.0, 5.0];

    let jumbled: Vec<Option<usize>> = positions.iter().map(|&p| s.active_index(at(p))).collect();

    let mut ascending = positions;
    ascending.sort_by(|a, b| a.partial_cmp(b).unwrap());
    // Evaluating in ascending order must give the same answer per position.
    for &p in &ascending {
        let expected = s.active_index(at(p));
        let i = positions.iter().position(|&q| q == p).unwrap();
        assert_eq!(jumbled[i], expected, "position {p}");
    }
}
