//! Unit tests for natural-order keys

use std::cmp::Ordering;

use imgnav::index::natural::sort_natural;
use imgnav::index::{natural_cmp, NaturalKey};

#[test]
fn numeric_runs_compare_by_value() {
    let mut names = vec!["a10", "a2", "a1"];
    sort_natural(&mut names);
    assert_eq!(names, ["a1", "a2", "a10"]);
}

#[test]
fn sort_by_key_matches_sort_by_cmp() {
    let mut by_key = vec!["img12.png", "img3.png", "img003.png", "Img1.png", "img"];
    let mut by_cmp = by_key.clone();
    by_key.sort_by_cached_key(|s| NaturalKey::new(s));
    by_cmp.sort_by(|a, b| natural_cmp(a, b));
    assert_eq!(by_key, by_cmp);
}

#[test]
fn leading_zeros_do_not_change_value_order() {
    assert_eq!(natural_cmp("frame007", "frame10"), Ordering::Less);
    assert_eq!(natural_cmp("frame10", "frame007"), Ordering::Greater);
}

#[test]
fn empty_string_sorts_first() {
    let mut keys = vec!["b", "", "1", "a"];
    sort_natural(&mut keys);
    assert_eq!(keys[0], "");
}

#[test]
fn comparison_is_antisymmetric_on_mixed_tokens() {
    let samples = ["1a", "a1", "a", "1", "", "a01", "01", "x_2", "x_10"];
    for a in samples {
        assert_eq!(natural_cmp(a, a), Ordering::Equal, "{a}");
        for b in samples {
            assert_eq!(natural_cmp(a, b), natural_cmp(b, a).reverse(), "{a} vs {b}");
        }
    }
}

#[test]
fn large_numbers_do_not_overflow() {
    let huge = "n123456789012345678901234567890";
    let small = "n99";
    assert_eq!(natural_cmp(small, huge), Ordering::Less);
}

#[test]
fn numbers_equal_by_value_defer_to_later_runs() {
    assert_eq!(natural_cmp("a01a", "a1b"), Ordering::Less);
    let mut names = vec!["shot_1_b.png", "shot_01_a.png", "shot_001_c.png"];
    sort_natural(&mut names);
    assert_eq!(names, ["shot_01_a.png", "shot_1_b.png", "shot_001_c.png"]);
}
