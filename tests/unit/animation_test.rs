//! Unit tests for the animation player

use std::time::{Duration, Instant};

use imgnav::AnimationPlayer;

use crate::helpers::{animated, still};

#[test]
fn three_frames_cycle_with_their_own_durations() {
    let start = Instant::now();
    let mut player = AnimationPlayer::new();
    player.activate(animated(&[50, 100, 150]), start);

    assert_eq!(player.frame_index(), 0);
    assert_eq!(player.current_interval(), Some(Duration::from_millis(50)));

    let mut now = start;
    let mut seen = vec![player.frame_index()];
    for _ in 0..4 {
        now += player.time_until_next(now).unwrap();
        assert!(player.tick(now));
        seen.push(player.frame_index());
        if player.frame_index() == 2 {
            assert_eq!(player.current_interval(), Some(Duration::from_millis(150)));
        }
    }
    assert_eq!(seen, [0, 1, 2, 0, 1]);
}

#[test]
fn tick_before_deadline_does_nothing() {
    let start = Instant::now();
    let mut player = AnimationPlayer::new();
    player.activate(animated(&[50, 50]), start);

    assert!(!player.tick(start + Duration::from_millis(49)));
    assert_eq!(player.frame_index(), 0);
    assert!(player.tick(start + Duration::from_millis(50)));
    assert_eq!(player.frame_index(), 1);
}

#[test]
fn still_image_never_arms() {
    let start = Instant::now();
    let mut player = AnimationPlayer::new();
    player.activate(still(), start);

    assert!(!player.is_armed());
    assert!(player.current_image().is_some());
    assert!(!player.tick(start + Duration::from_secs(10)));
}

#[test]
fn stop_disarms_and_clears_frames() {
    let start = Instant::now();
    let mut player = AnimationPlayer::new();
    player.activate(animated(&[10, 10, 10]), start);
    player.tick(start + Duration::from_millis(10));

    player.stop();
    assert!(!player.is_armed());
    assert_eq!(player.frame_count(), 0);
    assert!(player.current_image().is_none());
    assert!(!player.tick(start + Duration::from_secs(1)));
}

#[test]
fn reactivation_restarts_at_first_frame() {
    let start = Instant::now();
    let mut player = AnimationPlayer::new();
    player.activate(animated(&[10, 20]), start);
    player.tick(start + Duration::from_millis(10));
    assert_eq!(player.frame_index(), 1);

    player.activate(animated(&[30, 40]), start);
    assert_eq!(player.frame_index(), 0);
    assert_eq!(player.current_interval(), Some(Duration::from_millis(30)));
}
