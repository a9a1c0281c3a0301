// Frame gate behaviour against irregular display callbacks

use galaxy_field::FrameLimiter;

#[test]
fn test_fast_display_is_capped_at_target_rate() {
    let mut limiter = FrameLimiter::new(60.0);
    limiter.reset(0.0);

    // 125 Hz display for 100 ms
    let mut executed = 0;
    let mut t = 8.0;
    while t <= 100.0 {
        if limiter.should_render(t) {
            executed += 1;
        }
        t += 8.0;
    }

    assert!(executed <= (100.0_f64 / (1000.0 / 60.0)).ceil() as usize);
    assert!(executed >= 5);
    assert_eq!(limiter.frames_rendered() as usize, executed);
    assert_eq!(limiter.frames_rendered() + limiter.frames_skipped(), 12);
}

#[test]
fn test_exactly_on_interval_renders_every_callback() {
    let mut limiter = FrameLimiter::new(50.0);
    limiter.reset(0.0);

    for i in 1..=10 {
        assert!(limiter.should_render(i as f64 * 20.0));
    }
    assert_eq!(limiter.frames_skipped(), 0);
}

#[test]
fn test_no_drift_over_many_frames() {
    let mut limiter = FrameLimiter::new(60.0);
    limiter.reset(0.0);

    // 144 Hz for ten seconds should land close to 600 frames
    let step = 1000.0 / 144.0;
    let mut t = step;
    while t <= 10_000.0 {
        limiter.should_render(t);
        t += step;
    }
    let rendered = limiter.frames_rendered();
    assert!((590..=600).contains(&rendered), "rendered {}", rendered);
}
