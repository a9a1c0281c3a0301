/// Fixed-rate gate on top of a display-refresh callback.
///
/// The platform decides when callbacks fire; the limiter only decides which of
/// them do work. After an accepted frame the baseline is re-based to
/// `now - (elapsed % interval)` so irregular callback timing does not
/// accumulate drift.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    interval_ms: f64,
    last_fire_ms: f64,
    frames_rendered: u64,
    frames_skipped: u64,
}

impl FrameLimiter {
    pub fn new(target_fps: f64) -> Self {
        Self {
            interval_ms: 1000.0 / target_fps,
            last_fire_ms: 0.0,
            frames_rendered: 0,
            frames_skipped: 0,
        }
    }

    /// Record the baseline the first interval is measured from
    pub fn reset(&mut self, now_ms: f64) {
        self.last_fire_ms = now_ms;
        self.frames_rendered = 0;
        self.frames_skipped = 0;
    }

    /// Returns true when this callback should do the frame's work
    pub fn should_render(&mut self, now_ms: f64) -> bool {
        let elapsed = now_ms - self.last_fire_ms;
        if elapsed < self.interval_ms {
            self.frames_skipped += 1;
            return false;
        }

        self.last_fire_ms = now_ms - (elapsed % self.interval_ms);
        self.frames_rendered += 1;
        true
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_until_interval_elapses() {
        let mut limiter = FrameLimiter::new(60.0);
        limiter.reset(0.0);
        assert!(!limiter.should_render(8.0));
        assert!(!limiter.should_render(16.0));
        assert!(limiter.should_render(17.0));
        assert_eq!(limiter.frames_rendered(), 1);
        assert_eq!(limiter.frames_skipped(), 2);
    }

    #[test]
    fn test_rebase_keeps_phase() {
        let mut limiter = FrameLimiter::new(50.0); // 20 ms interval
        limiter.reset(0.0);
        assert!(limiter.should_render(25.0));
        // Baseline is 20, not 25, so the next frame is due at 40
        assert!(!limiter.should_render(39.0));
        assert!(limiter.should_render(40.0));
    }

    #[test]
    fn test_long_stall_fires_once() {
        let mut limiter = FrameLimiter::new(60.0);
        limiter.reset(0.0);
        assert!(limiter.should_render(1010.0));
        assert!(!limiter.should_render(1011.0));
        assert_eq!(limiter.frames_rendered(), 1);
    }

    #[test]
    fn test_slow_display_renders_every_callback() {
        let mut limiter = FrameLimiter::new(60.0);
        limiter.reset(0.0);
        let rendered = (1..=10)
            .filter(|i| limiter.should_render(*i as f64 * 33.0))
            .count();
        assert_eq!(rendered, 10);
    }
}
