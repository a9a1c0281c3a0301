/// Leading-edge throttle: accepts an event only if `min_interval_ms` has
/// passed since the last accepted one. Rejected events are dropped.
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval_ms: f64,
    last_accepted_ms: Option<f64>,
}

impl Throttle {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms,
            last_accepted_ms: None,
        }
    }

    pub fn try_accept(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_accepted_ms {
            if now_ms - last < self.min_interval_ms {
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_always_accepted() {
        let mut throttle = Throttle::new(16.0);
        assert!(throttle.try_accept(0.0));
    }

    #[test]
    fn test_events_inside_window_dropped() {
        let mut throttle = Throttle::new(16.0);
        assert!(throttle.try_accept(100.0));
        assert!(!throttle.try_accept(105.0));
        assert!(!throttle.try_accept(115.9));
        assert!(throttle.try_accept(116.0));
    }

    #[test]
    fn test_dropped_events_do_not_extend_window() {
        let mut throttle = Throttle::new(16.0);
        assert!(throttle.try_accept(0.0));
        assert!(!throttle.try_accept(10.0));
        assert!(throttle.try_accept(16.0));
    }
}
