/// Polled debounce timer: a burst of triggers collapses into one firing
/// `delay_ms` after the last trigger.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: f64,
    deadline_ms: Option<f64>,
}

impl Debouncer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline_ms: None,
        }
    }

    /// Restart the quiet period
    pub fn trigger(&mut self, now_ms: f64) {
        self.deadline_ms = Some(now_ms + self.delay_ms);
    }

    /// Returns true exactly once, when the quiet period has elapsed
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending firing, if any
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }
}
