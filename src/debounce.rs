// debounce.rs - Trailing-edge event coalescing
//
// The pending deadline stands in for a timer handle: each notify replaces
// it, poll fires once the input has been quiet long enough. Time is passed
// in by the caller in milliseconds.

use crate::config::DemoConfig;

#[derive(Debug, Clone)]
pub struct Debouncer<E> {
    quiet_ms: f64,
    pending: Option<(E, f64)>,
}

impl<E> Debouncer<E> {
    /// `quiet_ms` is required; there is no implicit default period.
    pub fn new(quiet_ms: f64) -> Self {
        Self { quiet_ms: quiet_ms.max(0.0), pending: None }
    }

    /// Resize debouncer using `resize_debounce_ms` from the config.
    pub fn from_config(config: &DemoConfig) -> Self {
        Self::new(config.resize_debounce_ms)
    }

    pub fn quiet_ms(&self) -> f64 {
        self.quiet_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record an event, dropping any earlier one still waiting.
    pub fn notify(&mut self, event: E, now_ms: f64) {
        self.pending = Some((event, now_ms + self.quiet_ms));
    }

    /// Take the latest event if its quiet period has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> Option<E> {
        match self.pending {
            Some((_, deadline)) if now_ms >= deadline => self.pending.take().map(|(e, _)| e),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_collapses_to_last_event() {
        let mut d = Debouncer::new(1000.0);
        d.notify((800, 600), 0.0);
        d.notify((900, 600), 200.0);
        d.notify((1024, 768), 400.0);
        assert_eq!(d.poll(1399.0), None);
        assert_eq!(d.poll(1400.0), Some((1024, 768)));
        assert_eq!(d.poll(5000.0), None);
    }

    #[test]
    fn each_notify_restarts_the_quiet_period() {
        let mut d = Debouncer::new(100.0);
        d.notify(1, 0.0);
        d.notify(2, 90.0);
        assert_eq!(d.poll(150.0), None);
        assert_eq!(d.poll(190.0), Some(2));
    }

    #[test]
    fn quiet_period_comes_from_config() {
        let d: Debouncer<()> = Debouncer::from_config(&DemoConfig::default());
        assert_eq!(d.quiet_ms(), 1000.0);

        let config = DemoConfig::from_ron("(resize_debounce_ms: 250.0)").unwrap();
        let mut d = Debouncer::from_config(&config);
        d.notify((640, 480), 0.0);
        assert_eq!(d.poll(249.0), None);
        assert_eq!(d.poll(250.0), Some((640, 480)));
    }

    #[test]
    fn cancel_drops_pending() {
        let mut d = Debouncer::new(10.0);
        d.notify("resize", 0.0);
        assert!(d.is_pending());
        d.cancel();
        assert_eq!(d.poll(100.0), None);
    }
}
