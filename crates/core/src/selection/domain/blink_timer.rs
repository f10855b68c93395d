use std::time::{Duration, Instant};

pub const FULL_OPACITY: f32 = 1.0;
pub const DIMMED_OPACITY: f32 = 0.3;

/// Explicit ticker behind the blinking selected key box.
///
/// Holds no thread or interval of its own; the renderer asks for the
/// opacity at the time it draws.
#[derive(Clone, Debug)]
pub struct BlinkTimer {
    period: Duration,
    started_at: Option<Instant>,
}

impl BlinkTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            started_at: None,
        }
    }

    /// Starts blinking from full opacity, restarting if already running.
    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Opacity at `now`: full for the first period, dimmed for the next,
    /// and so on. Always full when stopped.
    pub fn opacity(&self, now: Instant) -> f32 {
        let Some(started) = self.started_at else {
            return FULL_OPACITY;
        };
        if self.period.is_zero() {
            return FULL_OPACITY;
        }
        let elapsed = now.saturating_duration_since(started);
        let phase = elapsed.as_nanos() / self.period.as_nanos();
        if phase % 2 == 0 {
            FULL_OPACITY
        } else {
            DIMMED_OPACITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PERIOD: Duration = Duration::from_millis(500);

    #[test]
    fn test_stopped_timer_is_opaque() {
        let timer = BlinkTimer::new(PERIOD);
        assert!(!timer.is_running());
        assert_eq!(timer.opacity(Instant::now()), FULL_OPACITY);
    }

    #[rstest]
    #[case(0, FULL_OPACITY)]
    #[case(499, FULL_OPACITY)]
    #[case(500, DIMMED_OPACITY)]
    #[case(999, DIMMED_OPACITY)]
    #[case(1000, FULL_OPACITY)]
    #[case(1750, DIMMED_OPACITY)]
    fn test_alternates_each_period(#[case] elapsed_ms: u64, #[case] expected: f32) {
        let mut timer = BlinkTimer::new(PERIOD);
        let start = Instant::now();
        timer.start(start);
        assert_eq!(
            timer.opacity(start + Duration::from_millis(elapsed_ms)),
            expected
        );
    }

    #[test]
    fn test_restart_resets_phase() {
        let mut timer = BlinkTimer::new(PERIOD);
        let start = Instant::now();
        timer.start(start);
        let later = start + Duration::from_millis(600);
        assert_eq!(timer.opacity(later), DIMMED_OPACITY);
        timer.start(later);
        assert_eq!(timer.opacity(later), FULL_OPACITY);
    }

    #[test]
    fn test_stop_returns_to_full_opacity() {
        let mut timer = BlinkTimer::new(PERIOD);
        let start = Instant::now();
        timer.start(start);
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.opacity(start + Duration::from_millis(600)), FULL_OPACITY);
    }

    #[test]
    fn test_time_before_start_is_opaque() {
        let mut timer = BlinkTimer::new(PERIOD);
        let start = Instant::now() + Duration::from_secs(1);
        timer.start(start);
        assert_eq!(timer.opacity(Instant::now()), FULL_OPACITY);
    }
}
