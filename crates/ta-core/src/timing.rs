//! Lightweight stage timing.
//!
//! Analysis runs are short batch jobs; timers measure where the wall time
//! goes (load, segmentation, export) and report it through `tracing`.

use std::time::Instant;

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Elapsed time in seconds without stopping the timer.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer, log the elapsed time at debug level and return it in seconds.
    pub fn stop(self) -> f64 {
        let elapsed = self.elapsed_s();
        tracing::debug!(stage = self.label, elapsed_s = elapsed, "stage finished");
        elapsed
    }
}

/// Wall time spent in each stage of one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StageTimings {
    pub load_s: f64,
    pub analyze_s: f64,
    pub export_s: f64,
}

impl StageTimings {
    pub fn total_s(&self) -> f64 {
        self.load_s + self.analyze_s + self.export_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_reports_non_negative_time() {
        let timer = Timer::start("test");
        assert_eq!(timer.label(), "test");
        assert!(timer.stop() >= 0.0);
    }

    #[test]
    fn total_sums_stages() {
        let timings = StageTimings {
            load_s: 0.5,
            analyze_s: 0.25,
            export_s: 0.25,
        };
        assert_eq!(timings.total_s(), 1.0);
    }
}
