//! # Global runtime configuration.
//!
//! Provides [`Config`] centralized settings for one [`Supervisor`](crate::Supervisor).
//!
//! ## Sentinel values
//! - `timeout = 0s` → the double barrier waits forever
//! - `queue_capacity = 0`, `bus_capacity = 0` → clamped to 1
//! - `report_step` outside `1..=100` → clamped into that range

use std::time::Duration;

/// Global configuration for the sortvisor runtime.
///
/// ## Field semantics
/// - `queue_capacity`: capacity of every sort event queue, supervision queue and the
///   observer report lane (min 1)
/// - `report_step`: progress threshold step in percent (`1..=100`)
/// - `bus_capacity`: runtime event bus ring buffer size (min 1)
/// - `timeout`: limit on the final double-barrier wait (`0s` = wait forever)
/// - `grace`: how long cancelled sort tasks get to exit after a shutdown signal
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of each per-algorithm event queue.
    ///
    /// Producers suspend when their queue is full, so this bounds how far a sort
    /// task can run ahead of its observer.
    pub queue_capacity: usize,

    /// Progress is reported every `report_step` percent, starting at 0%.
    pub report_step: u32,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Carries lifecycle events only; observer reports use their own bounded lane.
    /// A listener that lags behind more than `bus_capacity` messages skips older items
    /// and forwards a `SubscriberOverflow` event with the skipped count.
    pub bus_capacity: usize,

    /// Barrier timeout.
    ///
    /// - `Duration::ZERO` = wait until both categories complete
    /// - `> 0` = fail with `RuntimeError::BarrierTimeout` once exceeded
    pub timeout: Duration,

    /// Maximum time to wait for sort tasks after a shutdown signal.
    ///
    /// When it elapses, the remaining tasks are aborted and reported as stuck.
    pub grace: Duration,
}

impl Config {
    /// Returns the event queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }

    /// Returns the progress step clamped to `1..=100`.
    #[inline]
    pub fn report_step_clamped(&self) -> u32 {
        self.report_step.clamp(1, 100)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the barrier timeout as an `Option`.
    ///
    /// - `None` → wait forever
    /// - `Some(d)` → give up after `d`
    #[inline]
    pub fn barrier_timeout(&self) -> Option<Duration> {
        if self.timeout == Duration::ZERO {
            None
        } else {
            Some(self.timeout)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `queue_capacity = 1000`
    /// - `report_step = 20` (0%, 20%, ..., 100%)
    /// - `bus_capacity = 1024`
    /// - `timeout = 0s` (no barrier timeout)
    /// - `grace = 5s`
    fn default() -> Self {
        Self {
            queue_capacity: 1000,
            report_step: 20,
            bus_capacity: 1024,
            timeout: Duration::from_secs(0),
            grace: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_means_no_barrier_timeout() {
        let mut cfg = Config::default();
        assert_eq!(cfg.barrier_timeout(), None);
        cfg.timeout = Duration::from_millis(250);
        assert_eq!(cfg.barrier_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_clamping() {
        let cfg = Config {
            queue_capacity: 0,
            report_step: 0,
            bus_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.queue_capacity_clamped(), 1);
        assert_eq!(cfg.report_step_clamped(), 1);
        assert_eq!(cfg.bus_capacity_clamped(), 1);

        let cfg = Config {
            report_step: 250,
            ..Config::default()
        };
        assert_eq!(cfg.report_step_clamped(), 100);
    }
}
