//! Search limits and the shared stop flag.
//!
//! A [`TimeControl`] is cheap to clone and every clone observes the same
//! stop flag, so a controlling thread can halt a search (or a ponder
//! search) running elsewhere.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Nodes searched between two clock reads.
pub const CHECK_INTERVAL: u64 = 1024;

/// How far one search may go: a depth cap, an optional move time, and the
/// clock and stop flag that enforce them.
///
/// Whichever limit is reached first ends the search; the deepest completed
/// iteration supplies the move.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Deepest iteration in plies.
    pub depth: u8,
    pub move_time: Option<Duration>,
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Depth cap only; runs until done or stopped from outside.
    pub fn depth(depth: u8) -> Self {
        Self::with_clock(depth, None)
    }

    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self::with_clock(depth, Some(move_time))
    }

    fn with_clock(depth: u8, move_time: Option<Duration>) -> Self {
        Self {
            depth,
            move_time,
            time_control: TimeControl::new(move_time),
        }
    }

    /// Reset the clock. Searches call this as they begin.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Thread-safe stop flag plus an optional deadline.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    origin: Instant,
    /// Nanoseconds from `origin` to the last `start()`.
    started_ns: Arc<AtomicU64>,
    time_limit: Option<Duration>,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            origin: Instant::now(),
            started_ns: Arc::new(AtomicU64::new(0)),
            time_limit,
        }
    }

    /// Restart the clock and clear the stop flag.
    pub fn start(&self) {
        let now = self.origin.elapsed().as_nanos() as u64;
        self.started_ns.store(now, Ordering::SeqCst);
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Force stop the search immediately. Visible to every clone.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Fast atomic load, suitable for calling at every node.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Read the clock and raise the stop flag once the limit has passed.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        match self.time_limit {
            Some(limit) if self.elapsed() >= limit => {
                self.stop();
                true
            }
            _ => false,
        }
    }

    /// Called once per node: reads the clock every [`CHECK_INTERVAL`]
    /// nodes and reports whether the search must unwind.
    #[inline]
    pub fn poll(&self, nodes: u64) -> bool {
        if nodes % CHECK_INTERVAL == 0 {
            self.check_time()
        } else {
            self.is_stopped()
        }
    }

    pub fn elapsed(&self) -> Duration {
        let started = Duration::from_nanos(self.started_ns.load(Ordering::SeqCst));
        self.origin.elapsed().saturating_sub(started)
    }

    /// Remaining time, `None` without a limit.
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
