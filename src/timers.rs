// timers.rs
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Returned by `Timers::start`, handed back to `Timers::stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimerTotal {
    pub calls: u32,
    pub elapsed: Duration,
}

#[derive(Default)]
struct TimerState {
    next_id: u64,
    running: HashMap<TimerId, (String, Instant)>,
    totals: BTreeMap<String, TimerTotal>,
}

/// Named timers accumulated over one unit of work (typically a request).
///
/// Purely observational: nothing reads these to make decisions.
#[derive(Default)]
pub struct Timers {
    state: Mutex<TimerState>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self, name: &str) -> TimerId {
        let mut state = self.state.lock();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        state.running.insert(id, (name.to_string(), Instant::now()));
        id
    }

    /// Stops a running timer and returns how long it ran.
    /// Stopping an unknown or already stopped timer is a no-op.
    pub fn stop(&self, id: TimerId) -> Option<Duration> {
        let mut state = self.state.lock();
        let Some((name, started)) = state.running.remove(&id) else {
            warn!(?id, "stop called on a timer that isn't running");
            return None;
        };

        let elapsed = started.elapsed();
        let total = state.totals.entry(name.clone()).or_default();
        total.calls += 1;
        total.elapsed += elapsed;

        debug!(timer = %name, elapsed_us = elapsed.as_micros() as u64, "timer stopped");
        Some(elapsed)
    }

    /// Times `f` under `name`.
    pub fn time<T>(&self, name: &str, f: impl FnOnce() -> T) -> T {
        let id = self.start(name);
        let out = f();
        self.stop(id);
        out
    }

    /// Totals per timer name, sorted by name.
    pub fn report(&self) -> Vec<(String, TimerTotal)> {
        self.state
            .lock()
            .totals
            .iter()
            .map(|(name, total)| (name.clone(), *total))
            .collect()
    }
}
