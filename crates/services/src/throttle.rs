//! Admission control for mutating requests.
//!
//! Whenever a client accesses a shared resource and a limit must be placed
//! on how often, a throttle is used. Each (identity, policy) pair owns a
//! counter of outstanding grants; a grant occupies one slot until its window
//! ends, and slots free independently, so up to `max` grants may be
//! outstanding at once. All state transitions happen under one lock.

use chrono::{DateTime, Utc};
use domains::traits::Clock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Counter {
    max: u32,
    /// Window-end timestamps of outstanding grants.
    grants: Vec<DateTime<Utc>>,
}

type CounterMap = HashMap<String, HashMap<String, Counter>>;

/// Fixed-quota admission counters keyed by identity and policy name.
///
/// A counter is created on first use of a policy for an identity and dropped
/// once every grant has expired; a later use recreates it with the `max`
/// supplied at that point.
pub struct RateLimiter {
    clock: Arc<dyn Clock>,
    counters: Mutex<CounterMap>,
}

impl RateLimiter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// True while the identity may still act under `policy`: either no
    /// counter exists or the quota is not exhausted.
    pub fn check(&self, identity: &str, policy: &str) -> bool {
        let now = self.clock.now();
        let mut counters = self.lock();
        release_expired(&mut counters, now);

        match counters.get(identity).and_then(|m| m.get(policy)) {
            Some(counter) => (counter.grants.len() as u32) < counter.max,
            None => true,
        }
    }

    /// Registers one unit of use expiring at `window_end`. Returns false and
    /// changes nothing when the quota is already exhausted.
    pub fn admit(
        &self,
        identity: &str,
        policy: &str,
        max: u32,
        window_end: DateTime<Utc>,
    ) -> bool {
        let now = self.clock.now();
        let mut counters = self.lock();
        release_expired(&mut counters, now);

        let counter = counters
            .entry(identity.to_string())
            .or_default()
            .entry(policy.to_string())
            .or_insert_with(|| Counter {
                max,
                grants: Vec::new(),
            });

        if counter.grants.len() as u32 >= counter.max {
            return false;
        }
        counter.grants.push(window_end);
        true
    }

    /// Releases every grant whose window has ended. Each grant is removed
    /// exactly once, so a redundant sweep can never drive a count negative
    /// or free an extra slot.
    pub fn sweep(&self) {
        let now = self.clock.now();
        let mut counters = self.lock();
        release_expired(&mut counters, now);
    }

    /// True while any counter is held for the identity. Does not release
    /// expired grants, so reclamation by the sweeper is observable.
    pub fn is_tracked(&self, identity: &str) -> bool {
        self.lock().contains_key(identity)
    }

    /// Spawns the background timer that frees expired grants even when an
    /// identity never sends another request.
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                limiter.sweep();
            }
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CounterMap> {
        // A poisoned lock still holds consistent counter state.
        self.counters.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn release_expired(counters: &mut CounterMap, now: DateTime<Utc>) {
    counters.retain(|_, policies| {
        policies.retain(|_, counter| {
            counter.grants.retain(|window_end| *window_end > now);
            !counter.grants.is_empty()
        });
        !policies.is_empty()
    });
}
