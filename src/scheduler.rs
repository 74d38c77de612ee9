//! Timer table driven by an externally supplied clock.
//!
//! At most one timer exists per key. Arming a key that is already armed
//! replaces it. Due timers pop in due-time order, ties in arming order.

use fnv::FnvHashMap;
use std::hash::Hash;
use std::time::Duration;

// Guards against a zero period spinning `pop_due` forever.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, Debug)]
struct Timer {
    due: Duration,
    period: Option<Duration>,
    seq: u64,
}

#[derive(Clone, Debug)]
pub struct TimerTable<K> {
    timers: FnvHashMap<K, Timer>,
    next_seq: u64,
}

impl<K> Default for TimerTable<K> {
    fn default() -> Self {
        Self {
            timers: FnvHashMap::default(),
            next_seq: 0,
        }
    }
}

impl<K: Clone + Eq + Hash> TimerTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm_interval(&mut self, key: K, now: Duration, period: Duration) {
        let period = period.max(MIN_PERIOD);
        self.insert(key, now + period, Some(period));
    }

    pub fn arm_timeout(&mut self, key: K, now: Duration, delay: Duration) {
        self.insert(key, now + delay, None);
    }

    #[inline]
    pub fn is_armed(&self, key: &K) -> bool {
        self.timers.contains_key(key)
    }

    /// Returns whether the key was armed. Safe to call on unarmed keys.
    pub fn clear(&mut self, key: &K) -> bool {
        self.timers.remove(key).is_some()
    }

    pub fn clear_all(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.timers.values().map(|t| t.due).min()
    }

    /// Pop the earliest timer due at or before `now`. Intervals are re-armed
    /// one period later, timeouts are removed.
    pub fn pop_due(&mut self, now: Duration) -> Option<(K, Duration)> {
        let (key, due) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(k, t)| (k.clone(), t.due))?;
        let seq = self.bump_seq();
        if let Some(timer) = self.timers.get_mut(&key) {
            match timer.period {
                Some(period) => {
                    timer.due += period;
                    timer.seq = seq;
                }
                None => {
                    self.timers.remove(&key);
                }
            }
        }
        Some((key, due))
    }

    fn insert(&mut self, key: K, due: Duration, period: Option<Duration>) {
        let seq = self.bump_seq();
        self.timers.insert(key, Timer { due, period, seq });
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
