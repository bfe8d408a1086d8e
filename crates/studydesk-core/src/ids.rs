//! Task id sources.

use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out task ids. `above` is the largest id already stored, if any;
/// the returned id is always greater than it.
pub trait IdSource: Send + Sync {
    fn next_id(&self, above: Option<i64>) -> i64;
}

/// Epoch-millisecond ids, bumped forward so two tasks created in the same
/// millisecond still get distinct, increasing ids.
#[derive(Debug, Default)]
pub struct MonotonicMillis {
    last: AtomicI64,
}

impl MonotonicMillis {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for MonotonicMillis {
    fn next_id(&self, above: Option<i64>) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let floor = above.map_or(i64::MIN, |a| a.saturating_add(1));
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last.saturating_add(1)).max(floor);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(seen) => last = seen,
            }
        }
    }
}

/// Plain counter, for tests and deterministic fixtures.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicI64,
}

impl SequentialIds {
    pub fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self, above: Option<i64>) -> i64 {
        let id = self.next.fetch_add(1, Ordering::SeqCst);
        match above {
            Some(a) if id <= a => {
                self.next.store(a.saturating_add(2), Ordering::SeqCst);
                a.saturating_add(1)
            }
            _ => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_strictly_increasing() {
        let ids = MonotonicMillis::new();
        let mut prev = ids.next_id(None);
        for _ in 0..1000 {
            let id = ids.next_id(None);
            assert!(id > prev, "{id} should be greater than {prev}");
            prev = id;
        }
    }

    #[test]
    fn test_monotonic_looks_like_epoch_millis() {
        let before = chrono::Utc::now().timestamp_millis();
        let id = MonotonicMillis::new().next_id(None);
        assert!(id >= before);
        assert!(id - before < 60_000);
    }

    #[test]
    fn test_monotonic_respects_stored_ids() {
        let far_future = chrono::Utc::now().timestamp_millis() + 1_000_000;
        let id = MonotonicMillis::new().next_id(Some(far_future));
        assert_eq!(id, far_future + 1);
    }

    #[test]
    fn test_monotonic_unique_across_threads() {
        let ids = std::sync::Arc::new(MonotonicMillis::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..250).map(|_| ids.next_id(None)).collect::<Vec<_>>())
            })
            .collect();
        let mut all: Vec<i64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 1000);
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::starting_at(1);
        assert_eq!(ids.next_id(None), 1);
        assert_eq!(ids.next_id(None), 2);
        assert_eq!(ids.next_id(Some(10)), 11);
        assert_eq!(ids.next_id(None), 12);
    }
}
