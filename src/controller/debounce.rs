//! Quiescence-window debouncing of the search box.

use std::time::{Duration, Instant};

/// Time the search input has to stay unchanged before it is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Holds the latest typed value until the input has been quiet for the window.
///
/// Time is passed in by the caller, so the debouncer never sleeps or spawns.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    window: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Records a keystroke; restarts the window.
    pub fn input(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some((value.into(), now));
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.window)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the pending value once the window has elapsed since the last
    /// keystroke.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline() {
            Some(due) if now >= due => self.pending.take().map(|(value, _)| value),
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
    fn burst_of_keystrokes_settles_once() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::default();
        let mut released = Vec::new();

        for (offset, text) in [(0, "m"), (120, "mu"), (300, "mug"), (650, "mugs")] {
            let now = start + Duration::from_millis(offset);
            if let Some(value) = debouncer.poll(now) {
                released.push(value);
            }
            debouncer.input(text, now);
        }
        // Nothing settles while typing continues within the window.
        assert!(released.is_empty());
        assert_eq!(debouncer.poll(start + Duration::from_millis(1049)), None);

        released.extend(debouncer.poll(start + Duration::from_millis(1050)));
        released.extend(debouncer.poll(start + Duration::from_millis(2000)));

        assert_eq!(released, vec!["mugs".to_string()]);
    }

    #[test]
    fn separate_windows_release_separately() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::default();

        debouncer.input("a", start);
        assert_eq!(
            debouncer.poll(start + SEARCH_DEBOUNCE),
            Some("a".to_string())
        );

        let later = start + Duration::from_secs(2);
        debouncer.input("ab", later);
        assert_eq!(debouncer.deadline(), Some(later + SEARCH_DEBOUNCE));
        assert_eq!(debouncer.poll(later + SEARCH_DEBOUNCE), Some("ab".to_string()));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancel_discards_pending_value() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::default();
        debouncer.input("x", start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }
}
