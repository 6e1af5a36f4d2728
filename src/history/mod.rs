use std::time::{Duration, Instant};

use tracing::debug;

use crate::debounce::Debouncer;
use crate::model::Selections;
use crate::store::{Store, Subscription};

pub const DEFAULT_CAPTURE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Editing,
    /// A snapshot is being written back; store notifications are not captured.
    Restoring,
}

/// Linear undo/redo over the trackable selections.
///
/// `snapshots[0]` is the state present when the history was attached. A new
/// capture after an undo truncates everything past the cursor.
#[derive(Debug)]
pub struct History {
    snapshots: Vec<Selections>,
    cursor: usize,
    mode: HistoryMode,
    timer: Debouncer,
    events: Subscription,
}

impl History {
    pub fn attach(store: &mut Store, delay: Duration) -> Self {
        Self {
            snapshots: vec![store.selections().clone()],
            cursor: 0,
            mode: HistoryMode::Editing,
            timer: Debouncer::new(delay),
            events: store.subscribe(),
        }
    }

    pub fn detach(&mut self, store: &mut Store) {
        self.timer.cancel();
        store.unsubscribe(self.events.id());
    }

    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capture_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Pull queued store notifications and restart the capture timer for
    /// trackable ones.
    fn observe(&mut self, now: Instant) {
        for event in self.events.drain() {
            if self.mode == HistoryMode::Editing && event.trackable() {
                self.timer.schedule(now);
            }
        }
    }

    /// Returns true when a new snapshot was recorded.
    pub fn tick(&mut self, store: &Store, now: Instant) -> bool {
        self.observe(now);
        if self.timer.fire_if_due(now) {
            return self.capture(store);
        }
        false
    }

    fn capture(&mut self, store: &Store) -> bool {
        let current = store.selections();
        if self.snapshots.get(self.cursor) == Some(current) {
            return false;
        }
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(current.clone());
        self.cursor = self.snapshots.len() - 1;
        debug!(cursor = self.cursor, "history snapshot captured");
        true
    }

    /// Record an edit still waiting on the timer so that undo reverts it.
    fn flush_pending(&mut self, store: &Store, now: Instant) {
        self.observe(now);
        if self.timer.flush() {
            self.capture(store);
        }
    }

    pub fn undo(&mut self, store: &mut Store, now: Instant) -> bool {
        self.flush_pending(store, now);
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        self.restore(store);
        debug!(cursor = self.cursor, "undo");
        true
    }

    pub fn redo(&mut self, store: &mut Store, now: Instant) -> bool {
        self.flush_pending(store, now);
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        self.restore(store);
        debug!(cursor = self.cursor, "redo");
        true
    }

    fn restore(&mut self, store: &mut Store) {
        self.mode = HistoryMode::Restoring;
        store.restore_selections(self.snapshots[self.cursor].clone());
        // Notifications caused by the restore itself.
        self.observe_discarding();
        self.mode = HistoryMode::Editing;
    }

    fn observe_discarding(&mut self) {
        let restored = self.events.drain().len();
        debug!(restored, "skipped restore notifications");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::{Clock, ManualClock};
    use crate::model::LayoutOption;

    fn layout(id: &str) -> Option<LayoutOption> {
        Some(LayoutOption {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            preview_url: None,
            category: None,
        })
    }

    fn settle(history: &mut History, store: &Store, clock: &ManualClock) -> bool {
        clock.advance_ms(500);
        history.tick(store, clock.now())
    }

    #[test]
    fn boundary_calls_are_noops() {
        let clock = ManualClock::new();
        let mut store = Store::new();
        let mut history = History::attach(&mut store, DEFAULT_CAPTURE_DELAY);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(!history.undo(&mut store, clock.now()));
        assert!(!history.redo(&mut store, clock.now()));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn burst_of_edits_coalesces_into_one_snapshot() {
        let clock = ManualClock::new();
        let mut store = Store::new();
        let mut history = History::attach(&mut store, DEFAULT_CAPTURE_DELAY);

        for (i, id) in ["a", "b", "c"].into_iter().enumerate() {
            if i > 0 {
                clock.advance_ms(150);
            }
            store.set_layout(layout(id));
            assert!(!history.tick(&store, clock.now()));
        }
        assert!(settle(&mut history, &store, &clock));
        assert_eq!(history.len(), 2);
        assert!(history.undo(&mut store, clock.now()));
        assert!(store.layout().is_none());
        assert!(history.redo(&mut store, clock.now()));
        assert_eq!(store.layout().map(|l| l.id.as_str()), Some("c"));
    }

    #[test]
    fn project_metadata_is_not_tracked() {
        let clock = ManualClock::new();
        let mut store = Store::new();
        let mut history = History::attach(&mut store, DEFAULT_CAPTURE_DELAY);
        store.update_project_info(|p| p.name = "Acme".into());
        history.tick(&store, clock.now());
        assert!(!history.capture_pending());
        assert!(!settle(&mut history, &store, &clock));
        assert!(!history.can_undo());
    }

    #[test]
    fn restore_is_not_recaptured() {
        let clock = ManualClock::new();
        let mut store = Store::new();
        let mut history = History::attach(&mut store, DEFAULT_CAPTURE_DELAY);

        store.set_layout(layout("a"));
        history.tick(&store, clock.now());
        settle(&mut history, &store, &clock);
        store.set_layout(layout("b"));
        history.tick(&store, clock.now());
        settle(&mut history, &store, &clock);

        assert!(history.undo(&mut store, clock.now()));
        assert_eq!(history.mode(), HistoryMode::Editing);
        assert!(!history.capture_pending());
        assert!(!settle(&mut history, &store, &clock));
        assert!(history.can_redo());
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn edit_after_undo_discards_redo_branch() {
        let clock = ManualClock::new();
        let mut store = Store::new();
        let mut history = History::attach(&mut store, DEFAULT_CAPTURE_DELAY);

        for id in ["a", "b", "c"] {
            store.set_layout(layout(id));
            history.tick(&store, clock.now());
            settle(&mut history, &store, &clock);
        }
        assert_eq!(history.len(), 4);
        history.undo(&mut store, clock.now());
        history.undo(&mut store, clock.now());
        assert_eq!(store.layout().map(|l| l.id.as_str()), Some("a"));

        store.set_layout(layout("z"));
        history.tick(&store, clock.now());
        settle(&mut history, &store, &clock);

        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn undo_reverts_an_edit_still_inside_the_quiet_period() {
        let clock = ManualClock::new();
        let mut store = Store::new();
        let mut history = History::attach(&mut store, DEFAULT_CAPTURE_DELAY);

        store.set_layout(layout("a"));
        clock.advance_ms(100);
        assert!(history.undo(&mut store, clock.now()));
        assert!(store.layout().is_none());
        assert!(history.can_redo());
    }

    #[test]
    fn detach_stops_observing() {
        let clock = ManualClock::new();
        let mut store = Store::new();
        let mut history = History::attach(&mut store, DEFAULT_CAPTURE_DELAY);
        history.detach(&mut store);
        store.set_layout(layout("a"));
        assert!(!settle(&mut history, &store, &clock));
        assert_eq!(store.subscriber_count(), 0);
    }
}
