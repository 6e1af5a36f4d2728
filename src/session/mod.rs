use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::debounce::{SharedClock, SystemClock};
use crate::errors::Result;
use crate::history::History;
use crate::persist::{DynStorage, LoadOutcome, PersistedRecord, Persistence, SaveReport};
use crate::prompt::{self, PromptVariant};
use crate::store::Store;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A history snapshot was recorded.
    pub captured: bool,
    pub saved: Option<SaveReport>,
}

/// Owns the store and the two observers wired to it.
///
/// Edits go through [`Session::edit`] (or are followed by [`Session::tick`])
/// so both debounce timers see them at the current clock time.
#[derive(Debug)]
pub struct Session {
    store: Store,
    history: History,
    persistence: Persistence,
    clock: SharedClock,
    startup: LoadOutcome,
    closed: bool,
}

impl Session {
    /// Loads the slot, then starts history so the loaded state is its base.
    pub fn open(
        storage: DynStorage,
        key: impl Into<String>,
        history_delay: Duration,
        autosave_delay: Duration,
        clock: SharedClock,
    ) -> Self {
        let mut store = Store::new();
        let mut persistence = Persistence::attach(&mut store, storage, key, autosave_delay);
        let startup = persistence.load_project(&mut store);
        // Applying the saved record is not a change worth saving again.
        persistence.discard_pending();
        let history = History::attach(&mut store, history_delay);
        info!(key = persistence.key(), outcome = ?startup, "session opened");
        Self { store, history, persistence, clock, startup, closed: false }
    }

    pub fn from_config(cfg: &Config, clock: SharedClock) -> Result<Self> {
        cfg.check()?;
        let storage = cfg.open_storage()?;
        let mut session = Self::open(storage, cfg.key.clone(), cfg.history_delay(), cfg.autosave_delay(), clock);
        session.store.set_prompt_variant(cfg.prompt_variant);
        Ok(session)
    }

    /// In-memory session on the wall clock.
    pub fn ephemeral() -> Self {
        Self::open(
            Box::new(crate::persist::MemoryStorage::new()),
            crate::persist::STORAGE_KEY,
            crate::history::DEFAULT_CAPTURE_DELAY,
            crate::persist::DEFAULT_AUTOSAVE_DELAY,
            Arc::new(SystemClock),
        )
    }

    pub fn startup_outcome(&self) -> &LoadOutcome {
        &self.startup
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Raw mutable access. Call [`Session::tick`] afterwards.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// Apply `f` to the store and let the observers see it now.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Store) -> R) -> R {
        let out = f(&mut self.store);
        self.tick();
        out
    }

    /// Fire whichever debounce timers are due.
    pub fn tick(&mut self) -> TickReport {
        if self.closed {
            return TickReport::default();
        }
        let now = self.clock.now();
        TickReport {
            captured: self.history.tick(&self.store, now),
            saved: self.persistence.tick(&self.store, now),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.closed && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.closed && self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        if self.closed {
            return false;
        }
        let moved = self.history.undo(&mut self.store, self.clock.now());
        self.tick();
        moved
    }

    pub fn redo(&mut self) -> bool {
        if self.closed {
            return false;
        }
        let moved = self.history.redo(&mut self.store, self.clock.now());
        self.tick();
        moved
    }

    pub fn save_project(&mut self) -> Option<SaveReport> {
        self.tick();
        let report = self.persistence.save_project(&self.store);
        // The explicit save covers whatever the autosave was waiting on.
        self.persistence.discard_pending();
        report
    }

    pub fn load_record(&mut self, record: PersistedRecord) {
        self.persistence.load_record(&mut self.store, record);
        self.tick();
    }

    /// Reset to defaults and delete the slot. The slot stays empty until the
    /// next edit; the reset itself can still be undone.
    pub fn clear_project(&mut self) {
        self.tick();
        self.persistence.clear_project(&mut self.store);
        self.persistence.discard_pending();
        self.tick();
    }

    pub fn progress(&self) -> u8 {
        self.store.progress()
    }

    pub fn generate_prompt(&self) -> String {
        self.store.generate_prompt()
    }

    pub fn generate_basic_prompt(&self) -> String {
        self.store.generate_basic_prompt()
    }

    /// Synthesize `variant` (or the remembered one) and keep it as the
    /// current prompt text.
    pub fn render_prompt(&mut self, variant: Option<PromptVariant>) -> &str {
        let variant = variant.unwrap_or(self.store.prompt_variant());
        let text = prompt::synthesize(self.store.graph(), variant);
        self.store.set_prompt_variant(variant);
        self.store.set_prompt_text(text);
        self.store.prompt_text()
    }

    /// Write a waiting autosave immediately.
    pub fn flush(&mut self) -> TickReport {
        if self.closed {
            return TickReport::default();
        }
        let now = self.clock.now();
        let captured = self.history.tick(&self.store, now);
        TickReport { captured, saved: self.persistence.flush(&self.store, now) }
    }

    /// Unsubscribe both observers and drop their pending timers.
    pub fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.history.detach(&mut self.store);
        self.persistence.detach(&mut self.store);
        self.closed = true;
        debug!("session shut down");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::ManualClock;
    use crate::model::{LayoutOption, ProjectType};
    use crate::persist::{MemoryStorage, Storage, STORAGE_KEY};

    fn layout(id: &str) -> LayoutOption {
        LayoutOption { id: id.into(), title: id.into(), description: String::new(), preview_url: None, category: None }
    }

    fn session_with(storage: MemoryStorage) -> (Session, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let session = Session::open(
            Box::new(storage),
            STORAGE_KEY,
            Duration::from_millis(500),
            Duration::from_millis(1000),
            clock.clone(),
        );
        (session, clock)
    }

    #[test]
    fn load_record_round_trips_through_capture() {
        let (mut session, _clock) = session_with(MemoryStorage::new());
        let before = PersistedRecord::capture(session.store(), chrono::Utc::now());
        session.edit(|s| {
            s.set_layout(Some(layout("grid")));
            s.update_project_info(|p| p.name = "Acme".into());
        });
        session.load_record(before.clone());
        let after = PersistedRecord::capture(session.store(), before.saved_at.unwrap());
        assert_eq!(after, before);
        assert!(session.store().layout().is_none());
    }

    #[test]
    fn autosave_fires_after_quiet_period() {
        let (mut session, clock) = session_with(MemoryStorage::new());
        session.edit(|s| s.update_project_info(|p| p.name = "Acme".into()));
        clock.advance_ms(999);
        assert!(session.tick().saved.is_none());
        clock.advance_ms(1);
        let report = session.tick();
        assert!(report.saved.is_some());
        assert!(!report.captured, "project info is not undo-tracked");
        assert!(session.persistence().storage().get(STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn startup_load_is_history_base_and_not_resaved() {
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, r#"{"selectedLayout":{"id":"grid","title":"Grid","description":""}}"#).unwrap();
        let (mut session, clock) = session_with(storage);
        assert!(matches!(session.startup_outcome(), LoadOutcome::Restored { .. }));
        assert_eq!(session.store().layout().map(|l| l.id.as_str()), Some("grid"));
        assert!(!session.can_undo());
        clock.advance_ms(5000);
        let report = session.tick();
        assert!(!report.captured);
        assert!(report.saved.is_none());
    }

    #[test]
    fn clear_leaves_slot_empty_but_is_undoable() {
        let (mut session, clock) = session_with(MemoryStorage::new());
        session.edit(|s| s.set_layout(Some(layout("grid"))));
        clock.advance_ms(1000);
        session.tick();
        assert!(session.persistence().storage().get(STORAGE_KEY).unwrap().is_some());

        session.clear_project();
        clock.advance_ms(2000);
        session.tick();
        assert!(session.persistence().storage().get(STORAGE_KEY).unwrap().is_none());
        assert!(session.store().layout().is_none());

        assert!(session.undo());
        assert_eq!(session.store().layout().map(|l| l.id.as_str()), Some("grid"));
    }

    #[test]
    fn render_prompt_remembers_variant() {
        let (mut session, _clock) = session_with(MemoryStorage::new());
        assert_eq!(session.render_prompt(Some(PromptVariant::Basic)), prompt::INCOMPLETE_PROMPT);
        assert_eq!(session.store().prompt_variant(), PromptVariant::Basic);
        session.edit(|s| s.update_project_info(|p| p.kind = ProjectType::Dashboard));
        assert_eq!(session.render_prompt(None), prompt::INCOMPLETE_PROMPT);
    }

    #[test]
    fn shutdown_stops_observers() {
        let (mut session, clock) = session_with(MemoryStorage::new());
        assert_eq!(session.store().subscriber_count(), 2);
        session.edit(|s| s.set_layout(Some(layout("grid"))));
        session.shutdown();
        assert_eq!(session.store().subscriber_count(), 0);
        clock.advance_ms(5000);
        assert_eq!(session.tick(), TickReport::default());
        assert!(!session.undo());
        assert!(session.persistence().storage().get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn flush_writes_pending_autosave() {
        let (mut session, _clock) = session_with(MemoryStorage::new());
        session.edit(|s| s.set_layout(Some(layout("grid"))));
        let report = session.flush();
        assert!(report.saved.is_some());
        assert!(!session.persistence().autosave_pending());
    }
}
