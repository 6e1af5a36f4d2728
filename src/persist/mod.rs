use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::debounce::Debouncer;
use crate::errors::{BuilderError, Result};
use crate::model::{
    AnimationOption, BackgroundOption, BackgroundSelection, ColorTheme, ComponentOption, DesignStyle,
    FunctionalityOption, LayoutOption, ProjectInfo, Typography, VisualElement, WizardStep,
};
use crate::store::{Store, Subscription};

pub mod storage;

pub use storage::{DynStorage, FileStorage, MemoryStorage, SqliteStorage, Storage};

pub const STORAGE_KEY: &str = "lovabolt-project";
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

/// Contents of the durable slot. Every field is optional on read so older or
/// partial records still load. Single-choice fields distinguish a missing key
/// (`None`, leave the store alone) from an explicit `null` (`Some(None)`,
/// clear the selection).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    #[serde(default)]
    pub project_info: Option<ProjectInfo>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub selected_layout: Option<Option<LayoutOption>>,
    #[serde(default)]
    pub selected_special_layouts: Option<Vec<LayoutOption>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub selected_design_style: Option<Option<DesignStyle>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub selected_color_theme: Option<Option<ColorTheme>>,
    #[serde(default)]
    pub selected_typography: Option<Typography>,
    #[serde(default)]
    pub selected_functionality: Option<Vec<FunctionalityOption>>,
    #[serde(default)]
    pub selected_visuals: Option<Vec<VisualElement>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub selected_background: Option<Option<BackgroundOption>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub background_selection: Option<Option<BackgroundSelection>>,
    #[serde(default)]
    pub selected_components: Option<Vec<ComponentOption>>,
    #[serde(default)]
    pub selected_animations: Option<Vec<AnimationOption>>,
    #[serde(default)]
    pub current_step: Option<WizardStep>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl PersistedRecord {
    pub fn capture(store: &Store, saved_at: DateTime<Utc>) -> Self {
        let graph = store.graph();
        let s = &graph.selections;
        Self {
            project_info: Some(graph.project_info.clone()),
            selected_layout: Some(s.selected_layout.clone()),
            selected_special_layouts: Some(s.selected_special_layouts.clone()),
            selected_design_style: Some(s.selected_design_style.clone()),
            selected_color_theme: Some(s.selected_color_theme.clone()),
            selected_typography: Some(s.selected_typography.clone()),
            selected_functionality: Some(s.selected_functionality.clone()),
            selected_visuals: Some(s.selected_visuals.clone()),
            selected_background: Some(s.selected_background.clone()),
            background_selection: Some(s.background_selection.clone()),
            selected_components: Some(s.selected_components.clone()),
            selected_animations: Some(s.selected_animations.clone()),
            current_step: Some(store.current_step()),
            saved_at: Some(saved_at),
        }
    }

    /// Parse a slot's raw text. Anything that is not a JSON object matching
    /// the record shape is reported as corrupt.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|e| BuilderError::CorruptRecord(e.to_string()))?;
        if !value.is_object() {
            return Err(BuilderError::CorruptRecord(format!("expected a JSON object, found {}", kind_of(&value))));
        }
        serde_json::from_value(value).map_err(|e| BuilderError::CorruptRecord(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write every present field into the store; absent fields keep their
    /// current value and `null` clears a single-choice field.
    pub fn apply_to(self, store: &mut Store) {
        if let Some(v) = self.project_info {
            store.set_project_info(v);
        }
        if let Some(v) = self.selected_layout {
            store.set_layout(v);
        }
        if let Some(v) = self.selected_special_layouts {
            store.set_special_layouts(v);
        }
        if let Some(v) = self.selected_design_style {
            store.set_design_style(v);
        }
        if let Some(v) = self.selected_color_theme {
            store.set_color_theme(v);
        }
        if let Some(v) = self.selected_typography {
            store.set_typography(v);
        }
        if let Some(v) = self.selected_functionality {
            store.set_functionality(v);
        }
        if let Some(v) = self.selected_visuals {
            store.set_visuals(v);
        }
        if let Some(v) = self.selected_background {
            store.set_background(v);
        }
        if let Some(v) = self.background_selection {
            store.set_background_selection(v);
        }
        if let Some(v) = self.selected_components {
            store.set_components(v);
        }
        if let Some(v) = self.selected_animations {
            store.set_animations(v);
        }
        if let Some(v) = self.current_step {
            store.set_current_step(v);
        }
    }
}

fn nullable<'de, D, T>(de: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub bytes: usize,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored under the key.
    Empty,
    Restored { saved_at: Option<DateTime<Utc>> },
    /// The stored record was unreadable and has been deleted.
    Discarded { reason: String },
    /// The slot could not be read at all; defaults stay in place.
    Unavailable { reason: String },
}

/// Autosaving bridge between the store and a durable slot.
pub struct Persistence {
    storage: DynStorage,
    key: String,
    timer: Debouncer,
    events: Subscription,
}

impl Persistence {
    pub fn attach(store: &mut Store, storage: DynStorage, key: impl Into<String>, delay: Duration) -> Self {
        Self {
            storage,
            key: key.into(),
            timer: Debouncer::new(delay),
            events: store.subscribe(),
        }
    }

    pub fn detach(&mut self, store: &mut Store) {
        self.timer.cancel();
        store.unsubscribe(self.events.id());
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn autosave_pending(&self) -> bool {
        self.timer.is_pending()
    }

    fn observe(&mut self, now: Instant) {
        if !self.events.drain().is_empty() {
            self.timer.schedule(now);
        }
    }

    /// Saves when the autosave quiet period has elapsed.
    pub fn tick(&mut self, store: &Store, now: Instant) -> Option<SaveReport> {
        self.observe(now);
        if self.timer.fire_if_due(now) {
            return self.save_project(store);
        }
        None
    }

    /// Save right away if an autosave is waiting.
    pub fn flush(&mut self, store: &Store, now: Instant) -> Option<SaveReport> {
        self.observe(now);
        if self.timer.flush() {
            return self.save_project(store);
        }
        None
    }

    /// Forget queued notifications and any pending autosave.
    pub fn discard_pending(&mut self) {
        self.events.drain();
        self.timer.cancel();
    }

    pub fn save_project(&mut self, store: &Store) -> Option<SaveReport> {
        match self.try_save(store) {
            Ok(report) => {
                debug!(key = %self.key, bytes = report.bytes, "project saved");
                Some(report)
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "failed to save project");
                None
            }
        }
    }

    fn try_save(&mut self, store: &Store) -> Result<SaveReport> {
        let saved_at = Utc::now();
        let json = PersistedRecord::capture(store, saved_at).to_json()?;
        self.storage.set(&self.key, &json)?;
        Ok(SaveReport { bytes: json.len(), saved_at })
    }

    pub fn load_project(&mut self, store: &mut Store) -> LoadOutcome {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Empty,
            Err(e) => {
                error!(key = %self.key, error = %e, "failed to read saved project");
                return LoadOutcome::Unavailable { reason: e.to_string() };
            }
        };
        match PersistedRecord::parse(&raw) {
            Ok(record) => {
                let saved_at = record.saved_at;
                record.apply_to(store);
                info!(key = %self.key, "project loaded");
                LoadOutcome::Restored { saved_at }
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding corrupt saved project");
                if let Err(e) = self.storage.remove(&self.key) {
                    error!(key = %self.key, error = %e, "failed to clear corrupt project data");
                }
                LoadOutcome::Discarded { reason: e.to_string() }
            }
        }
    }

    pub fn load_record(&self, store: &mut Store, record: PersistedRecord) {
        record.apply_to(store);
    }

    pub fn clear_project(&mut self, store: &mut Store) {
        store.reset();
        if let Err(e) = self.storage.remove(&self.key) {
            error!(key = %self.key, error = %e, "failed to delete saved project");
        }
        info!(key = %self.key, "project cleared");
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("key", &self.key)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}
