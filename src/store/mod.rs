use std::sync::mpsc::{channel, Receiver, Sender};

use crate::model::{
    AnimationOption, BackgroundOption, BackgroundSelection, ColorTheme, ComponentOption, DesignStyle,
    FunctionalityOption, Identified, LayoutOption, ProjectInfo, SelectionGraph, Selections, Typography,
    VisualElement, WizardStep,
};
use crate::prompt::{self, PromptVariant};

/// Number of fields counted by [`Store::progress`].
pub const PROGRESS_FIELDS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ProjectInfo,
    Layout,
    SpecialLayouts,
    DesignStyle,
    ColorTheme,
    Typography,
    Functionality,
    Visuals,
    Background,
    BackgroundSelection,
    Components,
    Animations,
    CurrentStep,
}

impl Field {
    /// Whether the field participates in undo/redo.
    pub const fn is_trackable(self) -> bool {
        !matches!(self, Field::ProjectInfo | Field::CurrentStep)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreEvent {
    pub field: Field,
}

impl StoreEvent {
    pub fn trackable(&self) -> bool {
        self.field.is_trackable()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Receiving end of a store subscription. Dropping it is enough to stop
/// delivery; [`Store::unsubscribe`] also releases the sender side.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    events: Receiver<StoreEvent>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Take every notification queued since the last drain.
    pub fn drain(&self) -> Vec<StoreEvent> {
        self.events.try_iter().collect()
    }
}

/// Add `item` if no entry shares its id, otherwise remove that entry.
pub fn toggle<T: Identified>(mut list: Vec<T>, item: T) -> Vec<T> {
    match list.iter().position(|x| x.id() == item.id()) {
        Some(idx) => {
            list.remove(idx);
        }
        None => list.push(item),
    }
    list
}

/// Drop later entries whose id was already seen, keeping insertion order.
pub fn dedup_by_id<T: Identified>(list: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(list.len());
    for item in list {
        if !out.iter().any(|x| x.id() == item.id()) {
            out.push(item);
        }
    }
    out
}

/// Owner of the live selection graph. Every mutation goes through a setter,
/// and every setter that actually changes a value notifies subscribers.
#[derive(Debug, Default)]
pub struct Store {
    graph: SelectionGraph,
    current_step: WizardStep,
    prompt_text: String,
    prompt_variant: PromptVariant,
    subscribers: Vec<(SubscriberId, Sender<StoreEvent>)>,
    next_subscriber: u64,
}

macro_rules! single_field {
    ($get:ident, $set:ident, $path:ident, $ty:ty, $field:expr) => {
        pub fn $get(&self) -> Option<&$ty> {
            self.graph.selections.$path.as_ref()
        }

        pub fn $set(&mut self, value: Option<$ty>) {
            if self.graph.selections.$path != value {
                self.graph.selections.$path = value;
                self.emit($field);
            }
        }
    };
}

macro_rules! list_field {
    ($get:ident, $set:ident, $update:ident, $toggle:ident, $path:ident, $ty:ty, $field:expr) => {
        pub fn $get(&self) -> &[$ty] {
            &self.graph.selections.$path
        }

        pub fn $set(&mut self, value: Vec<$ty>) {
            let value = dedup_by_id(value);
            if self.graph.selections.$path != value {
                self.graph.selections.$path = value;
                self.emit($field);
            }
        }

        pub fn $update(&mut self, reducer: impl FnOnce(Vec<$ty>) -> Vec<$ty>) {
            let next = reducer(self.graph.selections.$path.clone());
            self.$set(next);
        }

        pub fn $toggle(&mut self, item: $ty) {
            self.$update(|prev| toggle(prev, item));
        }
    };
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = channel();
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, tx));
        Subscription { id, events: rx }
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn emit(&mut self, field: Field) {
        let event = StoreEvent { field };
        // Receivers that were dropped without unsubscribing are pruned here.
        self.subscribers.retain(|(_, tx)| tx.send(event).is_ok());
    }

    pub fn graph(&self) -> &SelectionGraph {
        &self.graph
    }

    pub fn selections(&self) -> &Selections {
        &self.graph.selections
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn set_current_step(&mut self, step: WizardStep) {
        if self.current_step != step {
            self.current_step = step;
            self.emit(Field::CurrentStep);
        }
    }

    pub fn project_info(&self) -> &ProjectInfo {
        &self.graph.project_info
    }

    pub fn set_project_info(&mut self, info: ProjectInfo) {
        if self.graph.project_info != info {
            self.graph.project_info = info;
            self.emit(Field::ProjectInfo);
        }
    }

    pub fn update_project_info(&mut self, edit: impl FnOnce(&mut ProjectInfo)) {
        let mut info = self.graph.project_info.clone();
        edit(&mut info);
        self.set_project_info(info);
    }

    single_field!(layout, set_layout, selected_layout, LayoutOption, Field::Layout);
    single_field!(design_style, set_design_style, selected_design_style, DesignStyle, Field::DesignStyle);
    single_field!(color_theme, set_color_theme, selected_color_theme, ColorTheme, Field::ColorTheme);
    single_field!(background, set_background, selected_background, BackgroundOption, Field::Background);
    single_field!(
        background_selection,
        set_background_selection,
        background_selection,
        BackgroundSelection,
        Field::BackgroundSelection
    );

    list_field!(
        special_layouts,
        set_special_layouts,
        update_special_layouts,
        toggle_special_layout,
        selected_special_layouts,
        LayoutOption,
        Field::SpecialLayouts
    );
    list_field!(
        functionality,
        set_functionality,
        update_functionality,
        toggle_functionality,
        selected_functionality,
        FunctionalityOption,
        Field::Functionality
    );
    list_field!(visuals, set_visuals, update_visuals, toggle_visual, selected_visuals, VisualElement, Field::Visuals);
    list_field!(
        components,
        set_components,
        update_components,
        toggle_component,
        selected_components,
        ComponentOption,
        Field::Components
    );
    list_field!(
        animations,
        set_animations,
        update_animations,
        toggle_animation,
        selected_animations,
        AnimationOption,
        Field::Animations
    );

    pub fn typography(&self) -> &Typography {
        &self.graph.selections.selected_typography
    }

    pub fn set_typography(&mut self, typography: Typography) {
        if self.graph.selections.selected_typography != typography {
            self.graph.selections.selected_typography = typography;
            self.emit(Field::Typography);
        }
    }

    pub fn update_typography(&mut self, edit: impl FnOnce(&mut Typography)) {
        let mut typography = self.graph.selections.selected_typography.clone();
        edit(&mut typography);
        self.set_typography(typography);
    }

    /// Write a whole trackable snapshot back field by field.
    pub fn restore_selections(&mut self, s: Selections) {
        self.set_layout(s.selected_layout);
        self.set_special_layouts(s.selected_special_layouts);
        self.set_design_style(s.selected_design_style);
        self.set_color_theme(s.selected_color_theme);
        self.set_typography(s.selected_typography);
        self.set_functionality(s.selected_functionality);
        self.set_visuals(s.selected_visuals);
        self.set_background(s.selected_background);
        self.set_background_selection(s.background_selection);
        self.set_components(s.selected_components);
        self.set_animations(s.selected_animations);
    }

    /// Every field back to its initial default, including the active step.
    pub fn reset(&mut self) {
        self.set_project_info(ProjectInfo::default());
        self.restore_selections(Selections::default());
        self.set_current_step(WizardStep::default());
        self.prompt_text.clear();
    }

    /// Completion percentage over the ten progress fields.
    pub fn progress(&self) -> u8 {
        let s = &self.graph.selections;
        let filled = [
            self.graph.project_info.is_filled(),
            s.selected_layout.is_some(),
            s.selected_design_style.is_some(),
            s.selected_color_theme.is_some(),
            !s.selected_typography.font_family.is_empty(),
            !s.selected_visuals.is_empty(),
            s.selected_background.is_some(),
            !s.selected_components.is_empty(),
            !s.selected_functionality.is_empty(),
            !s.selected_animations.is_empty(),
        ]
        .into_iter()
        .filter(|f| *f)
        .count() as f64;
        (filled / PROGRESS_FIELDS as f64 * 100.0).round() as u8
    }

    pub fn generate_prompt(&self) -> String {
        prompt::generate_prompt(&self.graph)
    }

    pub fn generate_basic_prompt(&self) -> String {
        prompt::generate_basic_prompt(&self.graph)
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn set_prompt_text(&mut self, text: String) {
        self.prompt_text = text;
    }

    pub fn prompt_variant(&self) -> PromptVariant {
        self.prompt_variant
    }

    pub fn set_prompt_variant(&mut self, variant: PromptVariant) {
        self.prompt_variant = variant;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FunctionalityCategory, ReactBitsOption};

    fn layout(id: &str) -> LayoutOption {
        LayoutOption {
            id: id.into(),
            title: id.to_uppercase(),
            description: String::new(),
            preview_url: None,
            category: None,
        }
    }

    fn component(id: &str) -> ComponentOption {
        ReactBitsOption {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            category: None,
            dependencies: vec![],
            cli_command: None,
            code_snippet: None,
            tags: vec![],
        }
    }

    #[test]
    fn toggle_appends_then_removes_by_id() {
        let list = toggle(Vec::new(), layout("hero"));
        let list = toggle(list, layout("footer"));
        assert_eq!(list.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec!["hero", "footer"]);
        let mut other_hero = layout("hero");
        other_hero.title = "Different title".into();
        let list = toggle(list, other_hero);
        assert_eq!(list.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec!["footer"]);
    }

    #[test]
    fn list_setter_drops_duplicate_ids() {
        let mut store = Store::new();
        store.set_components(vec![component("dock"), component("dock"), component("stack")]);
        assert_eq!(store.components().len(), 2);
        assert_eq!(store.components()[0].id, "dock");
        assert_eq!(store.components()[1].id, "stack");
    }

    #[test]
    fn setters_notify_only_on_change() {
        let mut store = Store::new();
        let sub = store.subscribe();
        store.set_layout(Some(layout("single-column")));
        store.set_layout(Some(layout("single-column")));
        store.set_current_step(WizardStep::Layout);
        let events = sub.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].field, Field::Layout);
        assert!(events[0].trackable());
        assert_eq!(events[1].field, Field::CurrentStep);
        assert!(!events[1].trackable());
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut store = Store::new();
        let sub = store.subscribe();
        store.unsubscribe(sub.id());
        store.toggle_component(component("dock"));
        assert!(sub.drain().is_empty());
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let mut store = Store::new();
        drop(store.subscribe());
        store.toggle_animation(component("fade"));
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn typography_counts_after_initialization() {
        let store = Store::new();
        assert_eq!(store.progress(), 10);
    }

    #[test]
    fn progress_grows_with_each_filled_field_and_shrinks_when_cleared() {
        let mut store = Store::new();
        let mut last = store.progress();

        store.update_project_info(|p| {
            p.name = "Acme".into();
            p.description = "Studio portfolio".into();
        });
        assert!(store.progress() >= last);
        last = store.progress();

        store.set_layout(Some(layout("single-column")));
        assert!(store.progress() >= last);
        last = store.progress();

        store.toggle_functionality(FunctionalityOption {
            id: "dark-mode".into(),
            title: "Dark Mode Support".into(),
            description: String::new(),
            category: FunctionalityCategory::Technical,
            tier: None,
            features: vec![],
        });
        assert!(store.progress() >= last);
        assert_eq!(store.progress(), 40);

        store.set_layout(None);
        assert_eq!(store.progress(), 30);
    }

    #[test]
    fn reset_restores_defaults_and_first_step() {
        let mut store = Store::new();
        store.update_project_info(|p| p.name = "Acme".into());
        store.set_current_step(WizardStep::Preview);
        store.toggle_component(component("dock"));
        store.update_typography(|t| t.font_family = "'Poppins', sans-serif".into());
        store.set_prompt_text("old prompt".into());

        store.reset();
        assert_eq!(store.project_info(), &ProjectInfo::default());
        assert_eq!(store.current_step(), WizardStep::ProjectSetup);
        assert!(store.components().is_empty());
        assert_eq!(store.typography(), &Typography::default());
        assert!(store.prompt_text().is_empty());
    }
}
