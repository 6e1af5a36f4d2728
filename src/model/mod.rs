//! Selection graph data model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything selectable from a catalog. Multi-select membership is keyed by `id`.
pub trait Identified {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectType {
    #[default]
    Website,
    #[serde(rename = "Web App")]
    WebApp,
    #[serde(rename = "Mobile App")]
    MobileApp,
    Dashboard,
    #[serde(rename = "E-commerce")]
    ECommerce,
    Portfolio,
}

impl ProjectType {
    pub const ALL: [ProjectType; 6] = [
        ProjectType::Website,
        ProjectType::WebApp,
        ProjectType::MobileApp,
        ProjectType::Dashboard,
        ProjectType::ECommerce,
        ProjectType::Portfolio,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            ProjectType::Website => "Website",
            ProjectType::WebApp => "Web App",
            ProjectType::MobileApp => "Mobile App",
            ProjectType::Dashboard => "Dashboard",
            ProjectType::ECommerce => "E-commerce",
            ProjectType::Portfolio => "Portfolio",
        }
    }

    /// Case-insensitive; accepts the label with or without its space/hyphen.
    pub fn from_label(s: &str) -> Option<Self> {
        let wanted: String = s.chars().filter(|c| c.is_alphanumeric()).collect::<String>().to_lowercase();
        Self::ALL.into_iter().find(|t| {
            let label: String = t.label().chars().filter(|c| c.is_alphanumeric()).collect();
            label.to_lowercase() == wanted
        })
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: ProjectType,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub goals: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            kind: ProjectType::Website,
            purpose: "Portfolio".into(),
            target_audience: String::new(),
            goals: String::new(),
        }
    }
}

impl ProjectInfo {
    pub fn is_filled(&self) -> bool {
        !self.name.is_empty() && !self.description.is_empty() && !self.purpose.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutCategory {
    Column,
    Special,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOption {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<LayoutCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignStyle {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorTheme {
    pub id: String,
    pub title: String,
    pub description: String,
    pub colors: Vec<String>,
    /// Primary / secondary / accent shares, in percent.
    pub distribution: Vec<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_custom: bool,
}

impl ColorTheme {
    /// Share at `slot` (0 primary, 1 secondary, 2 accent); missing slots read as 0.
    pub fn share(&self, slot: usize) -> u32 {
        self.distribution.get(slot).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub heading_weight: String,
    pub body_weight: String,
    pub text_alignment: String,
    pub heading_size: String,
    pub body_size: String,
    pub line_height: String,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: "'Inter', sans-serif".into(),
            heading_weight: "Semibold".into(),
            body_weight: "Regular".into(),
            text_alignment: "Left".into(),
            heading_size: "Large".into(),
            body_size: "Medium".into(),
            line_height: "Normal".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionalityCategory {
    Functionality,
    Technical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Standard,
    Advanced,
    Enterprise,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionalityOption {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: FunctionalityCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub style: String,
}

/// A React-Bits catalog entry: background, UI component or animation,
/// carrying the npm dependencies and CLI command used to install it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactBitsOption {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl ReactBitsOption {
    pub fn install_command(&self) -> Option<&str> {
        self.cli_command.as_deref().filter(|c| !c.trim().is_empty())
    }
}

pub type BackgroundOption = ReactBitsOption;
pub type ComponentOption = ReactBitsOption;
pub type AnimationOption = ReactBitsOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundKind {
    Solid,
    Gradient,
    Pattern,
    Image,
    ReactBits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundSelection {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<u8>,
}

macro_rules! identified {
    ($($t:ty),+ $(,)?) => {
        $(impl Identified for $t {
            fn id(&self) -> &str { &self.id }
        })+
    };
}

identified!(LayoutOption, DesignStyle, ColorTheme, FunctionalityOption, VisualElement, ReactBitsOption);

/// Wizard steps in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WizardStep {
    #[default]
    ProjectSetup,
    Layout,
    DesignStyle,
    ColorTheme,
    Typography,
    Visuals,
    Functionality,
    Background,
    Components,
    Animations,
    Preview,
}

impl WizardStep {
    pub const ALL: [WizardStep; 11] = [
        WizardStep::ProjectSetup,
        WizardStep::Layout,
        WizardStep::DesignStyle,
        WizardStep::ColorTheme,
        WizardStep::Typography,
        WizardStep::Visuals,
        WizardStep::Functionality,
        WizardStep::Background,
        WizardStep::Components,
        WizardStep::Animations,
        WizardStep::Preview,
    ];

    pub const fn id(&self) -> &'static str {
        match self {
            WizardStep::ProjectSetup => "project-setup",
            WizardStep::Layout => "layout",
            WizardStep::DesignStyle => "design-style",
            WizardStep::ColorTheme => "color-theme",
            WizardStep::Typography => "typography",
            WizardStep::Visuals => "visuals",
            WizardStep::Functionality => "functionality",
            WizardStep::Background => "background",
            WizardStep::Components => "components",
            WizardStep::Animations => "animations",
            WizardStep::Preview => "preview",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            WizardStep::ProjectSetup => "Project Setup",
            WizardStep::Layout => "Layout",
            WizardStep::DesignStyle => "Design Style",
            WizardStep::ColorTheme => "Color Theme",
            WizardStep::Typography => "Typography",
            WizardStep::Visuals => "Visuals",
            WizardStep::Functionality => "Functionality",
            WizardStep::Background => "Background",
            WizardStep::Components => "UI Components",
            WizardStep::Animations => "UI/UX Animations",
            WizardStep::Preview => "Preview",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Unrecognized identifiers fall back to the first step.
    pub fn from_id_or_first(id: &str) -> Self {
        Self::from_id(id).unwrap_or_default()
    }

    pub fn next(&self) -> Option<Self> {
        let idx = Self::ALL.iter().position(|s| s == self)?;
        Self::ALL.get(idx + 1).copied()
    }
}

impl From<String> for WizardStep {
    fn from(id: String) -> Self {
        WizardStep::from_id_or_first(&id)
    }
}

impl From<WizardStep> for String {
    fn from(step: WizardStep) -> Self {
        step.id().to_string()
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The undo-tracked part of the selection graph. Everything except project
/// metadata, the active step and generated prompt text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selections {
    pub selected_layout: Option<LayoutOption>,
    pub selected_special_layouts: Vec<LayoutOption>,
    pub selected_design_style: Option<DesignStyle>,
    pub selected_color_theme: Option<ColorTheme>,
    pub selected_typography: Typography,
    pub selected_functionality: Vec<FunctionalityOption>,
    pub selected_visuals: Vec<VisualElement>,
    pub selected_background: Option<BackgroundOption>,
    pub background_selection: Option<BackgroundSelection>,
    pub selected_components: Vec<ComponentOption>,
    pub selected_animations: Vec<AnimationOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionGraph {
    pub project_info: ProjectInfo,
    #[serde(flatten)]
    pub selections: Selections,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_step_falls_back_to_first() {
        let step: WizardStep = serde_json::from_str("\"not-a-step\"").unwrap();
        assert_eq!(step, WizardStep::ProjectSetup);
        let step: WizardStep = serde_json::from_str("\"components\"").unwrap();
        assert_eq!(step, WizardStep::Components);
        assert_eq!(serde_json::to_string(&WizardStep::ColorTheme).unwrap(), "\"color-theme\"");
    }

    #[test]
    fn project_type_uses_display_labels_on_the_wire() {
        assert_eq!(serde_json::to_string(&ProjectType::WebApp).unwrap(), "\"Web App\"");
        assert_eq!(ProjectType::from_label("e-commerce"), Some(ProjectType::ECommerce));
        assert_eq!(ProjectType::from_label("mobileapp"), Some(ProjectType::MobileApp));
        assert_eq!(ProjectType::from_label("spaceship"), None);
    }

    #[test]
    fn project_info_filled_needs_name_description_and_purpose() {
        let mut info = ProjectInfo { name: "Acme".into(), ..Default::default() };
        assert!(!info.is_filled());
        info.description = "A studio site".into();
        assert!(info.is_filled());
        info.purpose.clear();
        assert!(!info.is_filled());
    }

    #[test]
    fn blank_cli_command_is_not_install_metadata() {
        let opt = ReactBitsOption {
            id: "x".into(),
            title: "X".into(),
            description: String::new(),
            category: None,
            dependencies: vec![],
            cli_command: Some("   ".into()),
            code_snippet: None,
            tags: vec![],
        };
        assert_eq!(opt.install_command(), None);
    }

    #[test]
    fn step_order_walks_forward() {
        assert_eq!(WizardStep::ProjectSetup.next(), Some(WizardStep::Layout));
        assert_eq!(WizardStep::Preview.next(), None);
    }
}
