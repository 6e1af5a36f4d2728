use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{BuilderError, Result};
use crate::model::{
    AnimationOption, BackgroundOption, ColorTheme, ComponentOption, DesignStyle, FunctionalityOption, Identified,
    LayoutOption, VisualElement,
};

mod builtin;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub id: String,
    pub name: String,
    pub family: String,
    pub style: String,
    pub weights: Vec<String>,
}

impl Identified for Font {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualStyle {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualType {
    pub id: String,
    pub title: String,
    pub description: String,
    pub options: Vec<VisualStyle>,
}

impl Identified for VisualType {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Static reference tables the wizard draws selections from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub layouts: Vec<LayoutOption>,
    pub design_styles: Vec<DesignStyle>,
    pub color_themes: Vec<ColorTheme>,
    pub fonts: Vec<Font>,
    pub functionality: Vec<FunctionalityOption>,
    pub visual_types: Vec<VisualType>,
    pub backgrounds: Vec<BackgroundOption>,
    pub components: Vec<ComponentOption>,
    pub animations: Vec<AnimationOption>,
}

/// Catalog file contents; any table present replaces the built-in one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CatalogOverride {
    layouts: Option<Vec<LayoutOption>>,
    design_styles: Option<Vec<DesignStyle>>,
    color_themes: Option<Vec<ColorTheme>>,
    fonts: Option<Vec<Font>>,
    functionality: Option<Vec<FunctionalityOption>>,
    visual_types: Option<Vec<VisualType>>,
    backgrounds: Option<Vec<BackgroundOption>>,
    components: Option<Vec<ComponentOption>>,
    animations: Option<Vec<AnimationOption>>,
}

pub fn find<'a, T: Identified>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|i| i.id() == id)
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            layouts: builtin::layouts(),
            design_styles: builtin::design_styles(),
            color_themes: builtin::color_themes(),
            fonts: builtin::fonts(),
            functionality: builtin::functionality(),
            visual_types: builtin::visual_types(),
            backgrounds: builtin::backgrounds(),
            components: builtin::components(),
            animations: builtin::animations(),
        }
    }

    /// Built-in tables overlaid with a YAML (`.yaml`/`.yml`) or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let is_yaml = matches!(path.extension().and_then(|e| e.to_str()), Some("yaml" | "yml"));
        let overlay: CatalogOverride = if is_yaml {
            serde_yaml::from_str(&raw).map_err(|e| BuilderError::Catalog(format!("{}: {e}", path.display())))?
        } else {
            serde_json::from_str(&raw).map_err(|e| BuilderError::Catalog(format!("{}: {e}", path.display())))?
        };
        Ok(Self::builtin().overlay(overlay))
    }

    fn overlay(mut self, o: CatalogOverride) -> Self {
        if let Some(v) = o.layouts {
            self.layouts = v;
        }
        if let Some(v) = o.design_styles {
            self.design_styles = v;
        }
        if let Some(v) = o.color_themes {
            self.color_themes = v;
        }
        if let Some(v) = o.fonts {
            self.fonts = v;
        }
        if let Some(v) = o.functionality {
            self.functionality = v;
        }
        if let Some(v) = o.visual_types {
            self.visual_types = v;
        }
        if let Some(v) = o.backgrounds {
            self.backgrounds = v;
        }
        if let Some(v) = o.components {
            self.components = v;
        }
        if let Some(v) = o.animations {
            self.animations = v;
        }
        self
    }

    pub fn layout(&self, id: &str) -> Option<&LayoutOption> {
        find(&self.layouts, id)
    }

    pub fn design_style(&self, id: &str) -> Option<&DesignStyle> {
        find(&self.design_styles, id)
    }

    pub fn color_theme(&self, id: &str) -> Option<&ColorTheme> {
        find(&self.color_themes, id)
    }

    pub fn font(&self, id: &str) -> Option<&Font> {
        find(&self.fonts, id)
    }

    pub fn functionality_option(&self, id: &str) -> Option<&FunctionalityOption> {
        find(&self.functionality, id)
    }

    pub fn background(&self, id: &str) -> Option<&BackgroundOption> {
        find(&self.backgrounds, id)
    }

    pub fn component(&self, id: &str) -> Option<&ComponentOption> {
        find(&self.components, id)
    }

    pub fn animation(&self, id: &str) -> Option<&AnimationOption> {
        find(&self.animations, id)
    }

    /// Build the selection entry for `style` under visual type `kind`.
    pub fn visual(&self, kind: &str, style: &str) -> Option<VisualElement> {
        let vt = find(&self.visual_types, kind)?;
        let opt = vt.options.iter().find(|o| o.id == style)?;
        Some(VisualElement {
            id: format!("{}-{}", vt.id, opt.id),
            kind: vt.title.clone(),
            style: opt.title.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_ids_are_unique_per_table() {
        fn unique<T: Identified>(items: &[T]) -> bool {
            let mut ids: Vec<&str> = items.iter().map(|i| i.id()).collect();
            ids.sort_unstable();
            ids.windows(2).all(|w| w[0] != w[1])
        }
        let c = Catalog::builtin();
        assert!(unique(&c.layouts));
        assert!(unique(&c.design_styles));
        assert!(unique(&c.color_themes));
        assert!(unique(&c.fonts));
        assert!(unique(&c.functionality));
        assert!(unique(&c.visual_types));
        assert!(unique(&c.backgrounds));
        assert!(unique(&c.components));
        assert!(unique(&c.animations));
    }

    #[test]
    fn lookups_tolerate_unknown_ids() {
        let c = Catalog::builtin();
        assert_eq!(c.layout("single-column").map(|l| l.title.as_str()), Some("Single Column"));
        assert!(c.layout("no-such-layout").is_none());
        assert!(c.visual("icons", "hologram").is_none());
        let v = c.visual("icons", "line").unwrap();
        assert_eq!((v.id.as_str(), v.kind.as_str(), v.style.as_str()), ("icons-line", "Icons", "Line Icons"));
    }

    #[test]
    fn yaml_overlay_replaces_only_given_tables() {
        let mut f = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            f,
            "components:\n  - id: magnet\n    title: Magnet\n    description: Pulls toward the cursor\n    dependencies: [gsap]\n    cliCommand: npx jsrepo add magnet"
        )
        .unwrap();
        let c = Catalog::load(f.path()).unwrap();
        assert_eq!(c.components.len(), 1);
        assert_eq!(c.components[0].install_command(), Some("npx jsrepo add magnet"));
        assert_eq!(c.layouts, Catalog::builtin().layouts);
    }

    #[test]
    fn unknown_table_is_rejected() {
        let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(f, "{{\"spaceships\": []}}").unwrap();
        assert!(matches!(Catalog::load(f.path()), Err(BuilderError::Catalog(_))));
    }
}
