use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{
    AnimationOption, BackgroundOption, ColorTheme, ComponentOption, DesignStyle, FunctionalityOption, LayoutOption,
    ReactBitsOption, SelectionGraph, VisualElement,
};

/// Returned by both variants until the required sections are filled in.
pub const INCOMPLETE_PROMPT: &str = "Please complete all required sections before generating a prompt.";

/// Section 10 body when neither a package nor a technical feature is picked.
pub const NO_FUNCTIONALITY: &str = "- Basic functionality (no specific features selected)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptVariant {
    #[default]
    Detailed,
    Basic,
}

impl PromptVariant {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "detailed" | "full" => Some(PromptVariant::Detailed),
            "basic" | "short" => Some(PromptVariant::Basic),
            _ => None,
        }
    }
}

impl fmt::Display for PromptVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PromptVariant::Detailed => "detailed",
            PromptVariant::Basic => "basic",
        })
    }
}

pub fn synthesize(graph: &SelectionGraph, variant: PromptVariant) -> String {
    match variant {
        PromptVariant::Detailed => generate_prompt(graph),
        PromptVariant::Basic => generate_basic_prompt(graph),
    }
}

/// The four selections both documents are built around.
struct Required<'a> {
    layout: &'a LayoutOption,
    style: &'a DesignStyle,
    theme: &'a ColorTheme,
}

fn required(graph: &SelectionGraph) -> Option<Required<'_>> {
    if graph.project_info.name.is_empty() {
        return None;
    }
    let s = &graph.selections;
    Some(Required {
        layout: s.selected_layout.as_ref()?,
        style: s.selected_design_style.as_ref()?,
        theme: s.selected_color_theme.as_ref()?,
    })
}

/// First selected package tier. Later tiered picks are ignored.
fn package_tier(functionality: &[FunctionalityOption]) -> Option<&FunctionalityOption> {
    functionality.iter().find(|f| f.tier.is_some())
}

fn or_none(list: &[String]) -> String {
    if list.is_empty() {
        "None".to_string()
    } else {
        list.join(", ")
    }
}

fn install_line(opt: &ReactBitsOption) -> String {
    match opt.install_command() {
        Some(cmd) => format!("`{cmd}`"),
        None => "None".to_string(),
    }
}

fn background_section(background: Option<&BackgroundOption>) -> String {
    match background {
        Some(bg) => format!(
            "## 7. Background Effect
- **Selected Background:** {title}
- **Description:** {description}
- **Dependencies:** {deps}
- **Installation:** {install}",
            title = bg.title,
            description = bg.description,
            deps = or_none(&bg.dependencies),
            install = install_line(bg),
        ),
        None => "## 7. Background Effect\n- **Selected Background:** None".to_string(),
    }
}

fn item_block(opt: &ReactBitsOption, with_usage: bool) -> String {
    let mut s = format!(
        "### {title}\n- **Description:** {description}\n- **Dependencies:** {deps}\n- **Installation:** {install}",
        title = opt.title,
        description = opt.description,
        deps = or_none(&opt.dependencies),
        install = install_line(opt),
    );
    if with_usage {
        if let Some(snippet) = opt.code_snippet.as_deref().filter(|c| !c.trim().is_empty()) {
            s.push_str(&format!("\n- **Usage:**\n```tsx\n{}\n```", snippet.trim_end()));
        }
    }
    s
}

fn item_list(heading: &str, label: &str, items: Vec<String>) -> String {
    format!("{heading}\n**Selected {label} ({count}):**\n\n{items}", count = items.len(), items = items.join("\n\n"))
}

fn components_section(components: &[ComponentOption]) -> String {
    const HEADING: &str = "## 8. UI Components";
    if components.is_empty() {
        return format!("{HEADING}\n- No additional UI components selected");
    }
    item_list(HEADING, "Components", components.iter().map(|c| item_block(c, true)).collect())
}

fn animations_section(animations: &[AnimationOption]) -> String {
    const HEADING: &str = "## 9. UI/UX Animations";
    if animations.is_empty() {
        return format!("{HEADING}\n- Standard animations and transitions");
    }
    item_list(HEADING, "Animations", animations.iter().map(|a| item_block(a, false)).collect())
}

/// Background, then components, then animations.
fn install_sources(graph: &SelectionGraph) -> Vec<&ReactBitsOption> {
    let s = &graph.selections;
    s.selected_background
        .iter()
        .chain(s.selected_components.iter())
        .chain(s.selected_animations.iter())
        .collect()
}

/// Dependency names across every selected item, first occurrence wins.
pub fn aggregate_dependencies(graph: &SelectionGraph) -> Vec<String> {
    let mut deps: Vec<String> = Vec::new();
    for dep in install_sources(graph).into_iter().flat_map(|o| o.dependencies.iter()) {
        if !deps.iter().any(|d| d == dep) {
            deps.push(dep.clone());
        }
    }
    deps
}

pub fn install_commands(graph: &SelectionGraph) -> Vec<String> {
    install_sources(graph)
        .into_iter()
        .filter_map(|o| o.install_command())
        .map(str::to_string)
        .collect()
}

/// Present only when some selected item carries an install command.
fn installation_section(graph: &SelectionGraph) -> Option<String> {
    let commands = install_commands(graph);
    if commands.is_empty() {
        return None;
    }
    let deps = aggregate_dependencies(graph);
    let step_one = if deps.is_empty() {
        "No additional npm dependencies are required.".to_string()
    } else {
        format!("```bash\nnpm install {}\n```", deps.join(" "))
    };
    Some(format!(
        "## 12. React-Bits Installation

**Step 1: Install Dependencies**
{step_one}

**Step 2: Install React-Bits Components**
```bash
{commands}
```

**Step 3: Import and Use**
Refer to the component-specific usage examples above for implementation details.",
        commands = commands.join("\n"),
    ))
}

fn visual_lines(visuals: &[VisualElement]) -> String {
    if visuals.is_empty() {
        return "- Standard visual elements".to_string();
    }
    visuals.iter().map(|v| format!("- {}: {}", v.kind, v.style)).collect::<Vec<_>>().join("\n")
}

fn functionality_tier_block(functionality: &[FunctionalityOption]) -> Option<String> {
    package_tier(functionality).map(|tier| {
        format!(
            "**Tier:** {}\n**Core Features:**\n{}",
            tier.title,
            tier.features.iter().map(|f| format!("   - {f}")).collect::<Vec<_>>().join("\n"),
        )
    })
}

fn technical_block(functionality: &[FunctionalityOption]) -> Option<String> {
    let technical: Vec<String> = functionality
        .iter()
        .filter(|f| f.tier.is_none())
        .map(|f| format!("   - {}: {}", f.title, f.description))
        .collect();
    if technical.is_empty() {
        None
    } else {
        Some(format!("**Technical Requirements:**\n{}", technical.join("\n")))
    }
}

fn functionality_section(functionality: &[FunctionalityOption]) -> String {
    let blocks: Vec<String> =
        [functionality_tier_block(functionality), technical_block(functionality)].into_iter().flatten().collect();
    let body = if blocks.is_empty() { NO_FUNCTIONALITY.to_string() } else { blocks.join("\n\n") };
    format!("## 10. Functionality & Features\n{body}")
}

fn overview_section(graph: &SelectionGraph) -> String {
    let info = &graph.project_info;
    let mut lines = vec![
        "## 1. Project Overview".to_string(),
        format!("- **Type:** {}", info.kind),
        format!("- **Purpose:** {}", info.purpose),
        format!("- **Description:** {}", info.description),
    ];
    if !info.target_audience.is_empty() {
        lines.push(format!("- **Target Audience:** {}", info.target_audience));
    }
    if !info.goals.is_empty() {
        lines.push(format!("- **Goals:** {}", info.goals));
    }
    lines.join("\n")
}

fn layout_section(layout: &LayoutOption, special: &[LayoutOption]) -> String {
    let mut s = format!(
        "## 2. Layout Structure\n- **Primary Layout:** {}\n- **Layout Description:** {}",
        layout.title, layout.description
    );
    if !special.is_empty() {
        s.push_str("\n- **Additional Layout Features:**");
        for l in special {
            s.push_str(&format!("\n  • {}", l.title));
        }
    }
    s
}

const TECHNICAL_IMPLEMENTATION: &str = "## 11. Technical Implementation
- **Framework:** React with TypeScript
- **Styling:** Tailwind CSS with modern design patterns
- **Responsive Design:** Mobile-first approach with breakpoints for tablet and desktop
- **Accessibility:** WCAG 2.1 AA compliance
- **Performance:** Optimized loading and smooth interactions
- **SEO:** Semantic HTML structure and meta tags";

const DESIGN_REQUIREMENTS: &str = "## 13. Design Requirements
- **Modern Aesthetics:** Clean, professional design with attention to detail
- **User Experience:** Intuitive navigation and clear information hierarchy
- **Interactive Elements:** Smooth hover states, loading states, and feedback
- **Cross-browser Compatibility:** Support for modern browsers
- **Mobile Optimization:** Touch-friendly interface and responsive layouts";

const CLOSING: &str = "Please implement this design with pixel-perfect attention to detail, ensuring all elements work harmoniously together to create an exceptional user experience.";

/// Full multi-section specification document. Sections are separated by a
/// single blank line; optional lines are left out rather than blanked.
pub fn generate_prompt(graph: &SelectionGraph) -> String {
    let Some(req) = required(graph) else {
        return INCOMPLETE_PROMPT.to_string();
    };
    let info = &graph.project_info;
    let s = &graph.selections;
    let t = &s.selected_typography;

    let mut sections = vec![
        format!(
            "Create a {} with the following specifications:\n\n**Project Name:** \"{}\"",
            info.kind.label().to_lowercase(),
            info.name
        ),
        overview_section(graph),
        layout_section(req.layout, &s.selected_special_layouts),
        format!(
            r#"## 3. Design Style
- **Primary Style:** {title}
- **Style Description:** {description}
- **Design Approach:** Modern {lower} with attention to user experience"#,
            title = req.style.title,
            description = req.style.description,
            lower = req.style.title.to_lowercase(),
        ),
        format!(
            r#"## 4. Color Scheme
- **Theme:** {title}
- **Primary Colors:** {colors}
- **Color Distribution:** Primary ({primary}%), Secondary ({secondary}%), Accent ({accent}%)
- **Color Usage:** Use primary color for main elements, secondary for backgrounds, accent for highlights and CTAs"#,
            title = req.theme.title,
            colors = req.theme.colors.join(", "),
            primary = req.theme.share(0),
            secondary = req.theme.share(1),
            accent = req.theme.share(2),
        ),
        format!(
            r#"## 5. Typography
- **Font Family:** {}
- **Heading Weight:** {}
- **Body Text Weight:** {}
- **Text Alignment:** {}
- **Heading Size:** {}
- **Body Size:** {}
- **Line Height:** {}"#,
            t.font_family, t.heading_weight, t.body_weight, t.text_alignment, t.heading_size, t.body_size, t.line_height,
        ),
        format!("## 6. Visual Elements\n{}", visual_lines(&s.selected_visuals)),
        background_section(s.selected_background.as_ref()),
        components_section(&s.selected_components),
        animations_section(&s.selected_animations),
        functionality_section(&s.selected_functionality),
        TECHNICAL_IMPLEMENTATION.to_string(),
    ];
    sections.extend(installation_section(graph));
    sections.push(DESIGN_REQUIREMENTS.to_string());
    sections.push(CLOSING.to_string());
    sections.join("\n\n")
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn titles(items: &[ReactBitsOption]) -> String {
    items.iter().map(|i| i.title.as_str()).collect::<Vec<_>>().join(", ")
}

fn react_bits_summary(graph: &SelectionGraph) -> Option<String> {
    let s = &graph.selections;
    let mut parts: Vec<String> = Vec::new();
    if let Some(bg) = &s.selected_background {
        parts.push(format!("{} background", bg.title));
    }
    if !s.selected_components.is_empty() {
        parts.push(format!(
            "{} ({})",
            plural(s.selected_components.len(), "UI component"),
            titles(&s.selected_components)
        ));
    }
    if !s.selected_animations.is_empty() {
        parts.push(format!(
            "{} ({})",
            plural(s.selected_animations.len(), "animation"),
            titles(&s.selected_animations)
        ));
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("Include react-bits components: {}.", parts.join(", ")))
    }
}

/// Short paragraph form of the same selections.
pub fn generate_basic_prompt(graph: &SelectionGraph) -> String {
    let Some(req) = required(graph) else {
        return INCOMPLETE_PROMPT.to_string();
    };
    let info = &graph.project_info;
    let s = &graph.selections;
    let t = &s.selected_typography;

    let visuals = if s.selected_visuals.is_empty() {
        "standard visual elements".to_string()
    } else {
        s.selected_visuals
            .iter()
            .map(|v| format!("{} in {} style", v.kind, v.style))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let tier = package_tier(&s.selected_functionality)
        .map(|f| f.title.to_lowercase())
        .unwrap_or_else(|| "basic".to_string());

    let mut paragraphs = vec![
        format!(
            "Create a {kind} called \"{name}\" for {purpose} purposes. {description}",
            kind = info.kind.label().to_lowercase(),
            name = info.name,
            purpose = info.purpose.to_lowercase(),
            description = info.description,
        )
        .trim_end()
        .to_string(),
        format!(
            "Use a {layout} layout with a {style} design style. The color scheme should follow the {theme} theme, using {colors} as the main colors ({primary}% primary, {secondary}% secondary, {accent}% accent).",
            layout = req.layout.title.to_lowercase(),
            style = req.style.title.to_lowercase(),
            theme = req.theme.title.to_lowercase(),
            colors = req.theme.colors.join(", "),
            primary = req.theme.share(0),
            secondary = req.theme.share(1),
            accent = req.theme.share(2),
        ),
        format!(
            "For typography, use {font} with {heading} headings and {body} body text. Visual elements should include {visuals}.",
            font = t.font_family,
            heading = t.heading_weight.to_lowercase(),
            body = t.body_weight.to_lowercase(),
        ),
    ];
    if let Some(summary) = react_bits_summary(graph) {
        paragraphs.push(summary);
    }
    paragraphs.push(format!(
        "Include {tier} functionality features. Build using React, TypeScript, and Tailwind CSS with modern responsive design."
    ));
    paragraphs.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FunctionalityCategory, ProjectInfo, Tier};

    fn item(id: &str, deps: &[&str], cmd: Option<&str>) -> ReactBitsOption {
        ReactBitsOption {
            id: id.into(),
            title: id.to_uppercase(),
            description: format!("{id} description"),
            category: None,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            cli_command: cmd.map(str::to_string),
            code_snippet: None,
            tags: vec![],
        }
    }

    fn complete() -> SelectionGraph {
        let mut g = SelectionGraph::default();
        g.project_info = ProjectInfo {
            name: "Acme".into(),
            description: "A studio portfolio.".into(),
            purpose: "Portfolio".into(),
            ..Default::default()
        };
        g.selections.selected_layout = Some(LayoutOption {
            id: "single-column".into(),
            title: "Single Column".into(),
            description: "One column.".into(),
            preview_url: None,
            category: None,
        });
        g.selections.selected_design_style = Some(DesignStyle {
            id: "minimalist".into(),
            title: "Minimalist".into(),
            description: "Essential elements only.".into(),
            preview_url: None,
        });
        g.selections.selected_color_theme = Some(ColorTheme {
            id: "mono".into(),
            title: "Mono".into(),
            description: String::new(),
            colors: vec!["#111".into(), "#222".into(), "#333".into()],
            distribution: vec![40, 40, 20],
            is_custom: false,
        });
        g
    }

    #[test]
    fn each_missing_requirement_yields_sentinel() {
        let mut g = complete();
        g.project_info.name.clear();
        assert_eq!(generate_prompt(&g), INCOMPLETE_PROMPT);

        for strip in 0..3 {
            let mut g = complete();
            match strip {
                0 => g.selections.selected_layout = None,
                1 => g.selections.selected_design_style = None,
                _ => g.selections.selected_color_theme = None,
            }
            assert_eq!(generate_prompt(&g), INCOMPLETE_PROMPT);
            assert_eq!(generate_basic_prompt(&g), INCOMPLETE_PROMPT);
        }
    }

    #[test]
    fn placeholders_render_when_optional_sections_are_empty() {
        let doc = generate_prompt(&complete());
        assert!(doc.contains("## 7. Background Effect\n- **Selected Background:** None"));
        assert!(doc.contains("- No additional UI components selected"));
        assert!(doc.contains("- Standard animations and transitions"));
        assert!(doc.contains("- Standard visual elements"));
        assert!(!doc.contains("## 12. React-Bits Installation"));
        assert!(!doc.contains("Target Audience"));
    }

    #[test]
    fn empty_functionality_gets_placeholder() {
        let doc = generate_prompt(&complete());
        assert!(doc.contains(&format!(
            "## 10. Functionality & Features\n{NO_FUNCTIONALITY}\n\n## 11. Technical Implementation"
        )));

        let mut g = complete();
        g.selections.selected_functionality = vec![FunctionalityOption {
            id: "seo".into(),
            title: "SEO Optimization".into(),
            description: "Search engine optimization".into(),
            category: FunctionalityCategory::Technical,
            tier: None,
            features: vec![],
        }];
        let doc = generate_prompt(&g);
        assert!(!doc.contains(NO_FUNCTIONALITY));
        assert!(doc.contains("## 10. Functionality & Features\n**Technical Requirements:**\n   - SEO Optimization"));
    }

    #[test]
    fn optional_overview_lines_leave_no_gaps() {
        let mut g = complete();
        let doc = generate_prompt(&g);
        assert!(doc.contains("- **Description:** A studio portfolio.\n\n## 2. Layout Structure"));
        assert!(doc.contains("- **Layout Description:** One column.\n\n## 3. Design Style"));
        assert!(!doc.contains("\n\n\n"));

        g.project_info.goals = "More leads".into();
        let doc = generate_prompt(&g);
        assert!(doc.contains("- **Description:** A studio portfolio.\n- **Goals:** More leads\n\n## 2."));
    }

    #[test]
    fn sections_keep_fixed_order() {
        let mut g = complete();
        g.selections.selected_components = vec![item("dock", &["framer-motion"], Some("npx jsrepo add dock"))];
        let doc = generate_prompt(&g);
        let headers = [
            "## 1. Project Overview",
            "## 2. Layout Structure",
            "## 3. Design Style",
            "## 4. Color Scheme",
            "## 5. Typography",
            "## 6. Visual Elements",
            "## 7. Background Effect",
            "## 8. UI Components",
            "## 9. UI/UX Animations",
            "## 10. Functionality & Features",
            "## 11. Technical Implementation",
            "## 12. React-Bits Installation",
            "## 13. Design Requirements",
        ];
        let positions: Vec<usize> = headers.iter().map(|h| doc.find(h).unwrap_or_else(|| panic!("missing {h}"))).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn distribution_and_colors_are_echoed_verbatim() {
        let doc = generate_prompt(&complete());
        assert!(doc.contains("- **Primary Colors:** #111, #222, #333"));
        assert!(doc.contains("Primary (40%), Secondary (40%), Accent (20%)"));
        assert!(doc.starts_with("Create a website with the following specifications:"));
        assert!(doc.contains("- **Design Approach:** Modern minimalist with attention to user experience"));
    }

    #[test]
    fn tier_and_technical_features_render_separately() {
        let mut g = complete();
        g.selections.selected_functionality = vec![
            FunctionalityOption {
                id: "dark-mode".into(),
                title: "Dark Mode Support".into(),
                description: "Alternative color scheme".into(),
                category: FunctionalityCategory::Technical,
                tier: None,
                features: vec!["Manual Toggle Option".into()],
            },
            FunctionalityOption {
                id: "standard-package".into(),
                title: "Standard Package".into(),
                description: "Advanced features".into(),
                category: FunctionalityCategory::Functionality,
                tier: Some(Tier::Standard),
                features: vec!["Blog System with CMS".into(), "Search Functionality".into()],
            },
        ];
        let doc = generate_prompt(&g);
        assert!(doc.contains("**Tier:** Standard Package\n**Core Features:**\n   - Blog System with CMS\n   - Search Functionality"));
        assert!(doc.contains("**Technical Requirements:**\n   - Dark Mode Support: Alternative color scheme"));
        assert!(doc.find("**Tier:**").unwrap() < doc.find("**Technical Requirements:**").unwrap());

        let basic = generate_basic_prompt(&g);
        assert!(basic.ends_with(
            "Include standard package functionality features. Build using React, TypeScript, and Tailwind CSS with modern responsive design."
        ));
    }

    #[test]
    fn dependencies_dedupe_across_background_components_and_animations() {
        let mut g = complete();
        g.selections.selected_background = Some(item("aurora", &["ogl"], Some("npx bg aurora")));
        g.selections.selected_components = vec![
            item("dock", &["framer-motion", "gsap"], Some("npx c dock")),
            item("list", &["gsap"], Some("npx c list")),
        ];
        g.selections.selected_animations = vec![item("split", &["ogl", "three"], None)];

        assert_eq!(aggregate_dependencies(&g), vec!["ogl", "framer-motion", "gsap", "three"]);
        assert_eq!(install_commands(&g), vec!["npx bg aurora", "npx c dock", "npx c list"]);
        let doc = generate_prompt(&g);
        assert!(doc.contains("npm install ogl framer-motion gsap three\n"));
        assert!(doc.contains("```bash\nnpx bg aurora\nnpx c dock\nnpx c list\n```"));
        assert!(doc.contains("**Selected Components (2):**"));
    }

    #[test]
    fn usage_snippet_only_for_components() {
        let mut g = complete();
        let mut dock = item("dock", &[], Some("npx c dock"));
        dock.code_snippet = Some("<Dock items={items} />".into());
        let mut fade = item("fade", &[], None);
        fade.code_snippet = Some("<Fade />".into());
        g.selections.selected_components = vec![dock];
        g.selections.selected_animations = vec![fade];
        let doc = generate_prompt(&g);
        assert!(doc.contains("- **Usage:**\n```tsx\n<Dock items={items} />\n```"));
        assert!(!doc.contains("<Fade />"));
        assert!(doc.contains("**Step 1: Install Dependencies**\nNo additional npm dependencies are required."));
    }

    #[test]
    fn basic_summary_counts_and_titles() {
        let mut g = complete();
        g.selections.selected_background = Some(item("aurora", &[], None));
        g.selections.selected_components = vec![item("dock", &[], None)];
        g.selections.selected_animations = vec![item("fade", &[], None), item("split", &[], None)];
        let basic = generate_basic_prompt(&g);
        assert!(basic.contains(
            "Include react-bits components: AURORA background, 1 UI component (DOCK), 2 animations (FADE, SPLIT)."
        ));
    }

    #[test]
    fn same_graph_same_bytes() {
        let mut g = complete();
        g.selections.selected_components = vec![item("dock", &["gsap"], Some("npx c dock"))];
        assert_eq!(generate_prompt(&g), generate_prompt(&g));
        assert_eq!(generate_basic_prompt(&g), generate_basic_prompt(&g));
        assert_eq!(synthesize(&g, PromptVariant::Basic), generate_basic_prompt(&g));
    }
}
