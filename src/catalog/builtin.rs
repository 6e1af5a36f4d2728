use super::{Font, VisualStyle, VisualType};
use crate::model::{
    ColorTheme, DesignStyle, FunctionalityCategory, FunctionalityOption, LayoutCategory, LayoutOption, ReactBitsOption,
    Tier,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn layout(id: &str, title: &str, description: &str, category: LayoutCategory) -> LayoutOption {
    LayoutOption {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        preview_url: None,
        category: Some(category),
    }
}

pub(super) fn layouts() -> Vec<LayoutOption> {
    use LayoutCategory::{Column, Special};
    vec![
        layout("single-column", "Single Column", "Content in one vertical line, ideal for mobile or minimalist designs.", Column),
        layout("two-column", "Two Column", "Content split into two columns, perfect for blogs with sidebars.", Column),
        layout("three-column", "Three Column", "Content divided into three columns, ideal for content-rich dashboards.", Column),
        layout("grid-layout", "Grid Layout", "Content organized in a responsive grid system, perfect for galleries or portfolios.", Column),
        layout("asymmetrical", "Asymmetrical Layout", "Dynamic, uneven placement of elements for artistic and unique designs.", Column),
        layout("card-based", "Card Based", "Content grouped into modular cards, great for blog posts or product listings.", Special),
        layout("hero-section", "Hero Section", "Full-width, eye-catching area at the top, perfect for landing pages.", Special),
        layout("sticky-header", "Sticky Header", "Navigation that stays fixed at the top while scrolling.", Special),
        layout("footer", "Footer", "Bottom section for additional navigation, contact info, and site details.", Special),
        layout("sidebar", "Sidebar Navigation", "Side-positioned navigation menu for easy access to sections.", Special),
    ]
}

fn style(id: &str, title: &str, description: &str) -> DesignStyle {
    DesignStyle { id: id.into(), title: title.into(), description: description.into(), preview_url: None }
}

pub(super) fn design_styles() -> Vec<DesignStyle> {
    vec![
        style("material-design", "Material Design", "Google's design system with depth, bold colors, and meaningful motion."),
        style("fluent-design", "Fluent Design", "Microsoft's design language featuring light, depth, motion, and material."),
        style("apple-hig", "Apple Human Interface", "Apple's design principles emphasizing clarity, deference, and depth."),
        style("minimalist", "Minimalist", "Clean design with essential elements only, focusing on content and functionality."),
        style("neumorphism", "Neumorphism", "Soft UI design with subtle shadows and depth, creating a tactile experience."),
        style("glassmorphism", "Glassmorphism", "Frosted glass effect with elegant blur and translucent surfaces."),
        style("digital-brutalism", "Digital Brutalism", "Bold, raw design with strong contrasts and unconventional layouts."),
        style("organic-design", "Organic Design", "Natural flowing shapes, soft elements, and biomorphic forms."),
        style("retro-futurism", "Retro Futurism", "Vintage aesthetics meets future technology with bold geometry."),
    ]
}

fn theme(id: &str, title: &str, description: &str, colors: [&str; 3], distribution: [u32; 3]) -> ColorTheme {
    ColorTheme {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        colors: strings(&colors),
        distribution: distribution.to_vec(),
        is_custom: false,
    }
}

pub(super) fn color_themes() -> Vec<ColorTheme> {
    let mut custom = theme(
        "custom-theme",
        "Custom Theme",
        "Create your own unique color palette",
        ["#3B82F6", "#1E40AF", "#F59E0B"],
        [40, 40, 20],
    );
    custom.is_custom = true;
    vec![
        custom,
        theme("ocean-breeze", "Ocean Breeze", "Calming blues and teals inspired by the sea", ["#0EA5E9", "#0891B2", "#F0F9FF"], [50, 30, 20]),
        theme("sunset-warmth", "Sunset Warmth", "Warm oranges and yellows with soft accents", ["#F97316", "#FCD34D", "#FEF3C7"], [40, 35, 25]),
        theme("forest-green", "Forest Green", "Natural greens with earth tone accents", ["#10B981", "#059669", "#D1FAE5"], [45, 35, 20]),
        theme("royal-purple", "Royal Purple", "Elegant purples with sophisticated highlights", ["#8B5CF6", "#7C3AED", "#F3E8FF"], [40, 40, 20]),
        theme("monochrome-modern", "Monochrome Modern", "Sophisticated grayscale with blue accents", ["#374151", "#9CA3AF", "#3B82F6"], [50, 30, 20]),
        theme("tech-neon", "Tech Neon", "Futuristic dark theme with neon highlights", ["#1F2937", "#6366F1", "#00F5FF"], [60, 25, 15]),
    ]
}

fn font(id: &str, name: &str, family: &str, style: &str, weights: &[&str]) -> Font {
    Font { id: id.into(), name: name.into(), family: family.into(), style: style.into(), weights: strings(weights) }
}

pub(super) fn fonts() -> Vec<Font> {
    let full = ["Light", "Regular", "Medium", "Semibold", "Bold"];
    vec![
        font("inter", "Inter", "'Inter', sans-serif", "modern", &full),
        font("poppins", "Poppins", "'Poppins', sans-serif", "friendly", &full),
        font("roboto", "Roboto", "'Roboto', sans-serif", "clean", &["Light", "Regular", "Medium", "Bold"]),
        font("playfair", "Playfair Display", "'Playfair Display', serif", "elegant", &["Regular", "Medium", "Semibold", "Bold"]),
        font("montserrat", "Montserrat", "'Montserrat', sans-serif", "geometric", &full),
        font("source-sans", "Source Sans Pro", "'Source Sans Pro', sans-serif", "professional", &["Light", "Regular", "Semibold", "Bold"]),
    ]
}

fn package(id: &str, title: &str, description: &str, tier: Tier, features: &[&str]) -> FunctionalityOption {
    FunctionalityOption {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        category: FunctionalityCategory::Functionality,
        tier: Some(tier),
        features: strings(features),
    }
}

fn technical(id: &str, title: &str, description: &str, features: &[&str]) -> FunctionalityOption {
    FunctionalityOption {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        category: FunctionalityCategory::Technical,
        tier: None,
        features: strings(features),
    }
}

pub(super) fn functionality() -> Vec<FunctionalityOption> {
    vec![
        package(
            "basic-package",
            "Basic Package",
            "Essential features for a simple website",
            Tier::Basic,
            &[
                "Contact Form",
                "Social Media Integration",
                "Basic SEO Setup",
                "Mobile Responsive Design",
                "Simple Navigation Menu",
                "Image Gallery",
                "Basic Analytics",
            ],
        ),
        package(
            "standard-package",
            "Standard Package",
            "Advanced features for growing businesses",
            Tier::Standard,
            &[
                "All Basic Features",
                "Blog System with CMS",
                "Newsletter Integration",
                "Custom Forms Builder",
                "Advanced Image Gallery",
                "Search Functionality",
                "User Comments System",
                "Content Management",
                "Multi-language Support",
                "Advanced SEO Tools",
            ],
        ),
        package(
            "advanced-package",
            "Advanced Package",
            "Comprehensive solution for established businesses",
            Tier::Advanced,
            &[
                "All Standard Features",
                "User Authentication System",
                "Role-based Access Control",
                "Advanced Analytics Dashboard",
                "API Integration Capabilities",
                "E-commerce Ready",
                "Payment Gateway Integration",
                "Inventory Management",
                "Customer Management",
                "Automated Workflows",
                "Advanced Security Features",
            ],
        ),
        package(
            "enterprise-package",
            "Enterprise Package",
            "Full-featured solution for large organizations",
            Tier::Enterprise,
            &[
                "All Advanced Features",
                "Custom Workflow Automation",
                "Advanced Security & Compliance",
                "Multi-tenant Architecture",
                "Advanced Reporting & Analytics",
                "Custom Integrations",
                "Priority Support",
                "White-label Options",
                "Advanced Performance Optimization",
                "Custom Feature Development",
            ],
        ),
        technical(
            "responsive-design",
            "Responsive Design",
            "Optimized for all screen sizes and devices",
            &["Mobile-First Approach", "Fluid Layouts", "Responsive Images", "Touch-Friendly Interface", "Breakpoint Optimization"],
        ),
        technical(
            "dark-mode",
            "Dark Mode Support",
            "Alternative color scheme for low-light conditions",
            &["System Preference Detection", "Manual Toggle Option", "Persistent User Preference", "Optimized Color Contrast"],
        ),
        technical(
            "pwa-features",
            "Progressive Web App",
            "Modern web app capabilities",
            &["Offline Functionality", "App-like Experience", "Push Notifications", "Install Prompts"],
        ),
        technical(
            "accessibility",
            "Accessibility Features",
            "WCAG 2.1 AA compliance and inclusive design",
            &["Screen Reader Support", "Keyboard Navigation", "High Contrast Mode", "Focus Management", "ARIA Labels"],
        ),
    ]
}

fn visual_type(id: &str, title: &str, description: &str, options: &[(&str, &str, &str)]) -> VisualType {
    VisualType {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        options: options
            .iter()
            .map(|(id, title, description)| VisualStyle { id: id.to_string(), title: title.to_string(), description: description.to_string() })
            .collect(),
    }
}

pub(super) fn visual_types() -> Vec<VisualType> {
    vec![
        visual_type(
            "icons",
            "Icons",
            "Choose your icon style",
            &[
                ("line", "Line Icons", "Clean and minimal line-based icons"),
                ("solid", "Solid Icons", "Bold and filled icon style"),
                ("duotone", "Duotone Icons", "Two-toned iconic style"),
                ("gradient", "Gradient Icons", "Modern icons with color gradients"),
            ],
        ),
        visual_type(
            "illustrations",
            "Illustrations",
            "Select illustration style",
            &[
                ("flat", "Flat Illustrations", "2D illustrations with solid colors"),
                ("isometric", "Isometric", "3D isometric illustration style"),
                ("3d", "3D Illustrations", "Realistic 3D rendered illustrations"),
                ("minimal", "Minimal", "Simple and clean illustrations"),
            ],
        ),
        visual_type(
            "images",
            "Images",
            "Pick your image style",
            &[
                ("photography", "Photography", "High-quality photographic content"),
                ("abstract", "Abstract", "Artistic and abstract imagery"),
                ("nature", "Nature", "Natural landscapes and organic elements"),
                ("lifestyle", "Lifestyle", "People and lifestyle photography"),
            ],
        ),
    ]
}

fn react_bits(id: &str, title: &str, description: &str, category: &str, deps: &[&str], path: Option<&str>) -> ReactBitsOption {
    ReactBitsOption {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        category: Some(category.into()),
        dependencies: strings(deps),
        cli_command: path.map(|p| format!("npx jsrepo add https://reactbits.dev/ts/tailwind/{p}")),
        code_snippet: None,
        tags: Vec::new(),
    }
}

pub(super) fn backgrounds() -> Vec<ReactBitsOption> {
    vec![
        react_bits("aurora", "Aurora", "Flowing northern-lights gradient rendered in WebGL.", "backgrounds", &["ogl"], Some("Backgrounds/Aurora")),
        react_bits("particles", "Particles", "Drifting particle field that reacts to the cursor.", "backgrounds", &["ogl"], Some("Backgrounds/Particles")),
        react_bits("silk", "Silk", "Soft animated silk texture.", "backgrounds", &["three", "@react-three/fiber"], Some("Backgrounds/Silk")),
        react_bits("dot-grid", "Dot Grid", "Interactive grid of dots with inertia.", "backgrounds", &["gsap"], Some("Backgrounds/DotGrid")),
    ]
}

pub(super) fn components() -> Vec<ReactBitsOption> {
    let mut dock = react_bits("dock", "Dock", "macOS-style magnifying dock menu.", "components", &["framer-motion"], Some("Components/Dock"));
    dock.code_snippet = Some("<Dock items={items} panelHeight={68} baseItemSize={50} magnification={70} />".into());
    vec![
        dock,
        react_bits("animated-list", "Animated List", "List whose items animate in on scroll.", "components", &["framer-motion"], Some("Components/AnimatedList")),
        react_bits("spotlight-card", "Spotlight Card", "Card with a cursor-following spotlight.", "components", &[], Some("Components/SpotlightCard")),
        react_bits("magic-bento", "Magic Bento", "Bento grid with particle and glow effects.", "components", &["gsap"], Some("Components/MagicBento")),
        react_bits("infinite-scroll", "Infinite Scroll", "Vertically looping content scroller.", "components", &["gsap"], Some("Components/InfiniteScroll")),
    ]
}

pub(super) fn animations() -> Vec<ReactBitsOption> {
    vec![
        react_bits("split-text", "Split Text", "Letters animate in one by one.", "text-animations", &["gsap"], Some("TextAnimations/SplitText")),
        react_bits("blur-text", "Blur Text", "Text fades in from a blur.", "text-animations", &["framer-motion"], Some("TextAnimations/BlurText")),
        react_bits("click-spark", "Click Spark", "Sparks burst from every click.", "animations", &[], Some("Animations/ClickSpark")),
        react_bits("fade-in", "Fade In", "Smooth opacity transitions for content reveal", "transitions", &[], None),
        react_bits("slide-up", "Slide Up", "Content slides up from bottom with easing", "transitions", &[], None),
        react_bits("hover-effects", "Hover Effects", "Interactive hover states for buttons and cards", "transitions", &[], None),
        react_bits("page-transitions", "Page Transitions", "Smooth animations between different pages", "transitions", &[], None),
    ]
}
