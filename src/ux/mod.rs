use colored::Colorize;
use humansize::{format_size, DECIMAL};
use std::io::{self, Write};

use crate::catalog::Catalog;
use crate::model::{Identified, WizardStep};
use crate::persist::{LoadOutcome, SaveReport};
use crate::session::Session;
use crate::validate::ValidationReport;

pub const CATALOG_NAMES: [&str; 9] = [
    "layouts",
    "styles",
    "themes",
    "fonts",
    "features",
    "visuals",
    "backgrounds",
    "components",
    "animations",
];

pub fn prompt_line() {
    print!("{} ", "bolt>".cyan().bold());
    let _ = io::stdout().flush();
}

pub fn info(msg: &str) {
    println!("{} {}", "•".cyan(), msg);
}

pub fn warn(msg: &str) {
    println!("{} {}", "!".yellow().bold(), msg);
}

pub fn fail(msg: &str) {
    println!("{} {}", "✗".red().bold(), msg);
}

pub fn print_load_outcome(outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Empty => info("No saved project; starting fresh."),
        LoadOutcome::Restored { saved_at: Some(at) } => {
            info(&format!("Restored project saved {}", at.format("%Y-%m-%d %H:%M:%S UTC")))
        }
        LoadOutcome::Restored { saved_at: None } => info("Restored saved project."),
        LoadOutcome::Discarded { reason } => warn(&format!("Saved project was unreadable and has been reset ({reason})")),
        LoadOutcome::Unavailable { reason } => warn(&format!("Saved project could not be read ({reason})")),
    }
}

pub fn print_save_report(report: Option<&SaveReport>) {
    match report {
        Some(r) => println!(
            "{} saved {} at {}",
            "✓".green().bold(),
            format_size(r.bytes, DECIMAL),
            r.saved_at.format("%H:%M:%S")
        ),
        None => fail("Save failed; see log for details."),
    }
}

fn progress_bar(pct: u8) -> String {
    let filled = usize::from(pct) / 5;
    format!("[{}{}] {:>3}%", "█".repeat(filled), "·".repeat(20 - filled), pct)
}

fn titles<T>(items: &[T], title: impl Fn(&T) -> &str) -> String {
    if items.is_empty() {
        return "-".dimmed().to_string();
    }
    items.iter().map(title).collect::<Vec<_>>().join(", ")
}

fn or_dash(v: Option<&str>) -> String {
    v.map(str::to_string).unwrap_or_else(|| "-".dimmed().to_string())
}

pub fn show_status(session: &Session) {
    let store = session.store();
    let info = store.project_info();
    let t = store.typography();

    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━━━━━ Project ━━━━━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    println!("  {}: {}", "Step".bold(), step_trail(store.current_step()));
    println!("  {}: {}", "Progress".bold(), progress_bar(session.progress()));
    println!(
        "  {}: {}   {}: {}   {}: {}",
        "Name".bold(),
        or_dash(Some(&info.name).filter(|n| !n.is_empty()).map(String::as_str)),
        "Type".bold(),
        info.kind,
        "Purpose".bold(),
        or_dash(Some(&info.purpose).filter(|p| !p.is_empty()).map(String::as_str))
    );
    println!("  {}: {}", "Layout".bold(), or_dash(store.layout().map(|l| l.title.as_str())));
    println!("  {}: {}", "Special".bold(), titles(store.special_layouts(), |l| l.title.as_str()));
    println!("  {}: {}", "Style".bold(), or_dash(store.design_style().map(|s| s.title.as_str())));
    println!("  {}: {}", "Theme".bold(), or_dash(store.color_theme().map(|c| c.title.as_str())));
    println!("  {}: {} {}/{}", "Typography".bold(), t.font_family, t.heading_weight, t.body_weight);
    println!("  {}: {}", "Visuals".bold(), titles(store.visuals(), |v| v.style.as_str()));
    println!("  {}: {}", "Features".bold(), titles(store.functionality(), |f| f.title.as_str()));
    println!("  {}: {}", "Background".bold(), or_dash(store.background().map(|b| b.title.as_str())));
    println!("  {}: {}", "Components".bold(), titles(store.components(), |c| c.title.as_str()));
    println!("  {}: {}", "Animations".bold(), titles(store.animations(), |a| a.title.as_str()));
    println!(
        "  {}: {}   {}: {}",
        "Undo".bold(),
        yes_no(session.can_undo()),
        "Redo".bold(),
        yes_no(session.can_redo())
    );
    println!("{}", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold());
}

fn yes_no(b: bool) -> colored::ColoredString {
    if b {
        "yes".green()
    } else {
        "no".dimmed()
    }
}

fn step_trail(current: WizardStep) -> String {
    WizardStep::ALL
        .iter()
        .map(|s| if *s == current { s.id().yellow().bold().to_string() } else { s.id().dimmed().to_string() })
        .collect::<Vec<_>>()
        .join(" › ")
}

pub fn print_prompt(text: &str) {
    println!("\n{}", "=== PROMPT ===".bold());
    println!("{text}\n");
}

pub fn print_validation(report: &ValidationReport) {
    if report.is_valid() {
        println!("{} project info is valid", "✓".green().bold());
        return;
    }
    for (field, msgs) in &report.errors {
        for m in msgs {
            println!("{} {}: {}", "✗".red().bold(), field.bold(), m);
        }
    }
}

fn rows<T: Identified>(items: &[T], title: impl Fn(&T) -> String) {
    for item in items {
        println!("  {:<22} {}", item.id().cyan(), title(item));
    }
}

/// Returns false when `name` is not a catalog.
pub fn print_catalog(catalog: &Catalog, name: &str) -> bool {
    match name {
        "layouts" => rows(&catalog.layouts, |l| {
            let kind = l.category.map(|c| format!(" ({c:?})").to_lowercase()).unwrap_or_default();
            format!("{}{}", l.title, kind)
        }),
        "styles" => rows(&catalog.design_styles, |s| s.title.clone()),
        "themes" => rows(&catalog.color_themes, |c| format!("{}  {}", c.title, c.colors.join(" ").dimmed())),
        "fonts" => rows(&catalog.fonts, |f| format!("{}  {}", f.name, f.family.dimmed())),
        "features" => rows(&catalog.functionality, |f| f.title.clone()),
        "visuals" => {
            for vt in &catalog.visual_types {
                let styles = vt.options.iter().map(|o| o.id.as_str()).collect::<Vec<_>>().join(", ");
                println!("  {:<22} {}  {}", vt.id.cyan(), vt.title, styles.dimmed());
            }
        }
        "backgrounds" => rows(&catalog.backgrounds, |b| b.title.clone()),
        "components" => rows(&catalog.components, |c| c.title.clone()),
        "animations" => rows(&catalog.animations, |a| a.title.clone()),
        _ => return false,
    }
    true
}

pub fn print_help() {
    let lines = [
        ("show", "current selections and progress"),
        ("step <id>", "jump to a wizard step"),
        ("name|description|type|purpose|audience|goals <text>", "edit project info"),
        ("layout|style|theme|font <id>", "pick a single option"),
        ("special|feature|component|animation <id>", "toggle a list option"),
        ("visual <type> <style>", "toggle a visual element"),
        ("background <id|none>", "pick or clear the background"),
        ("typo <field> <value>", "set a typography field"),
        ("undo | redo", "walk the edit history"),
        ("save | clear", "write or delete the saved project"),
        ("prompt [basic|detailed]", "generate the prompt"),
        ("validate", "check the project-setup fields"),
        ("list <catalog>", "list catalog entries"),
        ("quit", "save pending changes and exit"),
    ];
    for (cmd, what) in lines {
        println!("  {:<52} {}", cmd.bold(), what);
    }
    println!("  catalogs: {}", CATALOG_NAMES.join(", ").dimmed());
}
