use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;
use tracing::debug;

use crate::catalog::Catalog;
use crate::cli::{join_words, ReplCommand, ReplLine};
use crate::model::{BackgroundKind, BackgroundSelection, ProjectType, Typography, WizardStep};
use crate::session::Session;
use crate::ux;
use crate::validate::validate_project_info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Applies parsed session commands against the catalog.
#[derive(Debug)]
pub struct Repl {
    pub session: Session,
    pub catalog: Catalog,
}

fn unknown(what: &str, id: &str) {
    ux::warn(&format!("unknown {what} `{id}` (try `list`)"));
}

fn set_typography_field(t: &mut Typography, field: &str, value: String) -> bool {
    match field {
        "family" | "font" => t.font_family = value,
        "heading-weight" => t.heading_weight = value,
        "body-weight" => t.body_weight = value,
        "align" | "alignment" => t.text_alignment = value,
        "heading-size" => t.heading_size = value,
        "body-size" => t.body_size = value,
        "line-height" => t.line_height = value,
        _ => return false,
    }
    true
}

impl Repl {
    pub fn new(session: Session, catalog: Catalog) -> Self {
        Self { session, catalog }
    }

    /// Handles one input line. Blank lines are ignored; parse errors are
    /// reported and the session keeps going.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }
        match ReplLine::parse_line(line) {
            Ok(cmd) => self.handle(cmd),
            Err(e) => {
                ux::fail(e.to_string().lines().next().unwrap_or("invalid command"));
                Flow::Continue
            }
        }
    }

    /// Waits up to `poll` for the next line from the reader thread. The
    /// session timers are ticked on every wake-up, so a quiet terminal still
    /// records history and autosaves. A closed channel is end of input.
    pub fn pump(&mut self, lines: &Receiver<String>, poll: Duration) -> Flow {
        match lines.recv_timeout(poll) {
            Ok(line) => {
                self.session.tick();
                let flow = self.handle_line(&line);
                if flow == Flow::Continue {
                    ux::prompt_line();
                }
                flow
            }
            Err(RecvTimeoutError::Timeout) => {
                self.session.tick();
                Flow::Continue
            }
            Err(RecvTimeoutError::Disconnected) => self.handle(ReplCommand::Quit),
        }
    }

    pub fn handle(&mut self, cmd: ReplCommand) -> Flow {
        debug!(?cmd, "command");
        let Self { session, catalog } = self;
        match cmd {
            ReplCommand::Show => ux::show_status(session),
            ReplCommand::Step { id } => match WizardStep::from_id(&id) {
                Some(step) => {
                    let leaving_setup = session.store().current_step() == WizardStep::ProjectSetup
                        && step != WizardStep::ProjectSetup;
                    let report = validate_project_info(session.store().project_info());
                    if leaving_setup && !report.is_valid() {
                        ux::print_validation(&report);
                        ux::warn("finish project setup before moving on");
                    } else {
                        session.edit(|s| s.set_current_step(step));
                    }
                }
                None => unknown("step", &id),
            },
            ReplCommand::Name { words } => session.edit(|s| s.update_project_info(|p| p.name = join_words(&words))),
            ReplCommand::Description { words } => {
                session.edit(|s| s.update_project_info(|p| p.description = join_words(&words)))
            }
            ReplCommand::Type { words } => {
                let label = join_words(&words);
                match ProjectType::from_label(&label) {
                    Some(kind) => session.edit(|s| s.update_project_info(|p| p.kind = kind)),
                    None => unknown("project type", &label),
                }
            }
            ReplCommand::Purpose { words } => {
                session.edit(|s| s.update_project_info(|p| p.purpose = join_words(&words)))
            }
            ReplCommand::Audience { words } => {
                session.edit(|s| s.update_project_info(|p| p.target_audience = join_words(&words)))
            }
            ReplCommand::Goals { words } => session.edit(|s| s.update_project_info(|p| p.goals = join_words(&words))),
            ReplCommand::Layout { id } => match catalog.layout(&id) {
                Some(l) => session.edit(|s| s.set_layout(Some(l.clone()))),
                None => unknown("layout", &id),
            },
            ReplCommand::Special { id } => match catalog.layout(&id) {
                Some(l) => session.edit(|s| s.toggle_special_layout(l.clone())),
                None => unknown("layout", &id),
            },
            ReplCommand::Style { id } => match catalog.design_style(&id) {
                Some(d) => session.edit(|s| s.set_design_style(Some(d.clone()))),
                None => unknown("design style", &id),
            },
            ReplCommand::Theme { id } => match catalog.color_theme(&id) {
                Some(c) => session.edit(|s| s.set_color_theme(Some(c.clone()))),
                None => unknown("color theme", &id),
            },
            ReplCommand::Font { id } => match catalog.font(&id) {
                Some(f) => {
                    let family = f.family.clone();
                    session.edit(|s| s.update_typography(|t| t.font_family = family));
                }
                None => unknown("font", &id),
            },
            ReplCommand::Typo { field, value } => {
                let value = join_words(&value);
                let mut t = session.store().typography().clone();
                if set_typography_field(&mut t, &field, value) {
                    session.edit(|s| s.set_typography(t));
                } else {
                    unknown("typography field", &field);
                }
            }
            ReplCommand::Visual { kind, style } => match catalog.visual(&kind, &style) {
                Some(v) => session.edit(|s| s.toggle_visual(v)),
                None => unknown("visual", &format!("{kind} {style}")),
            },
            ReplCommand::Feature { id } => match catalog.functionality_option(&id) {
                Some(f) => session.edit(|s| s.toggle_functionality(f.clone())),
                None => unknown("feature", &id),
            },
            ReplCommand::Background { id } if id == "none" => session.edit(|s| {
                s.set_background(None);
                s.set_background_selection(None);
            }),
            ReplCommand::Background { id } => match catalog.background(&id) {
                Some(b) => {
                    let selection = BackgroundSelection { kind: BackgroundKind::ReactBits, value: b.id.clone(), opacity: None };
                    let b = b.clone();
                    session.edit(|s| {
                        s.set_background(Some(b));
                        s.set_background_selection(Some(selection));
                    })
                }
                None => unknown("background", &id),
            },
            ReplCommand::Component { id } => match catalog.component(&id) {
                Some(c) => session.edit(|s| s.toggle_component(c.clone())),
                None => unknown("component", &id),
            },
            ReplCommand::Animation { id } => match catalog.animation(&id) {
                Some(a) => session.edit(|s| s.toggle_animation(a.clone())),
                None => unknown("animation", &id),
            },
            ReplCommand::Undo => {
                if !session.undo() {
                    ux::info("nothing to undo");
                }
            }
            ReplCommand::Redo => {
                if !session.redo() {
                    ux::info("nothing to redo");
                }
            }
            ReplCommand::Save => {
                let report = session.save_project();
                ux::print_save_report(report.as_ref());
            }
            ReplCommand::Clear => {
                session.clear_project();
                ux::info("project cleared");
            }
            ReplCommand::Prompt { variant } => ux::print_prompt(session.render_prompt(variant)),
            ReplCommand::Validate => ux::print_validation(&validate_project_info(session.store().project_info())),
            ReplCommand::List { catalog: name } => {
                if !ux::print_catalog(catalog, &name) {
                    unknown("catalog", &name);
                }
            }
            ReplCommand::Help => ux::print_help(),
            ReplCommand::Quit => {
                if let Some(report) = session.flush().saved {
                    ux::print_save_report(Some(&report));
                }
                session.shutdown();
                return Flow::Quit;
            }
        }
        Flow::Continue
    }
}
