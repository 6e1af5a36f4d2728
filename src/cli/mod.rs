use clap::{Parser, Subcommand};

mod repl;

pub use repl::{Flow, Repl};

use crate::config::StorageBackend;
use crate::prompt::PromptVariant;

#[derive(Parser, Debug)]
#[command(name = "bolt-builder", version, about = "Website-builder wizard that turns selections into a code-generation prompt")]
pub struct Args {
    /// TOML config file; flags below override it.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, value_enum)]
    pub backend: Option<StorageBackend>,

    /// Directory (file backend) or database path (sqlite backend).
    #[arg(long)]
    pub data_path: Option<String>,

    #[arg(long)]
    pub key: Option<String>,

    /// YAML or JSON catalog overlay.
    #[arg(long)]
    pub catalog: Option<String>,

    /// Print the prompt for the saved project and exit.
    #[arg(long, value_parser = parse_variant)]
    pub render: Option<PromptVariant>,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

fn parse_variant(s: &str) -> Result<PromptVariant, String> {
    PromptVariant::parse(s).ok_or_else(|| format!("unknown prompt variant `{s}` (basic|detailed)"))
}

/// One line typed at the session prompt.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true, disable_help_subcommand = true, disable_version_flag = true)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: ReplCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Current selections and progress.
    Show,
    /// Jump to a wizard step by id.
    Step { id: String },
    Name { #[arg(trailing_var_arg = true, allow_hyphen_values = true)] words: Vec<String> },
    Description { #[arg(trailing_var_arg = true, allow_hyphen_values = true)] words: Vec<String> },
    Type { #[arg(trailing_var_arg = true)] words: Vec<String> },
    Purpose { #[arg(trailing_var_arg = true, allow_hyphen_values = true)] words: Vec<String> },
    Audience { #[arg(trailing_var_arg = true, allow_hyphen_values = true)] words: Vec<String> },
    Goals { #[arg(trailing_var_arg = true, allow_hyphen_values = true)] words: Vec<String> },
    Layout { id: String },
    /// Toggle a special layout element.
    Special { id: String },
    Style { id: String },
    Theme { id: String },
    Font { id: String },
    Typo { field: String, #[arg(trailing_var_arg = true)] value: Vec<String> },
    /// Toggle a visual element.
    Visual { kind: String, style: String },
    /// Toggle a functionality option.
    Feature { id: String },
    /// Pick a background, or `none` to clear it.
    Background { id: String },
    Component { id: String },
    Animation { id: String },
    Undo,
    Redo,
    Save,
    Clear,
    Prompt { #[arg(value_parser = parse_variant)] variant: Option<PromptVariant> },
    Validate,
    List { catalog: String },
    #[command(alias = "exit")]
    Quit,
    Help,
}

impl ReplLine {
    pub fn parse_line(line: &str) -> Result<ReplCommand, clap::Error> {
        Self::try_parse_from(line.split_whitespace()).map(|l| l.command)
    }
}

pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_text_commands_keep_all_words() {
        let cmd = ReplLine::parse_line("description A studio site - fast").unwrap();
        match cmd {
            ReplCommand::Description { words } => assert_eq!(join_words(&words), "A studio site - fast"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn visual_takes_kind_and_style() {
        let cmd = ReplLine::parse_line("visual icons line").unwrap();
        assert_eq!(cmd, ReplCommand::Visual { kind: "icons".into(), style: "line".into() });
    }

    #[test]
    fn prompt_variant_is_optional() {
        assert_eq!(ReplLine::parse_line("prompt").unwrap(), ReplCommand::Prompt { variant: None });
        assert_eq!(
            ReplLine::parse_line("prompt basic").unwrap(),
            ReplCommand::Prompt { variant: Some(PromptVariant::Basic) }
        );
        assert!(ReplLine::parse_line("prompt fancy").is_err());
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(ReplLine::parse_line("launch rockets").is_err());
        assert_eq!(ReplLine::parse_line("exit").unwrap(), ReplCommand::Quit);
    }
}
