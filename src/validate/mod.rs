use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::errors::{BuilderError, Result};
use crate::model::ProjectInfo;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9\s\-_]+$").unwrap());

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 50;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 500;

/// Field name (wire spelling) to the messages raised against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field(&self, name: &str) -> &[String] {
        self.errors.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    fn push(&mut self, field: &str, msg: impl Into<String>) {
        self.errors.entry(field.to_string()).or_default().push(msg.into());
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let joined = self
            .errors
            .iter()
            .map(|(field, msgs)| format!("{field}: {}", msgs.join("; ")))
            .collect::<Vec<_>>()
            .join(", ");
        Err(BuilderError::Validation(joined))
    }
}

/// Checks the project-setup form. The store accepts anything; this is only
/// consulted before leaving the first step.
pub fn validate_project_info(info: &ProjectInfo) -> ValidationReport {
    let mut report = ValidationReport::default();

    let name_len = info.name.chars().count();
    if name_len < NAME_MIN {
        report.push("name", format!("Project name must be at least {NAME_MIN} characters"));
    }
    if name_len > NAME_MAX {
        report.push("name", format!("Project name must be less than {NAME_MAX} characters"));
    }
    if !NAME_PATTERN.is_match(&info.name) {
        report.push("name", "Project name can only contain letters, numbers, spaces, hyphens, and underscores");
    }

    let desc_len = info.description.chars().count();
    if desc_len < DESCRIPTION_MIN {
        report.push("description", format!("Description must be at least {DESCRIPTION_MIN} characters"));
    }
    if desc_len > DESCRIPTION_MAX {
        report.push("description", format!("Description must be less than {DESCRIPTION_MAX} characters"));
    }

    if info.purpose.is_empty() {
        report.push("purpose", "Purpose is required");
    }

    report
}
