use anyhow::{Context, Result};
use colored::Colorize;
use suspect_common::{Diagnostic, DiagnosticCategory};

use crate::args::OutputFormat;

pub struct Reporter {
    format: OutputFormat,
    color: bool,
}

impl Reporter {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Reporter { format, color }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(diagnostics).context("failed to serialize diagnostics")
            }
            OutputFormat::Text => Ok(diagnostics
                .iter()
                .map(|diagnostic| self.format_diagnostic(diagnostic))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// `file:start: warning[code]: message`
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let file = if diagnostic.file.is_empty() {
            "<unknown>"
        } else {
            diagnostic.file.as_str()
        };
        let location = format!("{}:{}", file, diagnostic.start);
        let location = if self.color {
            location.bold().to_string()
        } else {
            location
        };

        format!(
            "{}: {}{}: {}",
            location,
            self.format_category(diagnostic.category),
            self.format_code(diagnostic.code),
            diagnostic.message_text
        )
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }

        let label = format!("[{code}]");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod tests;
