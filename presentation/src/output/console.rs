//! Console output formatter for answers and retrieved verses

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use verse_rag_application::AskOutput;
use verse_rag_domain::ContextBundle;

/// Formats answers for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the answer followed by the directly retrieved verses
    pub fn format(output: &AskOutput) -> String {
        let mut text = Self::format_answer_only(output);

        if let Some(reason) = &output.context_unavailable {
            text.push_str(&format!(
                "\n{} {}\n",
                "Context unavailable:".yellow().bold(),
                reason
            ));
        } else {
            text.push('\n');
            text.push_str(&Self::format_context(&output.bundle));
        }

        text
    }

    /// Format as JSON
    pub fn format_json(output: &AskOutput) -> String {
        let mut value = serde_json::json!({
            "response": output.response,
            "direct_hits": output.bundle.direct_hits(),
            "expanded_groups": output.bundle.expanded_groups(),
        });
        if let (Some(reason), Some(map)) = (&output.context_unavailable, value.as_object_mut()) {
            map.insert("context_unavailable".to_string(), reason.clone().into());
        }
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the answer only
    pub fn format_answer_only(output: &AskOutput) -> String {
        format!("{}\n{}\n", "Response:".cyan().bold(), output.response)
    }

    /// Format the verses of a bundle under a section header
    pub fn format_context(bundle: &ContextBundle) -> String {
        if bundle.is_empty() {
            return format!("{}\n", "No verses retrieved.".dimmed());
        }
        format!(
            "{}\n{}\n",
            Self::section_header(&format!("Retrieved Context ({} verses)", bundle.hit_count())),
            Self::indent(&bundle.direct_hits_text(), "  ")
        )
    }

    /// Format the expanded windows, one block per hit
    pub fn format_expanded(bundle: &ContextBundle) -> String {
        let mut text = Self::section_header("Expanded Context");
        for (i, group) in bundle.expanded_groups().iter().enumerate() {
            text.push_str(&format!(
                "\n{}\n{}\n",
                format!("── window {} ──", i + 1).yellow().bold(),
                Self::indent(&group.join("\n"), "  ")
            ));
        }
        text
    }

    fn section_header(title: &str) -> String {
        format!("{}\n{}", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, output: &AskOutput) -> String {
        Self::format(output)
    }

    fn format_json(&self, output: &AskOutput) -> String {
        Self::format_json(output)
    }

    fn format_answer_only(&self, output: &AskOutput) -> String {
        Self::format_answer_only(output)
    }
}
