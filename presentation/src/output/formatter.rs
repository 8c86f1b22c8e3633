//! Output formatter trait

use verse_rag_application::AskOutput;
use verse_rag_domain::OutputFormat;

/// Trait for formatting answered questions
pub trait OutputFormatter {
    /// Format the answer followed by the retrieved verses
    fn format(&self, output: &AskOutput) -> String;

    /// Format as JSON
    fn format_json(&self, output: &AskOutput) -> String;

    /// Format the answer only (concise output)
    fn format_answer_only(&self, output: &AskOutput) -> String;

    /// Dispatch on the configured format
    fn render(&self, output: &AskOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.format(output),
            OutputFormat::Answer => self.format_answer_only(output),
            OutputFormat::Json => self.format_json(output),
        }
    }
}
