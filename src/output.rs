//! @ai:module:intent Format metric reports for different formats (JSON, text)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_report
//! @ai:module:depends_on metrics
//! @ai:module:stateless true

use crate::metrics::{resolve_indicator, MetricReport};
use colored::Colorize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format a report as a string
/// @ai:effects pure
pub fn format_report(report: &MetricReport, main_indicator: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Text => format_report_text(report, main_indicator),
    }
}

/// @ai:intent Format a report as aligned text with the primary indicator highlighted
/// @ai:effects pure
fn format_report_text(report: &MetricReport, main_indicator: &str) -> String {
    let main_key = resolve_indicator(main_indicator, report).ok();
    let width = report.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut output = String::new();

    for (key, value) in report.iter() {
        let line = format!("{:<width$}  {:.4}", key, value, width = width);
        if main_key.as_deref() == Some(key) {
            output.push_str(&format!("{} {}\n", line.green().bold(), "*".green()));
        } else {
            output.push_str(&format!("{}\n", line));
        }
    }

    if main_key.is_none() {
        output.push_str(&format!(
            "{} primary indicator '{}' not found in report\n",
            "WARN".yellow().bold(),
            main_indicator
        ));
    }

    output
}
