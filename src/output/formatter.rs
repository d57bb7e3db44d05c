//! Output formatters for match reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::analyzer::MatchReport;
use colored::Colorize;

/// Console formatter with optional color
pub struct ConsoleFormatter {
    pub use_colors: bool,
}

/// JSON formatter for structured consumers
pub struct JsonFormatter {
    pub pretty: bool,
}

impl ConsoleFormatter {
    pub fn format_report(&self, report: &MatchReport) -> String {
        let mut out = String::new();

        out.push_str(&self.heading("Resume Fit Analysis"));
        out.push('\n');

        out.push_str(&format!(
            "Overall Score: {}\n",
            self.score_badge(report.overall_score)
        ));
        out.push_str(&format!(
            "  Keyword Match:       {:.1}%\n",
            report.keyword_match_score * 100.0
        ));
        out.push_str(&format!(
            "  Semantic Similarity: {:.1}%\n",
            report.semantic_similarity_score * 100.0
        ));

        out.push('\n');
        out.push_str(&self.heading("Keywords"));
        out.push_str(&format!(
            "  Resume: {}\n",
            report.resume_keywords.join(", ")
        ));
        out.push_str(&format!(
            "  Job Description: {}\n",
            report.jd_keywords.join(", ")
        ));

        out.push('\n');
        out.push_str(&self.heading("Feedback"));
        for (category, messages) in &report.feedback {
            out.push_str(&format!("  {}:\n", self.category_label(&category.to_string())));
            for message in messages {
                out.push_str(&format!("    - {}\n", message));
            }
        }

        if !report.degraded_components.is_empty() {
            out.push('\n');
            let notice = format!(
                "Note: degraded components this run: {}",
                report.degraded_components.join(", ")
            );
            if self.use_colors {
                out.push_str(&format!("{}\n", notice.yellow()));
            } else {
                out.push_str(&format!("{}\n", notice));
            }
        }

        out.push('\n');
        out.push_str(&format!(
            "Model: {} | Generated: {} | {}ms\n",
            report.embedding_model,
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.processing_time_ms
        ));

        out
    }

    fn heading(&self, text: &str) -> String {
        if self.use_colors {
            format!("{}\n", text.bold().underline())
        } else {
            format!("{}\n", text)
        }
    }

    fn category_label(&self, label: &str) -> String {
        if self.use_colors {
            label.cyan().to_string()
        } else {
            label.to_string()
        }
    }

    fn score_badge(&self, score: f32) -> String {
        let text = format!("{:.1}/100", score);
        if !self.use_colors {
            return text;
        }
        if score >= 75.0 {
            text.green().bold().to_string()
        } else if score >= 50.0 {
            text.yellow().bold().to_string()
        } else {
            text.red().bold().to_string()
        }
    }
}

impl JsonFormatter {
    pub fn format_report(&self, report: &MatchReport) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(rendered)
    }
}

/// Render a report in the requested format
pub fn format_report(report: &MatchReport, format: &OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(ConsoleFormatter { use_colors: color }.format_report(report)),
        OutputFormat::Json => JsonFormatter { pretty: true }.format_report(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::analyzer::MatchEngine;
    use crate::processing::document::Document;
    use crate::processing::embeddings::EmbeddingEngine;

    fn sample_report() -> MatchReport {
        let config = Config::default();
        let engine =
            MatchEngine::with_embedding_engine(&config, EmbeddingEngine::unavailable()).unwrap();
        engine.analyze(
            &Document::resume("Python developer with Django and REST API experience"),
            &Document::job_description("Hiring a Python engineer for Django web services"),
        )
    }

    #[test]
    fn test_console_format_plain() {
        let report = sample_report();
        let formatter = ConsoleFormatter { use_colors: false };

        let rendered = formatter.format_report(&report);

        assert!(rendered.contains("Overall Score"));
        assert!(rendered.contains("Keyword Match"));
        assert!(rendered.contains("Feedback"));
        assert!(rendered.contains("python"));
    }

    #[test]
    fn test_json_format_round_trip() {
        let report = sample_report();
        let formatter = JsonFormatter { pretty: true };

        let rendered = formatter.format_report(&report).unwrap();
        let parsed: MatchReport = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed.overall_score, report.overall_score);
        assert_eq!(parsed.resume_keywords, report.resume_keywords);
        assert_eq!(parsed.feedback, report.feedback);
    }

    #[test]
    fn test_json_uses_snake_case_categories() {
        let report = sample_report();
        let formatter = JsonFormatter { pretty: false };

        let rendered = formatter.format_report(&report).unwrap();

        assert!(rendered.contains("\"overall_summary\""));
    }
}
