//! Output formatters: console, JSON, and markdown renderings of a report

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::ScoreReport;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering score reports.
pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and score badges.
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and API integration.
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharable reports.
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Coordinates the individual formatters behind a single entry point.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!(
                "\n{} {}\n",
                prefix.color(color).bold(),
                title.color(color).bold()
            )
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f32) -> String {
        let (badge, color) = if score >= 80.0 {
            ("EXCELLENT", Color::Green)
        } else if score >= 60.0 {
            ("GOOD", Color::Yellow)
        } else if score >= 40.0 {
            ("FAIR", Color::BrightYellow)
        } else {
            ("NEEDS WORK", Color::Red)
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME SCORE REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.processing_time_ms
        ));

        output.push_str(&self.format_header("Executive Summary", 2));
        output.push_str(&format!(
            "Match Score: {:.2}% {}\n",
            report.match_score,
            self.format_score_badge(report.match_score)
        ));
        output.push_str(&format!(
            "ATS Score: {:.2}% {}\n",
            report.ats_score,
            self.format_score_badge(report.ats_score)
        ));
        output.push_str(&format!(
            "Analysis method: {}\n",
            self.colorize(&report.analysis_method.to_string(), Color::Cyan)
        ));

        output.push_str(&self.format_header("Score Breakdown", 3));
        output.push_str(&format!(
            "🔍 Keyword Similarity: {:.2}%\n",
            report.match_breakdown.keyword_similarity
        ));
        output.push_str(&format!(
            "📝 Text Similarity: {:.2}%\n",
            report.match_breakdown.text_similarity
        ));
        output.push_str(&format!(
            "🛠️ Skill Match: {:.2}%\n",
            report.match_breakdown.skill_match
        ));

        output.push_str(&self.format_header("Skills", 3));
        let matched = &report.skill_analysis.matched;
        let missing = &report.skill_analysis.missing;
        output.push_str(&format!(
            "Matched {} of {} job skills ({:.2}%)\n",
            matched.len(),
            matched.len() + missing.len(),
            report.skill_analysis.match_percentage
        ));
        if !matched.is_empty() {
            output.push_str(&format!(
                "✅ Matched: {}\n",
                self.colorize(&matched.join(", "), Color::Green)
            ));
        }
        if !missing.is_empty() {
            output.push_str(&format!(
                "❌ Missing: {}\n",
                self.colorize(&missing.join(", "), Color::Red)
            ));
        }

        if !report.recommendations.strengths.is_empty() {
            output.push_str(&self.format_header("💪 Strengths", 2));
            for strength in &report.recommendations.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        if !report.recommendations.weaknesses.is_empty() {
            output.push_str(&self.format_header("⚠️ Weaknesses", 2));
            for weakness in &report.recommendations.weaknesses {
                output.push_str(&format!("  • {}\n", self.colorize(weakness, Color::Yellow)));
            }
        }

        if !report.recommendations.action_items.is_empty() {
            output.push_str(&self.format_header("📋 Action Items", 2));
            for (i, item) in report.recommendations.action_items.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, item));
            }
        }

        if !report.llm_analysis.is_empty() {
            output.push_str(&self.format_header("🤖 AI Analysis", 2));
            if !report.llm_analysis.overall_impression.is_empty() {
                output.push_str(&format!(
                    "{} {}\n",
                    self.colorize("Impression:", Color::Cyan),
                    report.llm_analysis.overall_impression
                ));
            }
            for strength in &report.llm_analysis.strengths {
                output.push_str(&format!("  + {}\n", self.colorize(strength, Color::Green)));
            }
            for area in &report.llm_analysis.improvement_areas {
                output.push_str(&format!("  - {}\n", self.colorize(area, Color::Yellow)));
            }
            for insight in &report.llm_analysis.action_insights {
                output.push_str(&format!("  → {}\n", insight));
            }
        }

        if !report.skill_suggestions.is_empty() {
            output.push_str(&self.format_header("💡 Skill Suggestions", 2));
            for suggestion in &report.skill_suggestions {
                output.push_str(&format!("  • {}\n", suggestion));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("📊 Detailed Analysis", 2));
            output.push_str(&format!(
                "Job keywords ({}): {}\n",
                report.job_keywords.len(),
                report.job_keywords.join(", ")
            ));
            output.push_str(&format!(
                "Matched keywords ({}): {}\n",
                report.match_breakdown.matched_keywords.len(),
                report.match_breakdown.matched_keywords.join(", ")
            ));
            for (category, skills) in &report.skill_analysis.resume_skills.categories {
                output.push_str(&format!("Resume {}: {}\n", category, skills.join(", ")));
            }
            output.push_str(&format!(
                "Scorer version: {}\n",
                report.scorer_version
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: f32) -> &'static str {
        if score >= 80.0 {
            "🟢 Excellent"
        } else if score >= 60.0 {
            "🟡 Good"
        } else if score >= 40.0 {
            "🟠 Fair"
        } else {
            "🔴 Needs Work"
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📊 Resume Score Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms | **Version:** {}\n\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.processing_time_ms,
                report.scorer_version
            ));
        }

        output.push_str("## Executive Summary\n\n");
        output.push_str(&format!(
            "**Match Score:** {:.2}% {}\n\n",
            report.match_score,
            Self::markdown_score_badge(report.match_score)
        ));
        output.push_str(&format!(
            "**ATS Score:** {:.2}% {}\n\n",
            report.ats_score,
            Self::markdown_score_badge(report.ats_score)
        ));
        output.push_str(&format!(
            "**Analysis Method:** `{}`\n\n",
            report.analysis_method
        ));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        output.push_str(&format!(
            "| 🔍 Keyword Similarity | {:.2}% |\n",
            report.match_breakdown.keyword_similarity
        ));
        output.push_str(&format!(
            "| 📝 Text Similarity | {:.2}% |\n",
            report.match_breakdown.text_similarity
        ));
        output.push_str(&format!(
            "| 🛠️ Skill Match | {:.2}% |\n",
            report.match_breakdown.skill_match
        ));
        output.push('\n');

        output.push_str("### Skills\n\n");
        if !report.skill_analysis.matched.is_empty() {
            output.push_str(&format!(
                "**Matched ({}):** `{}`\n\n",
                report.skill_analysis.matched.len(),
                report.skill_analysis.matched.join("`, `")
            ));
        }
        if !report.skill_analysis.missing.is_empty() {
            output.push_str(&format!(
                "**Missing ({}):** `{}`\n\n",
                report.skill_analysis.missing.len(),
                report.skill_analysis.missing.join("`, `")
            ));
        }

        if !report.recommendations.strengths.is_empty() {
            output.push_str("### 💪 Strengths\n\n");
            for strength in &report.recommendations.strengths {
                output.push_str(&format!("- {}\n", strength));
            }
            output.push('\n');
        }

        if !report.recommendations.weaknesses.is_empty() {
            output.push_str("### ⚠️ Weaknesses\n\n");
            for weakness in &report.recommendations.weaknesses {
                output.push_str(&format!("- {}\n", weakness));
            }
            output.push('\n');
        }

        if !report.recommendations.action_items.is_empty() {
            output.push_str("### 📋 Action Items\n\n");
            for (i, item) in report.recommendations.action_items.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, item));
            }
            output.push('\n');
        }

        if !report.llm_analysis.is_empty() {
            output.push_str("## 🤖 AI Analysis\n\n");
            if !report.llm_analysis.overall_impression.is_empty() {
                output.push_str(&format!(
                    "**Overall Impression:** {}\n\n",
                    report.llm_analysis.overall_impression
                ));
            }
            for strength in &report.llm_analysis.strengths {
                output.push_str(&format!("- ✅ {}\n", strength));
            }
            for area in &report.llm_analysis.improvement_areas {
                output.push_str(&format!("- 🎯 {}\n", area));
            }
            for insight in &report.llm_analysis.action_insights {
                output.push_str(&format!("- 💡 {}\n", insight));
            }
            output.push('\n');
        }

        if !report.skill_suggestions.is_empty() {
            output.push_str("### 💡 Skill Suggestions\n\n");
            for suggestion in &report.skill_suggestions {
                output.push_str(&format!("- {}\n", suggestion));
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &ScoreReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_score{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_score{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_score{}.md", base_name, timestamp_suffix),
    }
}
