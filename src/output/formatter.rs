//! Output formatters: console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::{Result, SkillGapError};
use crate::output::report::*;
use crate::processing::learning_plan::{PlanSource, ResourceLink, SkillPlan};
use crate::processing::pipeline::SkillAnalysis;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Standalone HTML page
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

fn plan_source_label(source: PlanSource) -> &'static str {
    match source {
        PlanSource::Curated => "curated roadmap",
        PlanSource::Generic => "generic plan",
    }
}

fn joined_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn format_timestamp(report: &AnalysisReport) -> String {
    report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Missing skill with any near-miss resume skills appended
fn describe_missing(analysis: &SkillAnalysis, skill: &str) -> String {
    match analysis.related_skills.get(skill) {
        Some(related) => format!("{} (related on resume: {})", skill, related.join(", ")),
        None => skill.to_string(),
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
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
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, rating: MatchRating) -> String {
        let color = match rating {
            MatchRating::Strong => Color::Green,
            MatchRating::Good => Color::BrightGreen,
            MatchRating::Partial => Color::Yellow,
            MatchRating::Weak => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", rating.label().color(color).bold())
        } else {
            format!("[{}]", rating.label())
        }
    }

    fn format_plan_entry(&self, index: usize, entry: &SkillPlan) -> String {
        let mut output = format!(
            "{}. {} ({})\n",
            index + 1,
            self.colorize(&entry.skill.to_uppercase(), Color::Cyan),
            plan_source_label(entry.source)
        );
        for (step_index, step) in entry.steps.iter().enumerate() {
            output.push_str(&format!("   {}. {}\n", step_index + 1, step));
        }
        for ResourceLink { label, url } in &entry.resources {
            output.push_str(&format!("   🔗 {}: {}\n", label, url));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 SKILL GAP ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(report),
            report.processing_time_ms()
        ));
        output.push_str(&format!(
            "Resume: {} | Job: {}\n",
            report.metadata.resume_file, report.metadata.job_source
        ));

        let (summary, analysis, notices) = match &report.body {
            ReportBody::Halted { message, .. } => {
                output.push_str(&self.format_header("⚠️  Analysis halted", 2));
                output.push_str(&format!("{}\n", self.colorize(message, Color::Yellow)));
                return Ok(output);
            }
            ReportBody::Completed {
                summary,
                analysis,
                notices,
            } => (summary, analysis, notices),
        };

        output.push_str(&self.format_header("Match Summary", 2));
        output.push_str(&format!(
            "Match Score: {:.2}% {}\n",
            summary.score,
            self.format_score_badge(summary.rating)
        ));
        output.push_str(&format!(
            "Matched {} of {} required skills\n",
            summary.matched_count, summary.required_count
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&summary.verdict, Color::Cyan)));
        for notice in notices {
            output.push_str(&format!("⚠️  {}\n", self.colorize(notice, Color::Yellow)));
        }

        output.push_str(&self.format_header("📄 Resume Skills", 2));
        if analysis.resume_skills.is_empty() {
            output.push_str("  (none found)\n");
        }
        for (category, skills) in analysis.resume_skills.categories() {
            output.push_str(&format!("  {}: {}\n", self.colorize(category, Color::Blue), skills.join(", ")));
        }

        output.push_str(&self.format_header("✅ Matched Skills", 3));
        output.push_str(&format!(
            "  {}\n",
            self.colorize(&joined_or_none(&analysis.gap.matched), Color::Green)
        ));

        output.push_str(&self.format_header("❌ Missing Skills", 3));
        if analysis.gap.missing.is_empty() {
            output.push_str("  none\n");
        }
        for skill in &analysis.gap.missing {
            output.push_str(&format!(
                "  • {}\n",
                self.colorize(&describe_missing(analysis, skill), Color::Red)
            ));
        }

        if self.detailed {
            output.push_str(&self.format_header("💪 Skill Strength", 3));
            for entry in &analysis.resume_strengths {
                output.push_str(&format!(
                    "  {:<28} {:>3} mention(s)  {}\n",
                    entry.skill, entry.count, entry.strength
                ));
            }

            output.push_str(&self.format_header("🔍 Uncategorized Terms", 3));
            output.push_str(&format!(
                "  Resume: {}\n",
                joined_or_none(&analysis.resume_uncategorized)
            ));
            output.push_str(&format!(
                "  Job: {}\n",
                joined_or_none(&analysis.job_uncategorized)
            ));
        }

        if !analysis.learning_plan.is_empty() {
            output.push_str(&self.format_header("📚 Learning Plan", 2));
            for (index, entry) in analysis.learning_plan.entries.iter().enumerate() {
                output.push_str(&self.format_plan_entry(index, entry));
            }
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
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
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

    fn format_plan_entry(entry: &SkillPlan) -> String {
        let mut output = format!(
            "### {} ({})\n\n",
            entry.skill,
            plan_source_label(entry.source)
        );
        for (index, step) in entry.steps.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", index + 1, step));
        }
        if !entry.resources.is_empty() {
            output.push('\n');
            for link in &entry.resources {
                output.push_str(&format!("- [{}]({})\n", link.label, link.url));
            }
        }
        output.push('\n');
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📊 Skill Gap Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                format_timestamp(report),
                report.processing_time_ms()
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                report.metadata.resume_file, report.metadata.job_source
            ));
        }

        let (summary, analysis, notices) = match &report.body {
            ReportBody::Halted { message, .. } => {
                output.push_str("## ⚠️ Analysis Halted\n\n");
                output.push_str(&format!("{}\n", message));
                return Ok(output);
            }
            ReportBody::Completed {
                summary,
                analysis,
                notices,
            } => (summary, analysis, notices),
        };

        output.push_str("## Match Summary\n\n");
        output.push_str(&format!(
            "**Match Score:** {:.2}% `{}`\n\n",
            summary.score,
            summary.rating.label()
        ));
        output.push_str(&format!(
            "Matched **{}** of **{}** required skills. {}\n\n",
            summary.matched_count, summary.required_count, summary.verdict
        ));
        for notice in notices {
            output.push_str(&format!("> ⚠️ {}\n\n", notice));
        }

        output.push_str("## Resume Skills\n\n");
        output.push_str("| Category | Skills |\n");
        output.push_str("|----------|--------|\n");
        for (category, skills) in analysis.resume_skills.categories() {
            output.push_str(&format!("| {} | {} |\n", category, skills.join(", ")));
        }
        output.push('\n');

        output.push_str("## Gap Analysis\n\n");
        output.push_str(&format!("**Matched:** {}\n\n", joined_or_none(&analysis.gap.matched)));
        output.push_str("**Missing:**\n\n");
        if analysis.gap.missing.is_empty() {
            output.push_str("- none\n");
        }
        for skill in &analysis.gap.missing {
            output.push_str(&format!("- {}\n", describe_missing(analysis, skill)));
        }
        output.push('\n');

        if !analysis.resume_strengths.is_empty() {
            output.push_str("### Skill Strength\n\n");
            output.push_str("| Skill | Mentions | Strength |\n");
            output.push_str("|-------|----------|----------|\n");
            for entry in &analysis.resume_strengths {
                output.push_str(&format!("| {} | {} | {} |\n", entry.skill, entry.count, entry.strength));
            }
            output.push('\n');
        }

        if !analysis.resume_uncategorized.is_empty() || !analysis.job_uncategorized.is_empty() {
            output.push_str("### Uncategorized Terms\n\n");
            output.push_str(&format!("- **Resume:** {}\n", joined_or_none(&analysis.resume_uncategorized)));
            output.push_str(&format!("- **Job:** {}\n\n", joined_or_none(&analysis.job_uncategorized)));
        }

        if !analysis.learning_plan.is_empty() {
            output.push_str("## 📚 Learning Plan\n\n");
            for entry in &analysis.learning_plan.entries {
                output.push_str(&Self::format_plan_entry(entry));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Skill Gap Analysis Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .score-strong { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-partial { background: #ffc107; color: #000; }
        .score-weak { background: #dc3545; }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        .matched { color: #28a745; }
        .missing { color: #dc3545; }
        .notice {
            background: #fff3cd;
            padding: 10px 15px;
            border-left: 4px solid #ffc107;
        }
        .plan {
            background: #f8f9fa;
            padding: 15px;
            margin: 10px 0;
            border-radius: 6px;
        }
        .footer {
            text-align: center;
            color: #6c757d;
            font-size: 0.9em;
            border-top: 1px solid #e9ecef;
            padding-top: 15px;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Skill Gap Analysis</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>
        {% if halted %}
        <div class="section">
            <h2>Analysis Halted</h2>
            <p class="notice">{{ halt_message }}</p>
        </div>
        {% else %}
        <div class="section">
            <h2>Match Summary</h2>
            <h3>Match Score: {{ score }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h3>
            <p>Matched {{ matched_count }} of {{ required_count }} required skills.</p>
            <p><strong>Verdict:</strong> {{ verdict }}</p>
            {% for notice in notices %}
            <p class="notice">{{ notice }}</p>
            {% endfor %}
        </div>
        <div class="section">
            <h2>Resume Skills</h2>
            <ul>
            {% for category in categories %}
                <li><strong>{{ category.name }}:</strong> {{ category.skills }}</li>
            {% endfor %}
            </ul>
        </div>
        <div class="section">
            <h2>Gap Analysis</h2>
            <p class="matched"><strong>Matched:</strong> {{ matched }}</p>
            <ul class="missing">
            {% for skill in missing %}
                <li>{{ skill }}</li>
            {% endfor %}
            </ul>
        </div>
        {% if !plans.is_empty() %}
        <div class="section">
            <h2>Learning Plan</h2>
            {% for plan in plans %}
            <div class="plan">
                <h3>{{ plan.skill }} <small>({{ plan.source }})</small></h3>
                <ol>
                {% for step in plan.steps %}
                    <li>{{ step }}</li>
                {% endfor %}
                </ol>
                {% for link in plan.resources %}
                <a href="{{ link.url }}">{{ link.label }}</a>
                {% endfor %}
            </div>
            {% endfor %}
        </div>
        {% endif %}
        {% endif %}
        <div class="footer">
            <p>skill-gap v{{ version }}</p>
            <p><strong>Resume:</strong> {{ resume_file }} | <strong>Job:</strong> {{ job_source }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    halted: bool,
    halt_message: String,
    score: String,
    score_class: String,
    score_label: String,
    verdict: String,
    matched_count: usize,
    required_count: usize,
    notices: Vec<String>,
    categories: Vec<HtmlCategory>,
    matched: String,
    missing: Vec<String>,
    plans: Vec<HtmlPlan>,
    version: String,
    resume_file: String,
    job_source: String,
}

struct HtmlCategory {
    name: String,
    skills: String,
}

struct HtmlPlan {
    skill: String,
    source: &'static str,
    steps: Vec<String>,
    resources: Vec<ResourceLink>,
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let mut template = HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: format_timestamp(report),
            processing_time: report.processing_time_ms(),
            halted: false,
            halt_message: String::new(),
            score: String::new(),
            score_class: String::new(),
            score_label: String::new(),
            verdict: String::new(),
            matched_count: 0,
            required_count: 0,
            notices: Vec::new(),
            categories: Vec::new(),
            matched: String::new(),
            missing: Vec::new(),
            plans: Vec::new(),
            version: report.metadata.analyzer_version.clone(),
            resume_file: report.metadata.resume_file.clone(),
            job_source: report.metadata.job_source.clone(),
        };

        match &report.body {
            ReportBody::Halted { message, .. } => {
                template.halted = true;
                template.halt_message = message.clone();
            }
            ReportBody::Completed {
                summary,
                analysis,
                notices,
            } => {
                let score_class = match summary.rating {
                    MatchRating::Strong => "score-strong",
                    MatchRating::Good => "score-good",
                    MatchRating::Partial => "score-partial",
                    MatchRating::Weak => "score-weak",
                };
                template.score = format!("{:.2}", summary.score);
                template.score_class = score_class.to_string();
                template.score_label = summary.rating.label().to_string();
                template.verdict = summary.verdict.clone();
                template.matched_count = summary.matched_count;
                template.required_count = summary.required_count;
                template.notices = notices.clone();
                template.categories = analysis
                    .resume_skills
                    .categories()
                    .map(|(name, skills)| HtmlCategory {
                        name: name.to_string(),
                        skills: skills.join(", "),
                    })
                    .collect();
                template.matched = joined_or_none(&analysis.gap.matched);
                template.missing = analysis
                    .gap
                    .missing
                    .iter()
                    .map(|skill| describe_missing(analysis, skill))
                    .collect();
                template.plans = analysis
                    .learning_plan
                    .entries
                    .iter()
                    .map(|entry| HtmlPlan {
                        skill: entry.skill.clone(),
                        source: plan_source_label(entry.source),
                        steps: entry.steps.clone(),
                        resources: entry.resources.clone(),
                    })
                    .collect();
            }
        }

        template
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| SkillGapError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
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

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_skill_gap{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::lexicon::SkillCatalog;
    use crate::processing::pipeline::{AnalysisEngine, HaltReason, JobRequirements, PipelineOutcome};

    fn sample_report() -> AnalysisReport {
        let config = Config::default();
        let catalog = SkillCatalog::builtin();
        let outcome = AnalysisEngine::new(catalog, &config)
            .analyze(
                Some("Skills: Python, SQL, Excel, React"),
                JobRequirements::Skills(vec![
                    "python".to_string(),
                    "react native".to_string(),
                    "tableau".to_string(),
                ]),
            )
            .unwrap();
        AnalysisReport::new(outcome, "resume.txt", "skill list", catalog.lexicon.skill_count())
    }

    #[test]
    fn test_console_plain_output() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_report(&sample_report()).unwrap();

        assert!(output.contains("Match Score: 33.33% [WEAK MATCH]"));
        assert!(output.contains("Matched 1 of 3 required skills"));
        assert!(output.contains("react native (related on resume: react)"));
        assert!(output.contains("TABLEAU (curated roadmap)"));
        assert!(output.contains("REACT NATIVE (generic plan)"));
        assert!(output.contains("🔗 Courses: https://www.coursera.org/search?query=react+native"));
        assert!(output.contains("Uncategorized Terms"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_halted_output() {
        let report = AnalysisReport::new(
            PipelineOutcome::Halted(HaltReason::NoRecognizableJobSkills),
            "resume.txt",
            "job.txt",
            0,
        );
        let console = ConsoleFormatter::new(false, false).format_report(&report).unwrap();
        assert!(console.contains("Analysis halted"));
        assert!(!console.contains("Match Score"));

        let html = HtmlFormatter::new(false).format_report(&report).unwrap();
        assert!(html.contains("Analysis Halted"));
        assert!(!html.contains("<style>"));
    }

    #[test]
    fn test_json_output() {
        let json = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["body"]["status"], "completed");
        assert_eq!(value["body"]["summary"]["score"], 33.33);
        assert_eq!(value["body"]["analysis"]["gap"]["matched"][0], "python");
    }

    #[test]
    fn test_markdown_and_html_output() {
        let report = sample_report();
        let generator = ReportGenerator::with_options(false, false, true, true, true);

        let markdown = generator.generate_report(&report, &OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# 📊 Skill Gap Analysis Report"));
        assert!(markdown.contains("| Programming Languages | PYTHON |"));
        assert!(markdown.contains("### react native (generic plan)"));

        let html = generator.generate_report(&report, &OutputFormat::Html).unwrap();
        assert!(html.contains("score-weak"));
        assert!(html.contains("<li>tableau</li>"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Json, "/tmp/jane_doe.pdf", false),
            "jane_doe_skill_gap.json"
        );
        assert!(suggest_filename(&OutputFormat::Html, "cv.md", true).ends_with(".html"));
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("out.md");
        save_report_to_file("# report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# report");
    }
}
