//! Output formatters: console table, CSV export, JSON and HTML

use crate::config::OutputFormat;
use crate::error::{Result, ResumeScreenerError};
use crate::output::report::*;
use askama::Template;
use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use serde::Serialize;
use std::path::Path;

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Plain-text table for the terminal
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// CSV export: UTF-8, comma-delimited, header row, no index column
pub struct CsvFormatter;

/// JSON formatter for downstream tooling
pub struct JsonFormatter {
    pretty: bool,
}

/// HTML table page
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    csv_formatter: CsvFormatter,
    json_formatter: JsonFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Resume Screening Results</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 20px; color: #333; }
        table { border-collapse: collapse; width: 100%; }
        th, td { border: 1px solid #dee2e6; padding: 6px 10px; text-align: left; vertical-align: top; }
        th { background: #007acc; color: white; }
        tr:nth-child(even) { background: #f8f9fa; }
        .yes { color: #28a745; font-weight: bold; }
        .no { color: #dc3545; }
        .failed { color: #6c757d; font-style: italic; }
    </style>
    {% endif %}
</head>
<body>
    <h1>Resume Screening Results</h1>
    <p>Generated: {{ generated_at }} | Skills: {{ skills }} | Required experience: {{ experience_years }} years</p>
    <table>
        <tr>{% for header in headers %}<th>{{ header }}</th>{% endfor %}</tr>
        {% for row in rows %}
        <tr>
            <td>{{ row.name_from_text }}</td>
            <td>{{ row.name_from_file }}</td>
            <td>{{ row.emails }}</td>
            <td>{{ row.phones }}</td>
            <td>{{ row.matched_skills }}</td>
            <td class="{{ row.css_class }}">{{ row.meets_experience }}</td>
        </tr>
        {% endfor %}
    </table>
    {% if has_failures %}
    <h2>Documents that could not be read</h2>
    <ul>
        {% for failure in failures %}<li class="failed">{{ failure }}</li>{% endfor %}
    </ul>
    {% endif %}
    <p><small>Generated by Resume Screener v{{ version }}</small></p>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    skills: String,
    experience_years: u32,
    headers: Vec<&'static str>,
    rows: Vec<HtmlRow>,
    has_failures: bool,
    failures: Vec<String>,
    version: String,
}

struct HtmlRow {
    name_from_text: String,
    name_from_file: String,
    emails: String,
    phones: String,
    matched_skills: String,
    meets_experience: &'static str,
    css_class: &'static str,
}

/// JSON view with a readable timestamp and summary counts
#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    screener_version: &'a str,
    processing_time_ms: u64,
    criteria: &'a CriteriaSummary,
    summary: ScreeningSummary,
    records: &'a [ResultRecord],
}

fn format_timestamp(report: &ScreeningReport) -> String {
    DateTime::<Utc>::from(report.metadata.generated_at)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

fn failure_line(record: &ResultRecord) -> String {
    format!(
        "{}: {}",
        record.filename,
        record.extraction_error.as_deref().unwrap_or_default()
    )
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn pad(text: &str, width: usize) -> String {
        let len = text.chars().count();
        format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
    }

    fn format_table(&self, results: &ResultSet) -> String {
        let rows: Vec<[String; 6]> = results
            .records()
            .iter()
            .map(|record| {
                let row = record.table_row();
                [
                    row.name_from_text.to_string(),
                    row.name_from_file.to_string(),
                    row.emails.to_string(),
                    row.phones.to_string(),
                    row.matched_skills.to_string(),
                    row.meets_experience.to_string(),
                ]
            })
            .collect();

        let mut widths = TABLE_HEADERS.map(|header| header.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut output = String::new();

        let header_line = TABLE_HEADERS
            .iter()
            .zip(widths.iter())
            .map(|(header, width)| Self::pad(header, *width))
            .collect::<Vec<_>>()
            .join(" | ");
        output.push_str(&self.colorize(header_line.trim_end(), Color::Cyan));
        output.push('\n');

        let rule = widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-");
        output.push_str(&rule);
        output.push('\n');

        for row in &rows {
            let cells: Vec<String> = row
                .iter()
                .zip(widths.iter())
                .enumerate()
                .map(|(column, (cell, width))| {
                    let padded = Self::pad(cell, *width);
                    if column == 5 {
                        let color = if cell == "Yes" { Color::Green } else { Color::Red };
                        self.colorize(&padded, color)
                    } else {
                        padded
                    }
                })
                .collect();
            output.push_str(cells.join(" | ").trim_end());
            output.push('\n');
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME SCREENING RESULTS"));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(report),
            report.metadata.processing_time_ms
        ));
        output.push_str(&format!(
            "Skills: {} | Required experience: {} years\n\n",
            if report.criteria.skills.is_empty() {
                "(none)".to_string()
            } else {
                report.criteria.skills.join(", ")
            },
            report.criteria.experience_years
        ));

        if report.results.is_empty() {
            output.push_str("No documents screened.\n");
            return Ok(output);
        }

        output.push_str(&self.format_table(&report.results));

        let summary = report.results.summary();
        output.push_str(&format!(
            "\n{} documents | {} meet the experience requirement | {} matched at least one skill\n",
            summary.total, summary.meeting_experience, summary.with_matched_skills
        ));

        if summary.failed > 0 {
            output.push_str(&self.format_header("Documents that could not be read"));
            for record in report.results.failures() {
                output.push_str(&format!("{} {}\n", self.colorize("⚠", Color::Yellow), failure_line(record)));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn to_bytes(&self, results: &ResultSet) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        // Explicit header so an empty result set still exports one
        writer.write_record(TABLE_HEADERS)?;
        for record in results.records() {
            writer.serialize(record.table_row())?;
        }

        writer
            .into_inner()
            .map_err(|e| ResumeScreenerError::OutputFormatting(format!("Failed to finish CSV: {}", e)))
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        String::from_utf8(self.to_bytes(&report.results)?)
            .map_err(|e| ResumeScreenerError::OutputFormatting(format!("CSV is not valid UTF-8: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let view = JsonReport {
            generated_at: DateTime::<Utc>::from(report.metadata.generated_at),
            screener_version: &report.metadata.screener_version,
            processing_time_ms: report.metadata.processing_time_ms,
            criteria: &report.criteria,
            summary: report.results.summary(),
            records: report.results.records(),
        };

        if self.pretty {
            Ok(serde_json::to_string_pretty(&view)?)
        } else {
            Ok(serde_json::to_string(&view)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let rows = report
            .results
            .records()
            .iter()
            .map(|record| HtmlRow {
                name_from_text: record.name_from_text.clone(),
                name_from_file: record.name_from_file.clone(),
                emails: record.emails.clone(),
                phones: record.phones.clone(),
                matched_skills: record.matched_skills.clone(),
                meets_experience: record.experience_label(),
                css_class: if record.meets_experience { "yes" } else { "no" },
            })
            .collect();

        let failures: Vec<String> = report.results.failures().map(failure_line).collect();

        let template = HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: format_timestamp(report),
            skills: report.criteria.skills.join(", "),
            experience_years: report.criteria.experience_years,
            headers: TABLE_HEADERS.to_vec(),
            rows,
            has_failures: !failures.is_empty(),
            failures,
            version: report.metadata.screener_version.clone(),
        };

        Ok(template.render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_html_styles: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            csv_formatter: CsvFormatter::new(),
            json_formatter: JsonFormatter::new(pretty_json),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Csv => self.csv_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }

    pub fn csv_bytes(&self, results: &ResultSet) -> Result<Vec<u8>> {
        self.csv_formatter.to_bytes(results)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &[u8], file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}
