//! Self-contained XHTML report with an inline SVG usage chart.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use tracing::info;

use tracer_core::AnalysisReport;

use crate::common::{
    format_benefit, format_percent, write_attributed_text, write_empty_element, write_table_row,
    write_text_element,
};

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; color: #222; }\n\
table { border-collapse: collapse; margin: 1em 0; }\n\
th, td { border: 1px solid #999; padding: 4px 10px; text-align: left; }\n\
th { background: #eee; }\n\
.best { background: #eefbee; border: 1px solid #7c7; padding: 0.8em; }\n";

const BAR_AREA_WIDTH: f64 = 400.0;
const BAR_HEIGHT: usize = 20;
const BAR_GAP: usize = 8;
const LABEL_WIDTH: usize = 180;

/// Where the analyzed tables came from; shown in the report header.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub input_file: String,
    pub result_file: String,
    pub run_number: usize,
}

/// Render the report as an XHTML string.
pub fn render_report(report: &AnalysisReport, context: &ReportContext) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let mut html = BytesStart::new("html");
    html.push_attribute(("xmlns", "http://www.w3.org/1999/xhtml"));
    writer.write_event(Event::Start(html))?;

    writer.write_event(Event::Start(BytesStart::new("head")))?;
    write_text_element(&mut writer, "title", "Input usage report")?;
    write_text_element(&mut writer, "style", STYLE)?;
    writer.write_event(Event::End(BytesEnd::new("head")))?;

    writer.write_event(Event::Start(BytesStart::new("body")))?;
    write_text_element(&mut writer, "h1", "Input usage report")?;
    write_header_table(&mut writer, report, context)?;
    write_usage_section(&mut writer, report)?;
    write_gain_section(&mut writer, report)?;
    write_combo_section(&mut writer, report)?;
    write_best_filter_section(&mut writer, report)?;
    writer.write_event(Event::End(BytesEnd::new("body")))?;
    writer.write_event(Event::End(BytesEnd::new("html")))?;

    let rendered = String::from_utf8(writer.into_inner()).context("report is not valid utf-8")?;
    Ok(rendered)
}

/// Render the report and write it under `dir` with a timestamped name.
pub fn write_report(dir: &Path, report: &AnalysisReport, context: &ReportContext) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create report dir: {}", dir.display()))?;
    let timestamp = chrono::Local::now().format("%d%m%Y_%H-%M-%S");
    let path = dir.join(format!(
        "report_results_run{}_{timestamp}.html",
        context.run_number
    ));
    let rendered = render_report(report, context)?;
    fs::write(&path, rendered).with_context(|| format!("write report: {}", path.display()))?;
    info!(path = %path.display(), "wrote analysis report");
    Ok(path)
}

/// Serialize the report for machine consumption.
pub fn render_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize report to json")
}

fn write_header_table<W: std::io::Write>(
    writer: &mut Writer<W>,
    report: &AnalysisReport,
    context: &ReportContext,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("table")))?;
    let rows: Vec<(&str, String)> = vec![
        ("Run", context.run_number.to_string()),
        ("Input file", context.input_file.clone()),
        ("Result file", context.result_file.clone()),
        (
            "Input rows",
            report.input_rows.to_string(),
        ),
        (
            "Result rows",
            report.result_rows.to_string(),
        ),
        ("Merge keys", join_or_dash(&report.merge_keys)),
        (
            "Matching id columns",
            join_or_dash(&report.matching_id_columns),
        ),
        (
            "Merge",
            match &report.merge_skipped {
                Some(reason) => format!("skipped ({reason})"),
                None => "extended result table".to_string(),
            },
        ),
        (
            "Overall usage",
            report
                .overall_usage
                .map_or_else(|| "n/a".to_string(), format_percent),
        ),
    ];
    for (label, value) in rows {
        write_table_row(writer, "td", &[label, value.as_str()])?;
    }
    writer.write_event(Event::End(BytesEnd::new("table")))?;
    Ok(())
}

/// Horizontal bar per column, the way the original plot showed usage.
fn write_usage_section<W: std::io::Write>(
    writer: &mut Writer<W>,
    report: &AnalysisReport,
) -> Result<()> {
    write_text_element(writer, "h2", "Column usage")?;
    if report.usage.is_empty() {
        write_text_element(writer, "p", "No usage-measurable columns.")?;
        return Ok(());
    }
    let height = report.usage.len() * (BAR_HEIGHT + BAR_GAP);
    let width = LABEL_WIDTH + BAR_AREA_WIDTH as usize + 70;
    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
    let width_value = width.to_string();
    let height_value = height.to_string();
    svg.push_attribute(("width", width_value.as_str()));
    svg.push_attribute(("height", height_value.as_str()));
    writer.write_event(Event::Start(svg))?;

    for (idx, (name, usage)) in report.usage.iter().enumerate() {
        let y = idx * (BAR_HEIGHT + BAR_GAP);
        let text_y = (y + BAR_HEIGHT - 5).to_string();
        write_attributed_text(
            writer,
            "text",
            &[("x", "0"), ("y", text_y.as_str()), ("font-size", "13")],
            name,
        )?;
        let bar_width = (usage * BAR_AREA_WIDTH).max(1.0);
        let x = LABEL_WIDTH.to_string();
        let y_value = y.to_string();
        let bar_width_value = format!("{bar_width:.0}");
        let bar_height_value = BAR_HEIGHT.to_string();
        write_empty_element(
            writer,
            "rect",
            &[
                ("x", x.as_str()),
                ("y", y_value.as_str()),
                ("width", bar_width_value.as_str()),
                ("height", bar_height_value.as_str()),
                ("fill", "#4878a8"),
            ],
        )?;
        let pct_x = (LABEL_WIDTH as f64 + bar_width + 6.0).round().to_string();
        write_attributed_text(
            writer,
            "text",
            &[
                ("x", pct_x.as_str()),
                ("y", text_y.as_str()),
                ("font-size", "13"),
            ],
            &format_percent(*usage),
        )?;
    }
    writer.write_event(Event::End(BytesEnd::new("svg")))?;
    Ok(())
}

fn write_gain_section<W: std::io::Write>(
    writer: &mut Writer<W>,
    report: &AnalysisReport,
) -> Result<()> {
    write_text_element(writer, "h2", "Filter gains")?;
    if report.filter_candidates.is_empty() {
        write_text_element(writer, "p", "No divider column produced a usable gain.")?;
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new("table")))?;
    write_table_row(
        writer,
        "th",
        &["Column", "Type", "Filter out", "Rows saved", "Weighted benefit"],
    )?;
    for record in &report.filter_candidates {
        write_table_row(
            writer,
            "td",
            &[
                record.column(),
                record.kind_label(),
                record.filter_out().as_str(),
                record.rows_saved().to_string().as_str(),
                format_benefit(record.weighted_benefit()).as_str(),
            ],
        )?;
    }
    writer.write_event(Event::End(BytesEnd::new("table")))?;
    Ok(())
}

fn write_combo_section<W: std::io::Write>(
    writer: &mut Writer<W>,
    report: &AnalysisReport,
) -> Result<()> {
    if report.combo_candidates.is_empty() {
        return Ok(());
    }
    write_text_element(writer, "h2", "Multi-column exclusion candidates")?;
    writer.write_event(Event::Start(BytesStart::new("table")))?;
    write_table_row(writer, "th", &["Columns", "Values", "Input rows", "Input share"])?;
    for combo in &report.combo_candidates {
        write_table_row(
            writer,
            "td",
            &[
                combo.columns.join(", ").as_str(),
                combo.values.join(", ").as_str(),
                combo.rows.to_string().as_str(),
                format_percent(combo.ratio).as_str(),
            ],
        )?;
    }
    writer.write_event(Event::End(BytesEnd::new("table")))?;
    Ok(())
}

fn write_best_filter_section<W: std::io::Write>(
    writer: &mut Writer<W>,
    report: &AnalysisReport,
) -> Result<()> {
    write_text_element(writer, "h2", "Recommended filter")?;
    match &report.best_filter {
        Some(best) => {
            let mut paragraph = BytesStart::new("p");
            paragraph.push_attribute(("class", "best"));
            writer.write_event(Event::Start(paragraph))?;
            writer.write_event(Event::Text(BytesText::new(&format!(
                "{} (saves {} rows)",
                best.predicate,
                best.gain.rows_saved()
            ))))?;
            writer.write_event(Event::End(BytesEnd::new("p")))?;
        }
        None => {
            write_text_element(writer, "p", "No further optimization available.")?;
        }
    }
    Ok(())
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
