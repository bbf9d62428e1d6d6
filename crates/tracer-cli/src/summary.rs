//! Terminal summary tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tracer_core::AnalysisReport;

use crate::types::{AnalyzeOutcome, FilterOutcome, StopReason};

pub fn print_analysis(outcome: &AnalyzeOutcome) {
    print_report(&outcome.report);
    if let Some(path) = &outcome.report_path {
        println!("Report: {}", path.display());
    }
}

pub fn print_filter_summary(outcome: &FilterOutcome) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Run"),
        header_cell("Rows before"),
        header_cell("Rows after"),
        header_cell("Filter"),
        header_cell("Applied"),
    ]);
    for idx in 1..=4 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for round in &outcome.rounds {
        let filter = round
            .report
            .best_filter
            .as_ref()
            .map_or_else(|| "-".to_string(), |best| best.predicate.to_string());
        table.add_row(vec![
            Cell::new(round.run_number),
            Cell::new(round.rows_before),
            Cell::new(round.rows_after),
            Cell::new(filter),
            if round.applied {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("no").fg(Color::DarkGrey)
            },
        ]);
    }
    println!("{table}");
    let reason = match outcome.stop {
        StopReason::BenefitBelowThreshold => "benefit fell below the threshold",
        StopReason::NoGainCandidates => "no further optimization available",
        StopReason::MaxRunsReached => "maximum number of runs reached",
    };
    println!("Stopped: {reason}");
    if let Some(path) = &outcome.output_path {
        println!(
            "Filtered input: {} ({} rows)",
            path.display(),
            outcome.filtered.height()
        );
    }
}

fn print_report(report: &AnalysisReport) {
    println!(
        "Input rows: {}  Result rows: {}",
        report.input_rows, report.result_rows
    );
    match report.overall_usage {
        Some(overall) => println!("Overall usage: {:.1}%", overall * 100.0),
        None => println!("Overall usage: n/a"),
    }
    if let Some(reason) = &report.merge_skipped {
        println!("Merge skipped: {reason}");
    }

    let mut usage_table = Table::new();
    apply_table_style(&mut usage_table);
    usage_table.set_header(vec![
        header_cell("Column"),
        header_cell("Usage"),
        header_cell("Divider"),
    ]);
    align_column(&mut usage_table, 1, CellAlignment::Right);
    for (column, usage) in &report.usage {
        let divider = report
            .divider_columns
            .get(column)
            .map_or("-", |kind| kind.as_str());
        usage_table.add_row(vec![
            Cell::new(column),
            usage_cell(*usage),
            Cell::new(divider),
        ]);
    }
    println!("{usage_table}");

    if report.filter_candidates.is_empty() {
        println!("No filter gains found.");
    } else {
        let mut gains_table = Table::new();
        apply_table_style(&mut gains_table);
        gains_table.set_header(vec![
            header_cell("Column"),
            header_cell("Type"),
            header_cell("Filter out"),
            header_cell("Rows saved"),
            header_cell("Benefit"),
        ]);
        align_column(&mut gains_table, 3, CellAlignment::Right);
        align_column(&mut gains_table, 4, CellAlignment::Right);
        for record in &report.filter_candidates {
            gains_table.add_row(vec![
                Cell::new(record.column()),
                Cell::new(record.kind_label()),
                Cell::new(record.filter_out()),
                Cell::new(record.rows_saved()),
                Cell::new(format!("{:.1}", record.weighted_benefit())),
            ]);
        }
        println!("{gains_table}");
    }

    if !report.combo_candidates.is_empty() {
        println!(
            "{} multi-column exclusion candidates (see report for details)",
            report.combo_candidates.len()
        );
    }

    match &report.best_filter {
        Some(best) => println!(
            "Recommended: {} (saves {} rows)",
            best.predicate,
            best.gain.rows_saved()
        ),
        None => println!("No further optimization available."),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn usage_cell(usage: f64) -> Cell {
    let cell = Cell::new(format!("{:.1}%", usage * 100.0));
    if usage < 0.5 {
        cell.fg(Color::Red)
    } else if usage < 0.9 {
        cell.fg(Color::Yellow)
    } else {
        cell.fg(Color::Green)
    }
}
