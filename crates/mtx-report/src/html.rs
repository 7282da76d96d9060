//! HTML report rendering.
//!
//! Emits a single self-contained document: run metadata, the anonymized
//! baseline excerpt, presence matrix, clinical summaries and one section per
//! toxicity field with its grade distribution and max-severity matrix.
//! Figures and theming stay with the dashboard layer; this report is plain
//! tables so it prints and archives cleanly.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use mtx_aggregate::{CycleMatrix, DistributionRow, StudyViews, ToxicityViews};
use mtx_model::Grade;
use mtx_transform::BaselineView;

use crate::common::{
    format_mean, format_percent, write_header_row, write_row, write_text_element,
};

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 40px; }\n\
h1, h2 { color: #2c3e50; }\n\
table { border-collapse: collapse; margin-bottom: 32px; }\n\
th, td { border: 1px solid #ccc; padding: 6px 10px; text-align: center; }\n\
th { background-color: #f4f6f7; }\n\
p.caption { color: #555; }\n";

/// Report metadata supplied by the caller.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    pub subtitle: String,
    /// Timestamp shown in the footer, e.g. from `chrono::Local::now()`.
    pub generated_at: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Metronomic treatment report".to_string(),
            subtitle: "Descriptive toxicity-by-cycle analysis".to_string(),
            generated_at: chrono::Local::now().format("%d/%m/%Y %H:%M").to_string(),
        }
    }
}

/// Render the report and write it to `output_path`.
pub fn write_html_report(
    output_path: &Path,
    views: &StudyViews,
    baseline: &BaselineView,
    options: &ReportOptions,
) -> Result<()> {
    let html = render_html(views, baseline, options)?;
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir: {}", parent.display()))?;
    }
    fs::write(output_path, html)
        .with_context(|| format!("write report: {}", output_path.display()))?;
    Ok(())
}

/// Render the full document to a string.
pub fn render_html(
    views: &StudyViews,
    baseline: &BaselineView,
    options: &ReportOptions,
) -> Result<String> {
    let mut xml = Writer::new(Vec::new());

    xml.write_event(Event::DocType(BytesText::new("html")))?;
    xml.write_event(Event::Start(BytesStart::new("html")))?;

    xml.write_event(Event::Start(BytesStart::new("head")))?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "utf-8"));
    xml.write_event(Event::Empty(meta))?;
    write_text_element(&mut xml, "title", &options.title)?;
    write_text_element(&mut xml, "style", STYLE)?;
    xml.write_event(Event::End(BytesEnd::new("head")))?;

    xml.write_event(Event::Start(BytesStart::new("body")))?;
    write_text_element(&mut xml, "h1", &options.title)?;
    let mut caption = BytesStart::new("p");
    caption.push_attribute(("class", "caption"));
    xml.write_event(Event::Start(caption))?;
    xml.write_event(Event::Text(BytesText::new(&options.subtitle)))?;
    xml.write_event(Event::End(BytesEnd::new("p")))?;

    write_run_metrics(&mut xml, views)?;
    write_baseline_section(&mut xml, baseline)?;
    write_presence_section(&mut xml, &views.presence)?;
    write_cycle_summary_section(&mut xml, views)?;
    write_patient_summary_section(&mut xml, views)?;
    for toxicity in &views.toxicity {
        write_toxicity_section(&mut xml, toxicity)?;
    }

    let footer = format!("Report generated automatically at {}.", options.generated_at);
    let mut em = BytesStart::new("p");
    em.push_attribute(("class", "caption"));
    xml.write_event(Event::Start(em))?;
    write_text_element(&mut xml, "em", &footer)?;
    xml.write_event(Event::End(BytesEnd::new("p")))?;

    xml.write_event(Event::End(BytesEnd::new("body")))?;
    xml.write_event(Event::End(BytesEnd::new("html")))?;

    let bytes = xml.into_inner();
    String::from_utf8(bytes).context("report is not valid utf-8")
}

fn write_run_metrics<W: std::io::Write>(xml: &mut Writer<W>, views: &StudyViews) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("ul")))?;
    if let Some(max_cycle) = views.max_cycle_considered {
        write_text_element(xml, "li", &format!("Maximum cycle considered: {max_cycle}"))?;
    }
    write_text_element(xml, "li", &format!("Patients: {}", views.patient_count))?;
    write_text_element(
        xml,
        "li",
        &format!("Toxicity fields analyzed: {}", views.toxicity.len()),
    )?;
    xml.write_event(Event::End(BytesEnd::new("ul")))?;
    Ok(())
}

fn write_baseline_section<W: std::io::Write>(
    xml: &mut Writer<W>,
    baseline: &BaselineView,
) -> Result<()> {
    if baseline.is_empty() {
        return Ok(());
    }
    write_text_element(xml, "h2", "Baseline (first records, anonymized)")?;
    xml.write_event(Event::Start(BytesStart::new("table")))?;
    write_header_row(xml, &baseline.headers)?;
    for row in &baseline.rows {
        write_row(xml, row)?;
    }
    xml.write_event(Event::End(BytesEnd::new("table")))?;
    Ok(())
}

fn write_matrix_table<W: std::io::Write>(xml: &mut Writer<W>, matrix: &CycleMatrix) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("table")))?;
    let mut header: Vec<String> = vec!["Cycle".to_string()];
    header.extend(matrix.patients().iter().cloned());
    write_header_row(xml, &header)?;
    for cycle in matrix.cycles() {
        let mut cells: Vec<String> = vec![cycle.to_string()];
        if let Some(row) = matrix.row(*cycle) {
            cells.extend(row.iter().map(|value| value.to_string()));
        }
        write_row(xml, &cells)?;
    }
    xml.write_event(Event::End(BytesEnd::new("table")))?;
    Ok(())
}

fn write_presence_section<W: std::io::Write>(
    xml: &mut Writer<W>,
    presence: &CycleMatrix,
) -> Result<()> {
    if presence.is_empty() {
        return Ok(());
    }
    write_text_element(xml, "h2", "Cycle presence by patient")?;
    write_matrix_table(xml, presence)
}

fn write_cycle_summary_section<W: std::io::Write>(
    xml: &mut Writer<W>,
    views: &StudyViews,
) -> Result<()> {
    write_text_element(xml, "h2", "Clinical summary by cycle")?;
    xml.write_event(Event::Start(BytesStart::new("table")))?;
    let mut header = vec![
        "Cycle".to_string(),
        "Records".to_string(),
        "Patients".to_string(),
    ];
    header.extend(
        views
            .measure_fields
            .iter()
            .map(|field| format!("Mean {}", field.label)),
    );
    write_header_row(xml, &header)?;
    for summary in &views.cycle_summary {
        let mut cells = vec![
            summary.cycle.to_string(),
            summary.records.to_string(),
            summary.patients.to_string(),
        ];
        cells.extend(summary.means.iter().map(|mean| format_mean(*mean)));
        write_row(xml, &cells)?;
    }
    xml.write_event(Event::End(BytesEnd::new("table")))?;
    Ok(())
}

fn write_patient_summary_section<W: std::io::Write>(
    xml: &mut Writer<W>,
    views: &StudyViews,
) -> Result<()> {
    write_text_element(xml, "h2", "Clinical summary by patient")?;
    xml.write_event(Event::Start(BytesStart::new("table")))?;
    let mut header = vec!["Patient".to_string(), "Cycles".to_string()];
    header.extend(
        views
            .measure_fields
            .iter()
            .map(|field| format!("Mean {}", field.label)),
    );
    write_header_row(xml, &header)?;
    for summary in &views.patient_summary {
        let mut cells = vec![summary.patient.clone(), summary.records.to_string()];
        cells.extend(summary.means.iter().map(|mean| format_mean(*mean)));
        write_row(xml, &cells)?;
    }
    xml.write_event(Event::End(BytesEnd::new("table")))?;
    Ok(())
}

fn write_toxicity_section<W: std::io::Write>(
    xml: &mut Writer<W>,
    toxicity: &ToxicityViews,
) -> Result<()> {
    write_text_element(xml, "h2", toxicity.field.label)?;
    write_text_element(xml, "p", toxicity.field.description)?;

    write_text_element(xml, "h3", "Grade distribution per cycle (%)")?;
    xml.write_event(Event::Start(BytesStart::new("table")))?;
    let mut header = vec!["Cycle".to_string()];
    header.extend(Grade::all().map(|grade| grade.label()));
    header.push("Mean".to_string());
    header.push("Evaluated".to_string());
    write_header_row(xml, &header)?;

    for (cycle, row) in &toxicity.distribution.rows {
        let point = toxicity
            .mean_severity
            .points
            .iter()
            .find(|point| point.cycle == *cycle);
        let mut cells = vec![cycle.to_string()];
        match row {
            DistributionRow::NoData => {
                cells.extend(std::iter::repeat_n("no data".to_string(), Grade::all().count()));
            }
            DistributionRow::Percentages(percentages) => {
                cells.extend(percentages.iter().map(|value| format_percent(*value)));
            }
        }
        cells.push(format_mean(point.and_then(|point| point.mean)));
        cells.push(
            point
                .map(|point| point.evaluated.to_string())
                .unwrap_or_default(),
        );
        write_row(xml, &cells)?;
    }
    xml.write_event(Event::End(BytesEnd::new("table")))?;

    write_text_element(xml, "h3", "Max severity by patient and cycle")?;
    write_matrix_table(xml, &toxicity.max_severity)
}
