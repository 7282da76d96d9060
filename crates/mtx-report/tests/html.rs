//! Report rendering tests.

use insta::assert_snapshot;

use mtx_aggregate::build_study_views;
use mtx_ingest::RawTable;
use mtx_model::PipelineOptions;
use mtx_report::{ReportOptions, render_html, write_html_report};
use mtx_transform::{
    BaselineView, build_visit_frame, normalize_columns, prepare_baseline, resolve_identifier,
};

fn options() -> ReportOptions {
    ReportOptions {
        title: "Relatorio Tecnico".to_string(),
        subtitle: "Metronomic treatment, descriptive analysis".to_string(),
        generated_at: "01/07/2024 12:00".to_string(),
    }
}

fn scenario_views() -> mtx_aggregate::StudyViews {
    let pipeline_options = PipelineOptions::default();
    let mut table = RawTable {
        headers: vec![
            "id".to_string(),
            "ciclo".to_string(),
            "NauseasMT".to_string(),
            "PesoMT".to_string(),
        ],
        rows: vec![
            vec![
                "A".to_string(),
                "1".to_string(),
                "1-leve".to_string(),
                "40,5".to_string(),
            ],
            vec![
                "A".to_string(),
                "2".to_string(),
                "3-severa".to_string(),
                "41".to_string(),
            ],
            vec![
                "B".to_string(),
                "1".to_string(),
                String::new(),
                "50".to_string(),
            ],
            vec![
                "B".to_string(),
                "2".to_string(),
                "2-moderada".to_string(),
                String::new(),
            ],
        ],
    };
    normalize_columns(&mut table);
    resolve_identifier(&mut table, &pipeline_options).unwrap();
    let frame = build_visit_frame(&table, &pipeline_options).unwrap();
    build_study_views(&frame).unwrap()
}

#[test]
fn report_contains_all_sections() {
    let views = scenario_views();
    let html = render_html(&views, &BaselineView::default(), &options()).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Relatorio Tecnico</title>"));
    assert!(html.contains("Maximum cycle considered: 2"));
    assert!(html.contains("Cycle presence by patient"));
    assert!(html.contains("Clinical summary by cycle"));
    assert!(html.contains("Clinical summary by patient"));
    assert!(html.contains("<h2>NauseasMT</h2>"));
    assert!(html.contains("Grade 0"));
    assert!(html.contains("Grade 4"));
    // Baseline section is omitted when there is no baseline sheet.
    assert!(!html.contains("Baseline (first records"));
}

#[test]
fn distribution_row_shows_percentages_and_mean() {
    let views = scenario_views();
    let html = render_html(&views, &BaselineView::default(), &options()).unwrap();

    // Cycle 1 has one evaluated record at grade 1: 100% and mean 1.00.
    assert!(html.contains("<td>100.0</td>"));
    assert!(html.contains("<td>1.00</td>"));
    // Cycle 2: grades 3 and 2, mean 2.50.
    assert!(html.contains("<td>2.50</td>"));
}

#[test]
fn baseline_section_renders_rows() {
    let views = scenario_views();
    let baseline_table = RawTable {
        headers: vec!["id".to_string(), "sexo".to_string(), "nome".to_string()],
        rows: vec![vec![
            "P1".to_string(),
            "F".to_string(),
            "Fulana".to_string(),
        ]],
    };
    let baseline = prepare_baseline(
        &baseline_table,
        chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
    );
    let html = render_html(&views, &baseline, &options()).unwrap();

    assert!(html.contains("Baseline (first records, anonymized)"));
    assert!(html.contains("<td>P1</td>"));
    // Identifying columns never reach the report.
    assert!(!html.contains("Fulana"));
}

#[test]
fn report_escapes_markup_in_cells() {
    let views = scenario_views();
    let baseline_table = RawTable {
        headers: vec!["id".to_string()],
        rows: vec![vec!["<b>P1</b>".to_string()]],
    };
    let baseline = prepare_baseline(
        &baseline_table,
        chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
    );
    let html = render_html(&views, &baseline, &options()).unwrap();
    assert!(html.contains("&lt;b&gt;P1&lt;/b&gt;"));
}

#[test]
fn footer_carries_the_supplied_timestamp() {
    let views = scenario_views();
    let html = render_html(&views, &BaselineView::default(), &options()).unwrap();
    let footer_start = html.find("<em>").unwrap();
    let footer_end = html.find("</em>").unwrap();
    assert_snapshot!(
        &html[footer_start + 4..footer_end],
        @"Report generated automatically at 01/07/2024 12:00."
    );
}

#[test]
fn write_report_creates_parent_directories() {
    let views = scenario_views();
    let dir = std::env::temp_dir().join("mtx-report-test");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("output").join("relatorio.html");

    write_html_report(&path, &views, &BaselineView::default(), &options()).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("<h1>Relatorio Tecnico</h1>"));
    let _ = std::fs::remove_dir_all(&dir);
}
