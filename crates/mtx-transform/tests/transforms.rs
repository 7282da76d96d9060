//! Frame construction, cycle resolution and truncation behavior.

use mtx_ingest::RawTable;
use mtx_model::{Grade, PipelineOptions};
use mtx_transform::{
    CycleSource, build_visit_frame, normalize_columns, resolve_identifier, truncate_cycles,
};

fn raw_table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable {
        headers: headers.iter().map(|h| (*h).to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|c| (*c).to_string()).collect())
            .collect(),
    }
}

fn prepared(headers: &[&str], rows: &[&[&str]], options: &PipelineOptions) -> RawTable {
    let mut table = raw_table(headers, rows);
    normalize_columns(&mut table);
    resolve_identifier(&mut table, options).unwrap();
    table
}

#[test]
fn derives_dense_cycles_per_patient() {
    let options = PipelineOptions::default();
    let table = prepared(
        &["ID Paciente", "PesoMT"],
        &[
            &["A", "40"],
            &["B", "51"],
            &["A", "41"],
            &["A", "42"],
            &["B", "52"],
        ],
        &options,
    );
    let frame = build_visit_frame(&table, &options).unwrap();

    assert_eq!(frame.cycle_source, CycleSource::Derived);
    assert_eq!(frame.cycles().unwrap(), vec![1, 1, 2, 3, 2]);
    assert_eq!(
        frame.patient_ids().unwrap(),
        vec!["A", "B", "A", "A", "B"]
    );
}

#[test]
fn derivation_is_deterministic() {
    let options = PipelineOptions::default();
    let table = prepared(
        &["id", "PesoMT"],
        &[&["B", "1"], &["A", "2"], &["B", "3"], &["A", "4"]],
        &options,
    );
    let first = build_visit_frame(&table, &options).unwrap().cycles().unwrap();
    let second = build_visit_frame(&table, &options).unwrap().cycles().unwrap();
    assert_eq!(first, second);
    assert_eq!(first, vec![1, 1, 2, 2]);
}

#[test]
fn explicit_cycle_column_is_trusted() {
    let options = PipelineOptions::default();
    let table = prepared(
        &["id", "Ciclo MT", "NauseasMT"],
        &[&["A", "5", "1 - leve"], &["A", "9", "2 - moderada"]],
        &options,
    );
    let frame = build_visit_frame(&table, &options).unwrap();

    assert_eq!(
        frame.cycle_source,
        CycleSource::Explicit {
            column: "ciclo_mt".to_string()
        }
    );
    // Values are taken verbatim, gaps and all.
    assert_eq!(frame.cycles().unwrap(), vec![5, 9]);
}

#[test]
fn rows_without_identifier_are_dropped() {
    let options = PipelineOptions::default();
    let table = prepared(
        &["id", "ciclo", "PesoMT"],
        &[&["A", "1", "40"], &["", "2", "41"], &["B", "1", "50"]],
        &options,
    );
    let frame = build_visit_frame(&table, &options).unwrap();
    assert_eq!(frame.record_count(), 2);
    assert_eq!(frame.patient_ids().unwrap(), vec!["A", "B"]);
}

#[test]
fn rows_with_unparseable_explicit_cycle_are_dropped() {
    let options = PipelineOptions::default();
    let table = prepared(
        &["id", "ciclo"],
        &[&["A", "1"], &["A", "segundo"], &["A", "3"]],
        &options,
    );
    let frame = build_visit_frame(&table, &options).unwrap();
    assert_eq!(frame.cycles().unwrap(), vec![1, 3]);
}

#[test]
fn grades_and_measures_are_enriched() {
    let options = PipelineOptions::default();
    let table = prepared(
        &["id", "ciclo", "NauseasMT", "PesoMT"],
        &[
            &["A", "1", "2 - moderada", "40,5"],
            &["A", "2", "N/A", "abc"],
        ],
        &options,
    );
    let frame = build_visit_frame(&table, &options).unwrap();

    assert_eq!(frame.toxicity_fields.len(), 1);
    assert_eq!(frame.measure_fields.len(), 1);
    let grades = frame.grades("nauseasmt").unwrap();
    assert_eq!(grades[0].map(Grade::value), Some(2));
    assert_eq!(grades[1], None);
    let weights = frame.measures("pesomt").unwrap();
    assert_eq!(weights[0], Some(40.5));
    assert_eq!(weights[1], None);
}

#[test]
fn truncation_drops_records_beyond_cutoff() {
    let options = PipelineOptions::default();
    let rows: Vec<Vec<String>> = (1..=19)
        .map(|cycle| vec!["A".to_string(), cycle.to_string()])
        .collect();
    let mut table = RawTable {
        headers: vec!["id".to_string(), "ciclo".to_string()],
        rows,
    };
    normalize_columns(&mut table);
    resolve_identifier(&mut table, &options).unwrap();
    let mut frame = build_visit_frame(&table, &options).unwrap();

    let dropped = truncate_cycles(&mut frame, 12).unwrap();
    assert_eq!(dropped, 7);
    let cycles = frame.cycles().unwrap();
    assert!(cycles.iter().all(|cycle| *cycle <= 12));
    assert_eq!(frame.max_cycle().unwrap(), Some(12));
}

#[test]
fn truncation_below_cutoff_is_a_noop() {
    let options = PipelineOptions::default();
    let table = prepared(&["id", "ciclo"], &[&["A", "1"], &["A", "2"]], &options);
    let mut frame = build_visit_frame(&table, &options).unwrap();
    let dropped = truncate_cycles(&mut frame, 12).unwrap();
    assert_eq!(dropped, 0);
    assert_eq!(frame.max_cycle().unwrap(), Some(2));
}
