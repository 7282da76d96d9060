use std::path::PathBuf;

use tempfile::TempDir;

use mtx_ingest::{TableLoader, read_csv_table, read_table};

fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn reads_header_and_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "metro.csv",
        "ID Paciente,Ciclo MT,PesoMT\nP1,1,\"42,5\"\nP2,1,39\n",
    );

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.headers, vec!["ID Paciente", "Ciclo MT", "PesoMT"]);
    assert_eq!(table.height(), 2);
    assert_eq!(table.rows[0], vec!["P1", "1", "42,5"]);
}

#[test]
fn skips_blank_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "metro.csv", "\n,,\nid,tox\nP1,2 - moderada\n,,\n");

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.headers, vec!["id", "tox"]);
    assert_eq!(table.height(), 1);
    assert_eq!(table.rows[0], vec!["P1", "2 - moderada"]);
}

#[test]
fn strips_bom_from_first_header() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "metro.csv", "\u{feff}id,peso\nP1,50\n");

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.headers[0], "id");
}

#[test]
fn read_table_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("metro.parquet");
    std::fs::write(&path, "x").unwrap();

    let error = read_table(&path).unwrap_err();
    assert!(error.to_string().contains("unsupported input extension"));
}

#[test]
fn loader_reports_missing_input_with_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nao-existe.xlsx");

    let mut loader = TableLoader::new();
    let error = loader.load(&path).unwrap_err();
    assert!(error.to_string().contains("nao-existe.xlsx"));
}

#[test]
fn loader_memoizes_per_path() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "metro.csv", "id,tox\nP1,1 - leve\n");

    let mut loader = TableLoader::new();
    let first_height = loader.load(&path).unwrap().height();

    // Rewrite the file behind the loader's back: the cached copy must win
    // within this invocation.
    std::fs::write(&path, "id,tox\nP1,1 - leve\nP2,2 - moderada\n").unwrap();
    let second_height = loader.load(&path).unwrap().height();

    assert_eq!(first_height, 1);
    assert_eq!(second_height, 1);
}
