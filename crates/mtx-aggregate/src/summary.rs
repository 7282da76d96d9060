//! Per-patient and per-cycle clinical summaries.

use std::collections::BTreeMap;

use anyhow::Result;

use mtx_transform::VisitFrame;

/// Record count and measurement means for one patient.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientSummary {
    pub patient: String,
    /// Number of observed cycles (records) for this patient.
    pub records: usize,
    /// Mean of each measurement field, aligned with the frame's
    /// `measure_fields` order. Means are over non-missing values only.
    pub means: Vec<Option<f64>>,
}

/// Record count, distinct patients and measurement means for one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSummary {
    pub cycle: i64,
    pub records: usize,
    /// Distinct patients observed in this cycle.
    pub patients: usize,
    /// Mean of each measurement field, aligned with the frame's
    /// `measure_fields` order.
    pub means: Vec<Option<f64>>,
}

#[derive(Debug, Default)]
struct Accumulator {
    records: usize,
    sums: Vec<f64>,
    counts: Vec<usize>,
}

impl Accumulator {
    fn new(width: usize) -> Self {
        Self {
            records: 0,
            sums: vec![0.0; width],
            counts: vec![0; width],
        }
    }

    fn push(&mut self, values: &[Option<f64>]) {
        self.records += 1;
        for (idx, value) in values.iter().enumerate() {
            if let Some(value) = value {
                self.sums[idx] += value;
                self.counts[idx] += 1;
            }
        }
    }

    fn means(&self) -> Vec<Option<f64>> {
        self.sums
            .iter()
            .zip(&self.counts)
            .map(|(sum, count)| (*count > 0).then(|| sum / *count as f64))
            .collect()
    }
}

fn measurement_rows(frame: &VisitFrame) -> Result<Vec<Vec<Option<f64>>>> {
    let mut columns = Vec::with_capacity(frame.measure_fields.len());
    for field in &frame.measure_fields {
        columns.push(frame.measures(field.column)?);
    }
    let height = frame.record_count();
    let mut rows = Vec::with_capacity(height);
    for idx in 0..height {
        rows.push(columns.iter().map(|column| column[idx]).collect());
    }
    Ok(rows)
}

/// Summarize by patient: cycle count plus measurement means.
pub fn summarize_by_patient(frame: &VisitFrame) -> Result<Vec<PatientSummary>> {
    let patients = frame.patient_ids()?;
    let rows = measurement_rows(frame)?;
    let width = frame.measure_fields.len();

    let mut groups: BTreeMap<String, Accumulator> = BTreeMap::new();
    for (patient, row) in patients.into_iter().zip(&rows) {
        groups
            .entry(patient)
            .or_insert_with(|| Accumulator::new(width))
            .push(row);
    }

    Ok(groups
        .into_iter()
        .map(|(patient, acc)| PatientSummary {
            patient,
            records: acc.records,
            means: acc.means(),
        })
        .collect())
}

/// Summarize by cycle: record count, distinct patients, measurement means.
pub fn summarize_by_cycle(frame: &VisitFrame) -> Result<Vec<CycleSummary>> {
    let cycles = frame.cycles()?;
    let patients = frame.patient_ids()?;
    let rows = measurement_rows(frame)?;
    let width = frame.measure_fields.len();

    let mut groups: BTreeMap<i64, (Accumulator, Vec<String>)> = BTreeMap::new();
    for ((cycle, patient), row) in cycles.into_iter().zip(patients).zip(&rows) {
        let entry = groups
            .entry(cycle)
            .or_insert_with(|| (Accumulator::new(width), Vec::new()));
        entry.0.push(row);
        entry.1.push(patient);
    }

    Ok(groups
        .into_iter()
        .map(|(cycle, (acc, mut cycle_patients))| {
            cycle_patients.sort();
            cycle_patients.dedup();
            CycleSummary {
                cycle,
                records: acc.records,
                patients: cycle_patients.len(),
                means: acc.means(),
            }
        })
        .collect())
}
