//! Cycle-presence view.

use anyhow::Result;

use mtx_transform::VisitFrame;

use crate::matrix::CycleMatrix;

/// Build the presence matrix: 1 where the patient has at least one record in
/// the cycle, 0 everywhere else. Absence is informative, so the matrix is
/// explicitly zero-filled over the full cycle × patient grid.
pub fn build_presence_matrix(frame: &VisitFrame) -> Result<CycleMatrix> {
    let cycles = frame.cycles()?;
    let patients = frame.patient_ids()?;

    let mut matrix = CycleMatrix::zero_filled(cycles.clone(), patients.clone());
    for (cycle, patient) in cycles.iter().zip(&patients) {
        matrix.raise(*cycle, patient, 1);
    }
    Ok(matrix)
}
