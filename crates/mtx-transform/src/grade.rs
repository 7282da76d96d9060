//! Toxicity grade extraction.

use mtx_model::Grade;

/// Extract an ordinal grade from a free-form toxicity cell.
///
/// Cells look like `"2 - moderada"` or plain `"3"`: the text before the
/// first hyphen is parsed as an integer on the 0..=4 scale. Anything else
/// (blank, `"N/A"`, out-of-scale numbers, stray punctuation) is unevaluated.
/// Unevaluated is `None`, not grade 0: a missing assessment must never read
/// as "no toxicity".
pub fn extract_grade(raw: &str) -> Option<Grade> {
    let leading = raw.split('-').next().unwrap_or("").trim();
    let value = leading.parse::<u8>().ok()?;
    Grade::new(value)
}
