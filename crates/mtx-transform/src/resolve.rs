//! Identifier and cycle column resolution.
//!
//! Resolution is an ordered list of matcher rules, most specific first, with
//! configuration hints taking precedence over heuristics:
//!
//! Identifier: canonical name present → configured hint → first normalized
//! header starting with `id`. No match is fatal; records cannot be grouped
//! without a key.
//!
//! Cycle: configured hint → first normalized header containing the `ciclo`
//! token → none (the cycle is then derived per patient, see the frame
//! builder).

use tracing::{debug, warn};

use mtx_ingest::RawTable;
use mtx_model::{CYCLE_TOKEN, IDENTIFIER_COLUMN, IDENTIFIER_PREFIX, MtxError, PipelineOptions};

/// Resolve the patient identifier column, renaming it to the canonical
/// [`IDENTIFIER_COLUMN`] in place. Headers must already be normalized.
pub fn resolve_identifier(table: &mut RawTable, options: &PipelineOptions) -> Result<(), MtxError> {
    if table.column_index(IDENTIFIER_COLUMN).is_some() {
        return Ok(());
    }

    if let Some(hint) = options.identifier_column.as_deref() {
        if table.rename_header(hint, IDENTIFIER_COLUMN) {
            debug!(column = hint, "identifier resolved via configured hint");
            return Ok(());
        }
        warn!(column = hint, "configured identifier column not found");
        return Err(MtxError::UnresolvableIdentifier {
            headers: table.headers.clone(),
        });
    }

    let candidate = table
        .headers
        .iter()
        .find(|header| header.starts_with(IDENTIFIER_PREFIX))
        .cloned();
    match candidate {
        Some(header) => {
            debug!(column = %header, "identifier resolved via prefix heuristic");
            table.rename_header(&header, IDENTIFIER_COLUMN);
            Ok(())
        }
        None => Err(MtxError::UnresolvableIdentifier {
            headers: table.headers.clone(),
        }),
    }
}

/// Find the explicit cycle column, if any. Headers must be normalized.
pub fn find_cycle_column(headers: &[String], options: &PipelineOptions) -> Option<String> {
    if let Some(hint) = options.cycle_column.as_deref()
        && headers.iter().any(|header| header == hint)
    {
        return Some(hint.to_string());
    }
    headers
        .iter()
        .find(|header| header.contains(CYCLE_TOKEN))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_headers(headers: &[&str]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    #[test]
    fn canonical_identifier_is_kept() {
        let mut table = table_with_headers(&["id_paciente", "ciclo"]);
        resolve_identifier(&mut table, &PipelineOptions::default()).unwrap();
        assert_eq!(table.headers[0], "id_paciente");
    }

    #[test]
    fn first_id_prefixed_header_wins() {
        let mut table = table_with_headers(&["peso", "idade", "id_registro"]);
        resolve_identifier(&mut table, &PipelineOptions::default()).unwrap();
        // "idade" starts with "id" and comes first; the heuristic picks it.
        assert_eq!(table.headers, vec!["peso", "id_paciente", "id_registro"]);
    }

    #[test]
    fn hint_bypasses_heuristic() {
        let options =
            PipelineOptions::default().with_identifier_column(Some("id_registro".to_string()));
        let mut table = table_with_headers(&["peso", "idade", "id_registro"]);
        resolve_identifier(&mut table, &options).unwrap();
        assert_eq!(table.headers, vec!["peso", "idade", "id_paciente"]);
    }

    #[test]
    fn no_candidate_is_fatal() {
        let mut table = table_with_headers(&["peso", "ciclo"]);
        let error = resolve_identifier(&mut table, &PipelineOptions::default()).unwrap_err();
        assert!(matches!(error, MtxError::UnresolvableIdentifier { .. }));
    }

    #[test]
    fn missing_hinted_identifier_is_fatal() {
        let options = PipelineOptions::default().with_identifier_column(Some("rg".to_string()));
        let mut table = table_with_headers(&["idade"]);
        let error = resolve_identifier(&mut table, &options).unwrap_err();
        assert!(matches!(error, MtxError::UnresolvableIdentifier { .. }));
    }

    #[test]
    fn cycle_token_matches_substring() {
        let headers = vec!["id_paciente".to_string(), "ciclo_mt".to_string()];
        assert_eq!(
            find_cycle_column(&headers, &PipelineOptions::default()),
            Some("ciclo_mt".to_string())
        );
    }

    #[test]
    fn cycle_hint_takes_precedence() {
        let options = PipelineOptions::default().with_cycle_column(Some("visita".to_string()));
        let headers = vec!["ciclo_mt".to_string(), "visita".to_string()];
        assert_eq!(
            find_cycle_column(&headers, &options),
            Some("visita".to_string())
        );
    }

    #[test]
    fn absent_cycle_column_means_derivation() {
        let headers = vec!["id_paciente".to_string(), "pesomt".to_string()];
        assert_eq!(find_cycle_column(&headers, &PipelineOptions::default()), None);
    }
}
