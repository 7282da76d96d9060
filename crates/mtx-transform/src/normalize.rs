//! Column-name normalization.
//!
//! Source headers are human-entered Portuguese text: mixed case, stray
//! whitespace, diacritics ("Hemoglobina Média", "Ciclo MT"). Normalization
//! maps them onto the stable lowercase ASCII names the rest of the pipeline
//! addresses.

use unicode_normalization::UnicodeNormalization;

use mtx_ingest::RawTable;

/// Normalize one header: trim, NFKD-decompose and drop anything without an
/// ASCII equivalent, lowercase, then turn internal spaces into underscores.
///
/// Transliteration runs before lowercasing so that compatibility characters
/// which decompose to uppercase ASCII still end up lowercase. Idempotent:
/// applying it to its own output is a no-op.
pub fn normalize_header(raw: &str) -> String {
    let transliterated: String = raw
        .trim()
        .trim_matches('\u{feff}')
        .nfkd()
        .filter(char::is_ascii)
        .collect();
    transliterated.to_lowercase().replace(' ', "_")
}

/// Normalize every header of a table in place.
///
/// Known limitation: headers that normalize to the same name collide
/// silently and only one survives lookup by name. The source sheets do not
/// do this in practice and the collision is left unresolved.
pub fn normalize_columns(table: &mut RawTable) {
    for header in &mut table.headers {
        *header = normalize_header(header);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics_and_spaces() {
        assert_eq!(normalize_header("Hemoglobina Média"), "hemoglobina_media");
        assert_eq!(normalize_header("  Ciclo MT "), "ciclo_mt");
        assert_eq!(normalize_header("Renal_CreatinaMT"), "renal_creatinamt");
    }

    #[test]
    fn transliterates_compatibility_characters() {
        // U+00BA decomposes to a plain "o" under NFKD.
        assert_eq!(normalize_header("Nº de ciclos"), "no_de_ciclos");
    }

    #[test]
    fn drops_characters_without_ascii_equivalent() {
        assert_eq!(normalize_header("peso ±kg"), "peso_kg");
    }

    #[test]
    fn already_normalized_is_untouched() {
        assert_eq!(normalize_header("id_paciente"), "id_paciente");
    }
}
