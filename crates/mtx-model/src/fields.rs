//! Canonical column names and the clinical field catalog.
//!
//! Source spreadsheets carry human-authored, Portuguese-language headers.
//! After normalization (see `mtx-transform`) the columns below are addressed
//! by their canonical lowercase names.

/// Canonical patient identifier column after normalization.
pub const IDENTIFIER_COLUMN: &str = "id_paciente";

/// Canonical treatment-cycle column after normalization.
pub const CYCLE_COLUMN: &str = "ciclo";

/// Token that marks a source column as the explicit cycle field.
pub const CYCLE_TOKEN: &str = "ciclo";

/// Prefix used to find identifier candidates among normalized headers.
pub const IDENTIFIER_PREFIX: &str = "id";

/// A recognized clinical field: normalized source column plus display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Normalized column name as it appears in the source sheet.
    pub column: &'static str,
    /// Display label used in reports and summaries.
    pub label: &'static str,
    /// Short clinical description.
    pub description: &'static str,
}

/// Toxicity grade columns tracked per cycle.
///
/// These are the graded adverse-event columns of the metronomic follow-up
/// sheet. Inputs are matched by intersection; a sheet that lacks some of
/// these simply produces fewer aggregation views.
pub const TOXICITY_FIELDS: &[FieldDef] = &[
    FieldDef {
        column: "anemiahbmt",
        label: "AnemiaHBMT",
        description: "Low hemoglobin",
    },
    FieldDef {
        column: "plaquetopeniamt",
        label: "PlaquetopeniaMT",
        description: "Reduced platelets",
    },
    FieldDef {
        column: "neutropeniamt",
        label: "NeutropeniaMT",
        description: "Reduced neutrophils",
    },
    FieldDef {
        column: "neutropeniafebremt",
        label: "NeutropeniaFebreMT",
        description: "Febrile neutropenia",
    },
    FieldDef {
        column: "nauseasmt",
        label: "NauseasMT",
        description: "Nausea",
    },
    FieldDef {
        column: "vomitosmt",
        label: "VomitosMT",
        description: "Vomiting",
    },
    FieldDef {
        column: "mucositemt",
        label: "MucositeMT",
        description: "Mucositis",
    },
    FieldDef {
        column: "diarreiamt",
        label: "DiarreiaMT",
        description: "Diarrhea",
    },
    FieldDef {
        column: "renal_creatinamt",
        label: "Renal_CreatinaMT",
        description: "Serum creatinine",
    },
    FieldDef {
        column: "hepatica_bt_mt",
        label: "Hepatica_BT_MT",
        description: "Total bilirubin",
    },
    FieldDef {
        column: "hepatica_tgo_mt",
        label: "Hepatica_TGO_MT",
        description: "AST elevation",
    },
    FieldDef {
        column: "hepatica_tgp_mt",
        label: "Hepatica_TGP_MT",
        description: "ALT elevation",
    },
];

/// Per-cycle clinical measurement columns (locale-formatted numerics).
pub const MEASURE_FIELDS: &[FieldDef] = &[
    FieldDef {
        column: "pesomt",
        label: "Peso",
        description: "Body weight (kg)",
    },
    FieldDef {
        column: "hemoglobinamt",
        label: "Hemoglobina",
        description: "Hemoglobin (g/dL)",
    },
    FieldDef {
        column: "leucocitosmt",
        label: "Leucocitos",
        description: "Leukocyte count",
    },
];

/// Look up a toxicity field definition by its normalized column name.
pub fn toxicity_field(column: &str) -> Option<&'static FieldDef> {
    TOXICITY_FIELDS.iter().find(|field| field.column == column)
}

/// Look up a measurement field definition by its normalized column name.
pub fn measure_field(column: &str) -> Option<&'static FieldDef> {
    MEASURE_FIELDS.iter().find(|field| field.column == column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_columns_are_normalized() {
        for field in TOXICITY_FIELDS.iter().chain(MEASURE_FIELDS) {
            assert_eq!(field.column, field.column.trim().to_lowercase());
            assert!(!field.column.contains(' '));
        }
    }

    #[test]
    fn lookup_by_column() {
        assert_eq!(toxicity_field("nauseasmt").unwrap().label, "NauseasMT");
        assert!(toxicity_field("pesomt").is_none());
        assert_eq!(measure_field("pesomt").unwrap().label, "Peso");
    }
}
