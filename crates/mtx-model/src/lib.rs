pub mod error;
pub mod fields;
pub mod grade;
pub mod options;

pub use error::{MtxError, Result};
pub use fields::{
    CYCLE_COLUMN, CYCLE_TOKEN, FieldDef, IDENTIFIER_COLUMN, IDENTIFIER_PREFIX, MEASURE_FIELDS,
    TOXICITY_FIELDS, measure_field, toxicity_field,
};
pub use grade::{GRADE_LEVELS, GRADE_MAX, Grade};
pub use options::PipelineOptions;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_serialize() {
        let options = PipelineOptions::new()
            .with_max_cycle(Some(12))
            .with_cycle_column(Some("ciclo_mt".to_string()));
        let json = serde_json::to_string(&options).expect("serialize options");
        let round: PipelineOptions = serde_json::from_str(&json).expect("deserialize options");
        assert_eq!(round.max_cycle, Some(12));
        assert_eq!(round.cycle_column.as_deref(), Some("ciclo_mt"));
        assert!(round.identifier_column.is_none());
    }

    #[test]
    fn unresolvable_identifier_lists_headers() {
        let error = MtxError::UnresolvableIdentifier {
            headers: vec!["peso".to_string(), "ciclo".to_string()],
        };
        assert!(error.to_string().contains("peso, ciclo"));
    }
}
