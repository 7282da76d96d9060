//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Options controlling normalization, resolution and truncation behavior.
///
/// Column resolution is heuristic by default (ordered matcher rules); the
/// hints below bypass the heuristics when a study's headers are known.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Protocol-defined observation window. Records with a cycle above this
    /// cutoff are dropped after cycle resolution and before aggregation.
    /// `None` means no truncation.
    pub max_cycle: Option<u32>,

    /// Source column to use as the patient identifier, bypassing the
    /// `id*` prefix heuristic. Matched against normalized headers.
    pub identifier_column: Option<String>,

    /// Source column to use as the explicit cycle field, bypassing the
    /// cycle-token heuristic. Matched against normalized headers.
    pub cycle_column: Option<String>,
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_cycle(mut self, max_cycle: Option<u32>) -> Self {
        self.max_cycle = max_cycle;
        self
    }

    #[must_use]
    pub fn with_identifier_column(mut self, column: Option<String>) -> Self {
        self.identifier_column = column;
        self
    }

    #[must_use]
    pub fn with_cycle_column(mut self, column: Option<String>) -> Self {
        self.cycle_column = column;
        self
    }
}
