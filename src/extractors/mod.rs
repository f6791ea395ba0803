// src/extractors/mod.rs
pub mod age;
pub mod contraindications;
pub mod models;
pub mod section;

use crate::document::NormalizedDocument;

// Re-export key extraction types for convenience
pub use age::analyze_age_restriction;
pub use contraindications::analyze_allergies_and_references;
pub use models::{Analysis, AnalysisResult, AgeRestrictionResult, AgeStatus, Finding};
pub use section::{locate, SectionSpan, SubsectionId};

/// Runs both SPC analyses over one normalized document.
pub struct SpcExtractor {
    document: NormalizedDocument,
}

impl SpcExtractor {
    pub fn new(raw_text: &str) -> Self {
        Self { document: NormalizedDocument::new(raw_text) }
    }

    pub fn document(&self) -> &NormalizedDocument {
        &self.document
    }

    pub fn analyze_age_restriction(&self) -> AgeRestrictionResult {
        analyze_age_restriction(&self.document)
    }

    pub fn analyze_allergies_and_references(&self) -> Vec<Finding> {
        analyze_allergies_and_references(&self.document)
    }

    /// Produces the full report, labelled with a caller-chosen drug name.
    pub fn analyze(&self, drug_name: &str) -> AnalysisResult {
        tracing::info!("Analyzing SPC for '{}' ({} bytes normalized)", drug_name, self.document.len());

        let age_restriction = self.analyze_age_restriction();
        let contraindications_findings = self.analyze_allergies_and_references();

        tracing::info!(
            "Age status {:?}, {} contraindication findings",
            age_restriction.status,
            contraindications_findings.len()
        );

        AnalysisResult {
            drug_name: drug_name.to_string(),
            analysis: Analysis { age_restriction, contraindications_findings },
        }
    }
}
