// src/extractors/models.rs
use serde::{Deserialize, Serialize};

/// Category label carried by every age-restriction record.
pub const MIN_AGE_CATEGORY: &str = "min_age";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeStatus {
    Unknown,
    Restricted,
    NotRecommendedPediatric,
}

/// Outcome of the 4.2 analysis. `value` is only set for `Restricted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRestrictionResult {
    pub category: String,
    pub value: Option<u32>,
    pub status: AgeStatus,
    pub evidence: String,
}

impl AgeRestrictionResult {
    pub fn unknown() -> Self {
        Self {
            category: MIN_AGE_CATEGORY.to_string(),
            value: None,
            status: AgeStatus::Unknown,
            evidence: String::new(),
        }
    }

    pub fn restricted(age: u32, evidence: &str) -> Self {
        Self {
            value: Some(age),
            status: AgeStatus::Restricted,
            evidence: evidence.to_string(),
            ..Self::unknown()
        }
    }

    pub fn not_recommended_pediatric(note: &str) -> Self {
        Self {
            status: AgeStatus::NotRecommendedPediatric,
            evidence: note.to_string(),
            ..Self::unknown()
        }
    }
}

impl Default for AgeRestrictionResult {
    fn default() -> Self {
        Self::unknown()
    }
}

/// One classified extraction from the contraindications subsection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Finding {
    AllergyText { value: String },
    SectionReference { value: String, note: String },
}

impl Finding {
    pub fn value(&self) -> &str {
        match self {
            Finding::AllergyText { value } | Finding::SectionReference { value, .. } => value,
        }
    }

    pub fn is_allergy(&self) -> bool {
        matches!(self, Finding::AllergyText { .. })
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Finding::SectionReference { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub age_restriction: AgeRestrictionResult,
    pub contraindications_findings: Vec<Finding>,
}

/// Top-level report for one document, labelled with a caller-supplied drug name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub drug_name: String,
    pub analysis: Analysis,
}
