// src/extractors/age.rs
use crate::document::NormalizedDocument;
use crate::extractors::models::AgeRestrictionResult;
use crate::extractors::section::{locate, SubsectionId};
use once_cell::sync::Lazy;
use regex::Regex;

/// A numeric "younger than N years" phrasing. Group 1 captures N.
pub struct AgeRule {
    pub name: &'static str,
    pub pattern: Regex,
}

/// Fallback for sections that restrict children without giving an age.
pub struct PediatricRule {
    pub marker: &'static str,
    pub qualifiers: &'static [&'static str],
    pub evidence: &'static str,
}

// Priority order matters: first matching rule wins.
static AGE_RULES: Lazy<Vec<AgeRule>> = Lazy::new(|| {
    [
        ("do_n_let", r"(?i)do\s+(\d+)\s+let"),
        ("mladsi_n_let", r"(?i)mladší\s+(\d+)\s+let"),
        ("mladsich_n_let", r"(?i)mladších\s+(\d+)\s+let"),
        ("pod_n_let", r"(?i)pod\s+(\d+)\s+let"),
    ]
    .iter()
    .filter_map(|&(name, pat)| Regex::new(pat).ok().map(|pattern| AgeRule { name, pattern }))
    .collect()
});

static PEDIATRIC_RULE: PediatricRule = PediatricRule {
    marker: "pediatrick",
    qualifiers: &["nebyla stanovena", "nejsou údaje", "nedoporučuje"],
    evidence: "Nalezena zmínka o omezení pro pediatrickou populaci bez konkrétního čísla.",
};

impl PediatricRule {
    fn matches(&self, section_text: &str) -> bool {
        let lowered = section_text.to_lowercase();
        lowered.contains(self.marker) && self.qualifiers.iter().any(|q| lowered.contains(q))
    }
}

/// Classifies subsection 4.2 into a minimum-age record.
pub fn analyze_age_restriction(document: &NormalizedDocument) -> AgeRestrictionResult {
    let span = locate(document.as_str(), &SubsectionId::POPULATION);
    if span.is_empty() {
        return AgeRestrictionResult::unknown();
    }
    classify_age_section(span.as_str())
}

/// Runs the rule table against already-isolated section text.
pub fn classify_age_section(section_text: &str) -> AgeRestrictionResult {
    for rule in AGE_RULES.iter() {
        let Some(caps) = rule.pattern.captures(section_text) else {
            continue;
        };
        // \d is Unicode-aware, so the capture may not parse as u32
        match caps[1].parse::<u32>() {
            Ok(age) => {
                tracing::debug!("Age rule '{}' matched '{}'", rule.name, &caps[0]);
                return AgeRestrictionResult::restricted(age, &caps[0]);
            }
            Err(e) => {
                tracing::trace!("Age rule '{}' captured unusable number '{}': {}", rule.name, &caps[1], e);
            }
        }
    }

    if PEDIATRIC_RULE.matches(section_text) {
        tracing::debug!("No numeric age limit; pediatric restriction wording found");
        return AgeRestrictionResult::not_recommended_pediatric(PEDIATRIC_RULE.evidence);
    }

    tracing::debug!("No age restriction pattern recognised in 4.2 ({} bytes)", section_text.len());
    AgeRestrictionResult::unknown()
}
