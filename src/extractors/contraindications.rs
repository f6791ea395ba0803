// src/extractors/contraindications.rs
use crate::document::NormalizedDocument;
use crate::extractors::models::Finding;
use crate::extractors::section::{locate, SubsectionId};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Items this short are splitting noise ("a", "na", stray letters).
const MIN_ALLERGY_ITEM_CHARS: usize = 3;

// --- Regex Patterns (Lazy Static) ---
static ALLERGY_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Hypersenzitivita|Přecitlivělost|Alergie)")
        .expect("Failed to compile ALLERGY_MARKER_RE")
});

// Where an allergy phrase ends: a dash or bullet list item, a new sentence
// about patients or conditions, or the end of the section.
static ALLERGY_TERMINATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+-\s|\s+•\s|\s+pacienti|\s+stavy|\s*$")
        .expect("Failed to compile ALLERGY_TERMINATOR_RE")
});

static ALLERGY_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Hypersenzitivita|Přecitlivělost|Alergie)(?:\s+na)?\s*")
        .expect("Failed to compile ALLERGY_PREFIX_RE")
});

static ALLERGY_ITEM_SPLIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r",|\snebo\s").expect("Failed to compile ALLERGY_ITEM_SPLIT_RE")
});

static SECTION_REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:bod[a-ž]*|část[a-ž]*|viz)\s+(\d+\.\d+)")
        .expect("Failed to compile SECTION_REFERENCE_RE")
});

pub fn reference_note(section: &str) -> String {
    format!("Nutno zkontrolovat sekci {}.", section)
}

/// Extracts allergy mentions and cross-references from subsection 4.3.
///
/// Allergy findings come first, in text order, followed by one reference
/// finding per distinct section number.
pub fn analyze_allergies_and_references(document: &NormalizedDocument) -> Vec<Finding> {
    let span = locate(document.as_str(), &SubsectionId::CONTRAINDICATIONS);
    if span.is_empty() {
        return Vec::new();
    }

    let mut findings = extract_allergies(span.as_str());
    findings.extend(extract_references(span.as_str()));
    tracing::debug!("Contraindications analysis produced {} findings", findings.len());
    findings
}

/// Finds the first hypersensitivity phrase and splits it into individual substances.
pub fn extract_allergies(section_text: &str) -> Vec<Finding> {
    let Some(marker) = ALLERGY_MARKER_RE.find(section_text) else {
        tracing::trace!("No allergy marker in section text");
        return Vec::new();
    };

    // the terminator regex always matches, at worst at end of text
    let rest = &section_text[marker.end()..];
    let phrase_end = ALLERGY_TERMINATOR_RE
        .find(rest)
        .map(|m| marker.end() + m.start())
        .unwrap_or(section_text.len());
    let phrase = &section_text[marker.start()..phrase_end];
    tracing::debug!("Allergy phrase: '{}'", phrase);

    let cleaned = ALLERGY_PREFIX_RE.replace_all(phrase, "");
    ALLERGY_ITEM_SPLIT_RE
        .split(&cleaned)
        .map(|item| item.trim().trim_matches(|c: char| c == '.' || c == ';'))
        .filter(|item| item.chars().count() >= MIN_ALLERGY_ITEM_CHARS)
        .map(|item| Finding::AllergyText { value: item.to_string() })
        .collect()
}

/// Collects every "bod/část/viz N.N" reference, deduplicated.
///
/// Duplicates are dropped keeping the first occurrence, so the output order is
/// deterministic; callers should still treat it as a set.
pub fn extract_references(section_text: &str) -> Vec<Finding> {
    let mut seen = HashSet::new();
    SECTION_REFERENCE_RE
        .captures_iter(section_text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|section| seen.insert(*section))
        .map(|section| Finding::SectionReference {
            value: section.to_string(),
            note: reference_note(section),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(Finding::value).collect()
    }

    fn reference_set(findings: &[Finding]) -> HashSet<&str> {
        findings.iter().filter(|f| f.is_reference()).map(Finding::value).collect()
    }

    #[test]
    fn splits_on_nebo_and_strips_marker() {
        let doc = NormalizedDocument::new(
            "4.3 Kontraindikace Přecitlivělost na buprenorfin nebo laktózu. 4.4 Zvláštní upozornění",
        );
        let findings = analyze_allergies_and_references(&doc);
        assert_eq!(
            findings,
            vec![
                Finding::AllergyText { value: "buprenorfin".into() },
                Finding::AllergyText { value: "laktózu".into() },
            ]
        );
    }

    #[test]
    fn phrase_stops_at_dash_list_item() {
        let findings = extract_allergies(
            "4.3 Kontraindikace Hypersenzitivita na léčivou látku, sóju - závažná respirační insuficience",
        );
        assert_eq!(values(&findings), vec!["léčivou látku", "sóju"]);
    }

    #[test]
    fn phrase_stops_at_bullet_and_patient_sentence() {
        let bullet = extract_allergies("Alergie na arašídy • myasthenia gravis");
        assert_eq!(values(&bullet), vec!["arašídy"]);

        let patients = extract_allergies("Přecitlivělost na opioidy; pacienti s delirium tremens");
        assert_eq!(values(&patients), vec!["opioidy"]);

        let conditions = extract_allergies("hypersenzitivita na morfin stavy akutní intoxikace");
        assert_eq!(values(&conditions), vec!["morfin"]);
    }

    #[test]
    fn short_items_are_dropped() {
        let findings = extract_allergies("Přecitlivělost na kodein, X, nebo ab, tramadol.");
        assert_eq!(values(&findings), vec!["kodein", "tramadol"]);
    }

    #[test]
    fn no_marker_means_no_allergies() {
        assert!(extract_allergies("4.3 Kontraindikace Těžká jaterní insuficience.").is_empty());
    }

    #[test]
    fn references_are_deduplicated() {
        let findings = extract_references(
            "4.3 Kontraindikace (viz bod 4.4 a bod 4.8) dále viz bod 4.4",
        );
        assert_eq!(findings.len(), 2);
        assert_eq!(reference_set(&findings), HashSet::from(["4.4", "4.8"]));
        for finding in &findings {
            match finding {
                Finding::SectionReference { value, note } => assert!(note.contains(value.as_str())),
                other => panic!("unexpected finding {:?}", other),
            }
        }
    }

    #[test]
    fn inflected_reference_markers_match() {
        let findings = extract_references("uvedenou v bodě 6.1 a v části 5.2; Viz 4.5");
        assert_eq!(reference_set(&findings), HashSet::from(["6.1", "5.2", "4.5"]));
    }

    #[test]
    fn references_come_after_allergies_and_scan_whole_span() {
        let doc = NormalizedDocument::new(
            "4.3 Kontraindikace Hypersenzitivita na léčivou látku nebo na kteroukoli pomocnou látku \
             uvedenou v bodě 6.1 - pacienti s těžkou respirační insuficiencí (viz bod 4.8). \
             4.4 Zvláštní upozornění viz bod 4.9",
        );
        let findings = analyze_allergies_and_references(&doc);

        let allergies: Vec<&str> =
            findings.iter().filter(|f| f.is_allergy()).map(Finding::value).collect();
        assert_eq!(
            allergies,
            vec!["léčivou látku", "na kteroukoli pomocnou látku uvedenou v bodě 6.1"]
        );
        assert_eq!(reference_set(&findings), HashSet::from(["6.1", "4.8"]));

        let first_reference = findings.iter().position(Finding::is_reference).unwrap();
        assert!(findings[..first_reference].iter().all(Finding::is_allergy));
        assert!(findings[first_reference..].iter().all(Finding::is_reference));
    }

    #[test]
    fn missing_section_yields_no_findings() {
        let doc = NormalizedDocument::new("4.2 Dávkování Přecitlivělost na laktózu viz bod 4.4");
        assert!(analyze_allergies_and_references(&doc).is_empty());
        assert!(analyze_allergies_and_references(&NormalizedDocument::new("")).is_empty());
    }

    #[test]
    fn analysis_is_idempotent() {
        let doc = NormalizedDocument::new(
            "4.3 Kontraindikace Alergie na penicilin, cefalosporiny viz bod 4.4, bod 4.8, bod 4.4",
        );
        assert_eq!(
            analyze_allergies_and_references(&doc),
            analyze_allergies_and_references(&doc)
        );
    }
}
