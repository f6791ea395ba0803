// src/extractors/section.rs

// --- Imports ---
use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use thiserror::Error;

// --- Constants ---
/// SPC clinical particulars all live under major section 4.
pub const CLINICAL_PARTICULARS_MAJOR: u32 = 4;

// --- Data Structures ---

/// Dotted subsection number such as `4.2`. Used purely as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubsectionId {
    pub major: u32,
    pub minor: Option<u32>,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid subsection id: '{0}'")]
pub struct ParseSubsectionIdError(String);

impl SubsectionId {
    pub const POPULATION: SubsectionId = SubsectionId::new(CLINICAL_PARTICULARS_MAJOR, 2);
    pub const CONTRAINDICATIONS: SubsectionId = SubsectionId::new(CLINICAL_PARTICULARS_MAJOR, 3);

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor: Some(minor) }
    }

    pub const fn major_only(major: u32) -> Self {
        Self { major, minor: None }
    }

    /// Pattern for the heading that terminates this subsection.
    ///
    /// With a minor part the boundary is always `major.(minor + 1)`, whether or
    /// not that subsection exists in the document. Without one, any
    /// `major.<digit>` heading ends the span.
    fn boundary_pattern(&self) -> String {
        match self.minor {
            Some(minor) => {
                let next = format!("{}.{}", self.major, minor.saturating_add(1));
                format!(r"(?i)\s+{}", regex::escape(&next))
            }
            None => format!(r"(?i)\s+{}\.\d", self.major),
        }
    }
}

impl fmt::Display for SubsectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minor {
            Some(minor) => write!(f, "{}.{}", self.major, minor),
            None => write!(f, "{}", self.major),
        }
    }
}

impl FromStr for SubsectionId {
    type Err = ParseSubsectionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSubsectionIdError(s.to_string());
        let mut parts = s.trim().split('.');
        let major = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let minor = match parts.next() {
            Some(p) => Some(p.parse().map_err(|_| invalid())?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self { major, minor })
    }
}

/// Slice of the normalized document belonging to one subsection.
/// An empty span means the subsection heading was never found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> SectionSpan<'a> {
    pub const fn empty() -> Self {
        Self { text: "", offset: 0 }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte range inside the source document, `None` for the empty span.
    pub fn range(&self) -> Option<Range<usize>> {
        if self.is_empty() {
            None
        } else {
            Some(self.offset..self.offset + self.text.len())
        }
    }
}

// --- Locator ---

/// Returns the text of `section_id` from its first occurrence up to (not
/// including) the whitespace before the first following boundary heading, or
/// to the end of the document.
///
/// There is no heading-context check: the first literal occurrence of the id
/// wins, even if it is an incidental mention (a page reference, part of a
/// longer number) that precedes the real heading.
pub fn locate<'a>(document: &'a str, section_id: &SubsectionId) -> SectionSpan<'a> {
    let literal = section_id.to_string();

    // the id is digits and dots, so case-insensitivity is moot here
    let Some(start) = document.find(&literal) else {
        tracing::debug!("Subsection {} not present in document", literal);
        return SectionSpan::empty();
    };

    let body_start = start + literal.len();
    let end = match Regex::new(&section_id.boundary_pattern()) {
        Ok(boundary) => boundary
            .find(&document[body_start..])
            .map(|m| body_start + m.start())
            .unwrap_or(document.len()),
        Err(e) => {
            // only reachable with a pathological id; fall back to end of text
            tracing::warn!("Boundary pattern for {} failed to compile: {}", literal, e);
            document.len()
        }
    };

    tracing::debug!("Located subsection {} at bytes {}..{}", literal, start, end);
    SectionSpan { text: &document[start..end], offset: start }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_ids() {
        assert_eq!("4.2".parse::<SubsectionId>(), Ok(SubsectionId::new(4, 2)));
        assert_eq!("4".parse::<SubsectionId>(), Ok(SubsectionId::major_only(4)));
        assert!("4.x".parse::<SubsectionId>().is_err());
        assert!("4.2.1".parse::<SubsectionId>().is_err());
        assert!("".parse::<SubsectionId>().is_err());
        assert_eq!(SubsectionId::CONTRAINDICATIONS.to_string(), "4.3");
    }

    #[test]
    fn span_stops_before_next_minor_section() {
        let doc = "4.1 Indikace text 4.2 Dávkování Děti do 12 let 4.3 Kontraindikace viz bod 4.2";
        let span = locate(doc, &SubsectionId::POPULATION);
        assert_eq!(span.as_str(), "4.2 Dávkování Děti do 12 let");
        assert!(!span.as_str().contains("4.3"));
        assert!(!span.as_str().contains("Kontraindikace"));
    }

    #[test]
    fn span_runs_to_end_without_boundary() {
        let doc = "úvod 4.3 Kontraindikace Přecitlivělost na léčivou látku";
        let span = locate(doc, &SubsectionId::CONTRAINDICATIONS);
        assert_eq!(span.as_str(), "4.3 Kontraindikace Přecitlivělost na léčivou látku");
        assert_eq!(span.range(), Some(6..doc.len()));
    }

    #[test]
    fn boundary_is_always_minor_plus_one() {
        // 4.3 is absent, so 4.4 does not end the 4.2 span
        let doc = "4.2 Dávkování 4.4 Upozornění 4.5 Interakce";
        let span = locate(doc, &SubsectionId::POPULATION);
        assert_eq!(span.as_str(), doc);
    }

    #[test]
    fn missing_section_yields_empty_span() {
        let span = locate("4.1 Indikace 4.3 Kontraindikace", &SubsectionId::POPULATION);
        assert!(span.is_empty());
        assert_eq!(span.range(), None);
        assert!(locate("", &SubsectionId::CONTRAINDICATIONS).is_empty());
    }

    #[test]
    fn first_occurrence_wins_even_when_incidental() {
        // known limitation: an early mention is taken as the heading
        let doc = "obsah viz 4.2 níže 4.3 Kontraindikace 4.2 Dávkování";
        let span = locate(doc, &SubsectionId::POPULATION);
        assert_eq!(span.as_str(), "4.2 níže");
    }

    #[test]
    fn major_only_id_stops_at_any_subsection() {
        let doc = "4 KLINICKÉ ÚDAJE úvod 4.1 Terapeutické indikace";
        let span = locate(doc, &SubsectionId::major_only(4));
        assert_eq!(span.as_str(), "4 KLINICKÉ ÚDAJE úvod");
    }

    #[test]
    fn boundary_requires_preceding_whitespace() {
        // "14.3" does not end 4.2 because no whitespace precedes "4.3"
        let doc = "4.2 Dávkování tablet 14.3 mg 4.3 Kontraindikace";
        let span = locate(doc, &SubsectionId::POPULATION);
        assert_eq!(span.as_str(), "4.2 Dávkování tablet 14.3 mg");
    }
}
