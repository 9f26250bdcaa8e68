//! Prompt construction
//!
//! One instruction template per subject field. The template asks the model to
//! reply with a JSON object holding exactly the keys `Explanation`,
//! `Example`, `Test`, `Solution` - the same key set the response normalizer
//! reads, so the two sides can never drift apart.

use crate::error::{Error, Result};

// ============================================================================
// Subject Fields
// ============================================================================

/// The academic/professional lens applied to the generation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ArchitectureAndDesign,
    Arts,
    BusinessAndEconomics,
    Education,
    EngineeringAndTechnology,
    EnvironmentalStudies,
    Humanities,
    Law,
    MedicineAndHealthSciences,
    NaturalSciences,
    SocialSciences,
    MathematicsAndComputerScience,
    InterdisciplinaryStudies,
}

/// All supported fields, in menu order.
pub const ALL_FIELDS: [Field; 13] = [
    Field::ArchitectureAndDesign,
    Field::Arts,
    Field::BusinessAndEconomics,
    Field::Education,
    Field::EngineeringAndTechnology,
    Field::EnvironmentalStudies,
    Field::Humanities,
    Field::Law,
    Field::MedicineAndHealthSciences,
    Field::NaturalSciences,
    Field::SocialSciences,
    Field::MathematicsAndComputerScience,
    Field::InterdisciplinaryStudies,
];

impl Field {
    /// Display name, exactly as shown in the field selector.
    pub fn name(&self) -> &'static str {
        match self {
            Field::ArchitectureAndDesign => "Architecture & Design",
            Field::Arts => "Arts",
            Field::BusinessAndEconomics => "Business & Economics",
            Field::Education => "Education",
            Field::EngineeringAndTechnology => "Engineering & Technology",
            Field::EnvironmentalStudies => "Environmental Studies",
            Field::Humanities => "Humanities",
            Field::Law => "Law",
            Field::MedicineAndHealthSciences => "Medicine & Health Sciences",
            Field::NaturalSciences => "Natural Sciences",
            Field::SocialSciences => "Social Sciences",
            Field::MathematicsAndComputerScience => "Mathematics & Computer Science",
            Field::InterdisciplinaryStudies => "Interdisciplinary Studies",
        }
    }

    /// Resolve a user-supplied field name.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_FIELDS.iter().copied().find(|f| f.name() == name)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Prompt Builder
// ============================================================================

/// Reply keys the templates request and the normalizer reads.
pub const REPLY_KEYS: [&str; 4] = ["Explanation", "Example", "Test", "Solution"];

/// Instruction template shared by all fields; only the subject name varies.
const TEMPLATE: &str = "\
You are an expert in {field}. Your task is to explain the content on the given page, \
provide a relevant example, and create a mini test with solutions.

Page Content: {page_content}

I want the response in the following structured format:
{\"Explanation\": \"\", \"Example\": \"\", \"Test\": \"\", \"Solution\": \"\"}";

/// Build the instruction string for one page.
///
/// Fails with [`Error::UnknownField`] when `field` names no template; the
/// caller skips that page and continues with the rest of the submission.
pub fn build(field: &str, page_text: &str) -> Result<String> {
    let field = Field::from_name(field).ok_or_else(|| Error::UnknownField {
        field: field.to_string(),
    })?;
    Ok(render(field, page_text))
}

/// Substitute the subject and page text into the template.
pub fn render(field: Field, page_text: &str) -> String {
    TEMPLATE
        .replace("{field}", field.name())
        .replace("{page_content}", page_text)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirteen_fields_round_trip() {
        assert_eq!(ALL_FIELDS.len(), 13);
        for field in ALL_FIELDS {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
    }

    #[test]
    fn test_build_substitutes_subject_and_page() {
        let prompt = build("Law", "Contracts require offer and acceptance.").unwrap();
        assert!(prompt.contains("an expert in Law"));
        assert!(prompt.contains("Page Content: Contracts require offer and acceptance."));
        assert!(!prompt.contains("{page_content}"));
        assert!(!prompt.contains("{field}"));
    }

    #[test]
    fn test_build_requests_the_normalized_key_set() {
        let prompt = build("Arts", "page text").unwrap();
        for key in REPLY_KEYS {
            assert!(prompt.contains(&format!("\"{key}\"")), "missing key {key}");
        }
        // the legacy variant keys must not reappear
        assert!(!prompt.contains("Mini Test"));
        assert!(!prompt.contains("Raw Response"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = build("Alchemy", "text").unwrap_err();
        assert!(matches!(err, crate::error::Error::UnknownField { .. }));
    }
}
