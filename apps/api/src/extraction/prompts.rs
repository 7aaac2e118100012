//! Prompt construction for the extraction pipeline.
//!
//! `build_prompt` is a pure function: the same (kind, resume text) pair
//! always produces identical request text. The full document text is passed
//! verbatim on every call, with no truncation or summarization.

use crate::schema::EntityKind;

/// Shared system prompt for every extraction call.
pub const RESUME_PARSER_SYSTEM: &str = "You are a precise resume parser. \
    Extract structured data from the resume text exactly as requested. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Use null for optional fields the resume does not mention.";

/// Per-section instruction line that opens the prompt.
fn instruction(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::PersonalInfo => {
            "Extract the following personal information from the resume text:"
        }
        EntityKind::Skills => {
            "From the resume text, extract a list of skills and their corresponding \
             occupations. Each item should be a pair of:"
        }
        EntityKind::Education => {
            "From the resume text, extract all education details. For each entry, provide:"
        }
        EntityKind::Employment => {
            "From the resume text, extract the employment history. For each job, provide:"
        }
        EntityKind::Projects => {
            "From the resume text, extract details about projects. For each project, return:"
        }
        EntityKind::Certifications => {
            "From the resume text, extract certification details. For each certification, return:"
        }
        EntityKind::Awards => {
            "From the resume text, extract a list of awards or honors received by the \
             person. For each award, include:"
        }
        EntityKind::Languages => {
            "From the resume text, extract languages the person knows. For each language, return:"
        }
        EntityKind::Memberships => {
            "Extract details about professional or academic memberships. For each, include:"
        }
        EntityKind::Training => "Extract training programs attended. For each one, return:",
        EntityKind::Skilling => {
            "From the resume text, extract skills learned through training. For each \
             skill, include:"
        }
        EntityKind::Conferences => "Extract all conferences attended. For each, include:",
    }
}

/// Builds the full completion request text for one entity kind and one
/// document's text: instruction line, enumerated field list, list directive
/// for multi-instance kinds, the schema's format instructions, and the
/// verbatim resume text. Empty text still yields a well-formed prompt.
pub fn build_prompt(kind: EntityKind, resume_text: &str) -> String {
    let schema = kind.schema();
    let list_directive = if schema.multi_instance {
        "\n\nFormat the output as a JSON list."
    } else {
        ""
    };
    format!(
        "{instruction}\n{fields}{list_directive}\n\n{format_instructions}\n\nResume text:\n{resume_text}",
        instruction = instruction(kind),
        fields = schema.field_list(),
        format_instructions = schema.format_instructions(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jane Doe\nSoftware Engineer at Acme Corp since 2019.";

    #[test]
    fn test_build_prompt_is_deterministic() {
        for kind in EntityKind::ALL {
            assert_eq!(build_prompt(kind, SAMPLE), build_prompt(kind, SAMPLE));
        }
    }

    #[test]
    fn test_prompt_carries_the_verbatim_resume_text() {
        let prompt = build_prompt(EntityKind::Employment, SAMPLE);
        assert!(prompt.ends_with(SAMPLE));
        assert!(prompt.contains("Resume text:\n"));
    }

    #[test]
    fn test_prompt_enumerates_schema_fields() {
        let prompt = build_prompt(EntityKind::Education, SAMPLE);
        assert!(prompt.contains("- institution"));
        assert!(prompt.contains("- endDate (object: date, month, year)"));
    }

    #[test]
    fn test_multi_instance_prompts_ask_for_a_list() {
        let prompt = build_prompt(EntityKind::Awards, SAMPLE);
        assert!(prompt.contains("Format the output as a JSON list."));
    }

    #[test]
    fn test_single_instance_prompt_asks_for_an_object() {
        let prompt = build_prompt(EntityKind::PersonalInfo, SAMPLE);
        assert!(!prompt.contains("Format the output as a JSON list."));
        assert!(prompt.contains("single JSON object"));
    }

    #[test]
    fn test_empty_document_still_produces_a_well_formed_prompt() {
        let prompt = build_prompt(EntityKind::Skills, "");
        assert!(prompt.contains("- skill"));
        assert!(prompt.ends_with("Resume text:\n"));
    }
}
