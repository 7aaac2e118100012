//! Entity Schema Registry — the typed shapes of everything extractable from a
//! resume, declared as ordinary static data.
//!
//! Each of the 12 resume sections has one `EntitySchema` in `catalog`. The
//! registry is immutable: `EntityKind::schema()` is the only lookup, and the
//! two renderers below are pure functions of the static data. The same schema
//! drives both the prompt text sent to the completion model and the
//! validation of whatever comes back (`extraction::validate`).

mod catalog;

use std::fmt;

/// The type of a single schema field.
#[derive(Debug)]
pub enum FieldType {
    String,
    Boolean,
    Integer,
    /// String restricted to a fixed literal set.
    Enum(&'static [&'static str]),
    /// Nested object with its own field list.
    Object(&'static [FieldSpec]),
}

/// One named field of an entity schema.
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub description: &'static str,
}

/// The declared shape of one extractable resume section.
///
/// `multi_instance` drives the validator's list coercion: multi-instance
/// kinds always yield a JSON array, single-instance kinds a bare object.
#[derive(Debug)]
pub struct EntitySchema {
    pub name: &'static str,
    pub multi_instance: bool,
    pub fields: &'static [FieldSpec],
}

/// The 12 resume section kinds, each backed by one schema and one extraction
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    PersonalInfo,
    Skills,
    Education,
    Employment,
    Projects,
    Certifications,
    Awards,
    Languages,
    Memberships,
    Training,
    Skilling,
    Conferences,
}

impl EntityKind {
    pub const ALL: [EntityKind; 12] = [
        EntityKind::PersonalInfo,
        EntityKind::Skills,
        EntityKind::Education,
        EntityKind::Employment,
        EntityKind::Projects,
        EntityKind::Certifications,
        EntityKind::Awards,
        EntityKind::Languages,
        EntityKind::Memberships,
        EntityKind::Training,
        EntityKind::Skilling,
        EntityKind::Conferences,
    ];

    /// The key this section uses in the aggregate response map.
    pub fn key(self) -> &'static str {
        match self {
            EntityKind::PersonalInfo => "personal_info",
            EntityKind::Skills => "skills",
            EntityKind::Education => "education",
            EntityKind::Employment => "employment",
            EntityKind::Projects => "projects",
            EntityKind::Certifications => "certifications",
            EntityKind::Awards => "awards",
            EntityKind::Languages => "languages",
            EntityKind::Memberships => "memberships",
            EntityKind::Training => "training",
            EntityKind::Skilling => "skilling",
            EntityKind::Conferences => "conferences",
        }
    }

    pub fn schema(self) -> &'static EntitySchema {
        match self {
            EntityKind::PersonalInfo => &catalog::PERSONAL_INFO,
            EntityKind::Skills => &catalog::SKILLS,
            EntityKind::Education => &catalog::EDUCATION,
            EntityKind::Employment => &catalog::EMPLOYMENT,
            EntityKind::Projects => &catalog::PROJECTS,
            EntityKind::Certifications => &catalog::CERTIFICATIONS,
            EntityKind::Awards => &catalog::AWARDS,
            EntityKind::Languages => &catalog::LANGUAGES,
            EntityKind::Memberships => &catalog::MEMBERSHIPS,
            EntityKind::Training => &catalog::TRAINING,
            EntityKind::Skilling => &catalog::SKILLING,
            EntityKind::Conferences => &catalog::CONFERENCES,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

impl EntitySchema {
    /// Human-readable field list embedded in the prompt, one `- name` line
    /// per field with a parenthetical for nested and enum shapes.
    pub fn field_list(&self) -> String {
        self.fields
            .iter()
            .map(field_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Machine-readable schema directive: an annotated JSON shape plus the
    /// framing sentence telling the model whether to emit an array or a
    /// single object.
    pub fn format_instructions(&self) -> String {
        let shape = render_object(self.fields, 1);
        if self.multi_instance {
            format!(
                "The output must be a JSON array where every element conforms to this schema:\n\
                 {shape}\n\
                 Return [] if the resume contains no matching entries. \
                 Do not wrap the array in any enclosing object."
            )
        } else {
            format!(
                "The output must be a single JSON object conforming to this schema:\n\
                 {shape}\n\
                 Use null for any field the resume does not provide."
            )
        }
    }
}

fn field_line(field: &FieldSpec) -> String {
    match &field.field_type {
        FieldType::Object(sub) => {
            let names: Vec<&str> = sub.iter().map(|f| f.name).collect();
            format!("- {} (object: {})", field.name, names.join(", "))
        }
        FieldType::Enum(values) => {
            format!("- {} (only one of: {})", field.name, values.join(", "))
        }
        _ => format!("- {}", field.name),
    }
}

fn render_object(fields: &[FieldSpec], depth: usize) -> String {
    let pad = "  ".repeat(depth);
    let mut out = String::from("{\n");
    for (i, field) in fields.iter().enumerate() {
        let comma = if i + 1 < fields.len() { "," } else { "" };
        let optional = if field.required { "" } else { " (optional)" };
        out.push_str(&format!(
            "{pad}\"{}\": {}{comma}  // {}{optional}\n",
            field.name,
            render_type(&field.field_type, depth),
            field.description,
        ));
    }
    out.push_str(&"  ".repeat(depth - 1));
    out.push('}');
    out
}

fn render_type(field_type: &FieldType, depth: usize) -> String {
    match field_type {
        FieldType::String => "string".to_string(),
        FieldType::Boolean => "boolean".to_string(),
        FieldType::Integer => "integer".to_string(),
        FieldType::Enum(values) => values
            .iter()
            .map(|v| format!("\"{v}\""))
            .collect::<Vec<_>>()
            .join(" | "),
        FieldType::Object(sub) => render_object(sub, depth + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_nonempty_schema() {
        for kind in EntityKind::ALL {
            assert!(
                !kind.schema().fields.is_empty(),
                "{kind} has no fields declared"
            );
        }
    }

    #[test]
    fn test_response_keys_are_unique() {
        let mut keys: Vec<&str> = EntityKind::ALL.iter().map(|k| k.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), EntityKind::ALL.len());
    }

    #[test]
    fn test_personal_info_is_the_only_single_instance_kind() {
        for kind in EntityKind::ALL {
            let single = !kind.schema().multi_instance;
            assert_eq!(single, kind == EntityKind::PersonalInfo, "{kind}");
        }
    }

    #[test]
    fn test_employment_format_instructions_list_enum_literals() {
        let rendered = EntityKind::Employment.schema().format_instructions();
        for literal in ["full_time", "part_time", "freelance", "internship", "own"] {
            assert!(rendered.contains(literal), "missing {literal}");
        }
        assert!(rendered.contains("JSON array"));
    }

    #[test]
    fn test_personal_info_format_instructions_describe_an_object() {
        let rendered = EntityKind::PersonalInfo.schema().format_instructions();
        assert!(rendered.contains("single JSON object"));
        assert!(rendered.contains("\"firstName\": string"));
        // Nested shapes render inline
        assert!(rendered.contains("\"countryCode\": string"));
    }

    #[test]
    fn test_field_list_annotates_nested_and_enum_fields() {
        let education = EntityKind::Education.schema().field_list();
        assert!(education.contains("- institution"));
        assert!(education.contains("- startDate (object: date, month, year)"));

        let projects = EntityKind::Projects.schema().field_list();
        assert!(projects.contains("- type (only one of: own, employment, academic)"));
    }

    #[test]
    fn test_required_fields_are_not_marked_optional_in_shape() {
        let rendered = EntityKind::Education.schema().format_instructions();
        let institution_line = rendered
            .lines()
            .find(|l| l.contains("\"institution\""))
            .expect("institution line");
        assert!(!institution_line.contains("(optional)"));
        let location_line = rendered
            .lines()
            .find(|l| l.contains("\"location\""))
            .expect("location line");
        assert!(location_line.contains("(optional)"));
    }
}
