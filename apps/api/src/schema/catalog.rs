//! The static schema catalogue: one `EntitySchema` per extractable resume
//! section. Pure data, no behavior — rendering and validation live in the
//! parent module and in `extraction::validate`.

use crate::schema::{EntitySchema, FieldSpec, FieldType};

const fn required(
    name: &'static str,
    field_type: FieldType,
    description: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        field_type,
        required: true,
        description,
    }
}

const fn optional(
    name: &'static str,
    field_type: FieldType,
    description: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        field_type,
        required: false,
        description,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared sub-shapes
// ────────────────────────────────────────────────────────────────────────────

/// Loose date representation: source documents write days, months, and years
/// inconsistently, so every component is an optional string and no calendar
/// validation is performed.
pub(crate) const PARTIAL_DATE: &[FieldSpec] = &[
    optional("date", FieldType::String, "Day of the month like '01'"),
    optional("month", FieldType::String, "Month like 'August'"),
    optional("year", FieldType::String, "Year like '2019'"),
];

const MOBILE_NUMBER: &[FieldSpec] = &[
    optional("countryCode", FieldType::String, "Country code like +1 or +91"),
    optional(
        "number",
        FieldType::String,
        "Phone number without country code",
    ),
];

const SOCIAL_URLS: &[FieldSpec] = &[
    optional("linkedin", FieldType::String, "LinkedIn profile URL"),
    optional("github", FieldType::String, "GitHub profile URL"),
];

pub(crate) const EMPLOYMENT_TYPES: &[&str] =
    &["full_time", "part_time", "freelance", "internship", "own"];

pub(crate) const PROJECT_TYPES: &[&str] = &["own", "employment", "academic"];

// ────────────────────────────────────────────────────────────────────────────
// Entity schemas
// ────────────────────────────────────────────────────────────────────────────

pub(crate) static PERSONAL_INFO: EntitySchema = EntitySchema {
    name: "PersonalInfo",
    multi_instance: false,
    fields: &[
        optional("firstName", FieldType::String, "First name of the person"),
        optional("lastName", FieldType::String, "Last name of the person"),
        optional("email", FieldType::String, "Email address"),
        optional(
            "mobileNumber",
            FieldType::Object(MOBILE_NUMBER),
            "Phone number with country code split",
        ),
        optional(
            "dateOfBirth",
            FieldType::Object(PARTIAL_DATE),
            "Date of birth as an object",
        ),
        optional("address", FieldType::String, "Full address"),
        optional("country", FieldType::String, "Country"),
        optional("state", FieldType::String, "State"),
        optional("city", FieldType::String, "City"),
        optional("postalCode", FieldType::String, "Postal code or ZIP"),
        optional(
            "about",
            FieldType::String,
            "About or summary section from resume",
        ),
        optional(
            "socialUrls",
            FieldType::Object(SOCIAL_URLS),
            "Social profile URLs",
        ),
    ],
};

pub(crate) static SKILLS: EntitySchema = EntitySchema {
    name: "SkillsItem",
    multi_instance: true,
    fields: &[
        required(
            "skill",
            FieldType::String,
            "Skill name like Python, Excel, etc.",
        ),
        required(
            "occupation",
            FieldType::String,
            "Occupation or job title this skill relates to (e.g. Software Developer)",
        ),
    ],
};

pub(crate) static EDUCATION: EntitySchema = EntitySchema {
    name: "EducationItem",
    multi_instance: true,
    fields: &[
        required(
            "institution",
            FieldType::String,
            "Name of the educational institution",
        ),
        required("course", FieldType::String, "Degree or course studied"),
        optional(
            "location",
            FieldType::String,
            "City and country of the institution",
        ),
        optional(
            "startDate",
            FieldType::Object(PARTIAL_DATE),
            "Start date of the course",
        ),
        optional(
            "endDate",
            FieldType::Object(PARTIAL_DATE),
            "End date of the course",
        ),
        optional(
            "description",
            FieldType::String,
            "Details of coursework or achievements",
        ),
    ],
};

pub(crate) static EMPLOYMENT: EntitySchema = EntitySchema {
    name: "EmploymentItem",
    multi_instance: true,
    fields: &[
        required(
            "organizationName",
            FieldType::String,
            "Name of the company or organization",
        ),
        optional(
            "durationInMonths",
            FieldType::Integer,
            "Duration of employment in months",
        ),
        required(
            "type",
            FieldType::Enum(EMPLOYMENT_TYPES),
            "Type of employment, one of: full_time, part_time, freelance, internship, own",
        ),
        optional("location", FieldType::String, "Location of the organization"),
        optional(
            "startDate",
            FieldType::Object(PARTIAL_DATE),
            "Start date of the employment",
        ),
        optional(
            "endDate",
            FieldType::Object(PARTIAL_DATE),
            "End date of the employment",
        ),
        optional("jobTitle", FieldType::String, "Job title or position held"),
    ],
};

pub(crate) static PROJECTS: EntitySchema = EntitySchema {
    name: "ProjectItem",
    multi_instance: true,
    fields: &[
        required("projectName", FieldType::String, "Name of the project"),
        optional(
            "startDate",
            FieldType::Object(PARTIAL_DATE),
            "Start date of the project",
        ),
        optional(
            "endDate",
            FieldType::Object(PARTIAL_DATE),
            "End date of the project",
        ),
        optional(
            "durationInMonths",
            FieldType::Integer,
            "Duration of the project in months",
        ),
        optional(
            "description",
            FieldType::String,
            "Brief summary of the project",
        ),
        optional(
            "organizationName",
            FieldType::String,
            "Name of the organization where project was done",
        ),
        optional(
            "location",
            FieldType::String,
            "Location where the project was done",
        ),
        required(
            "type",
            FieldType::Enum(PROJECT_TYPES),
            "Type of project: own, employment, or academic",
        ),
    ],
};

pub(crate) static CERTIFICATIONS: EntitySchema = EntitySchema {
    name: "CertificationItem",
    multi_instance: true,
    fields: &[
        required(
            "certificationName",
            FieldType::String,
            "Name of the certification",
        ),
        optional(
            "organizationName",
            FieldType::String,
            "Issuing organization name",
        ),
        optional("location", FieldType::String, "Location of the organization"),
        optional(
            "startDate",
            FieldType::Object(PARTIAL_DATE),
            "Start date of the certification course",
        ),
        optional(
            "endDate",
            FieldType::Object(PARTIAL_DATE),
            "End date of the certification course",
        ),
        optional("durationInMonths", FieldType::Integer, "Duration in months"),
        optional(
            "description",
            FieldType::String,
            "Details or summary of the certification",
        ),
    ],
};

pub(crate) static AWARDS: EntitySchema = EntitySchema {
    name: "AwardItem",
    multi_instance: true,
    fields: &[
        required("awardName", FieldType::String, "Name of the award"),
        optional(
            "location",
            FieldType::String,
            "Location where the award was received",
        ),
        optional(
            "givenDate",
            FieldType::Object(PARTIAL_DATE),
            "Date the award was received",
        ),
        optional(
            "description",
            FieldType::String,
            "Description of the award or its context",
        ),
    ],
};

pub(crate) static LANGUAGES: EntitySchema = EntitySchema {
    name: "LanguageItem",
    multi_instance: true,
    fields: &[
        required("language", FieldType::String, "Language name"),
        optional(
            "read",
            FieldType::Boolean,
            "Can the user read this language?",
        ),
        optional(
            "write",
            FieldType::Boolean,
            "Can the user write this language?",
        ),
        optional(
            "speak",
            FieldType::Boolean,
            "Can the user speak this language?",
        ),
    ],
};

pub(crate) static MEMBERSHIPS: EntitySchema = EntitySchema {
    name: "MembershipItem",
    multi_instance: true,
    fields: &[
        required(
            "organization",
            FieldType::String,
            "Name of the membership organization",
        ),
        optional(
            "durationInMonths",
            FieldType::Integer,
            "Duration of membership in months",
        ),
        optional("location", FieldType::String, "Location of the organization"),
        optional(
            "description",
            FieldType::String,
            "Details about the membership",
        ),
    ],
};

pub(crate) static TRAINING: EntitySchema = EntitySchema {
    name: "TrainingItem",
    multi_instance: true,
    fields: &[
        required(
            "trainingName",
            FieldType::String,
            "Name of the training program",
        ),
        optional(
            "organization",
            FieldType::String,
            "Organization that conducted the training",
        ),
        optional("location", FieldType::String, "Location of the training"),
        optional(
            "startDate",
            FieldType::Object(PARTIAL_DATE),
            "Training start date",
        ),
        optional(
            "endDate",
            FieldType::Object(PARTIAL_DATE),
            "Training end date",
        ),
    ],
};

pub(crate) static SKILLING: EntitySchema = EntitySchema {
    name: "SkillingItem",
    multi_instance: true,
    fields: &[
        required(
            "skillingName",
            FieldType::String,
            "Name of the skill acquired or course",
        ),
        optional(
            "organization",
            FieldType::String,
            "Organization providing the skill training",
        ),
        optional(
            "location",
            FieldType::String,
            "Location of the skill training",
        ),
        optional(
            "startDate",
            FieldType::Object(PARTIAL_DATE),
            "Start date of skilling",
        ),
        optional(
            "endDate",
            FieldType::Object(PARTIAL_DATE),
            "End date of skilling",
        ),
        optional(
            "description",
            FieldType::String,
            "Additional details about the skilling",
        ),
        optional(
            "durationInMonths",
            FieldType::Integer,
            "Total duration in months",
        ),
    ],
};

pub(crate) static CONFERENCES: EntitySchema = EntitySchema {
    name: "ConferenceItem",
    multi_instance: true,
    fields: &[
        required(
            "conferenceName",
            FieldType::String,
            "Name of the conference",
        ),
        optional("organization", FieldType::String, "Organizing body"),
        optional("location", FieldType::String, "Conference location"),
        optional(
            "startDate",
            FieldType::Object(PARTIAL_DATE),
            "Start date of the conference",
        ),
        optional(
            "endDate",
            FieldType::Object(PARTIAL_DATE),
            "End date of the conference",
        ),
        optional(
            "description",
            FieldType::String,
            "Details about the conference",
        ),
        optional(
            "durationInMonths",
            FieldType::Integer,
            "Duration of the conference in months",
        ),
    ],
};
