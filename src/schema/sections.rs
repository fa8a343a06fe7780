// src/schema/sections.rs

use crate::schema::types::{FieldKind, FieldSpec, FormSchema, SectionSpec};

pub const JOB_TYPES: &[&str] = &["full", "intern", "both"];
pub const YES_NO: &[&str] = &["yes", "no"];
pub const YES_NO_OTHER: &[&str] = &["yes", "no", "other"];
pub const GENDERS: &[&str] = &["male", "female", "other"];

pub const US_STATES: &[&str] = &[
    "alabama",
    "alaska",
    "arizona",
    "arkansas",
    "california",
    "colorado",
    "connecticut",
    "delaware",
    "florida",
    "georgia",
    "hawaii",
    "idaho",
    "illinois",
    "indiana",
    "iowa",
    "kansas",
    "kentucky",
    "louisiana",
    "maine",
    "maryland",
    "massachusetts",
    "michigan",
    "minnesota",
    "mississippi",
    "missouri",
    "montana",
    "nebraska",
    "nevada",
    "new-hampshire",
    "new-jersey",
    "new-mexico",
    "new-york",
    "north-carolina",
    "north-dakota",
    "ohio",
    "oklahoma",
    "oregon",
    "pennsylvania",
    "rhode-island",
    "south-carolina",
    "south-dakota",
    "tennessee",
    "texas",
    "utah",
    "vermont",
    "virginia",
    "washington",
    "west-virginia",
    "wisconsin",
    "wyoming",
];

const EMAIL_RULE: &str = "regex:^.+@.+\\..+$";
const ZIP_RULE: &str = "regex:^\\d{5}$";
const LINKEDIN_RULE: &str = "regex:(?i)^(na|https?://(www\\.)?linkedin\\.com/.*)$";

pub fn personal_section() -> SectionSpec {
    SectionSpec {
        id: "personal",
        title: "Personal Information",
        fields: vec![
            FieldSpec::new("firstName", "First Name", FieldKind::Text)
                .required()
                .validators(&["min_len:2"]),
            FieldSpec::new("middleName", "Middle Name", FieldKind::Text),
            FieldSpec::new("lastName", "Last Name", FieldKind::Text)
                .required()
                .validators(&["min_len:2"]),
            FieldSpec::new("email", "Email", FieldKind::Text)
                .required()
                .validators(&[EMAIL_RULE])
                .pattern_hint("Invalid email"),
            FieldSpec::new("phone", "Phone", FieldKind::Text)
                .required()
                .validators(&["min_len:7"]),
            FieldSpec::new("address", "Address", FieldKind::Text)
                .required()
                .validators(&["min_len:2"]),
            FieldSpec::new("city", "City", FieldKind::Text)
                .required()
                .validators(&["min_len:2"]),
            FieldSpec::new("state", "US State", FieldKind::Select)
                .required()
                .choices(US_STATES),
            FieldSpec::new("zip", "Zip", FieldKind::Text)
                .required()
                .validators(&[ZIP_RULE])
                .pattern_hint("Zip must be exactly 5 digits"),
            FieldSpec::new("availableFrom", "Available to work from", FieldKind::Date)
                .required()
                .validators(&["not_past"]),
            FieldSpec::new("nationality", "Nationality", FieldKind::Text)
                .required()
                .validators(&["min_len:2"]),
            FieldSpec::new("linkedin", "LinkedIn URL", FieldKind::Text)
                .required()
                .validators(&[LINKEDIN_RULE])
                .pattern_hint("Enter a valid LinkedIn URL or 'NA'"),
        ],
    }
}

pub fn education_section() -> SectionSpec {
    SectionSpec {
        id: "education",
        title: "Education",
        fields: vec![
            FieldSpec::new("degree", "Degree", FieldKind::Text)
                .required()
                .validators(&["min_len:2"]),
            FieldSpec::new("institution", "Institution", FieldKind::Text)
                .required()
                .validators(&["min_len:2"]),
            FieldSpec::new("graduationYear", "Graduation Year", FieldKind::Int)
                .required()
                .validators(&["min:1900", "max:current_year"]),
        ],
    }
}

pub fn eligibility_section() -> SectionSpec {
    SectionSpec {
        id: "eligibility",
        title: "Work Eligibility",
        fields: vec![
            FieldSpec::new("position", "Position", FieldKind::Text)
                .required()
                .validators(&["min_len:2"]),
            FieldSpec::new("yearsOfExperience", "Years of Experience", FieldKind::Number)
                .required()
                .validators(&["min:0"]),
            FieldSpec::new("previousJobTitle", "Previous Job Title", FieldKind::Text),
            FieldSpec::new("jobStartDate", "Previous Job Start Date", FieldKind::Date),
            FieldSpec::new("jobEndDate", "Previous Job End Date", FieldKind::Date),
            FieldSpec::new("visaType", "VISA Type", FieldKind::Text)
                .required()
                .validators(&["min_len:1"]),
            FieldSpec::new("eadStartDate", "EAD Start Date", FieldKind::Date).required(),
            FieldSpec::new("eadEndDate", "EAD End Date", FieldKind::Date).required(),
            FieldSpec::new("travelNotes", "Travel Notes", FieldKind::Multiline)
                .validators(&["max_len:1000"]),
        ],
    }
}

pub fn preferences_section() -> SectionSpec {
    SectionSpec {
        id: "preferences",
        title: "Preferences",
        fields: vec![
            FieldSpec::new("jobType", "Job Type", FieldKind::Select)
                .required()
                .choices(JOB_TYPES),
            FieldSpec::new("contractType", "Contract Type (W2/1099)", FieldKind::Select)
                .required()
                .choices(YES_NO),
            FieldSpec::new("preferredPositions", "Preferred Positions", FieldKind::Multiline)
                .required()
                .validators(&["min_len:1", "max_len:500"]),
            FieldSpec::new("hourlyWage", "Hourly Wage Expectation", FieldKind::Number)
                .validators(&["positive", "max:1000"]),
            FieldSpec::new("annualSalary", "Annual Salary Expectation", FieldKind::Number)
                .required()
                .validators(&["min:1", "max:1000000"]),
            FieldSpec::new("applyIfLess", "Apply if offered less?", FieldKind::Select)
                .required()
                .choices(YES_NO_OTHER),
            FieldSpec::new("applyIfLessOther", "If 'Other', please specify", FieldKind::Text)
                .required_if("applyIfLess", "other"),
        ],
    }
}

pub fn demographics_section() -> SectionSpec {
    SectionSpec {
        id: "demographics",
        title: "Demographics & Messages",
        fields: vec![
            FieldSpec::new("gender", "Gender", FieldKind::Select)
                .required()
                .choices(GENDERS),
            FieldSpec::new("isHispanic", "Hispanic/Latino?", FieldKind::Select)
                .required()
                .choices(YES_NO),
            FieldSpec::new("race", "Race", FieldKind::Text)
                .required()
                .validators(&["min_len:1"]),
            FieldSpec::new("isVeteran", "Veteran?", FieldKind::Select)
                .required()
                .choices(YES_NO),
            FieldSpec::new("hasDisability", "Disability?", FieldKind::Select)
                .required()
                .choices(YES_NO),
            FieldSpec::new("messageToHM", "Message to Hiring Manager", FieldKind::Multiline)
                .required()
                .validators(&["max_len:10000"]),
            FieldSpec::new(
                "messageToSpecialist",
                "Message to Specialist",
                FieldKind::Multiline,
            )
            .required()
            .validators(&["max_len:100000"]),
        ],
    }
}

/// The full application schema: the five sections in wizard order.
pub fn full_schema() -> FormSchema {
    FormSchema {
        sections: vec![
            personal_section(),
            education_section(),
            eligibility_section(),
            preferences_section(),
            demographics_section(),
        ],
    }
}

// ======================================================
// Unit Tests
// ======================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn full_schema_has_five_sections_in_order() {
        let schema = full_schema();
        let ids: Vec<&str> = schema.sections.iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec![
                "personal",
                "education",
                "eligibility",
                "preferences",
                "demographics"
            ]
        );
    }

    #[test]
    fn field_keys_are_unique_across_sections() {
        let schema = full_schema();
        let mut seen = BTreeSet::new();
        for f in schema.all_fields() {
            assert!(seen.insert(f.key), "duplicate field key: {}", f.key);
        }
    }

    #[test]
    fn select_fields_always_carry_choices() {
        let schema = full_schema();
        for f in schema.all_fields() {
            if f.kind == FieldKind::Select {
                assert!(f.choices.is_some(), "select field {} has no choices", f.key);
            }
        }
    }

    #[test]
    fn apply_if_less_other_is_conditionally_required() {
        let schema = full_schema();
        let spec = schema.field("applyIfLessOther").expect("spec");
        assert!(!spec.required);
        let cond = spec.required_if.expect("required_if");
        assert_eq!(cond.peer, "applyIfLess");
        assert_eq!(cond.equals, "other");
    }

    #[test]
    fn counter_fields_expose_their_budgets() {
        let schema = full_schema();
        assert_eq!(schema.field("travelNotes").unwrap().max_chars(), Some(1000));
        assert_eq!(schema.field("messageToHM").unwrap().max_chars(), Some(10000));
        assert_eq!(
            schema.field("messageToSpecialist").unwrap().max_chars(),
            Some(100000)
        );
    }
}
