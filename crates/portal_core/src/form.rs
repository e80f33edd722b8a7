//! Application form layout, field values and the UI-to-business field mapping.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::validate::FieldSource;

/// Declared input kind of a field; drives shape validation and prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Multiline,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> FieldDef {
    FieldDef {
        name,
        label,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> FieldDef {
    FieldDef {
        name,
        label,
        kind,
        required: false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDef {
    pub title: &'static str,
    pub fields: Vec<FieldDef>,
}

impl SectionDef {
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|field| field.required)
    }
}

/// Ordered sections of a wizard. Section `n` (1-based) is shown on step `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLayout {
    sections: Vec<SectionDef>,
}

impl FormLayout {
    pub fn new(sections: Vec<SectionDef>) -> Self {
        Self { sections }
    }

    /// The five-section job application wizard.
    pub fn job_application() -> Self {
        use FieldKind::*;

        Self::new(vec![
            SectionDef {
                title: "Personal Information",
                fields: vec![
                    required("fullName", "Full Name", Text),
                    required("email", "Email Address", Email),
                    required("phone", "Phone Number", Tel),
                    required("currentAddress", "Current Address", Multiline),
                ],
            },
            SectionDef {
                title: "Position Information",
                fields: vec![
                    required(POSITION_FIELD, "Position Applied For", Text),
                    required("jobType", "Job Type", Text),
                    required("expectedSalary", "Expected Salary", Text),
                ],
            },
            SectionDef {
                title: "Education",
                fields: vec![
                    required("degreeType", "Degree Type", Text),
                    required("schoolUniversity", "School / University", Text),
                    required("graduationYear", "Graduation Year", Text),
                ],
            },
            SectionDef {
                title: "Work Experience",
                fields: vec![
                    required("mostRecentEmployer", "Most Recent Employer", Text),
                    required("keyResponsibilities", "Key Responsibilities", Multiline),
                ],
            },
            SectionDef {
                title: "Skills & Documents",
                fields: vec![
                    required("keySkills", "Key Skills", Multiline),
                    optional("languagesSpoken", "Languages Spoken", Text),
                    required("finalDate", "Available From", Date),
                ],
            },
        ])
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section bound to a 1-based step, if any.
    pub fn section(&self, step: usize) -> Option<&SectionDef> {
        step.checked_sub(1).and_then(|idx| self.sections.get(idx))
    }

    pub fn sections(&self) -> &[SectionDef] {
        &self.sections
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections
            .iter()
            .flat_map(|section| section.fields.iter().map(|field| field.name))
    }
}

/// UI field that is prefilled from a previously selected job.
pub const POSITION_FIELD: &str = "positionAppliedFor";

/// Static mapping from UI field name to the business key sent to the API.
pub const FIELD_MAPPING: &[(&str, &str)] = &[
    ("fullName", "fullName"),
    ("email", "email"),
    ("phone", "phone"),
    ("currentAddress", "address"),
    (POSITION_FIELD, "jobTitle"),
    ("jobType", "department"),
    ("expectedSalary", "expectedSalary"),
    ("degreeType", "qualification"),
    ("schoolUniversity", "institution"),
    ("graduationYear", "yearOfPassing"),
    ("mostRecentEmployer", "previousCompany"),
    ("keyResponsibilities", "experience"),
    ("keySkills", "skills"),
    ("languagesSpoken", "languagesSpoken"),
    ("finalDate", "finalDate"),
];

pub fn business_key(ui_name: &str) -> Option<&'static str> {
    FIELD_MAPPING
        .iter()
        .find(|(ui, _)| *ui == ui_name)
        .map(|(_, business)| *business)
}

/// Current values of every form field, keyed by UI field name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields {
    values: BTreeMap<String, String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|value| value.is_empty())
    }
}

impl FieldSource for FormFields {
    fn get(&self, name: &str) -> String {
        self.values.get(name).cloned().unwrap_or_default()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FormFields {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut fields = FormFields::new();
        for (name, value) in pairs {
            fields.set(name, value);
        }
        fields
    }
}

/// Flat business record submitted to the applications endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ApplicationRecord(BTreeMap<String, String>);

impl ApplicationRecord {
    /// Reads every mapped field, across all sections, through the static mapping.
    pub fn assemble(source: &dyn FieldSource) -> Self {
        let record = FIELD_MAPPING
            .iter()
            .map(|(ui, business)| ((*business).to_string(), source.get(ui)))
            .collect();
        Self(record)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_layout_field_has_a_business_key() {
        let layout = FormLayout::job_application();
        for name in layout.field_names() {
            assert!(business_key(name).is_some(), "unmapped field {name}");
        }
        assert_eq!(layout.field_names().count(), FIELD_MAPPING.len());
    }

    #[test]
    fn section_lookup_is_one_based() {
        let layout = FormLayout::job_application();
        assert!(layout.section(0).is_none());
        assert_eq!(layout.section(1).unwrap().title, "Personal Information");
        assert_eq!(layout.section(5).unwrap().title, "Skills & Documents");
        assert!(layout.section(6).is_none());
    }

    #[test]
    fn assemble_renames_ui_fields() {
        let fields = FormFields::from([
            ("currentAddress", "12 MG Road"),
            ("positionAppliedFor", "Welder"),
        ]);
        let record = ApplicationRecord::assemble(&fields);

        assert_eq!(record.get("address"), Some("12 MG Road"));
        assert_eq!(record.get("jobTitle"), Some("Welder"));
        assert_eq!(record.get("fullName"), Some(""));
        assert!(record.get("currentAddress").is_none());
    }
}
