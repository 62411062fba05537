//! Student records.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{column, push_present, require, require_email, require_present, Resource};
use crate::error::RegistrarResult;

/// A student enrolled at the institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Store-assigned id
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_year: Option<i32>,
}

impl Student {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match against name and email.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.full_name().to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} <{}>", self.id, self.full_name(), self.email)?;
        if let Some(year) = self.enrollment_year {
            write!(f, " ({})", year)?;
        }
        Ok(())
    }
}

/// Fields for creating a student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department_id: Option<u64>,
    #[serde(default)]
    pub enrollment_year: Option<i32>,
}

/// Partial update for a student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_year: Option<i32>,
}

impl Resource for Student {
    type Key = u64;
    type Draft = StudentDraft;
    type Patch = StudentPatch;

    const TABLE: &'static str = "students";
    const KEY_COLUMN: &'static str = "id";

    fn key(&self) -> u64 {
        self.id
    }

    fn draft_columns(draft: &StudentDraft) -> Vec<(&'static str, Value)> {
        vec![
            column("first_name", &draft.first_name),
            column("last_name", &draft.last_name),
            column("email", &draft.email),
            column("phone", &draft.phone),
            column("department_id", &draft.department_id),
            column("enrollment_year", &draft.enrollment_year),
        ]
    }

    fn patch_columns(patch: &StudentPatch) -> Vec<(&'static str, Value)> {
        let mut columns = Vec::new();
        push_present(&mut columns, "first_name", &patch.first_name);
        push_present(&mut columns, "last_name", &patch.last_name);
        push_present(&mut columns, "email", &patch.email);
        push_present(&mut columns, "phone", &patch.phone);
        push_present(&mut columns, "department_id", &patch.department_id);
        push_present(&mut columns, "enrollment_year", &patch.enrollment_year);
        columns
    }

    fn validate(draft: &StudentDraft) -> RegistrarResult<()> {
        require("first_name", &draft.first_name)?;
        require("last_name", &draft.last_name)?;
        require_email(&draft.email)
    }

    fn validate_patch(patch: &StudentPatch) -> RegistrarResult<()> {
        require_present("first_name", &patch.first_name)?;
        require_present("last_name", &patch.last_name)?;
        match patch.email {
            Some(ref email) => require_email(email),
            None => Ok(()),
        }
    }

    fn from_draft(id: u64, draft: StudentDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            department_id: draft.department_id,
            enrollment_year: draft.enrollment_year,
        }
    }

    fn apply(&mut self, patch: StudentPatch) {
        if let Some(v) = patch.first_name {
            self.first_name = v;
        }
        if let Some(v) = patch.last_name {
            self.last_name = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if patch.department_id.is_some() {
            self.department_id = patch.department_id;
        }
        if patch.enrollment_year.is_some() {
            self.enrollment_year = patch.enrollment_year;
        }
    }

    fn unique_value(&self) -> Option<String> {
        Some(self.email.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Student {
        Student::from_draft(
            1,
            StudentDraft {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.edu".into(),
                enrollment_year: Some(2023),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_student_wire_format_is_camel_case() {
        let json = serde_json::to_string(&ada()).unwrap();
        assert!(json.contains("\"firstName\":\"Ada\""));
        assert!(json.contains("\"enrollmentYear\":2023"));
        assert!(!json.contains("phone"));
    }

    #[test]
    fn test_patch_columns_only_present_fields() {
        let patch = StudentPatch {
            email: Some("ada@new.edu".into()),
            enrollment_year: Some(2024),
            ..Default::default()
        };
        let names: Vec<_> = Student::patch_columns(&patch).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["email", "enrollment_year"]);
    }

    #[test]
    fn test_apply_patch() {
        let mut student = ada();
        student.apply(StudentPatch {
            last_name: Some("King".into()),
            ..Default::default()
        });
        assert_eq!(student.full_name(), "Ada King");
        assert_eq!(student.enrollment_year, Some(2023));
    }

    #[test]
    fn test_validate_requires_names_and_email() {
        let mut draft = StudentDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.edu".into(),
            ..Default::default()
        };
        assert!(Student::validate(&draft).is_ok());

        draft.last_name.clear();
        assert!(Student::validate(&draft).is_err());
    }

    #[test]
    fn test_matches() {
        let student = ada();
        assert!(student.matches("love"));
        assert!(student.matches("EXAMPLE.edu"));
        assert!(student.matches(""));
        assert!(!student.matches("turing"));
    }
}
