//! Enrollment records linking students to courses.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{column, push_present, require, require_present, Resource};
use crate::error::RegistrarResult;

/// A student's enrollment in a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: u64,
    pub student_id: u64,
    pub course_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    /// Set by the store when the enrollment is created
    pub enrolled_at: DateTime<Utc>,
}

impl fmt::Display for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} student {} in {}",
            self.id, self.student_id, self.course_code
        )?;
        if let Some(ref grade) = self.grade {
            write!(f, " [{}]", grade)?;
        }
        Ok(())
    }
}

/// Fields for creating an enrollment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDraft {
    pub student_id: u64,
    pub course_code: String,
    #[serde(default)]
    pub grade: Option<String>,
}

/// Partial update for an enrollment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

impl Resource for Enrollment {
    type Key = u64;
    type Draft = EnrollmentDraft;
    type Patch = EnrollmentPatch;

    const TABLE: &'static str = "enrollments";
    const KEY_COLUMN: &'static str = "id";

    fn key(&self) -> u64 {
        self.id
    }

    fn draft_columns(draft: &EnrollmentDraft) -> Vec<(&'static str, Value)> {
        vec![
            column("student_id", &draft.student_id),
            column("course_code", &draft.course_code),
            column("grade", &draft.grade),
        ]
    }

    fn patch_columns(patch: &EnrollmentPatch) -> Vec<(&'static str, Value)> {
        let mut columns = Vec::new();
        push_present(&mut columns, "student_id", &patch.student_id);
        push_present(&mut columns, "course_code", &patch.course_code);
        push_present(&mut columns, "grade", &patch.grade);
        columns
    }

    fn validate(draft: &EnrollmentDraft) -> RegistrarResult<()> {
        require("course_code", &draft.course_code)
    }

    fn validate_patch(patch: &EnrollmentPatch) -> RegistrarResult<()> {
        require_present("course_code", &patch.course_code)
    }

    fn from_draft(id: u64, draft: EnrollmentDraft) -> Self {
        Self {
            id,
            student_id: draft.student_id,
            course_code: draft.course_code,
            grade: draft.grade,
            enrolled_at: Utc::now(),
        }
    }

    fn apply(&mut self, patch: EnrollmentPatch) {
        if let Some(student_id) = patch.student_id {
            self.student_id = student_id;
        }
        if let Some(course_code) = patch.course_code {
            self.course_code = course_code;
        }
        if patch.grade.is_some() {
            self.grade = patch.grade;
        }
    }
}
