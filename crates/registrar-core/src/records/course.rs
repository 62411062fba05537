//! Course records, keyed by their course code.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{column, push_present, require, require_present, Resource};
use crate::error::{RegistrarError, RegistrarResult};

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Natural key, e.g. "CS101"
    pub code: String,
    pub name: String,
    pub credits: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<u64>,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({} credits)", self.code, self.name, self.credits)
    }
}

/// Fields for creating a course. The code is supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub code: String,
    pub name: String,
    pub credits: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub department_id: Option<u64>,
    #[serde(default)]
    pub faculty_id: Option<u64>,
}

/// Partial update for a course. The code itself cannot change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<u64>,
}

impl Resource for Course {
    type Key = String;
    type Draft = CourseDraft;
    type Patch = CoursePatch;

    const TABLE: &'static str = "courses";
    const KEY_COLUMN: &'static str = "code";

    fn key(&self) -> String {
        self.code.clone()
    }

    fn draft_key(draft: &CourseDraft) -> Option<String> {
        Some(draft.code.trim().to_string())
    }

    fn draft_columns(draft: &CourseDraft) -> Vec<(&'static str, Value)> {
        vec![
            column("code", &draft.code.trim()),
            column("name", &draft.name),
            column("credits", &draft.credits),
            column("description", &draft.description),
            column("department_id", &draft.department_id),
            column("faculty_id", &draft.faculty_id),
        ]
    }

    fn patch_columns(patch: &CoursePatch) -> Vec<(&'static str, Value)> {
        let mut columns = Vec::new();
        push_present(&mut columns, "name", &patch.name);
        push_present(&mut columns, "credits", &patch.credits);
        push_present(&mut columns, "description", &patch.description);
        push_present(&mut columns, "department_id", &patch.department_id);
        push_present(&mut columns, "faculty_id", &patch.faculty_id);
        columns
    }

    fn validate(draft: &CourseDraft) -> RegistrarResult<()> {
        require("code", &draft.code)?;
        require("name", &draft.name)?;
        if draft.credits == 0 {
            return Err(RegistrarError::Validation(
                "credits must be at least 1".into(),
            ));
        }
        Ok(())
    }

    fn validate_patch(patch: &CoursePatch) -> RegistrarResult<()> {
        require_present("name", &patch.name)?;
        if patch.credits == Some(0) {
            return Err(RegistrarError::Validation(
                "credits must be at least 1".into(),
            ));
        }
        Ok(())
    }

    fn from_draft(code: String, draft: CourseDraft) -> Self {
        Self {
            code,
            name: draft.name,
            credits: draft.credits,
            description: draft.description,
            department_id: draft.department_id,
            faculty_id: draft.faculty_id,
        }
    }

    fn apply(&mut self, patch: CoursePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(credits) = patch.credits {
            self.credits = credits;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if patch.department_id.is_some() {
            self.department_id = patch.department_id;
        }
        if patch.faculty_id.is_some() {
            self.faculty_id = patch.faculty_id;
        }
    }
}
