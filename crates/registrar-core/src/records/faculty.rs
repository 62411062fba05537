//! Faculty (teaching staff) records.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{column, push_present, require, require_email, require_present, Resource};
use crate::error::RegistrarResult;

/// A faculty member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u64>,
}

impl Faculty {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Faculty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} <{}>", self.id, self.full_name(), self.email)?;
        if let Some(ref designation) = self.designation {
            write!(f, ", {}", designation)?;
        }
        Ok(())
    }
}

/// Fields for creating a faculty member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub department_id: Option<u64>,
}

/// Partial update for a faculty member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u64>,
}

impl Resource for Faculty {
    type Key = u64;
    type Draft = FacultyDraft;
    type Patch = FacultyPatch;

    const TABLE: &'static str = "faculty";
    const KEY_COLUMN: &'static str = "id";

    fn key(&self) -> u64 {
        self.id
    }

    fn draft_columns(draft: &FacultyDraft) -> Vec<(&'static str, Value)> {
        vec![
            column("first_name", &draft.first_name),
            column("last_name", &draft.last_name),
            column("email", &draft.email),
            column("designation", &draft.designation),
            column("department_id", &draft.department_id),
        ]
    }

    fn patch_columns(patch: &FacultyPatch) -> Vec<(&'static str, Value)> {
        let mut columns = Vec::new();
        push_present(&mut columns, "first_name", &patch.first_name);
        push_present(&mut columns, "last_name", &patch.last_name);
        push_present(&mut columns, "email", &patch.email);
        push_present(&mut columns, "designation", &patch.designation);
        push_present(&mut columns, "department_id", &patch.department_id);
        columns
    }

    fn validate(draft: &FacultyDraft) -> RegistrarResult<()> {
        require("first_name", &draft.first_name)?;
        require("last_name", &draft.last_name)?;
        require_email(&draft.email)
    }

    fn validate_patch(patch: &FacultyPatch) -> RegistrarResult<()> {
        require_present("first_name", &patch.first_name)?;
        require_present("last_name", &patch.last_name)?;
        match patch.email {
            Some(ref email) => require_email(email),
            None => Ok(()),
        }
    }

    fn from_draft(id: u64, draft: FacultyDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            designation: draft.designation,
            department_id: draft.department_id,
        }
    }

    fn apply(&mut self, patch: FacultyPatch) {
        if let Some(v) = patch.first_name {
            self.first_name = v;
        }
        if let Some(v) = patch.last_name {
            self.last_name = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if patch.designation.is_some() {
            self.designation = patch.designation;
        }
        if patch.department_id.is_some() {
            self.department_id = patch.department_id;
        }
    }

    fn unique_value(&self) -> Option<String> {
        Some(self.email.to_lowercase())
    }
}
