//! Department records.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{column, push_present, require, require_present, Resource};
use crate::error::RegistrarResult;

/// An academic department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.name)?;
        if let Some(ref head) = self.head {
            write!(f, " (head: {})", head)?;
        }
        Ok(())
    }
}

/// Fields for creating a department.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDraft {
    pub name: String,
    #[serde(default)]
    pub head: Option<String>,
}

/// Partial update for a department.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
}

impl Resource for Department {
    type Key = u64;
    type Draft = DepartmentDraft;
    type Patch = DepartmentPatch;

    const TABLE: &'static str = "departments";
    const KEY_COLUMN: &'static str = "id";

    fn key(&self) -> u64 {
        self.id
    }

    fn draft_columns(draft: &DepartmentDraft) -> Vec<(&'static str, Value)> {
        vec![column("name", &draft.name), column("head", &draft.head)]
    }

    fn patch_columns(patch: &DepartmentPatch) -> Vec<(&'static str, Value)> {
        let mut columns = Vec::new();
        push_present(&mut columns, "name", &patch.name);
        push_present(&mut columns, "head", &patch.head);
        columns
    }

    fn validate(draft: &DepartmentDraft) -> RegistrarResult<()> {
        require("name", &draft.name)
    }

    fn validate_patch(patch: &DepartmentPatch) -> RegistrarResult<()> {
        require_present("name", &patch.name)
    }

    fn from_draft(id: u64, draft: DepartmentDraft) -> Self {
        Self {
            id,
            name: draft.name,
            head: draft.head,
        }
    }

    fn apply(&mut self, patch: DepartmentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if patch.head.is_some() {
            self.head = patch.head;
        }
    }
}
