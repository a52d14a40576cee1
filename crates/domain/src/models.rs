//! Domain records shared by every layer.
//!
//! JSON uses camelCase field names. Every field has a default so partial
//! payloads (used by the update endpoint) decode cleanly: missing strings
//! become `""` and missing ids become `0`.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Department
// ---------------------------------------------------------------------------

/// A department within a company.
///
/// `(company_id, name)` is the natural key; `phone` is unique globally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Department {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub phone: String,
}

// ---------------------------------------------------------------------------
// Employee
// ---------------------------------------------------------------------------

/// An employee record.
///
/// `department` is filled in at read time from `department_id` and is never
/// persisted. On writes, a supplied `department` is resolved via
/// get-or-create and replaces `department_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub company_id: i32,
    pub department_id: Option<i32>,
    pub passport_type: String,
    pub passport_number: String,
    pub department: Option<Department>,
}

impl Employee {
    /// Returns `true` when at least one field would be written by a partial
    /// update.
    pub fn has_updates(&self) -> bool {
        !self.name.is_empty()
            || !self.surname.is_empty()
            || !self.phone.is_empty()
            || self.company_id != 0
            || self.department_id.is_some()
            || !self.passport_type.is_empty()
            || !self.passport_number.is_empty()
    }
}
