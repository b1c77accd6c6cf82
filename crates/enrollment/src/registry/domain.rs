use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for enrollees. Assigned by the store on insert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EnrolleeId(pub u64);

impl fmt::Display for EnrolleeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for dependents. Assigned by the store on insert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DependentId(pub u64);

impl fmt::Display for DependentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Primary insured person enrolled in a healthcare plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollee {
    pub id: EnrolleeId,
    pub name: String,
    pub activation_status: bool,
    pub birth_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Person covered under an enrollee's plan. The `enrollee_id` back-reference
/// is stamped from the request path, never taken from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependent {
    pub id: DependentId,
    pub enrollee_id: EnrolleeId,
    pub name: String,
    pub birth_date: NaiveDate,
}

/// Inbound enrollee payload prior to validation.
///
/// Every field is optional at the serde layer so that missing or malformed
/// values surface as field violations instead of deserialization failures.
/// Dates travel as `YYYY-MM-DD` strings and are parsed during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolleeDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub activation_status: Option<bool>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Inbound dependent payload prior to validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
}

/// Validated enrollee field set, ready for the store to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolleeFields {
    pub name: String,
    pub activation_status: bool,
    pub birth_date: NaiveDate,
    pub phone_number: Option<String>,
}

impl EnrolleeFields {
    pub fn into_enrollee(self, id: EnrolleeId) -> Enrollee {
        Enrollee {
            id,
            name: self.name,
            activation_status: self.activation_status,
            birth_date: self.birth_date,
            phone_number: self.phone_number,
        }
    }
}

/// Validated dependent field set. The owning enrollee is supplied separately
/// by the operation that resolved it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentFields {
    pub name: String,
    pub birth_date: NaiveDate,
}

impl DependentFields {
    pub fn into_dependent(self, id: DependentId, owner: EnrolleeId) -> Dependent {
        Dependent {
            id,
            enrollee_id: owner,
            name: self.name,
            birth_date: self.birth_date,
        }
    }
}
