use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attendance mark for a single event day.
///
/// Serialized as the single letter used in the uploaded sheets (`"P"` / `"A"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Attendance {
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "A")]
    Absent,
}

impl Attendance {
    /// Parses a raw cell value. Surrounding whitespace and case are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "P" => Some(Attendance::Present),
            "A" => Some(Attendance::Absent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Attendance::Present => "P",
            Attendance::Absent => "A",
        }
    }
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single participant as stored by the registry.
///
/// `p_no` and `mobile_no` are unique across the whole store. Uniqueness is
/// enforced once, during ingestion; records are never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantRecord {
    pub p_no: String,
    pub mobile_no: String,
    pub name: String,
    pub trade: String,
    pub gender: String,
    pub attendance_day1: Attendance,
    pub attendance_day2: Attendance,
    pub created_at: DateTime<Utc>,
}
