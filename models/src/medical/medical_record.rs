// models/src/medical/medical_record.rs
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{require_non_empty, ValidationResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: u64,
    pub user_id: u64,
    /// prescription, test_result, diagnosis, ...
    pub record_type: String,
    pub title: String,
    pub description: Option<String>,
    pub doctor_name: Option<String>,
    pub date: NaiveDateTime,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMedicalRecord {
    pub user_id: u64,
    pub record_type: String,
    pub title: String,
    pub description: Option<String>,
    pub doctor_name: Option<String>,
    pub date: NaiveDateTime,
    pub file_url: Option<String>,
}

impl NewMedicalRecord {
    pub fn validate(&self) -> ValidationResult<()> {
        require_non_empty("record_type", &self.record_type)?;
        require_non_empty("title", &self.title)
    }
}

impl MedicalRecord {
    pub fn from_new(id: u64, new: NewMedicalRecord) -> Self {
        MedicalRecord {
            id,
            user_id: new.user_id,
            record_type: new.record_type,
            title: new.title,
            description: new.description,
            doctor_name: new.doctor_name,
            date: new.date,
            file_url: new.file_url,
            created_at: Utc::now(),
        }
    }
}
