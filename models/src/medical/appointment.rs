// models/src/medical/appointment.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{require_non_empty, ValidationError, ValidationResult};

/// Format accepted from the booking form (an HTML `datetime-local` value).
pub const APPOINTMENT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";
/// Format used when appointments are rendered in the JSON API.
pub const API_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Lifecycle of an appointment. Any status may follow any other; only the
/// set of values is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

/// Parses a booking timestamp. Past dates are accepted.
pub fn parse_appointment_date(raw: &str) -> ValidationResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), APPOINTMENT_DATE_FORMAT)
        .map_err(|e| ValidationError::InvalidDateFormat(format!("'{}': {}", raw, e)))
}

pub fn format_api_date(date: &NaiveDateTime) -> String {
    date.format(API_DATE_FORMAT).to_string()
}

/// An appointment about to be inserted. The department is derived from the
/// doctor by the booking workflow, not supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub user_id: u64,
    pub doctor_id: u64,
    pub department_id: u64,
    pub child_name: String,
    pub child_age: u32,
    pub appointment_date: NaiveDateTime,
    pub symptoms: Option<String>,
}

impl NewAppointment {
    pub fn validate(&self) -> ValidationResult<()> {
        require_non_empty("child_name", &self.child_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u64,
    pub user_id: u64,
    pub doctor_id: u64,
    pub department_id: u64,
    pub child_name: String,
    pub child_age: u32,
    pub appointment_date: NaiveDateTime,
    pub symptoms: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// New appointments always start out pending.
    pub fn from_new(id: u64, new: NewAppointment) -> Self {
        Appointment {
            id,
            user_id: new.user_id,
            doctor_id: new.doctor_id,
            department_id: new.department_id,
            child_name: new.child_name,
            child_age: new.child_age,
            appointment_date: new.appointment_date,
            symptoms: new.symptoms,
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
