// lib/src/booking.rs

//! The appointment booking workflow: resolve the doctor, derive the
//! department, store a pending appointment.

use log::{info, warn};
use serde::Deserialize;

use models::medical::{parse_appointment_date, Appointment, NewAppointment};

use crate::errors::{Result, StoreError};
use crate::storage_engine::{AppointmentStorageEngine, CatalogStorageEngine, HospitalStorage};

/// Booking input as submitted by the booking form.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub doctor_id: u64,
    pub child_name: String,
    pub child_age: u32,
    /// `%Y-%m-%dT%H:%M`, the value of an HTML `datetime-local` input.
    pub appointment_date: String,
    #[serde(default)]
    pub symptoms: Option<String>,
}

/// Books an appointment for `user_id`.
///
/// Any well-formed timestamp is accepted, including past ones, and the slot is
/// not checked against the doctor's other appointments.
pub async fn book_appointment(
    store: &dyn HospitalStorage,
    user_id: u64,
    request: BookingRequest,
) -> Result<Appointment> {
    let appointment_date = parse_appointment_date(&request.appointment_date)?;

    let doctor = store.get_doctor(request.doctor_id).await?.ok_or_else(|| {
        warn!("Booking rejected: doctor {} does not exist", request.doctor_id);
        StoreError::NotFound(format!("doctor {}", request.doctor_id))
    })?;

    let symptoms = request
        .symptoms
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let appointment = store
        .add_appointment(NewAppointment {
            user_id,
            doctor_id: doctor.id,
            department_id: doctor.department_id,
            child_name: request.child_name.trim().to_string(),
            child_age: request.child_age,
            appointment_date,
            symptoms,
        })
        .await?;

    info!(
        "Booked appointment {} with {} for user {} at {}",
        appointment.id, doctor.name, user_id, appointment.appointment_date
    );
    Ok(appointment)
}
