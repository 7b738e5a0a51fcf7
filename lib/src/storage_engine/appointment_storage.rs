// lib/src/storage_engine/appointment_storage.rs
use async_trait::async_trait;
use log::info;
use sled::transaction::abort;
use sled::Transactional;

use models::medical::{Appointment, AppointmentStatus, Doctor, NewAppointment};

use crate::errors::Result;
use crate::storage_engine::sled_storage::{SledStorage, APPOINTMENTS};
use crate::storage_engine::storage_utils::{
    allocate_id, get_row, id_key, scan_rows, tx_decode, tx_encode, tx_require, tx_result, TxAbort,
};

#[async_trait]
pub trait AppointmentStorageEngine: Send + Sync + 'static {
    /// Inserts a pending appointment. The user, doctor and department must
    /// exist and the department must be the doctor's. Slots are not checked
    /// for overlap.
    async fn add_appointment(&self, new: NewAppointment) -> Result<Appointment>;
    async fn get_appointment(&self, id: u64) -> Result<Option<Appointment>>;
    /// A user's appointments in booking order.
    async fn list_appointments_for_user(&self, user_id: u64) -> Result<Vec<Appointment>>;
    /// Overwrites the status; any status may follow any other.
    async fn set_appointment_status(&self, id: u64, status: AppointmentStatus) -> Result<Appointment>;
}

#[async_trait]
impl AppointmentStorageEngine for SledStorage {
    async fn add_appointment(&self, new: NewAppointment) -> Result<Appointment> {
        new.validate()?;
        let result = (&self.appointments, &self.users, &self.doctors, &self.departments, &self.counters)
            .transaction(|(appointments, users, doctors, departments, counters)| {
                tx_require(users, "user", new.user_id)?;
                let doctor: Doctor = tx_decode(&tx_require(doctors, "doctor", new.doctor_id)?)?;
                tx_require(departments, "department", new.department_id)?;
                if doctor.department_id != new.department_id {
                    return abort(TxAbort::InvalidData(format!(
                        "doctor {} belongs to department {}, not {}",
                        doctor.id, doctor.department_id, new.department_id
                    )));
                }

                let id = allocate_id(counters, APPOINTMENTS)?;
                let appointment = Appointment::from_new(id, new.clone());
                appointments.insert(id_key(id).to_vec(), tx_encode(&appointment)?)?;
                Ok(appointment)
            });
        tx_result(result)
    }

    async fn get_appointment(&self, id: u64) -> Result<Option<Appointment>> {
        get_row(&self.appointments, id)
    }

    async fn list_appointments_for_user(&self, user_id: u64) -> Result<Vec<Appointment>> {
        Ok(scan_rows::<Appointment>(&self.appointments)?
            .into_iter()
            .filter(|appointment| appointment.user_id == user_id)
            .collect())
    }

    async fn set_appointment_status(&self, id: u64, status: AppointmentStatus) -> Result<Appointment> {
        let result = self.appointments.transaction(|appointments| {
            let Some(bytes) = appointments.get(id_key(id))? else {
                return abort(TxAbort::NotFound(format!("appointment {}", id)));
            };
            let mut appointment: Appointment = tx_decode(&bytes)?;
            appointment.status = status;
            appointments.insert(id_key(id).to_vec(), tx_encode(&appointment)?)?;
            Ok(appointment)
        });
        let appointment = tx_result(result)?;
        info!("Appointment {} is now {}", appointment.id, appointment.status);
        Ok(appointment)
    }
}
