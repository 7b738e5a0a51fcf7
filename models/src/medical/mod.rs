// models/src/medical/mod.rs

pub mod appointment;
pub mod department;
pub mod doctor;
pub mod medical_record;
pub mod medicine;
pub mod user;

pub use appointment::{
    format_api_date, parse_appointment_date, Appointment, AppointmentStatus, NewAppointment,
    API_DATE_FORMAT, APPOINTMENT_DATE_FORMAT,
};
pub use department::{Department, NewDepartment};
pub use doctor::{Doctor, NewDoctor};
pub use medical_record::{MedicalRecord, NewMedicalRecord};
pub use medicine::{Medicine, NewMedicine};
pub use user::{validate_email, NewUser, User};
