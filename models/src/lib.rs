// models/src/lib.rs

//! Plain data types for the hospital site: stored entities, the DTOs used to
//! create them, and the validation errors raised while building them.

pub mod errors;
pub mod medical;
pub mod session;

pub use errors::{ValidationError, ValidationResult};
pub use medical::{
    Appointment, AppointmentStatus, Department, Doctor, MedicalRecord, Medicine, NewAppointment,
    NewDepartment, NewDoctor, NewMedicalRecord, NewMedicine, NewUser, User,
};
pub use session::Session;
