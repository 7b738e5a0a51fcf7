// models/src/medical/doctor.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u64,
    pub name: String,
    pub specialization: String,
    pub department_id: u64,
    /// Years of experience.
    pub experience: Option<u32>,
    pub qualification: Option<String>,
    pub availability: Option<String>,
    pub contact: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
    pub department_id: u64,
    pub experience: Option<u32>,
    pub qualification: Option<String>,
    pub availability: Option<String>,
    pub contact: Option<String>,
    pub photo_url: Option<String>,
}

impl NewDoctor {
    /// A doctor with only the columns the seed data fills in.
    pub fn basic(name: &str, specialization: &str, department_id: u64, experience: u32) -> Self {
        NewDoctor {
            name: name.to_string(),
            specialization: specialization.to_string(),
            department_id,
            experience: Some(experience),
            qualification: None,
            availability: None,
            contact: None,
            photo_url: None,
        }
    }
}

impl Doctor {
    pub fn from_new(id: u64, new: NewDoctor) -> Self {
        Doctor {
            id,
            name: new.name,
            specialization: new.specialization,
            department_id: new.department_id,
            experience: new.experience,
            qualification: new.qualification,
            availability: new.availability,
            contact: new.contact,
            photo_url: new.photo_url,
        }
    }
}
