// models/src/medical/department.rs
use serde::{Deserialize, Serialize};

/// A medical specialty unit containing doctors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub services: Vec<String>,
    pub doctors_count: u32,
    pub contact_ext: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub services: Vec<String>,
    pub doctors_count: u32,
    pub contact_ext: Option<String>,
}

impl Department {
    pub fn from_new(id: u64, new: NewDepartment) -> Self {
        Department {
            id,
            name: new.name,
            description: new.description,
            icon: new.icon,
            services: new.services,
            doctors_count: new.doctors_count,
            contact_ext: new.contact_ext,
        }
    }
}
