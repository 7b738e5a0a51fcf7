// models/src/medical/medicine.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: u32,
    /// syrup, tablet, inhaler, ...
    pub category: Option<String>,
    /// Age group the medicine is intended for, e.g. "2-12 years".
    pub for_age: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMedicine {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: u32,
    pub category: Option<String>,
    pub for_age: Option<String>,
}

impl Medicine {
    pub fn from_new(id: u64, new: NewMedicine) -> Self {
        Medicine {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            stock: new.stock,
            category: new.category,
            for_age: new.for_age,
        }
    }

    /// Only medicines with stock on hand are shown in the pharmacy.
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}
