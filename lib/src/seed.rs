// lib/src/seed.rs

//! Sample catalog loaded into an empty database on first start.

use log::{debug, info};

use models::medical::{NewDepartment, NewDoctor, NewMedicine};

use crate::errors::Result;
use crate::storage_engine::{CatalogStorageEngine, HospitalStorage};

struct DepartmentSeed {
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    services: [&'static str; 4],
    doctors_count: u32,
    contact_ext: &'static str,
}

const DEPARTMENTS: [DepartmentSeed; 8] = [
    DepartmentSeed {
        name: "Pediatric Emergency",
        description: "24/7 emergency care for children with critical conditions",
        icon: "emergency",
        services: ["Trauma Care", "Critical Care", "Emergency Surgery", "Resuscitation"],
        doctors_count: 8,
        contact_ext: "101",
    },
    DepartmentSeed {
        name: "Neonatology",
        description: "Specialized care for newborn babies, especially premature or ill newborns",
        icon: "baby",
        services: ["NICU", "Premature Baby Care", "Newborn Screening", "Breastfeeding Support"],
        doctors_count: 6,
        contact_ext: "102",
    },
    DepartmentSeed {
        name: "Pediatric Cardiology",
        description: "Diagnosis and treatment of heart conditions in children",
        icon: "heart",
        services: ["Echocardiography", "Cardiac Surgery", "ECG Monitoring", "Heart Rehabilitation"],
        doctors_count: 5,
        contact_ext: "103",
    },
    DepartmentSeed {
        name: "Pediatric Oncology",
        description: "Comprehensive cancer care for children",
        icon: "stethoscope",
        services: ["Chemotherapy", "Radiation Therapy", "Bone Marrow Transplant", "Palliative Care"],
        doctors_count: 7,
        contact_ext: "104",
    },
    DepartmentSeed {
        name: "Pediatric Neurology",
        description: "Treatment of neurological disorders in children",
        icon: "brain",
        services: ["EEG Monitoring", "Epilepsy Management", "Neurological Surgery", "Developmental Assessment"],
        doctors_count: 5,
        contact_ext: "105",
    },
    DepartmentSeed {
        name: "Pediatric Surgery",
        description: "Surgical procedures for children from birth to adolescence",
        icon: "surgery",
        services: ["General Surgery", "Minimally Invasive Surgery", "Trauma Surgery", "Post-operative Care"],
        doctors_count: 6,
        contact_ext: "106",
    },
    DepartmentSeed {
        name: "Pediatric Dentistry",
        description: "Dental care specifically for children",
        icon: "tooth",
        services: ["Dental Checkups", "Orthodontics", "Tooth Extraction", "Dental Hygiene Education"],
        doctors_count: 4,
        contact_ext: "107",
    },
    DepartmentSeed {
        name: "Child Psychology",
        description: "Mental health and behavioral support for children",
        icon: "mind",
        services: ["Behavioral Therapy", "Cognitive Therapy", "Family Counseling", "Autism Support"],
        doctors_count: 5,
        contact_ext: "108",
    },
];

/// (name, years of experience); the n-th doctor joins the n-th department.
const DOCTORS: [(&str, u32); 8] = [
    ("Dr. Sarah Johnson", 15),
    ("Dr. Michael Chen", 12),
    ("Dr. Emily Rodriguez", 18),
    ("Dr. David Kim", 20),
    ("Dr. Lisa Wang", 14),
    ("Dr. Robert Miller", 16),
    ("Dr. Maria Garcia", 10),
    ("Dr. James Wilson", 13),
];

/// (name, description, price, stock, category, for_age)
const MEDICINES: [(&str, &str, f64, u32, &str, &str); 4] = [
    ("Children's Paracetamol Syrup", "Fever and pain relief for children", 8.99, 50, "syrup", "2-12 years"),
    ("Amoxicillin Suspension", "Antibiotic for bacterial infections", 12.50, 30, "syrup", "1-10 years"),
    ("Pediatric Multivitamin", "Essential vitamins for child development", 15.75, 40, "tablet", "4+ years"),
    ("Salbutamol Inhaler", "For asthma and breathing difficulties", 25.00, 20, "inhaler", "5+ years"),
];

/// Loads the sample departments, doctors and medicines when no department
/// exists yet. Returns whether anything was written.
pub async fn seed_sample_data(store: &dyn HospitalStorage) -> Result<bool> {
    if store.count_departments().await? > 0 {
        debug!("Catalog already present, skipping sample data");
        return Ok(false);
    }

    for (seed, (doctor_name, experience)) in DEPARTMENTS.iter().zip(DOCTORS) {
        let department = store
            .add_department(NewDepartment {
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                icon: seed.icon.to_string(),
                services: seed.services.iter().map(|s| s.to_string()).collect(),
                doctors_count: seed.doctors_count,
                contact_ext: Some(seed.contact_ext.to_string()),
            })
            .await?;
        store
            .add_doctor(NewDoctor::basic(doctor_name, seed.name, department.id, experience))
            .await?;
    }

    for (name, description, price, stock, category, for_age) in MEDICINES {
        store
            .add_medicine(NewMedicine {
                name: name.to_string(),
                description: Some(description.to_string()),
                price,
                stock,
                category: Some(category.to_string()),
                for_age: Some(for_age.to_string()),
            })
            .await?;
    }

    info!(
        "Seeded {} departments, {} doctors and {} medicines",
        DEPARTMENTS.len(),
        DOCTORS.len(),
        MEDICINES.len()
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage_engine::SledStorage;

    #[tokio::test]
    async fn seeding_an_empty_store_loads_the_catalog() {
        let store = SledStorage::temporary().unwrap();
        assert!(seed_sample_data(&store).await.unwrap());

        let departments = store.list_departments().await.unwrap();
        assert_eq!(departments.len(), 8);
        assert_eq!(departments[0].name, "Pediatric Emergency");
        assert_eq!(departments[0].contact_ext.as_deref(), Some("101"));
        assert_eq!(departments[0].services.len(), 4);

        let doctors = store.list_doctors().await.unwrap();
        assert_eq!(doctors.len(), 8);
        for doctor in &doctors {
            let department = store.get_department(doctor.department_id).await.unwrap().unwrap();
            assert_eq!(doctor.specialization, department.name);
        }
        assert_eq!(store.list_medicines().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn seeding_twice_is_a_no_op() {
        let store = SledStorage::temporary().unwrap();
        assert!(seed_sample_data(&store).await.unwrap());
        assert!(!seed_sample_data(&store).await.unwrap());
        assert_eq!(store.count_departments().await.unwrap(), 8);
        assert_eq!(store.list_doctors().await.unwrap().len(), 8);
    }
}
