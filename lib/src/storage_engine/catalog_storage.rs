// lib/src/storage_engine/catalog_storage.rs

//! Public catalog tables: departments, doctors and pharmacy stock.

use async_trait::async_trait;
use log::info;
use sled::Transactional;

use models::medical::{Department, Doctor, Medicine, NewDepartment, NewDoctor, NewMedicine};

use crate::errors::Result;
use crate::storage_engine::sled_storage::{SledStorage, DEPARTMENTS, DOCTORS, MEDICINES};
use crate::storage_engine::storage_utils::{
    allocate_id, get_row, id_key, scan_rows, tx_encode, tx_require, tx_result,
};

#[async_trait]
pub trait CatalogStorageEngine: Send + Sync + 'static {
    async fn add_department(&self, new: NewDepartment) -> Result<Department>;
    async fn get_department(&self, id: u64) -> Result<Option<Department>>;
    /// All departments in id order.
    async fn list_departments(&self) -> Result<Vec<Department>>;
    async fn count_departments(&self) -> Result<usize>;

    /// Fails with `MissingReference` when the department does not exist.
    async fn add_doctor(&self, new: NewDoctor) -> Result<Doctor>;
    async fn get_doctor(&self, id: u64) -> Result<Option<Doctor>>;
    async fn list_doctors(&self) -> Result<Vec<Doctor>>;
    async fn list_doctors_by_department(&self, department_id: u64) -> Result<Vec<Doctor>>;

    async fn add_medicine(&self, new: NewMedicine) -> Result<Medicine>;
    /// Every medicine, including those out of stock.
    async fn list_medicines(&self) -> Result<Vec<Medicine>>;
}

#[async_trait]
impl CatalogStorageEngine for SledStorage {
    async fn add_department(&self, new: NewDepartment) -> Result<Department> {
        let result = (&self.departments, &self.counters).transaction(|(departments, counters)| {
            let id = allocate_id(counters, DEPARTMENTS)?;
            let department = Department::from_new(id, new.clone());
            departments.insert(id_key(id).to_vec(), tx_encode(&department)?)?;
            Ok(department)
        });
        let department = tx_result(result)?;
        info!("Added department {} '{}'", department.id, department.name);
        Ok(department)
    }

    async fn get_department(&self, id: u64) -> Result<Option<Department>> {
        get_row(&self.departments, id)
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        scan_rows(&self.departments)
    }

    async fn count_departments(&self) -> Result<usize> {
        Ok(self.departments.len())
    }

    async fn add_doctor(&self, new: NewDoctor) -> Result<Doctor> {
        let result = (&self.doctors, &self.departments, &self.counters).transaction(
            |(doctors, departments, counters)| {
                tx_require(departments, "department", new.department_id)?;
                let id = allocate_id(counters, DOCTORS)?;
                let doctor = Doctor::from_new(id, new.clone());
                doctors.insert(id_key(id).to_vec(), tx_encode(&doctor)?)?;
                Ok(doctor)
            },
        );
        let doctor = tx_result(result)?;
        info!("Added doctor {} '{}' to department {}", doctor.id, doctor.name, doctor.department_id);
        Ok(doctor)
    }

    async fn get_doctor(&self, id: u64) -> Result<Option<Doctor>> {
        get_row(&self.doctors, id)
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        scan_rows(&self.doctors)
    }

    async fn list_doctors_by_department(&self, department_id: u64) -> Result<Vec<Doctor>> {
        Ok(scan_rows::<Doctor>(&self.doctors)?
            .into_iter()
            .filter(|doctor| doctor.department_id == department_id)
            .collect())
    }

    async fn add_medicine(&self, new: NewMedicine) -> Result<Medicine> {
        let result = (&self.medicines, &self.counters).transaction(|(medicines, counters)| {
            let id = allocate_id(counters, MEDICINES)?;
            let medicine = Medicine::from_new(id, new.clone());
            medicines.insert(id_key(id).to_vec(), tx_encode(&medicine)?)?;
            Ok(medicine)
        });
        tx_result(result)
    }

    async fn list_medicines(&self) -> Result<Vec<Medicine>> {
        scan_rows(&self.medicines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;

    fn department(name: &str) -> NewDepartment {
        NewDepartment {
            name: name.to_string(),
            description: format!("{} care", name),
            icon: "stethoscope".to_string(),
            services: vec!["Checkups".to_string()],
            doctors_count: 2,
            contact_ext: Some("200".to_string()),
        }
    }

    #[tokio::test]
    async fn doctor_requires_existing_department() {
        let store = SledStorage::temporary().unwrap();
        let err = store
            .add_doctor(NewDoctor::basic("Dr. Nobody", "None", 42, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingReference { table: "department", id: 42 }));
        assert!(store.list_doctors().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn doctors_filter_by_department() {
        let store = SledStorage::temporary().unwrap();
        let cardio = store.add_department(department("Cardiology")).await.unwrap();
        let neuro = store.add_department(department("Neurology")).await.unwrap();
        store.add_doctor(NewDoctor::basic("Dr. A", "Cardiology", cardio.id, 5)).await.unwrap();
        store.add_doctor(NewDoctor::basic("Dr. B", "Neurology", neuro.id, 7)).await.unwrap();
        store.add_doctor(NewDoctor::basic("Dr. C", "Cardiology", cardio.id, 9)).await.unwrap();

        let names: Vec<String> = store
            .list_doctors_by_department(cardio.id)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Dr. A", "Dr. C"]);
        assert!(store.list_doctors_by_department(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn departments_list_in_id_order() {
        let store = SledStorage::temporary().unwrap();
        for name in ["A", "B", "C"] {
            store.add_department(department(name)).await.unwrap();
        }
        let ids: Vec<u64> = store.list_departments().await.unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.get_department(2).await.unwrap().unwrap().name, "B");
        assert!(store.get_department(4).await.unwrap().is_none());
    }
}
