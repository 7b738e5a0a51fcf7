// lib/src/read_models.rs

//! Joined, sorted views that the pages and the JSON API render.

use std::collections::{BTreeSet, HashMap};

use models::medical::{Appointment, Department, Doctor, MedicalRecord, Medicine, User};

use crate::errors::{Result, StoreError};
use crate::storage_engine::{
    AppointmentStorageEngine, CatalogStorageEngine, HospitalStorage, RecordStorageEngine,
    UserStorageEngine,
};

/// How many appointments and records the dashboard shows.
pub const DASHBOARD_LIMIT: usize = 5;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct HomeSummary {
    pub departments: Vec<Department>,
    pub total_departments: usize,
    /// Sum of the departments' advertised doctor counts.
    pub total_doctors: u32,
}

pub async fn home_summary(store: &dyn HospitalStorage) -> Result<HomeSummary> {
    let departments = store.list_departments().await?;
    Ok(HomeSummary {
        total_departments: departments.len(),
        total_doctors: departments.iter().map(|d| d.doctors_count).sum(),
        departments,
    })
}

/// An appointment with its doctor and department names resolved.
#[derive(Debug, Clone)]
pub struct AppointmentView {
    pub appointment: Appointment,
    pub doctor_name: String,
    pub department_name: String,
}

/// The user's appointments in booking order, with names joined in.
pub async fn appointment_views(store: &dyn HospitalStorage, user_id: u64) -> Result<Vec<AppointmentView>> {
    let appointments = store.list_appointments_for_user(user_id).await?;
    if appointments.is_empty() {
        return Ok(Vec::new());
    }
    let doctors: HashMap<u64, String> = store
        .list_doctors()
        .await?
        .into_iter()
        .map(|d| (d.id, d.name))
        .collect();
    let departments: HashMap<u64, String> = store
        .list_departments()
        .await?
        .into_iter()
        .map(|d| (d.id, d.name))
        .collect();

    Ok(appointments
        .into_iter()
        .map(|appointment| AppointmentView {
            doctor_name: doctors
                .get(&appointment.doctor_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            department_name: departments
                .get(&appointment.department_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            appointment,
        })
        .collect())
}

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub user: User,
    /// Most recent appointment dates first.
    pub appointments: Vec<AppointmentView>,
    /// Most recent record dates first.
    pub records: Vec<MedicalRecord>,
}

pub async fn dashboard_summary(
    store: &dyn HospitalStorage,
    user_id: u64,
    limit: usize,
) -> Result<DashboardSummary> {
    let user = store
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("user {}", user_id)))?;

    let mut appointments = appointment_views(store, user_id).await?;
    appointments.sort_by(|a, b| b.appointment.appointment_date.cmp(&a.appointment.appointment_date));
    appointments.truncate(limit);

    let mut records = store.list_medical_records_for_user(user_id).await?;
    records.truncate(limit);

    Ok(DashboardSummary { user, appointments, records })
}

#[derive(Debug, Clone)]
pub struct DepartmentDetail {
    pub department: Department,
    pub doctors: Vec<Doctor>,
}

pub async fn department_detail(store: &dyn HospitalStorage, id: u64) -> Result<Option<DepartmentDetail>> {
    let Some(department) = store.get_department(id).await? else {
        return Ok(None);
    };
    let doctors = store.list_doctors_by_department(id).await?;
    Ok(Some(DepartmentDetail { department, doctors }))
}

#[derive(Debug, Clone)]
pub struct DoctorListing {
    pub doctor: Doctor,
    pub department_name: String,
}

pub async fn doctor_directory(store: &dyn HospitalStorage) -> Result<Vec<DoctorListing>> {
    let departments: HashMap<u64, String> = store
        .list_departments()
        .await?
        .into_iter()
        .map(|d| (d.id, d.name))
        .collect();
    Ok(store
        .list_doctors()
        .await?
        .into_iter()
        .map(|doctor| DoctorListing {
            department_name: departments
                .get(&doctor.department_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            doctor,
        })
        .collect())
}

#[derive(Debug, Clone)]
pub struct PharmacyCatalog {
    /// Medicines with stock on hand.
    pub medicines: Vec<Medicine>,
    /// Distinct categories across the whole catalog, sorted.
    pub categories: Vec<String>,
}

pub async fn pharmacy_catalog(store: &dyn HospitalStorage) -> Result<PharmacyCatalog> {
    let all = store.list_medicines().await?;
    let categories: BTreeSet<String> = all.iter().filter_map(|m| m.category.clone()).collect();
    Ok(PharmacyCatalog {
        medicines: all.into_iter().filter(Medicine::is_available).collect(),
        categories: categories.into_iter().collect(),
    })
}
