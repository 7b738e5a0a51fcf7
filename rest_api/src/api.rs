// rest_api/src/api.rs

//! JSON read endpoints under `/api`.

use axum::{Json, extract::Path, http::StatusCode};
use serde::Serialize;
use serde_json::{Value, json};

use lib::read_models::appointment_views;
use lib::storage_engine::CatalogStorageEngine;
use models::medical::format_api_date;

use crate::context::RequestContext;
use crate::errors::RestApiError;

#[derive(Debug, Serialize)]
pub struct DepartmentSummary {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub doctors_count: u32,
    pub contact_ext: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DoctorSummary {
    pub id: u64,
    pub name: String,
    pub specialization: String,
    pub experience: Option<u32>,
    pub qualification: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AppointmentSummary {
    pub id: u64,
    pub child_name: String,
    pub doctor_name: String,
    pub department: String,
    pub date: String,
    pub status: String,
}

// Handler for /api/departments
pub async fn departments(ctx: RequestContext) -> Result<Json<Vec<DepartmentSummary>>, RestApiError> {
    let departments = ctx.store().list_departments().await?;
    Ok(Json(
        departments
            .into_iter()
            .map(|d| DepartmentSummary {
                id: d.id,
                name: d.name,
                description: d.description,
                doctors_count: d.doctors_count,
                contact_ext: d.contact_ext,
            })
            .collect(),
    ))
}

// Handler for /api/doctors/:dept_id. An unknown department yields an empty list;
// a non-numeric id is a 404.
pub async fn doctors(
    ctx: RequestContext,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<DoctorSummary>>, RestApiError> {
    let department_id: u64 = raw_id
        .parse()
        .map_err(|_| RestApiError::NotFound(format!("department {}", raw_id)))?;
    let doctors = ctx.store().list_doctors_by_department(department_id).await?;
    Ok(Json(
        doctors
            .into_iter()
            .map(|d| DoctorSummary {
                id: d.id,
                name: d.name,
                specialization: d.specialization,
                experience: d.experience,
                qualification: d.qualification,
            })
            .collect(),
    ))
}

// Handler for /api/appointments, scoped to the session's user.
pub async fn appointments(ctx: RequestContext) -> Result<Json<Vec<AppointmentSummary>>, RestApiError> {
    let session = ctx.require_session()?;
    let views = appointment_views(ctx.store(), session.user_id).await?;
    Ok(Json(
        views
            .into_iter()
            .map(|view| AppointmentSummary {
                id: view.appointment.id,
                date: format_api_date(&view.appointment.appointment_date),
                status: view.appointment.status.to_string(),
                child_name: view.appointment.child_name,
                doctor_name: view.doctor_name,
                department: view.department_name,
            })
            .collect(),
    ))
}

// Handler for the /api/health endpoint
pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "message": "Hospital site is healthy" })))
}
