// rest_api/src/pages.rs

//! HTML page handlers.

use axum::{
    Form,
    extract::{Path, Query, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use log::info;
use serde::Deserialize;

use lib::booking::{BookingRequest, book_appointment};
use lib::read_models::{
    DASHBOARD_LIMIT, dashboard_summary, department_detail, doctor_directory, home_summary,
    pharmacy_catalog,
};
use lib::storage_engine::{CatalogStorageEngine, RecordStorageEngine};
use security::{UserLogin, UserRegistration, login_user, logout_user, register_user};

use crate::context::{Notice, RequestContext, flash};
use crate::errors::RestApiError;
use crate::views;

/// A [`RestApiError`] rendered as an HTML error page with the same status.
pub struct PageError(pub RestApiError);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        (status, Html(views::error_page(status, &self.0.public_message(), None))).into_response()
    }
}

impl From<RestApiError> for PageError {
    fn from(err: RestApiError) -> Self {
        PageError(err)
    }
}

impl From<lib::errors::StoreError> for PageError {
    fn from(err: lib::errors::StoreError) -> Self {
        PageError(err.into())
    }
}

impl From<security::AuthError> for PageError {
    fn from(err: security::AuthError) -> Self {
        PageError(err.into())
    }
}

type PageResult = Result<Response, PageError>;

fn to_login() -> Response {
    Redirect::to("/login").into_response()
}

/// Sends an anonymous visitor to the login page with `notice`.
fn to_login_with(ctx: &RequestContext, notice: Notice) -> Response {
    (flash(ctx.jar.clone(), notice), Redirect::to("/login")).into_response()
}

fn bad_form(rejection: FormRejection) -> RestApiError {
    RestApiError::InvalidInput(rejection.body_text())
}

pub async fn home(ctx: RequestContext) -> PageResult {
    let summary = home_summary(ctx.store()).await?;
    let html = views::home(&summary, ctx.session.as_ref(), ctx.notice_message());
    Ok((ctx.notice_shown(), Html(html)).into_response())
}

pub async fn register_page() -> Html<String> {
    Html(views::register_form(None, "", ""))
}

pub async fn register_submit(
    ctx: RequestContext,
    form: Result<Form<UserRegistration>, FormRejection>,
) -> PageResult {
    let Form(registration) = form.map_err(bad_form)?;
    let (username, email) = (registration.username.clone(), registration.email.clone());
    match register_user(registration, ctx.store()).await {
        Ok(_) => Ok((flash(ctx.jar.clone(), Notice::Registered), Redirect::to("/login")).into_response()),
        Err(err) => {
            let err = RestApiError::from(err);
            match err {
                RestApiError::Conflict(_) | RestApiError::InvalidInput(_) => Ok((
                    err.status_code(),
                    Html(views::register_form(Some(&err.public_message()), &username, &email)),
                )
                    .into_response()),
                other => Err(PageError(other)),
            }
        }
    }
}

pub async fn login_page(ctx: RequestContext) -> Response {
    let html = views::login_form(ctx.notice_message(), "");
    (ctx.notice_shown(), Html(html)).into_response()
}

pub async fn login_submit(ctx: RequestContext, form: Result<Form<UserLogin>, FormRejection>) -> PageResult {
    let Form(login) = form.map_err(bad_form)?;
    let username = login.username.clone();
    match login_user(login, ctx.store()).await {
        Ok(session) => {
            let jar = flash(ctx.with_session(&session.token), Notice::LoggedIn);
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        Err(err) => match RestApiError::from(err) {
            RestApiError::InvalidCredentials => Ok((
                StatusCode::UNAUTHORIZED,
                Html(views::login_form(Some("Invalid credentials"), &username)),
            )
                .into_response()),
            other => Err(PageError(other)),
        },
    }
}

pub async fn logout(ctx: RequestContext) -> PageResult {
    if let Some(token) = &ctx.token {
        logout_user(token, ctx.store()).await?;
    }
    if let Some(session) = &ctx.session {
        info!("User '{}' logged out", session.username);
    }
    let jar = flash(ctx.without_session(), Notice::LoggedOut);
    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn dashboard(ctx: RequestContext) -> PageResult {
    let Some(session) = &ctx.session else {
        return Ok(to_login());
    };
    let summary = dashboard_summary(ctx.store(), session.user_id, DASHBOARD_LIMIT).await?;
    let html = views::dashboard(&summary, session, ctx.notice_message());
    Ok((ctx.notice_shown(), Html(html)).into_response())
}

pub async fn departments(ctx: RequestContext) -> PageResult {
    let list = ctx.store().list_departments().await?;
    Ok(Html(views::departments(&list, ctx.session.as_ref())).into_response())
}

pub async fn department(ctx: RequestContext, Path(raw_id): Path<String>) -> PageResult {
    let not_found = || RestApiError::NotFound(format!("department {}", raw_id));
    let id: u64 = raw_id.parse().map_err(|_| not_found())?;
    let detail = department_detail(ctx.store(), id).await?.ok_or_else(not_found)?;
    Ok(Html(views::department_detail(&detail, ctx.session.as_ref())).into_response())
}

pub async fn doctors(ctx: RequestContext) -> PageResult {
    let listings = doctor_directory(ctx.store()).await?;
    Ok(Html(views::doctors(&listings, ctx.session.as_ref())).into_response())
}

#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    pub doctor_id: Option<String>,
}

pub async fn booking_page(ctx: RequestContext, Query(query): Query<BookingQuery>) -> PageResult {
    let Some(session) = &ctx.session else {
        return Ok(to_login_with(&ctx, Notice::LoginRequired));
    };
    let listings = doctor_directory(ctx.store()).await?;
    let selected = query.doctor_id.and_then(|id| id.parse().ok());
    Ok(Html(views::booking_form(&listings, selected, None, session)).into_response())
}

pub async fn booking_submit(
    ctx: RequestContext,
    form: Result<Form<BookingRequest>, FormRejection>,
) -> PageResult {
    let Some(session) = &ctx.session else {
        return Ok(to_login_with(&ctx, Notice::LoginRequired));
    };
    let Form(request) = form.map_err(bad_form)?;
    let doctor_id = request.doctor_id;
    match book_appointment(ctx.store(), session.user_id, request).await {
        Ok(_) => Ok((flash(ctx.jar.clone(), Notice::Booked), Redirect::to("/dashboard")).into_response()),
        Err(err) => match RestApiError::from(err) {
            err @ RestApiError::InvalidInput(_) => {
                let listings = doctor_directory(ctx.store()).await?;
                Ok((
                    StatusCode::BAD_REQUEST,
                    Html(views::booking_form(&listings, Some(doctor_id), Some(&err.public_message()), session)),
                )
                    .into_response())
            }
            other => Err(PageError(other)),
        },
    }
}

pub async fn pharmacy(ctx: RequestContext) -> PageResult {
    let catalog = pharmacy_catalog(ctx.store()).await?;
    Ok(Html(views::pharmacy(&catalog, ctx.session.as_ref())).into_response())
}

pub async fn medical_records(ctx: RequestContext) -> PageResult {
    let Some(session) = &ctx.session else {
        return Ok(to_login());
    };
    let records = ctx.store().list_medical_records_for_user(session.user_id).await?;
    Ok(Html(views::medical_records(&records, session)).into_response())
}

pub async fn emergency(ctx: RequestContext) -> PageResult {
    let departments = ctx.store().list_departments().await?;
    let department = departments.iter().find(|d| d.icon == "emergency");
    Ok(Html(views::emergency(department, ctx.session.as_ref())).into_response())
}

pub async fn not_found() -> PageError {
    PageError(RestApiError::NotFound("page".to_string()))
}
