// rest_api/src/views.rs

//! Server-rendered HTML. Every interpolated value goes through [`escape`].

use axum::http::StatusCode;

use lib::read_models::{
    AppointmentView, DashboardSummary, DepartmentDetail, DoctorListing, HomeSummary, PharmacyCatalog,
};
use models::medical::{Department, MedicalRecord};
use models::Session;
use security::Role;

const SITE_NAME: &str = "Sunshine Children's Hospital";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn opt(value: &Option<String>) -> String {
    value.as_deref().map(escape).unwrap_or_default()
}

pub fn layout(title: &str, session: Option<&Session>, body: &str) -> String {
    let account = match session {
        Some(session) => format!(
            r#"<a href="/dashboard">{}</a> <a href="/book_appointment">Book</a> <a href="/medical_records">Records</a> <a href="/logout">Logout</a>"#,
            escape(&session.username)
        ),
        None => r#"<a href="/login">Login</a> <a href="/register">Register</a>"#.to_string(),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} | {site}</title></head>
<body>
<nav><a href="/">{site}</a> <a href="/departments">Departments</a> <a href="/doctors">Doctors</a> <a href="/pharmacy">Pharmacy</a> <a href="/emergency">Emergency</a> | {account}</nav>
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        site = SITE_NAME,
        account = account,
        body = body,
    )
}

fn notice(message: Option<&str>) -> String {
    message
        .map(|m| format!(r#"<p class="alert">{}</p>"#, escape(m)))
        .unwrap_or_default()
}

fn department_card(department: &Department) -> String {
    format!(
        r#"<li class="department icon-{icon}"><a href="/department/{id}">{name}</a> <p>{description}</p> <span>Doctors: {count}</span> <span>Ext: {ext}</span></li>"#,
        icon = escape(&department.icon),
        id = department.id,
        name = escape(&department.name),
        description = escape(&department.description),
        count = department.doctors_count,
        ext = opt(&department.contact_ext),
    )
}

pub fn home(summary: &HomeSummary, session: Option<&Session>, message: Option<&str>) -> String {
    let cards: String = summary.departments.iter().map(department_card).collect();
    let body = format!(
        r#"{notice}
<h1>Welcome to {site}</h1>
<p class="stats"><span id="total-departments">{departments}</span> departments, <span id="total-doctors">{doctors}</span> doctors</p>
<ul class="departments">{cards}</ul>"#,
        notice = notice(message),
        site = SITE_NAME,
        departments = summary.total_departments,
        doctors = summary.total_doctors,
        cards = cards,
    );
    layout("Home", session, &body)
}

pub fn register_form(message: Option<&str>, username: &str, email: &str) -> String {
    let body = format!(
        r#"<h1>Register</h1>
{notice}
<form method="post" action="/register">
<label>Username <input name="username" value="{username}" required></label>
<label>Email <input type="email" name="email" value="{email}" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Register</button>
</form>"#,
        notice = notice(message),
        username = escape(username),
        email = escape(email),
    );
    layout("Register", None, &body)
}

pub fn login_form(message: Option<&str>, username: &str) -> String {
    let body = format!(
        r#"<h1>Login</h1>
{notice}
<form method="post" action="/login">
<label>Username <input name="username" value="{username}" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Login</button>
</form>"#,
        notice = notice(message),
        username = escape(username),
    );
    layout("Login", None, &body)
}

fn appointment_rows(views: &[AppointmentView]) -> String {
    if views.is_empty() {
        return r#"<p class="empty">No appointments yet.</p>"#.to_string();
    }
    let rows: String = views
        .iter()
        .map(|view| {
            format!(
                r#"<tr class="appointment"><td>{date}</td><td>{child} ({age})</td><td>{doctor}</td><td>{department}</td><td class="status-{status}">{status}</td></tr>"#,
                date = view.appointment.appointment_date.format("%Y-%m-%d %H:%M"),
                child = escape(&view.appointment.child_name),
                age = view.appointment.child_age,
                doctor = escape(&view.doctor_name),
                department = escape(&view.department_name),
                status = view.appointment.status,
            )
        })
        .collect();
    format!(
        "<table><tr><th>Date</th><th>Child</th><th>Doctor</th><th>Department</th><th>Status</th></tr>{}</table>",
        rows
    )
}

fn record_rows(records: &[MedicalRecord]) -> String {
    if records.is_empty() {
        return r#"<p class="empty">No medical records.</p>"#.to_string();
    }
    let rows: String = records
        .iter()
        .map(|record| {
            format!(
                r#"<tr class="record"><td>{date}</td><td>{kind}</td><td>{title}</td><td>{doctor}</td><td>{description}</td></tr>"#,
                date = record.date.format("%Y-%m-%d"),
                kind = escape(&record.record_type),
                title = escape(&record.title),
                doctor = opt(&record.doctor_name),
                description = opt(&record.description),
            )
        })
        .collect();
    format!(
        "<table><tr><th>Date</th><th>Type</th><th>Title</th><th>Doctor</th><th>Notes</th></tr>{}</table>",
        rows
    )
}

pub fn dashboard(summary: &DashboardSummary, session: &Session, message: Option<&str>) -> String {
    let body = format!(
        r#"{notice}
<h1>Welcome, {name}</h1>
<p class="role">{role}</p>
<h2>Recent appointments</h2>
{appointments}
<p><a href="/book_appointment">Book an appointment</a></p>
<h2>Recent medical records</h2>
{records}"#,
        notice = notice(message),
        name = escape(&summary.user.username),
        role = Role::of(session),
        appointments = appointment_rows(&summary.appointments),
        records = record_rows(&summary.records),
    );
    layout("Dashboard", Some(session), &body)
}

pub fn departments(list: &[Department], session: Option<&Session>) -> String {
    let cards: String = list.iter().map(department_card).collect();
    layout(
        "Departments",
        session,
        &format!(r#"<h1>Departments</h1><ul class="departments">{}</ul>"#, cards),
    )
}

pub fn department_detail(detail: &DepartmentDetail, session: Option<&Session>) -> String {
    let services: String = detail
        .department
        .services
        .iter()
        .map(|s| format!("<li>{}</li>", escape(s)))
        .collect();
    let doctors: String = detail
        .doctors
        .iter()
        .map(|d| {
            format!(
                r#"<li class="doctor">{name}, {spec} ({years} years) <a href="/book_appointment?doctor_id={id}">Book</a></li>"#,
                name = escape(&d.name),
                spec = escape(&d.specialization),
                years = d.experience.unwrap_or(0),
                id = d.id,
            )
        })
        .collect();
    let body = format!(
        r#"<h1>{name}</h1>
<p>{description}</p>
<p>Ext: {ext}</p>
<h2>Services</h2><ul class="services">{services}</ul>
<h2>Doctors</h2><ul class="doctors">{doctors}</ul>"#,
        name = escape(&detail.department.name),
        description = escape(&detail.department.description),
        ext = opt(&detail.department.contact_ext),
        services = services,
        doctors = doctors,
    );
    layout(&detail.department.name, session, &body)
}

pub fn doctors(listings: &[DoctorListing], session: Option<&Session>) -> String {
    let rows: String = listings
        .iter()
        .map(|l| {
            format!(
                r#"<tr class="doctor"><td>{name}</td><td>{spec}</td><td>{department}</td><td>{years}</td><td>{qualification}</td></tr>"#,
                name = escape(&l.doctor.name),
                spec = escape(&l.doctor.specialization),
                department = escape(&l.department_name),
                years = l.doctor.experience.map(|y| y.to_string()).unwrap_or_default(),
                qualification = opt(&l.doctor.qualification),
            )
        })
        .collect();
    layout(
        "Doctors",
        session,
        &format!(
            "<h1>Our Doctors</h1><table><tr><th>Name</th><th>Specialization</th><th>Department</th><th>Experience</th><th>Qualification</th></tr>{}</table>",
            rows
        ),
    )
}

pub fn booking_form(
    listings: &[DoctorListing],
    selected: Option<u64>,
    message: Option<&str>,
    session: &Session,
) -> String {
    let options: String = listings
        .iter()
        .map(|l| {
            format!(
                r#"<option value="{id}"{selected}>{name} ({department})</option>"#,
                id = l.doctor.id,
                selected = if selected == Some(l.doctor.id) { " selected" } else { "" },
                name = escape(&l.doctor.name),
                department = escape(&l.department_name),
            )
        })
        .collect();
    let body = format!(
        r#"<h1>Book an appointment</h1>
{notice}
<form method="post" action="/book_appointment">
<label>Doctor <select name="doctor_id" required>{options}</select></label>
<label>Child's name <input name="child_name" required></label>
<label>Child's age <input type="number" name="child_age" min="0" required></label>
<label>Date and time <input type="datetime-local" name="appointment_date" required></label>
<label>Symptoms <textarea name="symptoms"></textarea></label>
<button type="submit">Book</button>
</form>"#,
        notice = notice(message),
        options = options,
    );
    layout("Book an appointment", Some(session), &body)
}

pub fn pharmacy(catalog: &PharmacyCatalog, session: Option<&Session>) -> String {
    let categories: String = catalog
        .categories
        .iter()
        .map(|c| format!(r#"<li class="category">{}</li>"#, escape(c)))
        .collect();
    let medicines: String = catalog
        .medicines
        .iter()
        .map(|m| {
            format!(
                r#"<tr class="medicine"><td>{name}</td><td>{description}</td><td>{category}</td><td>{age}</td><td>${price:.2}</td><td>{stock}</td></tr>"#,
                name = escape(&m.name),
                description = opt(&m.description),
                category = opt(&m.category),
                age = opt(&m.for_age),
                price = m.price,
                stock = m.stock,
            )
        })
        .collect();
    let body = format!(
        r#"<h1>Pharmacy</h1>
<ul class="categories">{categories}</ul>
<table><tr><th>Medicine</th><th>Description</th><th>Category</th><th>Age</th><th>Price</th><th>In stock</th></tr>{medicines}</table>"#,
        categories = categories,
        medicines = medicines,
    );
    layout("Pharmacy", session, &body)
}

pub fn medical_records(records: &[MedicalRecord], session: &Session) -> String {
    layout(
        "Medical records",
        Some(session),
        &format!("<h1>Medical records</h1>{}", record_rows(records)),
    )
}

pub fn emergency(department: Option<&Department>, session: Option<&Session>) -> String {
    let contact = department
        .map(|d| {
            format!(
                "<p>{name} is open 24/7. Internal extension: {ext}.</p>",
                name = escape(&d.name),
                ext = opt(&d.contact_ext),
            )
        })
        .unwrap_or_default();
    let body = format!(
        r#"<h1>Emergency</h1>
<p class="alert">If your child is in immediate danger, call your local emergency number now.</p>
{contact}"#,
        contact = contact
    );
    layout("Emergency", session, &body)
}

pub fn error_page(status: StatusCode, message: &str, session: Option<&Session>) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<h1>{code} {title}</h1><p class="error">{message}</p><p><a href="/">Back to the home page</a></p>"#,
        code = status.as_u16(),
        title = escape(title),
        message = escape(message),
    );
    layout(title, session, &body)
}
