// rest_api/src/context.rs

//! Per-request context: the store handle, whoever the session cookie says is
//! calling, and any notice left by the previous redirect.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use log::warn;

use lib::storage_engine::HospitalStorage;
use models::Session;
use security::resolve_session;

use crate::errors::RestApiError;
use crate::state::AppState;

/// Cookie carrying a [`Notice`] across a single redirect.
pub const NOTICE_COOKIE: &str = "hospital_notice";

/// One-shot message shown on the page a successful action redirects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Registered,
    LoggedIn,
    LoggedOut,
    Booked,
    LoginRequired,
}

impl Notice {
    const ALL: [Notice; 5] = [
        Notice::Registered,
        Notice::LoggedIn,
        Notice::LoggedOut,
        Notice::Booked,
        Notice::LoginRequired,
    ];

    /// Value stored in the cookie.
    pub fn code(&self) -> &'static str {
        match self {
            Notice::Registered => "registered",
            Notice::LoggedIn => "logged_in",
            Notice::LoggedOut => "logged_out",
            Notice::Booked => "booked",
            Notice::LoginRequired => "login_required",
        }
    }

    pub fn from_code(code: &str) -> Option<Notice> {
        Notice::ALL.into_iter().find(|notice| notice.code() == code)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::Registered => "Registration successful! Please login.",
            Notice::LoggedIn => "Login successful!",
            Notice::LoggedOut => "Logged out successfully",
            Notice::Booked => "Appointment booked successfully!",
            Notice::LoginRequired => "Please login to book an appointment",
        }
    }
}

pub struct RequestContext {
    pub store: Arc<dyn HospitalStorage>,
    pub session: Option<Session>,
    /// Raw token from the cookie, present even when it matched no session.
    pub token: Option<String>,
    pub notice: Option<Notice>,
    pub cookie_name: String,
    pub jar: CookieJar,
}

fn site_cookie(name: impl Into<String>, value: impl Into<String>) -> Cookie<'static> {
    Cookie::build((name.into(), value.into()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .into()
}

impl RequestContext {
    pub fn store(&self) -> &dyn HospitalStorage {
        self.store.as_ref()
    }

    pub fn require_session(&self) -> Result<&Session, RestApiError> {
        self.session.as_ref().ok_or(RestApiError::NotAuthenticated)
    }

    /// Jar that stores `token` for the rest of the browser session.
    pub fn with_session(&self, token: &str) -> CookieJar {
        self.jar.clone().add(site_cookie(self.cookie_name.clone(), token))
    }

    /// Jar that makes the browser drop the session cookie.
    pub fn without_session(&self) -> CookieJar {
        self.jar.clone().remove(site_cookie(self.cookie_name.clone(), ""))
    }

    /// Jar with the notice cookie cleared, once the notice has been shown.
    pub fn notice_shown(&self) -> CookieJar {
        if self.jar.get(NOTICE_COOKIE).is_some() {
            self.jar.clone().remove(site_cookie(NOTICE_COOKIE, ""))
        } else {
            self.jar.clone()
        }
    }

    pub fn notice_message(&self) -> Option<&'static str> {
        self.notice.map(|notice| notice.message())
    }
}

/// Leaves `notice` for the next page the browser loads.
pub fn flash(jar: CookieJar, notice: Notice) -> CookieJar {
    jar.add(site_cookie(NOTICE_COOKIE, notice.code()))
}

/// Non-empty value of the cookie called `name`.
pub fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|value| !value.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = RestApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = cookie_value(&jar, &state.config.session_cookie);
        let session = match &token {
            Some(token) => {
                let session = resolve_session(token, state.store.as_ref()).await?;
                if session.is_none() {
                    warn!("Request carried an unknown session token");
                }
                session
            }
            None => None,
        };
        let notice = cookie_value(&jar, NOTICE_COOKIE).and_then(|code| Notice::from_code(&code));
        Ok(RequestContext {
            store: state.store.clone(),
            session,
            token,
            notice,
            cookie_name: state.config.session_cookie.clone(),
            jar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    fn jar(cookies: &'static str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static(cookies));
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn cookie_value_picks_the_named_cookie() {
        let jar = jar("theme=dark; hospital_session=abc123");
        assert_eq!(cookie_value(&jar, "hospital_session").as_deref(), Some("abc123"));
        assert_eq!(cookie_value(&jar, "missing"), None);
    }

    #[test]
    fn empty_cookie_counts_as_absent() {
        assert_eq!(cookie_value(&jar("hospital_session="), "hospital_session"), None);
    }

    #[test]
    fn notice_codes_are_recognised() {
        for notice in Notice::ALL {
            assert_eq!(Notice::from_code(notice.code()), Some(notice));
        }
        assert_eq!(Notice::from_code("<script>"), None);
        assert_eq!(Notice::Booked.message(), "Appointment booked successfully!");
    }

    #[test]
    fn flash_sets_an_http_only_notice_cookie() {
        let jar = flash(CookieJar::new(), Notice::Registered);
        let cookie = jar.get(NOTICE_COOKIE).unwrap();
        assert_eq!(cookie.value(), "registered");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}
