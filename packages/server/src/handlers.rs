//! HTTP handler functions for the alert map API.
//!
//! Identity is supplied by an external auth collaborator: mutating
//! endpoints trust the `X-User-Id` header and perform no authentication
//! themselves.

use std::sync::PoisonError;

use actix_web::{HttpRequest, HttpResponse, web};
use alert_map_notify::{build_delivery_intents, match_subscribers};
use alert_map_report::ReportDraft;
use alert_map_server_models::{
    ApiHealth, ApiReport, ApiSightingType, ApiUser, DirectoryQueryParams, RegisterBody,
    ReportQueryParams, SubmitReportResponse, UpdateSettingsBody,
};
use alert_map_sighting_models::SightingType;
use alert_map_user_models::{NotificationSettings, User};
use uuid::Uuid;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/sighting-types`
///
/// Returns the sighting type taxonomy.
pub async fn sighting_types() -> HttpResponse {
    let types: Vec<ApiSightingType> = SightingType::all()
        .iter()
        .map(|ty| ApiSightingType {
            id: *ty,
            requires_description: ty.requires_other_description(),
        })
        .collect();

    HttpResponse::Ok().json(types)
}

/// `GET /api/reports`
///
/// Lists reports newest first, optionally restricted to one
/// `"County, State"` area partition.
pub async fn list_reports(
    state: web::Data<AppState>,
    params: web::Query<ReportQueryParams>,
) -> HttpResponse {
    let reports = state.reports.read().unwrap_or_else(PoisonError::into_inner);

    let filtered: Vec<ApiReport> = reports
        .iter()
        .filter(|r| {
            params
                .area
                .as_deref()
                .is_none_or(|area| r.area.as_deref() == Some(area))
        })
        .take(params.limit.unwrap_or(usize::MAX))
        .cloned()
        .map(ApiReport::from)
        .collect();

    HttpResponse::Ok().json(filtered)
}

/// `POST /api/reports`
///
/// Runs the full submission pipeline synchronously: validate → persist →
/// match → dispatch. Validation failures come back as a structured `400`;
/// the report is only ever stored whole.
pub async fn submit_report(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ReportDraft>,
) -> HttpResponse {
    let users = state.users_snapshot();
    let Some(reporter) = current_user(&req, &users) else {
        return HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Unknown or missing X-User-Id"
        }));
    };

    let report = match alert_map_report::admit(body.into_inner(), reporter) {
        Ok(report) => report,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string(),
                "code": e.code(),
            }));
        }
    };

    // Prepend and persist under the write lock so the admit-and-append
    // step stays a single atomic transition.
    {
        let mut reports = state
            .reports
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        reports.insert(0, report.clone());
        if let Err(e) = state.store.save_reports(&reports) {
            reports.remove(0);
            log::error!("Failed to persist report collection: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to persist report"
            }));
        }
    }

    let matched = match_subscribers(&report, &users);
    let intents = build_delivery_intents(&report, &matched, &state.origin);
    for intent in &intents {
        state.sender.send(intent);
    }

    HttpResponse::Created().json(SubmitReportResponse {
        report: report.into(),
        notified_subscribers: matched.len(),
        delivery_intents: intents.len(),
    })
}

/// `DELETE /api/reports/{id}`
///
/// Admin-only hard delete.
pub async fn delete_report(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let users = state.users_snapshot();
    let Some(user) = current_user(&req, &users) else {
        return HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Unknown or missing X-User-Id"
        }));
    };
    if !user.is_admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only admins may delete reports"
        }));
    }

    let id = path.into_inner();
    let mut reports = state
        .reports
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let Some(pos) = reports.iter().position(|r| r.id == id) else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": "No such report"
        }));
    };
    let removed = reports.remove(pos);
    if let Err(e) = state.store.save_reports(&reports) {
        reports.insert(pos, removed);
        log::error!("Failed to persist report collection: {e}");
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to persist deletion"
        }));
    }

    HttpResponse::NoContent().finish()
}

/// `POST /api/users`
///
/// Registers a user with the default notification settings.
pub async fn register(state: web::Data<AppState>, body: web::Json<RegisterBody>) -> HttpResponse {
    let body = body.into_inner();
    if body.username.trim().is_empty() || body.email.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Username and email are required"
        }));
    }

    let mut users = state.users.write().unwrap_or_else(PoisonError::into_inner);
    if users
        .iter()
        .any(|u| u.email.eq_ignore_ascii_case(body.email.trim()))
    {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": "An account with this email already exists"
        }));
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        username: body.username.trim().to_string(),
        email: body.email.trim().to_string(),
        is_admin: false,
        state: body.state,
        county: body.county,
        notification_settings: NotificationSettings::default(),
    };
    users.push(user.clone());
    if let Err(e) = state.store.save_users(&users) {
        users.pop();
        log::error!("Failed to persist users collection: {e}");
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to persist user"
        }));
    }

    HttpResponse::Created().json(ApiUser::from(user))
}

/// `GET /api/users/{id}`
pub async fn get_user(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    let users = state.users.read().unwrap_or_else(PoisonError::into_inner);
    users.iter().find(|u| u.id == id).map_or_else(
        || {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": "No such user"
            }))
        },
        |user| HttpResponse::Ok().json(ApiUser::from(user.clone())),
    )
}

/// `PUT /api/users/{id}/settings`
///
/// Replaces the whole notification preference struct atomically. The
/// phone number is cleared whenever SMS is disabled. Callers may only
/// change their own settings.
pub async fn update_settings(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<UpdateSettingsBody>,
) -> HttpResponse {
    let id = path.into_inner();
    let body = body.into_inner();

    let mut users = state.users.write().unwrap_or_else(PoisonError::into_inner);
    let Some(caller) = current_user(&req, &users) else {
        return HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Unknown or missing X-User-Id"
        }));
    };
    if caller.id != id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Settings may only be changed by their owner"
        }));
    }
    let Some(pos) = users.iter().position(|u| u.id == id) else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": "No such user"
        }));
    };

    let mut settings = body.notification_settings;
    if !settings.sms {
        settings.phone_number = None;
    }
    let previous = users[pos].clone();
    users[pos].state = body.state;
    users[pos].county = body.county;
    users[pos].notification_settings = settings;

    if let Err(e) = state.store.save_users(&users) {
        users[pos] = previous;
        log::error!("Failed to persist users collection: {e}");
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to persist settings"
        }));
    }

    HttpResponse::Ok().json(ApiUser::from(users[pos].clone()))
}

/// `GET /api/lawyers`
pub async fn lawyers(params: web::Query<DirectoryQueryParams>) -> HttpResponse {
    params.state.as_deref().map_or_else(
        || HttpResponse::Ok().json(alert_map_directory::lawyers()),
        |s| HttpResponse::Ok().json(alert_map_directory::lawyers_by_state(s)),
    )
}

/// `GET /api/facilities`
pub async fn facilities(params: web::Query<DirectoryQueryParams>) -> HttpResponse {
    params.state.as_deref().map_or_else(
        || HttpResponse::Ok().json(alert_map_directory::facilities()),
        |s| HttpResponse::Ok().json(alert_map_directory::facilities_by_state(s)),
    )
}

/// `GET /api/news`
pub async fn news() -> HttpResponse {
    HttpResponse::Ok().json(alert_map_directory::news())
}

/// `GET /api/lawsuits`
pub async fn lawsuits() -> HttpResponse {
    HttpResponse::Ok().json(alert_map_directory::lawsuits())
}

/// Resolves the current user from the `X-User-Id` header.
fn current_user<'a>(req: &HttpRequest, users: &'a [User]) -> Option<&'a User> {
    let id = req.headers().get("X-User-Id")?.to_str().ok()?;
    users.iter().find(|u| u.id == id)
}
