use crate::config::AppConfig;
use crate::database::MongoDB;
use crate::services::auth_service::{
    self, AuthResponse, JoinPayload, JoinResponse, LoginPayload, Role,
};
use crate::utils::AppError;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct AuthQuery {
    /// "u" para usuário, "r" para recrutador
    #[serde(rename = "type")]
    pub kind: String,
}

#[utoipa::path(
    post,
    path = "/api/join",
    tag = "Auth",
    request_body = JoinPayload,
    responses(
        (status = 200, description = "Account created, or email already taken (ok=false, code=1)", body = JoinResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn join(
    db: web::Data<MongoDB>,
    payload: web::Json<JoinPayload>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /api/join - email: {}", payload.email);

    payload.validate()?;

    let response = auth_service::join_user(&db, &payload).await?;
    if !response.ok {
        log::warn!("⚠️ Join refused, email already taken: {}", payload.email);
    }

    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/company/join",
    tag = "Auth",
    request_body = JoinPayload,
    responses(
        (status = 200, description = "Recruiter account created (unverified), or email already taken (ok=false, code=1)", body = JoinResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn company_join(
    db: web::Data<MongoDB>,
    payload: web::Json<JoinPayload>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /api/company/join - email: {}", payload.email);

    payload.validate()?;

    let response = auth_service::join_recruiter(&db, &payload).await?;
    if !response.ok {
        log::warn!("⚠️ Company join refused, email already taken: {}", payload.email);
    }

    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/auth",
    tag = "Auth",
    request_body = LoginPayload,
    params(
        ("type" = String, Query, description = "Account kind: 'u' for user, 'r' for recruiter")
    ),
    responses(
        (status = 200, description = "Session opened; token also set as httpOnly cookie", body = AuthResponse),
        (status = 400, description = "Missing or unknown account kind"),
        (status = 403, description = "Password does not match (code=3)"),
        (status = 404, description = "No account with this email (code=2)")
    )
)]
pub async fn login(
    db: web::Data<MongoDB>,
    config: web::Data<AppConfig>,
    query: web::Query<AuthQuery>,
    payload: web::Json<LoginPayload>,
) -> Result<HttpResponse, AppError> {
    let role = match query.kind.as_str() {
        "u" => Role::User,
        "r" => Role::Recruiter,
        other => {
            return Err(AppError::Validation(format!(
                "unknown account type '{}', expected 'u' or 'r'",
                other
            )))
        }
    };

    log::info!("🔐 POST /api/auth?type={} - email: {}", query.kind, payload.email);

    payload.validate()?;

    let token = auth_service::login(&db, &config, role, &payload).await?;
    let cookie = auth_service::session_cookie(&config, &token);

    log::info!("✅ {} session opened: {}", role, payload.email);

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(AuthResponse { ok: true, token }))
}
