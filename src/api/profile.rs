use crate::database::MongoDB;
use crate::middleware::auth::{AuthRecruiter, AuthUser};
use crate::models::{RecruiterInfo, UserInfo};
use crate::services::profile_service::{
    self, EditProfilePayload, EditProfileResponse, PublicProfileResponse,
};
use crate::utils::AppError;
use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/profile/{uid}",
    tag = "Profile",
    params(
        ("uid" = String, Path, description = "user_id do perfil")
    ),
    responses(
        (status = 200, description = "Public profile", body = PublicProfileResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn public_profile(
    db: web::Data<MongoDB>,
    uid: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET {}", req.path());

    let response = profile_service::public_profile(&db, &uid, req.path()).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "Profile",
    responses(
        (status = 200, description = "Profile of the session owner", body = UserInfo),
        (status = 401, description = "No session"),
        (status = 403, description = "Session belongs to a recruiter")
    ),
    security(("session_cookie" = []))
)]
pub async fn my_profile(user: AuthUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(UserInfo::from(user.0)))
}

#[utoipa::path(
    get,
    path = "/api/company/profile",
    tag = "Profile",
    responses(
        (status = 200, description = "Profile of the recruiter session owner", body = RecruiterInfo),
        (status = 401, description = "No session"),
        (status = 403, description = "Session belongs to a user")
    ),
    security(("session_cookie" = []))
)]
pub async fn company_profile(recruiter: AuthRecruiter) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(RecruiterInfo::from(recruiter.0)))
}

#[utoipa::path(
    post,
    path = "/api/edit/profile",
    tag = "Profile",
    request_body = EditProfilePayload,
    responses(
        (status = 200, description = "Profile updated", body = EditProfileResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "No session"),
        (status = 403, description = "Session belongs to a recruiter")
    ),
    security(("session_cookie" = []))
)]
pub async fn edit_profile(
    db: web::Data<MongoDB>,
    user: AuthUser,
    payload: web::Json<EditProfilePayload>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 POST /api/edit/profile - user: {}", user.0.user_id);

    payload.validate()?;

    let response = profile_service::edit_profile(&db, &user.0.user_id, &payload).await?;

    Ok(HttpResponse::Ok().json(response))
}
